use super::model::{Activity, Quadrant, Text, TranslationSet};

/// Fallback language guaranteed present in every localized description.
pub const FALLBACK_LANG: &str = "en";

/// Built-in English label set. Last line of defense: the UI never renders an
/// empty or missing label, even with no translation tables loaded at all.
fn builtin_label(key: &str) -> &'static str {
    match key {
        "q1_title" => "Q1 · Urgent & Important",
        "q2_title" => "Q2 · Important, Not Urgent",
        "q3_title" => "Q3 · Urgent, Not Important",
        "q4_title" => "Q4 · Not Urgent, Not Important",
        "q1_example" => "crises, deadlines, emergencies",
        "q2_example" => "planning, health, learning",
        "q3_example" => "interruptions, some calls and emails",
        "q4_example" => "time wasters, idle scrolling",
        "feedback_correct" => "Correct!",
        "feedback_incorrect" => "Not quite. This belongs in {quadrant}",
        "question_prompt" => "Which quadrant does this activity belong to?",
        "progress" => "Activity {current} of {total}",
        "score_label" => "Score: {score}",
        "complete_title" => "Quiz complete!",
        "complete_summary" => "You scored {score}/{total} ({accuracy}%)",
        "instructions" => "(1-4) answer  (l) language  (r) restart  (esc) quit",
        _ => "",
    }
}

/// Holds the loaded activities and per-language label tables, and resolves
/// every piece of displayed text for the active language.
#[derive(Clone, Debug)]
pub struct ContentRepository {
    activities: Vec<Activity>,
    translations: TranslationSet,
}

impl ContentRepository {
    pub fn new(activities: Vec<Activity>, translations: TranslationSet) -> Self {
        Self {
            activities,
            translations,
        }
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Language codes with a loaded label table, sorted for stable cycling.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.translations.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    pub fn supports(&self, lang: &str) -> bool {
        self.translations.contains_key(lang)
    }

    /// Resolves displayable text for `lang`: exact hit, then the `en`
    /// fallback, then (for plain legacy strings) the string itself.
    pub fn resolve<'a>(&self, text: &'a Text, lang: &str) -> &'a str {
        match text {
            Text::Plain(s) => s,
            Text::Localized(map) => map
                .get(lang)
                .or_else(|| map.get(FALLBACK_LANG))
                .or_else(|| map.values().next())
                .map(String::as_str)
                .unwrap_or_default(),
        }
    }

    /// Localized display title for a quadrant. Fails closed to the built-in
    /// English labels when the table is absent or incomplete.
    pub fn label_for(&self, quadrant: Quadrant, lang: &str) -> &str {
        self.message(quadrant.title_key(), lang)
    }

    /// Localized UI/feedback template by key, with the same fallback chain
    /// as `label_for`.
    pub fn message(&self, key: &str, lang: &str) -> &str {
        self.translations
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| {
                self.translations
                    .get(FALLBACK_LANG)
                    .and_then(|table| table.get(key))
            })
            .map(String::as_str)
            .unwrap_or_else(|| builtin_label(key))
    }
}
