use serde::Deserialize;
use std::collections::HashMap;

/// The four Eisenhower quadrants. A closed set: quadrant semantics are fixed
/// at compile time and never inferred from content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Quadrant {
    /// Urgent and important
    Q1,
    /// Important, not urgent
    Q2,
    /// Urgent, not important
    Q3,
    /// Neither urgent nor important
    Q4,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::Q1, Quadrant::Q2, Quadrant::Q3, Quadrant::Q4];

    /// Maps the answer keys 1-4 to a quadrant.
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Quadrant::Q1),
            '2' => Some(Quadrant::Q2),
            '3' => Some(Quadrant::Q3),
            '4' => Some(Quadrant::Q4),
            _ => None,
        }
    }

    /// Key into the label table for this quadrant's display title.
    pub fn title_key(&self) -> &'static str {
        match self {
            Quadrant::Q1 => "q1_title",
            Quadrant::Q2 => "q2_title",
            Quadrant::Q3 => "q3_title",
            Quadrant::Q4 => "q4_title",
        }
    }
}

/// Displayable text, normalized at load time so render paths never have to
/// re-inspect the shape. Legacy datasets carry bare strings; newer ones map
/// language codes to strings with `en` guaranteed present.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Text {
    Localized(HashMap<String, String>),
    Plain(String),
}

impl Text {
    pub fn plain<S: Into<String>>(s: S) -> Self {
        Text::Plain(s.into())
    }
}

/// One classifiable prompt with exactly one correct quadrant.
/// Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Activity {
    pub id: String,
    pub description: Text,
    pub quadrant: Quadrant,
}

/// Wire shape of an activity dataset.
#[derive(Clone, Debug, Deserialize)]
pub struct ActivitySet {
    pub activities: Vec<Activity>,
}

/// Flat string-keyed label table for a single language.
pub type LabelTable = HashMap<String, String>;

/// Wire shape of a translation dataset: language code to label table.
pub type TranslationSet = HashMap<String, LabelTable>;
