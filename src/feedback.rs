use crate::content::ContentRepository;
use crate::quiz::Evaluation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

/// A rendered feedback line for one answered item.
#[derive(Clone, Debug, PartialEq)]
pub struct Feedback {
    pub message: String,
    pub tone: Tone,
}

/// Maps an evaluation to the localized feedback message. Incorrect answers
/// interpolate the correct quadrant's display title into the template.
/// Resolution falls back through the repository chain, so this never fails.
pub fn format(evaluation: &Evaluation, repo: &ContentRepository, lang: &str) -> Feedback {
    if evaluation.is_correct {
        Feedback {
            message: repo.message("feedback_correct", lang).to_string(),
            tone: Tone::Success,
        }
    } else {
        let label = repo.label_for(evaluation.correct_quadrant, lang);
        Feedback {
            message: repo
                .message("feedback_incorrect", lang)
                .replace("{quadrant}", label),
            tone: Tone::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentRepository, Quadrant};
    use std::collections::HashMap;

    fn repo() -> ContentRepository {
        let mut translations = HashMap::new();
        let mut en = HashMap::new();
        en.insert("feedback_correct".to_string(), "Correct!".to_string());
        en.insert(
            "feedback_incorrect".to_string(),
            "Wrong, it is {quadrant}".to_string(),
        );
        en.insert("q3_title".to_string(), "Quadrant Three".to_string());
        translations.insert("en".to_string(), en);
        let mut pt = HashMap::new();
        pt.insert("feedback_correct".to_string(), "Correto!".to_string());
        pt.insert(
            "feedback_incorrect".to_string(),
            "Errado, é {quadrant}".to_string(),
        );
        pt.insert("q3_title".to_string(), "Quadrante Três".to_string());
        translations.insert("pt".to_string(), pt);
        ContentRepository::new(vec![], translations)
    }

    #[test]
    fn test_correct_feedback_uses_fixed_template() {
        let feedback = format(
            &Evaluation {
                is_correct: true,
                correct_quadrant: Quadrant::Q1,
            },
            &repo(),
            "en",
        );
        assert_eq!(feedback.message, "Correct!");
        assert_eq!(feedback.tone, Tone::Success);
    }

    #[test]
    fn test_incorrect_feedback_interpolates_quadrant_title() {
        let feedback = format(
            &Evaluation {
                is_correct: false,
                correct_quadrant: Quadrant::Q3,
            },
            &repo(),
            "pt",
        );
        assert_eq!(feedback.message, "Errado, é Quadrante Três");
        assert_eq!(feedback.tone, Tone::Error);
    }

    #[test]
    fn test_unresolvable_language_falls_back() {
        let feedback = format(
            &Evaluation {
                is_correct: false,
                correct_quadrant: Quadrant::Q3,
            },
            &repo(),
            "xx",
        );
        assert_eq!(feedback.message, "Wrong, it is Quadrant Three");
    }

    #[test]
    fn test_formatting_without_any_tables_uses_builtins() {
        let empty = ContentRepository::new(vec![], HashMap::new());
        let feedback = format(
            &Evaluation {
                is_correct: false,
                correct_quadrant: Quadrant::Q4,
            },
            &empty,
            "en",
        );
        assert!(feedback.message.contains("Q4"));
        assert!(!feedback.message.contains("{quadrant}"));
    }
}
