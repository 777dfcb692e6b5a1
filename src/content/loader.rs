use super::model::{ActivitySet, Text, TranslationSet};
use super::repository::{ContentRepository, FALLBACK_LANG};
use include_dir::{include_dir, Dir};
use std::fs;
use std::path::{Path, PathBuf};

static DATA_DIR: Dir = include_dir!("src/content/data");

const REQUIRED_LABEL_KEYS: [&str; 6] = [
    "q1_title",
    "q2_title",
    "q3_title",
    "q4_title",
    "feedback_correct",
    "feedback_incorrect",
];

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid content: {0}")]
    Invalid(String),
}

/// Which stage of the two-stage loader produced a dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    External,
    Embedded,
}

/// Supplies activity and translation datasets. The file-backed and embedded
/// providers are interchangeable implementations of the same capability.
pub trait ContentProvider {
    fn load_activities(&self) -> Result<ActivitySet, ContentError>;
    fn load_translations(&self) -> Result<TranslationSet, ContentError>;
}

/// Reads datasets from user-supplied JSON files.
#[derive(Debug, Clone)]
pub struct FileProvider {
    activities_path: PathBuf,
    translations_path: Option<PathBuf>,
}

impl FileProvider {
    pub fn new<P: AsRef<Path>>(activities_path: P, translations_path: Option<PathBuf>) -> Self {
        Self {
            activities_path: activities_path.as_ref().to_path_buf(),
            translations_path,
        }
    }
}

impl ContentProvider for FileProvider {
    fn load_activities(&self) -> Result<ActivitySet, ContentError> {
        let bytes = fs::read(&self.activities_path)?;
        let set: ActivitySet = serde_json::from_slice(&bytes)?;
        validate_activities(&set)?;
        Ok(set)
    }

    fn load_translations(&self) -> Result<TranslationSet, ContentError> {
        let path = self
            .translations_path
            .as_ref()
            .ok_or_else(|| ContentError::Invalid("no external translations".to_string()))?;
        let bytes = fs::read(path)?;
        let set: TranslationSet = serde_json::from_slice(&bytes)?;
        validate_translations(&set)?;
        Ok(set)
    }
}

/// Reads the datasets compiled into the binary. These are validated by unit
/// tests, so a failure here is a build defect.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedProvider;

fn embedded_json(name: &str) -> &'static str {
    DATA_DIR
        .get_file(name)
        .expect("embedded dataset not found")
        .contents_utf8()
        .expect("embedded dataset is not utf-8")
}

impl ContentProvider for EmbeddedProvider {
    fn load_activities(&self) -> Result<ActivitySet, ContentError> {
        let set: ActivitySet = serde_json::from_str(embedded_json("activities.json"))?;
        validate_activities(&set)?;
        Ok(set)
    }

    fn load_translations(&self) -> Result<TranslationSet, ContentError> {
        let set: TranslationSet = serde_json::from_str(embedded_json("translations.json"))?;
        validate_translations(&set)?;
        Ok(set)
    }
}

fn validate_activities(set: &ActivitySet) -> Result<(), ContentError> {
    if set.activities.is_empty() {
        return Err(ContentError::Invalid("empty activity list".to_string()));
    }
    for activity in &set.activities {
        match &activity.description {
            Text::Plain(s) if s.is_empty() => {
                return Err(ContentError::Invalid(format!(
                    "activity {} has an empty description",
                    activity.id
                )));
            }
            Text::Localized(map) if !map.contains_key(FALLBACK_LANG) => {
                return Err(ContentError::Invalid(format!(
                    "activity {} is missing the {} description",
                    activity.id, FALLBACK_LANG
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

fn validate_translations(set: &TranslationSet) -> Result<(), ContentError> {
    if !set.contains_key(FALLBACK_LANG) {
        return Err(ContentError::Invalid(format!(
            "missing {} label table",
            FALLBACK_LANG
        )));
    }
    for (lang, table) in set {
        for key in REQUIRED_LABEL_KEYS {
            if !table.contains_key(key) {
                return Err(ContentError::Invalid(format!(
                    "language {lang} is missing required key {key}"
                )));
            }
        }
    }
    Ok(())
}

/// Result of loading, with the stage each dataset came from so callers can
/// report external-source failures instead of swallowing them.
#[derive(Debug)]
pub struct LoadOutcome {
    pub repository: ContentRepository,
    pub activities_source: Source,
    pub translations_source: Source,
}

/// Two-stage load: try the external provider, fall back to the embedded
/// datasets on any failure. The quiz is always playable.
pub fn load_content(external: Option<&FileProvider>) -> LoadOutcome {
    let embedded = EmbeddedProvider;

    let (activities, activities_source) = external
        .and_then(|p| p.load_activities().ok().map(|set| (set, Source::External)))
        .unwrap_or_else(|| {
            (
                embedded
                    .load_activities()
                    .expect("embedded activities must be valid"),
                Source::Embedded,
            )
        });

    let (translations, translations_source) = external
        .and_then(|p| {
            p.load_translations()
                .ok()
                .map(|set| (set, Source::External))
        })
        .unwrap_or_else(|| {
            (
                embedded
                    .load_translations()
                    .expect("embedded translations must be valid"),
                Source::Embedded,
            )
        });

    LoadOutcome {
        repository: ContentRepository::new(activities.activities, translations),
        activities_source,
        translations_source,
    }
}
