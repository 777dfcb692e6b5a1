pub mod loader;
pub mod model;
pub mod repository;

pub use loader::{load_content, ContentError, ContentProvider, EmbeddedProvider, FileProvider, LoadOutcome, Source};
pub use model::{Activity, ActivitySet, LabelTable, Quadrant, Text, TranslationSet};
pub use repository::{ContentRepository, FALLBACK_LANG};
