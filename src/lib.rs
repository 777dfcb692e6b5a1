// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app;
pub mod config;
pub mod content;
pub mod feedback;
pub mod quiz;
pub mod runtime;
pub mod sequencer;
pub mod ui;
