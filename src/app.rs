use crate::config::{Config, ConfigStore};
use crate::content::{ContentRepository, Quadrant};
use crate::feedback::{self, Feedback};
use crate::quiz::{Phase, Quiz, QuizError, Summary};
use crate::runtime::PendingAdvance;

pub const TICK_RATE_MS: u64 = 100;

/// Post-answer delay before auto-advancing, in ticks (~1.2s).
pub const ADVANCE_DELAY_TICKS: u32 = 12;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// The engine object: owns the session, the loaded content, the active
/// language, and the pending auto-advance. All mutation goes through its
/// methods; the event loop and the UI hold no state of their own.
pub struct App {
    repo: ContentRepository,
    quiz: Quiz,
    language: String,
    store: Box<dyn ConfigStore>,
    pending: Option<PendingAdvance>,
    feedback: Option<Feedback>,
}

impl App {
    /// Builds the engine from loaded content. The active language comes from
    /// the persisted preference, validated against the loaded label tables.
    pub fn new(repo: ContentRepository, store: Box<dyn ConfigStore>) -> Result<Self, QuizError> {
        let language = store.load().language_or_default(&repo.languages());
        let quiz = Quiz::new(repo.activities())?;
        Ok(Self {
            repo,
            quiz,
            language,
            store,
            pending: None,
            feedback: None,
        })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn repo(&self) -> &ContentRepository {
        &self.repo
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending.is_some()
    }

    /// Single input entry point: evaluates the selected quadrant for the
    /// current item. A second press during the feedback delay and presses
    /// after completion are no-ops per the one-answer-per-item policy.
    pub fn submit(&mut self, selected: Quadrant) -> Result<(), QuizError> {
        let evaluation = self.quiz.submit_answer(selected)?;
        self.feedback = Some(feedback::format(&evaluation, &self.repo, &self.language));
        self.pending = Some(PendingAdvance::after_ticks(
            ADVANCE_DELAY_TICKS,
            self.quiz.generation(),
        ));
        Ok(())
    }

    /// Drives the deferred advance. Returns true when the visible state
    /// changed and the UI should redraw. A pending advance scheduled under an
    /// older generation is dropped without touching the new session.
    pub fn on_tick(&mut self) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        if !pending.on_tick() {
            return false;
        }
        let fired = self.pending.take();
        if let Some(p) = fired {
            if !p.is_stale(self.quiz.generation()) {
                self.advance_now();
            }
        }
        true
    }

    /// Fires the scheduled advance immediately (e.g. the user hits a key
    /// instead of waiting out the delay). No-op without a pending advance.
    pub fn fire_pending(&mut self) {
        if let Some(p) = self.pending.take() {
            if !p.is_stale(self.quiz.generation()) {
                self.advance_now();
            }
        }
    }

    fn advance_now(&mut self) {
        self.feedback = None;
        self.quiz.advance();
    }

    /// Fresh session over the same content: reshuffle, zero score/position.
    /// Cancels any scheduled advance.
    pub fn restart(&mut self) {
        self.quiz.reset();
        self.pending = None;
        self.feedback = None;
    }

    /// Switches the active language. Unsupported codes are rejected and the
    /// previous language is retained. On success the preference is persisted
    /// and the session unconditionally restarts; a language change always
    /// means a fresh quiz, never an in-place relabel.
    pub fn set_language(&mut self, lang: &str) -> Result<(), AppError> {
        if !self.repo.supports(lang) {
            return Err(AppError::UnsupportedLanguage(lang.to_string()));
        }
        self.language = lang.to_string();
        // A failed save costs only the preference, not the session
        let _ = self.store.save(&Config {
            language: self.language.clone(),
        });
        self.restart();
        Ok(())
    }

    /// Rotates to the next loaded language (sorted order, wrapping).
    pub fn cycle_language(&mut self) {
        let langs: Vec<String> = self.repo.languages().iter().map(|s| s.to_string()).collect();
        if langs.len() < 2 {
            return;
        }
        let idx = langs.iter().position(|l| l == &self.language).unwrap_or(0);
        let next = langs[(idx + 1) % langs.len()].clone();
        // Codes from the repository's own table set are always supported
        let _ = self.set_language(&next);
    }

    // ---- localized display lines for the presentation boundary ----

    pub fn item_text(&self) -> Option<&str> {
        self.quiz
            .current_item()
            .ok()
            .map(|a| self.repo.resolve(&a.description, &self.language))
    }

    pub fn prompt_line(&self) -> String {
        self.repo
            .message("question_prompt", &self.language)
            .to_string()
    }

    pub fn progress_line(&self) -> String {
        let current = match self.quiz.phase() {
            Phase::Active => self.quiz.position() + 1,
            Phase::Complete => self.quiz.total(),
        };
        self.repo
            .message("progress", &self.language)
            .replace("{current}", &current.to_string())
            .replace("{total}", &self.quiz.total().to_string())
    }

    pub fn score_line(&self) -> String {
        self.repo
            .message("score_label", &self.language)
            .replace("{score}", &self.quiz.score().to_string())
    }

    pub fn instructions_line(&self) -> String {
        self.repo
            .message("instructions", &self.language)
            .to_string()
    }

    /// Answer options as (key, localized quadrant title) pairs.
    pub fn options(&self) -> Vec<(char, &str)> {
        Quadrant::ALL
            .iter()
            .zip(['1', '2', '3', '4'])
            .map(|(&q, key)| (key, self.repo.label_for(q, &self.language)))
            .collect()
    }

    pub fn completion_title(&self) -> String {
        self.repo
            .message("complete_title", &self.language)
            .to_string()
    }

    pub fn completion_summary_line(&self) -> String {
        let Summary {
            score,
            total,
            accuracy_pct,
        } = self.quiz.summary();
        self.repo
            .message("complete_summary", &self.language)
            .replace("{score}", &score.to_string())
            .replace("{total}", &total.to_string())
            .replace("{accuracy}", &accuracy_pct.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigStore;
    use crate::content::load_content;
    use assert_matches::assert_matches;

    fn app() -> App {
        let outcome = load_content(None);
        App::new(outcome.repository, Box::new(MemoryConfigStore::default())).unwrap()
    }

    fn correct_answer(app: &App) -> Quadrant {
        app.quiz().current_item().unwrap().quadrant
    }

    #[test]
    fn test_submit_schedules_advance_and_feedback() {
        let mut app = app();
        let q = correct_answer(&app);
        app.submit(q).unwrap();
        assert!(app.has_pending_advance());
        assert_eq!(app.feedback().unwrap().tone, crate::feedback::Tone::Success);
        assert_eq!(app.quiz().score(), 1);
    }

    #[test]
    fn test_second_submit_during_delay_is_rejected() {
        let mut app = app();
        let q = correct_answer(&app);
        app.submit(q).unwrap();
        assert_matches!(app.submit(q), Err(QuizError::AlreadyAnswered));
        assert_eq!(app.quiz().score(), 1);
    }

    #[test]
    fn test_advance_fires_after_delay_and_clears_feedback() {
        let mut app = app();
        let q = correct_answer(&app);
        app.submit(q).unwrap();

        for _ in 0..ADVANCE_DELAY_TICKS - 1 {
            assert!(!app.on_tick());
        }
        assert!(app.on_tick());
        assert!(app.feedback().is_none());
        assert!(!app.has_pending_advance());
        assert_eq!(app.quiz().position(), 1);
    }

    #[test]
    fn test_restart_discards_scheduled_advance() {
        let mut app = app();
        let q = correct_answer(&app);
        app.submit(q).unwrap();
        app.restart();

        assert!(!app.has_pending_advance());
        assert_eq!(app.quiz().position(), 0);
        assert_eq!(app.quiz().score(), 0);
    }

    #[test]
    fn test_stale_advance_is_discarded_not_applied() {
        let mut app = app();
        let q = correct_answer(&app);
        app.submit(q).unwrap();
        // Keep the pending advance but reset the session out from under it
        let stale = PendingAdvance::after_ticks(1, app.quiz().generation());
        app.quiz.reset();
        app.pending = Some(stale);

        assert!(app.on_tick());
        // The new session was not advanced by the dead session's callback
        assert_eq!(app.quiz().position(), 0);
    }

    #[test]
    fn test_set_language_resets_session() {
        let mut app = app();
        // Play two items to accumulate state
        for _ in 0..2 {
            let q = correct_answer(&app);
            app.submit(q).unwrap();
            app.fire_pending();
        }
        assert_eq!(app.quiz().position(), 2);

        app.set_language("pt").unwrap();

        assert_eq!(app.language(), "pt");
        assert_eq!(app.quiz().position(), 0);
        assert_eq!(app.quiz().score(), 0);
        assert_eq!(app.quiz().phase(), Phase::Active);
    }

    #[test]
    fn test_set_language_persists_preference() {
        let mut app = app();
        app.set_language("pt").unwrap();
        assert_eq!(app.store.load().language, "pt");
    }

    #[test]
    fn test_unsupported_language_is_rejected_without_state_change() {
        let mut app = app();
        let q = correct_answer(&app);
        app.submit(q).unwrap();
        app.fire_pending();
        let position = app.quiz().position();
        let score = app.quiz().score();

        assert_matches!(
            app.set_language("xx"),
            Err(AppError::UnsupportedLanguage(_))
        );
        assert_eq!(app.language(), "en");
        assert_eq!(app.quiz().position(), position);
        assert_eq!(app.quiz().score(), score);
    }

    #[test]
    fn test_cycle_language_wraps() {
        let mut app = app();
        assert_eq!(app.language(), "en");
        app.cycle_language();
        assert_eq!(app.language(), "pt");
        app.cycle_language();
        assert_eq!(app.language(), "en");
    }

    #[test]
    fn test_item_text_follows_language() {
        let mut app = app();
        let en_text = app.item_text().unwrap().to_string();
        assert!(!en_text.is_empty());
        app.set_language("pt").unwrap();
        // New session after the switch, but whatever is current resolves in pt
        let item = app.quiz().current_item().unwrap();
        let resolved = app.repo().resolve(&item.description, "pt");
        assert_eq!(app.item_text().unwrap(), resolved);
    }

    #[test]
    fn test_progress_and_score_lines_interpolate() {
        let mut app = app();
        let total = app.quiz().total();
        assert_eq!(
            app.progress_line(),
            format!("Activity 1 of {total}")
        );
        let q = correct_answer(&app);
        app.submit(q).unwrap();
        assert_eq!(app.score_line(), "Score: 1");
    }

    #[test]
    fn test_options_are_localized() {
        let mut app = app();
        let en_options: Vec<String> = app
            .options()
            .iter()
            .map(|(_, title)| title.to_string())
            .collect();
        app.set_language("pt").unwrap();
        let pt_options: Vec<String> = app
            .options()
            .iter()
            .map(|(_, title)| title.to_string())
            .collect();
        assert_eq!(en_options.len(), 4);
        assert_ne!(en_options, pt_options);
        assert!(pt_options[0].contains("Urgente"));
    }

    #[test]
    fn test_completion_summary_line() {
        let mut app = app();
        let total = app.quiz().total();
        for _ in 0..total {
            let q = correct_answer(&app);
            app.submit(q).unwrap();
            app.fire_pending();
        }
        assert_eq!(app.quiz().phase(), Phase::Complete);
        let line = app.completion_summary_line();
        assert!(line.contains(&format!("{total}/{total}")));
        assert!(line.contains("100"));
    }
}
