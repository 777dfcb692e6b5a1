use crate::content::{Activity, Quadrant};
use crate::sequencer::shuffle;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    /// Zero activities after all fallbacks; the quiz cannot start.
    #[error("no activities available")]
    EmptyContent,
    /// An item was requested or answered outside an active session.
    #[error("no active item")]
    NoActiveItem,
    /// The current item already received its one answer.
    #[error("current item was already answered")]
    AlreadyAnswered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Active,
    Complete,
}

/// Outcome of comparing a selected quadrant to the current item's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub is_correct: bool,
    pub correct_quadrant: Quadrant,
}

/// Final tally for a completed session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub score: usize,
    pub total: usize,
    pub accuracy_pct: u32,
}

/// What `advance` produced: the next item, or the end of the session.
#[derive(Debug, PartialEq)]
pub enum Advance<'a> {
    Next(&'a Activity),
    Complete(Summary),
}

/// One quiz session: a fixed shuffled traversal order over the activity set,
/// a cursor, and a score. Score is mutated only by `submit_answer`, position
/// only by `advance`. Each item takes exactly one answer; a second submit
/// before advancing is rejected with `AlreadyAnswered`.
#[derive(Debug)]
pub struct Quiz {
    order: Vec<Activity>,
    position: usize,
    score: usize,
    phase: Phase,
    answered: bool,
    generation: u64,
}

impl Quiz {
    /// Starts a session over a freshly shuffled copy of `activities`.
    pub fn new(activities: &[Activity]) -> Result<Self, QuizError> {
        if activities.is_empty() {
            return Err(QuizError::EmptyContent);
        }
        Ok(Self {
            order: shuffle(activities),
            position: 0,
            score: 0,
            phase: Phase::Active,
            answered: false,
            generation: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.order.len()
    }

    pub fn answered(&self) -> bool {
        self.answered
    }

    /// Session generation, bumped on every reset. Scheduled work tagged with
    /// an older generation belongs to a dead session and must be discarded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_item(&self) -> Result<&Activity, QuizError> {
        if self.phase != Phase::Active {
            return Err(QuizError::NoActiveItem);
        }
        self.order.get(self.position).ok_or(QuizError::NoActiveItem)
    }

    /// Evaluates `selected` against the current item by exact match and
    /// increments the score by exactly 1 on a correct answer.
    pub fn submit_answer(&mut self, selected: Quadrant) -> Result<Evaluation, QuizError> {
        if self.answered {
            return Err(QuizError::AlreadyAnswered);
        }
        let correct_quadrant = self.current_item()?.quadrant;
        self.answered = true;
        let is_correct = selected == correct_quadrant;
        if is_correct {
            self.score += 1;
        }
        Ok(Evaluation {
            is_correct,
            correct_quadrant,
        })
    }

    /// Moves the cursor to the next item, entering `Complete` when the order
    /// is exhausted. Calling this on a completed session just reports the
    /// summary again.
    pub fn advance(&mut self) -> Advance<'_> {
        if self.phase == Phase::Complete {
            return Advance::Complete(self.summary());
        }
        self.position += 1;
        self.answered = false;
        if self.position >= self.order.len() {
            self.phase = Phase::Complete;
            Advance::Complete(self.summary())
        } else {
            Advance::Next(&self.order[self.position])
        }
    }

    /// Final score and rounded accuracy. `total` is never zero: construction
    /// rejects empty activity sets.
    pub fn summary(&self) -> Summary {
        let total = self.order.len();
        let accuracy_pct = ((self.score as f64 / total as f64) * 100.0).round() as u32;
        Summary {
            score: self.score,
            total,
            accuracy_pct,
        }
    }

    /// Reshuffles the full set, zeroes score and position, bumps the
    /// generation, and re-enters `Active`.
    pub fn reset(&mut self) {
        self.order = shuffle(&self.order);
        self.position = 0;
        self.score = 0;
        self.answered = false;
        self.phase = Phase::Active;
        self.generation += 1;
    }
}
