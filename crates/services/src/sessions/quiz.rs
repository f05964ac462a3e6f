use std::fmt;

use burrow_core::model::{Question, Quiz};

use crate::error::SessionError;
use super::progress::QuizProgress;

//
// ─── TRANSITION RESULTS ────────────────────────────────────────────────────────
//

/// What `check_answer` reveals about the current question.
///
/// The explanation is the same string whether the answer was right or wrong;
/// `was_correct` only exists so presentation can pick an accent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerCheck {
    pub was_correct: bool,
    pub correct_index: usize,
    pub explanation: String,
}

/// Outcome of an `advance` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the next question.
    Next,
    /// That was the last question; the run is over.
    Finished { score: u32 },
    /// The request was illegal in the current phase and changed nothing.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Presenting { selected: Option<usize> },
    Checked { was_correct: bool },
    Finished,
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// Steps through a quiz one question at a time: select, check, advance.
///
/// The same machine runs a 5-question standalone quiz and a single-question
/// course-module gate. Illegal transitions are no-ops by contract, so the
/// caller never has to guard its event plumbing.
pub struct QuizSession {
    quiz: Quiz,
    current: usize,
    phase: Phase,
    score: u32,
}

impl QuizSession {
    #[must_use]
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            current: 0,
            phase: Phase::Presenting { selected: None },
            score: 0,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// The question currently on screen; `None` once the run is finished.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if matches!(self.phase, Phase::Finished) {
            None
        } else {
            self.quiz.questions().get(self.current)
        }
    }

    /// The selected option while presenting, if any.
    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        match self.phase {
            Phase::Presenting { selected } => selected,
            _ => None,
        }
    }

    /// Whether the checked answer was correct; `None` outside `Checked`.
    #[must_use]
    pub fn was_correct(&self) -> Option<bool> {
        match self.phase {
            Phase::Checked { was_correct } => Some(was_correct),
            _ => None,
        }
    }

    /// Running score: correct answers so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.quiz.questions().len();
        let answered = match self.phase {
            Phase::Presenting { .. } => self.current,
            Phase::Checked { .. } => self.current + 1,
            Phase::Finished => total,
        };
        QuizProgress {
            total,
            answered,
            remaining: total - answered,
            is_finished: self.is_finished(),
        }
    }

    /// Record an option choice. Legal only while presenting and for an index
    /// within the option list; anything else is ignored. Returns whether the
    /// choice was recorded.
    pub fn select_option(&mut self, option_index: usize) -> bool {
        let within_options = self
            .current_question()
            .is_some_and(|question| option_index < question.options().len());
        match &mut self.phase {
            Phase::Presenting { selected } if within_options => {
                *selected = Some(option_index);
                true
            }
            _ => false,
        }
    }

    /// Grade the selected option against the current question.
    ///
    /// Legal only while presenting with a selection; returns `None` otherwise
    /// and the state is unchanged.
    pub fn check_answer(&mut self) -> Option<AnswerCheck> {
        let Phase::Presenting {
            selected: Some(selected),
        } = self.phase
        else {
            return None;
        };
        let question = self.quiz.questions().get(self.current)?;

        let was_correct = question.is_correct(selected);
        if was_correct {
            self.score += 1;
        }
        let check = AnswerCheck {
            was_correct,
            correct_index: question.correct_answer_index(),
            explanation: question.explanation().to_owned(),
        };
        self.phase = Phase::Checked { was_correct };
        Some(check)
    }

    /// Move past a checked answer: next question, or finish after the last.
    pub fn advance(&mut self) -> Advance {
        if !matches!(self.phase, Phase::Checked { .. }) {
            return Advance::Ignored;
        }

        if self.current + 1 >= self.quiz.questions().len() {
            self.phase = Phase::Finished;
            Advance::Finished { score: self.score }
        } else {
            self.current += 1;
            self.phase = Phase::Presenting { selected: None };
            Advance::Next
        }
    }

    /// Consume a finished run, stamping the final score onto the quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` before the last advance, or the
    /// underlying quiz error if the score cannot be applied.
    pub fn into_completed(self) -> Result<Quiz, SessionError> {
        if !self.is_finished() {
            return Err(SessionError::NotFinished);
        }
        let mut quiz = self.quiz;
        quiz.complete(self.score)?;
        Ok(quiz)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("quiz_id", &self.quiz.id())
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
