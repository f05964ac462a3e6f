use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::difficulty::Difficulty;
use crate::model::ids::QuizId;
use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz topic cannot be empty")]
    EmptyTopic,

    #[error("a quiz needs at least one question")]
    NoQuestions,

    #[error("score {score} exceeds question count {questions}")]
    ScoreOutOfRange { score: u32, questions: u32 },

    #[error("quiz has already been scored")]
    AlreadyScored,
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// An ordered run of questions on one topic.
///
/// Questions are immutable after generation; the only mutation is stamping
/// the final score exactly once when the run completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    id: QuizId,
    topic: String,
    difficulty: Difficulty,
    questions: Vec<Question>,
    generated_at: DateTime<Utc>,
    score: Option<u32>,
}

impl Quiz {
    /// Creates a new, unscored quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyTopic` for a blank topic and
    /// `QuizError::NoQuestions` for an empty question list.
    pub fn new(
        id: QuizId,
        topic: impl Into<String>,
        difficulty: Difficulty,
        questions: Vec<Question>,
        generated_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        let topic = topic.into().trim().to_owned();
        if topic.is_empty() {
            return Err(QuizError::EmptyTopic);
        }
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        Ok(Self {
            id,
            topic,
            difficulty,
            questions,
            generated_at,
            score: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuizId {
        &self.id
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// The final score, present only after completion.
    #[must_use]
    pub fn score(&self) -> Option<u32> {
        self.score
    }

    /// Stamp the final score. Callable once, and only with a score that the
    /// question count can account for.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyScored` on a second call and
    /// `QuizError::ScoreOutOfRange` if `score` exceeds the question count.
    pub fn complete(&mut self, score: u32) -> Result<(), QuizError> {
        if self.score.is_some() {
            return Err(QuizError::AlreadyScored);
        }
        if score > self.question_count() {
            return Err(QuizError::ScoreOutOfRange {
                score,
                questions: self.question_count(),
            });
        }
        self.score = Some(score);
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
