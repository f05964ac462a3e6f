use async_trait::async_trait;

use burrow_core::model::{Difficulty, Module, Question};

use crate::error::GenerationError;

mod ai;
mod fallback;

pub use ai::{AiContentService, GeneratorConfig};
pub use fallback::{fallback_module, fallback_question};

/// Questions requested for a standalone quiz.
pub const QUIZ_QUESTION_COUNT: usize = 5;

/// Modules requested for a course, each with one gating question.
pub const COURSE_MODULE_COUNT: usize = 3;

/// Topic candidates offered on the home screen; free text is also accepted.
pub const SUGGESTED_TOPICS: [&str; 6] = [
    "React",
    "JavaScript",
    "TypeScript",
    "CSS",
    "Git",
    "Python",
];

/// Contract for generated learning content.
///
/// Implementations return fully validated domain values; anything malformed
/// must surface as a `GenerationError` instead.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Generate exactly [`QUIZ_QUESTION_COUNT`] questions on the topic.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the provider is unreachable or replies
    /// with malformed content.
    async fn generate_quiz(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<Question>, GenerationError>;

    /// Generate exactly [`COURSE_MODULE_COUNT`] modules on the topic.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the provider is unreachable or replies
    /// with malformed content.
    async fn generate_course(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<Module>, GenerationError>;
}
