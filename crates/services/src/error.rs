//! Shared error types for the services crate.

use thiserror::Error;

use burrow_core::model::{CourseError, ProgressError, QuestionError, QuizError};
use storage::repository::StorageError;

/// Errors emitted by content providers.
///
/// Launch paths recover from every variant by serving built-in fallback
/// content, so none of these reach the presentation layer from a launch.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("content generation is not configured")]
    Disabled,

    #[error("content provider returned an empty response")]
    EmptyResponse,

    #[error("content provider request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("content provider reply was not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected {expected} generated items, got {actual}")]
    WrongItemCount { expected: usize, actual: usize },

    #[error(transparent)]
    InvalidQuestion(#[from] QuestionError),

    #[error(transparent)]
    InvalidModule(#[from] CourseError),
}

/// Errors emitted by the quiz and course session machines.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session is not finished")]
    NotFinished,

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Errors emitted by `ActivityService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ActivityError {
    #[error("topic cannot be empty")]
    EmptyTopic,

    #[error("launch superseded by a newer request")]
    Superseded,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error(transparent)]
    Course(#[from] CourseError),

    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
