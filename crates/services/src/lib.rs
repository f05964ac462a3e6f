#![forbid(unsafe_code)]

pub mod content;
pub mod error;
pub mod sessions;

pub use burrow_core::Clock;

pub use error::{ActivityError, GenerationError, SessionError};

pub use content::{
    AiContentService, ContentProvider, GeneratorConfig, COURSE_MODULE_COUNT, QUIZ_QUESTION_COUNT,
    SUGGESTED_TOPICS,
};

pub use sessions::{
    ActivityOutcome, ActivityService, Advance, AnswerCheck, CourseProgress, CourseSession,
    ModuleAdvance, QuizProgress, QuizSession,
};
