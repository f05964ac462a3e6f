mod course;
mod progress;
mod quiz;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use course::{CourseSession, ModuleAdvance};
pub use progress::{CourseProgress, QuizProgress};
pub use quiz::{Advance, AnswerCheck, QuizSession};
pub use workflow::{ActivityOutcome, ActivityService};
