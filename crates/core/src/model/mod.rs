mod course;
mod difficulty;
mod ids;
mod progress;
mod question;
mod quiz;
mod reward;

pub use course::{Course, CourseError, Lesson, LessonDraft, Module, ModuleDraft};
pub use difficulty::Difficulty;
pub use ids::{CourseId, ModuleId, QuestionId, QuizId};
pub use progress::{DEFAULT_PLAYER_NAME, ProgressError, UserProgress};
pub use question::{OPTION_COUNT, Question, QuestionDraft, QuestionError};
pub use quiz::{Quiz, QuizError};
pub use reward::{COURSE_COMPLETION_XP, QUIZ_BASE_XP, QUIZ_XP_PER_CORRECT, quiz_xp};
