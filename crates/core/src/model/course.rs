use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::difficulty::Difficulty;
use crate::model::ids::{CourseId, ModuleId, QuestionId};
use crate::model::question::{Question, QuestionDraft, QuestionError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course topic cannot be empty")]
    EmptyTopic,

    #[error("a course needs at least one module")]
    NoModules,

    #[error("module title cannot be empty")]
    EmptyTitle,

    #[error("module lesson text cannot be empty")]
    EmptyLesson,

    #[error("invalid gating question: {0}")]
    InvalidGatingQuestion(#[from] QuestionError),
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// Lesson body for one module: markup text plus an optional primary snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    text: String,
    code_snippet: Option<String>,
}

impl Lesson {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn code_snippet(&self) -> Option<&str> {
        self.code_snippet.as_deref()
    }
}

/// Unvalidated lesson shape as the content provider returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDraft {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub code_snippet: Option<String>,
}

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

/// Unvalidated module shape as the content provider returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: LessonDraft,
    #[serde(default)]
    pub quiz: Option<QuestionDraft>,
}

impl ModuleDraft {
    /// Validate the draft and assign it an identifier.
    ///
    /// The gating question, when present, is validated with the same rules
    /// as any other question and gets a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` for a blank title or lesson, or when the gating
    /// question fails validation.
    pub fn validate(self, id: ModuleId) -> Result<Module, CourseError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(CourseError::EmptyTitle);
        }

        let text = self.content.text.trim().to_owned();
        if text.is_empty() {
            return Err(CourseError::EmptyLesson);
        }
        let code_snippet = self
            .content
            .code_snippet
            .map(|snippet| snippet.trim_end().to_owned())
            .filter(|snippet| !snippet.trim().is_empty());

        let quiz = self
            .quiz
            .map(|draft| draft.validate(QuestionId::new()))
            .transpose()?;

        Ok(Module {
            id,
            title,
            content: Lesson { text, code_snippet },
            quiz,
        })
    }
}

/// One course module: a lesson plus an optional gating question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    id: ModuleId,
    title: String,
    content: Lesson,
    quiz: Option<Question>,
}

impl Module {
    #[must_use]
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &Lesson {
        &self.content
    }

    /// The gating question shown after the lesson, when the provider sent one.
    #[must_use]
    pub fn quiz(&self) -> Option<&Question> {
        self.quiz.as_ref()
    }
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// An ordered run of modules on one topic.
///
/// Module traversal is recorded in order; the completion flag flips once at
/// the end of the run and never back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    id: CourseId,
    topic: String,
    difficulty: Difficulty,
    modules: Vec<Module>,
    generated_at: DateTime<Utc>,
    completed_modules: Vec<ModuleId>,
    is_completed: bool,
}

impl Course {
    /// Creates a new course with no traversal recorded.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyTopic` for a blank topic and
    /// `CourseError::NoModules` for an empty module list.
    pub fn new(
        id: CourseId,
        topic: impl Into<String>,
        difficulty: Difficulty,
        modules: Vec<Module>,
        generated_at: DateTime<Utc>,
    ) -> Result<Self, CourseError> {
        let topic = topic.into().trim().to_owned();
        if topic.is_empty() {
            return Err(CourseError::EmptyTopic);
        }
        if modules.is_empty() {
            return Err(CourseError::NoModules);
        }

        Ok(Self {
            id,
            topic,
            difficulty,
            modules,
            generated_at,
            completed_modules: Vec::new(),
            is_completed: false,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
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
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    #[must_use]
    pub fn completed_modules(&self) -> &[ModuleId] {
        &self.completed_modules
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Record a module as traversed. Unknown or already-recorded ids are
    /// ignored so callers can stay total.
    pub fn mark_module_completed(&mut self, module_id: &ModuleId) {
        let known = self.modules.iter().any(|module| module.id() == module_id);
        if known && !self.completed_modules.contains(module_id) {
            self.completed_modules.push(module_id.clone());
        }
    }

    /// Flip the completion flag. Idempotent.
    pub fn complete(&mut self) {
        self.is_completed = true;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
