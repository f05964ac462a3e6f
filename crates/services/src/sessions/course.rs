use std::fmt;

use burrow_core::model::{Course, Module, Quiz, QuizId};

use crate::error::SessionError;
use super::progress::CourseProgress;
use super::quiz::QuizSession;

/// Outcome of opening or closing a module gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleAdvance {
    /// The gating quiz is now running; drive it via `module_quiz_mut`.
    GateOpened,
    /// The module was recorded and the next one is up for reading.
    NextModule,
    /// The module was recorded and it was the last one.
    CourseFinished,
    /// The request was illegal in the current phase and changed nothing.
    Ignored,
}

#[derive(Debug)]
enum Phase {
    Reading,
    ModuleQuiz(QuizSession),
    Finished,
}

//
// ─── COURSE SESSION ────────────────────────────────────────────────────────────
//

/// Steps through a course module by module: read, take the gate, move on.
///
/// The gate reuses [`QuizSession`] over a single-question quiz rather than
/// duplicating its transition logic. Advancement is deliberately lenient: a
/// failed gating question still records the module as traversed, so the gate
/// gives feedback without blocking the run.
pub struct CourseSession {
    course: Course,
    current: usize,
    phase: Phase,
}

impl CourseSession {
    #[must_use]
    pub fn new(course: Course) -> Self {
        Self {
            course,
            current: 0,
            phase: Phase::Reading,
        }
    }

    #[must_use]
    pub fn course(&self) -> &Course {
        &self.course
    }

    /// The module currently being read or gated; `None` once finished.
    #[must_use]
    pub fn current_module(&self) -> Option<&Module> {
        if matches!(self.phase, Phase::Finished) {
            None
        } else {
            self.course.modules().get(self.current)
        }
    }

    /// The running gating quiz, while one is open.
    #[must_use]
    pub fn module_quiz(&self) -> Option<&QuizSession> {
        match &self.phase {
            Phase::ModuleQuiz(session) => Some(session),
            _ => None,
        }
    }

    /// Mutable access to the running gating quiz, while one is open.
    pub fn module_quiz_mut(&mut self) -> Option<&mut QuizSession> {
        match &mut self.phase {
            Phase::ModuleQuiz(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> CourseProgress {
        CourseProgress {
            total_modules: self.course.module_count(),
            completed_modules: self.course.completed_modules().len(),
            is_finished: self.is_finished(),
        }
    }

    /// Open the current module's gate. Legal only while reading.
    ///
    /// A module without a gating question has nothing to run, so it is
    /// recorded as traversed immediately and the session moves on.
    pub fn start_module_quiz(&mut self) -> ModuleAdvance {
        if !matches!(self.phase, Phase::Reading) {
            return ModuleAdvance::Ignored;
        }
        let Some(module) = self.course.modules().get(self.current) else {
            return ModuleAdvance::Ignored;
        };
        let Some(question) = module.quiz().cloned() else {
            return self.record_and_advance();
        };

        let quiz = Quiz::new(
            QuizId::new(),
            self.course.topic(),
            self.course.difficulty(),
            vec![question],
            self.course.generated_at(),
        );
        match quiz {
            Ok(quiz) => {
                self.phase = Phase::ModuleQuiz(QuizSession::new(quiz));
                ModuleAdvance::GateOpened
            }
            // A validated question always yields a buildable quiz; treat the
            // impossible case like a missing gate.
            Err(_) => self.record_and_advance(),
        }
    }

    /// Close a finished gate: record the module and move on, regardless of
    /// the gate score. Legal only once the embedded quiz has finished.
    pub fn finish_module_quiz(&mut self) -> ModuleAdvance {
        let gate_finished =
            matches!(&self.phase, Phase::ModuleQuiz(session) if session.is_finished());
        if gate_finished {
            self.record_and_advance()
        } else {
            ModuleAdvance::Ignored
        }
    }

    /// Leave an open gate and return to the lesson without recording
    /// anything. Returns whether there was a gate to leave.
    pub fn exit_module_quiz(&mut self) -> bool {
        if matches!(self.phase, Phase::ModuleQuiz(_)) {
            self.phase = Phase::Reading;
            true
        } else {
            false
        }
    }

    /// Consume a finished run, marking the course completed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` while modules remain.
    pub fn into_completed(self) -> Result<Course, SessionError> {
        if !self.is_finished() {
            return Err(SessionError::NotFinished);
        }
        let mut course = self.course;
        course.complete();
        Ok(course)
    }

    fn record_and_advance(&mut self) -> ModuleAdvance {
        if let Some(module) = self.course.modules().get(self.current) {
            let id = module.id().clone();
            self.course.mark_module_completed(&id);
        }

        if self.current + 1 >= self.course.module_count() {
            self.phase = Phase::Finished;
            ModuleAdvance::CourseFinished
        } else {
            self.current += 1;
            self.phase = Phase::Reading;
            ModuleAdvance::NextModule
        }
    }
}

impl fmt::Debug for CourseSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CourseSession")
            .field("course_id", &self.course.id())
            .field("current", &self.current)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
