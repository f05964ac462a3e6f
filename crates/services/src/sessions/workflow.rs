use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use burrow_core::Clock;
use burrow_core::model::{
    Course, CourseId, DEFAULT_PLAYER_NAME, Difficulty, Quiz, QuizId, UserProgress,
};
use storage::repository::ProgressRepository;

use crate::content::{ContentProvider, fallback_module, fallback_question};
use crate::error::{ActivityError, SessionError};
use super::course::CourseSession;
use super::quiz::QuizSession;

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// What the Result view shows after a completed activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityOutcome {
    Quiz {
        score: u32,
        total: u32,
        xp_gained: u64,
    },
    Course {
        xp_gained: u64,
    },
}

impl ActivityOutcome {
    #[must_use]
    pub fn xp_gained(&self) -> u64 {
        match self {
            ActivityOutcome::Quiz { xp_gained, .. } | ActivityOutcome::Course { xp_gained } => {
                *xp_gained
            }
        }
    }
}

//
// ─── ACTIVITY SERVICE ──────────────────────────────────────────────────────────
//

/// Orchestrates activity launch and completion.
///
/// Launching asks the content provider for material and wraps it into a
/// ready session; completion merges the finished activity into the progress
/// record and persists it. Progress is always passed in and handed back
/// explicitly; this service owns no user state.
#[derive(Clone)]
pub struct ActivityService {
    clock: Clock,
    provider: Arc<dyn ContentProvider>,
    store: Arc<dyn ProgressRepository>,
    launch_epoch: Arc<AtomicU64>,
}

impl ActivityService {
    #[must_use]
    pub fn new(
        clock: Clock,
        provider: Arc<dyn ContentProvider>,
        store: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            clock,
            provider,
            store,
            launch_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Load the persisted progress record, or start a fresh one.
    ///
    /// The last-login stamp is refreshed either way; it is written back with
    /// the next completion.
    ///
    /// # Errors
    ///
    /// Returns `ActivityError::Storage` if an existing record cannot be read.
    pub async fn load_progress(&self) -> Result<UserProgress, ActivityError> {
        let now = self.clock.now();
        match self.store.load().await? {
            Some(mut progress) => {
                progress.touch_login(now);
                Ok(progress)
            }
            None => Ok(UserProgress::new(DEFAULT_PLAYER_NAME, now)),
        }
    }

    /// Request a quiz and wrap it into a ready session.
    ///
    /// Generation failure is absorbed here: the session then runs on the
    /// single built-in fallback question instead of surfacing an error.
    ///
    /// # Errors
    ///
    /// Returns `ActivityError::EmptyTopic` for a blank topic, or
    /// `ActivityError::Superseded` when the launch was abandoned while the
    /// provider was still working.
    pub async fn start_quiz(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<QuizSession, ActivityError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ActivityError::EmptyTopic);
        }

        let ticket = self.launch_epoch.load(Ordering::SeqCst);
        let questions = match self.provider.generate_quiz(topic, difficulty).await {
            Ok(questions) => questions,
            Err(err) => {
                tracing::warn!(error = %err, topic, "quiz generation failed, serving fallback question");
                vec![fallback_question()]
            }
        };
        self.ensure_current(ticket)?;

        let quiz = Quiz::new(
            QuizId::new(),
            topic,
            difficulty,
            questions,
            self.clock.now(),
        )?;
        Ok(QuizSession::new(quiz))
    }

    /// Request a course and wrap it into a ready session.
    ///
    /// Same recovery policy as the quiz path: on generation failure the
    /// course runs on the single built-in fallback module.
    ///
    /// # Errors
    ///
    /// Returns `ActivityError::EmptyTopic` for a blank topic, or
    /// `ActivityError::Superseded` when the launch was abandoned while the
    /// provider was still working.
    pub async fn start_course(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<CourseSession, ActivityError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ActivityError::EmptyTopic);
        }

        let ticket = self.launch_epoch.load(Ordering::SeqCst);
        let modules = match self.provider.generate_course(topic, difficulty).await {
            Ok(modules) => modules,
            Err(err) => {
                tracing::warn!(error = %err, topic, "course generation failed, serving fallback module");
                vec![fallback_module()]
            }
        };
        self.ensure_current(ticket)?;

        let course = Course::new(
            CourseId::new(),
            topic,
            difficulty,
            modules,
            self.clock.now(),
        )?;
        Ok(CourseSession::new(course))
    }

    /// Discard any launch still waiting on the provider. A response arriving
    /// after this call produces `ActivityError::Superseded` instead of a
    /// session for a screen the user already left.
    pub fn abandon_pending(&self) {
        self.launch_epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Merge a finished quiz run into the progress record and persist it.
    ///
    /// # Errors
    ///
    /// Returns `ActivityError::Session` if the run is not finished. A failed
    /// persistence write is logged, not returned; the in-memory record stays
    /// authoritative for the rest of the session.
    pub async fn complete_quiz(
        &self,
        session: QuizSession,
        progress: &mut UserProgress,
    ) -> Result<ActivityOutcome, ActivityError> {
        let quiz = session.into_completed()?;
        let score = quiz.score().ok_or(SessionError::NotFinished)?;
        let total = quiz.question_count();
        let xp_gained = progress.record_quiz(quiz)?;

        self.persist(progress).await;
        Ok(ActivityOutcome::Quiz {
            score,
            total,
            xp_gained,
        })
    }

    /// Merge a finished course run into the progress record and persist it.
    ///
    /// # Errors
    ///
    /// Returns `ActivityError::Session` if the run is not finished. A failed
    /// persistence write is logged, not returned.
    pub async fn complete_course(
        &self,
        session: CourseSession,
        progress: &mut UserProgress,
    ) -> Result<ActivityOutcome, ActivityError> {
        let course = session.into_completed()?;
        let xp_gained = progress.record_course(course)?;

        self.persist(progress).await;
        Ok(ActivityOutcome::Course { xp_gained })
    }

    fn ensure_current(&self, ticket: u64) -> Result<(), ActivityError> {
        if self.launch_epoch.load(Ordering::SeqCst) == ticket {
            Ok(())
        } else {
            Err(ActivityError::Superseded)
        }
    }

    async fn persist(&self, progress: &UserProgress) {
        if let Err(err) = self.store.save(progress).await {
            tracing::warn!(error = %err, "failed to persist progress, keeping in-memory record");
        }
    }
}
