use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::course::Course;
use crate::model::quiz::Quiz;
use crate::model::reward::{COURSE_COMPLETION_XP, quiz_xp};

/// Display name used when no persisted record exists yet.
pub const DEFAULT_PLAYER_NAME: &str = "Marmot";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("quiz has no final score")]
    UnscoredQuiz,

    #[error("course is not completed")]
    CourseNotCompleted,
}

//
// ─── USER PROGRESS ─────────────────────────────────────────────────────────────
//

/// The single persisted record of a player's history and rewards.
///
/// XP never decreases and the streak counts completed activities, so both
/// only move through [`record_quiz`](Self::record_quiz) and
/// [`record_course`](Self::record_course). Records written before courses
/// existed have no course history; the serde default keeps them loadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    name: String,
    xp: u64,
    streak: u32,
    completed_quizzes: Vec<Quiz>,
    #[serde(default)]
    completed_courses: Vec<Course>,
    last_login: DateTime<Utc>,
}

impl UserProgress {
    /// Fresh record with zero XP and empty histories.
    #[must_use]
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            xp: 0,
            streak: 0,
            completed_quizzes: Vec::new(),
            completed_courses: Vec::new(),
            last_login: now,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn xp(&self) -> u64 {
        self.xp
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn completed_quizzes(&self) -> &[Quiz] {
        &self.completed_quizzes
    }

    #[must_use]
    pub fn completed_courses(&self) -> &[Course] {
        &self.completed_courses
    }

    #[must_use]
    pub fn last_login(&self) -> DateTime<Utc> {
        self.last_login
    }

    /// Refresh the last-login stamp, typically right after loading.
    pub fn touch_login(&mut self, now: DateTime<Utc>) {
        self.last_login = now;
    }

    /// Merge a finished quiz into the record: XP per the reward policy,
    /// streak +1, history append. Returns the XP gained.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnscoredQuiz` if the quiz was never scored.
    pub fn record_quiz(&mut self, quiz: Quiz) -> Result<u64, ProgressError> {
        let score = quiz.score().ok_or(ProgressError::UnscoredQuiz)?;
        let gained = quiz_xp(score);
        self.xp += gained;
        self.streak += 1;
        self.completed_quizzes.push(quiz);
        Ok(gained)
    }

    /// Merge a finished course into the record: flat XP, streak +1, history
    /// append. Returns the XP gained.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::CourseNotCompleted` if the completion flag was
    /// never set.
    pub fn record_course(&mut self, course: Course) -> Result<u64, ProgressError> {
        if !course.is_completed() {
            return Err(ProgressError::CourseNotCompleted);
        }
        self.xp += COURSE_COMPLETION_XP;
        self.streak += 1;
        self.completed_courses.push(course);
        Ok(COURSE_COMPLETION_XP)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CourseId, Difficulty, ModuleDraft, ModuleId, LessonDraft, QuestionDraft, QuestionId,
        QuizId,
    };
    use crate::time::fixed_now;

    fn scored_quiz(score: u32) -> Quiz {
        let questions = (0..5)
            .map(|n| {
                QuestionDraft {
                    text: format!("Q{n}?"),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_answer_index: 0,
                    explanation: "a.".into(),
                    topic: "Rust".into(),
                    ..QuestionDraft::default()
                }
                .validate(QuestionId::new())
                .unwrap()
            })
            .collect();
        let mut quiz = Quiz::new(
            QuizId::new(),
            "Rust",
            Difficulty::Beginner,
            questions,
            fixed_now(),
        )
        .unwrap();
        quiz.complete(score).unwrap();
        quiz
    }

    fn completed_course() -> Course {
        let module = ModuleDraft {
            title: "Intro".into(),
            content: LessonDraft {
                text: "# Hello".into(),
                code_snippet: None,
            },
            quiz: None,
        }
        .validate(ModuleId::new())
        .unwrap();
        let mut course = Course::new(
            CourseId::new(),
            "Rust",
            Difficulty::Beginner,
            vec![module],
            fixed_now(),
        )
        .unwrap();
        course.complete();
        course
    }

    #[test]
    fn record_quiz_applies_reward_policy() {
        let mut progress = UserProgress::new("Tester", fixed_now());
        let gained = progress.record_quiz(scored_quiz(3)).unwrap();
        assert_eq!(gained, 50);
        assert_eq!(progress.xp(), 50);
        assert_eq!(progress.streak(), 1);
        assert_eq!(progress.completed_quizzes().len(), 1);
    }

    #[test]
    fn record_quiz_rejects_unscored_quiz() {
        let mut progress = UserProgress::new("Tester", fixed_now());
        let questions = scored_quiz(0).questions().to_vec();
        let unscored = Quiz::new(
            QuizId::new(),
            "Rust",
            Difficulty::Beginner,
            questions,
            fixed_now(),
        )
        .unwrap();
        let err = progress.record_quiz(unscored).unwrap_err();
        assert_eq!(err, ProgressError::UnscoredQuiz);
        assert_eq!(progress.xp(), 0);
        assert_eq!(progress.streak(), 0);
    }

    #[test]
    fn record_course_pays_flat_reward() {
        let mut progress = UserProgress::new("Tester", fixed_now());
        let gained = progress.record_course(completed_course()).unwrap();
        assert_eq!(gained, 150);
        assert_eq!(progress.xp(), 150);
        assert_eq!(progress.streak(), 1);
        assert_eq!(progress.completed_courses().len(), 1);
    }

    #[test]
    fn record_course_rejects_incomplete_course() {
        let mut progress = UserProgress::new("Tester", fixed_now());
        let mut course = completed_course();
        course = {
            // rebuild without the completion flag
            let modules = course.modules().to_vec();
            Course::new(
                CourseId::new(),
                course.topic(),
                course.difficulty(),
                modules,
                course.generated_at(),
            )
            .unwrap()
        };
        let err = progress.record_course(course).unwrap_err();
        assert_eq!(err, ProgressError::CourseNotCompleted);
    }

    #[test]
    fn interleaved_completions_accumulate() {
        let mut progress = UserProgress::new("Tester", fixed_now());
        let before_streak = progress.streak();
        let mut total = 0;
        total += progress.record_quiz(scored_quiz(5)).unwrap();
        total += progress.record_course(completed_course()).unwrap();
        total += progress.record_quiz(scored_quiz(0)).unwrap();
        assert_eq!(progress.xp(), total);
        assert_eq!(progress.streak(), before_streak + 3);
    }

    #[test]
    fn legacy_record_without_course_history_loads_empty() {
        let json = r#"{
            "name": "Marmot",
            "xp": 120,
            "streak": 4,
            "completedQuizzes": [],
            "lastLogin": "2024-03-01T00:00:00Z"
        }"#;
        let progress: UserProgress = serde_json::from_str(json).unwrap();
        assert_eq!(progress.xp(), 120);
        assert!(progress.completed_courses().is_empty());
    }

    #[test]
    fn serde_round_trip_is_stable() {
        let mut progress = UserProgress::new("Tester", fixed_now());
        progress.record_quiz(scored_quiz(2)).unwrap();
        progress.record_course(completed_course()).unwrap();

        let first = serde_json::to_string(&progress).unwrap();
        let reloaded: UserProgress = serde_json::from_str(&first).unwrap();
        let second = serde_json::to_string(&reloaded).unwrap();
        assert_eq!(first, second);
    }
}
