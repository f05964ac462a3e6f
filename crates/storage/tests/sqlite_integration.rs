use burrow_core::model::{
    Difficulty, LessonDraft, ModuleDraft, ModuleId, QuestionDraft, QuestionId, Quiz, QuizId,
    UserProgress,
};
use burrow_core::model::{Course, CourseId};
use burrow_core::time::fixed_now;
use storage::repository::ProgressRepository;
use storage::sqlite::SqliteRepository;

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
        title: "Ownership".into(),
        content: LessonDraft {
            text: "# Ownership\nEvery value has one owner.".into(),
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

#[tokio::test]
async fn sqlite_round_trips_progress() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load().await.unwrap().is_none());

    let mut progress = UserProgress::new("Tester", fixed_now());
    progress.record_quiz(scored_quiz(3)).unwrap();
    progress.record_course(completed_course()).unwrap();
    repo.save(&progress).await.unwrap();

    let loaded = repo.load().await.unwrap().expect("record present");
    assert_eq!(loaded, progress);
    assert_eq!(loaded.xp(), 200);
    assert_eq!(loaded.streak(), 2);
}

#[tokio::test]
async fn sqlite_save_overwrites_previous_record() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let mut progress = UserProgress::new("Tester", fixed_now());
    repo.save(&progress).await.unwrap();

    progress.record_quiz(scored_quiz(5)).unwrap();
    repo.save(&progress).await.unwrap();

    let loaded = repo.load().await.unwrap().expect("record present");
    assert_eq!(loaded.xp(), 70);
    assert_eq!(loaded.completed_quizzes().len(), 1);
}

#[tokio::test]
async fn storage_aggregate_wires_the_sqlite_backend() {
    let storage = storage::repository::Storage::sqlite(
        "sqlite:file:memdb_aggregate?mode=memory&cache=shared",
    )
    .await
    .expect("connect and migrate");

    let progress = UserProgress::new("Tester", fixed_now());
    storage.progress.save(&progress).await.unwrap();
    assert_eq!(storage.progress.load().await.unwrap(), Some(progress));
}

#[tokio::test]
async fn sqlite_loads_legacy_record_without_course_history() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_legacy?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    // Shape written by builds that predate course history.
    let legacy = r#"{
        "name": "Marmot",
        "xp": 320,
        "streak": 7,
        "completedQuizzes": [],
        "lastLogin": "2024-03-01T00:00:00Z"
    }"#;
    sqlx::query("INSERT INTO user_progress (id, payload, updated_at) VALUES (1, ?1, ?2)")
        .bind(legacy)
        .bind(fixed_now())
        .execute(repo.pool())
        .await
        .unwrap();

    let loaded = repo.load().await.unwrap().expect("record present");
    assert_eq!(loaded.xp(), 320);
    assert_eq!(loaded.streak(), 7);
    assert!(loaded.completed_courses().is_empty());
}
