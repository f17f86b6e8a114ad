mod common;

use common::*;
use database::{
    CoreError, Invariant,
    entities::{evaluations, sections},
    services::evaluation::EvaluationService,
};
use models::form::CopyEvaluationForm;
use sea_orm::{EntityTrait, PaginatorTrait};

async fn seeded_section(enrolled: i32) -> sea_orm::DatabaseConnection {
    let db = setup().await;
    seed_curriculum(&db).await;
    section(&db, "CS101", (2024, "Fall"), "001", "I1", enrolled)
        .await
        .unwrap();
    db
}

fn key() -> models::form::EvaluationKeyForm {
    evaluation_key("CS101", (2024, "Fall"), "001", DEGREE, "O1")
}

#[tokio::test]
async fn test_counts_cannot_exceed_enrollment() {
    let db = seeded_section(30).await;

    let err = save_evaluation(
        &db,
        &evaluation_form(key(), Some("Exam"), [Some(10), Some(10), Some(10), Some(1)]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::ConstraintConflict(_)));
    assert_eq!(err.reason(), "constraint_conflict");
    assert_eq!(evaluations::Entity::find().count(&db).await.unwrap(), 0);

    save_evaluation(
        &db,
        &evaluation_form(key(), Some("Exam"), [Some(10), Some(10), Some(10), Some(0)]),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_partial_counts_are_bounded_too() {
    let db = seeded_section(10).await;

    let err = save_evaluation(&db, &evaluation_form(key(), None, [Some(11), None, None, None]))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ConstraintConflict(_)));

    // nothing supplied, nothing to bound
    save_evaluation(&db, &evaluation_form(key(), Some("Essay"), [None; 4]))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_resaving_updates_in_place() {
    let db = seeded_section(30).await;

    save_evaluation(&db, &evaluation_form(key(), Some("Exam"), [Some(1), None, None, None]))
        .await
        .unwrap();
    save_evaluation(
        &db,
        &evaluation_form(key(), Some("Project"), [Some(5), Some(5), Some(5), Some(5)]),
    )
    .await
    .unwrap();

    let stored = evaluations::Entity::find().all(&db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].method_label.as_deref(), Some("Project"));
    assert_eq!(stored[0].f_count, Some(5));
}

#[tokio::test]
async fn test_evaluation_requires_objective_link() {
    let db = seeded_section(30).await;

    let key = evaluation_key("CS101", (2024, "Fall"), "001", DEGREE, "O2");
    let err = save_evaluation(&db, &evaluation_form(key, Some("Exam"), [None; 4]))
        .await
        .unwrap_err();
    assert_eq!(err.invariant(), Some(Invariant::EvaluationRequiresObjectiveLink));
}

#[tokio::test]
async fn test_evaluation_requires_section() {
    let db = seeded_section(30).await;

    let key = evaluation_key("CS101", (2024, "Fall"), "002", DEGREE, "O1");
    let err = save_evaluation(&db, &evaluation_form(key, Some("Exam"), [None; 4]))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "Section", .. }));
}

#[tokio::test]
async fn test_section_requires_reference_rows() {
    let db = setup().await;
    seed_curriculum(&db).await;

    let err = section(&db, "CS101", (2025, "Spring"), "001", "I1", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "Semester", .. }));

    let err = section(&db, "CS101", (2024, "Fall"), "001", "I9", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "Instructor", .. }));

    let err = section(&db, "CS101", (2024, "Fall"), "001", "I1", -3)
        .await
        .unwrap_err();
    assert_eq!(err.reason(), "validation_error");
}

#[tokio::test]
async fn test_resaving_section_updates_enrollment() {
    let db = seeded_section(30).await;
    instructor(&db, "I2", "Grace Hopper").await;

    section(&db, "CS101", (2024, "Fall"), "001", "I2", 35)
        .await
        .unwrap();

    let stored = sections::Entity::find().all(&db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].instructor_id, "I2");
    assert_eq!(stored[0].enrolled_count, 35);
}

#[tokio::test]
async fn test_copy_to_degree_sharing_the_objective() {
    let db = seeded_section(30).await;
    degree(&db, "CS", "Masters").await;
    assign_course(&db, ("CS", "Masters"), "CS101", false)
        .await
        .unwrap();

    let mut form = evaluation_form(key(), Some("Exam"), [Some(8), Some(7), Some(6), Some(2)]);
    form.improvement_text = Some("More labs".to_string());
    save_evaluation(&db, &form).await.unwrap();

    let copy = CopyEvaluationForm {
        source: key(),
        target_degree_name: "CS".to_string(),
        target_degree_level: "Masters".to_string(),
    };

    // the masters degree does not assess O1 for CS101 yet
    let err = EvaluationService::copy_evaluation(&db, &copy)
        .await
        .unwrap_err();
    assert_eq!(err.invariant(), Some(Invariant::EvaluationRequiresObjectiveLink));

    link_objective(&db, ("CS", "Masters"), "CS101", "O1")
        .await
        .unwrap();
    EvaluationService::copy_evaluation(&db, &copy).await.unwrap();

    let copied = evaluations::Entity::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .find(|row| row.degree_level == "Masters")
        .unwrap();
    assert_eq!(copied.measures(), form.parse().unwrap().measures);
}

#[tokio::test]
async fn test_copy_requires_source_evaluation() {
    let db = seeded_section(30).await;

    let copy = CopyEvaluationForm {
        source: key(),
        target_degree_name: "CS".to_string(),
        target_degree_level: "Masters".to_string(),
    };
    let err = EvaluationService::copy_evaluation(&db, &copy)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "Evaluation", .. }));
}

#[tokio::test]
async fn test_copy_rechecks_current_enrollment() {
    let db = seeded_section(30).await;
    degree(&db, "CS", "Masters").await;
    assign_course(&db, ("CS", "Masters"), "CS101", false)
        .await
        .unwrap();
    link_objective(&db, ("CS", "Masters"), "CS101", "O1")
        .await
        .unwrap();

    save_evaluation(
        &db,
        &evaluation_form(key(), Some("Exam"), [Some(5), Some(5), Some(5), Some(5)]),
    )
    .await
    .unwrap();

    // the roster shrank after the source row was recorded
    section(&db, "CS101", (2024, "Fall"), "001", "I1", 15)
        .await
        .unwrap();

    let copy = CopyEvaluationForm {
        source: key(),
        target_degree_name: "CS".to_string(),
        target_degree_level: "Masters".to_string(),
    };
    let err = EvaluationService::copy_evaluation(&db, &copy)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ConstraintConflict(_)));

    let masters_rows = evaluations::Entity::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .filter(|row| row.degree_level == "Masters")
        .count();
    assert_eq!(masters_rows, 0);
    assert_eq!(evaluations::Entity::find().count(&db).await.unwrap(), 1);
}
