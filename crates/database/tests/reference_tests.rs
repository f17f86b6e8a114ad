mod common;

use common::*;
use database::{
    entities::{degree_courses, degrees, sections, semesters},
    services::reference::ReferenceService,
};
use models::form::{DegreeForm, SemesterForm};
use sea_orm::{EntityTrait, PaginatorTrait};

fn degree_form(description: &str) -> DegreeForm {
    DegreeForm {
        name: "CS".to_string(),
        level: "Bachelors".to_string(),
        description: Some(description.to_string()),
    }
}

#[tokio::test]
async fn test_saving_degree_twice_updates_in_place() {
    let db = setup().await;

    ReferenceService::save_degree(&db, &degree_form("X")).await.unwrap();
    ReferenceService::save_degree(&db, &degree_form("X")).await.unwrap();
    assert_eq!(degrees::Entity::find().count(&db).await.unwrap(), 1);

    ReferenceService::save_degree(&db, &degree_form("Y")).await.unwrap();
    let stored = degrees::Entity::find().all(&db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].description.as_deref(), Some("Y"));
}

#[tokio::test]
async fn test_empty_description_is_stored_as_null() {
    let db = setup().await;

    ReferenceService::save_degree(&db, &degree_form("  ")).await.unwrap();
    let stored = degrees::Entity::find().all(&db).await.unwrap();
    assert_eq!(stored[0].description, None);
}

#[tokio::test]
async fn test_resaving_semester_is_a_noop() {
    let db = setup().await;
    let form = SemesterForm {
        year: "2024".to_string(),
        term: "fall".to_string(),
    };

    ReferenceService::save_semester(&db, &form).await.unwrap();
    ReferenceService::save_semester(&db, &form).await.unwrap();

    let stored = semesters::Entity::find().all(&db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].term, "Fall");
}

#[tokio::test]
async fn test_deleting_missing_rows_succeeds() {
    let db = setup().await;

    ReferenceService::delete_degree(&db, "Nope", "Bachelors")
        .await
        .unwrap();
    ReferenceService::delete_course(&db, "CS999").await.unwrap();
    ReferenceService::delete_objective(&db, "O9").await.unwrap();

    let err = ReferenceService::delete_instructor(&db, " ").await.unwrap_err();
    assert_eq!(err.reason(), "validation_error");
}

#[tokio::test]
async fn test_deleting_course_cascades_to_links_and_sections() {
    let db = setup().await;
    seed_curriculum(&db).await;
    section(&db, "CS101", (2024, "Fall"), "001", "I1", 10)
        .await
        .unwrap();

    ReferenceService::delete_course(&db, "CS101").await.unwrap();

    assert_eq!(degree_courses::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(sections::Entity::find().count(&db).await.unwrap(), 0);
}
