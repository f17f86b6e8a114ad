mod common;

use common::*;
use database::services::catalog::CatalogService;
use models::{form::WorksheetFilter, outcome::EvaluationStatus, term::Term};

#[tokio::test]
async fn test_listings_are_ordered() {
    let db = setup().await;
    instructor(&db, "I2", "Barbara Liskov").await;
    instructor(&db, "I1", "Ada Lovelace").await;
    for (year, term) in [(2024, "Fall"), (2024, "Spring"), (2023, "Summer")] {
        semester(&db, year, term).await;
    }

    let names: Vec<String> = CatalogService::list_instructors(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, vec!["Ada Lovelace", "Barbara Liskov"]);

    let semesters: Vec<(i32, String)> = CatalogService::list_semesters(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|s| (s.year, s.term))
        .collect();
    assert_eq!(
        semesters,
        vec![
            (2023, "Summer".to_string()),
            (2024, "Spring".to_string()),
            (2024, "Fall".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_degree_course_view_flags() {
    let db = setup().await;
    seed_curriculum(&db).await;

    let view = CatalogService::degree_course_view(&db, "CS", "Bachelors")
        .await
        .unwrap();
    assert_eq!(view.len(), 2);
    assert!(view[0].linked && view[0].is_core);
    assert!(!view[1].linked && !view[1].is_core);

    assign_course(&db, DEGREE, "CS201", false).await.unwrap();
    let core = CatalogService::degree_courses(&db, "CS", "Bachelors", true)
        .await
        .unwrap();
    assert_eq!(core.len(), 1);
    assert_eq!(core[0].course_no, "CS101");

    let all = CatalogService::degree_courses(&db, "CS", "Bachelors", false)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let objectives = CatalogService::course_objectives(&db, "CS", "Bachelors", "CS101")
        .await
        .unwrap();
    assert_eq!(objectives.len(), 1);
    assert_eq!(objectives[0].title, "Objective O1");
}

#[tokio::test]
async fn test_worksheet_rows() {
    let db = setup().await;
    seed_curriculum(&db).await;
    link_objective(&db, DEGREE, "CS101", "O2").await.unwrap();
    degree(&db, "CS", "Masters").await;
    assign_course(&db, ("CS", "Masters"), "CS101", false)
        .await
        .unwrap();
    link_objective(&db, ("CS", "Masters"), "CS101", "O1")
        .await
        .unwrap();
    section(&db, "CS101", (2024, "Fall"), "001", "I1", 30)
        .await
        .unwrap();

    let key = evaluation_key("CS101", (2024, "Fall"), "001", DEGREE, "O1");
    save_evaluation(&db, &evaluation_form(key, Some("Exam"), [Some(5); 4]))
        .await
        .unwrap();

    let filter = WorksheetFilter {
        degree_name: "CS".to_string(),
        degree_level: "Bachelors".to_string(),
        year: "2024".to_string(),
        term: "Fall".to_string(),
        instructor_id: "I1".to_string(),
    };
    let rows = CatalogService::evaluation_worksheet(&db, &filter)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].objective_code, "O1");
    assert_eq!(rows[0].term, Term::Fall);
    assert_eq!(rows[0].status, EvaluationStatus::Complete);
    assert_eq!(rows[0].other_degrees.len(), 1);
    assert_eq!(rows[0].other_degrees[0].level, "Masters");

    assert_eq!(rows[1].objective_code, "O2");
    assert_eq!(rows[1].status, EvaluationStatus::NoEvaluation);
    assert!(rows[1].measures.is_none());
    assert!(rows[1].other_degrees.is_empty());
}
