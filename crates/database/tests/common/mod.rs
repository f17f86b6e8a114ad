#![allow(dead_code)]

use database::{
    MutationResult,
    services::{
        curriculum::CurriculumService, evaluation::EvaluationService, reference::ReferenceService,
        section::SectionService,
    },
};
use migration::{Migrator, MigratorTrait};
use models::form::{
    CourseForm, DegreeCourseForm, DegreeForm, EvaluationForm, EvaluationKeyForm, InstructorForm,
    ObjectiveForm, ObjectiveLinkForm, SectionForm, SemesterForm,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub const DEGREE: (&str, &str) = ("CS", "Bachelors");

/// Fresh in-memory database with the full schema
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // a second pooled connection would see a different in-memory database
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    db
}

pub async fn degree(db: &DatabaseConnection, name: &str, level: &str) {
    ReferenceService::save_degree(
        db,
        &DegreeForm {
            name: name.to_string(),
            level: level.to_string(),
            description: None,
        },
    )
    .await
    .expect("failed to save degree");
}

pub async fn course(db: &DatabaseConnection, course_no: &str) {
    ReferenceService::save_course(
        db,
        &CourseForm {
            course_no: course_no.to_string(),
            title: format!("Course {course_no}"),
            description: None,
        },
    )
    .await
    .expect("failed to save course");
}

pub async fn instructor(db: &DatabaseConnection, instructor_id: &str, name: &str) {
    ReferenceService::save_instructor(
        db,
        &InstructorForm {
            instructor_id: instructor_id.to_string(),
            name: name.to_string(),
        },
    )
    .await
    .expect("failed to save instructor");
}

pub async fn semester(db: &DatabaseConnection, year: i32, term: &str) {
    ReferenceService::save_semester(
        db,
        &SemesterForm {
            year: year.to_string(),
            term: term.to_string(),
        },
    )
    .await
    .expect("failed to save semester");
}

pub async fn objective(db: &DatabaseConnection, code: &str) {
    ReferenceService::save_objective(
        db,
        &ObjectiveForm {
            code: code.to_string(),
            title: format!("Objective {code}"),
            description: None,
        },
    )
    .await
    .expect("failed to save objective");
}

pub fn degree_course_form(degree: (&str, &str), course_no: &str, is_core: bool) -> DegreeCourseForm {
    DegreeCourseForm {
        degree_name: degree.0.to_string(),
        degree_level: degree.1.to_string(),
        course_no: course_no.to_string(),
        is_core,
    }
}

pub fn objective_link_form(degree: (&str, &str), course_no: &str, code: &str) -> ObjectiveLinkForm {
    ObjectiveLinkForm {
        degree_name: degree.0.to_string(),
        degree_level: degree.1.to_string(),
        course_no: course_no.to_string(),
        objective_code: code.to_string(),
    }
}

pub async fn assign_course(
    db: &DatabaseConnection,
    degree: (&str, &str),
    course_no: &str,
    is_core: bool,
) -> MutationResult {
    CurriculumService::assign_degree_course(db, &degree_course_form(degree, course_no, is_core)).await
}

pub async fn link_objective(
    db: &DatabaseConnection,
    degree: (&str, &str),
    course_no: &str,
    code: &str,
) -> MutationResult {
    CurriculumService::assign_objective_link(db, &objective_link_form(degree, course_no, code)).await
}

pub async fn section(
    db: &DatabaseConnection,
    course_no: &str,
    (year, term): (i32, &str),
    section_no: &str,
    instructor_id: &str,
    enrolled: i32,
) -> MutationResult {
    SectionService::save_section(
        db,
        &SectionForm {
            course_no: course_no.to_string(),
            year: year.to_string(),
            term: term.to_string(),
            section_no: section_no.to_string(),
            instructor_id: instructor_id.to_string(),
            enrolled_count: enrolled.to_string(),
        },
    )
    .await
}

pub fn evaluation_key(
    course_no: &str,
    (year, term): (i32, &str),
    section_no: &str,
    degree: (&str, &str),
    code: &str,
) -> EvaluationKeyForm {
    EvaluationKeyForm {
        course_no: course_no.to_string(),
        year: year.to_string(),
        term: term.to_string(),
        section_no: section_no.to_string(),
        degree_name: degree.0.to_string(),
        degree_level: degree.1.to_string(),
        objective_code: code.to_string(),
    }
}

/// Evaluation form with the counts given as `[a, b, c, f]`; `None` leaves a count blank
pub fn evaluation_form(
    key: EvaluationKeyForm,
    method: Option<&str>,
    counts: [Option<i32>; 4],
) -> EvaluationForm {
    let [a, b, c, f] = counts.map(|count| count.map(|n| n.to_string()));
    EvaluationForm {
        key,
        method_label: method.map(str::to_string),
        a_count: a,
        b_count: b,
        c_count: c,
        f_count: f,
        improvement_text: None,
    }
}

pub async fn save_evaluation(db: &DatabaseConnection, form: &EvaluationForm) -> MutationResult {
    EvaluationService::save_evaluation(db, form).await
}

/// CS (Bachelors) owning CS101 as a core course with objective O1, plus an
/// instructor and the 2024 Fall semester
pub async fn seed_curriculum(db: &DatabaseConnection) {
    degree(db, DEGREE.0, DEGREE.1).await;
    course(db, "CS101").await;
    course(db, "CS201").await;
    objective(db, "O1").await;
    objective(db, "O2").await;
    instructor(db, "I1", "Ada Lovelace").await;
    semester(db, 2024, "Fall").await;

    assign_course(db, DEGREE, "CS101", false)
        .await
        .expect("failed to link CS101");
    link_objective(db, DEGREE, "CS101", "O1")
        .await
        .expect("failed to link O1");
    assign_course(db, DEGREE, "CS101", true)
        .await
        .expect("failed to mark CS101 core");
}
