//! Existence checks and sibling counts run inside a mutation's transaction.
//!
//! Every count excludes the row that is about to be removed or demoted, so a
//! zero means the write would break the rule.

use crate::{
    entities::{courses, degree_course_objectives, degree_courses, degrees, instructors, objectives, semesters},
    error::{CoreError, Invariant},
};
use log::warn;
use models::{form::DegreeKey, semester::SemesterKey};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

/// Logs and builds the error for a rejected write
pub fn reject(invariant: Invariant, detail: impl Into<String>) -> CoreError {
    let error = CoreError::violation(invariant, detail);
    warn!("Rejected mutation: {error}");
    error
}

pub async fn require_degree<C: ConnectionTrait>(conn: &C, degree: &DegreeKey) -> Result<(), CoreError> {
    degrees::Entity::find_by_id((degree.name.clone(), degree.level.clone()))
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or_else(|| CoreError::not_found("Degree", degree))
}

pub async fn require_course<C: ConnectionTrait>(conn: &C, course_no: &str) -> Result<(), CoreError> {
    courses::Entity::find_by_id(course_no.to_string())
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or_else(|| CoreError::not_found("Course", course_no))
}

pub async fn require_instructor<C: ConnectionTrait>(
    conn: &C,
    instructor_id: &str,
) -> Result<(), CoreError> {
    instructors::Entity::find_by_id(instructor_id.to_string())
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or_else(|| CoreError::not_found("Instructor", instructor_id))
}

pub async fn require_semester<C: ConnectionTrait>(
    conn: &C,
    semester: SemesterKey,
) -> Result<(), CoreError> {
    semesters::Entity::find_by_id((semester.year, semester.term.to_string()))
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or_else(|| CoreError::not_found("Semester", semester))
}

pub async fn require_objective<C: ConnectionTrait>(conn: &C, code: &str) -> Result<(), CoreError> {
    objectives::Entity::find_by_id(code.to_string())
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or_else(|| CoreError::not_found("Objective", code))
}

pub async fn find_degree_course<C: ConnectionTrait>(
    conn: &C,
    degree: &DegreeKey,
    course_no: &str,
) -> Result<Option<degree_courses::Model>, DbErr> {
    degree_courses::Entity::find_by_id((
        degree.name.clone(),
        degree.level.clone(),
        course_no.to_string(),
    ))
    .one(conn)
    .await
}

pub async fn find_objective_link<C: ConnectionTrait>(
    conn: &C,
    degree: &DegreeKey,
    course_no: &str,
    objective_code: &str,
) -> Result<Option<degree_course_objectives::Model>, DbErr> {
    degree_course_objectives::Entity::find_by_id((
        degree.name.clone(),
        degree.level.clone(),
        course_no.to_string(),
        objective_code.to_string(),
    ))
    .one(conn)
    .await
}

/// Core courses of the degree other than `course_no`
pub async fn other_core_courses<C: ConnectionTrait>(
    conn: &C,
    degree: &DegreeKey,
    course_no: &str,
) -> Result<u64, DbErr> {
    degree_courses::Entity::find()
        .filter(degree_courses::Column::DegreeName.eq(degree.name.as_str()))
        .filter(degree_courses::Column::DegreeLevel.eq(degree.level.as_str()))
        .filter(degree_courses::Column::IsCore.eq(true))
        .filter(degree_courses::Column::CourseNo.ne(course_no))
        .count(conn)
        .await
}

/// Objective links of one (degree, course), optionally leaving one objective out
pub async fn course_objective_count<C: ConnectionTrait>(
    conn: &C,
    degree: &DegreeKey,
    course_no: &str,
    excluding: Option<&str>,
) -> Result<u64, DbErr> {
    let mut query = degree_course_objectives::Entity::find()
        .filter(degree_course_objectives::Column::DegreeName.eq(degree.name.as_str()))
        .filter(degree_course_objectives::Column::DegreeLevel.eq(degree.level.as_str()))
        .filter(degree_course_objectives::Column::CourseNo.eq(course_no));

    if let Some(objective_code) = excluding {
        query = query.filter(degree_course_objectives::Column::ObjectiveCode.ne(objective_code));
    }

    query.count(conn).await
}

/// Courses of the degree other than `course_no` that still carry the objective
pub async fn other_courses_for_objective<C: ConnectionTrait>(
    conn: &C,
    degree: &DegreeKey,
    objective_code: &str,
    course_no: &str,
) -> Result<u64, DbErr> {
    degree_course_objectives::Entity::find()
        .filter(degree_course_objectives::Column::DegreeName.eq(degree.name.as_str()))
        .filter(degree_course_objectives::Column::DegreeLevel.eq(degree.level.as_str()))
        .filter(degree_course_objectives::Column::ObjectiveCode.eq(objective_code))
        .filter(degree_course_objectives::Column::CourseNo.ne(course_no))
        .count(conn)
        .await
}
