use super::{begin_snapshot, report::{DegreeCourseRow, ObjectiveRow, semester_condition}};
use crate::{
    entities::{
        courses, degree_course_objectives, degree_courses, degrees, evaluations, instructors,
        objectives, sections, semesters,
    },
    error::CoreError,
};
use futures::try_join;
use log::debug;
use models::{
    form::{DegreeKey, WorksheetFilter, required},
    outcome::{EvaluationStatus, OutcomeMeasures},
    term::Term,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A course and how it relates to one degree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DegreeCourseViewRow {
    pub course_no: String,
    pub title: String,
    pub linked: bool,
    pub is_core: bool,
}

/// One (section, objective) cell of an instructor's evaluation worksheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WorksheetRow {
    pub course_no: String,
    pub course_title: String,
    pub section_no: String,
    pub year: i32,
    pub term: Term,
    pub enrolled_count: i32,
    pub objective_code: String,
    pub objective_title: String,
    /// `None` until something has been recorded for this cell
    pub measures: Option<OutcomeMeasures>,
    pub status: EvaluationStatus,
    /// Other degrees assessing the same objective for the course
    pub other_degrees: Vec<DegreeKey>,
}

/// Listings used to populate selections in the presentation layer
pub struct CatalogService;

impl CatalogService {
    pub async fn list_degrees(db: &DatabaseConnection) -> Result<Vec<degrees::Model>, DbErr> {
        degrees::Entity::find()
            .order_by_asc(degrees::Column::Name)
            .order_by_asc(degrees::Column::Level)
            .all(db)
            .await
    }

    pub async fn list_courses(db: &DatabaseConnection) -> Result<Vec<courses::Model>, DbErr> {
        courses::Entity::find()
            .order_by_asc(courses::Column::CourseNo)
            .all(db)
            .await
    }

    pub async fn list_instructors(
        db: &DatabaseConnection,
    ) -> Result<Vec<instructors::Model>, DbErr> {
        instructors::Entity::find()
            .order_by_asc(instructors::Column::Name)
            .order_by_asc(instructors::Column::InstructorId)
            .all(db)
            .await
    }

    /// Semesters in calendar order; terms sort by rank, not alphabetically
    pub async fn list_semesters(db: &DatabaseConnection) -> Result<Vec<semesters::Model>, DbErr> {
        let mut found = semesters::Entity::find().all(db).await?;
        found.sort_by_key(|semester| (semester.year, semester.key().map(|key| key.term.rank())));
        Ok(found)
    }

    pub async fn list_objectives(db: &DatabaseConnection) -> Result<Vec<objectives::Model>, DbErr> {
        objectives::Entity::find()
            .order_by_asc(objectives::Column::Code)
            .all(db)
            .await
    }

    /// Every course, flagged with whether the degree owns it and as what
    pub async fn degree_course_view(
        db: &DatabaseConnection,
        degree_name: &str,
        degree_level: &str,
    ) -> Result<Vec<DegreeCourseViewRow>, CoreError> {
        let degree = DegreeKey::parse(degree_name, degree_level)?;
        let txn = begin_snapshot(db).await?;

        let (all_courses, links) = try_join!(
            courses::Entity::find()
                .order_by_asc(courses::Column::CourseNo)
                .all(&txn),
            degree_courses::Entity::find()
                .filter(degree_courses::Column::DegreeName.eq(degree.name.as_str()))
                .filter(degree_courses::Column::DegreeLevel.eq(degree.level.as_str()))
                .all(&txn),
        )?;
        txn.commit().await?;

        let core_flags: HashMap<String, bool> = links
            .into_iter()
            .map(|link| (link.course_no, link.is_core))
            .collect();

        Ok(all_courses
            .into_iter()
            .map(|course| {
                let is_core = core_flags.get(&course.course_no).copied();
                DegreeCourseViewRow {
                    course_no: course.course_no,
                    title: course.title,
                    linked: is_core.is_some(),
                    is_core: is_core.unwrap_or(false),
                }
            })
            .collect())
    }

    /// Courses the degree owns, optionally only the core ones
    pub async fn degree_courses(
        db: &DatabaseConnection,
        degree_name: &str,
        degree_level: &str,
        core_only: bool,
    ) -> Result<Vec<DegreeCourseRow>, CoreError> {
        let degree = DegreeKey::parse(degree_name, degree_level)?;

        let mut query = degree_courses::Entity::find()
            .filter(degree_courses::Column::DegreeName.eq(degree.name.as_str()))
            .filter(degree_courses::Column::DegreeLevel.eq(degree.level.as_str()));
        if core_only {
            query = query.filter(degree_courses::Column::IsCore.eq(true));
        }

        let links = query
            .order_by_asc(degree_courses::Column::CourseNo)
            .find_also_related(courses::Entity)
            .all(db)
            .await?;

        Ok(links
            .into_iter()
            .map(|(link, course)| DegreeCourseRow {
                title: course.map(|c| c.title).unwrap_or_default(),
                course_no: link.course_no,
                is_core: link.is_core,
            })
            .collect())
    }

    /// Objectives a course assesses for one degree
    pub async fn course_objectives(
        db: &DatabaseConnection,
        degree_name: &str,
        degree_level: &str,
        course_no: &str,
    ) -> Result<Vec<ObjectiveRow>, CoreError> {
        let degree = DegreeKey::parse(degree_name, degree_level)?;
        let course_no = required("course_no", course_no)?;

        let links = degree_course_objectives::Entity::find()
            .filter(degree_course_objectives::Column::DegreeName.eq(degree.name.as_str()))
            .filter(degree_course_objectives::Column::DegreeLevel.eq(degree.level.as_str()))
            .filter(degree_course_objectives::Column::CourseNo.eq(course_no.as_str()))
            .order_by_asc(degree_course_objectives::Column::ObjectiveCode)
            .find_also_related(objectives::Entity)
            .all(db)
            .await?;

        Ok(links
            .into_iter()
            .map(|(link, objective)| ObjectiveRow {
                title: objective.map(|o| o.title).unwrap_or_default(),
                code: link.objective_code,
            })
            .collect())
    }

    /// One row per (section, objective) an instructor owes for a degree in a
    /// semester, with whatever has been recorded so far
    pub async fn evaluation_worksheet(
        db: &DatabaseConnection,
        filter: &WorksheetFilter,
    ) -> Result<Vec<WorksheetRow>, CoreError> {
        let query = filter.parse()?;
        let degree = &query.degree;
        let txn = begin_snapshot(db).await?;

        let (taught, objective_links, recorded) = try_join!(
            sections::Entity::find()
                .filter(semester_condition(
                    query.semester,
                    sections::Column::Year,
                    sections::Column::Term,
                ))
                .filter(sections::Column::InstructorId.eq(query.instructor_id.as_str()))
                .find_also_related(courses::Entity)
                .all(&txn),
            degree_course_objectives::Entity::find()
                .filter(degree_course_objectives::Column::DegreeName.eq(degree.name.as_str()))
                .filter(degree_course_objectives::Column::DegreeLevel.eq(degree.level.as_str()))
                .find_also_related(objectives::Entity)
                .all(&txn),
            evaluations::Entity::find()
                .filter(semester_condition(
                    query.semester,
                    evaluations::Column::Year,
                    evaluations::Column::Term,
                ))
                .filter(evaluations::Column::DegreeName.eq(degree.name.as_str()))
                .filter(evaluations::Column::DegreeLevel.eq(degree.level.as_str()))
                .all(&txn),
        )?;

        let course_nos: HashSet<String> = taught
            .iter()
            .map(|(section, _)| section.course_no.clone())
            .collect();

        // Copy targets: the same (course, objective) pair owned by other degrees
        let mut other_degrees: HashMap<(String, String), Vec<DegreeKey>> = HashMap::new();
        if !course_nos.is_empty() {
            let shared = degree_course_objectives::Entity::find()
                .filter(degree_course_objectives::Column::CourseNo.is_in(course_nos))
                .all(&txn)
                .await?;

            for link in shared {
                let owner = DegreeKey {
                    name: link.degree_name,
                    level: link.degree_level,
                };
                if &owner == degree {
                    continue;
                }
                other_degrees
                    .entry((link.course_no, link.objective_code))
                    .or_default()
                    .push(owner);
            }
        }
        txn.commit().await?;

        let mut objectives_by_course: HashMap<String, Vec<(String, String)>> = HashMap::new();
        for (link, objective) in objective_links {
            objectives_by_course
                .entry(link.course_no)
                .or_default()
                .push((
                    link.objective_code,
                    objective.map(|o| o.title).unwrap_or_default(),
                ));
        }

        let recorded: HashMap<(String, String, String), OutcomeMeasures> = recorded
            .into_iter()
            .map(|evaluation| {
                let measures = evaluation.measures();
                (
                    (
                        evaluation.course_no,
                        evaluation.section_no,
                        evaluation.objective_code,
                    ),
                    measures,
                )
            })
            .collect();

        let mut rows = Vec::new();
        for (section, course) in taught {
            let Some(owed) = objectives_by_course.get(&section.course_no) else {
                continue;
            };
            let course_title = course.map(|c| c.title).unwrap_or_default();

            for (objective_code, objective_title) in owed {
                let measures = recorded
                    .get(&(
                        section.course_no.clone(),
                        section.section_no.clone(),
                        objective_code.clone(),
                    ))
                    .cloned();

                let mut others = other_degrees
                    .get(&(section.course_no.clone(), objective_code.clone()))
                    .cloned()
                    .unwrap_or_default();
                others.sort();

                rows.push(WorksheetRow {
                    course_no: section.course_no.clone(),
                    course_title: course_title.clone(),
                    section_no: section.section_no.clone(),
                    year: query.semester.year,
                    term: query.semester.term,
                    enrolled_count: section.enrolled_count,
                    objective_code: objective_code.clone(),
                    objective_title: objective_title.clone(),
                    status: EvaluationStatus::of_row(measures.as_ref()),
                    measures,
                    other_degrees: others,
                });
            }
        }

        rows.sort_by(|a, b| {
            (&a.course_no, &a.section_no, &a.objective_code).cmp(&(
                &b.course_no,
                &b.section_no,
                &b.objective_code,
            ))
        });

        debug!(
            "Worksheet for {} in {}: {} rows",
            query.instructor_id,
            query.semester,
            rows.len()
        );
        Ok(rows)
    }
}
