//! Read-only reports. Each report that needs more than one query reads from a
//! single repeatable-read transaction so the parts agree with each other.

use super::begin_snapshot;
use crate::{
    entities::{
        courses, degree_course_objectives, degree_courses, evaluations, instructors, objectives,
        sections,
    },
    error::CoreError,
};
use futures::try_join;
use log::debug;
use models::{
    form::{DegreeKey, DegreeSnapshotFilter, NonFFilter, SectionHistoryFilter, SemesterFilter},
    outcome::{CompletenessTally, EvaluationStatus, GradeTally},
    semester::{SemesterKey, SemesterRange},
    term::Term,
};
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A course owned by a degree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DegreeCourseRow {
    pub course_no: String,
    pub title: String,
    pub is_core: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ObjectiveRow {
    pub code: String,
    pub title: String,
}

/// A (course, objective) pairing within one degree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ObjectiveCoursePair {
    pub course_no: String,
    pub objective_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SectionRow {
    pub course_no: String,
    pub course_title: String,
    pub year: i32,
    pub term: Term,
    pub section_no: String,
    pub instructor_id: String,
    pub instructor_name: String,
    pub enrolled_count: i32,
}

impl SectionRow {
    pub fn semester(&self) -> SemesterKey {
        SemesterKey::new(self.year, self.term)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DegreeSnapshot {
    pub degree: DegreeKey,
    pub range: SemesterRange,
    pub courses: Vec<DegreeCourseRow>,
    pub objectives: Vec<ObjectiveRow>,
    pub sections: Vec<SectionRow>,
    /// Only filled when specific objectives were requested
    pub objective_courses: Vec<ObjectiveCoursePair>,
}

/// Evaluation progress of one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SectionStatusRow {
    pub course_no: String,
    pub section_no: String,
    pub course_title: String,
    pub status: EvaluationStatus,
    pub has_improvement: bool,
    #[serde(flatten)]
    pub rows: CompletenessTally,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NonFRow {
    pub course_no: String,
    pub section_no: String,
    pub course_title: String,
    pub non_f: i64,
    pub total: i64,
    pub non_f_rate: f64,
    pub enrolled_count: i32,
}

pub struct ReportService;

impl ReportService {
    /// Courses, objectives and sections of a degree, with sections limited to
    /// the requested semester range
    pub async fn degree_snapshot(
        db: &DatabaseConnection,
        filter: &DegreeSnapshotFilter,
    ) -> Result<DegreeSnapshot, CoreError> {
        let query = filter.parse()?;
        let degree = &query.degree;
        let txn = begin_snapshot(db).await?;

        let (links, objective_links) = try_join!(
            degree_courses::Entity::find()
                .filter(degree_courses::Column::DegreeName.eq(degree.name.as_str()))
                .filter(degree_courses::Column::DegreeLevel.eq(degree.level.as_str()))
                .find_also_related(courses::Entity)
                .all(&txn),
            degree_course_objectives::Entity::find()
                .filter(degree_course_objectives::Column::DegreeName.eq(degree.name.as_str()))
                .filter(degree_course_objectives::Column::DegreeLevel.eq(degree.level.as_str()))
                .find_also_related(objectives::Entity)
                .all(&txn),
        )?;

        let mut courses: Vec<DegreeCourseRow> = links
            .into_iter()
            .map(|(link, course)| DegreeCourseRow {
                title: course.map(|c| c.title).unwrap_or_default(),
                course_no: link.course_no,
                is_core: link.is_core,
            })
            .collect();
        courses.sort_by(|a, b| a.course_no.cmp(&b.course_no));

        let mut objective_titles: HashMap<String, String> = HashMap::new();
        let mut objective_courses = Vec::new();
        for (link, objective) in &objective_links {
            objective_titles
                .entry(link.objective_code.clone())
                .or_insert_with(|| objective.as_ref().map(|o| o.title.clone()).unwrap_or_default());

            if query.objectives.contains(&link.objective_code) {
                objective_courses.push(ObjectiveCoursePair {
                    course_no: link.course_no.clone(),
                    objective_code: link.objective_code.clone(),
                });
            }
        }
        objective_courses.sort_by(|a, b| {
            (&a.course_no, &a.objective_code).cmp(&(&b.course_no, &b.objective_code))
        });

        let mut objectives: Vec<ObjectiveRow> = objective_titles
            .into_iter()
            .map(|(code, title)| ObjectiveRow { code, title })
            .collect();
        objectives.sort_by(|a, b| a.code.cmp(&b.code));

        let course_nos: Vec<String> = courses.iter().map(|c| c.course_no.clone()).collect();
        let sections = if course_nos.is_empty() {
            Vec::new()
        } else {
            load_section_rows(
                &txn,
                Condition::all().add(sections::Column::CourseNo.is_in(course_nos)),
                query.range,
            )
            .await?
        };

        txn.commit().await?;
        debug!(
            "Degree snapshot for {degree}: {} courses, {} objectives, {} sections",
            courses.len(),
            objectives.len(),
            sections.len()
        );

        Ok(DegreeSnapshot {
            degree: query.degree.clone(),
            range: query.range,
            courses,
            objectives,
            sections,
            objective_courses,
        })
    }

    /// Every section of one course within a semester range
    pub async fn course_sections(
        db: &DatabaseConnection,
        filter: &SectionHistoryFilter,
    ) -> Result<Vec<SectionRow>, CoreError> {
        let (course_no, range) = filter.parse("course_no")?;
        let txn = begin_snapshot(db).await?;

        let rows = load_section_rows(
            &txn,
            Condition::all().add(sections::Column::CourseNo.eq(course_no.as_str())),
            range,
        )
        .await?;

        txn.commit().await?;
        debug!("Course {course_no}: {} sections", rows.len());
        Ok(rows)
    }

    /// Every section one instructor taught within a semester range
    pub async fn instructor_sections(
        db: &DatabaseConnection,
        filter: &SectionHistoryFilter,
    ) -> Result<Vec<SectionRow>, CoreError> {
        let (instructor_id, range) = filter.parse("instructor_id")?;
        let txn = begin_snapshot(db).await?;

        let rows = load_section_rows(
            &txn,
            Condition::all().add(sections::Column::InstructorId.eq(instructor_id.as_str())),
            range,
        )
        .await?;

        txn.commit().await?;
        debug!("Instructor {instructor_id}: {} sections", rows.len());
        Ok(rows)
    }

    /// Completeness of the evaluations recorded for every section of a semester
    pub async fn evaluation_status(
        db: &DatabaseConnection,
        filter: &SemesterFilter,
    ) -> Result<Vec<SectionStatusRow>, CoreError> {
        let semester = filter.parse()?;
        let txn = begin_snapshot(db).await?;

        let (found, recorded) = try_join!(
            sections::Entity::find()
                .filter(semester_condition(semester, sections::Column::Year, sections::Column::Term))
                .find_also_related(courses::Entity)
                .all(&txn),
            evaluations::Entity::find()
                .filter(semester_condition(
                    semester,
                    evaluations::Column::Year,
                    evaluations::Column::Term,
                ))
                .all(&txn),
        )?;
        txn.commit().await?;

        let mut tallies: HashMap<(String, String), CompletenessTally> = HashMap::new();
        for evaluation in &recorded {
            tallies
                .entry((evaluation.course_no.clone(), evaluation.section_no.clone()))
                .or_default()
                .add(&evaluation.measures());
        }

        let mut rows: Vec<SectionStatusRow> = found
            .into_iter()
            .map(|(section, course)| {
                let tally = tallies
                    .get(&(section.course_no.clone(), section.section_no.clone()))
                    .copied()
                    .unwrap_or_default();

                SectionStatusRow {
                    course_title: course.map(|c| c.title).unwrap_or_default(),
                    course_no: section.course_no,
                    section_no: section.section_no,
                    status: tally.status(),
                    has_improvement: tally.has_improvement(),
                    rows: tally,
                }
            })
            .collect();
        rows.sort_by(|a, b| (&a.course_no, &a.section_no).cmp(&(&b.course_no, &b.section_no)));

        debug!("Evaluation status for {semester}: {} sections", rows.len());
        Ok(rows)
    }

    /// Sections of a semester whose share of non-F grades reaches `threshold`
    pub async fn non_f_sections(
        db: &DatabaseConnection,
        filter: &NonFFilter,
    ) -> Result<Vec<NonFRow>, CoreError> {
        let (semester, threshold) = filter.parse()?;
        let txn = begin_snapshot(db).await?;

        let (found, recorded) = try_join!(
            sections::Entity::find()
                .filter(semester_condition(semester, sections::Column::Year, sections::Column::Term))
                .find_also_related(courses::Entity)
                .all(&txn),
            evaluations::Entity::find()
                .filter(semester_condition(
                    semester,
                    evaluations::Column::Year,
                    evaluations::Column::Term,
                ))
                .all(&txn),
        )?;
        txn.commit().await?;

        let mut tallies: HashMap<(String, String), GradeTally> = HashMap::new();
        for evaluation in &recorded {
            tallies
                .entry((evaluation.course_no.clone(), evaluation.section_no.clone()))
                .or_default()
                .add(&evaluation.measures());
        }

        let mut rows: Vec<NonFRow> = found
            .into_iter()
            .filter_map(|(section, course)| {
                let tally = tallies.get(&(section.course_no.clone(), section.section_no.clone()))?;
                if !tally.passes(threshold, section.enrolled_count) {
                    return None;
                }

                Some(NonFRow {
                    course_title: course.map(|c| c.title).unwrap_or_default(),
                    course_no: section.course_no,
                    section_no: section.section_no,
                    non_f: tally.non_f,
                    total: tally.total,
                    non_f_rate: tally.non_f_rate().unwrap_or_default(),
                    enrolled_count: section.enrolled_count,
                })
            })
            .collect();
        rows.sort_by(|a, b| (&a.course_no, &a.section_no).cmp(&(&b.course_no, &b.section_no)));

        debug!(
            "Non-F report for {semester} at {threshold}: {} sections",
            rows.len()
        );
        Ok(rows)
    }
}

pub(super) fn semester_condition<C: ColumnTrait>(
    semester: SemesterKey,
    year: C,
    term: C,
) -> Condition {
    Condition::all()
        .add(year.eq(semester.year))
        .add(term.eq(semester.term.as_str()))
}

/// Sections matching `condition` whose semester lies in `range`, ordered by
/// semester, course and section number
async fn load_section_rows<C: ConnectionTrait>(
    conn: &C,
    condition: Condition,
    range: SemesterRange,
) -> Result<Vec<SectionRow>, DbErr> {
    let found = sections::Entity::find()
        .filter(condition)
        .find_also_related(courses::Entity)
        .all(conn)
        .await?;

    let instructor_ids: HashSet<String> = found
        .iter()
        .map(|(section, _)| section.instructor_id.clone())
        .collect();

    let instructor_names: HashMap<String, String> = if instructor_ids.is_empty() {
        HashMap::new()
    } else {
        instructors::Entity::find()
            .filter(instructors::Column::InstructorId.is_in(instructor_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|instructor| (instructor.instructor_id, instructor.name))
            .collect()
    };

    let mut rows: Vec<SectionRow> = found
        .into_iter()
        .filter_map(|(section, course)| {
            let semester = section.semester()?;
            if !range.contains(semester) {
                return None;
            }

            Some(SectionRow {
                course_title: course.map(|c| c.title).unwrap_or_default(),
                instructor_name: instructor_names
                    .get(&section.instructor_id)
                    .cloned()
                    .unwrap_or_default(),
                course_no: section.course_no,
                year: semester.year,
                term: semester.term,
                section_no: section.section_no,
                instructor_id: section.instructor_id,
                enrolled_count: section.enrolled_count,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        (a.semester(), &a.course_no, &a.section_no).cmp(&(b.semester(), &b.course_no, &b.section_no))
    });
    Ok(rows)
}
