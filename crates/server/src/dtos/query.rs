use models::form::{DegreeSnapshotFilter, SectionHistoryFilter, SemesterForm};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DegreeKeyQuery {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseKeyQuery {
    pub course_no: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InstructorKeyQuery {
    pub instructor_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ObjectiveKeyQuery {
    pub code: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SemesterKeyQuery {
    pub year: String,
    pub term: String,
}

impl From<SemesterKeyQuery> for SemesterForm {
    fn from(query: SemesterKeyQuery) -> Self {
        Self {
            year: query.year,
            term: query.term,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct CoreOnlyQuery {
    /// Only list core courses
    pub core_only: bool,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct DegreeSnapshotQuery {
    pub degree_name: String,
    pub degree_level: String,
    /// First semester to include, e.g. `2023-Fall`
    pub start: Option<String>,
    /// Last semester to include, e.g. `2024-Spring`
    pub end: Option<String>,
    /// Comma-separated objective codes
    pub objectives: Option<String>,
}

impl From<DegreeSnapshotQuery> for DegreeSnapshotFilter {
    fn from(query: DegreeSnapshotQuery) -> Self {
        Self {
            degree_name: query.degree_name,
            degree_level: query.degree_level,
            start: query.start,
            end: query.end,
            objectives: query
                .objectives
                .map(|codes| codes.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct CourseSectionsQuery {
    pub course_no: String,
    /// First semester to include, e.g. `2023-Fall`
    pub start: Option<String>,
    /// Last semester to include, e.g. `2024-Spring`
    pub end: Option<String>,
}

impl From<CourseSectionsQuery> for SectionHistoryFilter {
    fn from(query: CourseSectionsQuery) -> Self {
        Self {
            subject: query.course_no,
            start: query.start,
            end: query.end,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct InstructorSectionsQuery {
    pub instructor_id: String,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl From<InstructorSectionsQuery> for SectionHistoryFilter {
    fn from(query: InstructorSectionsQuery) -> Self {
        Self {
            subject: query.instructor_id,
            start: query.start,
            end: query.end,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_history_queries_fill_subject() {
        let course = SectionHistoryFilter::from(CourseSectionsQuery {
            course_no: "CS101".to_string(),
            start: Some("2023-Fall".to_string()),
            end: None,
        });
        assert_eq!(course.subject, "CS101");
        assert_eq!(course.start.as_deref(), Some("2023-Fall"));

        let instructor = SectionHistoryFilter::from(InstructorSectionsQuery {
            instructor_id: "I1".to_string(),
            ..Default::default()
        });
        assert_eq!(instructor.subject, "I1");
        assert_eq!(instructor.end, None);
    }

    #[test]
    fn test_snapshot_objectives_split_on_commas() {
        let filter = DegreeSnapshotFilter::from(DegreeSnapshotQuery {
            degree_name: "CS".to_string(),
            degree_level: "Bachelors".to_string(),
            objectives: Some("O1,O2".to_string()),
            ..Default::default()
        });
        assert_eq!(filter.objectives, vec!["O1", "O2"]);
    }
}
