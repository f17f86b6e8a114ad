//! Flat field sets as they arrive from the presentation layer, and the typed
//! inputs they validate into.
//!
//! Parsing never touches storage: it only trims, checks presence and converts
//! numbers and terms.

use crate::{
    error::ValidationError,
    outcome::OutcomeMeasures,
    semester::{SemesterKey, SemesterRange},
    term::Term,
};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Trims a natural-key field, rejecting it when nothing is left
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::missing(field))
    } else {
        Ok(value.to_string())
    }
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_integer(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_non_negative(field: &'static str, value: &str) -> Result<i32, ValidationError> {
    let parsed = parse_integer(field, &required(field, value)?)?;
    if parsed < 0 {
        return Err(ValidationError::Negative {
            field,
            value: parsed,
        });
    }
    i32::try_from(parsed).map_err(|_| ValidationError::OutOfRange {
        field,
        reason: format!("{parsed} does not fit in a 32-bit count"),
    })
}

fn parse_count(field: &'static str, value: Option<&str>) -> Result<Option<i32>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_non_negative(field, value).map(Some),
    }
}

fn parse_year(field: &'static str, value: &str) -> Result<i32, ValidationError> {
    let year = parse_non_negative(field, value)?;
    if year == 0 {
        return Err(ValidationError::missing(field));
    }
    Ok(year)
}

fn parse_term(field: &'static str, value: &str) -> Result<Term, ValidationError> {
    let value = required(field, value)?;
    Term::from_str(&value).map_err(|_| ValidationError::InvalidTerm { field, value })
}

fn parse_semester(
    year_field: &'static str,
    year: &str,
    term_field: &'static str,
    term: &str,
) -> Result<SemesterKey, ValidationError> {
    Ok(SemesterKey::new(
        parse_year(year_field, year)?,
        parse_term(term_field, term)?,
    ))
}

/// Natural key of a degree program
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DegreeKey {
    pub name: String,
    pub level: String,
}

impl DegreeKey {
    pub fn parse(name: &str, level: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("degree_name", name)?,
            level: required("degree_level", level)?,
        })
    }
}

impl Display for DegreeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.name, self.level)
    }
}

/// Natural key of a section: one offering of a course in a semester
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SectionKey {
    pub course_no: String,
    pub semester: SemesterKey,
    pub section_no: String,
}

impl Display for SectionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} section {} ({})",
            self.course_no, self.section_no, self.semester
        )
    }
}

/// Natural key of an evaluation row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EvaluationKey {
    pub section: SectionKey,
    pub degree: DegreeKey,
    pub objective_code: String,
}

// Reference data

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct DegreeForm {
    pub name: String,
    pub level: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeInput {
    pub key: DegreeKey,
    pub description: Option<String>,
}

impl DegreeForm {
    pub fn parse(&self) -> Result<DegreeInput, ValidationError> {
        Ok(DegreeInput {
            key: DegreeKey {
                name: required("name", &self.name)?,
                level: required("level", &self.level)?,
            },
            description: optional_text(self.description.as_deref()),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct CourseForm {
    pub course_no: String,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseInput {
    pub course_no: String,
    pub title: String,
    pub description: Option<String>,
}

impl CourseForm {
    pub fn parse(&self) -> Result<CourseInput, ValidationError> {
        Ok(CourseInput {
            course_no: required("course_no", &self.course_no)?,
            title: required("title", &self.title)?,
            description: optional_text(self.description.as_deref()),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct InstructorForm {
    pub instructor_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorInput {
    pub instructor_id: String,
    pub name: String,
}

impl InstructorForm {
    pub fn parse(&self) -> Result<InstructorInput, ValidationError> {
        Ok(InstructorInput {
            instructor_id: required("instructor_id", &self.instructor_id)?,
            name: required("name", &self.name)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct SemesterForm {
    pub year: String,
    pub term: String,
}

impl SemesterForm {
    pub fn parse(&self) -> Result<SemesterKey, ValidationError> {
        parse_semester("year", &self.year, "term", &self.term)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct ObjectiveForm {
    pub code: String,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveInput {
    pub code: String,
    pub title: String,
    pub description: Option<String>,
}

impl ObjectiveForm {
    pub fn parse(&self) -> Result<ObjectiveInput, ValidationError> {
        Ok(ObjectiveInput {
            code: required("code", &self.code)?,
            title: required("title", &self.title)?,
            description: optional_text(self.description.as_deref()),
        })
    }
}

// Curriculum links

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct DegreeCourseForm {
    pub degree_name: String,
    pub degree_level: String,
    pub course_no: String,
    pub is_core: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeCourseInput {
    pub degree: DegreeKey,
    pub course_no: String,
    pub is_core: bool,
}

impl DegreeCourseForm {
    pub fn parse(&self) -> Result<DegreeCourseInput, ValidationError> {
        Ok(DegreeCourseInput {
            degree: DegreeKey::parse(&self.degree_name, &self.degree_level)?,
            course_no: required("course_no", &self.course_no)?,
            is_core: self.is_core,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct ObjectiveLinkForm {
    pub degree_name: String,
    pub degree_level: String,
    pub course_no: String,
    pub objective_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveLinkInput {
    pub degree: DegreeKey,
    pub course_no: String,
    pub objective_code: String,
}

impl ObjectiveLinkForm {
    pub fn parse(&self) -> Result<ObjectiveLinkInput, ValidationError> {
        Ok(ObjectiveLinkInput {
            degree: DegreeKey::parse(&self.degree_name, &self.degree_level)?,
            course_no: required("course_no", &self.course_no)?,
            objective_code: required("objective_code", &self.objective_code)?,
        })
    }
}

// Sections and evaluations

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct SectionForm {
    pub course_no: String,
    pub year: String,
    pub term: String,
    pub section_no: String,
    pub instructor_id: String,
    pub enrolled_count: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInput {
    pub key: SectionKey,
    pub instructor_id: String,
    pub enrolled_count: i32,
}

impl SectionForm {
    pub fn parse(&self) -> Result<SectionInput, ValidationError> {
        Ok(SectionInput {
            key: SectionKey {
                course_no: required("course_no", &self.course_no)?,
                semester: parse_semester("year", &self.year, "term", &self.term)?,
                section_no: required("section_no", &self.section_no)?,
            },
            instructor_id: required("instructor_id", &self.instructor_id)?,
            enrolled_count: parse_non_negative("enrolled_count", &self.enrolled_count)?,
        })
    }
}

/// Identifies an existing evaluation row by its seven key fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct EvaluationKeyForm {
    pub course_no: String,
    pub year: String,
    pub term: String,
    pub section_no: String,
    pub degree_name: String,
    pub degree_level: String,
    pub objective_code: String,
}

impl EvaluationKeyForm {
    pub fn parse(&self) -> Result<EvaluationKey, ValidationError> {
        Ok(EvaluationKey {
            section: SectionKey {
                course_no: required("course_no", &self.course_no)?,
                semester: parse_semester("year", &self.year, "term", &self.term)?,
                section_no: required("section_no", &self.section_no)?,
            },
            degree: DegreeKey::parse(&self.degree_name, &self.degree_level)?,
            objective_code: required("objective_code", &self.objective_code)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct EvaluationForm {
    #[serde(flatten)]
    pub key: EvaluationKeyForm,
    pub method_label: Option<String>,
    pub a_count: Option<String>,
    pub b_count: Option<String>,
    pub c_count: Option<String>,
    pub f_count: Option<String>,
    pub improvement_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationInput {
    pub key: EvaluationKey,
    pub measures: OutcomeMeasures,
}

impl EvaluationForm {
    pub fn parse(&self) -> Result<EvaluationInput, ValidationError> {
        Ok(EvaluationInput {
            key: self.key.parse()?,
            measures: OutcomeMeasures {
                method_label: optional_text(self.method_label.as_deref()),
                a_count: parse_count("a_count", self.a_count.as_deref())?,
                b_count: parse_count("b_count", self.b_count.as_deref())?,
                c_count: parse_count("c_count", self.c_count.as_deref())?,
                f_count: parse_count("f_count", self.f_count.as_deref())?,
                improvement_text: optional_text(self.improvement_text.as_deref()),
            },
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct CopyEvaluationForm {
    #[serde(flatten)]
    pub source: EvaluationKeyForm,
    pub target_degree_name: String,
    pub target_degree_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyEvaluationInput {
    pub source: EvaluationKey,
    pub target: DegreeKey,
}

impl CopyEvaluationForm {
    pub fn parse(&self) -> Result<CopyEvaluationInput, ValidationError> {
        let source = self.source.parse()?;
        let target = DegreeKey {
            name: required("target_degree_name", &self.target_degree_name)?,
            level: required("target_degree_level", &self.target_degree_level)?,
        };

        if target == source.degree {
            return Err(ValidationError::OutOfRange {
                field: "target_degree",
                reason: "destination degree must differ from the source degree".to_string(),
            });
        }

        Ok(CopyEvaluationInput { source, target })
    }
}

// Report filters

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct DegreeSnapshotFilter {
    pub degree_name: String,
    pub degree_level: String,
    /// First semester to include, e.g. `2023-Fall`
    pub start: Option<String>,
    /// Last semester to include, e.g. `2024-Spring`
    pub end: Option<String>,
    pub objectives: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeSnapshotQuery {
    pub degree: DegreeKey,
    pub range: SemesterRange,
    pub objectives: Vec<String>,
}

impl DegreeSnapshotFilter {
    pub fn parse(&self) -> Result<DegreeSnapshotQuery, ValidationError> {
        let mut objectives: Vec<String> = self
            .objectives
            .iter()
            .filter_map(|code| optional_text(Some(code)))
            .collect();
        objectives.sort();
        objectives.dedup();

        Ok(DegreeSnapshotQuery {
            degree: DegreeKey::parse(&self.degree_name, &self.degree_level)?,
            range: SemesterRange::from_labels(self.start.as_deref(), self.end.as_deref()),
            objectives,
        })
    }
}

/// Section history of one course or one instructor
#[derive(Debug, Clone, Default)]
pub struct SectionHistoryFilter {
    /// Course number or instructor id, depending on the report
    pub subject: String,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl SectionHistoryFilter {
    pub fn parse(&self, field: &'static str) -> Result<(String, SemesterRange), ValidationError> {
        Ok((
            required(field, &self.subject)?,
            SemesterRange::from_labels(self.start.as_deref(), self.end.as_deref()),
        ))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(default)]
pub struct SemesterFilter {
    pub year: String,
    pub term: String,
}

impl SemesterFilter {
    pub fn parse(&self) -> Result<SemesterKey, ValidationError> {
        parse_semester("year", &self.year, "term", &self.term)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(default)]
pub struct NonFFilter {
    pub year: String,
    pub term: String,
    /// Minimum non-F share between 0 and 1; empty means 0
    pub threshold: String,
}

impl NonFFilter {
    pub fn parse(&self) -> Result<(SemesterKey, f64), ValidationError> {
        let semester = parse_semester("year", &self.year, "term", &self.term)?;

        let raw = self.threshold.trim();
        let threshold = if raw.is_empty() {
            0.0
        } else {
            raw.parse::<f64>()
                .map_err(|_| ValidationError::InvalidNumber {
                    field: "threshold",
                    value: raw.to_string(),
                })?
        };

        if !(0.0..=1.0).contains(&threshold) {
            return Err(ValidationError::OutOfRange {
                field: "threshold",
                reason: format!("{threshold} is not between 0 and 1"),
            });
        }

        Ok((semester, threshold))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(default)]
pub struct WorksheetFilter {
    pub degree_name: String,
    pub degree_level: String,
    pub year: String,
    pub term: String,
    pub instructor_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetQuery {
    pub degree: DegreeKey,
    pub semester: SemesterKey,
    pub instructor_id: String,
}

impl WorksheetFilter {
    pub fn parse(&self) -> Result<WorksheetQuery, ValidationError> {
        Ok(WorksheetQuery {
            degree: DegreeKey::parse(&self.degree_name, &self.degree_level)?,
            semester: parse_semester("year", &self.year, "term", &self.term)?,
            instructor_id: required("instructor_id", &self.instructor_id)?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn evaluation_key_form() -> EvaluationKeyForm {
        EvaluationKeyForm {
            course_no: "CS101".to_string(),
            year: "2024".to_string(),
            term: "Fall".to_string(),
            section_no: "001".to_string(),
            degree_name: "CS".to_string(),
            degree_level: "Bachelors".to_string(),
            objective_code: "O1".to_string(),
        }
    }

    #[test]
    fn test_keys_are_trimmed() {
        let form = DegreeForm {
            name: "  CS ".to_string(),
            level: "Bachelors".to_string(),
            description: Some("   ".to_string()),
        };
        let input = form.parse().unwrap();
        assert_eq!(input.key.name, "CS");
        assert_eq!(input.description, None);
    }

    #[test]
    fn test_blank_key_is_missing() {
        let form = CourseForm {
            course_no: "   ".to_string(),
            title: "Intro".to_string(),
            description: None,
        };
        assert_eq!(
            form.parse(),
            Err(ValidationError::MissingField { field: "course_no" })
        );
    }

    #[test]
    fn test_section_numbers() {
        let mut form = SectionForm {
            course_no: "CS101".to_string(),
            year: "2024".to_string(),
            term: "fall".to_string(),
            section_no: "001".to_string(),
            instructor_id: "I1".to_string(),
            enrolled_count: "30".to_string(),
        };
        let input = form.parse().unwrap();
        assert_eq!(input.enrolled_count, 30);
        assert_eq!(input.key.semester, SemesterKey::new(2024, Term::Fall));

        form.enrolled_count = "-1".to_string();
        assert!(matches!(
            form.parse(),
            Err(ValidationError::Negative { field: "enrolled_count", .. })
        ));

        form.enrolled_count = "thirty".to_string();
        assert!(matches!(
            form.parse(),
            Err(ValidationError::InvalidNumber { .. })
        ));

        form.enrolled_count = "30".to_string();
        form.term = "Winter".to_string();
        assert!(matches!(
            form.parse(),
            Err(ValidationError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn test_evaluation_counts_are_optional() {
        let form = EvaluationForm {
            key: evaluation_key_form(),
            method_label: Some("Project".to_string()),
            a_count: Some("10".to_string()),
            b_count: Some("".to_string()),
            c_count: None,
            f_count: Some(" 2 ".to_string()),
            improvement_text: None,
        };
        let input = form.parse().unwrap();
        assert_eq!(input.measures.a_count, Some(10));
        assert_eq!(input.measures.b_count, None);
        assert_eq!(input.measures.c_count, None);
        assert_eq!(input.measures.f_count, Some(2));
        assert_eq!(input.key.objective_code, "O1");
    }

    #[test]
    fn test_evaluation_form_flattens_key_fields() {
        let form: EvaluationForm = serde_json::from_str(
            r#"{"course_no":"CS101","year":"2024","term":"Fall","section_no":"001",
                "degree_name":"CS","degree_level":"Bachelors","objective_code":"O1",
                "a_count":"3"}"#,
        )
        .unwrap();
        let input = form.parse().unwrap();
        assert_eq!(input.key.section.course_no, "CS101");
        assert_eq!(input.measures.a_count, Some(3));
    }

    #[test]
    fn test_copy_requires_different_degree() {
        let form = CopyEvaluationForm {
            source: evaluation_key_form(),
            target_degree_name: "CS".to_string(),
            target_degree_level: "Bachelors".to_string(),
        };
        assert!(matches!(
            form.parse(),
            Err(ValidationError::OutOfRange { field: "target_degree", .. })
        ));

        let form = CopyEvaluationForm {
            target_degree_level: "Masters".to_string(),
            ..form
        };
        assert_eq!(form.parse().unwrap().target.level, "Masters");
    }

    #[test]
    fn test_threshold_bounds() {
        let mut filter = NonFFilter {
            year: "2024".to_string(),
            term: "Spring".to_string(),
            threshold: "0.75".to_string(),
        };
        assert_eq!(filter.parse().unwrap().1, 0.75);

        filter.threshold = String::new();
        assert_eq!(filter.parse().unwrap().1, 0.0);

        filter.threshold = "1.5".to_string();
        assert!(filter.parse().is_err());

        filter.threshold = "lots".to_string();
        assert!(filter.parse().is_err());
    }

    #[test]
    fn test_snapshot_objectives_are_normalized() {
        let filter = DegreeSnapshotFilter {
            degree_name: "CS".to_string(),
            degree_level: "Bachelors".to_string(),
            start: Some("2023-Fall".to_string()),
            end: None,
            objectives: vec!["O2".to_string(), " ".to_string(), "O1".to_string(), "O2".to_string()],
        };
        let query = filter.parse().unwrap();
        assert_eq!(query.objectives, vec!["O1", "O2"]);
        assert_eq!(query.range.end, SemesterRange::OPEN_END);
    }

    #[cfg(feature = "openapi")]
    #[test]
    fn test_evaluation_schemas_include_key_fields() {
        use utoipa::PartialSchema;

        for schema in [EvaluationForm::schema(), CopyEvaluationForm::schema()] {
            let json = serde_json::to_string(&schema).unwrap();
            assert!(json.contains("EvaluationKeyForm") || json.contains("course_no"));
        }

        let key = serde_json::to_value(EvaluationKeyForm::schema()).unwrap();
        assert!(key["properties"]["objective_code"].is_object());
    }
}
