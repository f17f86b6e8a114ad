use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Measured outcome of one section against one degree objective.
///
/// Every field is optional; instructors often record the assessment method
/// before the grade distribution is known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OutcomeMeasures {
    pub method_label: Option<String>,
    pub a_count: Option<i32>,
    pub b_count: Option<i32>,
    pub c_count: Option<i32>,
    pub f_count: Option<i32>,
    pub improvement_text: Option<String>,
}

impl OutcomeMeasures {
    fn counts(&self) -> [Option<i32>; 4] {
        [self.a_count, self.b_count, self.c_count, self.f_count]
    }

    /// Sum of the counts that were supplied, or `None` when no count was given
    pub fn supplied_total(&self) -> Option<i64> {
        let supplied: Vec<i64> = self.counts().into_iter().flatten().map(i64::from).collect();
        if supplied.is_empty() {
            None
        } else {
            Some(supplied.iter().sum())
        }
    }

    /// Whether the supplied counts fit in a roster of `enrolled` students
    pub fn fits_enrollment(&self, enrolled: i32) -> bool {
        self.supplied_total()
            .is_none_or(|total| total <= i64::from(enrolled))
    }

    /// All five measure fields are present
    pub fn is_complete(&self) -> bool {
        self.method_label.is_some() && self.counts().iter().all(Option::is_some)
    }

    /// No measure field carries a value
    pub fn is_blank(&self) -> bool {
        let has_method = self
            .method_label
            .as_deref()
            .is_some_and(|label| !label.is_empty());
        !has_method && self.counts().iter().all(Option::is_none)
    }

    pub fn has_improvement(&self) -> bool {
        self.improvement_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// Students with a passing grade (A, B or C); missing counts are zero
    pub fn non_f(&self) -> i64 {
        [self.a_count, self.b_count, self.c_count]
            .into_iter()
            .map(|count| i64::from(count.unwrap_or(0)))
            .sum()
    }

    /// All graded students; missing counts are zero
    pub fn graded(&self) -> i64 {
        self.non_f() + i64::from(self.f_count.unwrap_or(0))
    }
}

/// How far along the evaluation of a section (or a single objective row) is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum EvaluationStatus {
    #[serde(rename = "No Evaluation")]
    #[strum(serialize = "No Evaluation")]
    NoEvaluation,
    Partial,
    Complete,
}

impl EvaluationStatus {
    /// Status of a single objective row, `None` meaning no row was recorded
    pub fn of_row(measures: Option<&OutcomeMeasures>) -> Self {
        match measures {
            None => Self::NoEvaluation,
            Some(m) if m.is_blank() => Self::NoEvaluation,
            Some(m) if m.is_complete() => Self::Complete,
            Some(_) => Self::Partial,
        }
    }
}

/// Running completeness tally over the evaluation rows of one section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CompletenessTally {
    pub total_rows: u32,
    pub complete_rows: u32,
    pub partial_rows: u32,
    pub improved_rows: u32,
}

impl CompletenessTally {
    pub fn add(&mut self, measures: &OutcomeMeasures) {
        self.total_rows += 1;
        if measures.is_complete() {
            self.complete_rows += 1;
        } else {
            self.partial_rows += 1;
        }
        if measures.has_improvement() {
            self.improved_rows += 1;
        }
    }

    pub fn status(&self) -> EvaluationStatus {
        if self.total_rows == 0 {
            EvaluationStatus::NoEvaluation
        } else if self.partial_rows == 0 {
            EvaluationStatus::Complete
        } else {
            EvaluationStatus::Partial
        }
    }

    pub fn has_improvement(&self) -> bool {
        self.improved_rows > 0
    }
}

/// Grade totals across the evaluation rows of one section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GradeTally {
    pub non_f: i64,
    pub total: i64,
}

impl GradeTally {
    pub fn add(&mut self, measures: &OutcomeMeasures) {
        self.non_f += measures.non_f();
        self.total += measures.graded();
    }

    /// Share of graded students who passed, `None` when nobody was graded
    pub fn non_f_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.non_f as f64 / self.total as f64)
    }

    /// Whether the section clears `threshold` without grading more students than enrolled
    pub fn passes(&self, threshold: f64, enrolled: i32) -> bool {
        self.total <= i64::from(enrolled)
            && self.non_f_rate().is_some_and(|rate| rate >= threshold)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn full(a: i32, b: i32, c: i32, f: i32) -> OutcomeMeasures {
        OutcomeMeasures {
            method_label: Some("Final exam".to_string()),
            a_count: Some(a),
            b_count: Some(b),
            c_count: Some(c),
            f_count: Some(f),
            improvement_text: None,
        }
    }

    #[test]
    fn test_supplied_total_ignores_missing_counts() {
        let mut measures = full(10, 10, 10, 1);
        assert_eq!(measures.supplied_total(), Some(31));
        assert!(!measures.fits_enrollment(30));

        measures.f_count = None;
        assert_eq!(measures.supplied_total(), Some(30));
        assert!(measures.fits_enrollment(30));

        assert_eq!(OutcomeMeasures::default().supplied_total(), None);
        assert!(OutcomeMeasures::default().fits_enrollment(0));
    }

    #[test]
    fn test_row_status() {
        assert_eq!(EvaluationStatus::of_row(None), EvaluationStatus::NoEvaluation);
        assert_eq!(
            EvaluationStatus::of_row(Some(&OutcomeMeasures::default())),
            EvaluationStatus::NoEvaluation
        );
        assert_eq!(
            EvaluationStatus::of_row(Some(&full(1, 2, 3, 4))),
            EvaluationStatus::Complete
        );

        let mut partial = full(1, 2, 3, 4);
        partial.method_label = None;
        assert_eq!(
            EvaluationStatus::of_row(Some(&partial)),
            EvaluationStatus::Partial
        );
    }

    #[test]
    fn test_section_rollup_status() {
        let mut tally = CompletenessTally::default();
        assert_eq!(tally.status(), EvaluationStatus::NoEvaluation);

        tally.add(&full(5, 5, 5, 5));
        assert_eq!(tally.status(), EvaluationStatus::Complete);

        let mut missing_f = full(5, 5, 5, 5);
        missing_f.f_count = None;
        missing_f.improvement_text = Some("More practice problems".to_string());
        tally.add(&missing_f);

        assert_eq!(tally.status(), EvaluationStatus::Partial);
        assert_eq!(tally.total_rows, 2);
        assert_eq!(tally.partial_rows, 1);
        assert!(tally.has_improvement());
    }

    #[test]
    fn test_whitespace_improvement_does_not_count() {
        let mut measures = full(1, 1, 1, 1);
        measures.improvement_text = Some("   ".to_string());
        assert!(!measures.has_improvement());
    }

    #[test]
    fn test_grade_tally_threshold() {
        let mut tally = GradeTally::default();
        tally.add(&full(5, 5, 5, 5));

        assert_eq!(tally.non_f, 15);
        assert_eq!(tally.total, 20);
        assert!(tally.passes(0.7, 20));
        assert!(!tally.passes(0.8, 20));
        // more graded students than the roster holds
        assert!(!tally.passes(0.7, 19));
    }

    #[test]
    fn test_grade_tally_without_grades_never_passes() {
        let tally = GradeTally::default();
        assert_eq!(tally.non_f_rate(), None);
        assert!(!tally.passes(0.0, 10));
    }

    #[test]
    fn test_status_serializes_with_spaces() {
        let json = serde_json::to_string(&EvaluationStatus::NoEvaluation).unwrap();
        assert_eq!(json, "\"No Evaluation\"");
        assert_eq!(EvaluationStatus::NoEvaluation.to_string(), "No Evaluation");
    }
}
