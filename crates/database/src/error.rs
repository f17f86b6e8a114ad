use models::ValidationError;
use sea_orm::DbErr;
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// The cardinality and consistency rules guarded by the mutation services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invariant {
    /// A degree with linked courses keeps at least one core course
    CoreCourseMinimum,
    /// A course can only be core once it has an objective for the degree
    CoreRequiresObjective,
    /// A core course keeps at least one objective
    CoreObjectiveMinimum,
    /// An objective used by a degree stays tied to at least one of its courses
    ObjectiveCoverage,
    /// Evaluations only exist for (degree, course, objective) links
    EvaluationRequiresObjectiveLink,
}

impl Invariant {
    pub fn code(&self) -> &'static str {
        match self {
            Self::CoreCourseMinimum => "core_course_minimum",
            Self::CoreRequiresObjective => "core_requires_objective",
            Self::CoreObjectiveMinimum => "core_objective_minimum",
            Self::ObjectiveCoverage => "objective_coverage",
            Self::EvaluationRequiresObjectiveLink => "evaluation_requires_objective_link",
        }
    }
}

impl Display for Invariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::CoreCourseMinimum => write!(f, "Each degree must keep at least one core course"),
            Self::CoreRequiresObjective => write!(
                f,
                "Add at least one objective before marking the course as core"
            ),
            Self::CoreObjectiveMinimum => write!(f, "Core courses must keep at least one objective"),
            Self::ObjectiveCoverage => write!(
                f,
                "Each objective must remain tied to at least one course for the degree"
            ),
            Self::EvaluationRequiresObjectiveLink => {
                write!(f, "Objective is not valid for this degree and course")
            }
        }
    }
}

/// Why a core operation failed
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{invariant}: {detail}")]
    InvariantViolation { invariant: Invariant, detail: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{0}")]
    ConstraintConflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl CoreError {
    pub fn violation(invariant: Invariant, detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            invariant,
            detail: detail.into(),
        }
    }

    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Stable, machine-readable reason for the failure kind
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::InvariantViolation { .. } => "invariant_violation",
            Self::NotFound { .. } => "not_found",
            Self::ConstraintConflict(_) => "constraint_conflict",
            Self::Database(_) => "database_error",
        }
    }

    /// The violated rule, for invariant failures
    pub fn invariant(&self) -> Option<Invariant> {
        match self {
            Self::InvariantViolation { invariant, .. } => Some(*invariant),
            _ => None,
        }
    }
}

/// Outcome of a mutation: a confirmation message or the failure reason
pub type MutationResult = Result<String, CoreError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reasons_are_stable() {
        let validation: CoreError = ValidationError::missing("course_no").into();
        assert_eq!(validation.reason(), "validation_error");
        assert_eq!(validation.invariant(), None);

        let violation = CoreError::violation(Invariant::ObjectiveCoverage, "O1 in CS (Bachelors)");
        assert_eq!(violation.reason(), "invariant_violation");
        assert_eq!(violation.invariant(), Some(Invariant::ObjectiveCoverage));
        assert_eq!(
            violation.to_string(),
            "Each objective must remain tied to at least one course for the degree: O1 in CS (Bachelors)"
        );

        assert_eq!(CoreError::not_found("Section", "x").reason(), "not_found");
        assert_eq!(
            CoreError::ConstraintConflict(String::new()).reason(),
            "constraint_conflict"
        );
        assert_eq!(
            CoreError::Database(DbErr::Custom("down".to_string())).reason(),
            "database_error"
        );
    }
}
