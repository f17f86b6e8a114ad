use crate::term::Term;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// A single semester, e.g. 2024 Fall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SemesterKey {
    pub year: i32,
    pub term: Term,
}

impl SemesterKey {
    pub const fn new(year: i32, term: Term) -> Self {
        Self { year, term }
    }

    /// Scalar used for range comparisons: `year * 10 + term rank`
    pub fn ordinal(&self) -> i64 {
        i64::from(self.year) * 10 + self.term.rank()
    }

    /// Builds a key from stored columns, skipping rows whose term is unrecognised
    pub fn from_columns(year: i32, term: &str) -> Option<Self> {
        Term::from_str(term).ok().map(|term| Self { year, term })
    }
}

impl Ord for SemesterKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for SemesterKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for SemesterKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}-{}", self.year, self.term)
    }
}

/// Parses labels of the form `2024-Fall`
impl FromStr for SemesterKey {
    type Err = String;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let (year, term) = label
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("Semester label must look like 2024-Fall: {label}"))?;

        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("Invalid semester year: {year}"))?;
        let term = Term::from_str(term.trim()).map_err(|_| format!("Invalid term: {term}"))?;

        Ok(Self { year, term })
    }
}

/// Inclusive range of semesters used by the history reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SemesterRange {
    pub start: SemesterKey,
    pub end: SemesterKey,
}

impl SemesterRange {
    /// Lower bound used when the start label is missing or malformed
    pub const OPEN_START: SemesterKey = SemesterKey::new(0, Term::Spring);
    /// Upper bound used when the end label is missing or malformed
    pub const OPEN_END: SemesterKey = SemesterKey::new(9999, Term::Fall);

    pub fn new(start: SemesterKey, end: SemesterKey) -> Self {
        Self { start, end }
    }

    /// Builds a range from optional labels; anything unparsable leaves that side open
    pub fn from_labels(start: Option<&str>, end: Option<&str>) -> Self {
        let start = start
            .and_then(|label| label.parse().ok())
            .unwrap_or(Self::OPEN_START);
        let end = end
            .and_then(|label| label.parse().ok())
            .unwrap_or(Self::OPEN_END);

        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::new(Self::OPEN_START, Self::OPEN_END)
    }

    pub fn contains(&self, semester: SemesterKey) -> bool {
        let value = semester.ordinal();
        self.start.ordinal() <= value && value <= self.end.ordinal()
    }
}

impl Default for SemesterRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_semester_label_parsing() {
        let key: SemesterKey = "2023-Fall".parse().unwrap();
        assert_eq!(key, SemesterKey::new(2023, Term::Fall));
        assert_eq!(key.to_string(), "2023-Fall");

        assert!("2023".parse::<SemesterKey>().is_err());
        assert!("twenty-Fall".parse::<SemesterKey>().is_err());
        assert!("2023-Winter".parse::<SemesterKey>().is_err());
    }

    #[test]
    fn test_semester_ordering_uses_term_rank() {
        let spring = SemesterKey::new(2024, Term::Spring);
        let fall = SemesterKey::new(2023, Term::Fall);
        assert!(fall < spring);
        assert_eq!(spring.ordinal(), 20241);
        assert_eq!(fall.ordinal(), 20233);
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = SemesterRange::from_labels(Some("2023-Fall"), Some("2024-Spring"));

        assert!(range.contains(SemesterKey::new(2024, Term::Spring)));
        assert!(range.contains(SemesterKey::new(2023, Term::Fall)));
        assert!(!range.contains(SemesterKey::new(2023, Term::Summer)));
        assert!(!range.contains(SemesterKey::new(2024, Term::Summer)));
    }

    #[test]
    fn test_range_defaults_open_ended() {
        let range = SemesterRange::from_labels(None, Some("garbage"));
        assert_eq!(range.start, SemesterRange::OPEN_START);
        assert_eq!(range.end, SemesterRange::OPEN_END);
        assert!(range.contains(SemesterKey::new(1990, Term::Spring)));
        assert!(range.contains(SemesterKey::new(2100, Term::Fall)));

        let half_open = SemesterRange::from_labels(Some("2020-Summer"), None);
        assert!(!half_open.contains(SemesterKey::new(2020, Term::Spring)));
        assert!(half_open.contains(SemesterKey::new(2020, Term::Summer)));
    }

    #[test]
    fn test_from_columns_skips_unknown_terms() {
        assert_eq!(
            SemesterKey::from_columns(2022, "Summer"),
            Some(SemesterKey::new(2022, Term::Summer))
        );
        assert_eq!(SemesterKey::from_columns(2022, "Winter"), None);
    }
}
