use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Academic term within a year, ordered by when it happens rather than by name
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[strum(ascii_case_insensitive)]
pub enum Term {
    Spring,
    Summer,
    Fall,
}

impl Term {
    /// Position of the term within its year (Spring = 1)
    pub fn rank(self) -> i64 {
        match self {
            Self::Spring => 1,
            Self::Summer => 2,
            Self::Fall => 3,
        }
    }

    /// Canonical label, also the stored column value
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn all() -> Vec<Term> {
        Term::iter().collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_term_order_follows_calendar() {
        assert!(Term::Spring < Term::Summer);
        assert!(Term::Summer < Term::Fall);
        assert_eq!(Term::all(), vec![Term::Spring, Term::Summer, Term::Fall]);
    }

    #[test]
    fn test_term_from_str() {
        assert_eq!(Term::from_str("Fall").unwrap(), Term::Fall);
        assert_eq!(Term::from_str("summer").unwrap(), Term::Summer);
        assert!(Term::from_str("Winter").is_err());
        assert!(Term::from_str("").is_err());
    }

    #[test]
    fn test_term_display_is_canonical() {
        assert_eq!(Term::Spring.to_string(), "Spring");
        assert_eq!(Term::Fall.as_str(), "Fall");
    }
}
