//! Date normalization for user-entered dates and month filters.
//!
//! # Responsibility
//! - Parse the two accepted date input formats into one canonical form.
//! - Parse the month selector used by summary aggregation.
//!
//! # Invariants
//! - The canonical representation is always `YYYY-MM-DD`.
//! - Input formats are tried in declaration order; the first calendar-valid
//!   match wins.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Accepted user input formats, tried in order.
const INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y"];

/// Calendar date normalized to `YYYY-MM-DD`.
///
/// Canonical text sorts lexicographically in chronological order, which the
/// storage layer relies on for range filters and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalDate(NaiveDate);

/// Error for date input that matches neither accepted format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDate {
    pub input: String,
}

impl Display for InvalidDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "date must be YYYY-MM-DD or DD-MM-YYYY, got `{}`",
            self.input
        )
    }
}

impl Error for InvalidDate {}

impl CanonicalDate {
    /// Parses user input as `YYYY-MM-DD`, then `DD-MM-YYYY`.
    ///
    /// The first format that yields a calendar-valid date wins.
    pub fn parse(input: &str) -> Result<Self, InvalidDate> {
        for format in INPUT_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(input, format) {
                return Ok(Self(date));
            }
        }
        Err(InvalidDate {
            input: input.to_string(),
        })
    }

    /// Strict canonical-only parse for values read back from storage.
    pub fn from_canonical(input: &str) -> Result<Self, InvalidDate> {
        NaiveDate::parse_from_str(input, CANONICAL_FORMAT)
            .map(Self)
            .map_err(|_| InvalidDate {
                input: input.to_string(),
            })
    }
}

impl Display for CanonicalDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0.format(CANONICAL_FORMAT).to_string())
    }
}

/// Month selector for summary aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFilter {
    year: i32,
    month: u32,
}

/// Error for month input that matches neither accepted format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMonth {
    pub input: String,
}

impl Display for InvalidMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "month must be YYYY-MM or MM-YYYY, got `{}`", self.input)
    }
}

impl Error for InvalidMonth {}

impl MonthFilter {
    /// Parses a month selector as `YYYY-MM`, then `MM-YYYY`.
    pub fn parse(input: &str) -> Result<Self, InvalidMonth> {
        let invalid = || InvalidMonth {
            input: input.to_string(),
        };
        let (first, second) = input.split_once('-').ok_or_else(invalid)?;

        for (year_text, month_text) in [(first, second), (second, first)] {
            let Ok(year) = year_text.parse::<i32>() else {
                continue;
            };
            let Ok(month) = month_text.parse::<u32>() else {
                continue;
            };
            if NaiveDate::from_ymd_opt(year, month, 1).is_some() {
                return Ok(Self { year, month });
            }
        }

        Err(invalid())
    }

    /// Returns the `YYYY-MM-` prefix shared by all canonical dates in this
    /// month.
    pub fn date_prefix(&self) -> String {
        format!("{:04}-{:02}-", self.year, self.month)
    }
}

impl Display for MonthFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::{CanonicalDate, MonthFilter};

    #[test]
    fn canonical_input_is_preserved() {
        let date = CanonicalDate::parse("2024-03-05").unwrap();
        assert_eq!(date.to_string(), "2024-03-05");
    }

    #[test]
    fn day_first_input_is_normalized() {
        let date = CanonicalDate::parse("05-03-2024").unwrap();
        assert_eq!(date.to_string(), "2024-03-05");
    }

    #[test]
    fn both_formats_yield_the_same_date() {
        assert_eq!(
            CanonicalDate::parse("2024-03-05").unwrap(),
            CanonicalDate::parse("05-03-2024").unwrap()
        );
    }

    #[test]
    fn calendar_invalid_and_garbage_inputs_fail() {
        for input in ["2024-13-01", "not-a-date", "", "2024-02-30", "2024/03/05"] {
            let err = CanonicalDate::parse(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn from_canonical_rejects_day_first_input() {
        assert!(CanonicalDate::from_canonical("05-03-2024").is_err());
        assert!(CanonicalDate::from_canonical("2024-03-05").is_ok());
    }

    #[test]
    fn month_accepts_year_first_and_month_first() {
        let year_first = MonthFilter::parse("2024-03").unwrap();
        let month_first = MonthFilter::parse("03-2024").unwrap();
        assert_eq!(year_first, month_first);
        assert_eq!(year_first.date_prefix(), "2024-03-");
    }

    #[test]
    fn month_rejects_out_of_range_and_garbage_inputs() {
        for input in ["13-2024", "2024-13", "2024", "march-2024", "", "2024-03-05"] {
            let err = MonthFilter::parse(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn dates_order_chronologically() {
        let earlier = CanonicalDate::parse("2024-01-02").unwrap();
        let later = CanonicalDate::parse("2024-01-03").unwrap();
        assert!(earlier < later);
    }
}
