//! Validated identifier types.
//!
//! Carriages and trains carry a *number* of 4 to 19 characters. Stations
//! and routes carry a *name* that must be non-empty and shorter than a
//! configurable bound.

use std::borrow::Borrow;
use std::fmt;

/// Shortest accepted carriage or train number, in characters.
pub const MIN_NUMBER_LEN: usize = 4;

/// Longest accepted carriage or train number, in characters.
pub const MAX_NUMBER_LEN: usize = 19;

/// Default exclusive upper bound on station and route name length.
pub const DEFAULT_MAX_NAME_LEN: usize = 20;

/// Error returned when an identifier fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {what}: {reason}")]
pub struct InvalidIdentifier {
    what: &'static str,
    reason: String,
}

impl InvalidIdentifier {
    /// What was being validated (e.g. "train number").
    pub fn what(&self) -> &'static str {
        self.what
    }
}

fn check_number(s: &str, what: &'static str) -> Result<(), InvalidIdentifier> {
    let len = s.chars().count();
    if !(MIN_NUMBER_LEN..=MAX_NUMBER_LEN).contains(&len) {
        return Err(InvalidIdentifier {
            what,
            reason: format!(
                "must be between {MIN_NUMBER_LEN} and {MAX_NUMBER_LEN} characters, got {len}"
            ),
        });
    }
    Ok(())
}

fn check_name(s: &str, what: &'static str, max_len: usize) -> Result<(), InvalidIdentifier> {
    if s.is_empty() {
        return Err(InvalidIdentifier {
            what,
            reason: "cannot be empty".to_string(),
        });
    }
    let len = s.chars().count();
    if len >= max_len {
        return Err(InvalidIdentifier {
            what,
            reason: format!("must be shorter than {max_len} characters, got {len}"),
        });
    }
    Ok(())
}

/// A validated carriage number.
///
/// # Examples
///
/// ```
/// use rail_yard::domain::CarriageNumber;
///
/// let number = CarriageNumber::parse("C-1001").unwrap();
/// assert_eq!(number.as_str(), "C-1001");
///
/// // Too short
/// assert!(CarriageNumber::parse("C1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarriageNumber(String);

impl CarriageNumber {
    /// Parse a carriage number: 4 to 19 characters.
    pub fn parse(s: &str) -> Result<Self, InvalidIdentifier> {
        check_number(s, "carriage number")?;
        Ok(CarriageNumber(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated train number. Same length rule as [`CarriageNumber`].
///
/// # Examples
///
/// ```
/// use rail_yard::domain::TrainNumber;
///
/// assert!(TrainNumber::parse("12345").is_ok());
/// assert!(TrainNumber::parse("123").is_err());
/// assert!(TrainNumber::parse("a-very-long-train-number").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainNumber(String);

impl TrainNumber {
    /// Parse a train number: 4 to 19 characters.
    pub fn parse(s: &str) -> Result<Self, InvalidIdentifier> {
        check_number(s, "train number")?;
        Ok(TrainNumber(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated station name.
///
/// # Examples
///
/// ```
/// use rail_yard::domain::StationName;
///
/// assert!(StationName::parse("first_station_ever").is_ok());
/// assert!(StationName::parse("").is_err());
/// assert!(StationName::parse("very-very-very long station name").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationName(String);

impl StationName {
    /// Parse a station name using [`DEFAULT_MAX_NAME_LEN`].
    pub fn parse(s: &str) -> Result<Self, InvalidIdentifier> {
        Self::parse_with_limit(s, DEFAULT_MAX_NAME_LEN)
    }

    /// Parse a station name that must be shorter than `max_len` characters.
    pub fn parse_with_limit(s: &str, max_len: usize) -> Result<Self, InvalidIdentifier> {
        check_name(s, "station name", max_len)?;
        Ok(StationName(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated route number. Same rule as [`StationName`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteNumber(String);

impl RouteNumber {
    /// Parse a route number using [`DEFAULT_MAX_NAME_LEN`].
    pub fn parse(s: &str) -> Result<Self, InvalidIdentifier> {
        Self::parse_with_limit(s, DEFAULT_MAX_NAME_LEN)
    }

    /// Parse a route number that must be shorter than `max_len` characters.
    pub fn parse_with_limit(s: &str, max_len: usize) -> Result<Self, InvalidIdentifier> {
        check_name(s, "route number", max_len)?;
        Ok(RouteNumber(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Borrow<str> lets the yard's maps be queried with plain `&str` keys.
// Hash and Eq are derived from the inner String, so they agree with str.

impl Borrow<str> for CarriageNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TrainNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RouteNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CarriageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CarriageNumber({})", self.0)
    }
}

impl fmt::Debug for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainNumber({})", self.0)
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.0)
    }
}

impl fmt::Debug for RouteNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteNumber({})", self.0)
    }
}

impl fmt::Display for CarriageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RouteNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 4..=19 character string is a valid number
        #[test]
        fn valid_numbers_parse(s in "[A-Za-z0-9_ -]{4,19}") {
            let n = TrainNumber::parse(&s).unwrap();
            prop_assert_eq!(n.as_str(), s.as_str());
        }

        /// Short and long numbers are always rejected
        #[test]
        fn bad_length_numbers_rejected(s in "[A-Za-z0-9]{0,3}|[A-Za-z0-9]{20,40}") {
            prop_assert!(CarriageNumber::parse(&s).is_err());
        }

        /// Names shorter than the bound are accepted
        #[test]
        fn names_within_bound(s in "[a-z]{1,19}") {
            prop_assert!(StationName::parse(&s).is_ok());
        }
    }
}
