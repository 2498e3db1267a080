//! validated result-access pin code type.
//!
//! pin codes must:
//! - start with "PIN-"
//! - carry a 4-digit year
//! - end with 4 decimal digits

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// the prefix for all pin codes.
pub const PIN_PREFIX: &str = "PIN-";

/// number of random digits in the final segment.
pub const PIN_RANDOM_DIGITS: usize = 4;

/// a validated pin code string, e.g. `PIN-2026-0481`.
///
/// the 4-digit space is small, so global uniqueness is enforced by the
/// database and generation retries on collision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PinCode(String);

impl PinCode {
    /// create a new pin code, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, PinCodeError> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// generate a random pin code for the current year.
    pub fn generate() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let number: u32 = rng.random_range(0..10_000);
        Self(format!("{}{}-{:04}", PIN_PREFIX, Utc::now().year(), number))
    }

    /// the full code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// consume the code and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    fn validate(s: &str) -> Result<(), PinCodeError> {
        let rest = s.strip_prefix(PIN_PREFIX).ok_or(PinCodeError::MissingPrefix)?;

        let (year, number) = rest.split_once('-').ok_or(PinCodeError::Malformed)?;

        if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(PinCodeError::Malformed);
        }

        if number.len() != PIN_RANDOM_DIGITS || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(PinCodeError::Malformed);
        }

        Ok(())
    }
}

impl fmt::Display for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PinCode {
    type Err = PinCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PinCode {
    type Error = PinCodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PinCode> for String {
    fn from(code: PinCode) -> Self {
        code.0
    }
}

impl AsRef<str> for PinCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// error type for invalid pin codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PinCodeError {
    /// code does not start with "PIN-".
    #[error("pin code must start with 'PIN-'")]
    MissingPrefix,

    /// code is not of the form PIN-YYYY-NNNN.
    #[error("pin code must be of the form PIN-YYYY-NNNN")]
    Malformed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_pin_code() {
        let code: PinCode = "PIN-2026-0001".parse().unwrap();
        assert_eq!(code.as_str(), "PIN-2026-0001");
    }

    #[test]
    fn test_generated_pin_code_validates() {
        let code = PinCode::generate();
        let reparsed: PinCode = code.as_str().parse().unwrap();
        assert_eq!(reparsed, code);
    }

    #[test]
    fn test_rejects_missing_prefix() {
        assert_eq!(
            "2026-0001".parse::<PinCode>().unwrap_err(),
            PinCodeError::MissingPrefix
        );
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("PIN-26-0001".parse::<PinCode>().is_err()); // short year
        assert!("PIN-2026-001".parse::<PinCode>().is_err()); // short number
        assert!("PIN-2026-00012".parse::<PinCode>().is_err()); // long number
        assert!("PIN-2026-abcd".parse::<PinCode>().is_err()); // not digits
        assert!("PIN-20260001".parse::<PinCode>().is_err()); // no separator
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let ok: Result<PinCode, _> = serde_json::from_str("\"PIN-2026-1234\"");
        assert!(ok.is_ok());
        let bad: Result<PinCode, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
