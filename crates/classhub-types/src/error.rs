//! error type for the types crate.

use thiserror::Error;

/// errors produced while constructing or validating domain types.
#[derive(Debug, Error)]
pub enum Error {
    /// a field failed validation.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// the offending field.
        field: &'static str,
        /// why it was rejected.
        reason: String,
    },

    /// configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl Error {
    /// convenience constructor for validation failures.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
