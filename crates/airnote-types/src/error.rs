//! Error types for text parsing in airnote-types.

use thiserror::Error;

/// Errors that can occur when parsing user-entered date and time text.
///
/// Numeric field parsing deliberately does not produce errors; malformed
/// numeric text yields `None` (see [`crate::parse::parse_decimal`]).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The date text does not match the `DD/MM/YYYY` display pattern.
    #[error("Invalid date {input:?}, expected DD/MM/YYYY")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// The time text does not match the `HH:MM` display pattern.
    #[error("Invalid time {input:?}, expected HH:MM")]
    InvalidTime {
        /// The rejected input.
        input: String,
    },
}

/// Result type alias using airnote-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
