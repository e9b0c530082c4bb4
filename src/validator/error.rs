//! Error type definition.

use thiserror::Error;

/// Error type for validation of HGVS expressions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("ref or alt must be non-empty in {0}")]
    RefOrAltMustBeNonEmpty(String),
    #[error("alternate sequence must be non-empty in {0}")]
    AlternativeMustBeNonEmpty(String),
    #[error("repeat count must be positive in {0}")]
    RepeatCountNotPositive(String),
    #[error("frameshift terminal distance must be positive in {0}")]
    FrameshiftDistanceNotPositive(String),
    #[error("start must be <= end in {0}")]
    StartMustBeLessThanEnd(String),
    #[error("reference amino acid {expected} does not match the provider's sequence ({actual}) at position {position}")]
    ReferenceMismatch {
        expected: String,
        actual: String,
        position: i64,
    },
    #[error("position {0} is out of bounds for {1} (length {2})")]
    PositionOutOfBounds(i64, String, i64),
}
