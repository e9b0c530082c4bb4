//! Error type definition.

use thiserror::Error;

/// Error type for [`super::DataProvider`] failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("accession not found: {0}")]
    NotFound(String),
    #[error("requested range [{start}, {end}) is out of bounds for {ac} (length {len})")]
    OutOfRange {
        ac: String,
        start: i64,
        end: i64,
        len: i64,
    },
}
