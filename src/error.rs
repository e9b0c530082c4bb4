//! Crate-level error type.
//!
//! Composes every subsystem's `Error` behind one facade, mirroring how
//! `hgvs-rs` lets callers match on `parser::Error` / `mapper::Error`
//! directly but also offers a single type for code that just wants to
//! propagate with `?` across subsystem boundaries (e.g. a caller chaining
//! `parse` into `Mapper::c_to_g` into `Equivalence::compare`).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("parse error")]
    Parse(#[from] crate::parser::Error),
    #[error("mapping error")]
    Mapper(#[from] crate::mapper::Error),
    #[error("data provider error")]
    Data(#[from] crate::data::Error),
    #[error("normalization error")]
    Normalization(#[from] crate::normalizer::Error),
    #[error("validation error")]
    Validation(#[from] crate::validator::Error),
    #[error("transcript model error")]
    Transcript(#[from] crate::transcript::Error),
    #[error("amino acid / translation error")]
    Translation(#[from] crate::aminoacids::Error),
}
