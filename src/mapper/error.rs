//! Error type definition.

use thiserror::Error;

/// Error type for variant mapping (`g_to_c`, `c_to_g`, `c_to_p`, `normalize`).
#[derive(Error, Debug)]
pub enum Error {
    #[error("data provider error")]
    Data(#[from] crate::data::Error),
    #[error("transcript model error")]
    Transcript(#[from] crate::transcript::Error),
    #[error("normalization error")]
    Normalization(#[from] crate::normalizer::Error),
    #[error("validation error")]
    Validation(#[from] crate::validator::Error),
    #[error("amino acid / translation error")]
    Translation(#[from] crate::aminoacids::Error),
    #[error("expected a {expected} variant but received a {actual} variant")]
    WrongVariantKind { expected: &'static str, actual: char },
    #[error("position {0} is intronic and cannot be mapped for this operation")]
    UnexpectedIntronicPosition(String),
    #[error("edit at {0} cannot be projected onto the coding sequence")]
    OutsideCds(String),
    #[error("no stop codon found when translating the reference CDS of {0}")]
    ReferenceHasNoStopCodon(String),
}
