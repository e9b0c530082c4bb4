//! Error type definition.
//!
//! Unlike the other subsystems, [`super::Equivalence::compare`] itself is
//! infallible: `spec.md` §4.4/§7 define its result as the four-valued
//! [`super::Verdict`], with every sub-operation failure (a missing
//! transcript, an out-of-range sequence fetch, an unmappable position)
//! downgraded to `Verdict::Unknown` rather than propagated. This `Error`
//! type exists for the handful of internal helpers that still need a
//! `Result` to compose with `?`, and is never surfaced through `compare`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("data provider error")]
    Data(#[from] crate::data::Error),
    #[error("mapper error")]
    Mapper(#[from] crate::mapper::Error),
}
