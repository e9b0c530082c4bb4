//! Coordinate mapping between the genomic, transcript and protein spaces.

mod error;
pub mod variant;

pub use error::Error;
pub use variant::{Config, Mapper};
