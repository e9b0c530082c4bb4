pub mod aminoacids;
pub mod coords;
pub mod data;
mod error;
pub mod equivalence;
pub mod mapper;
pub mod normalizer;
pub mod parser;
pub mod sequences;
pub mod transcript;
pub mod validator;

#[cfg(test)]
mod test_support;

pub use equivalence::{Equivalence, Verdict};
pub use error::Error;
pub use mapper::Mapper;
pub use parser::{parse, HgvsVariant};
