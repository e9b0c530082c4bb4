//! The HGVS parser and formatter: tokenizer, recursive-descent grammar, AST
//! and its inverse `Display` implementation.
//!
//! Grounded on `hgvs-rs::parser`, which splits the same concerns across
//! `ds.rs` (data structures), `parse.rs`/`parser.rs` (grammar) and
//! `display.rs` (formatter); this crate keeps that split but drives the
//! grammar with `nom` combinators directly against the coordinate newtypes
//! in [`crate::coords`] rather than the teacher's runtime-tagged `PosType`.

pub mod display;
pub mod ds;
mod error;
mod impl_ops;
mod impl_parse;
mod impl_validate;
mod parse_funcs;

pub use ds::*;
pub use error::{Error, ErrorKind};
pub use impl_parse::{Parseable, ParseablePos};

/// Parse a complete HGVS variant description.
///
/// Unlike [`Parseable::parse`] (which is happy to leave trailing input
/// unconsumed, as `nom` combinators do), this is the public entry point:
/// it requires the entire string to be consumed and reports a byte offset
/// on failure, per `spec.md` §4.1.
pub fn parse(input: &str) -> Result<ds::HgvsVariant, Error> {
    match ds::HgvsVariant::parse(input) {
        Ok(("", variant)) => Ok(variant),
        Ok((rest, _)) => {
            let offset = input.len() - rest.len();
            Err(Error::new(
                ErrorKind::UnexpectedEnd,
                offset,
                format!("trailing input after variant: {:?}", rest),
            ))
        }
        Err(nom::Err::Incomplete(_)) => Err(Error::new(
            ErrorKind::UnexpectedEnd,
            input.len(),
            "incomplete input",
        )),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
            let offset = input.len() - e.input.len();
            Err(Error::new(
                classify_nom_error(input, offset),
                offset,
                format!("could not parse {:?}", e.input),
            ))
        }
    }
}

/// Best-effort classification of *why* parsing stopped at `offset`, used
/// only to pick an [`ErrorKind`] for diagnostics; the offset itself is
/// exact, the classification is a heuristic.
fn classify_nom_error(input: &str, offset: usize) -> ErrorKind {
    if offset >= input.len() {
        return ErrorKind::UnexpectedEnd;
    }
    let rest = &input[offset..];
    if rest.starts_with(':') || rest.contains(':') {
        // Failed before reaching a recognized edit: likely a bad position
        // or coordinate-kind mismatch (e.g. `c.` body fed genomic digits).
        ErrorKind::BadPosition
    } else if rest.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false) {
        ErrorKind::BadEdit
    } else {
        ErrorKind::InvalidChar
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_rejects_trailing_garbage() {
        let err = parse("NM_000051.3:c.123A>Gxyz").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEnd);
    }

    #[test]
    fn parse_accepts_full_substitution() {
        let v = parse("NM_000051.3:c.123A>G").unwrap();
        assert_eq!(v.accession().value, "NM_000051.3");
        assert_eq!(v.kind(), 'c');
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(parse("").is_err());
    }
}
