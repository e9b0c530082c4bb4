//! Implementation of parser functions: nom combinators for the primitive
//! tokens of an HGVS expression (positions, nucleic-acid edits, amino acid
//! tokens, protein edits). Composed into whole-variant parsers in
//! `impl_parse.rs`.

/// Code for parsing alpha/numeric strings.
pub mod alphanum {
    use nom::character::complete::alphanumeric1;

    // cf. https://stackoverflow.com/a/73437782/84349
    pub fn narrowed_alphanumeric1(
        input: &str,
    ) -> Result<(&str, &str), nom::Err<nom::error::Error<&str>>> {
        alphanumeric1(input)
    }
}

/// Functions for parsing nucleic acid residues and sequences. Accepts the
/// common IUPAC ambiguity codes and both upper/lower case so the same
/// tokenizer serves the DNA alphabet (`g`/`m`/`c`/`n`) and the RNA alphabet
/// (`r`, lowercase `acgu`).
pub mod na {
    use nom::bytes::complete::{take_while, take_while1};
    use nom::character::complete::one_of;

    pub static NA_IUPAC: &str = "ACGTURYMKWSBDHVNacgturymkwsbdhvn";

    pub fn na(input: &str) -> Result<(&str, char), nom::Err<nom::error::Error<&str>>> {
        one_of(NA_IUPAC)(input)
    }

    pub fn na0(input: &str) -> Result<(&str, &str), nom::Err<nom::error::Error<&str>>> {
        take_while(|c: char| NA_IUPAC.contains(c))(input)
    }

    pub fn na1(input: &str) -> Result<(&str, &str), nom::Err<nom::error::Error<&str>>> {
        take_while1(|c: char| NA_IUPAC.contains(c))(input)
    }
}

/// Functions for parsing nucleic acid edits (`edit_na` in the grammar).
pub mod na_edit {
    use nom::bytes::complete::tag;
    use nom::character::complete::{char as nom_char, digit1};
    use nom::combinator::{map, map_res, opt};
    use nom::sequence::{delimited, pair, tuple};
    use nom::IResult;

    use crate::parser::ds::NaEdit;

    use super::na::na1;

    pub fn identity(input: &str) -> IResult<&str, NaEdit> {
        map(nom_char('='), |_| NaEdit::Identity)(input)
    }

    pub fn substitution(input: &str) -> IResult<&str, NaEdit> {
        let (rest, (reference, _, alternative)) = tuple((na1, nom_char('>'), na1))(input)?;
        Ok((
            rest,
            NaEdit::Substitution {
                reference: reference.to_string(),
                alternative: alternative.to_string(),
            },
        ))
    }

    pub fn delins(input: &str) -> IResult<&str, NaEdit> {
        let (rest, (_, _, alternative)) = tuple((tag("del"), tag("ins"), na1))(input)?;
        Ok((
            rest,
            NaEdit::Delins {
                alternative: alternative.to_string(),
            },
        ))
    }

    pub fn deletion(input: &str) -> IResult<&str, NaEdit> {
        map(pair(tag("del"), opt(na1)), |(_, reference)| {
            NaEdit::Deletion {
                reference: reference.map(str::to_string),
            }
        })(input)
    }

    pub fn insertion(input: &str) -> IResult<&str, NaEdit> {
        map(pair(tag("ins"), na1), |(_, alternative)| NaEdit::Insertion {
            alternative: alternative.to_string(),
        })(input)
    }

    pub fn duplication(input: &str) -> IResult<&str, NaEdit> {
        map(pair(tag("dup"), opt(na1)), |(_, reference)| {
            NaEdit::Duplication {
                reference: reference.map(str::to_string),
            }
        })(input)
    }

    pub fn inversion(input: &str) -> IResult<&str, NaEdit> {
        map(tag("inv"), |_| NaEdit::Inversion)(input)
    }

    pub fn repeat(input: &str) -> IResult<&str, NaEdit> {
        let (rest, (unit, count)) = pair(
            na1,
            delimited(nom_char('['), map_res(digit1, str::parse::<u32>), nom_char(']')),
        )(input)?;
        Ok((
            rest,
            NaEdit::Repeat {
                unit: unit.to_string(),
                count,
            },
        ))
    }

}

/// Code for parsing amino acid residues and protein sequences.
pub mod protein {
    use nom::branch::alt;
    use nom::bytes::complete::take;
    use nom::multi::many1;
    use nom::IResult;

    use crate::aminoacids;

    /// A three-letter amino acid code (including `Ter`), returned unchanged.
    pub fn aa3(input: &str) -> IResult<&str, &str> {
        let (rest, triplet) = take(3usize)(input)?;
        if aminoacids::aa3_to_aa1(triplet).is_ok() {
            Ok((rest, triplet))
        } else {
            Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Fail,
            )))
        }
    }

    /// A one-letter amino acid code (including `*`, `X`), normalized to its
    /// three-letter canonical form.
    pub fn aa1(input: &str) -> IResult<&str, String> {
        let (rest, c) = take(1usize)(input)?;
        match aminoacids::aa1_to_aa3(c) {
            Ok(aa3) => Ok((rest, aa3)),
            Err(_) => Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Fail,
            ))),
        }
    }

    /// A single amino acid token, one- or three-letter, normalized to
    /// three-letter canonical form.
    pub fn aa(input: &str) -> IResult<&str, String> {
        alt((nom::combinator::map(aa3, str::to_owned), aa1))(input)
    }

    /// One or more consecutive three-letter amino acid tokens, concatenated.
    pub fn aa_run3(input: &str) -> IResult<&str, String> {
        let (rest, aas) = many1(aa3)(input)?;
        Ok((rest, aas.concat()))
    }

    /// One or more consecutive one-letter amino acid tokens, concatenated
    /// and expanded to three-letter form.
    pub fn aa_run1(input: &str) -> IResult<&str, String> {
        let (rest, aas) = many1(aa1)(input)?;
        Ok((rest, aas.concat()))
    }

    /// One or more amino acid tokens of either width, normalized to
    /// three-letter form.
    pub fn aa_run(input: &str) -> IResult<&str, String> {
        alt((aa_run3, aa_run1))(input)
    }
}

/// Code for parsing protein edits (`edit_p` in the grammar).
pub mod protein_edit {
    use nom::branch::alt;
    use nom::bytes::complete::tag;
    use nom::character::complete::{char as nom_char, digit0, digit1};
    use nom::combinator::opt;
    use nom::sequence::pair;
    use nom::IResult;

    use super::protein::{aa, aa_run};
    use crate::parser::ds::{ProteinEdit, UncertainChange};

    pub fn ident(input: &str) -> IResult<&str, ProteinEdit> {
        let (rest, _) = nom_char('=')(input)?;
        Ok((rest, ProteinEdit::Ident))
    }

    pub fn del(input: &str) -> IResult<&str, ProteinEdit> {
        let (rest, _) = tag("del")(input)?;
        Ok((rest, ProteinEdit::Del))
    }

    pub fn dup(input: &str) -> IResult<&str, ProteinEdit> {
        let (rest, _) = tag("dup")(input)?;
        Ok((rest, ProteinEdit::Dup))
    }

    pub fn delins(input: &str) -> IResult<&str, ProteinEdit> {
        let (rest, (_, alternative)) = pair(tag("delins"), aa_run)(input)?;
        Ok((rest, ProteinEdit::DelIns { alternative }))
    }

    pub fn ins(input: &str) -> IResult<&str, ProteinEdit> {
        let (rest, (_, alternative)) = pair(tag("ins"), aa_run)(input)?;
        Ok((rest, ProteinEdit::Ins { alternative }))
    }

    pub fn subst(input: &str) -> IResult<&str, ProteinEdit> {
        let (rest, alternative) = aa(input)?;
        Ok((rest, ProteinEdit::Subst { alternative }))
    }

    /// Frameshift: `Alt? "fs" ("Ter"|"X"|"*")? (digits | "?")?`
    pub fn fs(input: &str) -> IResult<&str, ProteinEdit> {
        let (rest, alternative) = opt(aa)(input)?;
        let (rest, _) = tag("fs")(rest)?;
        let (rest, terminal) = opt(alt((tag("Ter"), tag("X"), tag("*"))))(rest)?;

        if terminal.is_none() {
            return Ok((
                rest,
                ProteinEdit::Fs {
                    alternative,
                    terminal: None,
                    length: UncertainChange::None,
                },
            ));
        }

        let (rest, count) = digit0(rest)?;
        if count.is_empty() {
            let (rest, qm) = opt(tag("?"))(rest)?;
            Ok((
                rest,
                ProteinEdit::Fs {
                    alternative,
                    terminal: Some("Ter".to_string()),
                    length: if qm.is_some() {
                        UncertainChange::Unknown
                    } else {
                        UncertainChange::None
                    },
                },
            ))
        } else {
            Ok((
                rest,
                ProteinEdit::Fs {
                    alternative,
                    terminal: Some("Ter".to_string()),
                    length: UncertainChange::Known(count.parse::<i32>().expect("digit0 output")),
                },
            ))
        }
    }

    /// N-terminal extension with a negative shift: `Aa? "ext" "-" digits`.
    pub fn ext_neg_shift(input: &str) -> IResult<&str, ProteinEdit> {
        let (rest, aa_ext) = opt(aa)(input)?;
        let (rest, _) = tag("ext")(rest)?;
        let (rest, (_, offset)) = pair(nom_char('-'), digit1)(rest)?;
        Ok((
            rest,
            ProteinEdit::Ext {
                aa_ext,
                ext_aa: None,
                change: UncertainChange::Known(-offset.parse::<i32>().expect("digit1 output")),
            },
        ))
    }

    /// C-terminal extension: `Aa? "ext" ("Ter"|"X"|"*") (digits | "?")?`.
    pub fn ext_pos_shift(input: &str) -> IResult<&str, ProteinEdit> {
        let (rest, aa_ext) = opt(aa)(input)?;
        let (rest, _) = tag("ext")(rest)?;
        let (rest, ext_aa) = alt((tag("Ter"), tag("X"), tag("*")))(rest)?;
        let (rest, offset) = opt(alt((tag("?"), digit1)))(rest)?;

        let change = match offset {
            None => UncertainChange::None,
            Some("?") => UncertainChange::Unknown,
            Some(n) => UncertainChange::Known(n.parse::<i32>().expect("digit1 output")),
        };
        Ok((
            rest,
            ProteinEdit::Ext {
                aa_ext,
                ext_aa: Some(ext_aa.to_string()),
                change,
            },
        ))
    }

    /// Extension with no explicit shift at all: `Aa? "ext"`.
    pub fn ext_minimal(input: &str) -> IResult<&str, ProteinEdit> {
        let (rest, aa_ext) = opt(aa)(input)?;
        let (rest, _) = tag("ext")(rest)?;
        Ok((
            rest,
            ProteinEdit::Ext {
                aa_ext,
                ext_aa: None,
                change: UncertainChange::None,
            },
        ))
    }
}

/// Parsing of genomic (`g.`/`m.`) position and interval.
pub mod genomic_pos {
    use nom::character::complete::digit1;
    use nom::combinator::map_res;
    use nom::IResult;

    use crate::coords::HgvsGenomicPos;

    pub fn pos(input: &str) -> IResult<&str, HgvsGenomicPos> {
        map_res(digit1, |s: &str| s.parse::<i64>().map(HgvsGenomicPos))(input)
    }
}

/// Parsing of transcript (`c.`/`n.`/`r.`) position and interval: optional
/// `*` 3'-UTR anchor, a signed base, and an optional signed intron offset.
pub mod transcript_pos {
    use nom::branch::alt;
    use nom::bytes::complete::tag;
    use nom::character::complete::digit1;
    use nom::combinator::{opt, recognize};
    use nom::sequence::pair;
    use nom::IResult;

    use crate::coords::{CdsAnchor, HgvsTranscriptPos};

    fn from_start(input: &str) -> IResult<&str, HgvsTranscriptPos> {
        let (rest, base) = recognize(pair(opt(tag("-")), digit1))(input)?;
        let (rest, offset) = opt(recognize(pair(alt((tag("+"), tag("-"))), digit1)))(rest)?;
        Ok((
            rest,
            HgvsTranscriptPos {
                anchor: CdsAnchor::Start,
                base: base.parse::<i64>().expect("recognized digits"),
                offset: offset.map_or(0, |o| o.parse::<i64>().expect("recognized digits")),
            },
        ))
    }

    fn from_end(input: &str) -> IResult<&str, HgvsTranscriptPos> {
        let (rest, _) = tag("*")(input)?;
        let (rest, base) = digit1(rest)?;
        let (rest, offset) = opt(recognize(pair(alt((tag("+"), tag("-"))), digit1)))(rest)?;
        Ok((
            rest,
            HgvsTranscriptPos {
                anchor: CdsAnchor::End,
                base: base.parse::<i64>().expect("recognized digits"),
                offset: offset.map_or(0, |o| o.parse::<i64>().expect("recognized digits")),
            },
        ))
    }

    pub fn pos(input: &str) -> IResult<&str, HgvsTranscriptPos> {
        alt((from_end, from_start))(input)
    }
}

/// Parsing of protein (`p.`) positions: a reference amino acid followed by
/// a 1-based residue number.
pub mod protein_pos {
    use nom::character::complete::digit1;
    use nom::combinator::map_res;
    use nom::sequence::pair;
    use nom::IResult;

    use super::protein::aa;
    use crate::coords::HgvsProteinPos;
    use crate::parser::ds::ProteinPosition;

    pub fn pos(input: &str) -> IResult<&str, ProteinPosition> {
        let (rest, (aa, pos)) = pair(aa, map_res(digit1, |s: &str| s.parse::<i64>()))(input)?;
        Ok((
            rest,
            ProteinPosition {
                aa,
                pos: HgvsProteinPos(pos),
            },
        ))
    }
}
