//! Provide implementation of parsing to data structures.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alphanumeric1, char, one_of},
    combinator::{map, opt, recognize},
    sequence::{delimited, pair, terminated, tuple},
    IResult,
};

use crate::coords::{HgvsGenomicPos, HgvsTranscriptPos, Interval, Uncertain};
use crate::parser::ds::*;
use crate::parser::parse_funcs::*;

/// Trait implemented by every piece of the AST that can be recovered from
/// an HGVS token stream.
pub trait Parseable {
    fn parse(input: &str) -> IResult<&str, Self>
    where
        Self: Sized;
}

/// A position type that knows how to parse its own HGVS token
/// (`123`, `-4`, `*7+2`, `Gln4`, ...). Kept separate from [`Parseable`] so
/// [`Interval`] and [`LocEdit`] can be implemented once, generically, rather
/// than once per coordinate kind as `hgvs-rs` does.
pub trait ParseablePos: Sized + Clone {
    fn parse_pos(input: &str) -> IResult<&str, Self>;
}

impl ParseablePos for HgvsGenomicPos {
    fn parse_pos(input: &str) -> IResult<&str, Self> {
        genomic_pos::pos(input)
    }
}

impl ParseablePos for HgvsTranscriptPos {
    fn parse_pos(input: &str) -> IResult<&str, Self> {
        transcript_pos::pos(input)
    }
}

impl ParseablePos for ProteinPosition {
    fn parse_pos(input: &str) -> IResult<&str, Self> {
        protein_pos::pos(input)
    }
}

impl<P: ParseablePos> Parseable for Interval<P> {
    fn parse(input: &str) -> IResult<&str, Self> {
        alt((
            map(
                tuple((P::parse_pos, char('_'), P::parse_pos)),
                |(start, _, end)| Interval { start, end },
            ),
            map(P::parse_pos, Interval::single),
        ))(input)
    }
}

impl<T: Parseable> Parseable for Uncertain<T> {
    fn parse(input: &str) -> IResult<&str, Self> {
        alt((
            map(delimited(char('('), T::parse, char(')')), Uncertain::Uncertain),
            map(T::parse, Uncertain::Certain),
        ))(input)
    }
}

impl<P: ParseablePos> Parseable for LocEdit<P> {
    fn parse(input: &str) -> IResult<&str, Self> {
        map(
            pair(Uncertain::<Interval<P>>::parse, Uncertain::<NaEdit>::parse),
            |(loc, edit)| LocEdit { loc, edit },
        )(input)
    }
}

impl Parseable for NaEdit {
    fn parse(input: &str) -> IResult<&str, Self> {
        alt((
            na_edit::identity,
            na_edit::delins,
            na_edit::deletion,
            na_edit::insertion,
            na_edit::duplication,
            na_edit::inversion,
            na_edit::repeat,
            na_edit::substitution,
        ))(input)
    }
}

impl Parseable for ProteinEdit {
    fn parse(input: &str) -> IResult<&str, Self> {
        alt((
            protein_edit::fs,
            protein_edit::ext_neg_shift,
            protein_edit::ext_pos_shift,
            protein_edit::ext_minimal,
            protein_edit::ident,
            protein_edit::delins,
            protein_edit::del,
            protein_edit::dup,
            protein_edit::ins,
            protein_edit::subst,
        ))(input)
    }
}

impl Parseable for Accession {
    fn parse(input: &str) -> IResult<&str, Self> {
        let accession_text = recognize(tuple((
            alphanum::narrowed_alphanumeric1,
            opt(pair(char('_'), alphanumeric1)),
            opt(pair(char('.'), alphanumeric1)),
        )));

        map(accession_text, |value: &str| Self {
            value: value.to_string(),
        })(input)
    }
}

impl GeneSymbol {
    /// Parse a bare gene symbol token (no surrounding parentheses — those
    /// are handled by the caller, since parentheses are only meaningful in
    /// the context of "accession(SYMBOL):kind.body").
    pub fn parse(input: &str) -> IResult<&str, Self> {
        map(alphanumeric1, |symbol: &str| Self {
            value: symbol.to_owned(),
        })(input)
    }
}

impl ProteinLocEdit {
    fn parse_no_change(input: &str) -> IResult<&str, Self> {
        map(tag("="), |_| ProteinLocEdit::NoChange)(input)
    }

    fn parse_no_change_uncertain(input: &str) -> IResult<&str, Self> {
        map(tag("(=)"), |_| ProteinLocEdit::NoChangeUncertain)(input)
    }

    fn parse_no_protein(input: &str) -> IResult<&str, Self> {
        alt((
            map(tag("0?"), |_| ProteinLocEdit::NoProteinUncertain),
            map(tag("0"), |_| ProteinLocEdit::NoProtein),
        ))(input)
    }

    fn parse_predicted(input: &str) -> IResult<&str, Self> {
        map(
            delimited(
                char('('),
                pair(Interval::<ProteinPosition>::parse, ProteinEdit::parse),
                char(')'),
            ),
            |(pos, edit)| ProteinLocEdit::Ordinary {
                pos,
                edit,
                predicted: true,
            },
        )(input)
    }

    fn parse_observed(input: &str) -> IResult<&str, Self> {
        map(
            pair(Interval::<ProteinPosition>::parse, ProteinEdit::parse),
            |(pos, edit)| ProteinLocEdit::Ordinary {
                pos,
                edit,
                predicted: false,
            },
        )(input)
    }
}

impl Parseable for ProteinLocEdit {
    fn parse(input: &str) -> IResult<&str, Self> {
        alt((
            Self::parse_no_protein,
            Self::parse_no_change_uncertain,
            Self::parse_no_change,
            Self::parse_predicted,
            Self::parse_observed,
        ))(input)
    }
}

/// Single-letter coordinate kind immediately followed by the `.` separator,
/// e.g. the `c.` in `NM_000051.3:c.123A>G`.
fn kind_dot(input: &str) -> IResult<&str, char> {
    terminated(one_of("gmcnrp"), char('.'))(input)
}

/// `accession ("(" gene_symbol ")")? (":" ref_ac)? ":" kind "."`, i.e.
/// everything in the grammar before `body`. Written as a plain function
/// rather than a combinator chain because the `ref_ac` segment is only
/// present some of the time and telling the two shapes apart needs a
/// one-segment lookahead that `alt` alone expresses awkwardly.
#[allow(clippy::type_complexity)]
fn variant_head(
    input: &str,
) -> IResult<&str, (Accession, Option<GeneSymbol>, Option<Accession>, char)> {
    let (rest, accession) = Accession::parse(input)?;
    let (rest, gene_symbol) = opt(delimited(char('('), GeneSymbol::parse, char(')')))(rest)?;
    let (rest, _) = char(':')(rest)?;

    if let Ok((rest, kind)) = kind_dot(rest) {
        return Ok((rest, (accession, gene_symbol, None, kind)));
    }

    let (rest, reference_accession) = Accession::parse(rest)?;
    let (rest, _) = char(':')(rest)?;
    let (rest, kind) = kind_dot(rest)?;
    Ok((rest, (accession, gene_symbol, Some(reference_accession), kind)))
}

impl Parseable for HgvsVariant {
    fn parse(input: &str) -> IResult<&str, Self> {
        let (rest, (accession, gene_symbol, reference_accession, kind)) = variant_head(input)?;
        match kind {
            'g' => map(LocEdit::<HgvsGenomicPos>::parse, move |loc_edit| {
                HgvsVariant::GenomeVariant {
                    accession: accession.clone(),
                    reference_accession: reference_accession.clone(),
                    gene_symbol: gene_symbol.clone(),
                    loc_edit,
                }
            })(rest),
            'm' => map(LocEdit::<HgvsGenomicPos>::parse, move |loc_edit| {
                HgvsVariant::MitochondrialVariant {
                    accession: accession.clone(),
                    reference_accession: reference_accession.clone(),
                    gene_symbol: gene_symbol.clone(),
                    loc_edit,
                }
            })(rest),
            'c' => map(LocEdit::<HgvsTranscriptPos>::parse, move |loc_edit| {
                HgvsVariant::CdsVariant {
                    accession: accession.clone(),
                    reference_accession: reference_accession.clone(),
                    gene_symbol: gene_symbol.clone(),
                    loc_edit,
                }
            })(rest),
            'n' => map(LocEdit::<HgvsTranscriptPos>::parse, move |loc_edit| {
                HgvsVariant::TranscriptVariant {
                    accession: accession.clone(),
                    reference_accession: reference_accession.clone(),
                    gene_symbol: gene_symbol.clone(),
                    loc_edit,
                }
            })(rest),
            'r' => map(LocEdit::<HgvsTranscriptPos>::parse, move |loc_edit| {
                HgvsVariant::RnaVariant {
                    accession: accession.clone(),
                    reference_accession: reference_accession.clone(),
                    gene_symbol: gene_symbol.clone(),
                    loc_edit,
                }
            })(rest),
            'p' => map(ProteinLocEdit::parse, move |loc_edit| {
                HgvsVariant::ProteinVariant {
                    accession: accession.clone(),
                    reference_accession: reference_accession.clone(),
                    gene_symbol: gene_symbol.clone(),
                    loc_edit,
                }
            })(rest),
            _ => unreachable!("kind_dot only recognizes gmcnrp"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::coords::CdsAnchor;

    #[test]
    fn accession_parse() {
        assert_eq!(
            Accession::parse("NM_000051.3:c.123A>G"),
            Ok((
                ":c.123A>G",
                Accession {
                    value: "NM_000051.3".to_string()
                }
            ))
        );
    }

    #[test]
    fn na_edit_substitution() {
        assert_eq!(
            NaEdit::parse("A>G"),
            Ok((
                "",
                NaEdit::Substitution {
                    reference: "A".to_string(),
                    alternative: "G".to_string()
                }
            ))
        );
    }

    #[test]
    fn na_edit_deletion_without_sequence() {
        assert_eq!(NaEdit::parse("del"), Ok(("", NaEdit::Deletion { reference: None })));
    }

    #[test]
    fn na_edit_repeat() {
        assert_eq!(
            NaEdit::parse("CAG[23]"),
            Ok((
                "",
                NaEdit::Repeat {
                    unit: "CAG".to_string(),
                    count: 23
                }
            ))
        );
    }

    #[test]
    fn protein_edit_frameshift_known_terminal() {
        assert_eq!(
            ProteinEdit::parse("ProfsTer23"),
            Ok((
                "",
                ProteinEdit::Fs {
                    alternative: Some("Pro".to_string()),
                    terminal: Some("Ter".to_string()),
                    length: UncertainChange::Known(23),
                }
            ))
        );
    }

    #[test]
    fn cds_variant_roundtrip_shape() {
        let (rest, v) = HgvsVariant::parse("NM_000051.3:c.123A>G").unwrap();
        assert_eq!(rest, "");
        match v {
            HgvsVariant::CdsVariant {
                accession,
                reference_accession,
                loc_edit,
                ..
            } => {
                assert_eq!(accession.value, "NM_000051.3");
                assert!(reference_accession.is_none());
                let interval = loc_edit.loc.inner();
                assert_eq!(interval.start.anchor, CdsAnchor::Start);
                assert_eq!(interval.start.base, 123);
            }
            other => panic!("expected CdsVariant, got {:?}", other),
        }
    }

    #[test]
    fn genome_variant_with_gene_symbol() {
        let (rest, v) = HgvsVariant::parse("NM_004006.2(DMD):c.93+1G>T").unwrap();
        assert_eq!(rest, "");
        assert_eq!(v.gene_symbol().map(|g| g.value.as_str()), Some("DMD"));
    }

    #[test]
    fn protein_variant_predicted() {
        let (rest, v) = HgvsVariant::parse("NP_000042.3:p.(Gln4Ter)").unwrap();
        assert_eq!(rest, "");
        match v {
            HgvsVariant::ProteinVariant { loc_edit, .. } => match loc_edit {
                ProteinLocEdit::Ordinary { predicted, .. } => assert!(predicted),
                other => panic!("expected Ordinary, got {:?}", other),
            },
            other => panic!("expected ProteinVariant, got {:?}", other),
        }
    }
}
