//! Implementation of the `Display` trait: the formatter. Deterministic
//! inverse of the parser on the subset of canonical HGVS — chooses
//! three-letter amino acid names, omits inferable `del` sequences, and
//! preserves uncertainty brackets. `format(v)` round-trips through `parse`
//! for every `HgvsVariant` the mapper produces.

use std::fmt;
use std::fmt::Display;

use super::ds::{
    Accession, GeneSymbol, HgvsVariant, LocEdit, NaEdit, ProteinEdit, ProteinLocEdit,
    ProteinPosition, UncertainChange,
};

impl Display for Accession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Display for GeneSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Display for ProteinPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.aa, self.pos)
    }
}

impl Display for NaEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NaEdit::Identity => write!(f, "="),
            NaEdit::Substitution {
                reference,
                alternative,
            } => write!(f, "{}>{}", reference, alternative),
            NaEdit::Deletion { reference } => match reference {
                Some(r) => write!(f, "del{}", r),
                None => write!(f, "del"),
            },
            NaEdit::Insertion { alternative } => write!(f, "ins{}", alternative),
            NaEdit::Duplication { reference } => match reference {
                Some(r) => write!(f, "dup{}", r),
                None => write!(f, "dup"),
            },
            NaEdit::Inversion => write!(f, "inv"),
            NaEdit::Delins { alternative } => write!(f, "delins{}", alternative),
            NaEdit::Repeat { unit, count } => write!(f, "{}[{}]", unit, count),
        }
    }
}

impl Display for UncertainChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UncertainChange::None => Ok(()),
            UncertainChange::Unknown => write!(f, "?"),
            UncertainChange::Known(count) => write!(f, "{}", count),
        }
    }
}

impl Display for ProteinEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProteinEdit::Fs {
                alternative,
                terminal,
                length,
            } => {
                if let Some(alt) = alternative {
                    write!(f, "{}", alt)?;
                }
                write!(f, "fs")?;
                if let Some(terminal) = terminal {
                    write!(f, "{}{}", terminal, length)?;
                }
                Ok(())
            }
            ProteinEdit::Ext {
                aa_ext,
                ext_aa,
                change,
            } => {
                if let Some(aa) = aa_ext {
                    write!(f, "{}", aa)?;
                }
                write!(f, "ext")?;
                if let Some(aa) = ext_aa {
                    write!(f, "{}", aa)?;
                }
                write!(f, "{}", change)
            }
            ProteinEdit::Subst { alternative } => write!(f, "{}", alternative),
            ProteinEdit::DelIns { alternative } => write!(f, "delins{}", alternative),
            ProteinEdit::Ins { alternative } => write!(f, "ins{}", alternative),
            ProteinEdit::Del => write!(f, "del"),
            ProteinEdit::Dup => write!(f, "dup"),
            ProteinEdit::Ident => write!(f, "="),
        }
    }
}

impl<P: Display + Clone + PartialEq> Display for LocEdit<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.loc, self.edit)
    }
}

impl Display for ProteinLocEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProteinLocEdit::Ordinary {
                pos,
                edit,
                predicted,
            } => {
                if *predicted {
                    write!(f, "({}{})", pos, edit)
                } else {
                    write!(f, "{}{}", pos, edit)
                }
            }
            ProteinLocEdit::NoChange => write!(f, "="),
            ProteinLocEdit::NoChangeUncertain => write!(f, "(=)"),
            ProteinLocEdit::NoProtein => write!(f, "0"),
            ProteinLocEdit::NoProteinUncertain => write!(f, "0?"),
        }
    }
}

impl Display for HgvsVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.accession())?;
        if let Some(gene_symbol) = self.gene_symbol() {
            write!(f, "({})", gene_symbol)?;
        }
        if let HgvsVariant::GenomeVariant {
            reference_accession,
            ..
        }
        | HgvsVariant::MitochondrialVariant {
            reference_accession,
            ..
        }
        | HgvsVariant::CdsVariant {
            reference_accession,
            ..
        }
        | HgvsVariant::TranscriptVariant {
            reference_accession,
            ..
        }
        | HgvsVariant::RnaVariant {
            reference_accession,
            ..
        }
        | HgvsVariant::ProteinVariant {
            reference_accession,
            ..
        } = self
        {
            if let Some(reference_accession) = reference_accession {
                write!(f, ":{}", reference_accession)?;
            }
        }
        write!(f, ":{}.", self.kind())?;
        match self {
            HgvsVariant::GenomeVariant { loc_edit, .. } => write!(f, "{}", loc_edit),
            HgvsVariant::MitochondrialVariant { loc_edit, .. } => write!(f, "{}", loc_edit),
            HgvsVariant::CdsVariant { loc_edit, .. } => write!(f, "{}", loc_edit),
            HgvsVariant::TranscriptVariant { loc_edit, .. } => write!(f, "{}", loc_edit),
            HgvsVariant::RnaVariant { loc_edit, .. } => write!(f, "{}", loc_edit),
            HgvsVariant::ProteinVariant { loc_edit, .. } => write!(f, "{}", loc_edit),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::coords::{CdsAnchor, HgvsTranscriptPos, Interval, Uncertain};

    #[test]
    fn na_edit_substitution() {
        assert_eq!(
            format!(
                "{}",
                NaEdit::Substitution {
                    reference: "A".to_string(),
                    alternative: "G".to_string()
                }
            ),
            "A>G"
        );
    }

    #[test]
    fn na_edit_deletion_without_sequence() {
        assert_eq!(format!("{}", NaEdit::Deletion { reference: None }), "del");
    }

    #[test]
    fn protein_edit_frameshift() {
        assert_eq!(
            format!(
                "{}",
                ProteinEdit::Fs {
                    alternative: Some("Pro".to_string()),
                    terminal: Some("Ter".to_string()),
                    length: UncertainChange::Known(23),
                }
            ),
            "ProfsTer23"
        );
    }

    #[test]
    fn cds_variant_round_trips_to_input() {
        let variant = HgvsVariant::CdsVariant {
            accession: Accession {
                value: "NM_000051.3".to_string(),
            },
            reference_accession: None,
            gene_symbol: None,
            loc_edit: LocEdit {
                loc: Uncertain::Certain(Interval::single(HgvsTranscriptPos::exonic(
                    CdsAnchor::Start,
                    123,
                ))),
                edit: Uncertain::Certain(NaEdit::Substitution {
                    reference: "A".to_string(),
                    alternative: "G".to_string(),
                }),
            },
        };
        assert_eq!(format!("{}", variant), "NM_000051.3:c.123A>G");
    }

    #[test]
    fn protein_variant_predicted_wraps_whole_consequence() {
        let variant = HgvsVariant::ProteinVariant {
            accession: Accession {
                value: "NP_000042.3".to_string(),
            },
            reference_accession: None,
            gene_symbol: None,
            loc_edit: ProteinLocEdit::Ordinary {
                pos: Interval::single(ProteinPosition {
                    aa: "Gln".to_string(),
                    pos: crate::coords::HgvsProteinPos(4),
                }),
                edit: ProteinEdit::Subst {
                    alternative: "Ter".to_string(),
                },
                predicted: true,
            },
        };
        assert_eq!(format!("{}", variant), "NP_000042.3:p.(Gln4Ter)");
    }
}
