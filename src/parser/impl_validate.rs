//! Provide implementation of intrinsic validation to data structures.
//!
//! Only checks expressible from the variant description alone (the Rust
//! type system already fends off most of what the Python source had to
//! check at runtime, e.g. mixing coordinate kinds). Checks that need the
//! reference sequence or a transcript model live in
//! `crate::validator::ExtrinsicValidator` instead.

use crate::validator::Error;
use crate::validator::Validateable;

use super::ds::{HgvsVariant, NaEdit, ProteinEdit, ProteinLocEdit, UncertainChange};
use crate::coords::Interval;

impl<P> Validateable for Interval<P>
where
    P: PartialOrd + std::fmt::Debug,
{
    fn validate(&self) -> Result<(), Error> {
        if self.start > self.end {
            Err(Error::StartMustBeLessThanEnd(format!("{:?}", self)))
        } else {
            Ok(())
        }
    }
}

impl Validateable for NaEdit {
    fn validate(&self) -> Result<(), Error> {
        match self {
            NaEdit::Identity | NaEdit::Inversion => Ok(()),
            NaEdit::Substitution {
                reference,
                alternative,
            } => {
                if reference.is_empty() && alternative.is_empty() {
                    Err(Error::RefOrAltMustBeNonEmpty(format!("{:?}", self)))
                } else {
                    Ok(())
                }
            }
            NaEdit::Deletion { .. } | NaEdit::Duplication { .. } => Ok(()),
            NaEdit::Insertion { alternative } | NaEdit::Delins { alternative } => {
                if alternative.is_empty() {
                    Err(Error::AlternativeMustBeNonEmpty(format!("{:?}", self)))
                } else {
                    Ok(())
                }
            }
            NaEdit::Repeat { count, .. } => {
                if *count < 1 {
                    Err(Error::RepeatCountNotPositive(format!("{:?}", self)))
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl Validateable for ProteinEdit {
    fn validate(&self) -> Result<(), Error> {
        match self {
            ProteinEdit::Fs {
                length: UncertainChange::Known(n),
                ..
            } => {
                if *n < 1 {
                    Err(Error::FrameshiftDistanceNotPositive(format!("{:?}", self)))
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }
}

impl<P> Validateable for super::ds::LocEdit<P>
where
    P: PartialOrd + std::fmt::Debug + Clone,
{
    fn validate(&self) -> Result<(), Error> {
        self.loc.inner().validate()?;
        self.edit.inner().validate()
    }
}

impl Validateable for ProteinLocEdit {
    fn validate(&self) -> Result<(), Error> {
        match self {
            ProteinLocEdit::Ordinary { pos, edit, .. } => {
                pos.validate()?;
                edit.validate()
            }
            ProteinLocEdit::NoChange
            | ProteinLocEdit::NoChangeUncertain
            | ProteinLocEdit::NoProtein
            | ProteinLocEdit::NoProteinUncertain => Ok(()),
        }
    }
}

impl Validateable for HgvsVariant {
    fn validate(&self) -> Result<(), Error> {
        match self {
            HgvsVariant::GenomeVariant { loc_edit, .. } => loc_edit.validate(),
            HgvsVariant::MitochondrialVariant { loc_edit, .. } => loc_edit.validate(),
            HgvsVariant::CdsVariant { loc_edit, .. } => loc_edit.validate(),
            HgvsVariant::TranscriptVariant { loc_edit, .. } => loc_edit.validate(),
            HgvsVariant::RnaVariant { loc_edit, .. } => loc_edit.validate(),
            HgvsVariant::ProteinVariant { loc_edit, .. } => loc_edit.validate(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coords::{CdsAnchor, HgvsTranscriptPos};
    use crate::parser::ds::Accession;
    use crate::parser::ds::LocEdit;
    use crate::coords::Uncertain;

    #[test]
    fn substitution_requires_ref_or_alt() {
        let edit = NaEdit::Substitution {
            reference: String::new(),
            alternative: String::new(),
        };
        assert!(edit.validate().is_err());
    }

    #[test]
    fn repeat_count_must_be_positive() {
        let edit = NaEdit::Repeat {
            unit: "CAG".to_string(),
            count: 0,
        };
        assert!(edit.validate().is_err());
    }

    #[test]
    fn cds_variant_rejects_start_after_end() {
        let loc_edit = LocEdit {
            loc: Uncertain::Certain(Interval {
                start: HgvsTranscriptPos::exonic(CdsAnchor::Start, 10),
                end: HgvsTranscriptPos::exonic(CdsAnchor::Start, 5),
            }),
            edit: Uncertain::Certain(NaEdit::Identity),
        };
        let variant = HgvsVariant::CdsVariant {
            accession: Accession {
                value: "NM_1.1".to_string(),
            },
            reference_accession: None,
            gene_symbol: None,
            loc_edit,
        };
        assert!(variant.validate().is_err());
    }
}
