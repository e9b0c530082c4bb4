//! Implementation of operations on the data structures that need a
//! [`crate::data::DataProvider`] to complete (as opposed to `impl_parse`,
//! `display` and `impl_validate`, which only need the AST itself).

use crate::data::DataProvider;
use crate::coords::{to_zero_based, CdsAnchor, GenomicPos, HgvsGenomicPos};
use crate::data::IdentifierType;

use super::ds::{HgvsVariant, NaEdit, Uncertain};

impl HgvsVariant {
    /// Fill in an omitted reference sequence (`del`/`dup` written without an
    /// explicit sequence) from the data provider, so downstream consumers
    /// (the mapper's `replace_reference`, the equivalence engine's
    /// projection step) always have a concrete sequence to work with.
    ///
    /// Leaves the variant unchanged if the edit already carries a sequence,
    /// is not a `Deletion`/`Duplication`, or is a protein variant (protein
    /// `del`/`dup` never carry a sequence in the grammar).
    pub fn fill_ref(&self, provider: &dyn DataProvider) -> Result<Self, crate::data::Error> {
        let mut out = self.clone();
        let (kind, accession) = (out.kind(), out.accession().value.clone());
        let filled = match &mut out {
            HgvsVariant::GenomeVariant { loc_edit, .. }
            | HgvsVariant::MitochondrialVariant { loc_edit, .. } => {
                fill_genomic_loc_edit(loc_edit, provider, &accession, kind)?
            }
            HgvsVariant::CdsVariant { loc_edit, .. }
            | HgvsVariant::TranscriptVariant { loc_edit, .. }
            | HgvsVariant::RnaVariant { loc_edit, .. } => {
                // Transcript-space `del`/`dup` sequences are only inferable
                // with a transcript model (to turn `c.`/`n.` coordinates
                // into a sequence window), which this crate's mapper layer
                // owns; at the parser layer we can only fill genomic and
                // protein variants directly against a provider keyed by
                // accession.
                let _ = loc_edit;
                false
            }
            HgvsVariant::ProteinVariant { .. } => false,
        };
        let _ = filled;
        Ok(out)
    }
}

fn fill_genomic_loc_edit(
    loc_edit: &mut super::ds::LocEdit<HgvsGenomicPos>,
    provider: &dyn DataProvider,
    accession: &str,
    _kind: char,
) -> Result<bool, crate::data::Error> {
    let interval = loc_edit.loc.inner().clone();
    let start: GenomicPos = interval.start.into();
    let end: GenomicPos = interval.end.into();

    let needs_fill = matches!(
        loc_edit.edit.inner(),
        NaEdit::Deletion { reference: None } | NaEdit::Duplication { reference: None }
    );
    if !needs_fill {
        return Ok(false);
    }

    let seq = provider.get_seq(accession, start.0, end.0 + 1, IdentifierType::GenomicAccession)?;

    let new_edit = match loc_edit.edit.inner().clone() {
        NaEdit::Deletion { .. } => NaEdit::Deletion {
            reference: Some(seq),
        },
        NaEdit::Duplication { .. } => NaEdit::Duplication {
            reference: Some(seq),
        },
        other => other,
    };
    loc_edit.edit = match &loc_edit.edit {
        Uncertain::Certain(_) => Uncertain::Certain(new_edit),
        Uncertain::Uncertain(_) => Uncertain::Uncertain(new_edit),
    };
    Ok(true)
}

/// Whether `anchor` participates in the start codon's side of the CDS
/// (used by [`crate::validator`] to reject nonsensical combinations, e.g. a
/// `*`-anchored position with a negative base). Kept here rather than in
/// `coords` since it is a validation concern, not an arithmetic one.
pub fn is_five_prime_utr(anchor: CdsAnchor, base: i64) -> bool {
    matches!(anchor, CdsAnchor::Start) && to_zero_based(base) < 0
}

#[cfg(test)]
mod test {
    use super::*;

    struct FakeProvider;

    impl DataProvider for FakeProvider {
        fn get_transcript(
            &self,
            _transcript_ac: &str,
            _reference_ac: Option<&str>,
        ) -> Result<crate::data::TranscriptData, crate::data::Error> {
            unimplemented!()
        }

        fn get_seq(
            &self,
            _ac: &str,
            start: i64,
            end: i64,
            _kind: IdentifierType,
        ) -> Result<String, crate::data::Error> {
            Ok("A".repeat((end - start).max(0) as usize))
        }

        fn get_symbol_accessions(
            &self,
            _symbol: &str,
            _source_kind: IdentifierType,
            _target_kind: IdentifierType,
        ) -> Result<Vec<(IdentifierType, String)>, crate::data::Error> {
            Ok(vec![])
        }

        fn get_identifier_type(&self, _identifier: &str) -> IdentifierType {
            IdentifierType::Unknown
        }
    }

    #[test]
    fn fill_ref_fills_omitted_deletion_sequence() {
        let variant = crate::parser::parse("NC_000001.1:g.10del").unwrap();
        let filled = variant.fill_ref(&FakeProvider).unwrap();
        match filled {
            HgvsVariant::GenomeVariant { loc_edit, .. } => {
                assert_eq!(
                    loc_edit.edit.inner(),
                    &NaEdit::Deletion {
                        reference: Some("A".to_string())
                    }
                );
            }
            other => panic!("expected GenomeVariant, got {:?}", other),
        }
    }
}
