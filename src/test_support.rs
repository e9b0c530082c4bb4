//! Shared `DataProvider` test fixture, reused by the mapper, normalizer and
//! equivalence engine's unit tests.
//!
//! Grounded on `hgvs-rs`'s `mapper::variant::tests::sanity_mock::Provider`,
//! the teacher's own struct-backed mock `Provider` used only under
//! `#[cfg(test)]`; centralized here (rather than duplicated per module, or
//! reached into across `#[cfg(test)]` module boundaries) since three
//! modules need the identical fixture.
#![cfg(test)]

use std::rc::Rc;

use crate::coords::Strand;
use crate::data::{DataProvider, Error as DataError, Exon, IdentifierType, TranscriptData};
use crate::sequences::{pad_window, revcomp};

/// `ATG AAA TAA` = Met, Lys, Ter. No UTR: `cds_start_index == 0`.
pub(crate) const PLUS_TX_SEQ: &str = "ATGAAATAA";
pub(crate) const PLUS_TRANSCRIPT_AC: &str = "NM_TEST.1";
pub(crate) const PLUS_GENOMIC_AC: &str = "NC_TEST.1";
pub(crate) const PLUS_PROTEIN_AC: &str = "NP_TEST.1";
/// Translation of [`PLUS_TX_SEQ`]'s CDS (`Met Lys Ter`), one-letter, stop included.
pub(crate) const PLUS_PROTEIN_SEQ: &str = "MK*";
pub(crate) const GENE_SYMBOL: &str = "TESTGENE";

pub(crate) const MINUS_TX_SEQ: &str = "ATGAAATAA";
pub(crate) const MINUS_TRANSCRIPT_AC: &str = "NM_TEST.2";
pub(crate) const MINUS_GENOMIC_AC: &str = "NC_TEST.2";

pub(crate) struct FixtureProvider;

impl DataProvider for FixtureProvider {
    fn get_transcript(&self, transcript_ac: &str, _reference_ac: Option<&str>) -> Result<TranscriptData, DataError> {
        match transcript_ac {
            PLUS_TRANSCRIPT_AC => Ok(TranscriptData {
                transcript_ac: PLUS_TRANSCRIPT_AC.to_string(),
                reference_ac: PLUS_GENOMIC_AC.to_string(),
                protein_ac: Some(PLUS_PROTEIN_AC.to_string()),
                strand: Strand::Plus,
                cds_start_index: 0,
                cds_end_index: 8,
                exons: vec![Exon {
                    transcript_start: 0,
                    transcript_end: 9,
                    reference_start: 1000,
                    reference_end: 1008,
                }],
            }),
            MINUS_TRANSCRIPT_AC => Ok(TranscriptData {
                transcript_ac: MINUS_TRANSCRIPT_AC.to_string(),
                reference_ac: MINUS_GENOMIC_AC.to_string(),
                protein_ac: None,
                strand: Strand::Minus,
                cds_start_index: 0,
                cds_end_index: 8,
                exons: vec![Exon {
                    transcript_start: 0,
                    transcript_end: 9,
                    reference_start: 2000,
                    reference_end: 2008,
                }],
            }),
            other => Err(DataError::NotFound(other.to_string())),
        }
    }

    fn get_seq(&self, ac: &str, start: i64, end: i64, _kind: IdentifierType) -> Result<String, DataError> {
        match ac {
            PLUS_TRANSCRIPT_AC => Ok(pad_window(PLUS_TX_SEQ, start, end, PLUS_TX_SEQ.len() as i64)),
            PLUS_GENOMIC_AC => Ok(pad_window(PLUS_TX_SEQ, start - 1000, end - 1000, PLUS_TX_SEQ.len() as i64)),
            // `ATG AAA TAA` translates to `Met Lys Ter`; one-letter with the
            // stop codon included, as `Mapper::c_to_p` itself would fetch.
            PLUS_PROTEIN_AC => Ok(pad_window(PLUS_PROTEIN_SEQ, start, end, PLUS_PROTEIN_SEQ.len() as i64)),
            MINUS_TRANSCRIPT_AC => Ok(pad_window(MINUS_TX_SEQ, start, end, MINUS_TX_SEQ.len() as i64)),
            MINUS_GENOMIC_AC => {
                // The genomic plus strand, read low-to-high coordinate, is
                // the reverse complement of the (minus-strand) transcript.
                let plus_strand_seq = revcomp(MINUS_TX_SEQ);
                Ok(pad_window(&plus_strand_seq, start - 2000, end - 2000, MINUS_TX_SEQ.len() as i64))
            }
            other => Err(DataError::NotFound(other.to_string())),
        }
    }

    fn get_symbol_accessions(
        &self,
        symbol: &str,
        _source_kind: IdentifierType,
        target_kind: IdentifierType,
    ) -> Result<Vec<(IdentifierType, String)>, DataError> {
        if symbol != GENE_SYMBOL {
            return Ok(vec![]);
        }
        Ok(match target_kind {
            IdentifierType::TranscriptAccession => {
                vec![(IdentifierType::TranscriptAccession, PLUS_TRANSCRIPT_AC.to_string())]
            }
            IdentifierType::GenomicAccession => {
                vec![(IdentifierType::GenomicAccession, PLUS_GENOMIC_AC.to_string())]
            }
            IdentifierType::ProteinAccession => {
                vec![(IdentifierType::ProteinAccession, PLUS_PROTEIN_AC.to_string())]
            }
            _ => vec![],
        })
    }

    fn get_identifier_type(&self, identifier: &str) -> IdentifierType {
        if identifier == GENE_SYMBOL {
            IdentifierType::GeneSymbol
        } else if identifier.starts_with("NM_") {
            IdentifierType::TranscriptAccession
        } else if identifier.starts_with("NC_") {
            IdentifierType::GenomicAccession
        } else if identifier.starts_with("NP_") {
            IdentifierType::ProteinAccession
        } else {
            IdentifierType::Unknown
        }
    }
}

pub(crate) fn provider() -> Rc<dyn DataProvider> {
    Rc::new(FixtureProvider)
}
