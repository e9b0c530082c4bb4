//! Definition of the interface for accessing transcript models and reference
//! sequence. This is the one boundary the CORE does not implement itself —
//! see `spec.md` §6.1; concrete providers (UTA, seqrepo, cdot/GFF/FASTA
//! loaders) are external collaborators.
//!
//! Narrowed from `hgvs-rs`'s eleven-method, UTA-shaped `data::interface::Provider`
//! down to the four operations the CORE actually needs, per the spec.

pub mod error;

pub use error::Error;

use crate::coords::Strand;

/// Classification of an accession or gene-symbol string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierType {
    GeneSymbol,
    TranscriptAccession,
    GenomicAccession,
    ProteinAccession,
    Unknown,
}

/// One exon of a transcript alignment.
///
/// `transcript_start`/`transcript_end` are a half-open `[start, end)` range
/// in dense transcript coordinates; `reference_start`/`reference_end` are a
/// closed `[start, end]` range in dense reference-genome coordinates (this
/// mixed convention is specified verbatim in `spec.md` §3.3). The CORE only
/// supports ungapped (colinear) exon alignments: the two spans must have
/// equal length, checked in [`crate::transcript::TranscriptModel::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exon {
    pub transcript_start: i64,
    pub transcript_end: i64,
    pub reference_start: i64,
    pub reference_end: i64,
}

impl Exon {
    pub fn transcript_len(&self) -> i64 {
        self.transcript_end - self.transcript_start
    }

    pub fn reference_len(&self) -> i64 {
        self.reference_end - self.reference_start + 1
    }
}

/// Transcript model as returned by a [`DataProvider`]: exon structure, CDS
/// bounds, strand, and the accessions needed to round-trip through `g.`/`c.`/`p.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptData {
    pub transcript_ac: String,
    pub reference_ac: String,
    pub protein_ac: Option<String>,
    pub strand: Strand,
    /// 0-based inclusive `TranscriptPos` of the first base of the start codon.
    pub cds_start_index: i64,
    /// 0-based inclusive `TranscriptPos` of the last base of the stop codon.
    pub cds_end_index: i64,
    /// Exons in transcript order (increasing `transcript_start`).
    pub exons: Vec<Exon>,
}

/// Interface for accessing transcript models and reference sequence.
///
/// Implementations are free to cache aggressively below this boundary (see
/// `spec.md` §9, "cache at the DataProvider layer, never inside the
/// mapper"); the CORE never does so itself. An implementation that is
/// internally synchronized may be shared across threads (`Send + Sync`),
/// matching `spec.md` §5's thread-safety contract.
pub trait DataProvider: Send + Sync {
    /// Return the transcript model for `transcript_ac`, aligned against
    /// `reference_ac` if given (otherwise the provider's default alignment
    /// target). Fails with [`Error::NotFound`] if unknown.
    fn get_transcript(
        &self,
        transcript_ac: &str,
        reference_ac: Option<&str>,
    ) -> Result<TranscriptData, Error>;

    /// Return the half-open `[start, end)` subsequence of `ac`, in DNA
    /// alphabet for genomic/transcript accessions and protein alphabet for
    /// protein accessions. Fails with [`Error::NotFound`] or
    /// [`Error::OutOfRange`].
    fn get_seq(&self, ac: &str, start: i64, end: i64, kind: IdentifierType) -> Result<String, Error>;

    /// Resolve a gene symbol to the concrete accessions of `target_kind`
    /// associated with it, given that the symbol itself was classified as
    /// `source_kind` (almost always [`IdentifierType::GeneSymbol`]).
    fn get_symbol_accessions(
        &self,
        symbol: &str,
        source_kind: IdentifierType,
        target_kind: IdentifierType,
    ) -> Result<Vec<(IdentifierType, String)>, Error>;

    /// Classify a bare identifier string. Never fails: unrecognized input
    /// classifies as [`IdentifierType::Unknown`].
    fn get_identifier_type(&self, identifier: &str) -> IdentifierType;
}
