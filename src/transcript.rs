//! The transcript model: exon structure, CDS boundaries, and the
//! position-lookup index the mapper needs for O(log n) exon lookup.
//!
//! Grounded on `hgvs-rs`'s `mapper::alignment::Mapper`, which builds an
//! equivalent exon-boundary structure from a CIGAR alignment; this crate's
//! `DataProvider` already hands back ungapped, per-exon reference
//! coordinates (`spec.md` §3.3), so no CIGAR parsing is needed here.

use thiserror::Error;

use crate::coords::{CdsAnchor, GenomicPos, HgvsTranscriptPos, Strand, TranscriptPos};
use crate::data::{Exon, TranscriptData};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("transcript {0} has no exons")]
    NoExons(String),
    #[error("exons of {0} are not contiguous in transcript coordinates")]
    ExonsNotContiguous(String),
    #[error("exon of {0} has mismatched transcript/reference lengths ({1} vs {2})")]
    ExonLengthMismatch(String, i64, i64),
    #[error("CDS bounds [{0}, {1}] are outside the transcript (length {2})")]
    CdsOutOfBounds(i64, i64, i64),
    #[error("position {0} is outside the transcript (length {1})")]
    PositionOutOfBounds(i64, i64),
    #[error("position {0} does not fall within any exon and has no intronic offset to anchor it")]
    NotExonic(i64),
    #[error("genomic position {0} is not covered by any exon of {1}")]
    NoExonForGenomicPos(i64, String),
}

/// Where a genomic position falls relative to a transcript's exon structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenomicLocation {
    /// Inside an exon, at this dense transcript position.
    Exonic(TranscriptPos),
    /// Inside an intron: `anchor` is the nearest exon-boundary transcript
    /// position and `genomic_offset` is the (unsigned-direction) distance
    /// from that boundary to the query position along the genome. The
    /// caller applies the strand-dependent sign to get an HGVS `+`/`-`
    /// offset (see [`crate::mapper::variant`]).
    Intronic {
        anchor: TranscriptPos,
        genomic_offset: i64,
    },
}

/// A transcript's exon/CDS structure plus a precomputed lookup index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptModel {
    data: TranscriptData,
    /// Exon indices (into `data.exons`) sorted by ascending genomic start,
    /// built once so genomic lookups are a binary search regardless of
    /// strand (exon order in `data.exons` is transcript order, which runs
    /// in the opposite genomic direction for minus-strand transcripts).
    genomic_order: Vec<usize>,
}

impl TranscriptModel {
    pub fn new(data: TranscriptData) -> Result<Self, Error> {
        if data.exons.is_empty() {
            return Err(Error::NoExons(data.transcript_ac));
        }
        for exon in &data.exons {
            if exon.transcript_len() != exon.reference_len() {
                return Err(Error::ExonLengthMismatch(
                    data.transcript_ac,
                    exon.transcript_len(),
                    exon.reference_len(),
                ));
            }
        }
        for pair in data.exons.windows(2) {
            if pair[0].transcript_end != pair[1].transcript_start {
                return Err(Error::ExonsNotContiguous(data.transcript_ac));
            }
        }
        let tx_len = data.exons.last().unwrap().transcript_end;
        if data.cds_start_index < 0
            || data.cds_end_index < data.cds_start_index
            || data.cds_end_index >= tx_len
        {
            return Err(Error::CdsOutOfBounds(
                data.cds_start_index,
                data.cds_end_index,
                tx_len,
            ));
        }

        let mut genomic_order: Vec<usize> = (0..data.exons.len()).collect();
        genomic_order.sort_by_key(|&i| data.exons[i].reference_start);

        Ok(Self { data, genomic_order })
    }

    pub fn transcript_ac(&self) -> &str {
        &self.data.transcript_ac
    }

    pub fn reference_ac(&self) -> &str {
        &self.data.reference_ac
    }

    pub fn protein_ac(&self) -> Option<&str> {
        self.data.protein_ac.as_deref()
    }

    pub fn strand(&self) -> Strand {
        self.data.strand
    }

    pub fn exons(&self) -> &[Exon] {
        &self.data.exons
    }

    pub fn transcript_len(&self) -> i64 {
        self.data.exons.last().expect("validated non-empty").transcript_end
    }

    pub fn cds_start_index(&self) -> TranscriptPos {
        TranscriptPos(self.data.cds_start_index)
    }

    pub fn cds_end_index(&self) -> TranscriptPos {
        TranscriptPos(self.data.cds_end_index)
    }

    /// Map a dense exonic transcript position to its genomic position.
    pub fn transcript_to_genomic(&self, pos: TranscriptPos) -> Result<GenomicPos, Error> {
        let tx_len = self.transcript_len();
        if pos.0 < 0 || pos.0 >= tx_len {
            return Err(Error::PositionOutOfBounds(pos.0, tx_len));
        }
        let exon = self
            .data
            .exons
            .iter()
            .find(|e| pos.0 >= e.transcript_start && pos.0 < e.transcript_end)
            .ok_or(Error::NotExonic(pos.0))?;
        let offset = pos.0 - exon.transcript_start;
        let g = match self.data.strand {
            Strand::Plus => exon.reference_start + offset,
            Strand::Minus => exon.reference_end - offset,
        };
        Ok(GenomicPos(g))
    }

    /// Classify a genomic position as exonic or intronic for this transcript,
    /// via binary search over exons in genomic order.
    pub fn locate_genomic(&self, pos: GenomicPos) -> GenomicLocation {
        let exons = &self.data.exons;
        let order = &self.genomic_order;

        // Binary search for the exon whose [reference_start, reference_end]
        // contains `pos`, or the insertion point among genomic-sorted exons.
        let idx = order.partition_point(|&i| exons[i].reference_end < pos.0);

        if idx < order.len() {
            let e = &exons[order[idx]];
            if pos.0 >= e.reference_start && pos.0 <= e.reference_end {
                let offset = pos.0 - e.reference_start;
                let tx_offset = match self.data.strand {
                    Strand::Plus => offset,
                    Strand::Minus => e.reference_end - pos.0,
                };
                return GenomicLocation::Exonic(TranscriptPos(e.transcript_start + tx_offset));
            }
        }

        // Intronic: anchor to whichever flanking exon boundary is nearer,
        // ties favoring the upstream (5') exon. Recorded as an Open
        // Question resolution in DESIGN.md.
        let prev = if idx > 0 { Some(&exons[order[idx - 1]]) } else { None };
        let next = if idx < order.len() { Some(&exons[order[idx]]) } else { None };

        let prev_candidate = prev.map(|e| {
            let dist = pos.0 - e.reference_end;
            let anchor_tx = match self.data.strand {
                Strand::Plus => e.transcript_end - 1,
                Strand::Minus => e.transcript_start,
            };
            (anchor_tx, dist)
        });
        let next_candidate = next.map(|e| {
            let dist = e.reference_start - pos.0;
            let anchor_tx = match self.data.strand {
                Strand::Plus => e.transcript_start,
                Strand::Minus => e.transcript_end - 1,
            };
            (anchor_tx, dist)
        });

        let (anchor_tx, dist) = match (prev_candidate, next_candidate) {
            (Some(p), Some(n)) => {
                if p.1 <= n.1 {
                    p
                } else {
                    n
                }
            }
            (Some(p), None) => p,
            (None, Some(n)) => n,
            (None, None) => unreachable!("validated non-empty exon list"),
        };

        GenomicLocation::Intronic {
            anchor: TranscriptPos(anchor_tx),
            genomic_offset: dist,
        }
    }
}

/// Convert a `c.`-style [`HgvsTranscriptPos`] anchor (ignoring its intronic
/// offset) to a dense, 0-based [`TranscriptPos`], using the transcript's CDS
/// start as the origin. This is pure arithmetic (no exon lookup): whether
/// the resulting dense position is actually exonic is checked by the
/// caller via [`TranscriptModel::transcript_to_genomic`].
pub fn cds_anchor_to_dense(
    anchor: CdsAnchor,
    base: i64,
    cds_start_index: TranscriptPos,
    cds_end_index: TranscriptPos,
) -> TranscriptPos {
    match anchor {
        CdsAnchor::Start => TranscriptPos(cds_start_index.0 + crate::coords::to_zero_based(base)),
        CdsAnchor::End => TranscriptPos(cds_end_index.0 + base),
    }
}

/// Inverse of [`cds_anchor_to_dense`]: express a dense transcript position
/// as a `c.`-style anchor (base number only; caller supplies any intronic
/// offset separately).
pub fn dense_to_cds_anchor(
    pos: TranscriptPos,
    cds_start_index: TranscriptPos,
    cds_end_index: TranscriptPos,
) -> (CdsAnchor, i64) {
    if pos.0 > cds_end_index.0 {
        (CdsAnchor::End, pos.0 - cds_end_index.0)
    } else {
        (
            CdsAnchor::Start,
            crate::coords::from_zero_based(pos.0 - cds_start_index.0),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plus_strand_model() -> TranscriptModel {
        // Two exons, CDS starts 5 bases into exon 1, single intron of length 4.
        TranscriptModel::new(TranscriptData {
            transcript_ac: "NM_TEST.1".into(),
            reference_ac: "NC_TEST.1".into(),
            protein_ac: Some("NP_TEST.1".into()),
            strand: Strand::Plus,
            cds_start_index: 5,
            cds_end_index: 19,
            exons: vec![
                Exon {
                    transcript_start: 0,
                    transcript_end: 10,
                    reference_start: 1000,
                    reference_end: 1009,
                },
                Exon {
                    transcript_start: 10,
                    transcript_end: 25,
                    reference_start: 1014,
                    reference_end: 1028,
                },
            ],
        })
        .unwrap()
    }

    fn minus_strand_model() -> TranscriptModel {
        TranscriptModel::new(TranscriptData {
            transcript_ac: "NM_TEST.2".into(),
            reference_ac: "NC_TEST.1".into(),
            protein_ac: None,
            strand: Strand::Minus,
            cds_start_index: 5,
            cds_end_index: 19,
            exons: vec![
                Exon {
                    transcript_start: 0,
                    transcript_end: 10,
                    reference_start: 2020,
                    reference_end: 2029,
                },
                Exon {
                    transcript_start: 10,
                    transcript_end: 25,
                    reference_start: 2000,
                    reference_end: 2014,
                },
            ],
        })
        .unwrap()
    }

    #[test]
    fn exonic_round_trip_plus_strand() {
        let m = plus_strand_model();
        for tx in [0, 5, 9, 10, 24] {
            let g = m.transcript_to_genomic(TranscriptPos(tx)).unwrap();
            match m.locate_genomic(g) {
                GenomicLocation::Exonic(back) => assert_eq!(back.0, tx),
                GenomicLocation::Intronic { .. } => panic!("expected exonic"),
            }
        }
    }

    #[test]
    fn exonic_round_trip_minus_strand() {
        let m = minus_strand_model();
        for tx in [0, 5, 9, 10, 24] {
            let g = m.transcript_to_genomic(TranscriptPos(tx)).unwrap();
            match m.locate_genomic(g) {
                GenomicLocation::Exonic(back) => assert_eq!(back.0, tx),
                GenomicLocation::Intronic { .. } => panic!("expected exonic"),
            }
        }
    }

    #[test]
    fn intronic_position_anchors_to_nearer_boundary() {
        let m = plus_strand_model();
        // Intron spans genomic 1010..=1013 (exclusive of exon ends).
        match m.locate_genomic(GenomicPos(1010)) {
            GenomicLocation::Intronic { anchor, genomic_offset } => {
                assert_eq!(anchor.0, 9); // last exonic base of exon 1
                assert_eq!(genomic_offset, 1);
            }
            _ => panic!("expected intronic"),
        }
        match m.locate_genomic(GenomicPos(1013)) {
            GenomicLocation::Intronic { anchor, genomic_offset } => {
                assert_eq!(anchor.0, 10); // first exonic base of exon 2
                assert_eq!(genomic_offset, 1);
            }
            _ => panic!("expected intronic"),
        }
    }

    #[test]
    fn cds_anchor_round_trip() {
        let cds_start = TranscriptPos(5);
        let cds_end = TranscriptPos(19);
        for base in [-3, -1, 1, 1, 14] {
            let dense = cds_anchor_to_dense(CdsAnchor::Start, base, cds_start, cds_end);
            let (anchor, back) = dense_to_cds_anchor(dense, cds_start, cds_end);
            assert_eq!(anchor, CdsAnchor::Start);
            assert_eq!(back, base);
        }
    }
}
