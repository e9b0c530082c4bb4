//! 3'-shift normalization of nucleic-acid variants.
//!
//! Grounded on `hgvs-rs`'s `normalizer::Normalizer`, which shuffles an
//! indel's boundaries to the most 3' (or most 5') equivalent position
//! within a window of reference sequence before two variants are compared
//! or one is reported back to a caller. This crate's narrower
//! [`crate::data::DataProvider`] has no intron-sequence accessor, so unlike
//! the teacher this normalizer only shifts purely exonic `c.`/`n.`/`r.`
//! variants and the whole-chromosome `g.`/`m.` kinds; an intronic position
//! is returned unchanged rather than guessed at.

use log::debug;
use std::rc::Rc;
use thiserror::Error;

use crate::coords::{GenomicPos, HgvsGenomicPos, HgvsTranscriptPos, Interval, TranscriptPos, Uncertain};
use crate::data::{DataProvider, Error as DataError, IdentifierType};
use crate::parser::{HgvsVariant, LocEdit, NaEdit};
use crate::sequences::{revcomp, trim_common_prefixes, trim_common_suffixes};
use crate::transcript::{cds_anchor_to_dense, dense_to_cds_anchor, TranscriptModel};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("problem accessing data")]
    Data(#[from] DataError),
    #[error("problem building transcript model")]
    Transcript(#[from] crate::transcript::Error),
    #[error("cannot normalize a protein-level variant")]
    ProteinVariant,
}

/// Which way an indel is shuffled to its canonical position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Shift towards the 5' end of the sequence.
    ThreeToFive,
    /// Shift towards the 3' end of the sequence; HGVS's "most 3'" rule.
    FiveToThree,
}

/// Configuration for the normalizer.
#[derive(Debug, Clone)]
pub struct Config {
    pub shuffle_direction: Direction,
    /// Bases of reference sequence fetched on each side of the edit before
    /// shifting. Widened to `max_window` once if the shift runs off the
    /// edge of this window.
    pub window_size: i64,
    /// Upper bound on the widened window from the above.
    pub max_window: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shuffle_direction: Direction::FiveToThree,
            window_size: 50,
            max_window: 500,
        }
    }
}

/// Normalizes variants by 5'/3' shifting within a reference window.
pub struct Normalizer {
    config: Config,
    provider: Rc<dyn DataProvider>,
}

impl Normalizer {
    pub fn new(config: Config, provider: Rc<dyn DataProvider>) -> Self {
        Self { config, provider }
    }

    pub fn normalize(&self, var: &HgvsVariant) -> Result<HgvsVariant, Error> {
        match var {
            HgvsVariant::GenomeVariant { .. } | HgvsVariant::MitochondrialVariant { .. } => {
                self.normalize_genomic(var)
            }
            HgvsVariant::CdsVariant { .. }
            | HgvsVariant::TranscriptVariant { .. }
            | HgvsVariant::RnaVariant { .. } => self.normalize_transcript(var),
            HgvsVariant::ProteinVariant { .. } => Err(Error::ProteinVariant),
        }
    }

    fn normalize_genomic(&self, var: &HgvsVariant) -> Result<HgvsVariant, Error> {
        let (accession, reference_accession, gene_symbol, loc_edit) = match var {
            HgvsVariant::GenomeVariant {
                accession,
                reference_accession,
                gene_symbol,
                loc_edit,
            }
            | HgvsVariant::MitochondrialVariant {
                accession,
                reference_accession,
                gene_symbol,
                loc_edit,
            } => (accession, reference_accession, gene_symbol, loc_edit),
            _ => unreachable!("matched by caller"),
        };

        if loc_edit.loc.is_uncertain() || loc_edit.edit.is_uncertain() {
            debug!("skipping normalization of uncertain variant {}", var);
            return Ok(var.clone());
        }

        let interval = loc_edit.loc.inner();
        let edit = loc_edit.edit.inner();
        let dense_start: GenomicPos = interval.start.into();
        let dense_end: GenomicPos = interval.end.into();
        let (half_open_start, half_open_end) = match edit {
            NaEdit::Insertion { .. } => (dense_start.0 + 1, dense_start.0 + 1),
            _ => (dense_start.0, dense_end.0 + 1),
        };

        let (new_start, new_end, new_edit) =
            self.shift(&accession.value, IdentifierType::GenomicAccession, half_open_start, half_open_end, edit)?;

        let new_interval = if matches!(new_edit, NaEdit::Insertion { .. }) {
            Interval {
                start: HgvsGenomicPos::from(GenomicPos(new_start - 1)),
                end: HgvsGenomicPos::from(GenomicPos(new_start)),
            }
        } else {
            Interval {
                start: HgvsGenomicPos::from(GenomicPos(new_start)),
                end: HgvsGenomicPos::from(GenomicPos(new_end - 1)),
            }
        };
        let new_loc_edit = LocEdit {
            loc: Uncertain::Certain(new_interval),
            edit: Uncertain::Certain(new_edit),
        };
        Ok(match var {
            HgvsVariant::GenomeVariant { .. } => HgvsVariant::GenomeVariant {
                accession: accession.clone(),
                reference_accession: reference_accession.clone(),
                gene_symbol: gene_symbol.clone(),
                loc_edit: new_loc_edit,
            },
            HgvsVariant::MitochondrialVariant { .. } => HgvsVariant::MitochondrialVariant {
                accession: accession.clone(),
                reference_accession: reference_accession.clone(),
                gene_symbol: gene_symbol.clone(),
                loc_edit: new_loc_edit,
            },
            _ => unreachable!("matched above"),
        })
    }

    fn normalize_transcript(&self, var: &HgvsVariant) -> Result<HgvsVariant, Error> {
        let (accession, reference_accession, gene_symbol, loc_edit) = match var {
            HgvsVariant::CdsVariant {
                accession,
                reference_accession,
                gene_symbol,
                loc_edit,
            }
            | HgvsVariant::TranscriptVariant {
                accession,
                reference_accession,
                gene_symbol,
                loc_edit,
            }
            | HgvsVariant::RnaVariant {
                accession,
                reference_accession,
                gene_symbol,
                loc_edit,
            } => (accession, reference_accession, gene_symbol, loc_edit),
            _ => unreachable!("matched by caller"),
        };

        if loc_edit.loc.is_uncertain() || loc_edit.edit.is_uncertain() {
            debug!("skipping normalization of uncertain variant {}", var);
            return Ok(var.clone());
        }

        let interval = loc_edit.loc.inner();
        let edit = loc_edit.edit.inner();
        if interval.start.offset != 0 || interval.end.offset != 0 {
            debug!("skipping normalization of intronic variant {}", var);
            return Ok(var.clone());
        }

        let model = TranscriptModel::new(
            self.provider
                .get_transcript(&accession.value, reference_accession.as_ref().map(|a| a.value.as_str()))?,
        )?;
        let cds_start = model.cds_start_index();
        let cds_end = model.cds_end_index();
        let dense_start = cds_anchor_to_dense(interval.start.anchor, interval.start.base, cds_start, cds_end);
        let dense_end = cds_anchor_to_dense(interval.end.anchor, interval.end.base, cds_start, cds_end);
        let (half_open_start, half_open_end) = match edit {
            NaEdit::Insertion { .. } => (dense_start.0 + 1, dense_start.0 + 1),
            _ => (dense_start.0, dense_end.0 + 1),
        };

        let (new_start, new_end, new_edit) = self.shift(
            &accession.value,
            IdentifierType::TranscriptAccession,
            half_open_start,
            half_open_end,
            edit,
        )?;

        let new_interval = if matches!(new_edit, NaEdit::Insertion { .. }) {
            let (start_anchor, start_base) = dense_to_cds_anchor(TranscriptPos(new_start - 1), cds_start, cds_end);
            let (end_anchor, end_base) = dense_to_cds_anchor(TranscriptPos(new_start), cds_start, cds_end);
            Interval {
                start: HgvsTranscriptPos {
                    anchor: start_anchor,
                    base: start_base,
                    offset: 0,
                },
                end: HgvsTranscriptPos {
                    anchor: end_anchor,
                    base: end_base,
                    offset: 0,
                },
            }
        } else {
            let (start_anchor, start_base) = dense_to_cds_anchor(TranscriptPos(new_start), cds_start, cds_end);
            let (end_anchor, end_base) = dense_to_cds_anchor(TranscriptPos(new_end - 1), cds_start, cds_end);
            Interval {
                start: HgvsTranscriptPos {
                    anchor: start_anchor,
                    base: start_base,
                    offset: 0,
                },
                end: HgvsTranscriptPos {
                    anchor: end_anchor,
                    base: end_base,
                    offset: 0,
                },
            }
        };
        let new_loc_edit = LocEdit {
            loc: Uncertain::Certain(new_interval),
            edit: Uncertain::Certain(new_edit),
        };
        Ok(match var {
            HgvsVariant::CdsVariant { .. } => HgvsVariant::CdsVariant {
                accession: accession.clone(),
                reference_accession: reference_accession.clone(),
                gene_symbol: gene_symbol.clone(),
                loc_edit: new_loc_edit,
            },
            HgvsVariant::TranscriptVariant { .. } => HgvsVariant::TranscriptVariant {
                accession: accession.clone(),
                reference_accession: reference_accession.clone(),
                gene_symbol: gene_symbol.clone(),
                loc_edit: new_loc_edit,
            },
            HgvsVariant::RnaVariant { .. } => HgvsVariant::RnaVariant {
                accession: accession.clone(),
                reference_accession: reference_accession.clone(),
                gene_symbol: gene_symbol.clone(),
                loc_edit: new_loc_edit,
            },
            _ => unreachable!("matched above"),
        })
    }

    /// Fetch a window around `[start, end)`, shift the edit within it, and
    /// widen to `max_window` once if the shift ran off either edge.
    fn shift(
        &self,
        ac: &str,
        kind: IdentifierType,
        start: i64,
        end: i64,
        edit: &NaEdit,
    ) -> Result<(i64, i64, NaEdit), Error> {
        let (window_start, window) = self.fetch_window(ac, kind, start, end, self.config.window_size)?;
        let local_start = (start - window_start) as usize;
        let local_end = (end - window_start) as usize;
        let reference_allele = &window[local_start..local_end];
        let alternative_allele = allele_string(reference_allele, edit);

        let (new_local_start, new_local_end, new_edit) = normalize_allele(
            &window,
            local_start,
            local_end,
            reference_allele,
            &alternative_allele,
            self.config.shuffle_direction,
        );

        // Widen the window once if the shift ran flush against an edge:
        // the maximal shift may not have been found within `window_size`.
        let hit_edge = new_local_end == window.len() || new_local_start == 0;
        if hit_edge && self.config.window_size < self.config.max_window {
            let (window_start, window) = self.fetch_window(ac, kind, start, end, self.config.max_window)?;
            let local_start = (start - window_start) as usize;
            let local_end = (end - window_start) as usize;
            let reference_allele = &window[local_start..local_end];
            let alternative_allele = allele_string(reference_allele, edit);
            let (new_local_start, new_local_end, new_edit) = normalize_allele(
                &window,
                local_start,
                local_end,
                reference_allele,
                &alternative_allele,
                self.config.shuffle_direction,
            );
            return Ok((
                window_start + new_local_start as i64,
                window_start + new_local_end as i64,
                new_edit,
            ));
        }

        Ok((
            window_start + new_local_start as i64,
            window_start + new_local_end as i64,
            new_edit,
        ))
    }

    fn fetch_window(
        &self,
        ac: &str,
        kind: IdentifierType,
        start: i64,
        end: i64,
        margin: i64,
    ) -> Result<(i64, String), Error> {
        let mut win_start = (start - margin).max(0);
        let mut win_end = end + margin;
        match self.provider.get_seq(ac, win_start, win_end, kind) {
            Ok(seq) => Ok((win_start, seq)),
            Err(DataError::OutOfRange { len, .. }) => {
                win_start = win_start.min(len);
                win_end = win_end.clamp(win_start, len);
                let seq = self.provider.get_seq(ac, win_start, win_end, kind)?;
                Ok((win_start, seq))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// The allele an edit produces, given the reference bases it replaces.
/// `reference_allele` is sliced directly from the fetched window rather
/// than trusting an edit's own (possibly omitted) `reference` field.
fn allele_string(reference_allele: &str, edit: &NaEdit) -> String {
    match edit {
        NaEdit::Identity => reference_allele.to_string(),
        NaEdit::Substitution { alternative, .. } => alternative.clone(),
        NaEdit::Deletion { .. } => String::new(),
        NaEdit::Insertion { alternative } => alternative.clone(),
        NaEdit::Duplication { .. } => format!("{reference_allele}{reference_allele}"),
        NaEdit::Inversion => revcomp(reference_allele),
        NaEdit::Delins { alternative } => alternative.clone(),
        NaEdit::Repeat { unit, count } => unit.repeat(*count as usize),
    }
}

/// Trim an allele change to its minimal representation and, if it reduces
/// to a pure insertion or deletion, shift it to the maximal position in
/// `direction` within `window`. Coordinate-space agnostic: `window` and the
/// local offsets into it are whatever space the caller is working in.
fn normalize_allele(
    window: &str,
    mut local_start: usize,
    mut local_end: usize,
    reference_allele: &str,
    alternative_allele: &str,
    direction: Direction,
) -> (usize, usize, NaEdit) {
    let (n, ref_remnant, alt_remnant) = trim_common_prefixes(reference_allele, alternative_allele);
    local_start += n;
    let (n, ref_remnant, alt_remnant) = trim_common_suffixes(&ref_remnant, &alt_remnant);
    local_end -= n;

    if ref_remnant.is_empty() && alt_remnant.is_empty() {
        return (local_start, local_end, NaEdit::Identity);
    }

    if ref_remnant.is_empty() || alt_remnant.is_empty() {
        let mut unit: Vec<u8> = if ref_remnant.is_empty() {
            alt_remnant.as_bytes().to_vec()
        } else {
            ref_remnant.as_bytes().to_vec()
        };
        match direction {
            Direction::FiveToThree => {
                while local_end < window.len() && window.as_bytes()[local_end] == unit[0] {
                    unit.remove(0);
                    unit.push(window.as_bytes()[local_end]);
                    local_start += 1;
                    local_end += 1;
                }
            }
            Direction::ThreeToFive => {
                while local_start > 0 && window.as_bytes()[local_start - 1] == *unit.last().expect("unit nonempty") {
                    unit.pop();
                    unit.insert(0, window.as_bytes()[local_start - 1]);
                    local_start -= 1;
                    local_end -= 1;
                }
            }
        }
        let unit = String::from_utf8(unit).expect("reference window is ASCII DNA");

        return if ref_remnant.is_empty() {
            if local_start >= unit.len() && window[local_start - unit.len()..local_start] == unit {
                (local_start - unit.len(), local_start, NaEdit::Duplication { reference: Some(unit) })
            } else {
                (local_start, local_end, NaEdit::Insertion { alternative: unit })
            }
        } else {
            (local_start, local_end, NaEdit::Deletion { reference: Some(unit) })
        };
    }

    if ref_remnant.len() == 1 && alt_remnant.len() == 1 {
        (
            local_start,
            local_end,
            NaEdit::Substitution {
                reference: ref_remnant,
                alternative: alt_remnant,
            },
        )
    } else {
        (local_start, local_end, NaEdit::Delins { alternative: alt_remnant })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::{provider, PLUS_TRANSCRIPT_AC};
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_allele_shifts_insertion_to_its_maximal_3prime_duplication() {
        // "AAAAGT": inserting an "A" right after the first base is
        // equivalent to duplicating the run of `A`s at its rightmost copy.
        let window = "AAAAGT";
        let (start, end, edit) = normalize_allele(window, 1, 1, "", "A", Direction::FiveToThree);
        assert_eq!((start, end), (3, 4));
        assert_eq!(edit, NaEdit::Duplication { reference: Some("A".to_string()) });
    }

    #[test]
    fn normalize_allele_shifts_deletion_through_a_repeat() {
        let window = "CTAAAAGT";
        // Deleting the `A` at index 2 is equivalent to deleting any of the
        // run; the maximal 3' shift lands the deletion on the last copy.
        let (start, end, edit) = normalize_allele(window, 2, 3, "A", "", Direction::FiveToThree);
        assert_eq!((start, end), (5, 6));
        assert_eq!(edit, NaEdit::Deletion { reference: Some("A".to_string()) });
    }

    #[test]
    fn normalize_allele_trims_a_delins_to_its_minimal_span() {
        let (start, end, edit) = normalize_allele("ACGTAC", 1, 5, "CGTA", "TGCA", Direction::FiveToThree);
        // Common suffix "A" trimmed away, leaving "CGT" -> "TGC".
        assert_eq!((start, end), (1, 4));
        assert_eq!(
            edit,
            NaEdit::Delins {
                alternative: "TGC".to_string()
            }
        );
    }

    #[test]
    fn normalizes_genomic_insertion_into_the_equivalent_duplication() {
        let normalizer = Normalizer::new(Config::default(), provider());
        // `PLUS_TX_SEQ` is "ATGAAATAA"; genomic 1003_1004 flank the run of
        // `A`s at genomic 1004-1006 (0-based offsets 3-5), so inserting an
        // "A" there is equivalent to duplicating the run's last base.
        let var = crate::parser::parse("NC_TEST.1:g.1003_1004insA").unwrap();
        let normalized = normalizer.normalize(&var).unwrap();
        assert_eq!(format!("{normalized}"), "NC_TEST.1:g.1006dup");
    }

    #[test]
    fn leaves_an_already_normalized_variant_unchanged() {
        let normalizer = Normalizer::new(Config::default(), provider());
        let var = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4A>G")).unwrap();
        let normalized = normalizer.normalize(&var).unwrap();
        assert_eq!(format!("{normalized}"), format!("{PLUS_TRANSCRIPT_AC}:c.4A>G"));
    }

    #[test]
    fn leaves_an_intronic_variant_unchanged() {
        let normalizer = Normalizer::new(Config::default(), provider());
        let var = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4+2A>G")).unwrap();
        let normalized = normalizer.normalize(&var).unwrap();
        assert_eq!(format!("{normalized}"), format!("{PLUS_TRANSCRIPT_AC}:c.4+2A>G"));
    }
}
