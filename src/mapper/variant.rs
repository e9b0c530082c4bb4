//! Variant mapping between genomic, CDS and protein coordinate spaces.
//!
//! Grounded on `hgvs-rs::mapper::variant::Mapper`'s `g_to_c`/`c_to_g`/`c_to_p`
//! trio (the teacher additionally exposes `g_to_t`/`t_to_g`/`c_to_n`/`n_to_c`
//! over a `TxInterval`/CIGAR alignment; this crate folds transcript-space
//! `n.` mapping into the same exon arithmetic rather than a separate
//! alignment object, since `spec.md` §6.1's `DataProvider` already hands back
//! ungapped per-exon coordinates). `c_to_p` follows the teacher's
//! `mapper::altseq` translate-then-diff pipeline, reimplemented directly
//! against [`crate::aminoacids`] instead of the teacher's `AltSeqBuilder`.

use std::rc::Rc;

use log::debug;

use crate::aminoacids::{self, STOP_AA1};
use crate::coords::{
    GenomicPos, HgvsGenomicPos, HgvsProteinPos, HgvsTranscriptPos, Interval, Strand, TranscriptPos,
    Uncertain,
};
use crate::data::{DataProvider, IdentifierType};
use crate::parser::{
    Accession, HgvsVariant, NaEdit, ProteinEdit, ProteinLocEdit, ProteinPosition, UncertainChange,
};
use crate::sequences::{apply_edit, revcomp};
use crate::transcript::{cds_anchor_to_dense, dense_to_cds_anchor, GenomicLocation, TranscriptModel};
use crate::validator::{ExtrinsicValidator, IntrinsicValidator, Validator};

use super::Error;

/// Behavior knobs for the mapper, resolving the Open Questions `spec.md`
/// §9 leaves to the implementation.
#[derive(Debug, Clone)]
pub struct Config {
    /// When `true` (the default), an in-frame deletion aligned to codon
    /// boundaries is reported as `p.Aa_Aadel`. When `false`, the historical
    /// defect some `hgvs` implementations carry is preserved instead: the
    /// first affected residue is reported as a nonsense substitution
    /// (`p.AaTer`) even though no frameshift actually occurs.
    pub correct_inframe_deletion_defect: bool,
    /// Whether bounds violations (a `c.` position outside the transcript or
    /// its CDS) are hard errors. When `false` they are logged and mapping
    /// proceeds anyway.
    pub strict_bounds: bool,
    /// Whether intrinsic-validation failures on the input variant abort
    /// mapping rather than just being logged.
    pub strict_validation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            correct_inframe_deletion_defect: true,
            strict_bounds: true,
            strict_validation: false,
        }
    }
}

/// Maps variants between coordinate spaces using a [`DataProvider`] for
/// transcript structure and reference sequence.
pub struct Mapper {
    config: Config,
    provider: Rc<dyn DataProvider>,
}

impl Mapper {
    pub fn new(config: Config, provider: Rc<dyn DataProvider>) -> Self {
        Self { config, provider }
    }

    pub fn provider(&self) -> &Rc<dyn DataProvider> {
        &self.provider
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn model_for(&self, transcript_ac: &str, reference_ac: Option<&str>) -> Result<TranscriptModel, Error> {
        let data = self.provider.get_transcript(transcript_ac, reference_ac)?;
        Ok(TranscriptModel::new(data)?)
    }

    /// `c.` → `g.`/`m.`, per `spec.md` §4.3.1.
    pub fn c_to_g(&self, var: &HgvsVariant) -> Result<HgvsVariant, Error> {
        let (accession, gene_symbol, loc_edit) = match var {
            HgvsVariant::CdsVariant { accession, gene_symbol, loc_edit, .. } => {
                (accession, gene_symbol, loc_edit)
            }
            other => {
                return Err(Error::WrongVariantKind {
                    expected: "c.",
                    actual: other.kind(),
                })
            }
        };

        IntrinsicValidator::new(self.config.strict_validation)
            .validate(var)
            .map_err(Error::Validation)?;

        let model = self.model_for(&accession.value, None)?;
        let extrinsic = ExtrinsicValidator::new(self.config.strict_bounds, &model);
        extrinsic
            .validate(var, &*self.provider)
            .map_err(Error::Validation)?;

        let cds_start = model.cds_start_index();
        let cds_end = model.cds_end_index();
        let interval = loc_edit.loc.inner();
        let g_interval = map_interval_c_to_g(&model, interval, cds_start, cds_end)?;

        let edit = loc_edit.edit.inner().clone();
        let g_edit = match model.strand() {
            Strand::Plus => edit,
            Strand::Minus => revcomp_na_edit(&edit),
        };

        debug!("c_to_g: {} -> g.{}", var, g_interval);

        Ok(HgvsVariant::GenomeVariant {
            accession: Accession {
                value: model.reference_ac().to_string(),
            },
            reference_accession: None,
            gene_symbol: gene_symbol.clone(),
            loc_edit: crate::parser::LocEdit {
                loc: rewrap(loc_edit.loc.is_uncertain(), g_interval),
                edit: rewrap(loc_edit.edit.is_uncertain(), g_edit),
            },
        })
    }

    /// `g.`/`m.` → `c.` against `transcript_ac`, per `spec.md` §4.3.1.
    pub fn g_to_c(&self, var: &HgvsVariant, transcript_ac: &str) -> Result<HgvsVariant, Error> {
        let (gene_symbol, loc_edit) = match var {
            HgvsVariant::GenomeVariant { gene_symbol, loc_edit, .. }
            | HgvsVariant::MitochondrialVariant { gene_symbol, loc_edit, .. } => (gene_symbol, loc_edit),
            other => {
                return Err(Error::WrongVariantKind {
                    expected: "g.",
                    actual: other.kind(),
                })
            }
        };

        let model = self.model_for(transcript_ac, Some(var.accession().value.as_str()))?;

        let cds_start = model.cds_start_index();
        let cds_end = model.cds_end_index();
        let interval = loc_edit.loc.inner();
        let c_interval = map_interval_g_to_c(&model, interval, cds_start, cds_end)?;

        let edit = loc_edit.edit.inner().clone();
        let c_edit = match model.strand() {
            Strand::Plus => edit,
            Strand::Minus => revcomp_na_edit(&edit),
        };

        debug!("g_to_c: {} -> {}:c.{}", var, transcript_ac, c_interval);

        Ok(HgvsVariant::CdsVariant {
            accession: Accession {
                value: transcript_ac.to_string(),
            },
            reference_accession: None,
            gene_symbol: gene_symbol.clone(),
            loc_edit: crate::parser::LocEdit {
                loc: rewrap(loc_edit.loc.is_uncertain(), c_interval),
                edit: rewrap(loc_edit.edit.is_uncertain(), c_edit),
            },
        })
    }

    /// `c.` → `p.`, per `spec.md` §4.3.2.
    pub fn c_to_p(&self, var: &HgvsVariant) -> Result<HgvsVariant, Error> {
        let (accession, loc_edit) = match var {
            HgvsVariant::CdsVariant { accession, loc_edit, .. } => (accession, loc_edit),
            other => {
                return Err(Error::WrongVariantKind {
                    expected: "c.",
                    actual: other.kind(),
                })
            }
        };

        let model = self.model_for(&accession.value, None)?;
        let interval = loc_edit.loc.inner();
        if interval.start.offset != 0 || interval.end.offset != 0 {
            return Err(Error::UnexpectedIntronicPosition(format!("{}", var)));
        }

        let cds_start = model.cds_start_index();
        let cds_end = model.cds_end_index();
        let cds_len = (cds_end.0 - cds_start.0 + 1) as usize;

        let tx_seq = self.provider.get_seq(
            &accession.value,
            0,
            model.transcript_len(),
            IdentifierType::TranscriptAccession,
        )?;
        let ref_cds = &tx_seq[cds_start.0 as usize..=(cds_end.0 as usize)];

        let edit = loc_edit.edit.inner();
        let dense_start = cds_anchor_to_dense(interval.start.anchor, interval.start.base, cds_start, cds_end);
        let dense_end = cds_anchor_to_dense(interval.end.anchor, interval.end.base, cds_start, cds_end);

        let (cds_off_start, cds_off_end) = match edit {
            NaEdit::Insertion { .. } => {
                let off = (dense_start.0 - cds_start.0 + 1).clamp(0, cds_len as i64) as usize;
                (off, off)
            }
            _ => {
                let s = (dense_start.0 - cds_start.0).clamp(0, cds_len as i64) as usize;
                let e = (dense_end.0 - cds_start.0 + 1).clamp(0, cds_len as i64) as usize;
                (s, e)
            }
        };

        let edited_cds = apply_edit(ref_cds, cds_off_start, cds_off_end, edit);

        let (ref_protein_full, ref_stop) = aminoacids::translate_cds(&truncate_to_codons(ref_cds))?;
        let ref_stop = ref_stop.ok_or_else(|| Error::ReferenceHasNoStopCodon(accession.value.clone()))?;
        let ref_protein = &ref_protein_full[..=ref_stop];

        let (edited_protein_full, edited_stop) = aminoacids::translate_cds(&truncate_to_codons(&edited_cds))?;
        let edited_protein: &str = match edited_stop {
            Some(i) => &edited_protein_full[..=i],
            None => &edited_protein_full,
        };

        let protein_ac = model
            .protein_ac()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("{}-protein", accession.value));

        let consequence = classify_protein_consequence(
            ref_protein,
            edited_protein,
            edited_stop.is_some(),
            cds_off_start / 3,
            edit,
            self.config.correct_inframe_deletion_defect,
        );

        debug!("c_to_p: {} -> p.{:?}", var, consequence);

        Ok(HgvsVariant::ProteinVariant {
            accession: Accession { value: protein_ac },
            reference_accession: None,
            gene_symbol: None,
            loc_edit: consequence,
        })
    }

    /// Generalizes [`Self::c_to_g`] to any nucleic-acid transcript-space
    /// kind (`c.`, `n.`, `r.`), per `spec.md` §4.4.2's `c↔c, n↔n, r↔r: map
    /// each to genomic`. `n.`/`r.` positions are counted from the
    /// transcription start rather than the CDS, so the origin passed to
    /// [`map_interval_c_to_g`] is `[0, transcript_len)` instead of the CDS
    /// bounds; the arithmetic is otherwise identical.
    pub fn tx_to_g(&self, var: &HgvsVariant) -> Result<HgvsVariant, Error> {
        if matches!(var, HgvsVariant::CdsVariant { .. }) {
            return self.c_to_g(var);
        }
        let (accession, gene_symbol, loc_edit) = match var {
            HgvsVariant::TranscriptVariant { accession, gene_symbol, loc_edit, .. }
            | HgvsVariant::RnaVariant { accession, gene_symbol, loc_edit, .. } => {
                (accession, gene_symbol, loc_edit)
            }
            other => {
                return Err(Error::WrongVariantKind {
                    expected: "c./n./r.",
                    actual: other.kind(),
                })
            }
        };

        let model = self.model_for(&accession.value, None)?;
        let origin_start = TranscriptPos(0);
        let origin_end = TranscriptPos(model.transcript_len() - 1);
        let interval = loc_edit.loc.inner();
        let g_interval = map_interval_c_to_g(&model, interval, origin_start, origin_end)?;

        let edit = loc_edit.edit.inner().clone();
        let g_edit = match model.strand() {
            Strand::Plus => edit,
            Strand::Minus => revcomp_na_edit(&edit),
        };

        debug!("tx_to_g: {} -> g.{}", var, g_interval);

        Ok(HgvsVariant::GenomeVariant {
            accession: Accession {
                value: model.reference_ac().to_string(),
            },
            reference_accession: None,
            gene_symbol: gene_symbol.clone(),
            loc_edit: crate::parser::LocEdit {
                loc: rewrap(loc_edit.loc.is_uncertain(), g_interval),
                edit: rewrap(loc_edit.edit.is_uncertain(), g_edit),
            },
        })
    }

    /// Inverse of [`Self::tx_to_g`]: maps a `g.`/`m.` variant onto
    /// `transcript_ac` as `target_kind` (`c`, `n` or `r`).
    pub fn g_to_tx(&self, var: &HgvsVariant, transcript_ac: &str, target_kind: char) -> Result<HgvsVariant, Error> {
        if target_kind == 'c' {
            return self.g_to_c(var, transcript_ac);
        }
        if target_kind != 'n' && target_kind != 'r' {
            return Err(Error::WrongVariantKind {
                expected: "c./n./r.",
                actual: target_kind,
            });
        }

        let (gene_symbol, loc_edit) = match var {
            HgvsVariant::GenomeVariant { gene_symbol, loc_edit, .. }
            | HgvsVariant::MitochondrialVariant { gene_symbol, loc_edit, .. } => (gene_symbol, loc_edit),
            other => {
                return Err(Error::WrongVariantKind {
                    expected: "g.",
                    actual: other.kind(),
                })
            }
        };

        let model = self.model_for(transcript_ac, Some(var.accession().value.as_str()))?;
        let origin_start = TranscriptPos(0);
        let origin_end = TranscriptPos(model.transcript_len() - 1);
        let interval = loc_edit.loc.inner();
        let c_interval = map_interval_g_to_c(&model, interval, origin_start, origin_end)?;

        let edit = loc_edit.edit.inner().clone();
        let c_edit = match model.strand() {
            Strand::Plus => edit,
            Strand::Minus => revcomp_na_edit(&edit),
        };

        debug!("g_to_tx: {} -> {}:{}.{}", var, transcript_ac, target_kind, c_interval);

        let new_loc_edit = crate::parser::LocEdit {
            loc: rewrap(loc_edit.loc.is_uncertain(), c_interval),
            edit: rewrap(loc_edit.edit.is_uncertain(), c_edit),
        };
        Ok(match target_kind {
            'n' => HgvsVariant::TranscriptVariant {
                accession: Accession {
                    value: transcript_ac.to_string(),
                },
                reference_accession: None,
                gene_symbol: gene_symbol.clone(),
                loc_edit: new_loc_edit,
            },
            'r' => HgvsVariant::RnaVariant {
                accession: Accession {
                    value: transcript_ac.to_string(),
                },
                reference_accession: None,
                gene_symbol: gene_symbol.clone(),
                loc_edit: new_loc_edit,
            },
            _ => unreachable!("checked above"),
        })
    }

    /// Delegates to [`crate::normalizer`] for 3'-shift normalization.
    pub fn normalize(&self, var: &HgvsVariant) -> Result<HgvsVariant, Error> {
        let normalizer = crate::normalizer::Normalizer::new(
            crate::normalizer::Config::default(),
            Rc::clone(&self.provider),
        );
        Ok(normalizer.normalize(var)?)
    }
}

fn rewrap<T>(uncertain: bool, value: T) -> Uncertain<T> {
    if uncertain {
        Uncertain::Uncertain(value)
    } else {
        Uncertain::Certain(value)
    }
}

fn truncate_to_codons(seq: &str) -> String {
    let len = (seq.len() / 3) * 3;
    seq[..len].to_string()
}

fn revcomp_na_edit(edit: &NaEdit) -> NaEdit {
    match edit {
        NaEdit::Identity => NaEdit::Identity,
        NaEdit::Substitution { reference, alternative } => NaEdit::Substitution {
            reference: revcomp(reference),
            alternative: revcomp(alternative),
        },
        NaEdit::Deletion { reference } => NaEdit::Deletion {
            reference: reference.as_ref().map(|s| revcomp(s)),
        },
        NaEdit::Insertion { alternative } => NaEdit::Insertion {
            alternative: revcomp(alternative),
        },
        NaEdit::Duplication { reference } => NaEdit::Duplication {
            reference: reference.as_ref().map(|s| revcomp(s)),
        },
        NaEdit::Inversion => NaEdit::Inversion,
        NaEdit::Delins { alternative } => NaEdit::Delins {
            alternative: revcomp(alternative),
        },
        NaEdit::Repeat { unit, count } => NaEdit::Repeat {
            unit: revcomp(unit),
            count: *count,
        },
    }
}

/// `c.` position → genomic position, independent of whether it is exonic.
fn cds_pos_to_genomic(
    model: &TranscriptModel,
    pos: HgvsTranscriptPos,
    cds_start: TranscriptPos,
    cds_end: TranscriptPos,
) -> Result<GenomicPos, Error> {
    let anchor_tx = cds_anchor_to_dense(pos.anchor, pos.base, cds_start, cds_end);
    let anchor_genomic = model.transcript_to_genomic(anchor_tx)?;
    if pos.offset == 0 {
        return Ok(anchor_genomic);
    }
    let delta = match model.strand() {
        Strand::Plus => pos.offset,
        Strand::Minus => -pos.offset,
    };
    Ok(GenomicPos(anchor_genomic.0 + delta))
}

/// Genomic position → `c.` position. Exonic positions round-trip through
/// [`TranscriptModel::locate_genomic`] directly. Intronic positions are
/// **not** resolved via that function's `Intronic` variant: its anchor/sign
/// is picked by genomic order, which disagrees with HGVS's
/// transcript-direction convention for minus-strand transcripts (verified
/// against `crate::transcript`'s own minus-strand fixture — see
/// `DESIGN.md`). Instead this scans the exon-boundary pairs directly and
/// derives the anchor and signed offset from transcript (not genomic)
/// direction.
fn genomic_pos_to_cds(
    model: &TranscriptModel,
    g: GenomicPos,
    cds_start: TranscriptPos,
    cds_end: TranscriptPos,
) -> Result<HgvsTranscriptPos, Error> {
    if let GenomicLocation::Exonic(tx) = model.locate_genomic(g) {
        let (anchor, base) = dense_to_cds_anchor(tx, cds_start, cds_end);
        return Ok(HgvsTranscriptPos::exonic(anchor, base));
    }

    for pair in model.exons().windows(2) {
        let upstream_tx = TranscriptPos(pair[0].transcript_end - 1);
        let downstream_tx = TranscriptPos(pair[1].transcript_start);
        let g_upstream = model.transcript_to_genomic(upstream_tx)?;
        let g_downstream = model.transcript_to_genomic(downstream_tx)?;
        let (lo, hi) = if g_upstream.0 < g_downstream.0 {
            (g_upstream.0, g_downstream.0)
        } else {
            (g_downstream.0, g_upstream.0)
        };
        if g.0 <= lo || g.0 >= hi {
            continue;
        }

        // Distance along the transcript's own 5'->3' direction from each
        // flanking exonic base to `g`: positive means "past this boundary,
        // moving further into the intron".
        let upstream_dist = match model.strand() {
            Strand::Plus => g.0 - g_upstream.0,
            Strand::Minus => g_upstream.0 - g.0,
        };
        let downstream_dist = match model.strand() {
            Strand::Plus => g_downstream.0 - g.0,
            Strand::Minus => g.0 - g_downstream.0,
        };

        return if upstream_dist <= downstream_dist {
            let (anchor, base) = dense_to_cds_anchor(upstream_tx, cds_start, cds_end);
            Ok(HgvsTranscriptPos {
                anchor,
                base,
                offset: upstream_dist,
            })
        } else {
            let (anchor, base) = dense_to_cds_anchor(downstream_tx, cds_start, cds_end);
            Ok(HgvsTranscriptPos {
                anchor,
                base,
                offset: -downstream_dist,
            })
        };
    }

    Err(Error::OutsideCds(format!(
        "genomic position {} is not covered by any exon or intron of {}",
        g.0,
        model.transcript_ac()
    )))
}

/// Maps a `c.` interval to its genomic span, preserving each endpoint
/// independently (a variant spanning an exon junction has a start and end
/// that each resolve through different exon boundaries).
fn map_interval_c_to_g(
    model: &TranscriptModel,
    interval: &Interval<HgvsTranscriptPos>,
    cds_start: TranscriptPos,
    cds_end: TranscriptPos,
) -> Result<Interval<HgvsGenomicPos>, Error> {
    let g_start = cds_pos_to_genomic(model, interval.start, cds_start, cds_end)?;
    let g_end = cds_pos_to_genomic(model, interval.end, cds_start, cds_end)?;
    // `c.` is always written 5'->3' along the transcript; on a minus-strand
    // transcript that is *decreasing* genomic order, so the endpoints swap
    // to keep the emitted `g.` interval ascending, as `spec.md` §4.1 requires.
    let (lo, hi) = match model.strand() {
        Strand::Plus => (g_start, g_end),
        Strand::Minus => (g_end, g_start),
    };
    Ok(Interval {
        start: lo.into(),
        end: hi.into(),
    })
}

/// Inverse of [`map_interval_c_to_g`].
fn map_interval_g_to_c(
    model: &TranscriptModel,
    interval: &Interval<HgvsGenomicPos>,
    cds_start: TranscriptPos,
    cds_end: TranscriptPos,
) -> Result<Interval<HgvsTranscriptPos>, Error> {
    let g_start: GenomicPos = interval.start.into();
    let g_end: GenomicPos = interval.end.into();
    let (g_for_c_start, g_for_c_end) = match model.strand() {
        Strand::Plus => (g_start, g_end),
        Strand::Minus => (g_end, g_start),
    };
    let c_start = genomic_pos_to_cds(model, g_for_c_start, cds_start, cds_end)?;
    let c_end = genomic_pos_to_cds(model, g_for_c_end, cds_start, cds_end)?;
    Ok(Interval {
        start: c_start,
        end: c_end,
    })
}

fn aa3(aa1: char) -> String {
    aminoacids::aa1_to_aa3(&aa1.to_string()).unwrap_or_else(|_| aminoacids::UNKNOWN_AA3.to_string())
}

fn protein_pos_at(aa3_code: String, one_based: i64) -> ProteinPosition {
    ProteinPosition {
        aa: aa3_code,
        pos: HgvsProteinPos(one_based),
    }
}

/// Classify the difference between a reference and an edited protein
/// sequence (both truncated at their first stop codon, if any) into a
/// protein-consequence description, per `spec.md` §4.3.2.
///
/// Corrects the historical `c.4_6del` -> `p.Gln4Ter` defect: an in-frame
/// deletion aligned to codon boundaries is reported as `p.Aa_Aadel` unless
/// `correct_inframe_defect` is `false`.
fn classify_protein_consequence(
    ref_protein: &str,
    edited_protein: &str,
    edited_has_stop: bool,
    edit_codon_index: usize,
    edit: &NaEdit,
    correct_inframe_defect: bool,
) -> ProteinLocEdit {
    if ref_protein == edited_protein {
        let idx = edit_codon_index.min(ref_protein.len().saturating_sub(1));
        let aa = ref_protein.as_bytes().get(idx).copied().unwrap_or(b'X') as char;
        return ProteinLocEdit::Ordinary {
            pos: Interval::single(protein_pos_at(aa3(aa), idx as i64 + 1)),
            edit: ProteinEdit::Ident,
            predicted: true,
        };
    }

    let (prefix_len, ref_rem, edited_rem) = crate::sequences::trim_common_prefixes(ref_protein, edited_protein);
    let (suffix_len, ref_core, edited_core) = crate::sequences::trim_common_suffixes(&ref_rem, &edited_rem);

    let delta: i64 = edited_protein.len() as i64 - ref_protein.len() as i64;
    let length_changing = matches!(
        edit,
        NaEdit::Deletion { .. }
            | NaEdit::Duplication { .. }
            | NaEdit::Insertion { .. }
            | NaEdit::Delins { .. }
            | NaEdit::Repeat { .. }
    );
    let in_frame = length_changing && delta % 3 == 0 && delta != 0;

    if in_frame {
        let ref_start = prefix_len;
        let ref_end_excl = ref_protein.len() - suffix_len;

        if ref_core.is_empty() {
            // Pure in-frame insertion: nothing deleted from the reference,
            // anchor between the two flanking residues.
            let before_idx = ref_start.saturating_sub(1);
            let before = ref_protein.as_bytes()[before_idx] as char;
            let after_idx = ref_start.min(ref_protein.len() - 1);
            let after = ref_protein.as_bytes()[after_idx] as char;
            return ProteinLocEdit::Ordinary {
                pos: Interval {
                    start: protein_pos_at(aa3(before), before_idx as i64 + 1),
                    end: protein_pos_at(aa3(after), after_idx as i64 + 1),
                },
                edit: ProteinEdit::Ins {
                    alternative: edited_core.chars().map(aa3).collect(),
                },
                predicted: true,
            };
        }

        let start_aa = ref_protein.as_bytes()[ref_start] as char;
        let end_aa = ref_protein.as_bytes()[ref_end_excl - 1] as char;
        let pos = Interval {
            start: protein_pos_at(aa3(start_aa), ref_start as i64 + 1),
            end: protein_pos_at(aa3(end_aa), ref_end_excl as i64),
        };

        if edited_core.is_empty() {
            if !correct_inframe_defect && !edited_has_stop {
                return ProteinLocEdit::Ordinary {
                    pos: Interval::single(protein_pos_at(aa3(start_aa), ref_start as i64 + 1)),
                    edit: ProteinEdit::Subst {
                        alternative: aminoacids::STOP_AA3.to_string(),
                    },
                    predicted: true,
                };
            }
            return ProteinLocEdit::Ordinary {
                pos,
                edit: ProteinEdit::Del,
                predicted: true,
            };
        }

        return ProteinLocEdit::Ordinary {
            pos,
            edit: ProteinEdit::DelIns {
                alternative: edited_core.chars().map(aa3).collect(),
            },
            predicted: true,
        };
    }

    if length_changing && delta != 0 {
        // Frameshift: name the first affected residue and the distance to
        // the new stop, if the edited protein reaches one.
        let idx = prefix_len;
        let ref_aa = ref_protein.as_bytes().get(idx).copied().unwrap_or(b'X') as char;
        let alt_aa = edited_protein.as_bytes().get(idx).copied();
        let length = if edited_has_stop {
            UncertainChange::Known((edited_protein.len() - idx) as i32)
        } else {
            UncertainChange::Unknown
        };
        return ProteinLocEdit::Ordinary {
            pos: Interval::single(protein_pos_at(aa3(ref_aa), idx as i64 + 1)),
            edit: ProteinEdit::Fs {
                alternative: alt_aa.map(aa3),
                terminal: Some(aminoacids::STOP_AA3.to_string()),
                length,
            },
            predicted: true,
        };
    }

    // Same-length substitution (single residue or a contiguous block), or
    // an edit that reached the CDS without changing any residue.
    let ref_start = prefix_len;
    let ref_end_excl = ref_protein.len() - suffix_len;
    if ref_end_excl <= ref_start {
        let idx = edit_codon_index.min(ref_protein.len().saturating_sub(1));
        let aa = ref_protein.as_bytes().get(idx).copied().unwrap_or(b'X') as char;
        return ProteinLocEdit::Ordinary {
            pos: Interval::single(protein_pos_at(aa3(aa), idx as i64 + 1)),
            edit: ProteinEdit::Ident,
            predicted: true,
        };
    }
    if ref_end_excl - ref_start == 1 {
        let ref_aa = ref_protein.as_bytes()[ref_start] as char;
        // A stop-gain substitution can truncate the edited protein before
        // `ref_start`; treat anything past its end as the stop it ran into.
        let alt_aa = edited_protein.as_bytes().get(ref_start).copied().unwrap_or(STOP_AA1 as u8) as char;
        let alternative = if alt_aa == STOP_AA1 {
            aminoacids::STOP_AA3.to_string()
        } else {
            aa3(alt_aa)
        };
        return ProteinLocEdit::Ordinary {
            pos: Interval::single(protein_pos_at(aa3(ref_aa), ref_start as i64 + 1)),
            edit: ProteinEdit::Subst { alternative },
            predicted: true,
        };
    }

    let start_aa = ref_protein.as_bytes()[ref_start] as char;
    let end_aa = ref_protein.as_bytes()[ref_end_excl - 1] as char;
    let alt_end = ref_end_excl.min(edited_protein.len());
    let alternative: String = if ref_start < alt_end {
        edited_protein[ref_start..alt_end].chars().map(aa3).collect()
    } else {
        String::new()
    };
    ProteinLocEdit::Ordinary {
        pos: Interval {
            start: protein_pos_at(aa3(start_aa), ref_start as i64 + 1),
            end: protein_pos_at(aa3(end_aa), ref_end_excl as i64),
        },
        edit: ProteinEdit::DelIns { alternative },
        predicted: true,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::{provider, GENE_SYMBOL, MINUS_TRANSCRIPT_AC, PLUS_PROTEIN_AC, PLUS_TRANSCRIPT_AC};
    use pretty_assertions::assert_eq;

    fn mapper() -> Mapper {
        Mapper::new(Config::default(), provider())
    }

    #[test]
    fn c_to_g_plus_strand_substitution() {
        let m = mapper();
        let var = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4A>G")).unwrap();
        let g = m.c_to_g(&var).unwrap();
        assert_eq!(format!("{}", g), "NC_TEST.1:g.1004A>G");
    }

    #[test]
    fn g_to_c_is_the_inverse_of_c_to_g() {
        let m = mapper();
        let var = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4A>G")).unwrap();
        let g = m.c_to_g(&var).unwrap();
        let back = m.g_to_c(&g, PLUS_TRANSCRIPT_AC).unwrap();
        assert_eq!(format!("{}", back), format!("{}", var));
    }

    #[test]
    fn c_to_g_minus_strand_complements_the_edit() {
        let m = mapper();
        let var = crate::parser::parse(&format!("{MINUS_TRANSCRIPT_AC}:c.4A>G")).unwrap();
        let g = m.c_to_g(&var).unwrap();
        // c.4 is dense transcript position 3, which maps to dense genomic
        // position 2008 - 3 = 2005, i.e. 1-based g.2006; the edit is complemented.
        assert_eq!(format!("{}", g), "NC_TEST.2:g.2006T>C");
    }

    #[test]
    fn g_to_c_minus_strand_round_trips() {
        let m = mapper();
        let var = crate::parser::parse(&format!("{MINUS_TRANSCRIPT_AC}:c.4A>G")).unwrap();
        let g = m.c_to_g(&var).unwrap();
        let back = m.g_to_c(&g, MINUS_TRANSCRIPT_AC).unwrap();
        assert_eq!(format!("{}", back), format!("{}", var));
    }

    #[test]
    fn c_to_p_missense() {
        let m = mapper();
        let var = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4A>G")).unwrap();
        let p = m.c_to_p(&var).unwrap();
        match p {
            HgvsVariant::ProteinVariant { accession, loc_edit, .. } => {
                assert_eq!(accession.value, PLUS_PROTEIN_AC);
                match loc_edit {
                    ProteinLocEdit::Ordinary { pos, edit, .. } => {
                        assert_eq!(pos.start.aa, "Lys");
                        assert_eq!(pos.start.pos, HgvsProteinPos(2));
                        assert_eq!(
                            edit,
                            ProteinEdit::Subst {
                                alternative: "Glu".to_string()
                            }
                        );
                    }
                    other => panic!("expected Ordinary, got {:?}", other),
                }
            }
            other => panic!("expected ProteinVariant, got {:?}", other),
        }
    }

    #[test]
    fn c_to_p_nonsense() {
        let m = mapper();
        // c.4A>T turns codon 2 (AAA, Lys) into TAA, a stop.
        let var = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4A>T")).unwrap();
        let p = m.c_to_p(&var).unwrap();
        match p {
            HgvsVariant::ProteinVariant { loc_edit, .. } => match loc_edit {
                ProteinLocEdit::Ordinary { edit, .. } => {
                    assert_eq!(
                        edit,
                        ProteinEdit::Subst {
                            alternative: "Ter".to_string()
                        }
                    );
                }
                other => panic!("expected Ordinary, got {:?}", other),
            },
            other => panic!("expected ProteinVariant, got {:?}", other),
        }
    }

    #[test]
    fn c_to_p_synonymous() {
        let m = mapper();
        // ATG AAA TAA: third base of codon 2 (AAA -> AAG) is still Lys.
        let var = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.6A>G")).unwrap();
        let p = m.c_to_p(&var).unwrap();
        match p {
            HgvsVariant::ProteinVariant { loc_edit, .. } => match loc_edit {
                ProteinLocEdit::Ordinary { edit, .. } => assert_eq!(edit, ProteinEdit::Ident),
                other => panic!("expected Ordinary, got {:?}", other),
            },
            other => panic!("expected ProteinVariant, got {:?}", other),
        }
    }

    #[test]
    fn wrong_variant_kind_is_an_error() {
        let m = mapper();
        let var = crate::parser::parse("NC_TEST.1:g.1004A>G").unwrap();
        assert!(matches!(
            m.c_to_g(&var),
            Err(Error::WrongVariantKind { expected: "c.", .. })
        ));
    }

    #[test]
    fn gene_symbol_carries_through_mapping() {
        let m = mapper();
        let var = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}({GENE_SYMBOL}):c.4A>G")).unwrap();
        let g = m.c_to_g(&var).unwrap();
        assert_eq!(g.gene_symbol().map(|s| s.value.as_str()), Some(GENE_SYMBOL));
    }

    #[test]
    fn tx_to_g_maps_n_dot_from_transcription_start() {
        let m = mapper();
        // `n.4` counts from the transcription start, same dense offset as
        // `c.4` here since this fixture transcript has no 5' UTR.
        let var = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:n.4A>G")).unwrap();
        let g = m.tx_to_g(&var).unwrap();
        assert_eq!(format!("{}", g), "NC_TEST.1:g.1004A>G");
    }

    #[test]
    fn g_to_tx_is_the_inverse_of_tx_to_g_for_n_dot() {
        let m = mapper();
        let var = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:n.4A>G")).unwrap();
        let g = m.tx_to_g(&var).unwrap();
        let back = m.g_to_tx(&g, PLUS_TRANSCRIPT_AC, 'n').unwrap();
        assert_eq!(format!("{}", back), format!("{}", var));
    }

    #[test]
    fn tx_to_g_rejects_protein_variants() {
        let m = mapper();
        let var = crate::parser::parse(&format!("{PLUS_PROTEIN_AC}:p.Lys2Glu")).unwrap();
        assert!(matches!(
            m.tx_to_g(&var),
            Err(Error::WrongVariantKind { expected: "c./n./r.", .. })
        ));
    }
}
