//! The equivalence engine: decides whether two variant descriptions name
//! the same biological event, per `spec.md` §4.4.
//!
//! Grounded on `hgvs-rs::mapper::variant::Mapper`'s `g_to_c`/`c_to_g`
//! primitives (reused here via [`crate::mapper::Mapper::tx_to_g`] /
//! [`crate::mapper::Mapper::g_to_tx`] to route every nucleic-acid pairing
//! through a single genomic comparison) and on
//! `hgvs-rs::sequences::{trim_common_prefixes, trim_common_suffixes}`'s
//! sequence-diffing building blocks, which [`crate::sequences::apply_edit`]
//! already generalizes for the mapper and normalizer; this module is the
//! third consumer.

mod error;

pub use error::Error;

use std::mem::discriminant;
use std::rc::Rc;

use crate::coords::{GenomicPos, HgvsGenomicPos, Interval, ProteinPos};
use crate::data::{DataProvider, IdentifierType};
use crate::mapper::{self, Mapper};
use crate::parser::{HgvsVariant, NaEdit, ProteinEdit, ProteinLocEdit, ProteinPosition};
use crate::sequences::apply_edit;
use crate::{aminoacids, normalizer};

/// Verdict of [`Equivalence::compare`], per `spec.md` §4.4.
///
/// A first-class four-valued enum, not a boolean: `Analogous` carries
/// biological meaning (the two descriptions are textually different but
/// equivalent redundant notations of the same event) that a caller may
/// treat differently from `Identity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The two variants are the same description (after normalization).
    Identity,
    /// The two variants differ textually but project onto the same edited
    /// sequence, or differ only in observed/predicted bracket state.
    Analogous,
    /// The two variants describe different edits.
    Different,
    /// A required transcript or sequence was unavailable, or an input
    /// could not be mapped into a comparable coordinate space.
    Unknown,
}

/// Behavior knobs for the equivalence engine, resolving the Open Question
/// `spec.md` §9 leaves to the implementation (window size `k`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Bases (nucleic acid) or residues (protein) of context fetched on
    /// each side of an edit before projecting it for comparison.
    pub projection_window: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self { projection_window: 50 }
    }
}

/// Decides biological equivalence between two [`HgvsVariant`]s.
pub struct Equivalence {
    config: Config,
    provider: Rc<dyn DataProvider>,
    mapper: Mapper,
}

impl Equivalence {
    pub fn new(config: Config, provider: Rc<dyn DataProvider>) -> Self {
        let mapper = Mapper::new(mapper::Config::default(), Rc::clone(&provider));
        Self { config, provider, mapper }
    }

    pub fn provider(&self) -> &Rc<dyn DataProvider> {
        &self.provider
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compares two variants, per `spec.md` §4.4.
    ///
    /// Expands gene-symbol accessions on either side (§4.4.1) and succeeds
    /// with the best verdict found across every expanded pair: `Identity`
    /// if any pair is identical, else `Analogous` if any pair is
    /// analogous, else `Different` if any pair was conclusively compared,
    /// else `Unknown`.
    pub fn compare(&self, a: &HgvsVariant, b: &HgvsVariant) -> Verdict {
        let exp_a = self.expand(a);
        let exp_b = self.expand(b);

        let mut best = Verdict::Unknown;
        for ea in &exp_a {
            for eb in &exp_b {
                best = rank_max(best, self.compare_pair(ea, eb));
                if best == Verdict::Identity {
                    return Verdict::Identity;
                }
            }
        }
        best
    }

    /// Gene-symbol expansion, per `spec.md` §4.4.1: if `var`'s accession
    /// classifies as a gene symbol, resolve it to the concrete accessions
    /// compatible with `var`'s coordinate kind. Otherwise `var` is its own
    /// (singleton) expansion.
    fn expand(&self, var: &HgvsVariant) -> Vec<HgvsVariant> {
        let ac = &var.accession().value;
        if self.provider.get_identifier_type(ac) != IdentifierType::GeneSymbol {
            return vec![var.clone()];
        }

        let target_kind = match var.kind() {
            'p' => IdentifierType::ProteinAccession,
            'c' | 'n' | 'r' => IdentifierType::TranscriptAccession,
            'g' | 'm' => IdentifierType::GenomicAccession,
            _ => return vec![var.clone()],
        };

        match self.provider.get_symbol_accessions(ac, IdentifierType::GeneSymbol, target_kind) {
            Ok(candidates) => candidates
                .into_iter()
                .filter(|(kind, _)| *kind == target_kind)
                .map(|(_, accession)| with_accession(var, accession))
                .collect(),
            Err(_) => vec![],
        }
    }

    /// Strategy dispatch, per `spec.md` §4.4.2's table.
    fn compare_pair(&self, a: &HgvsVariant, b: &HgvsVariant) -> Verdict {
        let (ka, kb) = (a.kind(), b.kind());
        let is_genomic = |k: char| k == 'g' || k == 'm';
        let is_tx = |k: char| k == 'c' || k == 'n' || k == 'r';

        if is_genomic(ka) && is_genomic(kb) {
            return self.compare_genomic(a, b);
        }
        if is_tx(ka) && is_tx(kb) {
            return match (self.mapper.tx_to_g(a), self.mapper.tx_to_g(b)) {
                (Ok(ga), Ok(gb)) => self.compare_genomic(&ga, &gb),
                _ => Verdict::Unknown,
            };
        }
        if is_genomic(ka) && is_tx(kb) {
            return match self.mapper.tx_to_g(b) {
                Ok(gb) => self.compare_genomic(a, &gb),
                Err(_) => Verdict::Unknown,
            };
        }
        if is_tx(ka) && is_genomic(kb) {
            return match self.mapper.tx_to_g(a) {
                Ok(ga) => self.compare_genomic(&ga, b),
                Err(_) => Verdict::Unknown,
            };
        }
        if is_genomic(ka) && kb == 'p' {
            return self.compare_g_p(a, b);
        }
        if ka == 'p' && is_genomic(kb) {
            return self.compare_g_p(b, a);
        }
        if ka == 'c' && kb == 'p' {
            return self.compare_c_p(a, b);
        }
        if ka == 'p' && kb == 'c' {
            return self.compare_c_p(b, a);
        }
        if ka == 'p' && kb == 'p' {
            return self.compare_protein(a, b);
        }

        // Mismatched or otherwise unhandled kind pairing: fall back to
        // direct string equality, per `spec.md` §4.4.2's table.
        if format!("{a}") == format!("{b}") {
            Verdict::Identity
        } else {
            Verdict::Different
        }
    }

    /// `g↔g`, `m↔m`: normalize both, compare canonicalized strings, then
    /// fall back to a projected-sequence comparison.
    fn compare_genomic(&self, a: &HgvsVariant, b: &HgvsVariant) -> Verdict {
        if a.accession().value != b.accession().value {
            return Verdict::Unknown;
        }

        let normalizer = normalizer::Normalizer::new(normalizer::Config::default(), Rc::clone(&self.provider));
        let (norm_a, norm_b) = match (normalizer.normalize(a), normalizer.normalize(b)) {
            (Ok(a), Ok(b)) => (a, b),
            _ => return Verdict::Unknown,
        };
        if format!("{norm_a}") == format!("{norm_b}") {
            // `spec.md` §8 Scenario 4: `g.10_11insA` and `g.10dup` both
            // normalize to the same canonical duplication, but they were
            // written with different edit *kinds* (`ins` vs `dup`) before
            // normalization folded one into the other. Treat that as the
            // scenario specifies — `Analogous`, a redundant restatement,
            // not `Identity` — and reserve `Identity` for inputs that
            // already agreed on edit kind going in.
            if na_edit_kind_matches(a, b) {
                return Verdict::Identity;
            }
            return Verdict::Analogous;
        }

        self.project_and_compare_na(&norm_a, &norm_b)
    }

    /// `reconcile_projections`, per `spec.md` §4.4.3: project both variants
    /// onto a shared window of reference sequence, apply each edit, and
    /// compare the resulting windows. Recognizes redundant descriptions
    /// (`g.10_11insA` ≡ `g.10dup`) because both resolve to the same edited
    /// window regardless of how each was written.
    fn project_and_compare_na(&self, a: &HgvsVariant, b: &HgvsVariant) -> Verdict {
        let (accession, loc_a) = match a {
            HgvsVariant::GenomeVariant { accession, loc_edit, .. }
            | HgvsVariant::MitochondrialVariant { accession, loc_edit, .. } => (accession, loc_edit),
            _ => return Verdict::Unknown,
        };
        let loc_b = match b {
            HgvsVariant::GenomeVariant { loc_edit, .. } | HgvsVariant::MitochondrialVariant { loc_edit, .. } => {
                loc_edit
            }
            _ => return Verdict::Unknown,
        };

        let int_a = loc_a.loc.inner();
        let int_b = loc_b.loc.inner();
        let edit_a = loc_a.edit.inner();
        let edit_b = loc_b.edit.inner();

        let k = self.config.projection_window;
        let (sa, ea) = half_open_bounds_genomic(int_a, edit_a);
        let (sb, eb) = half_open_bounds_genomic(int_b, edit_b);
        let win_start = (sa.min(sb) - k).max(0);
        let win_end = ea.max(eb) + k;

        let window = match self.provider.get_seq(&accession.value, win_start, win_end, IdentifierType::GenomicAccession) {
            Ok(s) => s,
            Err(_) => return Verdict::Unknown,
        };
        let local = |p: i64| (p - win_start).max(0) as usize;

        let edited_a = apply_edit(&window, local(sa), local(ea), edit_a);
        let edited_b = apply_edit(&window, local(sb), local(eb), edit_b);

        if edited_a == edited_b {
            Verdict::Analogous
        } else {
            Verdict::Different
        }
    }

    /// `c↔p`: map the `c.` variant to `p.` and compare to `b` via
    /// [`Self::compare_protein`].
    fn compare_c_p(&self, c_var: &HgvsVariant, p_var: &HgvsVariant) -> Verdict {
        if !matches!(c_var, HgvsVariant::CdsVariant { .. }) {
            return if format!("{c_var}") == format!("{p_var}") {
                Verdict::Identity
            } else {
                Verdict::Different
            };
        }
        match self.mapper.c_to_p(c_var) {
            Ok(predicted) => self.compare_protein(&predicted, p_var),
            Err(_) => Verdict::Unknown,
        }
    }

    /// `g↔p`: for each transcript associated with either variant's gene
    /// symbol, map `g.` → `c.` → `p.` and compare. The CORE's
    /// [`DataProvider`] contract has no genomic-to-transcript reverse
    /// lookup (`spec.md` §6.1's four operations are all accession-keyed),
    /// so candidate transcripts can only be discovered through a gene
    /// symbol carried on either input; absent one, the verdict is
    /// `Unknown` rather than guessed at. Recorded in DESIGN.md.
    fn compare_g_p(&self, g_var: &HgvsVariant, p_var: &HgvsVariant) -> Verdict {
        let Some(symbol) = g_var.gene_symbol().or_else(|| p_var.gene_symbol()) else {
            return Verdict::Unknown;
        };
        let candidates = match self.provider.get_symbol_accessions(
            &symbol.value,
            IdentifierType::GeneSymbol,
            IdentifierType::TranscriptAccession,
        ) {
            Ok(v) => v,
            Err(_) => return Verdict::Unknown,
        };

        let mut best = Verdict::Unknown;
        for (kind, transcript_ac) in candidates {
            if kind != IdentifierType::TranscriptAccession {
                continue;
            }
            let verdict = match self.mapper.g_to_tx(g_var, &transcript_ac, 'c') {
                Ok(c_var) => self.compare_c_p(&c_var, p_var),
                Err(_) => Verdict::Unknown,
            };
            best = rank_max(best, verdict);
            if best == Verdict::Identity {
                break;
            }
        }
        best
    }

    /// `p↔p`: projection and unification, per `spec.md` §4.4.4, plus the
    /// observed-vs-predicted rule of §4.4.5.
    fn compare_protein(&self, a: &HgvsVariant, b: &HgvsVariant) -> Verdict {
        let (acc_a, loc_a) = match a {
            HgvsVariant::ProteinVariant { accession, loc_edit, .. } => (accession, loc_edit),
            _ => return Verdict::Unknown,
        };
        let (acc_b, loc_b) = match b {
            HgvsVariant::ProteinVariant { accession, loc_edit, .. } => (accession, loc_edit),
            _ => return Verdict::Unknown,
        };

        use ProteinLocEdit::*;
        match (loc_a, loc_b) {
            (NoChange, NoChange)
            | (NoChangeUncertain, NoChangeUncertain)
            | (NoProtein, NoProtein)
            | (NoProteinUncertain, NoProteinUncertain) => return Verdict::Identity,
            (NoChange, NoChangeUncertain)
            | (NoChangeUncertain, NoChange)
            | (NoProtein, NoProteinUncertain)
            | (NoProteinUncertain, NoProtein) => return Verdict::Analogous,
            (Ordinary { .. }, Ordinary { .. }) => {}
            _ => {
                return if format!("{a}") == format!("{b}") {
                    Verdict::Identity
                } else {
                    Verdict::Different
                }
            }
        }

        let (pos_a, edit_a, pred_a) = match loc_a {
            Ordinary { pos, edit, predicted } => (pos, edit, *predicted),
            _ => unreachable!("matched above"),
        };
        let (pos_b, edit_b, pred_b) = match loc_b {
            Ordinary { pos, edit, predicted } => (pos, edit, *predicted),
            _ => unreachable!("matched above"),
        };

        if acc_a.value != acc_b.value {
            return self.compare_protein_text_fallback(a, b, pred_a, pred_b);
        }

        let k = self.config.projection_window;
        let (sa, ea) = half_open_bounds_protein(pos_a, edit_a);
        let (sb, eb) = half_open_bounds_protein(pos_b, edit_b);
        let win_start = (sa.min(sb) - k).max(0);
        let win_end = ea.max(eb) + k;

        let window = match self.provider.get_seq(&acc_a.value, win_start, win_end, IdentifierType::ProteinAccession) {
            Ok(s) => s,
            Err(_) => return Verdict::Unknown,
        };
        let local = |p: i64| (p - win_start).max(0) as usize;

        let edited_a = apply_protein_edit(&window, local(sa), local(ea), edit_a);
        let edited_b = apply_protein_edit(&window, local(sb), local(eb), edit_b);

        match (edited_a, edited_b) {
            (Some(wa), Some(wb)) if unify_with_wildcards(&wa, &wb) => {
                if format!("{a}") == format!("{b}") {
                    Verdict::Identity
                } else {
                    Verdict::Analogous
                }
            }
            (Some(_), Some(_)) => Verdict::Different,
            // `Fs`/`Ext` reach past the projected window: reconstructing the
            // post-frameshift residues needs the underlying transcript, not
            // just the reference protein, so fall back to text comparison.
            _ => self.compare_protein_text_fallback(a, b, pred_a, pred_b),
        }
    }

    fn compare_protein_text_fallback(&self, a: &HgvsVariant, b: &HgvsVariant, pred_a: bool, pred_b: bool) -> Verdict {
        if canonical_protein_text(a) != canonical_protein_text(b) {
            return Verdict::Different;
        }
        if pred_a == pred_b {
            Verdict::Identity
        } else {
            Verdict::Analogous
        }
    }
}

fn rank(v: Verdict) -> u8 {
    match v {
        Verdict::Identity => 3,
        Verdict::Analogous => 2,
        Verdict::Different => 1,
        Verdict::Unknown => 0,
    }
}

fn rank_max(a: Verdict, b: Verdict) -> Verdict {
    if rank(b) > rank(a) {
        b
    } else {
        a
    }
}

/// Clone of `var` with its accession replaced, used by gene-symbol
/// expansion to turn one candidate accession into a concrete `Variant`.
fn with_accession(var: &HgvsVariant, new_accession: String) -> HgvsVariant {
    let mut out = var.clone();
    match &mut out {
        HgvsVariant::GenomeVariant { accession, .. }
        | HgvsVariant::MitochondrialVariant { accession, .. }
        | HgvsVariant::CdsVariant { accession, .. }
        | HgvsVariant::TranscriptVariant { accession, .. }
        | HgvsVariant::RnaVariant { accession, .. }
        | HgvsVariant::ProteinVariant { accession, .. } => accession.value = new_accession,
    }
    out
}

/// Whether `a` and `b`'s nucleic-acid edits were written with the same
/// `NaEdit` variant tag *before* normalization. Two inputs that already
/// agreed on edit kind (e.g. both `dup`, just disagreeing on coordinates
/// within a repeat) and normalize to the same string are the same
/// description, `Identity`; two inputs using different edit kinds
/// (`ins` vs `dup`) that normalization happens to fold together are
/// redundant restatements of one event, `Analogous` — see `spec.md` §8
/// Scenario 4.
fn na_edit_kind_matches(a: &HgvsVariant, b: &HgvsVariant) -> bool {
    let edit = |v: &HgvsVariant| match v {
        HgvsVariant::GenomeVariant { loc_edit, .. } | HgvsVariant::MitochondrialVariant { loc_edit, .. } => {
            Some(loc_edit.edit.inner())
        }
        _ => None,
    };
    match (edit(a), edit(b)) {
        (Some(ea), Some(eb)) => discriminant(ea) == discriminant(eb),
        _ => false,
    }
}

/// The half-open `[start, end)` dense genomic span an edit touches, per the
/// same `ins`-is-a-point-not-a-span convention [`crate::normalizer`] uses.
fn half_open_bounds_genomic(interval: &Interval<HgvsGenomicPos>, edit: &NaEdit) -> (i64, i64) {
    let start: GenomicPos = interval.start.into();
    let end: GenomicPos = interval.end.into();
    match edit {
        NaEdit::Insertion { .. } => (start.0 + 1, start.0 + 1),
        _ => (start.0, end.0 + 1),
    }
}

/// The half-open `[start, end)` dense protein span an edit touches. `Ins`
/// is written as two flanking residues in HGVS, so its span is the point
/// between them (`end`'s dense position), mirroring the nucleic-acid case.
fn half_open_bounds_protein(pos: &Interval<ProteinPosition>, edit: &ProteinEdit) -> (i64, i64) {
    let start: ProteinPos = pos.start.pos.into();
    let end: ProteinPos = pos.end.pos.into();
    match edit {
        ProteinEdit::Ins { .. } => (end.0, end.0),
        _ => (start.0, end.0 + 1),
    }
}

/// Apply a protein edit to a one-letter reference window over
/// `[local_start, local_end)`. Returns `None` for `Fs`/`Ext`: reconstructing
/// the residues past a frameshift or extension needs the underlying
/// transcript's reading frame, which this window-only view doesn't carry.
fn apply_protein_edit(window: &str, local_start: usize, local_end: usize, edit: &ProteinEdit) -> Option<String> {
    let local_start = local_start.min(window.len());
    let local_end = local_end.clamp(local_start, window.len());
    let prefix = &window[..local_start];
    let suffix = &window[local_end..];
    let span = &window[local_start..local_end];

    match edit {
        ProteinEdit::Ident => Some(window.to_string()),
        ProteinEdit::Subst { alternative } => Some(format!("{prefix}{}{suffix}", aminoacids::aa_to_aa1(alternative).ok()?)),
        ProteinEdit::DelIns { alternative } => {
            Some(format!("{prefix}{}{suffix}", aminoacids::aa_to_aa1(alternative).ok()?))
        }
        ProteinEdit::Ins { alternative } => Some(format!("{prefix}{}{suffix}", aminoacids::aa_to_aa1(alternative).ok()?)),
        ProteinEdit::Del => Some(format!("{prefix}{suffix}")),
        ProteinEdit::Dup => Some(format!("{prefix}{span}{span}{suffix}")),
        ProteinEdit::Fs { .. } | ProteinEdit::Ext { .. } => None,
    }
}

/// Whether two equal-length one-letter protein windows unify: identical
/// residues match, and an `Xaa`/`?` (`X`) token on either side binds to
/// whatever the other side has. A simplified, purely local form of the
/// global-assignment unification `spec.md` §4.4.4 describes — sufficient
/// to detect the common redundant-description cases (e.g. a poly-alanine
/// duplication named from either flank) without a full constraint solver.
fn unify_with_wildcards(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.bytes().zip(b.bytes()).all(|(x, y)| x == y || x == b'X' || y == b'X')
}

/// Formats a protein variant with its `predicted` bracket forced off, so
/// two descriptions can be compared ignoring observed-vs-predicted state
/// (`spec.md` §4.4.5: `p.(X)` and `p.X` are `Analogous`, not `Different`).
fn canonical_protein_text(v: &HgvsVariant) -> String {
    let mut v = v.clone();
    if let HgvsVariant::ProteinVariant {
        loc_edit: ProteinLocEdit::Ordinary { predicted, .. },
        ..
    } = &mut v
    {
        *predicted = false;
    }
    format!("{v}")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::{provider, GENE_SYMBOL, PLUS_PROTEIN_AC, PLUS_TRANSCRIPT_AC};
    use pretty_assertions::assert_eq;

    fn engine() -> Equivalence {
        Equivalence::new(Config::default(), provider())
    }

    #[test]
    fn reflexive_and_symmetric_for_genomic_variants() {
        let eq = engine();
        let a = crate::parser::parse("NC_TEST.1:g.1004A>G").unwrap();
        let b = crate::parser::parse("NC_TEST.1:g.1004A>T").unwrap();
        assert_eq!(eq.compare(&a, &a), Verdict::Identity);
        assert_eq!(eq.compare(&a, &b), eq.compare(&b, &a));
    }

    #[test]
    fn identical_c_dot_substitutions_are_identity() {
        let eq = engine();
        let a = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4A>G")).unwrap();
        let b = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4A>G")).unwrap();
        assert_eq!(eq.compare(&a, &b), Verdict::Identity);
    }

    #[test]
    fn different_alt_alleles_are_different() {
        let eq = engine();
        let a = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4A>G")).unwrap();
        let b = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4A>T")).unwrap();
        assert_eq!(eq.compare(&a, &b), Verdict::Different);
    }

    #[test]
    fn c_dot_and_g_dot_agree_via_mapping() {
        let eq = engine();
        let c = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4A>G")).unwrap();
        let g = crate::parser::parse("NC_TEST.1:g.1004A>G").unwrap();
        assert_eq!(eq.compare(&c, &g), Verdict::Identity);
        assert_eq!(eq.compare(&g, &c), Verdict::Identity);
    }

    #[test]
    fn indel_redundancy_is_analogous_not_identical() {
        let eq = engine();
        // `spec.md` §8 Scenario 4: both describe a duplication of the last
        // base of the `A` run, but one is written as an `ins` and the
        // other as a `dup` — redundant notations of the same event, so
        // `Analogous`, not `Identity`.
        let a = crate::parser::parse("NC_TEST.1:g.1003_1004insA").unwrap();
        let b = crate::parser::parse("NC_TEST.1:g.1006dup").unwrap();
        assert_eq!(eq.compare(&a, &b), Verdict::Analogous);
    }

    #[test]
    fn c_to_p_projection_matches_direct_protein_description() {
        let eq = engine();
        let c = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4A>G")).unwrap();
        let p = crate::parser::parse(&format!("{PLUS_PROTEIN_AC}:p.(Lys2Glu)")).unwrap();
        assert_eq!(eq.compare(&c, &p), Verdict::Identity);
        assert_eq!(eq.compare(&p, &c), Verdict::Identity);
    }

    #[test]
    fn observed_and_predicted_protein_forms_are_analogous_not_identical() {
        let eq = engine();
        let predicted = crate::parser::parse(&format!("{PLUS_PROTEIN_AC}:p.(Lys2Glu)")).unwrap();
        let observed = crate::parser::parse(&format!("{PLUS_PROTEIN_AC}:p.Lys2Glu")).unwrap();
        assert_eq!(eq.compare(&predicted, &observed), Verdict::Analogous);
    }

    #[test]
    fn gene_symbol_expansion_finds_the_matching_transcript() {
        let eq = engine();
        let symbolic = crate::parser::parse(&format!("{GENE_SYMBOL}:c.4A>G")).unwrap();
        let concrete = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4A>G")).unwrap();
        assert_eq!(eq.compare(&symbolic, &concrete), Verdict::Identity);
    }

    #[test]
    fn unresolvable_gene_symbol_is_unknown() {
        let eq = engine();
        let symbolic = crate::parser::parse("NOSUCHGENE:c.4A>G").unwrap();
        let concrete = crate::parser::parse(&format!("{PLUS_TRANSCRIPT_AC}:c.4A>G")).unwrap();
        assert_eq!(eq.compare(&symbolic, &concrete), Verdict::Unknown);
    }

    #[test]
    fn different_accessions_on_incomparable_kinds_are_unknown() {
        let eq = engine();
        let a = crate::parser::parse("NC_TEST.1:g.1004A>G").unwrap();
        let b = crate::parser::parse("NC_TEST.2:g.1004A>G").unwrap();
        assert_eq!(eq.compare(&a, &b), Verdict::Unknown);
    }
}
