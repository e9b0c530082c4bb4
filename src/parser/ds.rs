//! Data structures for representing HGVS variant descriptions.
//!
//! Collapses `hgvs-rs`'s six near-identical `{Cds,Genome,Mt,Tx,Rna}PosEdit`
//! structs (and their shared, runtime-tagged `Interval { pos_type, pos, end }`)
//! into one generic [`LocEdit<P>`], parameterized over the coordinate-kind
//! newtypes from [`crate::coords`]. Those newtypes already carry the
//! distinction the teacher encoded with six near-duplicate structs and a
//! `PosType` tag, so a single generic is enough.

use crate::coords::{HgvsGenomicPos, HgvsProteinPos, HgvsTranscriptPos, Interval, Uncertain};

/// Representation of an accession, e.g. `NM_01234.5`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Accession {
    pub value: String,
}

/// Representation of a gene symbol, e.g. `TTN` or `Ttn`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeneSymbol {
    pub value: String,
}

/// A position and reference residue on a protein, e.g. the `Gln4` in `p.Gln4Ter`.
///
/// `aa` is always normalized to the three-letter form at parse time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProteinPosition {
    pub aa: String,
    pub pos: HgvsProteinPos,
}

/// Location and edit shared by the `g.`/`m.`/`c.`/`n.`/`r.` kinds, generic
/// over the kind's native position type (`HgvsGenomicPos` or
/// `HgvsTranscriptPos`).
#[derive(Clone, Debug, PartialEq)]
pub struct LocEdit<P> {
    pub loc: Uncertain<Interval<P>>,
    pub edit: Uncertain<NaEdit>,
}

/// Edit of nucleic acids. DNA alphabet for `g`/`m`/`c`/`n`, RNA alphabet
/// (lowercase `acgu`) for `r`; the parser enforces the alphabet per kind,
/// this type just carries whichever text it was given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NaEdit {
    /// `=`
    Identity,
    /// `ref>alt`
    Substitution {
        reference: String,
        alternative: String,
    },
    /// `del` or `delREF`; `reference` is `None` when the sequence was
    /// omitted and must be inferred from the location.
    Deletion { reference: Option<String> },
    /// `insALT`
    Insertion { alternative: String },
    /// `dup` or `dupREF`
    Duplication { reference: Option<String> },
    /// `inv`
    Inversion,
    /// `delinsALT`
    Delins { alternative: String },
    /// `unit[count]`
    Repeat { unit: String, count: u32 },
}

/// Uncertain change in protein length through a frameshift or extension,
/// e.g. the `23` in `fsTer23`, or the `?` in `fsTer?`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UncertainChange {
    /// No terminal given, e.g. bare `fs`.
    None,
    /// `Ter?`
    Unknown,
    /// `Ter<count>`
    Known(i32),
}

/// Edit of a protein sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProteinEdit {
    /// Frameshift: `alternative` is the first replaced residue, `terminal`
    /// is the three-letter code of the new stop (almost always `Ter`),
    /// `length` is the distance to it.
    Fs {
        alternative: Option<String>,
        terminal: Option<String>,
        length: UncertainChange,
    },
    /// Extension at either terminus: `aa_ext` is the residue the extension
    /// starts from, `ext_aa` the residue it ends on (the new initiator for
    /// an N-terminal extension, the replacement for the old stop codon for
    /// a C-terminal one), `change` the signed length of the extension.
    Ext {
        aa_ext: Option<String>,
        ext_aa: Option<String>,
        change: UncertainChange,
    },
    /// `Alt`, a single-residue substitution.
    Subst { alternative: String },
    /// `delinsALT`
    DelIns { alternative: String },
    /// `insALT`
    Ins { alternative: String },
    /// `del`
    Del,
    /// `dup`
    Dup,
    /// `=`, synonymous at this residue.
    Ident,
}

/// Location and edit for a `p.` variant, including the whole-protein special
/// forms (`p.=`, `p.(=)`, `p.0`, `p.0?`) that carry no location at all.
///
/// Unlike the nucleic-acid kinds (where `(...)` marks positional
/// uncertainty within an otherwise-certain variant), a `p.` variant's
/// parentheses wrap the whole consequence at once to mark it as *predicted*
/// from the `c.` change rather than *observed* directly — hence the single
/// `predicted` flag here instead of a per-field [`Uncertain`].
#[derive(Clone, Debug, PartialEq)]
pub enum ProteinLocEdit {
    Ordinary {
        pos: Interval<ProteinPosition>,
        edit: ProteinEdit,
        predicted: bool,
    },
    /// `p.=`: the protein sequence is unchanged.
    NoChange,
    /// `p.(=)`: predicted unchanged.
    NoChangeUncertain,
    /// `p.0`: no protein is produced.
    NoProtein,
    /// `p.0?`: no protein is predicted to be produced.
    NoProteinUncertain,
}

/// A parsed HGVS variant description.
#[derive(Clone, Debug, PartialEq)]
pub enum HgvsVariant {
    /// `g.`
    GenomeVariant {
        accession: Accession,
        reference_accession: Option<Accession>,
        gene_symbol: Option<GeneSymbol>,
        loc_edit: LocEdit<HgvsGenomicPos>,
    },
    /// `m.`
    MitochondrialVariant {
        accession: Accession,
        reference_accession: Option<Accession>,
        gene_symbol: Option<GeneSymbol>,
        loc_edit: LocEdit<HgvsGenomicPos>,
    },
    /// `c.`
    CdsVariant {
        accession: Accession,
        reference_accession: Option<Accession>,
        gene_symbol: Option<GeneSymbol>,
        loc_edit: LocEdit<HgvsTranscriptPos>,
    },
    /// `n.`
    TranscriptVariant {
        accession: Accession,
        reference_accession: Option<Accession>,
        gene_symbol: Option<GeneSymbol>,
        loc_edit: LocEdit<HgvsTranscriptPos>,
    },
    /// `r.`
    RnaVariant {
        accession: Accession,
        reference_accession: Option<Accession>,
        gene_symbol: Option<GeneSymbol>,
        loc_edit: LocEdit<HgvsTranscriptPos>,
    },
    /// `p.`
    ProteinVariant {
        accession: Accession,
        reference_accession: Option<Accession>,
        gene_symbol: Option<GeneSymbol>,
        loc_edit: ProteinLocEdit,
    },
}

impl HgvsVariant {
    pub fn accession(&self) -> &Accession {
        match self {
            HgvsVariant::GenomeVariant { accession, .. }
            | HgvsVariant::MitochondrialVariant { accession, .. }
            | HgvsVariant::CdsVariant { accession, .. }
            | HgvsVariant::TranscriptVariant { accession, .. }
            | HgvsVariant::RnaVariant { accession, .. }
            | HgvsVariant::ProteinVariant { accession, .. } => accession,
        }
    }

    pub fn gene_symbol(&self) -> Option<&GeneSymbol> {
        match self {
            HgvsVariant::GenomeVariant { gene_symbol, .. }
            | HgvsVariant::MitochondrialVariant { gene_symbol, .. }
            | HgvsVariant::CdsVariant { gene_symbol, .. }
            | HgvsVariant::TranscriptVariant { gene_symbol, .. }
            | HgvsVariant::RnaVariant { gene_symbol, .. }
            | HgvsVariant::ProteinVariant { gene_symbol, .. } => gene_symbol.as_ref(),
        }
    }

    /// Single-letter kind tag (`g`, `m`, `c`, `n`, `r`, `p`).
    pub fn kind(&self) -> char {
        match self {
            HgvsVariant::GenomeVariant { .. } => 'g',
            HgvsVariant::MitochondrialVariant { .. } => 'm',
            HgvsVariant::CdsVariant { .. } => 'c',
            HgvsVariant::TranscriptVariant { .. } => 'n',
            HgvsVariant::RnaVariant { .. } => 'r',
            HgvsVariant::ProteinVariant { .. } => 'p',
        }
    }
}
