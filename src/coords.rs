//! Coordinate spaces and position arithmetic.
//!
//! HGVS positions live in more coordinate spaces than a single integer can
//! safely represent: genomic, transcript and protein positions each have a
//! dense, 0-based internal form and a 1-based (sometimes zero-skipping)
//! external form. Mixing spaces is a mistake the type system should catch,
//! so each space gets its own newtype rather than a shared tagged integer
//! (contrast `hgvs-rs`'s `parser::ds::PosType`, a runtime tag the teacher
//! carried over from a duck-typed Python source).

use std::cmp::Ordering;
use std::fmt;

/// Strand of a transcript alignment relative to its reference sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Plus,
    Minus,
}

impl Strand {
    pub fn flip(self) -> Strand {
        match self {
            Strand::Plus => Strand::Minus,
            Strand::Minus => Strand::Plus,
        }
    }
}

/// Converts a 1-based, zero-skipping coordinate to a dense 0-based one.
///
/// This is the single place the `c.`/`n.` "there is no position 0" rule is
/// implemented; every other conversion in the crate routes through this
/// pair of functions instead of re-deriving the rule. Ported from
/// `hgvs-rs`'s `mapper::alignment::{hgvs_to_zbc, zbc_to_hgvs}`.
pub fn to_zero_based(base: i64) -> i64 {
    if base >= 1 {
        base - 1
    } else {
        base
    }
}

/// Inverse of [`to_zero_based`].
pub fn from_zero_based(i: i64) -> i64 {
    if i >= 0 {
        i + 1
    } else {
        i
    }
}

/// Successor of a 1-based, zero-skipping base count: `succ(-1) == 1`.
pub fn succ(base: i64) -> i64 {
    from_zero_based(to_zero_based(base) + 1)
}

/// Predecessor of a 1-based, zero-skipping base count: `pred(1) == -1`.
pub fn pred(base: i64) -> i64 {
    from_zero_based(to_zero_based(base) - 1)
}

macro_rules! dense_pos {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub i64);

        impl $name {
            pub fn checked_add(self, delta: i64) -> Option<Self> {
                self.0.checked_add(delta).map(Self)
            }

            pub fn distance_to(self, other: Self) -> i64 {
                other.0 - self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

dense_pos!(
    GenomicPos,
    "0-based inclusive position on a chromosome or mitochondrial genome."
);
dense_pos!(
    TranscriptPos,
    "0-based inclusive position on the spliced transcript (exons joined end to end)."
);
dense_pos!(ProteinPos, "0-based inclusive position on a protein.");

/// 1-based genomic position, as written in `g.`/`m.` HGVS expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HgvsGenomicPos(pub i64);

impl From<GenomicPos> for HgvsGenomicPos {
    fn from(p: GenomicPos) -> Self {
        HgvsGenomicPos(p.0 + 1)
    }
}

impl From<HgvsGenomicPos> for GenomicPos {
    fn from(p: HgvsGenomicPos) -> Self {
        GenomicPos(p.0 - 1)
    }
}

impl fmt::Display for HgvsGenomicPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based protein position, as written in `p.` HGVS expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HgvsProteinPos(pub i64);

impl From<ProteinPos> for HgvsProteinPos {
    fn from(p: ProteinPos) -> Self {
        HgvsProteinPos(p.0 + 1)
    }
}

impl From<HgvsProteinPos> for ProteinPos {
    fn from(p: HgvsProteinPos) -> Self {
        ProteinPos(p.0 - 1)
    }
}

impl fmt::Display for HgvsProteinPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of the CDS an [`HgvsTranscriptPos`] is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CdsAnchor {
    /// Counted from the `A` of the start codon: `c.1`, `c.-1` (5' UTR), intron offsets.
    Start,
    /// Counted from the base after the stop codon: `c.*1`, `c.*2`, ...
    End,
}

/// 1-based, zero-skipping transcript position used by `c.`/`n.`/`r.` expressions.
///
/// `base` never reaches zero for `anchor == Start` ([`succ`]/[`pred`] enforce
/// this); `offset` is the signed intronic offset, `0` meaning exonic.
/// Converting to/from a dense [`TranscriptPos`] requires a transcript model
/// (exon structure and CDS bounds), so that conversion lives in
/// [`crate::transcript`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HgvsTranscriptPos {
    pub anchor: CdsAnchor,
    pub base: i64,
    pub offset: i64,
}

impl HgvsTranscriptPos {
    pub fn exonic(anchor: CdsAnchor, base: i64) -> Self {
        Self {
            anchor,
            base,
            offset: 0,
        }
    }

    pub fn is_exonic(&self) -> bool {
        self.offset == 0
    }

    pub fn is_intronic(&self) -> bool {
        self.offset != 0
    }

    /// A single `i64` key that sorts `HgvsTranscriptPos` values in transcript
    /// (5'→3') order regardless of anchor or intronic offset. Used for
    /// interval validation (`start <= end`) and shift-maximality comparisons.
    pub fn sort_key(&self) -> (i64, i64) {
        let anchor_base = match self.anchor {
            CdsAnchor::Start => to_zero_based(self.base),
            // Offset the `End` anchor's internal key far past any plausible
            // `Start`-anchored base so ordering between UTR sides is total.
            CdsAnchor::End => to_zero_based(self.base) + 1_000_000_000,
        };
        (anchor_base, self.offset)
    }
}

impl PartialOrd for HgvsTranscriptPos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HgvsTranscriptPos {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for HgvsTranscriptPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.anchor {
            CdsAnchor::Start => write!(f, "{}", self.base)?,
            CdsAnchor::End => write!(f, "*{}", self.base)?,
        }
        if self.offset > 0 {
            write!(f, "+{}", self.offset)?;
        } else if self.offset < 0 {
            write!(f, "{}", self.offset)?;
        }
        Ok(())
    }
}

/// A location: either a single position or a (possibly equal) start/end pair,
/// always in the kind's native position type. `start <= end` is not checked
/// here — see [`crate::parser::impl_validate`] — since uncertain positions
/// (`?`) make a generic check meaningless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval<P> {
    pub start: P,
    pub end: P,
}

impl<P: Clone> Interval<P> {
    pub fn single(pos: P) -> Self {
        Self {
            start: pos.clone(),
            end: pos,
        }
    }
}

impl<P: fmt::Display + PartialEq> fmt::Display for Interval<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}_{}", self.start, self.end)
        }
    }
}

/// A value that may be written with or without HGVS uncertainty parentheses,
/// e.g. a location `(30_40)` or a protein consequence `p.(Lys41Arg)`.
///
/// Ported from `hgvs-rs`'s `parser::ds::Mu<T>`, renamed for clarity outside
/// the teacher's Python-derived vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Uncertain<T> {
    Certain(T),
    Uncertain(T),
}

impl<T> Uncertain<T> {
    pub fn inner(&self) -> &T {
        match self {
            Uncertain::Certain(v) | Uncertain::Uncertain(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Uncertain::Certain(v) | Uncertain::Uncertain(v) => v,
        }
    }

    pub fn is_uncertain(&self) -> bool {
        matches!(self, Uncertain::Uncertain(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Uncertain<U> {
        match self {
            Uncertain::Certain(v) => Uncertain::Certain(f(v)),
            Uncertain::Uncertain(v) => Uncertain::Uncertain(f(v)),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Uncertain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uncertain::Certain(v) => write!(f, "{}", v),
            Uncertain::Uncertain(v) => write!(f, "({})", v),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_based_round_trip() {
        for base in [-5, -1, 1, 1, 5, 100] {
            assert_eq!(from_zero_based(to_zero_based(base)), base);
        }
    }

    #[test]
    fn succ_skips_zero() {
        assert_eq!(succ(-1), 1);
        assert_eq!(succ(1), 2);
        assert_eq!(succ(-3), -2);
        assert_eq!(pred(1), -1);
        assert_eq!(pred(2), 1);
        assert_eq!(pred(-2), -3);
    }

    #[test]
    fn hgvs_transcript_pos_orders_utr_before_cds() {
        let utr = HgvsTranscriptPos::exonic(CdsAnchor::Start, -1);
        let cds = HgvsTranscriptPos::exonic(CdsAnchor::Start, 1);
        assert!(utr < cds);
    }

    #[test]
    fn hgvs_transcript_pos_display_round_trip() {
        let p = HgvsTranscriptPos {
            anchor: CdsAnchor::Start,
            base: 123,
            offset: 5,
        };
        assert_eq!(format!("{}", p), "123+5");

        let p = HgvsTranscriptPos {
            anchor: CdsAnchor::End,
            base: 7,
            offset: -2,
        };
        assert_eq!(format!("{}", p), "*7-2");
    }

    #[test]
    fn genomic_pos_conversion_is_total() {
        let p0 = GenomicPos(0);
        let p1: HgvsGenomicPos = p0.into();
        assert_eq!(p1, HgvsGenomicPos(1));
        let back: GenomicPos = p1.into();
        assert_eq!(back, p0);
    }
}
