//! Amino acid naming and codon translation.
//!
//! Ported from `hgvs-rs`'s `sequences` module (its `AA3_TO_AA1_VEC` /
//! `DNA_TO_AA1_LUT_VEC` tables, generated there by `build.rs`; inlined here
//! as plain `static` data since this crate has no code-generation step).

use std::sync::LazyLock;

use ahash::AHashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid 1-letter amino acid {0:?} at residue {1}")]
    InvalidOneLetterAminoAcid(char, usize),
    #[error("invalid 3-letter amino acid {0:?} at residue {1}")]
    InvalidThreeLetterAminoAcid(String, usize),
    #[error("3-letter amino acid sequence length is not a multiple of three: {0}")]
    InvalidThreeLetterAminoAcidLength(usize),
    #[error("codon is undefined in the codon table: {0}")]
    UndefinedCodon(String),
    #[error("can only translate sequences whose length is a multiple of 3, but got {0}")]
    UntranslatableLength(usize),
}

/// One-letter code for "any amino acid" (`Xaa`/`?`).
pub const UNKNOWN_AA1: char = 'X';
/// Three-letter code for "any amino acid".
pub const UNKNOWN_AA3: &str = "Xaa";
/// One-letter code for a stop codon (`Ter`/`*`).
pub const STOP_AA1: char = '*';
/// Three-letter code for a stop codon.
pub const STOP_AA3: &str = "Ter";

const AA3_TO_AA1_VEC: &[(&str, char)] = &[
    ("Ala", 'A'),
    ("Arg", 'R'),
    ("Asn", 'N'),
    ("Asp", 'D'),
    ("Cys", 'C'),
    ("Gln", 'Q'),
    ("Glu", 'E'),
    ("Gly", 'G'),
    ("His", 'H'),
    ("Ile", 'I'),
    ("Leu", 'L'),
    ("Lys", 'K'),
    ("Met", 'M'),
    ("Phe", 'F'),
    ("Pro", 'P'),
    ("Ser", 'S'),
    ("Thr", 'T'),
    ("Trp", 'W'),
    ("Tyr", 'Y'),
    ("Val", 'V'),
    ("Xaa", 'X'),
    ("Ter", '*'),
    ("Sec", 'U'),
];

static AA3_TO_AA1: LazyLock<AHashMap<&'static str, char>> =
    LazyLock::new(|| AA3_TO_AA1_VEC.iter().copied().collect());

static AA1_TO_AA3: LazyLock<AHashMap<char, &'static str>> =
    LazyLock::new(|| AA3_TO_AA1_VEC.iter().map(|(aa3, aa1)| (*aa1, *aa3)).collect());

/// The standard genetic code, including the common IUPAC-degenerate codons
/// (`N`, `R`, `Y`, ...) that still translate unambiguously.
const DNA_TO_AA1_VEC: &[(&str, char)] = &[
    ("AAA", 'K'), ("AAC", 'N'), ("AAG", 'K'), ("AAT", 'N'),
    ("ACA", 'T'), ("ACC", 'T'), ("ACG", 'T'), ("ACT", 'T'),
    ("AGA", 'R'), ("AGC", 'S'), ("AGG", 'R'), ("AGT", 'S'),
    ("ATA", 'I'), ("ATC", 'I'), ("ATG", 'M'), ("ATT", 'I'),
    ("CAA", 'Q'), ("CAC", 'H'), ("CAG", 'Q'), ("CAT", 'H'),
    ("CCA", 'P'), ("CCC", 'P'), ("CCG", 'P'), ("CCT", 'P'),
    ("CGA", 'R'), ("CGC", 'R'), ("CGG", 'R'), ("CGT", 'R'),
    ("CTA", 'L'), ("CTC", 'L'), ("CTG", 'L'), ("CTT", 'L'),
    ("GAA", 'E'), ("GAC", 'D'), ("GAG", 'E'), ("GAT", 'D'),
    ("GCA", 'A'), ("GCC", 'A'), ("GCG", 'A'), ("GCT", 'A'),
    ("GGA", 'G'), ("GGC", 'G'), ("GGG", 'G'), ("GGT", 'G'),
    ("GTA", 'V'), ("GTC", 'V'), ("GTG", 'V'), ("GTT", 'V'),
    ("TAA", '*'), ("TAC", 'Y'), ("TAG", '*'), ("TAT", 'Y'),
    ("TCA", 'S'), ("TCC", 'S'), ("TCG", 'S'), ("TCT", 'S'),
    ("TGA", '*'), ("TGC", 'C'), ("TGG", 'W'), ("TGT", 'C'),
    ("TTA", 'L'), ("TTC", 'F'), ("TTG", 'L'), ("TTT", 'F'),
    // degenerate but unambiguous codons
    ("AAR", 'K'), ("AAY", 'N'), ("ACN", 'T'), ("AGR", 'R'), ("AGY", 'S'),
    ("ATH", 'I'), ("CAR", 'Q'), ("CAY", 'H'), ("CCN", 'P'), ("CGN", 'R'),
    ("CTN", 'L'), ("GAR", 'E'), ("GAY", 'D'), ("GCN", 'A'), ("GGN", 'G'),
    ("GTN", 'V'), ("MGA", 'R'), ("MGG", 'R'), ("MGR", 'R'), ("TAR", '*'),
    ("TAY", 'Y'), ("TCN", 'S'), ("TGY", 'C'), ("TRA", '*'), ("TTR", 'L'),
    ("TTY", 'F'), ("YTA", 'L'), ("YTG", 'L'), ("YTR", 'L'),
];

static DNA_TO_AA1: LazyLock<AHashMap<&'static str, char>> =
    LazyLock::new(|| DNA_TO_AA1_VEC.iter().copied().collect());

const IUPAC_AMBIGUITY_CODES: &[u8] = b"RYSWKMBDHVN";

/// Coerce one-letter or three-letter amino acid text to one-letter form.
pub fn aa_to_aa1(seq: &str) -> Result<String, Error> {
    if looks_like_aa3(seq) {
        aa3_to_aa1(seq)
    } else {
        Ok(seq.to_string())
    }
}

/// Coerce one-letter or three-letter amino acid text to three-letter form.
pub fn aa_to_aa3(seq: &str) -> Result<String, Error> {
    if looks_like_aa3(seq) {
        Ok(seq.to_string())
    } else {
        aa1_to_aa3(seq)
    }
}

pub fn aa1_to_aa3(seq: &str) -> Result<String, Error> {
    let mut result = String::with_capacity(seq.len() * 3);
    for (i, aa1) in seq.chars().enumerate() {
        let aa3 = AA1_TO_AA3
            .get(&aa1)
            .ok_or(Error::InvalidOneLetterAminoAcid(aa1, i + 1))?;
        result.push_str(aa3);
    }
    Ok(result)
}

pub fn aa3_to_aa1(seq: &str) -> Result<String, Error> {
    if seq.len() % 3 != 0 {
        return Err(Error::InvalidThreeLetterAminoAcidLength(seq.len()));
    }
    let mut result = String::with_capacity(seq.len() / 3);
    for (i, chunk) in seq.as_bytes().chunks(3).enumerate() {
        let aa3 = std::str::from_utf8(chunk).expect("ASCII amino acid text");
        let aa1 = AA3_TO_AA1
            .get(aa3)
            .ok_or_else(|| Error::InvalidThreeLetterAminoAcid(aa3.to_string(), i + 1))?;
        result.push(*aa1);
    }
    Ok(result)
}

/// Whether `seq` is shaped like a run of three-letter codes (`Ala`, `Xaa`, ...).
fn looks_like_aa3(seq: &str) -> bool {
    seq.len() % 3 == 0
        && !seq.is_empty()
        && seq
            .as_bytes()
            .get(1)
            .map(|c| c.is_ascii_lowercase())
            .unwrap_or(true)
}

/// Translate a single codon (DNA or RNA, case-insensitive) to a one-letter
/// amino acid code. Unresolvable degenerate codons translate to `X` rather
/// than error, matching `hgvs-rs::sequences::CodonTranslator`.
pub fn translate_codon(codon: &str) -> Result<char, Error> {
    if codon.len() != 3 {
        return Err(Error::UndefinedCodon(codon.to_string()));
    }
    let normalized: String = codon
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            'U' => 'T',
            other => other,
        })
        .collect();

    if let Some(aa1) = DNA_TO_AA1.get(normalized.as_str()) {
        return Ok(*aa1);
    }
    if normalized.bytes().any(|b| IUPAC_AMBIGUITY_CODES.contains(&b)) {
        return Ok(UNKNOWN_AA1);
    }
    Err(Error::UndefinedCodon(codon.to_string()))
}

/// Translate a coding sequence (length a multiple of 3) to a one-letter
/// protein sequence, stopping at (and including) the first in-frame stop
/// codon. Returns `None` for the stop position if none was found before the
/// sequence ran out (a premature-truncation / `p.?` situation upstream).
pub fn translate_cds(seq: &str) -> Result<(String, Option<usize>), Error> {
    if seq.len() % 3 != 0 {
        return Err(Error::UntranslatableLength(seq.len()));
    }
    let mut protein = String::with_capacity(seq.len() / 3);
    let mut stop_at = None;
    for (i, chunk) in seq.as_bytes().chunks(3).enumerate() {
        let codon = std::str::from_utf8(chunk).expect("ASCII nucleotide text");
        let aa1 = translate_codon(codon)?;
        protein.push(aa1);
        if aa1 == STOP_AA1 {
            stop_at = Some(i);
            break;
        }
    }
    Ok((protein, stop_at))
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn aa3_aa1_round_trip() {
        assert_eq!(aa1_to_aa3("K").unwrap(), "Lys");
        assert_eq!(aa3_to_aa1("Lys").unwrap(), "K");
        assert_eq!(aa3_to_aa1("LysArg").unwrap(), "KR");
    }

    #[test]
    fn translate_cds_stops_at_first_stop() {
        let (protein, stop) = translate_cds("ATGAAATAACGA").unwrap();
        assert_eq!(protein, "MK*");
        assert_eq!(stop, Some(2));
    }

    #[test]
    fn translate_cds_runs_off_end_without_stop() {
        let (protein, stop) = translate_cds("ATGAAA").unwrap();
        assert_eq!(protein, "MK");
        assert_eq!(stop, None);
    }

    #[test]
    fn ambiguous_codon_is_unknown_not_error() {
        assert_eq!(translate_codon("CCN").unwrap(), 'P');
        assert_eq!(translate_codon("NNN").unwrap(), UNKNOWN_AA1);
    }

    #[test]
    fn bad_length_is_rejected() {
        assert!(translate_cds("ATGA").is_err());
    }
}
