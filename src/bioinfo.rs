//! Lookup tables for amino acids and the standard genetic code.

use std::collections::BTreeMap;

/// One-letter amino-acid code to three-letter code.
pub const AA: &[(char, &str)] = &[
    ('A', "Ala"),
    ('R', "Arg"),
    ('N', "Asn"),
    ('D', "Asp"),
    ('C', "Cys"),
    ('Q', "Gln"),
    ('E', "Glu"),
    ('G', "Gly"),
    ('H', "His"),
    ('I', "Ile"),
    ('L', "Leu"),
    ('K', "Lys"),
    ('M', "Met"),
    ('F', "Phe"),
    ('P', "Pro"),
    ('S', "Ser"),
    ('T', "Thr"),
    ('W', "Trp"),
    ('Y', "Tyr"),
    ('V', "Val"),
];

/// Three-letter amino-acid code (upper, title or lower case) to one-letter code.
pub const AA_3_TO_1: &[(&str, char)] = &[
    ("ALA", 'A'),
    ("ARG", 'R'),
    ("ASN", 'N'),
    ("ASP", 'D'),
    ("CYS", 'C'),
    ("GLN", 'Q'),
    ("GLU", 'E'),
    ("GLY", 'G'),
    ("HIS", 'H'),
    ("ILE", 'I'),
    ("LEU", 'L'),
    ("LYS", 'K'),
    ("MET", 'M'),
    ("PHE", 'F'),
    ("PRO", 'P'),
    ("SER", 'S'),
    ("THR", 'T'),
    ("TRP", 'W'),
    ("TYR", 'Y'),
    ("VAL", 'V'),
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
    ("ala", 'A'),
    ("arg", 'R'),
    ("asn", 'N'),
    ("asp", 'D'),
    ("cys", 'C'),
    ("gln", 'Q'),
    ("glu", 'E'),
    ("gly", 'G'),
    ("his", 'H'),
    ("ile", 'I'),
    ("leu", 'L'),
    ("lys", 'K'),
    ("met", 'M'),
    ("phe", 'F'),
    ("pro", 'P'),
    ("ser", 'S'),
    ("thr", 'T'),
    ("trp", 'W'),
    ("tyr", 'Y'),
    ("val", 'V'),
];

/// DNA bases in the order the codon table is laid out.
pub const BASES: [char; 4] = ['T', 'C', 'A', 'G'];

/// Amino acid coded by each codon of `codon_list()`, `*` marks a stop codon.
pub const AMINO_ACIDS: &str = "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

pub fn aa_three_letter(code: char) -> Option<&'static str> {
    AA.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

pub fn aa_one_letter(name: &str) -> Option<char> {
    AA_3_TO_1.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
}

/// All 64 codons, first base varying slowest.
pub fn codon_list() -> Vec<String> {
    let mut list = Vec::with_capacity(64);
    for first in BASES {
        for second in BASES {
            for third in BASES {
                list.push([first, second, third].iter().collect());
            }
        }
    }
    list
}

pub fn codons() -> BTreeMap<String, char> {
    codon_list().into_iter().zip(AMINO_ACIDS.chars()).collect()
}

/// Translate a single upper-case DNA codon.
pub fn translate_codon(codon: &str) -> Option<char> {
    let bytes = codon.as_bytes();
    if bytes.len() != 3 {
        return None;
    }
    let mut idx = 0;
    for &b in bytes {
        let base = BASES.iter().position(|&c| c as u8 == b)?;
        idx = idx * 4 + base;
    }
    AMINO_ACIDS.chars().nth(idx)
}
