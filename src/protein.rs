//! Protein-change normalization.
//!
//! Converts three-letter amino-acid codes embedded in HGVS-style protein
//! change annotations (e.g. `p.Thr25Ala`) to their one-letter form
//! (`T25A`).

/// Three-letter to one-letter amino-acid codes: the 20 standard residues
/// plus the stop codon. Single-token changes are rewritten by sequential
/// substring replacement, so the table order is part of the contract.
pub const AMINO_ACID_CODES: [(&str, &str); 21] = [
    ("Ala", "A"),
    ("Arg", "R"),
    ("Asn", "N"),
    ("Asp", "D"),
    ("Cys", "C"),
    ("Gln", "Q"),
    ("Glu", "E"),
    ("Gly", "G"),
    ("His", "H"),
    ("Ile", "I"),
    ("Leu", "L"),
    ("Lys", "K"),
    ("Met", "M"),
    ("Phe", "F"),
    ("Pro", "P"),
    ("Ser", "S"),
    ("Thr", "T"),
    ("Trp", "W"),
    ("Tyr", "Y"),
    ("Val", "V"),
    ("Ter", "*"),
];

/// Look up the one-letter code for a three-letter amino-acid code.
pub fn one_letter(code: &str) -> Option<&'static str> {
    AMINO_ACID_CODES
        .iter()
        .find(|(three, _)| *three == code)
        .map(|(_, one)| *one)
}

/// First character uppercased, the rest lowercased, as a lookup key.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Normalize a protein-change annotation to one-letter amino-acid codes.
///
/// A leading `p.` prefix is stripped. A single-token change like
/// `Thr25Thr` has every occurrence of each three-letter code replaced in
/// table order, across the whole string. A three-token change like
/// `Thr 25 Ala` has its first and last tokens looked up (capitalized) and
/// is returned concatenated without separators. Anything else passes
/// through unchanged, as do unmapped codes. Never fails.
///
/// # Example
///
/// ```rust
/// use vcf_compare::protein::normalize;
///
/// assert_eq!(normalize("p.Thr25Thr"), "T25T");
/// assert_eq!(normalize("Ala123Gly"), "A123G");
/// assert_eq!(normalize("thr 25 ala"), "T25A");
/// assert_eq!(normalize("p.Xyz1Abc"), "Xyz1Abc");
/// ```
pub fn normalize(change: &str) -> String {
    let change = change.strip_prefix("p.").unwrap_or(change);
    let tokens: Vec<&str> = change.split_whitespace().collect();
    match tokens.as_slice() {
        &[_] => {
            let mut out = change.to_string();
            for (three, one) in AMINO_ACID_CODES {
                out = out.replace(three, one);
            }
            out
        }
        &[start, pos, end] => {
            let start = one_letter(&capitalize(start)).unwrap_or(start);
            let end = one_letter(&capitalize(end)).unwrap_or(end);
            format!("{start}{pos}{end}")
        }
        _ => change.to_string(),
    }
}
