//! VCF record extraction.
//!
//! Pulls the join key and per-sample measurements out of single-sample
//! VCF data lines: AF, DP, and AD from the FORMAT/sample column pair, and
//! the protein change from the first `ANN=` INFO annotation.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, VcfCompareError};

/// The join key of a variant: genomic coordinate plus alleles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey {
    /// Chromosome (CHROM column).
    pub chrom: String,
    /// Raw POS column text. Variants match on the text form; numeric
    /// coercion is deferred to sorting.
    pub pos: String,
    /// Reference allele (REF column).
    pub ref_allele: String,
    /// Alternate allele (ALT column).
    pub alt_allele: String,
}

/// Per-sample measurements attached to a variant. Every field is optional:
/// a missing FORMAT label or annotation yields absence, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleCall {
    /// Allele frequency (FORMAT `AF`).
    pub frequency: Option<f64>,
    /// Total read depth at the position (FORMAT `DP`).
    pub depth: Option<i64>,
    /// Alternate-allele read depth (second comma-separated `AD` value).
    pub variant_depth: Option<i64>,
    /// Protein change from the first `ANN=` annotation, e.g. `p.Thr25Ala`.
    pub protein_change: Option<String>,
}

/// One parsed VCF data line.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub key: VariantKey,
    pub call: SampleCall,
}

/// Resolve a FORMAT subfield's value by label: the sample-data token at
/// the index of the matching FORMAT label.
fn format_value<'a>(labels: &[&str], values: &[&'a str], label: &str) -> Option<&'a str> {
    let index = labels.iter().position(|l| *l == label)?;
    values.get(index).copied()
}

fn parse_f64(field: &'static str, raw: &str) -> Result<f64> {
    raw.parse().map_err(|_| VcfCompareError::NumericParse {
        field,
        value: raw.to_string(),
    })
}

fn parse_i64(field: &'static str, raw: &str) -> Result<i64> {
    raw.parse().map_err(|_| VcfCompareError::NumericParse {
        field,
        value: raw.to_string(),
    })
}

/// Extract the protein change from the INFO column: the 11th
/// pipe-separated field of the first comma-group of the first `ANN=`
/// entry, when that group has more than 10 fields.
fn protein_change_from_info(info: &str) -> Option<String> {
    let ann = info.split(';').find_map(|field| field.strip_prefix("ANN="))?;
    let first_annotation = ann.split(',').next()?;
    let fields: Vec<&str> = first_annotation.split('|').collect();
    if fields.len() > 10 {
        Some(fields[10].to_string())
    } else {
        None
    }
}

/// Parse a single VCF data line into a [`VariantRecord`].
///
/// The line must have at least 10 tab-separated columns (through the first
/// sample column); anything beyond the 10th column is ignored. AF, DP, and
/// AD values that are present but not numeric are hard errors.
///
/// # Example
///
/// ```rust
/// use vcf_compare::record::parse_variant_line;
///
/// let record =
///     parse_variant_line("chr1\t100\t.\tA\tG\t50\tPASS\t.\tGT:AD:DP:AF\t0/1:10,5:15:0.33")
///         .unwrap();
/// assert_eq!(record.call.frequency, Some(0.33));
/// assert_eq!(record.call.depth, Some(15));
/// assert_eq!(record.call.variant_depth, Some(5));
/// ```
pub fn parse_variant_line(line: &str) -> Result<VariantRecord> {
    let fields: Vec<&str> = line.trim().split('\t').collect();
    if fields.len() < 10 {
        return Err(VcfCompareError::MalformedRecord {
            found: fields.len(),
        });
    }

    let format_labels: Vec<&str> = fields[8].split(':').collect();
    let sample_values: Vec<&str> = fields[9].split(':').collect();

    let frequency = format_value(&format_labels, &sample_values, "AF")
        .map(|raw| parse_f64("AF", raw))
        .transpose()?;
    let depth = format_value(&format_labels, &sample_values, "DP")
        .map(|raw| parse_i64("DP", raw))
        .transpose()?;

    // AD carries one depth per allele, reference first; only the
    // alternate-allele depth is kept.
    let variant_depth = match format_value(&format_labels, &sample_values, "AD") {
        Some(raw) => {
            let values: Vec<&str> = raw.split(',').collect();
            if values.len() > 1 {
                Some(parse_i64("AD", values[1])?)
            } else {
                None
            }
        }
        None => None,
    };

    Ok(VariantRecord {
        key: VariantKey {
            chrom: fields[0].to_string(),
            pos: fields[1].to_string(),
            ref_allele: fields[3].to_string(),
            alt_allele: fields[4].to_string(),
        },
        call: SampleCall {
            frequency,
            depth,
            variant_depth,
            protein_change: protein_change_from_info(fields[7]),
        },
    })
}

/// Extract every data line from VCF text, in input order. Lines starting
/// with `#` are header lines and are skipped.
pub fn extract_from_str(text: &str) -> Result<Vec<VariantRecord>> {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .map(parse_variant_line)
        .collect()
}

/// Extract every data line from a VCF file, in input order.
///
/// Errors carry the path, and line-level errors the 1-based line number.
pub fn extract_file(path: &Path) -> Result<Vec<VariantRecord>> {
    let file = File::open(path).map_err(|source| VcfCompareError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| VcfCompareError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.starts_with('#') {
            continue;
        }
        let record = parse_variant_line(&line).map_err(|e| e.at(path, number + 1))?;
        records.push(record);
    }
    log::debug!("{}: {} variant records", path.display(), records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ANN_LINE: &str = "NC_007362.1\t234\t.\tG\tA\t3070.06\tPASS\tANN=A|missense_variant|MODERATE|HA|GU052249.1|transcript|AFJ09173.1|protein_coding|1/1|c.58G>A|p.Ala20Thr|58/1695|58/1695|20/564||\tGT:AD:DP:AF\t1:2,148:150:0.98667";

    #[test]
    fn test_parse_format_subfields() {
        let record =
            parse_variant_line("chr1\t100\t.\tA\tG\t50\tPASS\t.\tGT:AD:DP:AF\t0/1:10,5:15:0.33")
                .unwrap();
        assert_eq!(record.call.frequency, Some(0.33));
        assert_eq!(record.call.depth, Some(15));
        assert_eq!(record.call.variant_depth, Some(5));
        assert_eq!(record.call.protein_change, None);
    }

    #[test]
    fn test_parse_key_columns() {
        let record = parse_variant_line(ANN_LINE).unwrap();
        assert_eq!(record.key.chrom, "NC_007362.1");
        assert_eq!(record.key.pos, "234");
        assert_eq!(record.key.ref_allele, "G");
        assert_eq!(record.key.alt_allele, "A");
    }

    #[test]
    fn test_parse_protein_change_from_ann() {
        let record = parse_variant_line(ANN_LINE).unwrap();
        assert_eq!(record.call.protein_change.as_deref(), Some("p.Ala20Thr"));
    }

    #[test]
    fn test_first_ann_comma_group_wins() {
        let line = "chr1\t100\t.\tA\tG\t50\tPASS\tDP=30;ANN=G|a|b|c|d|e|f|g|h|i|p.Thr1Ala|j,G|a|b|c|d|e|f|g|h|i|p.Gly2Gly|j\tGT:AF\t0/1:0.5";
        let record = parse_variant_line(line).unwrap();
        assert_eq!(record.call.protein_change.as_deref(), Some("p.Thr1Ala"));
    }

    #[test]
    fn test_short_ann_yields_no_protein_change() {
        let line = "chr1\t100\t.\tA\tG\t50\tPASS\tANN=G|missense|HIGH\tGT:AF\t0/1:0.5";
        let record = parse_variant_line(line).unwrap();
        assert_eq!(record.call.protein_change, None);
    }

    #[test]
    fn test_missing_format_labels_yield_absence() {
        let record = parse_variant_line("chr1\t100\t.\tA\tG\t50\tPASS\t.\tGT\t0/1").unwrap();
        assert_eq!(record.call.frequency, None);
        assert_eq!(record.call.depth, None);
        assert_eq!(record.call.variant_depth, None);
    }

    #[test]
    fn test_single_value_ad_yields_no_variant_depth() {
        let record =
            parse_variant_line("chr1\t100\t.\tA\tG\t50\tPASS\t.\tGT:AD\t0/1:12").unwrap();
        assert_eq!(record.call.variant_depth, None);
    }

    #[test]
    fn test_too_few_columns_is_malformed() {
        let err = parse_variant_line("chr1\t100\t.\tA\tG\t50\tPASS\t.").unwrap_err();
        assert!(matches!(
            err,
            VcfCompareError::MalformedRecord { found: 8 }
        ));
    }

    #[test]
    fn test_unparseable_frequency_is_an_error() {
        let err =
            parse_variant_line("chr1\t100\t.\tA\tG\t50\tPASS\t.\tGT:AF\t0/1:high").unwrap_err();
        assert!(matches!(
            err,
            VcfCompareError::NumericParse { field: "AF", .. }
        ));
    }

    #[test]
    fn test_unparseable_variant_depth_is_an_error() {
        let err =
            parse_variant_line("chr1\t100\t.\tA\tG\t50\tPASS\t.\tGT:AD\t0/1:3,x").unwrap_err();
        assert!(matches!(
            err,
            VcfCompareError::NumericParse { field: "AD", .. }
        ));
    }

    #[test]
    fn test_columns_beyond_the_tenth_are_ignored() {
        let record = parse_variant_line(
            "chr1\t100\t.\tA\tG\t50\tPASS\t.\tGT:AF\t0/1:0.5\tGT:AF\t0/1:0.9",
        )
        .unwrap();
        assert_eq!(record.call.frequency, Some(0.5));
    }

    #[test]
    fn test_extract_skips_headers_and_keeps_order() {
        let text = "##fileformat=VCFv4.2\n\
                    #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n\
                    chr2\t200\t.\tC\tT\t.\tPASS\t.\tGT:AF\t0/1:0.2\n\
                    chr1\t100\t.\tA\tG\t.\tPASS\t.\tGT:AF\t0/1:0.4\n";
        let records = extract_from_str(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key.chrom, "chr2");
        assert_eq!(records[1].key.chrom, "chr1");
    }
}
