//! Report and VCF output.
//!
//! Writes the filtered variant table as tab-separated text and as a
//! minimal VCF built from the animal-side measurements.

use std::cmp::Ordering;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, VcfCompareError};
use crate::merge::MergedVariant;
use crate::protein;
use crate::record::SampleCall;

/// Column header of the tab-separated report.
const REPORT_COLUMNS: [&str; 13] = [
    "CHROM",
    "POS",
    "REF",
    "ALT",
    "FREQ_animal",
    "DEPTH_animal",
    "VARIANT_DEPTH_animal",
    "PROTEIN_CHANGE_animal",
    "FREQ_inoc",
    "DEPTH_inoc",
    "VARIANT_DEPTH_inoc",
    "PROTEIN_CHANGE_inoc",
    "Percentage_Difference",
];

/// Fixed header of the emitted VCF.
const VCF_HEADER: [&str; 7] = [
    "##fileformat=VCFv4.2",
    "##source=Filtered_Variants",
    "##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Depth of the position\">",
    "##INFO=<ID=VD,Number=1,Type=Integer,Description=\"Depth of the variant\">",
    "##INFO=<ID=AF,Number=1,Type=Float,Description=\"Allele Frequency\">",
    "##INFO=<ID=ANN,Number=.,Type=String,Description=\"Protein change annotation\">",
    "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO",
];

/// Rewrite both sides' protein changes to one-letter codes, in place.
pub fn normalize_protein_changes(variants: &mut [MergedVariant]) {
    for variant in variants.iter_mut() {
        for call in [variant.animal.as_mut(), variant.inoculum.as_mut()]
            .into_iter()
            .flatten()
        {
            if let Some(change) = call.protein_change.take() {
                call.protein_change = Some(protein::normalize(&change));
            }
        }
    }
}

/// Positions compare numerically; a position that does not parse sorts
/// after every one that does.
fn compare_positions(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>().ok(), b.parse::<f64>().ok()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort ascending by (chromosome, numeric position), stably.
pub fn sort_variants(variants: &mut [MergedVariant]) {
    variants.sort_by(|a, b| {
        a.key
            .chrom
            .cmp(&b.key.chrom)
            .then_with(|| compare_positions(&a.key.pos, &b.key.pos))
    });
}

/// An absent value prints as an empty cell.
fn cell<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn call_cells(call: Option<&SampleCall>) -> [String; 4] {
    [
        cell(call.and_then(|c| c.frequency)),
        cell(call.and_then(|c| c.depth)),
        cell(call.and_then(|c| c.variant_depth)),
        cell(call.and_then(|c| c.protein_change.as_deref())),
    ]
}

/// Write the report as tab-separated text with a header row.
pub fn write_report<W: Write>(mut out: W, variants: &[MergedVariant]) -> io::Result<()> {
    writeln!(out, "{}", REPORT_COLUMNS.join("\t"))?;
    for variant in variants {
        let mut cells = vec![
            variant.key.chrom.clone(),
            variant.key.pos.clone(),
            variant.key.ref_allele.clone(),
            variant.key.alt_allele.clone(),
        ];
        cells.extend(call_cells(variant.animal.as_ref()));
        cells.extend(call_cells(variant.inoculum.as_ref()));
        cells.push(cell(variant.percentage_difference()));
        writeln!(out, "{}", cells.join("\t"))?;
    }
    Ok(())
}

/// Write the filtered set as a minimal VCF. Data lines carry only the
/// animal-side measurements; absent values are omitted from INFO rather
/// than written empty.
pub fn write_vcf<W: Write>(mut out: W, variants: &[MergedVariant]) -> io::Result<()> {
    for line in VCF_HEADER {
        writeln!(out, "{line}")?;
    }
    for variant in variants {
        let call = variant.animal.as_ref();
        let mut info = Vec::new();
        if let Some(depth) = call.and_then(|c| c.depth) {
            info.push(format!("DP={depth}"));
        }
        if let Some(variant_depth) = call.and_then(|c| c.variant_depth) {
            info.push(format!("VD={variant_depth}"));
        }
        if let Some(frequency) = call.and_then(|c| c.frequency) {
            info.push(format!("AF={frequency}"));
        }
        if let Some(change) = call.and_then(|c| c.protein_change.as_deref()) {
            info.push(format!("ANN={change}"));
        }
        writeln!(
            out,
            "{}\t{}\t.\t{}\t{}\t.\tPASS\t{}",
            variant.key.chrom,
            variant.key.pos,
            variant.key.ref_allele,
            variant.key.alt_allele,
            info.join(";")
        )?;
    }
    Ok(())
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| VcfCompareError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

fn io_error(path: &Path, source: io::Error) -> VcfCompareError {
    VcfCompareError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write the tab-separated report to a file.
pub fn write_report_file(path: &Path, variants: &[MergedVariant]) -> Result<()> {
    let mut out = create_file(path)?;
    write_report(&mut out, variants).map_err(|e| io_error(path, e))?;
    out.flush().map_err(|e| io_error(path, e))
}

/// Write the minimal VCF to a file.
pub fn write_vcf_file(path: &Path, variants: &[MergedVariant]) -> Result<()> {
    let mut out = create_file(path)?;
    write_vcf(&mut out, variants).map_err(|e| io_error(path, e))?;
    out.flush().map_err(|e| io_error(path, e))
}
