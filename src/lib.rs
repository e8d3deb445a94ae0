//! # VCF Compare
//!
//! A library for comparing variant calls between two single-sample VCF
//! files — an inoculum and a sample taken from an animal after passage —
//! and reporting the variants whose allele frequency diverged.
//!
//! ## Features
//!
//! - Extract AF/DP/AD from FORMAT/sample column pairs
//! - Extract protein changes from SnpEff-style `ANN` annotations
//! - Outer-join two variant sets on (CHROM, POS, REF, ALT)
//! - Keep variants whose relative frequency shift is at least 25%, or
//!   that are private to the animal sample
//! - Convert protein changes to one-letter amino-acid codes
//! - Emit a tab-separated report and a minimal VCF
//!
//! ## Example
//!
//! ```rust
//! use vcf_compare::{extract_from_str, filter_divergent, merge_variants};
//!
//! let animal = extract_from_str("chr1\t100\t.\tA\tG\t.\tPASS\t.\tGT:AF\t0/1:0.4").unwrap();
//! let inoculum = extract_from_str("chr1\t100\t.\tA\tG\t.\tPASS\t.\tGT:AF\t0/1:0.1").unwrap();
//!
//! let kept = filter_divergent(merge_variants(animal, inoculum));
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0].percentage_difference().map(f64::round), Some(300.0));
//! ```

use std::path::Path;

/// Embedded README.md documentation
const README: &str = include_str!("../README.md");

/// Returns the embedded README.md documentation.
pub fn docs() -> &'static str {
    README
}

pub mod error;
pub mod merge;
pub mod protein;
pub mod record;
pub mod report;

pub use error::{Result, VcfCompareError};
pub use merge::{MIN_FREQUENCY_SHIFT, MergedVariant, filter_divergent, merge_variants};
pub use record::{
    SampleCall, VariantKey, VariantRecord, extract_file, extract_from_str, parse_variant_line,
};
pub use report::{write_report, write_vcf};

/// Run the whole comparison pipeline: extract both inputs, outer-join,
/// filter on frequency divergence, normalize protein changes, sort, and
/// write the report and the VCF.
///
/// Any extraction or I/O failure aborts the run; output files written so
/// far are left as-is.
pub fn run(
    animal: &Path,
    inoculum: &Path,
    output_report: &Path,
    output_vcf: &Path,
) -> Result<()> {
    let animal_records = record::extract_file(animal)?;
    log::info!("{}: {} variants", animal.display(), animal_records.len());
    let inoculum_records = record::extract_file(inoculum)?;
    log::info!("{}: {} variants", inoculum.display(), inoculum_records.len());

    let merged = merge::merge_variants(animal_records, inoculum_records);
    log::debug!("{} variants after outer join", merged.len());
    let mut kept = merge::filter_divergent(merged);
    log::info!("{} variants pass the frequency filter", kept.len());

    report::normalize_protein_changes(&mut kept);
    report::sort_variants(&mut kept);
    report::write_report_file(output_report, &kept)?;
    report::write_vcf_file(output_vcf, &kept)?;
    log::info!(
        "Wrote {} and {}",
        output_report.display(),
        output_vcf.display()
    );
    Ok(())
}
