//! Outer join of two variant sets and the frequency-divergence filter.

use std::collections::HashMap;

use crate::record::{SampleCall, VariantKey, VariantRecord};

/// Minimum relative frequency shift, `|AF_animal - AF_inoc| / AF_inoc`,
/// for a variant shared by both samples to be reported.
pub const MIN_FREQUENCY_SHIFT: f64 = 0.25;

/// A variant seen in one or both samples after the outer join. Either side
/// may be absent, never both.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedVariant {
    pub key: VariantKey,
    /// Measurements from the animal sample, if the variant was called there.
    pub animal: Option<SampleCall>,
    /// Measurements from the inoculum sample, if the variant was called there.
    pub inoculum: Option<SampleCall>,
}

impl MergedVariant {
    fn animal_frequency(&self) -> Option<f64> {
        self.animal.as_ref().and_then(|call| call.frequency)
    }

    fn inoculum_frequency(&self) -> Option<f64> {
        self.inoculum.as_ref().and_then(|call| call.frequency)
    }

    /// Relative frequency shift between the two samples, when both
    /// frequencies are known. The division is unguarded: a zero inoculum
    /// frequency yields an infinite shift, and zero over zero yields NaN,
    /// which fails every comparison.
    pub fn frequency_shift(&self) -> Option<f64> {
        let animal = self.animal_frequency()?;
        let inoculum = self.inoculum_frequency()?;
        Some((animal - inoculum).abs() / inoculum)
    }

    /// Frequency shift as a percentage, for the report.
    pub fn percentage_difference(&self) -> Option<f64> {
        self.frequency_shift().map(|shift| shift * 100.0)
    }

    /// Whether this variant survives the frequency filter: shared variants
    /// are kept when the relative shift reaches [`MIN_FREQUENCY_SHIFT`],
    /// variants private to the animal sample are always kept, and variants
    /// with no animal-side frequency are dropped.
    pub fn is_divergent(&self) -> bool {
        match self.frequency_shift() {
            Some(shift) => shift >= MIN_FREQUENCY_SHIFT,
            None => self.animal_frequency().is_some() && self.inoculum_frequency().is_none(),
        }
    }
}

/// Outer-join two record sets on their variant keys.
///
/// Animal records come first in input order, each paired with every
/// inoculum record sharing its key; inoculum records that never matched
/// follow, in input order. Duplicate keys are not collapsed, so the join
/// is cartesian within a duplicate-key group.
pub fn merge_variants(
    animal: Vec<VariantRecord>,
    inoculum: Vec<VariantRecord>,
) -> Vec<MergedVariant> {
    let mut by_key: HashMap<&VariantKey, Vec<usize>> = HashMap::new();
    for (index, record) in inoculum.iter().enumerate() {
        by_key.entry(&record.key).or_default().push(index);
    }

    let mut matched = vec![false; inoculum.len()];
    let mut merged = Vec::with_capacity(animal.len());
    for record in &animal {
        match by_key.get(&record.key) {
            Some(indices) => {
                for &index in indices {
                    matched[index] = true;
                    merged.push(MergedVariant {
                        key: record.key.clone(),
                        animal: Some(record.call.clone()),
                        inoculum: Some(inoculum[index].call.clone()),
                    });
                }
            }
            None => merged.push(MergedVariant {
                key: record.key.clone(),
                animal: Some(record.call.clone()),
                inoculum: None,
            }),
        }
    }

    drop(by_key);
    for (record, was_matched) in inoculum.into_iter().zip(matched) {
        if !was_matched {
            merged.push(MergedVariant {
                key: record.key,
                animal: None,
                inoculum: Some(record.call),
            });
        }
    }
    merged
}

/// Keep only the variants that pass the frequency filter.
pub fn filter_divergent(merged: Vec<MergedVariant>) -> Vec<MergedVariant> {
    merged.into_iter().filter(MergedVariant::is_divergent).collect()
}
