//! Feature Record - one patient's inputs in model column order
//!
//! A `FeatureRecord` can only be built from values that lie inside every
//! feature's declared domain, so downstream code never re-checks ranges.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::domain::{FeatureDomain, FEATURE_SPECS};
use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("{feature} = {value} is outside its domain {domain}")]
    OutOfDomain {
        feature: &'static str,
        value: f64,
        domain: FeatureDomain,
    },

    #[error("expected {expected} feature values, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("missing value for feature {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct FeatureRecord {
    values: [f64; FEATURE_COUNT],
}

impl FeatureRecord {
    /// Build a record, rejecting any value outside its feature's domain
    pub fn new(values: [f64; FEATURE_COUNT]) -> Result<Self, RecordError> {
        for (spec, &value) in FEATURE_SPECS.iter().zip(values.iter()) {
            if !spec.domain.contains(value) {
                return Err(RecordError::OutOfDomain {
                    feature: spec.name,
                    value,
                    domain: spec.domain,
                });
            }
        }
        Ok(Self { values })
    }

    /// Record holding every control's default value
    pub fn defaults() -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, spec) in values.iter_mut().zip(FEATURE_SPECS.iter()) {
            *slot = f64::from(spec.default);
        }
        Self { values }
    }

    pub fn from_slice(values: &[f64]) -> Result<Self, RecordError> {
        let array: [f64; FEATURE_COUNT] =
            values.try_into().map_err(|_| RecordError::WrongLength {
                expected: FEATURE_COUNT,
                actual: values.len(),
            })?;
        Self::new(array)
    }

    /// Build from `(name, value)` pairs in any order; every feature must be present
    pub fn from_named<'a, I>(pairs: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut slots: [Option<f64>; FEATURE_COUNT] = [None; FEATURE_COUNT];
        for (name, value) in pairs {
            if let Some(index) = super::layout::feature_index(name) {
                slots[index] = Some(value);
            }
        }

        let mut values = [0.0; FEATURE_COUNT];
        for (i, slot) in slots.iter().enumerate() {
            values[i] = slot.ok_or(RecordError::Missing(FEATURE_LAYOUT[i]))?;
        }
        Self::new(values)
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// `(name, value)` pairs in layout order
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self::defaults()
    }
}

impl TryFrom<Vec<f64>> for FeatureRecord {
    type Error = RecordError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl From<FeatureRecord> for Vec<f64> {
    fn from(record: FeatureRecord) -> Self {
        record.values.to_vec()
    }
}
