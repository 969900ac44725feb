//! Attribution Adapter - positive-class SHAP slice, paired and ranked
//!
//! The explainer's raw output is a `(sample × feature × output)` tensor.
//! This adapter is the boundary where that shape is checked: any mismatch is
//! an error, never a truncation or a pad.

use ndarray::{s, Array1, Array3};
use thiserror::Error;

use super::types::{ExplainResult, FeatureContribution};
use crate::features::{FeatureRecord, FEATURE_COUNT, FEATURE_LAYOUT};
use crate::model::ModelError;

/// Additive feature-attribution explainer
pub trait Explainer: Send + Sync {
    /// SHAP values with shape `(records.len(), FEATURE_COUNT, outputs)`
    fn shap_values(&self, records: &[FeatureRecord]) -> Result<Array3<f64>, ModelError>;

    /// Baseline per output
    fn expected_value(&self) -> Vec<f64>;

    /// Model output per output, in the space the SHAP values are additive in
    fn model_output(&self, record: &FeatureRecord) -> Vec<f64>;
}

#[derive(Debug, Error)]
pub enum AttributionError {
    #[error("explainer failed: {0}")]
    Explainer(#[from] ModelError),

    #[error("unexpected SHAP shape {shape:?}: expected {expected} sample(s)")]
    SampleCount { shape: Vec<usize>, expected: usize },

    #[error("unexpected SHAP shape {shape:?}: expected {expected} features")]
    FeatureCount { shape: Vec<usize>, expected: usize },

    #[error("unexpected SHAP shape {shape:?}: cannot select the positive class from {outputs} output(s)")]
    ClassCount { shape: Vec<usize>, outputs: usize },

    #[error("explainer returned {actual} baseline(s) for {outputs} output(s)")]
    Baseline { actual: usize, outputs: usize },

    #[error("explainer returned no model output for class index {0}")]
    Output(usize),
}

/// Select the positive-class attribution vector from a single-sample tensor.
///
/// Two outputs (class probabilities) → index 1. One output (log-odds of the
/// positive class) → index 0. Returns the vector and the output index used.
pub fn positive_class_slice(values: &Array3<f64>) -> Result<(Array1<f64>, usize), AttributionError> {
    let shape = values.shape().to_vec();
    let (samples, features, outputs) = values.dim();

    if samples != 1 {
        return Err(AttributionError::SampleCount { shape, expected: 1 });
    }
    if features != FEATURE_COUNT {
        return Err(AttributionError::FeatureCount { shape, expected: FEATURE_COUNT });
    }

    let class_index = match outputs {
        2 => 1,
        1 => 0,
        _ => return Err(AttributionError::ClassCount { shape, outputs }),
    };

    Ok((values.slice(s![0, .., class_index]).to_owned(), class_index))
}

/// Sort by |contribution| descending; equal magnitudes keep layout order
pub fn rank(contributions: &mut [FeatureContribution]) {
    contributions.sort_by(|a, b| b.contribution.abs().total_cmp(&a.contribution.abs()));
}

/// Explain `record` for the positive class
pub fn explain<E: Explainer + ?Sized>(
    explainer: &E,
    record: &FeatureRecord,
) -> Result<ExplainResult, AttributionError> {
    let values = explainer.shap_values(std::slice::from_ref(record))?;
    let (phi, class_index) = positive_class_slice(&values)?;

    let outputs = values.dim().2;
    let baselines = explainer.expected_value();
    if baselines.len() != outputs {
        return Err(AttributionError::Baseline { actual: baselines.len(), outputs });
    }
    let output_value = explainer
        .model_output(record)
        .get(class_index)
        .copied()
        .ok_or(AttributionError::Output(class_index))?;

    let mut contributions: Vec<FeatureContribution> = FEATURE_LAYOUT
        .iter()
        .zip(phi.iter())
        .zip(record.as_slice())
        .enumerate()
        .map(|(index, ((name, &contribution), &value))| FeatureContribution {
            name: name.to_string(),
            index,
            value,
            contribution,
        })
        .collect();

    rank(&mut contributions);

    let result = ExplainResult {
        contributions,
        base_value: baselines[class_index],
        output_value,
    };

    log::debug!(
        "Attribution: base={:.4} output={:.4} reconciliation_error={:.2e}",
        result.base_value,
        result.output_value,
        result.reconciliation_error()
    );

    Ok(result)
}
