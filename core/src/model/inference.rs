//! Inference Adapter - label + positive-class probability for one record
//!
//! The model is a black box behind [`Classifier`]. No retry, no fallback:
//! whatever the classifier returns as an error is handed back unchanged.

use serde::{Deserialize, Serialize};

use super::error::ModelError;
use crate::features::FeatureRecord;

/// Positive class: Parkinson's present
pub const POSITIVE_CLASS: u8 = 1;

/// Binary classifier over a feature record
pub trait Classifier: Send + Sync {
    /// Class probabilities `[p(0), p(1)]`
    fn predict_proba(&self, record: &FeatureRecord) -> Result<[f64; 2], ModelError>;

    /// Most probable class; ties resolve to 0
    fn predict(&self, record: &FeatureRecord) -> Result<u8, ModelError> {
        let proba = self.predict_proba(record)?;
        Ok(if proba[1] > proba[0] { POSITIVE_CLASS } else { 0 })
    }
}

/// Prediction output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 0 = negative, 1 = Parkinson's present
    pub label: u8,
    /// Probability of the positive class, 0.0 - 1.0
    pub probability: f64,
}

impl Prediction {
    pub fn is_positive(&self) -> bool {
        self.label == POSITIVE_CLASS
    }
}

/// Run both classification operations on `record`
pub fn predict<C: Classifier + ?Sized>(
    classifier: &C,
    record: &FeatureRecord,
) -> Result<Prediction, ModelError> {
    let label = classifier.predict(record)?;
    let probability = classifier.predict_proba(record)?[1];

    log::debug!("Prediction: label={} probability={:.4}", label, probability);

    Ok(Prediction { label, probability })
}
