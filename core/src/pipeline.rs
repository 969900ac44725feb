//! Detection Pipeline - record → prediction → attribution
//!
//! Either the whole result is produced or an error is returned; callers never
//! see a prediction without its explanation.

use serde::Serialize;
use thiserror::Error;

use crate::explain::{explain, AttributionError, ExplainResult, Explainer};
use crate::features::FeatureRecord;
use crate::model::{predict, Classifier, ModelError, Prediction};

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("inference failed: {0}")]
    Inference(#[from] ModelError),

    #[error("attribution failed: {0}")]
    Attribution(#[from] AttributionError),
}

/// Everything the results view needs for one patient
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub record: FeatureRecord,
    pub prediction: Prediction,
    pub explanation: ExplainResult,
}

/// Run the inference and attribution adapters on `record`
pub fn detect<M>(model: &M, record: &FeatureRecord) -> Result<Detection, DetectError>
where
    M: Classifier + Explainer + ?Sized,
{
    let prediction = predict(model, record)?;
    let explanation = explain(model, record)?;

    log::info!(
        "Detection complete: label={} probability={:.2} top_feature={}",
        prediction.label,
        prediction.probability,
        explanation
            .contributions
            .first()
            .map(|c| c.name.as_str())
            .unwrap_or("-")
    );

    Ok(Detection {
        record: *record,
        prediction,
        explanation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FEATURE_COUNT, FEATURE_SPECS};
    use crate::model::{load_model, LoadedModel};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn bundled() -> LoadedModel {
        load_model(concat!(env!("CARGO_MANIFEST_DIR"), "/../models/model.json")).unwrap()
    }

    fn random_record(rng: &mut StdRng) -> FeatureRecord {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, spec) in values.iter_mut().zip(FEATURE_SPECS.iter()) {
            *slot = f64::from(rng.gen_range(spec.domain.min()..=spec.domain.max()));
        }
        FeatureRecord::new(values).unwrap()
    }

    #[test]
    fn test_reference_patient_is_reproducible() {
        let model = bundled();
        let record = FeatureRecord::defaults();

        let first = detect(model.ensemble(), &record).unwrap();
        for _ in 0..5 {
            let again = detect(model.ensemble(), &record).unwrap();
            assert_eq!(again.prediction, first.prediction);
            assert_eq!(again.explanation, first.explanation);
        }
    }

    #[test]
    fn test_random_records_satisfy_output_contract() {
        let model = bundled();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let record = random_record(&mut rng);
            let detection = detect(model.ensemble(), &record).unwrap();

            let prediction = detection.prediction;
            assert!(prediction.label == 0 || prediction.label == 1);
            assert!((0.0..=1.0).contains(&prediction.probability));

            let explanation = &detection.explanation;
            assert_eq!(explanation.contributions.len(), FEATURE_COUNT);
            assert!(explanation.reconciliation_error() < 1e-9);
            // random forest: the explained output is the probability itself
            assert!((explanation.output_value - prediction.probability).abs() < 1e-9);
        }
    }

    #[test]
    fn test_top_ten_sorted_without_repeats() {
        let model = bundled();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let detection = detect(model.ensemble(), &random_record(&mut rng)).unwrap();
            let top = detection.explanation.top(10);
            assert_eq!(top.len(), 10);

            for pair in top.windows(2) {
                assert!(pair[0].contribution.abs() >= pair[1].contribution.abs());
            }
            let names: HashSet<&str> = top.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names.len(), 10);
        }
    }

    #[test]
    fn test_severe_patient_is_positive() {
        let model = bundled();
        let mut values = *FeatureRecord::defaults().as_array();
        values[4] = 150.0; // UPDRS
        values[5] = 10.0; // MoCA
        values[6] = 2.0; // FunctionalAssessment
        values[7] = 1.0; // Tremor
        values[9] = 1.0; // Bradykinesia
        values[10] = 1.0; // PosturalInstability

        let detection = detect(model.ensemble(), &FeatureRecord::new(values).unwrap()).unwrap();
        assert_eq!(detection.prediction.label, 1);
        assert!(detection.explanation.contributions[0].contribution > 0.0);
    }
}
