//! Patient input and detection response models

use serde::{Deserialize, Serialize};
use validator::Validate;

use parkinson_core::features::{FeatureSpec, FEATURE_SPECS};
use parkinson_core::{Detection, FeatureContribution, FeatureRecord, FEATURE_COUNT};

/// Submitted patient features, keyed by model column name.
///
/// Used for both the dashboard form and the JSON API.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct PatientForm {
    #[serde(rename = "Age")]
    #[validate(range(min = 50.0, max = 90.0))]
    pub age: f64,

    #[serde(rename = "Gender")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub gender: f64,

    #[serde(rename = "FamilyHistoryParkinsons")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub family_history_parkinsons: f64,

    #[serde(rename = "TraumaticBrainInjury")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub traumatic_brain_injury: f64,

    #[serde(rename = "UPDRS")]
    #[validate(range(min = 0.0, max = 199.0))]
    pub updrs: f64,

    #[serde(rename = "MoCA")]
    #[validate(range(min = 0.0, max = 30.0))]
    pub moca: f64,

    #[serde(rename = "FunctionalAssessment")]
    #[validate(range(min = 0.0, max = 10.0))]
    pub functional_assessment: f64,

    #[serde(rename = "Tremor")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub tremor: f64,

    #[serde(rename = "Rigidity")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub rigidity: f64,

    #[serde(rename = "Bradykinesia")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub bradykinesia: f64,

    #[serde(rename = "PosturalInstability")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub postural_instability: f64,

    #[serde(rename = "SpeechProblems")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub speech_problems: f64,

    #[serde(rename = "SleepDisorders")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub sleep_disorders: f64,

    #[serde(rename = "Constipation")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub constipation: f64,
}

impl PatientForm {
    /// Values in model column order
    fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age,
            self.gender,
            self.family_history_parkinsons,
            self.traumatic_brain_injury,
            self.updrs,
            self.moca,
            self.functional_assessment,
            self.tremor,
            self.rigidity,
            self.bradykinesia,
            self.postural_instability,
            self.speech_problems,
            self.sleep_disorders,
            self.constipation,
        ]
    }

    /// Unchecked counterpart of [`PatientForm::values`]
    fn from_values(v: &[f64; FEATURE_COUNT]) -> Self {
        Self {
            age: v[0],
            gender: v[1],
            family_history_parkinsons: v[2],
            traumatic_brain_injury: v[3],
            updrs: v[4],
            moca: v[5],
            functional_assessment: v[6],
            tremor: v[7],
            rigidity: v[8],
            bradykinesia: v[9],
            postural_instability: v[10],
            speech_problems: v[11],
            sleep_disorders: v[12],
            constipation: v[13],
        }
    }

    /// Range rules first, then the record's own domain check (integrality)
    pub fn to_record(&self) -> Result<FeatureRecord, crate::AppError> {
        self.validate()?;
        Ok(FeatureRecord::new(self.values())?)
    }
}

impl From<&FeatureRecord> for PatientForm {
    fn from(record: &FeatureRecord) -> Self {
        Self::from_values(record.as_array())
    }
}

/// JSON answer of `POST /api/v1/predict`
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub label: u8,
    pub diagnosis: String,
    pub probability: f64,
    pub base_value: f64,
    pub output_value: f64,
    pub contributions: Vec<FeatureContribution>,
}

impl PredictResponse {
    pub fn from_detection(detection: &Detection, top: usize) -> Self {
        Self {
            label: detection.prediction.label,
            diagnosis: diagnosis_text(detection.prediction.is_positive()).to_string(),
            probability: detection.prediction.probability,
            base_value: detection.explanation.base_value,
            output_value: detection.explanation.output_value,
            contributions: detection.explanation.top(top).to_vec(),
        }
    }
}

pub fn diagnosis_text(positive: bool) -> &'static str {
    if positive {
        "Positive for Parkinson's Disease"
    } else {
        "Negative for Parkinson's Disease"
    }
}

/// Schema served by `GET /api/v1/features`
pub fn feature_schema() -> &'static [FeatureSpec] {
    &FEATURE_SPECS
}
