//! Parkinson's Disease Detection - Core Library
//!
//! Feature schema, tree-ensemble classifier, TreeSHAP attribution and the
//! detection pipeline that ties them together.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌─────────────────────┐
//! │ FeatureRecord│──▶│ Classifier    │──▶│ Prediction          │
//! │ (14 values)  │   │ predict/proba │   │ label + probability │
//! └──────┬───────┘   └───────────────┘   └─────────────────────┘
//!        │           ┌───────────────┐   ┌─────────────────────┐
//!        └──────────▶│ Explainer     │──▶│ ExplainResult       │
//!                    │ TreeSHAP      │   │ ranked contributions│
//!                    └───────────────┘   └─────────────────────┘
//! ```

pub mod constants;
pub mod explain;
pub mod features;
pub mod model;
pub mod pipeline;

pub use explain::{AttributionError, ExplainResult, Explainer, FeatureContribution};
pub use features::{FeatureRecord, RecordError, FEATURE_COUNT, FEATURE_LAYOUT};
pub use model::{load_model, Classifier, LoadedModel, ModelError, Prediction, TreeEnsemble};
pub use pipeline::{detect, DetectError, Detection};
