//! Explain Module - per-feature attribution of a prediction

pub mod engine;
pub mod tree_shap;
pub mod types;

pub use engine::{explain, positive_class_slice, rank, AttributionError, Explainer};
pub use types::{ExplainResult, FeatureContribution};
