//! Features Module - patient input schema
//!
//! Layout (column order + hash), per-feature domains, and the validated
//! record handed to the model.

pub mod domain;
pub mod layout;
pub mod record;


// Re-export common types
pub use domain::{feature_spec, FeatureDomain, FeatureSpec, FEATURE_SPECS};
pub use layout::{feature_index, feature_name, layout_hash, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT};
pub use record::{FeatureRecord, RecordError};
