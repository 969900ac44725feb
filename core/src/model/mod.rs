//! Model Module - tree ensemble classifier
//!
//! Artifact parsing, validation, loading and the inference adapter.
//! Attribution over the same trees lives in `crate::explain`.

pub mod artifact;
pub mod ensemble;
pub mod error;
pub mod inference;
pub mod loader;
pub mod tree;

// Re-export common types
pub use artifact::{ModelArtifact, ModelType, Node, TreeSpec, FORMAT_VERSION};
pub use ensemble::TreeEnsemble;
pub use error::ModelError;
pub use inference::{predict, Classifier, Prediction, POSITIVE_CLASS};
pub use loader::{load_model, load_model_from_bytes, LoadedModel, ModelMetadata};
pub use tree::Tree;
