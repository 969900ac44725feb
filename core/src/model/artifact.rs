//! Model Artifact - on-disk description of a trained tree ensemble
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "model_type": "random_forest",
//!   "feature_names": ["Age", "Gender", ...],
//!   "base_score": 0.0,
//!   "trees": [{ "nodes": [
//!     { "feature": 4, "threshold": 60.5, "left": 1, "right": 2, "cover": 120.0 },
//!     { "value": [0.8, 0.2], "cover": 70.0 },
//!     { "value": [0.1, 0.9], "cover": 50.0 }
//!   ]}]
//! }
//! ```
//!
//! Node 0 is the root; `x[feature] <= threshold` goes left.

use serde::{Deserialize, Serialize};

/// Artifact format understood by this build
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    /// Leaves hold class probabilities `[p0, p1]`, trees are averaged
    RandomForest,
    /// Leaves hold one log-odds value, trees are summed onto `base_score`
    GradientBoosting,
}

impl ModelType {
    /// Number of values stored in every leaf
    pub fn output_width(&self) -> usize {
        match self {
            ModelType::RandomForest => 2,
            ModelType::GradientBoosting => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::RandomForest => "random_forest",
            ModelType::GradientBoosting => "gradient_boosting",
        }
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        cover: f64,
    },
    Leaf {
        value: Vec<f64>,
        cover: f64,
    },
}

impl Node {
    pub fn cover(&self) -> f64 {
        match self {
            Node::Split { cover, .. } | Node::Leaf { cover, .. } => *cover,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub model_type: ModelType,
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<TreeSpec>,
}
