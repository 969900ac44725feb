//! Tree Ensemble - random forest or gradient-boosted trees

use super::artifact::{ModelArtifact, ModelType, FORMAT_VERSION};
use super::error::ModelError;
use super::inference::Classifier;
use super::tree::Tree;
use crate::features::{layout, FeatureRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct TreeEnsemble {
    model_type: ModelType,
    base_score: f64,
    trees: Vec<Tree>,
}

impl TreeEnsemble {
    /// Validate an artifact into an ensemble
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        if artifact.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion(artifact.format_version));
        }
        if !layout::matches_layout(&artifact.feature_names) {
            return Err(ModelError::LayoutMismatch(artifact.feature_names));
        }
        if artifact.trees.is_empty() {
            return Err(ModelError::NoTrees);
        }
        if !artifact.base_score.is_finite() {
            return Err(ModelError::InvalidBaseScore);
        }

        let model_type = artifact.model_type;
        let trees = artifact
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Tree::from_spec(spec, i, model_type))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            model_type: artifact.model_type,
            base_score: artifact.base_score,
            trees,
        })
    }

    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Values per output: 2 class probabilities, or 1 log-odds margin
    pub fn output_width(&self) -> usize {
        self.model_type.output_width()
    }

    /// Weight each tree's output carries in the ensemble
    pub fn tree_scale(&self) -> f64 {
        match self.model_type {
            ModelType::RandomForest => 1.0 / self.trees.len() as f64,
            ModelType::GradientBoosting => 1.0,
        }
    }

    /// Constant term added after combining trees
    fn offset(&self) -> f64 {
        match self.model_type {
            ModelType::RandomForest => 0.0,
            ModelType::GradientBoosting => self.base_score,
        }
    }

    /// Untransformed ensemble output: averaged probabilities or summed margin
    pub fn raw_output(&self, x: &[f64]) -> Vec<f64> {
        let scale = self.tree_scale();
        let mut out = vec![self.offset(); self.output_width()];
        for tree in &self.trees {
            for (slot, v) in out.iter_mut().zip(tree.predict(x)) {
                *slot += scale * v;
            }
        }
        out
    }

    /// Output for the average training sample, per output
    pub fn expected_output(&self) -> Vec<f64> {
        let scale = self.tree_scale();
        let mut out = vec![self.offset(); self.output_width()];
        let mut per_tree = vec![0.0; self.output_width()];
        for tree in &self.trees {
            per_tree.iter_mut().for_each(|v| *v = 0.0);
            tree.expected_value(&mut per_tree);
            for (slot, v) in out.iter_mut().zip(&per_tree) {
                *slot += scale * v;
            }
        }
        out
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl Classifier for TreeEnsemble {
    fn predict_proba(&self, record: &FeatureRecord) -> Result<[f64; 2], ModelError> {
        let raw = self.raw_output(record.as_slice());

        let positive = match self.model_type {
            ModelType::RandomForest => raw[1],
            ModelType::GradientBoosting => sigmoid(raw[0]),
        };

        if !positive.is_finite() {
            return Err(ModelError::NonFiniteOutput);
        }

        // Leaf averages can drift a few ulps outside [0, 1]
        let positive = positive.clamp(0.0, 1.0);
        Ok([1.0 - positive, positive])
    }
}
