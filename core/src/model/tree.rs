//! Decision Tree - validated node array with evaluation helpers

use super::artifact::{ModelType, Node, TreeSpec};
use super::error::ModelError;
use crate::features::FEATURE_COUNT;

/// Relative slack allowed between a split's cover and its children's
const COVER_TOLERANCE: f64 = 1e-6;

/// Absolute slack allowed when checking leaf probabilities
const PROBABILITY_TOLERANCE: f64 = 1e-6;

fn is_distribution(value: &[f64]) -> bool {
    value
        .iter()
        .all(|&p| (-PROBABILITY_TOLERANCE..=1.0 + PROBABILITY_TOLERANCE).contains(&p))
        && (value.iter().sum::<f64>() - 1.0).abs() <= PROBABILITY_TOLERANCE
}

/// A tree whose node indices, features, thresholds, covers and leaves have
/// all been checked.
///
/// Children always have a larger index than their parent and every node but
/// the root has exactly one parent, so the nodes form a proper tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Validate a tree from the artifact. `index` is only used in errors.
    ///
    /// Random forest leaves must hold class probabilities.
    pub fn from_spec(spec: TreeSpec, index: usize, model_type: ModelType) -> Result<Self, ModelError> {
        let width = model_type.output_width();
        let probabilities = model_type == ModelType::RandomForest;

        if spec.nodes.is_empty() {
            return Err(ModelError::EmptyTree { tree: index });
        }

        let len = spec.nodes.len();
        let mut parents = vec![0usize; len];
        for (node_index, node) in spec.nodes.iter().enumerate() {
            let cover = node.cover();
            if !(cover.is_finite() && cover > 0.0) {
                return Err(ModelError::InvalidCover { tree: index, node: node_index });
            }

            match node {
                Node::Split { feature, threshold, left, right, .. } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(ModelError::FeatureOutOfRange {
                            tree: index,
                            node: node_index,
                            feature: *feature,
                        });
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::InvalidThreshold { tree: index, node: node_index });
                    }
                    for &child in [left, right] {
                        if child >= len {
                            return Err(ModelError::ChildOutOfRange {
                                tree: index,
                                node: node_index,
                                child,
                            });
                        }
                        if child <= node_index {
                            return Err(ModelError::ChildOrder {
                                tree: index,
                                node: node_index,
                                child,
                            });
                        }
                        parents[child] += 1;
                        if parents[child] > 1 {
                            return Err(ModelError::SharedChild {
                                tree: index,
                                node: node_index,
                                child,
                            });
                        }
                    }

                    let children = spec.nodes[*left].cover() + spec.nodes[*right].cover();
                    if (children - cover).abs() > COVER_TOLERANCE * cover {
                        return Err(ModelError::CoverMismatch {
                            tree: index,
                            node: node_index,
                            cover,
                            children,
                        });
                    }
                }
                Node::Leaf { value, .. } => {
                    if value.len() != width {
                        return Err(ModelError::LeafWidth {
                            tree: index,
                            node: node_index,
                            expected: width,
                            actual: value.len(),
                        });
                    }
                    if value.iter().any(|v| !v.is_finite()) {
                        return Err(ModelError::InvalidLeaf { tree: index, node: node_index });
                    }
                    if probabilities && !is_distribution(value) {
                        return Err(ModelError::InvalidProbability { tree: index, node: node_index });
                    }
                }
            }
        }

        // Root has no parent; everything else exactly one
        if let Some(orphan) = (1..len).find(|&i| parents[i] == 0) {
            return Err(ModelError::UnreachableNode { tree: index, node: orphan });
        }

        Ok(Self { nodes: spec.nodes })
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Leaf values reached by `x`
    pub fn predict(&self, x: &[f64]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { value, .. } => return value,
                Node::Split { feature, threshold, left, right, .. } => {
                    index = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Cover-weighted mean of the leaves, accumulated into `out`
    pub fn expected_value(&self, out: &mut [f64]) {
        self.accumulate_expected(0, 1.0, out);
    }

    fn accumulate_expected(&self, index: usize, weight: f64, out: &mut [f64]) {
        match &self.nodes[index] {
            Node::Leaf { value, .. } => {
                for (slot, v) in out.iter_mut().zip(value) {
                    *slot += weight * v;
                }
            }
            Node::Split { left, right, cover, .. } => {
                for &child in [left, right] {
                    let fraction = self.nodes[child].cover() / cover;
                    self.accumulate_expected(child, weight * fraction, out);
                }
            }
        }
    }

    /// Feature indices used by split nodes
    pub fn split_features(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            Node::Split { feature, .. } => Some(*feature),
            Node::Leaf { .. } => None,
        })
    }
}
