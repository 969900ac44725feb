//! Path-dependent TreeSHAP
//!
//! Exact Shapley values for tree models in O(leaves · depth²) per tree
//! (Lundberg, Erion & Lee, "Consistent Individualized Feature Attribution
//! for Tree Ensembles", Algorithm 2). Absent features are marginalized with
//! the training covers recorded on each node.

use ndarray::Array3;

use super::engine::Explainer;
use crate::features::{FeatureRecord, FEATURE_COUNT};
use crate::model::{ModelError, Node, Tree, TreeEnsemble};

#[derive(Debug, Clone, Copy)]
struct PathElement {
    /// `None` only for the root sentinel
    feature: Option<usize>,
    zero_fraction: f64,
    one_fraction: f64,
    weight: f64,
}

/// Accumulate one tree's SHAP values for `x` into `phi` (feature-major,
/// `width` outputs per feature), each multiplied by `scale`.
pub fn tree_shap(tree: &Tree, x: &[f64], width: usize, scale: f64, phi: &mut [f64]) {
    let walk = Walk { tree, x, width, scale };
    walk.recurse(0, &[], 1.0, 1.0, None, phi);
}

struct Walk<'a> {
    tree: &'a Tree,
    x: &'a [f64],
    width: usize,
    scale: f64,
}

impl Walk<'_> {
    fn recurse(
        &self,
        node: usize,
        parent_path: &[PathElement],
        zero_fraction: f64,
        one_fraction: f64,
        feature: Option<usize>,
        phi: &mut [f64],
    ) {
        let mut path = parent_path.to_vec();
        extend_path(&mut path, zero_fraction, one_fraction, feature);

        match self.tree.node(node) {
            Node::Leaf { value, .. } => {
                for i in 1..path.len() {
                    let el = path[i];
                    let Some(f) = el.feature else { continue };
                    let w = unwound_path_sum(&path, i);
                    let s = w * (el.one_fraction - el.zero_fraction) * self.scale;
                    for (j, v) in value.iter().enumerate().take(self.width) {
                        phi[f * self.width + j] += s * v;
                    }
                }
            }
            Node::Split { feature: split, threshold, left, right, cover } => {
                let (hot, cold) = if self.x[*split] <= *threshold {
                    (*left, *right)
                } else {
                    (*right, *left)
                };
                let hot_zero = self.tree.node(hot).cover() / cover;
                let cold_zero = self.tree.node(cold).cover() / cover;

                let mut incoming_zero = 1.0;
                let mut incoming_one = 1.0;

                // Same feature split earlier on this path: undo it and fold
                // its fractions into this split
                if let Some(k) = path.iter().position(|e| e.feature == Some(*split)) {
                    incoming_zero = path[k].zero_fraction;
                    incoming_one = path[k].one_fraction;
                    unwind_path(&mut path, k);
                }

                self.recurse(hot, &path, hot_zero * incoming_zero, incoming_one, Some(*split), phi);
                self.recurse(cold, &path, cold_zero * incoming_zero, 0.0, Some(*split), phi);
            }
        }
    }
}

fn extend_path(path: &mut Vec<PathElement>, zero_fraction: f64, one_fraction: f64, feature: Option<usize>) {
    let depth = path.len();
    path.push(PathElement {
        feature,
        zero_fraction,
        one_fraction,
        weight: if depth == 0 { 1.0 } else { 0.0 },
    });

    let denom = (depth + 1) as f64;
    for i in (0..depth).rev() {
        path[i + 1].weight += one_fraction * path[i].weight * (i + 1) as f64 / denom;
        path[i].weight = zero_fraction * path[i].weight * (depth - i) as f64 / denom;
    }
}

fn unwind_path(path: &mut Vec<PathElement>, index: usize) {
    let depth = path.len() - 1;
    let one = path[index].one_fraction;
    let zero = path[index].zero_fraction;
    let denom = (depth + 1) as f64;
    let mut next_one = path[depth].weight;

    for i in (0..depth).rev() {
        if one != 0.0 {
            let tmp = path[i].weight;
            path[i].weight = next_one * denom / ((i + 1) as f64 * one);
            next_one = tmp - path[i].weight * zero * (depth - i) as f64 / denom;
        } else {
            path[i].weight = path[i].weight * denom / (zero * (depth - i) as f64);
        }
    }

    for i in index..depth {
        path[i].feature = path[i + 1].feature;
        path[i].zero_fraction = path[i + 1].zero_fraction;
        path[i].one_fraction = path[i + 1].one_fraction;
    }
    path.pop();
}

/// Total permutation weight if the element at `index` were unwound
fn unwound_path_sum(path: &[PathElement], index: usize) -> f64 {
    let depth = path.len() - 1;
    let one = path[index].one_fraction;
    let zero = path[index].zero_fraction;
    let denom = (depth + 1) as f64;
    let mut next_one = path[depth].weight;
    let mut total = 0.0;

    for i in (0..depth).rev() {
        if one != 0.0 {
            let tmp = next_one * denom / ((i + 1) as f64 * one);
            total += tmp;
            next_one = path[i].weight - tmp * zero * (depth - i) as f64 / denom;
        } else if zero != 0.0 {
            total += (path[i].weight / zero) / ((depth - i) as f64 / denom);
        }
    }

    total
}

impl Explainer for TreeEnsemble {
    fn shap_values(&self, records: &[FeatureRecord]) -> Result<Array3<f64>, ModelError> {
        let width = self.output_width();
        let scale = self.tree_scale();
        let mut values = Array3::<f64>::zeros((records.len(), FEATURE_COUNT, width));

        for (sample, record) in records.iter().enumerate() {
            let mut phi = vec![0.0; FEATURE_COUNT * width];
            for tree in self.trees() {
                tree_shap(tree, record.as_slice(), width, scale, &mut phi);
            }

            if phi.iter().any(|v| !v.is_finite()) {
                return Err(ModelError::NonFiniteOutput);
            }

            for f in 0..FEATURE_COUNT {
                for j in 0..width {
                    values[[sample, f, j]] = phi[f * width + j];
                }
            }
        }

        Ok(values)
    }

    fn expected_value(&self) -> Vec<f64> {
        self.expected_output()
    }

    fn model_output(&self, record: &FeatureRecord) -> Vec<f64> {
        self.raw_output(record.as_slice())
    }
}
