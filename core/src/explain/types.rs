use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub name: String,
    /// Position in the feature layout
    pub index: usize,
    /// Input value the patient had for this feature
    pub value: f64,
    /// Signed SHAP value for the positive class
    pub contribution: f64,
}

impl FeatureContribution {
    /// Pushes the prediction toward a Parkinson's diagnosis (zero counts as toward)
    pub fn is_toward_diagnosis(&self) -> bool {
        self.contribution >= 0.0
    }

    /// Contribution scaled to percentage points
    pub fn percent(&self) -> f64 {
        self.contribution * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainResult {
    /// All features, ranked by |contribution| descending
    pub contributions: Vec<FeatureContribution>,
    /// Explainer baseline for the positive class
    pub base_value: f64,
    /// Model output the attributions explain (probability or log-odds)
    pub output_value: f64,
}

impl ExplainResult {
    /// First `n` ranked contributions
    pub fn top(&self, n: usize) -> &[FeatureContribution] {
        &self.contributions[..n.min(self.contributions.len())]
    }

    /// Sum of all signed contributions
    pub fn total(&self) -> f64 {
        self.contributions.iter().map(|c| c.contribution).sum()
    }

    /// `|base + Σφ - output|`; near zero for an additive explanation
    pub fn reconciliation_error(&self) -> f64 {
        (self.base_value + self.total() - self.output_value).abs()
    }
}
