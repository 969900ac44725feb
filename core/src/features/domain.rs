//! Feature Domains - declared range/choices for every input control
//!
//! One `FeatureSpec` per entry of `FEATURE_LAYOUT`, same order.

use serde::Serialize;

use super::layout::FEATURE_COUNT;

/// Valid values for a single feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureDomain {
    /// Inclusive integer range, rendered as a slider
    Range { min: u16, max: u16 },
    /// Binary flag 0/1, rendered as a select with one label per value
    Choice { labels: [&'static str; 2] },
}

impl FeatureDomain {
    pub fn min(&self) -> u16 {
        match self {
            FeatureDomain::Range { min, .. } => *min,
            FeatureDomain::Choice { .. } => 0,
        }
    }

    pub fn max(&self) -> u16 {
        match self {
            FeatureDomain::Range { max, .. } => *max,
            FeatureDomain::Choice { .. } => 1,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite()
            && value.fract() == 0.0
            && value >= f64::from(self.min())
            && value <= f64::from(self.max())
    }

    /// Human readable value; choice features map 0/1 to their labels
    pub fn format_value(&self, value: f64) -> String {
        match self {
            FeatureDomain::Choice { labels } if value == 0.0 => labels[0].to_string(),
            FeatureDomain::Choice { labels } if value == 1.0 => labels[1].to_string(),
            _ => format!("{}", value),
        }
    }
}

impl std::fmt::Display for FeatureDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureDomain::Range { min, max } => write!(f, "{}..={}", min, max),
            FeatureDomain::Choice { labels } => write!(f, "{{0: {}, 1: {}}}", labels[0], labels[1]),
        }
    }
}

const YES_NO: FeatureDomain = FeatureDomain::Choice { labels: ["No", "Yes"] };

/// Declared control for one feature
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FeatureSpec {
    /// Column name, identical to `FEATURE_LAYOUT[i]`
    pub name: &'static str,
    /// Heading shown above the input control
    pub label: &'static str,
    /// Label used when echoing entered values
    pub display: &'static str,
    pub domain: FeatureDomain,
    pub default: u16,
}

pub const FEATURE_SPECS: [FeatureSpec; FEATURE_COUNT] = [
    FeatureSpec {
        name: "Age",
        label: "Age",
        display: "Age",
        domain: FeatureDomain::Range { min: 50, max: 90 },
        default: 70,
    },
    FeatureSpec {
        name: "Gender",
        label: "Gender",
        display: "Gender",
        domain: FeatureDomain::Choice { labels: ["Male", "Female"] },
        default: 0,
    },
    FeatureSpec {
        name: "FamilyHistoryParkinsons",
        label: "Family History of Parkinson's",
        display: "Family History Parkinson's",
        domain: YES_NO,
        default: 0,
    },
    FeatureSpec {
        name: "TraumaticBrainInjury",
        label: "History of Traumatic Brain Injury",
        display: "Traumatic Brain Injury",
        domain: YES_NO,
        default: 0,
    },
    FeatureSpec {
        name: "UPDRS",
        label: "UPDRS (0–199)",
        display: "UPDRS",
        domain: FeatureDomain::Range { min: 0, max: 199 },
        default: 50,
    },
    FeatureSpec {
        name: "MoCA",
        label: "MoCA Score (0–30)",
        display: "MoCA",
        domain: FeatureDomain::Range { min: 0, max: 30 },
        default: 15,
    },
    FeatureSpec {
        name: "FunctionalAssessment",
        label: "Functional Assessment (0–10)",
        display: "Functional Assessment",
        domain: FeatureDomain::Range { min: 0, max: 10 },
        default: 5,
    },
    FeatureSpec { name: "Tremor", label: "Tremor", display: "Tremor", domain: YES_NO, default: 0 },
    FeatureSpec { name: "Rigidity", label: "Rigidity", display: "Rigidity", domain: YES_NO, default: 0 },
    FeatureSpec {
        name: "Bradykinesia",
        label: "Bradykinesia",
        display: "Bradykinesia",
        domain: YES_NO,
        default: 0,
    },
    FeatureSpec {
        name: "PosturalInstability",
        label: "Postural Instability",
        display: "Postural Instability",
        domain: YES_NO,
        default: 0,
    },
    FeatureSpec {
        name: "SpeechProblems",
        label: "Speech Problems",
        display: "Speech Problems",
        domain: YES_NO,
        default: 0,
    },
    FeatureSpec {
        name: "SleepDisorders",
        label: "Sleep Disorders",
        display: "Sleep Disorders",
        domain: YES_NO,
        default: 0,
    },
    FeatureSpec {
        name: "Constipation",
        label: "Constipation",
        display: "Constipation",
        domain: YES_NO,
        default: 0,
    },
];

/// Spec for the feature at `index` in layout order
pub fn feature_spec(index: usize) -> Option<&'static FeatureSpec> {
    FEATURE_SPECS.get(index)
}

/// Number of slider controls (range domains)
pub fn slider_count() -> usize {
    FEATURE_SPECS
        .iter()
        .filter(|s| matches!(s.domain, FeatureDomain::Range { .. }))
        .count()
}

/// Names of FEATURE_SPECS in declaration order, for layout checks
pub fn spec_names() -> [&'static str; FEATURE_COUNT] {
    let mut names = [""; FEATURE_COUNT];
    for (slot, spec) in names.iter_mut().zip(FEATURE_SPECS.iter()) {
        *slot = spec.name;
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::layout::FEATURE_LAYOUT;

    #[test]
    fn test_specs_follow_layout() {
        assert_eq!(&spec_names()[..], FEATURE_LAYOUT);
    }

    #[test]
    fn test_control_counts() {
        assert_eq!(slider_count(), 4);
        assert_eq!(FEATURE_COUNT - slider_count(), 10);
    }

    #[test]
    fn test_defaults_within_domain() {
        for spec in FEATURE_SPECS.iter() {
            assert!(
                spec.domain.contains(f64::from(spec.default)),
                "{} default out of domain",
                spec.name
            );
        }
    }

    #[test]
    fn test_domain_contains() {
        let age = FEATURE_SPECS[0].domain;
        assert!(age.contains(50.0));
        assert!(age.contains(90.0));
        assert!(!age.contains(49.0));
        assert!(!age.contains(70.5));
        assert!(!age.contains(f64::NAN));

        assert!(YES_NO.contains(1.0));
        assert!(!YES_NO.contains(2.0));
    }

    #[test]
    fn test_format_value() {
        let gender = FEATURE_SPECS[1].domain;
        assert_eq!(gender.format_value(0.0), "Male");
        assert_eq!(gender.format_value(1.0), "Female");
        assert_eq!(YES_NO.format_value(1.0), "Yes");
        assert_eq!(FEATURE_SPECS[4].domain.format_value(50.0), "50");
    }
}
