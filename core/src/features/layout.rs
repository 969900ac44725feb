//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema the model was trained on.**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! Model artifacts list their feature names; the loader refuses any artifact
//! whose names differ from this layout.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in the exact column order the classifier expects
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Demographics (0-3) ===
    "Age",                     // 0: Years, 50-90
    "Gender",                  // 1: 0 = Male, 1 = Female
    "FamilyHistoryParkinsons", // 2: Flag
    "TraumaticBrainInjury",    // 3: Flag

    // === Clinical scores (4-6) ===
    "UPDRS",                   // 4: Unified Parkinson's Disease Rating Scale, 0-199
    "MoCA",                    // 5: Montreal Cognitive Assessment, 0-30
    "FunctionalAssessment",    // 6: 0-10

    // === Symptoms (7-13) ===
    "Tremor",                  // 7
    "Rigidity",                // 8
    "Bradykinesia",            // 9
    "PosturalInstability",     // 10
    "SpeechProblems",          // 11
    "SleepDisorders",          // 12
    "Constipation",            // 13
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 14;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Hash of the current layout
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// True when `names` lists exactly the layout's features in layout order
pub fn matches_layout<S: AsRef<str>>(names: &[S]) -> bool {
    names.len() == FEATURE_COUNT
        && names
            .iter()
            .zip(FEATURE_LAYOUT)
            .all(|(name, expected)| name.as_ref() == *expected)
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 14);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(compute_layout_hash(), compute_layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_matches_layout() {
        assert!(matches_layout(FEATURE_LAYOUT));

        let mut swapped: Vec<&str> = FEATURE_LAYOUT.to_vec();
        swapped.swap(0, 1);
        assert!(!matches_layout(&swapped));

        assert!(!matches_layout(&FEATURE_LAYOUT[..13]));
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("Age"), Some(0));
        assert_eq!(feature_index("UPDRS"), Some(4));
        assert_eq!(feature_index("Constipation"), Some(13));
        assert_eq!(feature_index("cpu_percent"), None);
    }

    #[test]
    fn test_feature_name() {
        assert_eq!(feature_name(5), Some("MoCA"));
        assert_eq!(feature_name(14), None);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}
