//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! The scaler and the classifier were fit on exactly this order. Any
//! reordering silently corrupts predictions, so artifacts that declare their
//! feature names are checked against this layout at load time.
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    "age",      // 0: Age in years
    "sex",      // 1: 1 = Male, 0 = Female
    "cp",       // 2: Chest pain type (0-3)
    "trestbps", // 3: Resting blood pressure (mm Hg)
    "chol",     // 4: Serum cholesterol (mg/dl)
    "fbs",      // 5: Fasting blood sugar > 120 mg/dl (0/1)
    "restecg",  // 6: Resting ECG result (0-2)
    "thalach",  // 7: Maximum heart rate achieved
    "exang",    // 8: Exercise induced angina (0/1)
    "oldpeak",  // 9: ST depression induced by exercise
    "slope",    // 10: Slope of peak exercise ST segment (0-2)
    "ca",       // 11: Major vessels colored by fluoroscopy (0-3)
    "thal",     // 12: Thalassemia test result (0-2)
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 13;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 hash of the feature layout
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
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

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when the feature names declared by an artifact differ from the layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMismatchError {
    pub expected: Vec<String>,
    pub actual: Vec<String>,
}

impl LayoutMismatchError {
    /// First position where the two layouts disagree
    pub fn first_difference(&self) -> usize {
        self.expected
            .iter()
            .zip(self.actual.iter())
            .position(|(e, a)| e != a)
            .unwrap_or_else(|| self.expected.len().min(self.actual.len()))
    }
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let index = self.first_difference();
        write!(
            f,
            "feature layout mismatch at position {}: expected {:?}, got {:?} ({} features declared, {} expected)",
            index,
            self.expected.get(index).map(String::as_str).unwrap_or("<none>"),
            self.actual.get(index).map(String::as_str).unwrap_or("<none>"),
            self.actual.len(),
            self.expected.len(),
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that declared feature names match the current layout exactly
pub fn validate_feature_names<S: AsRef<str>>(names: &[S]) -> Result<(), LayoutMismatchError> {
    let matches = names.len() == FEATURE_COUNT
        && names
            .iter()
            .zip(FEATURE_LAYOUT.iter())
            .all(|(actual, expected)| actual.as_ref() == *expected);

    if matches {
        return Ok(());
    }

    Err(LayoutMismatchError {
        expected: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        actual: names.iter().map(|s| s.as_ref().to_string()).collect(),
    })
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

// ============================================================================
// TESTS
// ============================================================================
