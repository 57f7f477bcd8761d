//! Feature Vector - Core data structure for ML input
//!
//! **Versioned feature vector with layout metadata**
//!
//! Uses centralized layout from `layout.rs` for consistent feature ordering
//! and a layout hash that ends up in logs next to the values.

use serde::{Deserialize, Serialize};
use super::layout::{
    FEATURE_COUNT, FEATURE_VERSION, FEATURE_LAYOUT,
    feature_index, layout_hash,
};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
///
/// Both the raw vector assembled from the form and the scaled vector handed to
/// the classifier use this type; the dimensionality is fixed by the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self::from_values([0.0; FEATURE_COUNT])
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Create from a slice, `None` unless it holds exactly FEATURE_COUNT values
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        let array: [f64; FEATURE_COUNT] = values.try_into().ok()?;
        Some(Self::from_values(array))
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Index of the first NaN or infinite value
    pub fn first_non_finite(&self) -> Option<usize> {
        self.values.iter().position(|v| !v.is_finite())
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), serde_json::Value::from(*value)))
                .collect::<serde_json::Map<_, _>>(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_new() {
        let vector = FeatureVector::new();
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
        assert_eq!(vector.values.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_feature_vector_from_slice() {
        assert!(FeatureVector::from_slice(&[1.0; FEATURE_COUNT]).is_some());
        assert!(FeatureVector::from_slice(&[1.0; 12]).is_none());
        assert!(FeatureVector::from_slice(&[1.0; 14]).is_none());
    }

    #[test]
    fn test_get_by_name() {
        let mut values = [0.0; FEATURE_COUNT];
        values[9] = 2.5;
        let vector = FeatureVector::from(values);

        assert_eq!(vector.get_by_name("oldpeak"), Some(2.5));
        assert_eq!(vector.get_by_name("nonexistent"), None);
    }

    #[test]
    fn test_first_non_finite() {
        let mut vector = FeatureVector::new();
        assert_eq!(vector.first_non_finite(), None);

        vector.values[4] = f64::NAN;
        assert_eq!(vector.first_non_finite(), Some(4));
    }

    #[test]
    fn test_to_log_entry() {
        let mut values = [0.0; FEATURE_COUNT];
        values[0] = 54.0;
        let entry = FeatureVector::from(values).to_log_entry();

        assert_eq!(entry["feature_version"], FEATURE_VERSION);
        assert_eq!(entry["named_values"]["age"], 54.0);
        assert_eq!(entry["named_values"].as_object().unwrap().len(), FEATURE_COUNT);
    }
}
