//! Features Module - Form input and feature vector
//!
//! The form model, the authoritative feature layout and the vector type
//! handed to the scaler and classifier.

pub mod layout;
pub mod vector;
pub mod input;


// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, LayoutInfo, LayoutMismatchError};
pub use vector::FeatureVector;
pub use input::{FieldKind, FieldSpec, PatientInput, Sex, FORM_FIELDS};
