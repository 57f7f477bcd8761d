//! Logic Module - Form, model and outcome
//!
//! - `features/` - Form input, feature layout and vector
//! - `model/` - Artifacts, adapters and the prediction pipeline
//! - `verdict` - Label to user-facing outcome
//! - `reference` - Static reference panel

pub mod features;
pub mod model;
pub mod verdict;
pub mod reference;
