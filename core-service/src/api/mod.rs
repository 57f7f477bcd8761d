//! API Module
//!
//! Types shared with the HTTP layer.

pub mod status;

pub use status::{EngineInfo, ModelStatus};
