//! Explain Module - Feature Attribution
//!
//! Per-feature signed contributions to the classifier's top-class
//! probability, satisfying local accuracy.

pub mod types;
pub mod engine;

pub use types::{ExplainResult, FeatureAttribution};
pub use engine::{explain, explain_class};
