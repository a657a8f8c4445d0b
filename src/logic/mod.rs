//! Logic Module - Triage Engines
//!
//! Everything between raw patient input and the final assessment.
//!
//! ## Architecture
//! - `features/` - Input normalization into the fixed feature layout
//! - `dataset/` - Synthetic training patients and their labels
//! - `model/` - Random forest classifier, training pipeline, artifact
//! - `explain/` - Shapley feature attribution
//! - `triage/` - Rule-based severity score
//! - `policy/` - Care recommendation
//! - `engine` - Orchestration and training entry points

pub mod config;

// Pipeline stages
pub mod features;
pub mod dataset;
pub mod model;
pub mod explain;
pub mod triage;
pub mod policy;

pub mod engine;
