//! Features Module - Feature Vector Builder
//!
//! Turns raw patient input into the fixed-layout vector the classifier
//! and the triage scorer consume.

pub mod layout;
pub mod vector;
pub mod input;


// Re-export common types
pub use layout::{
    feature_by_name, feature_name, layout_hash, validate_layout, Feature,
    LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
};
pub use vector::{FeatureVector, FeatureVectorBuilder};
pub use input::{build_feature_vector, build_from_json, PatientInput};
