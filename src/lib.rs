//! Fever Triage
//!
//! Rule-based severity scoring, a random-forest diagnosis classifier with
//! Shapley attributions, and the care recommendation that combines them.
//!
//! ```ignore
//! use std::sync::Arc;
//! use fever_triage::{train_artifact, TrainingConfig, TriageEngine};
//!
//! let artifact = train_artifact(&TrainingConfig::default())?;
//! let engine = TriageEngine::new(Arc::new(artifact.into_classifier()?));
//! let assessment = engine.assess_json(&serde_json::json!({
//!     "temperature": 39.6,
//!     "duration_days": 4,
//!     "rash": 1,
//! }))?;
//! ```

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{Result, TriageError};

pub use logic::config::{EngineConfig, ForestConfig, TrainingConfig};
pub use logic::engine::{
    train_and_persist, train_and_persist_to, train_artifact, EngineStatus, TriageAssessment,
    TriageEngine,
};
pub use logic::explain::{ExplainResult, FeatureAttribution};
pub use logic::features::{build_feature_vector, Feature, FeatureVector, PatientInput};
pub use logic::model::{
    ClassProbabilities, Diagnosis, DiagnosisClassifier, DiagnosisModel, DiagnosisProbability,
    ModelArtifact, TrainingReport,
};
pub use logic::policy::Recommendation;
pub use logic::triage::{TriageColor, TriageLevel, TriageScore};
