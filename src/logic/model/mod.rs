//! Model Module - Diagnosis Classifier
//!
//! Random forest over the canonical feature vector, its training
//! pipeline and the persisted artifact format.

pub mod labels;
pub mod inference;
pub mod tree;
pub mod forest;
pub mod classifier;
pub mod training;
pub mod artifact;

// Re-export common types
pub use labels::{Diagnosis, CLASS_COUNT};
pub use inference::{ClassProbabilities, DiagnosisModel, DiagnosisProbability};
pub use tree::{DecisionTree, TreeNode};
pub use forest::RandomForest;
pub use classifier::DiagnosisClassifier;
pub use training::{train, TrainingReport};
pub use artifact::ModelArtifact;
