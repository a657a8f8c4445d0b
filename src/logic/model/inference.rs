//! Inference contract
//!
//! Anything that maps a feature vector to a distribution over the five
//! labels. The explain engine only depends on this trait.

use serde::{Deserialize, Serialize};

use super::labels::{Diagnosis, CLASS_COUNT};
use crate::error::Result;
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

// ============================================================================
// INFERENCE TRAIT
// ============================================================================

/// Probabilistic multi-class diagnosis model
pub trait DiagnosisModel: Send + Sync {
    /// Class probabilities for a positional vector (canonical layout order)
    fn predict_values(&self, x: &[f64; FEATURE_COUNT]) -> Result<[f64; CLASS_COUNT]>;

    fn is_ready(&self) -> bool;

    fn predict_proba(&self, vector: &FeatureVector) -> Result<ClassProbabilities> {
        self.predict_values(&vector.to_array()).map(ClassProbabilities)
    }
}

// ============================================================================
// PROBABILITIES
// ============================================================================

/// Distribution over the label set, indexed by `Diagnosis::index`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities(pub [f64; CLASS_COUNT]);

/// One ranked diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisProbability {
    pub label: Diagnosis,
    pub prob: f64,
}

impl ClassProbabilities {
    pub fn get(&self, label: Diagnosis) -> f64 {
        self.0[label.index()]
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// All labels, highest probability first (ties keep label order)
    pub fn ranked(&self) -> Vec<DiagnosisProbability> {
        let mut ranked: Vec<_> = Diagnosis::ALL
            .iter()
            .map(|&label| DiagnosisProbability { label, prob: self.get(label) })
            .collect();
        ranked.sort_by(|a, b| b.prob.total_cmp(&a.prob));
        ranked
    }

    /// Most probable label
    pub fn top(&self) -> Diagnosis {
        let mut best = Diagnosis::ALL[0];
        for label in Diagnosis::ALL.iter().skip(1) {
            if self.get(*label) > self.get(best) {
                best = *label;
            }
        }
        best
    }
}
