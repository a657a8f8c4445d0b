use serde::{Deserialize, Serialize};

use crate::logic::features::Feature;
use crate::logic::model::Diagnosis;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureAttribution {
    pub feature: Feature,
    pub contribution: f64, // signed
    pub impact: f64,       // |contribution|
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainResult {
    /// Class being explained (top prediction)
    pub class: Diagnosis,
    /// Expected top-class probability over the background set
    pub baseline: f64,
    /// Model output for the instance
    pub prediction: f64,
    /// All features, largest impact first
    pub contributions: Vec<FeatureAttribution>,
}

impl ExplainResult {
    pub fn top(&self, k: usize) -> &[FeatureAttribution] {
        &self.contributions[..k.min(self.contributions.len())]
    }

    pub fn total_contribution(&self) -> f64 {
        self.contributions.iter().map(|c| c.contribution).sum()
    }

    /// |baseline + Σ contributions − prediction|
    pub fn local_accuracy_gap(&self) -> f64 {
        (self.baseline + self.total_contribution() - self.prediction).abs()
    }
}
