use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureVector;
use crate::logic::model::Diagnosis;

/// Labeled synthetic patient
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TrainingSample {
    pub features: FeatureVector,
    pub label: Diagnosis,
}

impl TrainingSample {
    pub fn new(features: FeatureVector, label: Diagnosis) -> Self {
        Self { features, label }
    }
}
