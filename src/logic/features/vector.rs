//! Feature Vector - Core data structure for ML input
//!
//! Fields are named; the positional form used by the model is produced
//! only through [`FeatureVector::to_array`], which walks [`Feature::ALL`].

use serde::{Deserialize, Serialize};

use super::layout::{Feature, FEATURE_COUNT};
use crate::constants::DEFAULT_PLATELET_COUNT;

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Canonical patient feature vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub temperature: f64,
    pub duration_days: f64,
    pub headache: bool,
    pub body_pain: bool,
    pub rash: bool,
    pub nausea_vomiting: bool,
    pub breathing_difficulty: bool,
    pub platelet_count: f64,
    pub travel_history: bool,
    pub mosquito_exposure: bool,
}

impl FeatureVector {
    /// Vector with the required vitals set and every optional field at its default
    pub fn new(temperature: f64, duration_days: f64) -> Self {
        Self {
            temperature,
            duration_days,
            headache: false,
            body_pain: false,
            rash: false,
            nausea_vomiting: false,
            breathing_difficulty: false,
            platelet_count: DEFAULT_PLATELET_COUNT,
            travel_history: false,
            mosquito_exposure: false,
        }
    }

    pub fn builder(temperature: f64, duration_days: f64) -> FeatureVectorBuilder {
        FeatureVectorBuilder::new(temperature, duration_days)
    }

    /// Get feature value (flags as 0.0 / 1.0)
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Temperature => self.temperature,
            Feature::DurationDays => self.duration_days,
            Feature::Headache => flag(self.headache),
            Feature::BodyPain => flag(self.body_pain),
            Feature::Rash => flag(self.rash),
            Feature::NauseaVomiting => flag(self.nausea_vomiting),
            Feature::BreathingDifficulty => flag(self.breathing_difficulty),
            Feature::PlateletCount => self.platelet_count,
            Feature::TravelHistory => flag(self.travel_history),
            Feature::MosquitoExposure => flag(self.mosquito_exposure),
        }
    }

    /// Set feature value; flags are set when value != 0
    pub fn set(&mut self, feature: Feature, value: f64) {
        match feature {
            Feature::Temperature => self.temperature = value,
            Feature::DurationDays => self.duration_days = value,
            Feature::Headache => self.headache = value != 0.0,
            Feature::BodyPain => self.body_pain = value != 0.0,
            Feature::Rash => self.rash = value != 0.0,
            Feature::NauseaVomiting => self.nausea_vomiting = value != 0.0,
            Feature::BreathingDifficulty => self.breathing_difficulty = value != 0.0,
            Feature::PlateletCount => self.platelet_count = value,
            Feature::TravelHistory => self.travel_history = value != 0.0,
            Feature::MosquitoExposure => self.mosquito_exposure = value != 0.0,
        }
    }

    /// Values in canonical layout order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        let mut values = [0.0; FEATURE_COUNT];
        for feature in Feature::ALL {
            values[feature.index()] = self.get(feature);
        }
        values
    }

    /// Inverse of [`FeatureVector::to_array`]
    pub fn from_array(values: &[f64; FEATURE_COUNT]) -> Self {
        let mut vector = Self::new(0.0, 0.0);
        for feature in Feature::ALL {
            vector.set(feature, values[feature.index()]);
        }
        vector
    }
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new(temperature: f64, duration_days: f64) -> Self {
        Self { vector: FeatureVector::new(temperature, duration_days) }
    }

    pub fn headache(mut self, value: bool) -> Self {
        self.vector.headache = value;
        self
    }

    pub fn body_pain(mut self, value: bool) -> Self {
        self.vector.body_pain = value;
        self
    }

    pub fn rash(mut self, value: bool) -> Self {
        self.vector.rash = value;
        self
    }

    pub fn nausea_vomiting(mut self, value: bool) -> Self {
        self.vector.nausea_vomiting = value;
        self
    }

    pub fn breathing_difficulty(mut self, value: bool) -> Self {
        self.vector.breathing_difficulty = value;
        self
    }

    pub fn platelet_count(mut self, value: f64) -> Self {
        self.vector.platelet_count = value;
        self
    }

    pub fn travel_history(mut self, value: bool) -> Self {
        self.vector.travel_history = value;
        self
    }

    pub fn mosquito_exposure(mut self, value: bool) -> Self {
        self.vector.mosquito_exposure = value;
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let vector = FeatureVector::new(38.0, 2.0);
        assert_eq!(vector.platelet_count, 250.0);
        assert!(!vector.rash);
        assert_eq!(vector.get(Feature::Headache), 0.0);
    }

    #[test]
    fn test_builder() {
        let vector = FeatureVector::builder(40.2, 8.0)
            .rash(true)
            .platelet_count(40.0)
            .build();

        assert_eq!(vector.get(Feature::Temperature), 40.2);
        assert_eq!(vector.get(Feature::Rash), 1.0);
        assert_eq!(vector.get(Feature::PlateletCount), 40.0);
    }

    #[test]
    fn test_array_order() {
        let vector = FeatureVector::builder(39.0, 4.0)
            .mosquito_exposure(true)
            .build();
        let values = vector.to_array();

        assert_eq!(values[0], 39.0);
        assert_eq!(values[1], 4.0);
        assert_eq!(values[7], 250.0);
        assert_eq!(values[9], 1.0);
        assert_eq!(FeatureVector::from_array(&values), vector);
    }
}
