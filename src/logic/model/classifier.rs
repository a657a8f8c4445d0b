//! Diagnosis Classifier
//!
//! The trained forest plus the background reference set the explain
//! engine needs. Immutable once trained; share it behind an `Arc`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::forest::RandomForest;
use super::inference::{DiagnosisModel, DiagnosisProbability};
use super::labels::CLASS_COUNT;
use crate::error::{Result, TriageError};
use crate::logic::config::ForestConfig;
use crate::logic::dataset::TrainingSample;
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisClassifier {
    forest: RandomForest,
    background: Vec<FeatureVector>,
}

impl DiagnosisClassifier {
    /// Untrained classifier; every prediction fails with `ModelNotReady`
    pub fn new(config: ForestConfig) -> Self {
        Self {
            forest: RandomForest::new(config),
            background: Vec::new(),
        }
    }

    /// Train a new classifier
    pub fn train(
        samples: &[TrainingSample],
        config: ForestConfig,
        background_size: usize,
        seed: u64,
    ) -> Result<Self> {
        let mut classifier = Self::new(config);
        classifier.fit(samples, background_size, seed)?;
        Ok(classifier)
    }

    /// Fit the forest and draw the background set from `samples`
    pub fn fit(&mut self, samples: &[TrainingSample], background_size: usize, seed: u64) -> Result<()> {
        if background_size == 0 {
            return Err(TriageError::InvalidTrainingConfig("background_size must be > 0".into()));
        }

        self.forest.fit(samples, seed)?;

        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        let k = background_size.min(samples.len());
        self.background = rand::seq::index::sample(&mut rng, samples.len(), k)
            .iter()
            .map(|i| samples[i].features)
            .collect();

        Ok(())
    }

    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    /// Reference vectors for attribution
    pub fn background(&self) -> &[FeatureVector] {
        &self.background
    }

    /// `k` most probable diagnoses
    pub fn top_diagnoses(&self, vector: &FeatureVector, k: usize) -> Result<Vec<DiagnosisProbability>> {
        let mut ranked = self.predict_proba(vector)?.ranked();
        ranked.truncate(k);
        Ok(ranked)
    }

    pub fn accuracy(&self, samples: &[TrainingSample]) -> Result<f64> {
        self.forest.accuracy(samples)
    }
}

impl DiagnosisModel for DiagnosisClassifier {
    fn predict_values(&self, x: &[f64; FEATURE_COUNT]) -> Result<[f64; CLASS_COUNT]> {
        self.forest.predict_values(x)
    }

    fn is_ready(&self) -> bool {
        self.forest.is_ready() && !self.background.is_empty()
    }
}
