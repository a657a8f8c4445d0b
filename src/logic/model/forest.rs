//! Random Forest
//!
//! Bagged CART trees with per-split feature sampling. Class probabilities
//! are the mean of the leaf distributions across trees.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::inference::DiagnosisModel;
use super::labels::CLASS_COUNT;
use super::tree::DecisionTree;
use crate::error::{Result, TriageError};
use crate::logic::config::ForestConfig;
use crate::logic::dataset::TrainingSample;
use crate::logic::features::FEATURE_COUNT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Untrained forest
    pub fn new(config: ForestConfig) -> Self {
        Self { config, trees: Vec::new() }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Fit on labeled samples; deterministic for a given seed
    pub fn fit(&mut self, samples: &[TrainingSample], seed: u64) -> Result<()> {
        self.config.validate()?;
        if samples.is_empty() {
            return Err(TriageError::InvalidTrainingConfig("no training samples".into()));
        }

        let x: Vec<[f64; FEATURE_COUNT]> = samples.iter().map(|s| s.features.to_array()).collect();
        let y: Vec<usize> = samples.iter().map(|s| s.label.index()).collect();
        if let Some(bad) = y.iter().find(|&&c| c >= CLASS_COUNT) {
            return Err(TriageError::InvalidLabel(format!("class index {}", bad)));
        }

        let n = samples.len();
        let mut master = StdRng::seed_from_u64(seed);
        let mut trees = Vec::with_capacity(self.config.n_estimators);

        for _ in 0..self.config.n_estimators {
            let mut rng = StdRng::seed_from_u64(master.gen());
            let indices: Vec<usize> = if self.config.bootstrap {
                (0..n).map(|_| rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };
            trees.push(DecisionTree::fit(&x, &y, indices, &self.config, &mut rng));
        }

        log::debug!(
            "Forest fitted: {} trees, {} nodes total",
            trees.len(),
            trees.iter().map(|t| t.node_count()).sum::<usize>()
        );

        self.trees = trees;
        Ok(())
    }

    /// Reject forests whose trees could misroute or panic during inference
    pub fn validate(&self) -> Result<()> {
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|reason| TriageError::MalformedModel(format!("tree {}: {}", i, reason)))?;
        }
        Ok(())
    }

    /// Share of samples whose most probable class matches the label
    pub fn accuracy(&self, samples: &[TrainingSample]) -> Result<f64> {
        if samples.is_empty() {
            return Ok(0.0);
        }
        let mut correct = 0usize;
        for sample in samples {
            if self.predict_proba(&sample.features)?.top() == sample.label {
                correct += 1;
            }
        }
        Ok(correct as f64 / samples.len() as f64)
    }
}

impl DiagnosisModel for RandomForest {
    fn predict_values(&self, x: &[f64; FEATURE_COUNT]) -> Result<[f64; CLASS_COUNT]> {
        if !self.is_fitted() {
            return Err(TriageError::ModelNotReady);
        }

        let mut probs = [0.0; CLASS_COUNT];
        for tree in &self.trees {
            for (p, leaf) in probs.iter_mut().zip(tree.predict(x).iter()) {
                *p += leaf;
            }
        }

        let n = self.trees.len() as f64;
        for p in probs.iter_mut() {
            *p /= n;
        }
        Ok(probs)
    }

    fn is_ready(&self) -> bool {
        self.is_fitted()
    }
}
