//! Engine & Training Configuration
//!
//! Defaults come from `constants.rs`; `from_env` applies environment
//! overrides. All structs are serde-friendly so they can also be loaded
//! from a config file.

use serde::{Deserialize, Serialize};

use crate::constants::{
    self, DEFAULT_BACKGROUND_SIZE, DEFAULT_SAMPLE_COUNT, DEFAULT_SEED, DEFAULT_TEST_FRACTION,
    DEFAULT_TREE_COUNT, MIN_SAMPLE_COUNT,
};
use crate::error::{Result, TriageError};

// ============================================================================
// FOREST CONFIG
// ============================================================================

/// Random forest hyper-parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees
    pub n_estimators: usize,
    /// Maximum tree depth (root = depth 0)
    pub max_depth: usize,
    /// Nodes with fewer samples become leaves
    pub min_samples_split: usize,
    /// Each child must keep at least this many samples
    pub min_samples_leaf: usize,
    /// Candidate features per split (None = sqrt of feature count)
    pub max_features: Option<usize>,
    /// Draw a bootstrap sample per tree
    pub bootstrap: bool,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: DEFAULT_TREE_COUNT,
            max_depth: 8,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            bootstrap: true,
        }
    }
}

impl ForestConfig {
    /// Small forest for quick experiments and tests
    pub fn fast() -> Self {
        Self {
            n_estimators: 15,
            max_depth: 6,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(TriageError::InvalidTrainingConfig("n_estimators must be > 0".into()));
        }
        if self.min_samples_leaf == 0 {
            return Err(TriageError::InvalidTrainingConfig("min_samples_leaf must be > 0".into()));
        }
        if self.max_features == Some(0) {
            return Err(TriageError::InvalidTrainingConfig("max_features must be > 0".into()));
        }
        Ok(())
    }
}

// ============================================================================
// TRAINING CONFIG
// ============================================================================

/// One-shot training run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Synthetic samples to generate
    pub sample_count: usize,
    /// Seed for every random draw in the run
    pub seed: u64,
    /// Held-out share for the stratified split
    pub test_fraction: f64,
    /// Reference vectors kept for attribution
    pub background_size: usize,
    pub forest: ForestConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            seed: DEFAULT_SEED,
            test_fraction: DEFAULT_TEST_FRACTION,
            background_size: DEFAULT_BACKGROUND_SIZE,
            forest: ForestConfig::default(),
        }
    }
}

impl TrainingConfig {
    pub fn new(sample_count: usize, seed: u64) -> Self {
        Self {
            sample_count,
            seed,
            ..Default::default()
        }
    }

    /// Defaults with environment overrides
    pub fn from_env() -> Self {
        Self {
            sample_count: constants::get_sample_count(),
            seed: constants::get_seed(),
            background_size: constants::get_background_size(),
            forest: ForestConfig {
                n_estimators: constants::get_tree_count(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_count < MIN_SAMPLE_COUNT {
            return Err(TriageError::InvalidTrainingConfig(format!(
                "sample_count {} < minimum {}",
                self.sample_count, MIN_SAMPLE_COUNT
            )));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(TriageError::InvalidTrainingConfig(format!(
                "test_fraction {} outside (0, 1)",
                self.test_fraction
            )));
        }
        if self.background_size == 0 {
            return Err(TriageError::InvalidTrainingConfig("background_size must be > 0".into()));
        }
        self.forest.validate()
    }
}

// ============================================================================
// ENGINE CONFIG
// ============================================================================

/// Inference-time output shaping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Diagnoses returned per assessment
    pub top_diagnoses: usize,
    /// Attributions returned per assessment
    pub top_attributions: usize,
    /// Skip attribution entirely (kill-switch)
    pub explain_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_diagnoses: 3,
            top_attributions: 3,
            explain_enabled: true,
        }
    }
}
