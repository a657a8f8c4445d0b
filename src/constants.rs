//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every default can be overridden through the environment.

use std::path::PathBuf;

/// Default number of synthetic patients generated for training
pub const DEFAULT_SAMPLE_COUNT: usize = 5000;

/// Smallest synthetic training set accepted
pub const MIN_SAMPLE_COUNT: usize = 1000;

/// Default RNG seed for training
pub const DEFAULT_SEED: u64 = 42;

/// Share of samples held out for evaluation
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Number of background vectors kept for attribution
pub const DEFAULT_BACKGROUND_SIZE: usize = 32;

/// Default number of trees in the forest
pub const DEFAULT_TREE_COUNT: usize = 200;

/// Default platelet count (x10^3/uL) when not reported
pub const DEFAULT_PLATELET_COUNT: f64 = 250.0;

/// Model artifact file name
pub const MODEL_FILE_NAME: &str = "fever_triage_model.json";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Fever Triage";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Directory holding the trained model
pub fn default_model_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fever-triage")
        .join("models")
}

/// Get model path from environment or use default
pub fn get_model_path() -> PathBuf {
    std::env::var("TRIAGE_MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_model_dir().join(MODEL_FILE_NAME))
}

/// Get training sample count from environment or use default
pub fn get_sample_count() -> usize {
    std::env::var("TRIAGE_SAMPLE_COUNT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SAMPLE_COUNT)
}

/// Get training seed from environment or use default
pub fn get_seed() -> u64 {
    std::env::var("TRIAGE_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED)
}

/// Get attribution background size from environment or use default
pub fn get_background_size() -> usize {
    std::env::var("TRIAGE_BACKGROUND_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_BACKGROUND_SIZE)
}

/// Get forest size from environment or use default
pub fn get_tree_count() -> usize {
    std::env::var("TRIAGE_TREE_COUNT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TREE_COUNT)
}
