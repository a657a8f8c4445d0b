//! Training Pipeline
//!
//! generate → stratified split → fit → evaluate. One-shot and blocking.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::classifier::DiagnosisClassifier;
use super::labels::Diagnosis;
use crate::error::Result;
use crate::logic::config::TrainingConfig;
use crate::logic::dataset::{class_distribution, generate_samples, stratified_split};

/// Summary of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub sample_count: usize,
    pub train_count: usize,
    pub test_count: usize,
    pub seed: u64,
    pub class_distribution: BTreeMap<Diagnosis, usize>,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    pub trained_at: DateTime<Utc>,
}

/// Run a full training pass
pub fn train(config: &TrainingConfig) -> Result<(DiagnosisClassifier, TrainingReport)> {
    config.validate()?;

    log::info!("Generating {} synthetic samples (seed {})...", config.sample_count, config.seed);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let samples = generate_samples(config.sample_count, &mut rng)?;

    let counts = class_distribution(&samples);
    let class_distribution: BTreeMap<Diagnosis, usize> =
        Diagnosis::ALL.iter().copied().zip(counts.iter().copied()).collect();
    for (label, count) in &class_distribution {
        log::info!("  {:<12} {}", label.as_str(), count);
    }

    let split = stratified_split(&samples, config.test_fraction, &mut rng);
    log::info!("Training on {} samples ({} held out)...", split.train.len(), split.test.len());

    let classifier = DiagnosisClassifier::train(
        &split.train,
        config.forest.clone(),
        config.background_size,
        config.seed,
    )?;

    let train_accuracy = classifier.accuracy(&split.train)?;
    let test_accuracy = classifier.accuracy(&split.test)?;
    log::info!("Training accuracy: {:.3}", train_accuracy);
    log::info!("Test accuracy: {:.3}", test_accuracy);

    let report = TrainingReport {
        sample_count: samples.len(),
        train_count: split.train.len(),
        test_count: split.test.len(),
        seed: config.seed,
        class_distribution,
        train_accuracy,
        test_accuracy,
        trained_at: Utc::now(),
    };

    Ok((classifier, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TriageError;
    use crate::logic::config::ForestConfig;

    fn quick_config(seed: u64) -> TrainingConfig {
        TrainingConfig {
            sample_count: 1000,
            seed,
            background_size: 8,
            forest: ForestConfig::fast(),
            ..Default::default()
        }
    }

    #[test]
    fn test_train_report() {
        let (classifier, report) = train(&quick_config(42)).unwrap();

        assert!(classifier.forest().is_fitted());
        assert_eq!(report.sample_count, 1000);
        assert_eq!(report.train_count + report.test_count, 1000);
        assert_eq!(report.class_distribution.values().sum::<usize>(), 1000);
        assert!(report.test_count >= 190 && report.test_count <= 210);
        // Labels are noisy; the forest still beats chance by a wide margin
        assert!(report.test_accuracy > 0.4, "test accuracy {}", report.test_accuracy);
    }

    #[test]
    fn test_same_seed_same_model() {
        let (a, _) = train(&quick_config(5)).unwrap();
        let (b, _) = train(&quick_config(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_few_samples_rejected() {
        let config = TrainingConfig { sample_count: 10, ..quick_config(1) };
        assert!(matches!(train(&config), Err(TriageError::InvalidTrainingConfig(_))));
    }
}
