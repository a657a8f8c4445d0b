//! Stratified train/test split

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::record::TrainingSample;
use crate::logic::model::CLASS_COUNT;

/// Train / test partition of a labeled dataset
#[derive(Debug, Clone)]
pub struct DatasetSplit {
    pub train: Vec<TrainingSample>,
    pub test: Vec<TrainingSample>,
}

/// Split per class so both halves keep the label proportions.
///
/// Each class with at least two samples contributes at least one test
/// sample and keeps at least one training sample.
pub fn stratified_split(
    samples: &[TrainingSample],
    test_fraction: f64,
    rng: &mut StdRng,
) -> DatasetSplit {
    let mut by_class: Vec<Vec<usize>> = vec![Vec::new(); CLASS_COUNT];
    for (i, sample) in samples.iter().enumerate() {
        by_class[sample.label.index()].push(i);
    }

    let mut train_idx = Vec::with_capacity(samples.len());
    let mut test_idx = Vec::new();

    for mut indices in by_class {
        if indices.is_empty() {
            continue;
        }
        indices.shuffle(rng);

        let n = indices.len();
        let n_test = if n < 2 {
            0
        } else {
            ((n as f64 * test_fraction).round() as usize).clamp(1, n - 1)
        };

        test_idx.extend_from_slice(&indices[..n_test]);
        train_idx.extend_from_slice(&indices[n_test..]);
    }

    // Interleave classes again
    train_idx.shuffle(rng);
    test_idx.shuffle(rng);

    DatasetSplit {
        train: train_idx.into_iter().map(|i| samples[i]).collect(),
        test: test_idx.into_iter().map(|i| samples[i]).collect(),
    }
}
