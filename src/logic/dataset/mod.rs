//! Dataset Module - Synthetic Training Data
//!
//! Generates labeled synthetic fever patients for offline training and
//! splits them for evaluation. Training-time only; nothing here runs
//! during an assessment.

pub mod record;
pub mod generator;
pub mod split;

#[cfg(test)]
mod tests;

pub use record::TrainingSample;
pub use generator::{archetype_signals, argmax, class_distribution, generate_samples, PatientSampler};
pub use split::{stratified_split, DatasetSplit};
