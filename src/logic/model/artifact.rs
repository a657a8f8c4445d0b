//! Model Artifact - persisted trained classifier
//!
//! JSON document carrying the classifier, the feature layout it was
//! trained with, the training report and a SHA-256 checksum of the
//! classifier payload. Loading verifies both layout and checksum.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::classifier::DiagnosisClassifier;
use super::training::TrainingReport;
use crate::constants::APP_VERSION;
use crate::error::{Result, TriageError};
use crate::logic::features::{layout_hash, validate_layout, FEATURE_VERSION};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_version: u8,
    pub layout_hash: u32,
    pub app_version: String,
    pub report: TrainingReport,
    /// Hex SHA-256 of the serialized classifier
    pub checksum: String,
    pub classifier: DiagnosisClassifier,
}

impl ModelArtifact {
    pub fn new(classifier: DiagnosisClassifier, report: TrainingReport) -> Result<Self> {
        let checksum = compute_checksum(&classifier)?;
        Ok(Self {
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            app_version: APP_VERSION.to_string(),
            report,
            checksum,
            classifier,
        })
    }

    /// Layout, checksum and tree structure checks
    pub fn verify(&self) -> Result<()> {
        validate_layout(self.feature_version, self.layout_hash)?;

        let actual = compute_checksum(&self.classifier)?;
        if actual != self.checksum {
            return Err(TriageError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }

        self.classifier.forest().validate()
    }

    /// Write as JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;

        log::info!("Model saved to {}", path.display());
        Ok(())
    }

    /// Read and verify an artifact
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading model from: {}", path.display());

        let reader = BufReader::new(File::open(path)?);
        let artifact: Self = serde_json::from_reader(reader)?;
        artifact.verify()?;

        log::info!(
            "Model loaded (trained {}, test accuracy {:.3})",
            artifact.report.trained_at.format("%Y-%m-%d %H:%M:%S"),
            artifact.report.test_accuracy
        );
        Ok(artifact)
    }

    /// Verified classifier, ready to share
    pub fn into_classifier(self) -> Result<DiagnosisClassifier> {
        self.verify()?;
        if !crate::logic::model::DiagnosisModel::is_ready(&self.classifier) {
            return Err(TriageError::ModelNotReady);
        }
        Ok(self.classifier)
    }
}

fn compute_checksum(classifier: &DiagnosisClassifier) -> Result<String> {
    let payload = serde_json::to_vec(classifier)?;
    let mut hasher = Sha256::new();
    hasher.update(&payload);
    Ok(hex::encode(hasher.finalize()))
}
