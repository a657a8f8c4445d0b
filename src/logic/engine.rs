//! Triage Engine
//!
//! Fuses the rule scorer, the diagnosis classifier, the attributor and the
//! recommendation policy into one assessment.
//! Input: PatientInput
//! Output: TriageAssessment

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Result, TriageError};
use crate::logic::config::{EngineConfig, TrainingConfig};
use crate::logic::explain::{explain, FeatureAttribution};
use crate::logic::features::{self, build_feature_vector, FeatureVector, PatientInput};
use crate::logic::model::{self, DiagnosisClassifier, DiagnosisModel, DiagnosisProbability, ModelArtifact};
use crate::logic::policy::recommend;
use crate::logic::triage::{self, TriageColor, TriageLevel};

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// Result of one assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageAssessment {
    pub score: u32,
    pub level: TriageLevel,
    pub color: TriageColor,
    /// Most probable diagnoses, highest first
    pub diagnoses: Vec<DiagnosisProbability>,
    /// Most influential features for the top diagnosis, largest impact first
    pub attributions: Vec<FeatureAttribution>,
    pub recommendation: String,
}

impl TriageAssessment {
    pub fn top_diagnosis(&self) -> Option<&DiagnosisProbability> {
        self.diagnoses.first()
    }
}

/// Engine health snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub feature_version: u8,
    pub feature_count: usize,
    pub layout_hash: u32,
    pub assessments: u64,
    pub failures: u64,
    pub avg_latency_us: u64,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Stateless apart from usage counters; share it freely across threads
pub struct TriageEngine {
    classifier: Option<Arc<DiagnosisClassifier>>,
    config: EngineConfig,
    assessments: AtomicU64,
    failures: AtomicU64,
    latency_sum_us: AtomicU64,
}

impl TriageEngine {
    pub fn new(classifier: Arc<DiagnosisClassifier>) -> Self {
        Self::with_config(classifier, EngineConfig::default())
    }

    pub fn with_config(classifier: Arc<DiagnosisClassifier>, config: EngineConfig) -> Self {
        Self {
            classifier: Some(classifier),
            config,
            assessments: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            latency_sum_us: AtomicU64::new(0),
        }
    }

    /// Engine without a model; every assessment fails with `ModelNotReady`
    pub fn unloaded() -> Self {
        Self {
            classifier: None,
            config: EngineConfig::default(),
            assessments: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            latency_sum_us: AtomicU64::new(0),
        }
    }

    /// Load a verified artifact from disk
    pub fn from_artifact_path(path: &Path) -> Result<Self> {
        let classifier = ModelArtifact::load(path)?.into_classifier()?;
        Ok(Self::new(Arc::new(classifier)))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn classifier(&self) -> Option<&Arc<DiagnosisClassifier>> {
        self.classifier.as_ref()
    }

    pub fn is_model_loaded(&self) -> bool {
        self.classifier.as_ref().map_or(false, |c| c.is_ready())
    }

    /// Assess one patient
    pub fn assess(&self, input: &PatientInput) -> Result<TriageAssessment> {
        let start = Instant::now();
        let result = self.assess_inner(input);

        let elapsed = start.elapsed().as_micros() as u64;
        match &result {
            Ok(assessment) => {
                self.assessments.fetch_add(1, Ordering::Relaxed);
                self.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
                log::debug!(
                    "Assessment: score {} ({}) top {:?} in {}us",
                    assessment.score,
                    assessment.level,
                    assessment.top_diagnosis().map(|d| d.label),
                    elapsed
                );
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                log::debug!("Assessment rejected: {}", e);
            }
        }

        result
    }

    /// Assess a raw JSON value (must be an object)
    pub fn assess_json(&self, value: &serde_json::Value) -> Result<TriageAssessment> {
        match value.as_object() {
            Some(input) => self.assess(input),
            None => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                Err(TriageError::MissingField { field: "temperature" })
            }
        }
    }

    fn assess_inner(&self, input: &PatientInput) -> Result<TriageAssessment> {
        let vector = build_feature_vector(input)?;
        let classifier = self
            .classifier
            .as_deref()
            .filter(|c| c.is_ready())
            .ok_or(TriageError::ModelNotReady)?;

        self.assess_vector(classifier, &vector)
    }

    fn assess_vector(
        &self,
        classifier: &DiagnosisClassifier,
        vector: &FeatureVector,
    ) -> Result<TriageAssessment> {
        let triage = triage::score(vector);

        let probabilities = classifier.predict_proba(vector)?;
        let top = probabilities.top();
        let mut diagnoses = probabilities.ranked();
        diagnoses.truncate(self.config.top_diagnoses);

        let attributions = if self.config.explain_enabled {
            let explanation = explain(classifier, vector, classifier.background())?;
            explanation.top(self.config.top_attributions).to_vec()
        } else {
            Vec::new()
        };

        let recommendation = recommend(triage.level, top).text();

        Ok(TriageAssessment {
            score: triage.score,
            level: triage.level,
            color: triage.color,
            diagnoses,
            attributions,
            recommendation,
        })
    }

    pub fn status(&self) -> EngineStatus {
        let count = self.assessments.load(Ordering::Relaxed);
        let sum = self.latency_sum_us.load(Ordering::Relaxed);

        EngineStatus {
            model_loaded: self.is_model_loaded(),
            feature_version: features::FEATURE_VERSION,
            feature_count: features::FEATURE_COUNT,
            layout_hash: features::layout_hash(),
            assessments: count,
            failures: self.failures.load(Ordering::Relaxed),
            avg_latency_us: if count > 0 { sum / count } else { 0 },
        }
    }
}

// ============================================================================
// TRAINING ENTRY POINTS
// ============================================================================

/// Train with environment defaults and write the artifact to the default model path
pub fn train_and_persist(sample_count: usize, seed: u64) -> Result<ModelArtifact> {
    let config = TrainingConfig {
        sample_count,
        seed,
        ..TrainingConfig::from_env()
    };
    train_and_persist_to(&config, &constants::get_model_path())
}

/// Train and write the artifact to `path`
pub fn train_and_persist_to(config: &TrainingConfig, path: &Path) -> Result<ModelArtifact> {
    let artifact = train_artifact(config)?;
    artifact.save(path)?;
    Ok(artifact)
}

/// Train without touching the filesystem
pub fn train_artifact(config: &TrainingConfig) -> Result<ModelArtifact> {
    let (classifier, report) = model::train(config)?;
    ModelArtifact::new(classifier, report)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::config::ForestConfig;
    use crate::logic::features::Feature;
    use serde_json::json;
    use std::sync::OnceLock;

    fn test_config() -> TrainingConfig {
        TrainingConfig {
            sample_count: 1000,
            seed: 7,
            background_size: 16,
            forest: ForestConfig::fast(),
            ..Default::default()
        }
    }

    fn shared_classifier() -> Arc<DiagnosisClassifier> {
        static CLASSIFIER: OnceLock<Arc<DiagnosisClassifier>> = OnceLock::new();
        CLASSIFIER
            .get_or_init(|| {
                let (classifier, _) = model::train(&test_config()).unwrap();
                Arc::new(classifier)
            })
            .clone()
    }

    fn engine() -> TriageEngine {
        TriageEngine::new(shared_classifier())
    }

    fn input(value: serde_json::Value) -> PatientInput {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_critical_scenario() {
        let result = engine()
            .assess(&input(json!({
                "temperature": 40.2,
                "duration_days": 8,
                "rash": 1,
                "platelet_count": 40,
                "mosquito_exposure": 1
            })))
            .unwrap();

        assert_eq!(result.score, 16);
        assert_eq!(result.level, TriageLevel::Critical);
        assert_eq!(result.color, TriageColor::Red);
        assert!(result
            .recommendation
            .starts_with("Seek emergency care immediately. Go to hospital ER now. Recommended tests: "));
    }

    #[test]
    fn test_mild_scenario() {
        let result = engine()
            .assess(&input(json!({"temperature": 37.8, "duration_days": 1})))
            .unwrap();

        assert_eq!(result.score, 0);
        assert_eq!(result.level, TriageLevel::Mild);
        assert_eq!(result.color, TriageColor::Green);
        assert_eq!(
            result.recommendation,
            "Home care with rest, fluids, and fever medication. Monitor for worsening."
        );
    }

    #[test]
    fn test_missing_temperature() {
        let engine = engine();
        let err = engine.assess(&input(json!({"duration_days": 2}))).unwrap_err();
        assert!(matches!(err, TriageError::MissingField { field: "temperature" }));
        assert_eq!(engine.status().failures, 1);
    }

    #[test]
    fn test_unloaded_engine() {
        let engine = TriageEngine::unloaded();
        assert!(!engine.status().model_loaded);

        let err = engine
            .assess(&input(json!({"temperature": 39.0, "duration_days": 2})))
            .unwrap_err();
        assert!(matches!(err, TriageError::ModelNotReady));

        // Input is validated before the model
        let err = engine.assess(&input(json!({"duration_days": 2}))).unwrap_err();
        assert!(matches!(err, TriageError::MissingField { .. }));
    }

    #[test]
    fn test_untrained_classifier_is_not_ready() {
        let engine = TriageEngine::new(Arc::new(DiagnosisClassifier::new(ForestConfig::fast())));
        assert!(!engine.is_model_loaded());
        assert!(matches!(
            engine.assess(&input(json!({"temperature": 39.0, "duration_days": 2}))),
            Err(TriageError::ModelNotReady)
        ));
    }

    #[test]
    fn test_assessment_shape() {
        let result = engine()
            .assess(&input(json!({
                "temperature": 39.4,
                "duration_days": 4,
                "headache": true,
                "breathing_difficulty": "yes",
                "patient_name": "ignored"
            })))
            .unwrap();

        assert_eq!(result.diagnoses.len(), 3);
        assert!(result.diagnoses[0].prob >= result.diagnoses[1].prob);
        assert!(result.diagnoses[1].prob >= result.diagnoses[2].prob);

        assert_eq!(result.attributions.len(), 3);
        assert!(result.attributions[0].impact >= result.attributions[1].impact);
        assert!(result.attributions[1].impact >= result.attributions[2].impact);
        for a in &result.attributions {
            assert!((a.impact - a.contribution.abs()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_idempotent() {
        let engine = engine();
        let patient = input(json!({
            "temperature": 38.9,
            "duration_days": 6,
            "nausea_vomiting": 1,
            "travel_history": 1
        }));
        assert_eq!(engine.assess(&patient).unwrap(), engine.assess(&patient).unwrap());
    }

    #[test]
    fn test_attributions_satisfy_local_accuracy() {
        let classifier = shared_classifier();
        let vector = FeatureVector::builder(40.1, 2.0)
            .rash(true)
            .platelet_count(90.0)
            .mosquito_exposure(true)
            .build();

        let explanation = explain(classifier.as_ref(), &vector, classifier.background()).unwrap();
        assert_eq!(explanation.contributions.len(), 10);
        assert!(explanation.local_accuracy_gap() < 1e-9);

        let probs = classifier.predict_proba(&vector).unwrap();
        assert!((probs.sum() - 1.0).abs() < 1e-6);
        assert!((explanation.prediction - probs.get(explanation.class)).abs() < 1e-12);
    }

    #[test]
    fn test_explain_disabled() {
        let config = EngineConfig {
            explain_enabled: false,
            ..Default::default()
        };
        let engine = TriageEngine::with_config(shared_classifier(), config);
        let result = engine
            .assess(&input(json!({"temperature": 39.0, "duration_days": 3})))
            .unwrap();
        assert!(result.attributions.is_empty());
        assert_eq!(result.diagnoses.len(), 3);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let engine = engine();
        let patients: Vec<PatientInput> = (0..8)
            .map(|i| {
                input(json!({
                    "temperature": 37.5 + 0.4 * i as f64,
                    "duration_days": 1 + i,
                    "rash": i % 2,
                    "mosquito_exposure": i % 3 == 0
                }))
            })
            .collect();

        let sequential: Vec<_> = patients.iter().map(|p| engine.assess(p).unwrap()).collect();

        let shared = &engine;
        let parallel: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = patients
                .iter()
                .map(|p| s.spawn(move || shared.assess(p).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(sequential, parallel);
        assert_eq!(engine.status().assessments, 16);
    }

    #[test]
    fn test_assess_json_rejects_non_object() {
        let engine = engine();
        assert!(matches!(
            engine.assess_json(&json!([1, 2, 3])),
            Err(TriageError::MissingField { .. })
        ));
        assert!(engine.assess_json(&json!({"temperature": "38.6", "duration_days": "2"})).is_ok());
    }

    #[test]
    fn test_status_counters() {
        let engine = engine();
        engine.assess(&input(json!({"temperature": 38.0, "duration_days": 1}))).unwrap();
        let status = engine.status();
        assert!(status.model_loaded);
        assert_eq!(status.assessments, 1);
        assert_eq!(status.feature_count, 10);
        assert_eq!(status.layout_hash, features::layout_hash());
    }

    #[test]
    fn test_train_persist_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.json");

        let artifact = train_and_persist_to(&test_config(), &path).unwrap();
        assert!(path.exists());

        let engine = TriageEngine::from_artifact_path(&path).unwrap();
        let reference = TriageEngine::new(Arc::new(artifact.into_classifier().unwrap()));

        let patient = input(json!({
            "temperature": 39.8,
            "duration_days": 3,
            "travel_history": 1,
            "mosquito_exposure": 1
        }));
        assert_eq!(engine.assess(&patient).unwrap(), reference.assess(&patient).unwrap());
    }

    #[test]
    fn test_train_rejects_small_sample_count() {
        let config = TrainingConfig {
            sample_count: 500,
            ..test_config()
        };
        assert!(matches!(
            train_artifact(&config),
            Err(TriageError::InvalidTrainingConfig(_))
        ));
    }

    #[test]
    fn test_attribution_features_are_distinct() {
        let result = engine()
            .assess(&input(json!({"temperature": 40.5, "duration_days": 9, "rash": 1})))
            .unwrap();
        let names: Vec<Feature> = result.attributions.iter().map(|a| a.feature).collect();
        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(names, deduped);
    }
}
