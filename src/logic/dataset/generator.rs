//! Synthetic Label Generator
//!
//! Draws synthetic fever patients and labels each one by scoring it
//! against the four disease archetypes (plus the COVID branch) with
//! Gaussian noise, then taking the argmax.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Exp, Normal};

use super::record::TrainingSample;
use crate::error::{Result, TriageError};
use crate::logic::features::FeatureVector;
use crate::logic::model::{Diagnosis, CLASS_COUNT};

// ============================================================================
// RAW DISTRIBUTIONS
// ============================================================================

const TEMPERATURE_MEAN: f64 = 38.5;
const TEMPERATURE_SD: f64 = 1.2;
const DURATION_MEAN: f64 = 3.0;
const PLATELET_MEAN: f64 = 200.0;
const PLATELET_SD: f64 = 80.0;

const TEMPERATURE_RANGE: (f64, f64) = (36.0, 42.0);
const DURATION_RANGE: (f64, f64) = (1.0, 14.0);
const PLATELET_RANGE: (f64, f64) = (20.0, 400.0);

const P_HEADACHE: f64 = 0.7;
const P_BODY_PAIN: f64 = 0.8;
const P_RASH: f64 = 0.3;
const P_NAUSEA: f64 = 0.4;
const P_BREATHING: f64 = 0.15;
const P_TRAVEL: f64 = 0.3;
const P_MOSQUITO: f64 = 0.4;

// ============================================================================
// ARCHETYPE NOISE
// ============================================================================

/// Noise added to every archetype score
const ARCHETYPE_NOISE_SD: f64 = 0.5;

/// Noise of the COVID score when its signal branch does not apply
const COVID_FALLBACK_NOISE_SD: f64 = 1.0;

/// COVID score when breathing difficulty + fever are present
const COVID_SIGNAL: f64 = 5.0;

/// Samplers for the raw features and archetype noise
pub struct PatientSampler {
    temperature: Normal<f64>,
    duration: Exp<f64>,
    platelets: Normal<f64>,
    noise: Normal<f64>,
    covid_fallback: Normal<f64>,
}

impl PatientSampler {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temperature: Normal::new(TEMPERATURE_MEAN, TEMPERATURE_SD).map_err(invalid)?,
            duration: Exp::new(1.0 / DURATION_MEAN).map_err(invalid)?,
            platelets: Normal::new(PLATELET_MEAN, PLATELET_SD).map_err(invalid)?,
            noise: Normal::new(0.0, ARCHETYPE_NOISE_SD).map_err(invalid)?,
            covid_fallback: Normal::new(0.0, COVID_FALLBACK_NOISE_SD).map_err(invalid)?,
        })
    }

    /// Draw one unlabeled patient; continuous features are clipped
    pub fn sample_features(&self, rng: &mut StdRng) -> FeatureVector {
        let temperature = clip(self.temperature.sample(rng), TEMPERATURE_RANGE);
        let duration_days = clip(self.duration.sample(rng), DURATION_RANGE);

        FeatureVector::builder(temperature, duration_days)
            .headache(rng.gen_bool(P_HEADACHE))
            .body_pain(rng.gen_bool(P_BODY_PAIN))
            .rash(rng.gen_bool(P_RASH))
            .nausea_vomiting(rng.gen_bool(P_NAUSEA))
            .breathing_difficulty(rng.gen_bool(P_BREATHING))
            .platelet_count(clip(self.platelets.sample(rng), PLATELET_RANGE))
            .travel_history(rng.gen_bool(P_TRAVEL))
            .mosquito_exposure(rng.gen_bool(P_MOSQUITO))
            .build()
    }

    /// Noisy archetype scores, indexed by `Diagnosis::index`
    pub fn archetype_scores(&self, v: &FeatureVector, rng: &mut StdRng) -> [f64; CLASS_COUNT] {
        let mut scores = archetype_signals(v);
        for (diagnosis, score) in Diagnosis::ALL.iter().zip(scores.iter_mut()) {
            *score += match diagnosis {
                Diagnosis::Covid if covid_branch(v) => self.noise.sample(rng),
                Diagnosis::Covid => self.covid_fallback.sample(rng),
                _ => self.noise.sample(rng),
            };
        }
        scores
    }

    /// Label a patient by noisy archetype argmax
    pub fn label(&self, v: &FeatureVector, rng: &mut StdRng) -> Result<Diagnosis> {
        let scores = self.archetype_scores(v, rng);
        Diagnosis::from_index(argmax(&scores))
    }
}

/// Noise-free archetype indicator sums
pub fn archetype_signals(v: &FeatureVector) -> [f64; CLASS_COUNT] {
    let ind = |b: bool| if b { 1.0 } else { 0.0 };

    let dengue = ind(v.temperature > 39.0)
        + ind(v.rash)
        + ind(v.platelet_count < 150.0)
        + ind(v.mosquito_exposure);
    let malaria = ind(v.temperature > 39.5) + ind(v.travel_history) + ind(v.mosquito_exposure);
    let typhoid = ind(v.duration_days > 5.0) + ind(v.headache) + ind(v.nausea_vomiting);
    let viral = ind(v.temperature <= 39.0) + ind(v.body_pain) + ind(!v.rash);
    let covid = if covid_branch(v) { COVID_SIGNAL } else { 0.0 };

    let mut scores = [0.0; CLASS_COUNT];
    scores[Diagnosis::Dengue.index()] = dengue;
    scores[Diagnosis::Malaria.index()] = malaria;
    scores[Diagnosis::Typhoid.index()] = typhoid;
    scores[Diagnosis::ViralFever.index()] = viral;
    scores[Diagnosis::Covid.index()] = covid;
    scores
}

fn covid_branch(v: &FeatureVector) -> bool {
    v.breathing_difficulty && v.temperature > 38.0
}

/// Index of the maximum; the first index wins ties
pub fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }
    best
}

fn invalid(e: impl std::fmt::Display) -> TriageError {
    TriageError::InvalidTrainingConfig(e.to_string())
}

fn clip(value: f64, (lo, hi): (f64, f64)) -> f64 {
    value.clamp(lo, hi)
}

/// Generate `n` labeled synthetic samples
pub fn generate_samples(n: usize, rng: &mut StdRng) -> Result<Vec<TrainingSample>> {
    let sampler = PatientSampler::new()?;
    let mut samples = Vec::with_capacity(n);

    for _ in 0..n {
        let features = sampler.sample_features(rng);
        let label = sampler.label(&features, rng)?;
        samples.push(TrainingSample::new(features, label));
    }

    log::debug!("Generated {} synthetic samples", samples.len());
    Ok(samples)
}

/// Count samples per label, in label order
pub fn class_distribution(samples: &[TrainingSample]) -> [usize; CLASS_COUNT] {
    let mut counts = [0usize; CLASS_COUNT];
    for sample in samples {
        counts[sample.label.index()] += 1;
    }
    counts
}
