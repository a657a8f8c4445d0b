//! Shapley attribution for the top predicted class.
//!
//! With only ten features every coalition can be enumerated, so the values
//! are exact rather than sampled. A coalition S is valued as the mean model
//! output when features in S come from the instance and the rest from each
//! background vector. Baseline is the empty coalition, so
//! `baseline + Σφ == prediction` holds by construction.

use super::types::{ExplainResult, FeatureAttribution};
use crate::error::{Result, TriageError};
use crate::logic::features::{Feature, FeatureVector, FEATURE_COUNT};
use crate::logic::model::{Diagnosis, DiagnosisModel};

const COALITIONS: usize = 1 << FEATURE_COUNT;
const FULL: usize = COALITIONS - 1;

/// Explain the model's top prediction for `vector`
pub fn explain<M: DiagnosisModel + ?Sized>(
    model: &M,
    vector: &FeatureVector,
    background: &[FeatureVector],
) -> Result<ExplainResult> {
    let class = model.predict_proba(vector)?.top();
    explain_class(model, vector, background, class)
}

/// Attribution of the probability of `class`
pub fn explain_class<M: DiagnosisModel + ?Sized>(
    model: &M,
    vector: &FeatureVector,
    background: &[FeatureVector],
    class: Diagnosis,
) -> Result<ExplainResult> {
    if background.is_empty() {
        return Err(TriageError::ModelNotReady);
    }

    let x = vector.to_array();
    let refs: Vec<[f64; FEATURE_COUNT]> = background.iter().map(|b| b.to_array()).collect();
    let values = coalition_values(model, &x, &refs, class)?;
    let weights = shapley_weights();

    let mut contributions: Vec<FeatureAttribution> = Feature::ALL
        .iter()
        .map(|&feature| {
            let bit = 1usize << feature.index();
            let phi: f64 = (0..COALITIONS)
                .filter(|mask| mask & bit == 0)
                .map(|mask| weights[mask.count_ones() as usize] * (values[mask | bit] - values[mask]))
                .sum();
            FeatureAttribution { feature, contribution: phi, impact: phi.abs() }
        })
        .collect();

    // Stable: equal impacts keep canonical feature order
    contributions.sort_by(|a, b| b.impact.total_cmp(&a.impact));

    Ok(ExplainResult {
        class,
        baseline: values[0],
        prediction: values[FULL],
        contributions,
    })
}

/// v(S) for every coalition mask
fn coalition_values<M: DiagnosisModel + ?Sized>(
    model: &M,
    x: &[f64; FEATURE_COUNT],
    background: &[[f64; FEATURE_COUNT]],
    class: Diagnosis,
) -> Result<Vec<f64>> {
    let mut values = vec![0.0; COALITIONS];
    let mut hybrid = [0.0; FEATURE_COUNT];

    for (mask, value) in values.iter_mut().enumerate().take(FULL) {
        let mut total = 0.0;
        for b in background {
            for j in 0..FEATURE_COUNT {
                hybrid[j] = if mask & (1 << j) != 0 { x[j] } else { b[j] };
            }
            total += model.predict_values(&hybrid)?[class.index()];
        }
        *value = total / background.len() as f64;
    }
    values[FULL] = model.predict_values(x)?[class.index()];

    Ok(values)
}

/// w(s) = s! (n-s-1)! / n!
fn shapley_weights() -> [f64; FEATURE_COUNT] {
    let factorial = |k: usize| (1..=k).map(|i| i as f64).product::<f64>();
    let n_fact = factorial(FEATURE_COUNT);

    let mut weights = [0.0; FEATURE_COUNT];
    for (s, w) in weights.iter_mut().enumerate() {
        *w = factorial(s) * factorial(FEATURE_COUNT - s - 1) / n_fact;
    }
    weights
}
