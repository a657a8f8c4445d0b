//! Raw patient input → canonical FeatureVector
//!
//! Input arrives as a loosely-typed JSON object from the serving layer.
//! Required vitals must be numeric; flags are coerced by truthiness.

use serde_json::{Map, Value};

use super::layout::Feature;
use super::vector::FeatureVector;
use crate::constants::DEFAULT_PLATELET_COUNT;
use crate::error::{Result, TriageError};

/// Raw patient input as received from the caller
pub type PatientInput = Map<String, Value>;

/// Build the canonical vector from a raw input mapping
pub fn build_feature_vector(input: &PatientInput) -> Result<FeatureVector> {
    let temperature = required_number(input, Feature::Temperature)?;
    let duration_days = required_number(input, Feature::DurationDays)?;

    let mut vector = FeatureVector::new(temperature, duration_days);

    vector.platelet_count = match input.get(Feature::PlateletCount.as_str()) {
        None | Some(Value::Null) => DEFAULT_PLATELET_COUNT,
        Some(value) => as_number(value).ok_or_else(|| TriageError::InvalidField {
            field: Feature::PlateletCount.as_str(),
            reason: format!("expected a number, got {}", value),
        })?,
    };

    for feature in Feature::ALL.into_iter().filter(|f| f.is_flag()) {
        let present = input.get(feature.as_str()).map(is_truthy).unwrap_or(false);
        vector.set(feature, if present { 1.0 } else { 0.0 });
    }

    Ok(vector)
}

/// Same as [`build_feature_vector`] for an arbitrary JSON value
pub fn build_from_json(value: &Value) -> Result<FeatureVector> {
    match value {
        Value::Object(map) => build_feature_vector(map),
        _ => Err(TriageError::MissingField { field: Feature::Temperature.as_str() }),
    }
}

fn required_number(input: &PatientInput, feature: Feature) -> Result<f64> {
    input
        .get(feature.as_str())
        .and_then(as_number)
        .ok_or(TriageError::MissingField { field: feature.as_str() })
}

/// Finite number from a JSON number or numeric string
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |v| v != 0.0),
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<f64>() {
                Ok(v) => v != 0.0,
                Err(_) => matches!(s.to_ascii_lowercase().as_str(), "true" | "yes" | "on"),
            }
        }
        Value::Array(_) | Value::Object(_) => false,
    }
}
