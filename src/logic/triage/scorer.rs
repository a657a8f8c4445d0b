//! Triage Scorer
//!
//! Deterministic additive scoring over clinical thresholds. Stateless and
//! independent of the classifier.
//! Input: FeatureVector
//! Output: TriageScore

use super::rules::*;
use super::types::{RuleHit, TriageLevel, TriageScore};
use crate::logic::features::FeatureVector;

// ============================================================================
// MAIN SCORING FUNCTION
// ============================================================================

/// Score a patient and map the score to a level
pub fn score(vector: &FeatureVector) -> TriageScore {
    let mut hits = Vec::new();

    // Vitals
    hits.extend(band_at_least(vector.temperature, TEMPERATURE_BANDS));
    hits.extend(band_at_least(vector.duration_days, DURATION_BANDS));

    // Symptoms
    let flags = [
        (vector.rash, RASH_POINTS, "rash"),
        (vector.nausea_vomiting, NAUSEA_VOMITING_POINTS, "nausea/vomiting"),
        (vector.breathing_difficulty, BREATHING_DIFFICULTY_POINTS, "breathing difficulty"),
        (vector.headache, HEADACHE_POINTS, "headache"),
        (vector.body_pain, BODY_PAIN_POINTS, "body pain"),
    ];
    hits.extend(fired(&flags));

    // Lab values
    hits.extend(band_below(vector.platelet_count, PLATELET_BANDS));

    // Risk factors
    let risks = [
        (vector.travel_history, TRAVEL_HISTORY_POINTS, "travel history"),
        (vector.mosquito_exposure, MOSQUITO_EXPOSURE_POINTS, "mosquito exposure"),
    ];
    hits.extend(fired(&risks));

    let total = hits.iter().map(|h| h.points).sum();
    let level = level_for_score(total);

    TriageScore {
        score: total,
        level,
        color: level.color(),
        hits,
    }
}

/// Level for a score; each tier is inclusive at its lower bound
pub fn level_for_score(score: u32) -> TriageLevel {
    if score >= CRITICAL_MIN_SCORE {
        TriageLevel::Critical
    } else if score >= HIGH_MIN_SCORE {
        TriageLevel::High
    } else if score >= MODERATE_MIN_SCORE {
        TriageLevel::Moderate
    } else {
        TriageLevel::Mild
    }
}

/// First band whose lower bound `value` reaches
fn band_at_least(value: f64, bands: &[(f64, u32, &'static str)]) -> Option<RuleHit> {
    bands
        .iter()
        .find(|(min, _, _)| value >= *min)
        .map(|&(_, points, rule)| RuleHit { rule, points })
}

/// First band whose upper bound `value` stays under
fn band_below(value: f64, bands: &[(f64, u32, &'static str)]) -> Option<RuleHit> {
    bands
        .iter()
        .find(|(max, _, _)| value < *max)
        .map(|&(_, points, rule)| RuleHit { rule, points })
}

fn fired(flags: &[(bool, u32, &'static str)]) -> Vec<RuleHit> {
    flags
        .iter()
        .filter(|(present, _, _)| *present)
        .map(|&(_, points, rule)| RuleHit { rule, points })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::triage::TriageColor;

    fn base(temperature: f64, duration: f64) -> FeatureVector {
        FeatureVector::new(temperature, duration)
    }

    #[test]
    fn test_afebrile_patient_is_mild() {
        let result = score(&base(37.8, 1.0));
        assert_eq!(result.score, 0);
        assert_eq!(result.level, TriageLevel::Mild);
        assert_eq!(result.color, TriageColor::Green);
        assert!(result.hits.is_empty());
    }

    #[test]
    fn test_dengue_like_patient_is_critical() {
        let v = FeatureVector::builder(40.2, 8.0)
            .rash(true)
            .platelet_count(40.0)
            .mosquito_exposure(true)
            .build();
        let result = score(&v);

        assert_eq!(result.score, 16);
        assert_eq!(result.level, TriageLevel::Critical);
        assert_eq!(result.color, TriageColor::Red);
        assert_eq!(result.hits.len(), 5);
    }

    #[test]
    fn test_temperature_boundaries() {
        assert_eq!(score(&base(38.4, 1.0)).score, 0);
        assert_eq!(score(&base(38.5, 1.0)).score, 2);
        assert_eq!(score(&base(39.0, 1.0)).score, 3);
        assert_eq!(score(&base(39.9, 1.0)).score, 3);
        assert_eq!(score(&base(40.0, 1.0)).score, 4);
    }

    #[test]
    fn test_duration_boundaries() {
        assert_eq!(score(&base(37.0, 2.9)).score, 0);
        assert_eq!(score(&base(37.0, 3.0)).score, 2);
        assert_eq!(score(&base(37.0, 5.0)).score, 3);
        assert_eq!(score(&base(37.0, 7.0)).score, 4);
        assert_eq!(score(&base(37.0, 14.0)).score, 4);
    }

    #[test]
    fn test_platelet_boundaries() {
        let with = |p: f64| score(&FeatureVector::builder(37.0, 1.0).platelet_count(p).build()).score;
        assert_eq!(with(150.0), 0);
        assert_eq!(with(149.9), 3);
        assert_eq!(with(100.0), 3);
        assert_eq!(with(99.0), 4);
        assert_eq!(with(50.0), 4);
        assert_eq!(with(49.0), 5);
    }

    #[test]
    fn test_flags_add_up() {
        let v = FeatureVector::builder(37.0, 1.0)
            .headache(true)
            .body_pain(true)
            .nausea_vomiting(true)
            .breathing_difficulty(true)
            .travel_history(true)
            .build();
        // 1 + 1 + 2 + 4 + 2
        assert_eq!(score(&v).score, 10);
        assert_eq!(score(&v).level, TriageLevel::High);
    }

    #[test]
    fn test_max_score() {
        let v = FeatureVector::builder(41.0, 10.0)
            .headache(true)
            .body_pain(true)
            .rash(true)
            .nausea_vomiting(true)
            .breathing_difficulty(true)
            .platelet_count(20.0)
            .travel_history(true)
            .mosquito_exposure(true)
            .build();
        assert_eq!(score(&v).score, MAX_SCORE);
        assert_eq!(MAX_SCORE, 26);
        assert!(MAX_SCORE <= 31);
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for_score(0), TriageLevel::Mild);
        assert_eq!(level_for_score(4), TriageLevel::Mild);
        assert_eq!(level_for_score(5), TriageLevel::Moderate);
        assert_eq!(level_for_score(8), TriageLevel::Moderate);
        assert_eq!(level_for_score(9), TriageLevel::High);
        assert_eq!(level_for_score(12), TriageLevel::High);
        assert_eq!(level_for_score(13), TriageLevel::Critical);
        assert_eq!(level_for_score(MAX_SCORE), TriageLevel::Critical);
    }

    #[test]
    fn test_level_is_function_of_score() {
        // Same score from different rules → same level
        let a = FeatureVector::builder(37.0, 1.0).breathing_difficulty(true).headache(true).build();
        let b = FeatureVector::builder(40.0, 1.0).mosquito_exposure(true).build();
        assert_eq!(score(&a).score, score(&b).score);
        assert_eq!(score(&a).level, score(&b).level);
    }

    #[test]
    fn test_reasons() {
        let v = FeatureVector::builder(39.2, 1.0).rash(true).build();
        assert_eq!(score(&v).reasons(), vec!["temperature >= 39 (+3)", "rash (+2)"]);
    }
}
