//! Triage Rules & Thresholds
//!
//! Point tables for the additive triage score.
//! No scoring logic here - constants only.

// ============================================================================
// BANDED GROUPS (highest matching band wins)
// ============================================================================

/// Temperature bands (°C, inclusive lower bound)
pub const TEMPERATURE_BANDS: &[(f64, u32, &str)] = &[
    (40.0, 4, "temperature >= 40"),
    (39.0, 3, "temperature >= 39"),
    (38.5, 2, "temperature >= 38.5"),
];

/// Fever duration bands (days, inclusive lower bound)
pub const DURATION_BANDS: &[(f64, u32, &str)] = &[
    (7.0, 4, "duration >= 7 days"),
    (5.0, 3, "duration >= 5 days"),
    (3.0, 2, "duration >= 3 days"),
];

/// Platelet bands (x10^3/uL, exclusive upper bound)
pub const PLATELET_BANDS: &[(f64, u32, &str)] = &[
    (50.0, 5, "platelets < 50"),
    (100.0, 4, "platelets < 100"),
    (150.0, 3, "platelets < 150"),
];

// ============================================================================
// FLAG POINTS
// ============================================================================

pub const RASH_POINTS: u32 = 2;
pub const NAUSEA_VOMITING_POINTS: u32 = 2;
pub const BREATHING_DIFFICULTY_POINTS: u32 = 4;
pub const HEADACHE_POINTS: u32 = 1;
pub const BODY_PAIN_POINTS: u32 = 1;
pub const TRAVEL_HISTORY_POINTS: u32 = 2;
pub const MOSQUITO_EXPOSURE_POINTS: u32 = 1;

// ============================================================================
// LEVEL THRESHOLDS (inclusive lower bound)
// ============================================================================

pub const CRITICAL_MIN_SCORE: u32 = 13;
pub const HIGH_MIN_SCORE: u32 = 9;
pub const MODERATE_MIN_SCORE: u32 = 5;

/// Highest attainable score (every group at its top band)
pub const MAX_SCORE: u32 = TEMPERATURE_BANDS[0].1
    + DURATION_BANDS[0].1
    + PLATELET_BANDS[0].1
    + RASH_POINTS
    + NAUSEA_VOMITING_POINTS
    + BREATHING_DIFFICULTY_POINTS
    + HEADACHE_POINTS
    + BODY_PAIN_POINTS
    + TRAVEL_HISTORY_POINTS
    + MOSQUITO_EXPOSURE_POINTS;
