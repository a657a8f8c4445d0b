//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! A persisted model records the version and layout hash it was trained
//! with; loading it against a different layout fails.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

/// Total number of features
pub const FEATURE_COUNT: usize = 10;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Named model input. Declaration order is the canonical vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Body temperature (°C)
    Temperature,
    /// Days since fever onset
    DurationDays,
    Headache,
    BodyPain,
    Rash,
    NauseaVomiting,
    BreathingDifficulty,
    /// Platelets (x10^3/uL)
    PlateletCount,
    TravelHistory,
    MosquitoExposure,
}

impl Feature {
    /// Every feature, in vector order
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Temperature,
        Feature::DurationDays,
        Feature::Headache,
        Feature::BodyPain,
        Feature::Rash,
        Feature::NauseaVomiting,
        Feature::BreathingDifficulty,
        Feature::PlateletCount,
        Feature::TravelHistory,
        Feature::MosquitoExposure,
    ];

    /// Position in the canonical vector
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Temperature => "temperature",
            Feature::DurationDays => "duration_days",
            Feature::Headache => "headache",
            Feature::BodyPain => "body_pain",
            Feature::Rash => "rash",
            Feature::NauseaVomiting => "nausea_vomiting",
            Feature::BreathingDifficulty => "breathing_difficulty",
            Feature::PlateletCount => "platelet_count",
            Feature::TravelHistory => "travel_history",
            Feature::MosquitoExposure => "mosquito_exposure",
        }
    }

    /// Binary (0/1) symptom or exposure flag
    pub fn is_flag(self) -> bool {
        !matches!(
            self,
            Feature::Temperature | Feature::DurationDays | Feature::PlateletCount
        )
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: [&str; FEATURE_COUNT] = [
    "temperature",          // 0
    "duration_days",        // 1
    "headache",             // 2
    "body_pain",            // 3
    "rash",                 // 4
    "nausea_vomiting",      // 5
    "breathing_difficulty", // 6
    "platelet_count",       // 7
    "travel_history",       // 8
    "mosquito_exposure",    // 9
];

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect layout mismatches at runtime
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    // Include version in hash
    hasher.update(&[FEATURE_VERSION]);

    for feature in Feature::ALL {
        hasher.update(feature.as_str().as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, Error)]
#[error(
    "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
     got v{actual_version} (hash: {actual_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature by name
pub fn feature_by_name(name: &str) -> Option<Feature> {
    Feature::ALL.iter().copied().find(|f| f.as_str() == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================
