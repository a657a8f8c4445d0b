//! Policy Engine
//!
//! Decision logic only - no type definitions.
//! Input: TriageLevel + top Diagnosis
//! Output: Recommendation

use super::types::Recommendation;
use crate::logic::model::Diagnosis;
use crate::logic::triage::TriageLevel;

// ============================================================================
// MAIN DECISION FUNCTION
// ============================================================================

/// Recommendation for a triage level and the most probable diagnosis
pub fn recommend(level: TriageLevel, top: Diagnosis) -> Recommendation {
    Recommendation {
        level,
        diagnosis: top,
        base_action: base_action(level),
        lab_tests: level.is_urgent().then(|| lab_tests(top)),
    }
}

/// Recommendation text directly
pub fn recommendation_text(level: TriageLevel, top: Diagnosis) -> String {
    recommend(level, top).text()
}

// ============================================================================
// LOOKUP TABLES
// ============================================================================

/// What the patient should do at each level
pub fn base_action(level: TriageLevel) -> &'static str {
    match level {
        TriageLevel::Critical => "Seek emergency care immediately. Go to hospital ER now.",
        TriageLevel::High => {
            "Urgent doctor visit required within 12 hours. Consider CBC + specific tests."
        }
        TriageLevel::Moderate => {
            "Schedule clinic appointment within 24-48 hours. Monitor symptoms closely."
        }
        TriageLevel::Mild => {
            "Home care with rest, fluids, and fever medication. Monitor for worsening."
        }
    }
}

/// Confirmatory lab panel per suspected diagnosis
pub fn lab_tests(diagnosis: Diagnosis) -> &'static str {
    match diagnosis {
        Diagnosis::Dengue => "NS1 antigen test, CBC with platelet count",
        Diagnosis::Malaria => "Malaria parasite test, CBC",
        Diagnosis::Typhoid => "Widal test, Blood culture",
        Diagnosis::Covid => "RT-PCR test, Chest X-ray if breathing difficulty",
        Diagnosis::ViralFever => "CBC, CRP if prolonged fever",
    }
}

// ============================================================================
// TESTS
// ============================================================================
