//! Policy Types
//!
//! Core types for recommendations.
//! No decision logic here - data structures only.

use serde::Serialize;

use crate::logic::model::Diagnosis;
use crate::logic::triage::TriageLevel;

/// Care recommendation for one assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub level: TriageLevel,
    /// Diagnosis the lab panel was chosen for
    pub diagnosis: Diagnosis,
    pub base_action: &'static str,
    /// Only set for High and Critical
    pub lab_tests: Option<&'static str>,
}

impl Recommendation {
    /// Full recommendation sentence shown to the patient
    pub fn text(&self) -> String {
        match self.lab_tests {
            Some(panel) => format!("{} Recommended tests: {}", self.base_action, panel),
            None => self.base_action.to_string(),
        }
    }

    pub fn requires_lab_work(&self) -> bool {
        self.lab_tests.is_some()
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}
