//! Triage Types
//!
//! Core types for rule-based triage.
//! No scoring logic here - data structures only.

use serde::{Deserialize, Serialize};

// ============================================================================
// TRIAGE LEVEL
// ============================================================================

/// Categorical severity derived from the rule score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TriageLevel {
    Mild,
    Moderate,
    High,
    Critical,
}

impl TriageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriageLevel::Mild => "Mild",
            TriageLevel::Moderate => "Moderate",
            TriageLevel::High => "High",
            TriageLevel::Critical => "Critical",
        }
    }

    pub fn color(&self) -> TriageColor {
        match self {
            TriageLevel::Mild => TriageColor::Green,
            TriageLevel::Moderate => TriageColor::Yellow,
            TriageLevel::High => TriageColor::Orange,
            TriageLevel::Critical => TriageColor::Red,
        }
    }

    /// Levels that warrant lab work
    pub fn is_urgent(&self) -> bool {
        matches!(self, TriageLevel::High | TriageLevel::Critical)
    }
}

impl std::fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display color of a triage level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageColor {
    Green,
    Yellow,
    Orange,
    Red,
}

// ============================================================================
// SCORE BREAKDOWN
// ============================================================================

/// One rule that contributed points
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub rule: &'static str,
    pub points: u32,
}

/// Result of rule scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageScore {
    pub score: u32,
    pub level: TriageLevel,
    pub color: TriageColor,
    /// Rules that fired, in evaluation order
    pub hits: Vec<RuleHit>,
}

impl TriageScore {
    pub fn reasons(&self) -> Vec<String> {
        self.hits
            .iter()
            .map(|h| format!("{} (+{})", h.rule, h.points))
            .collect()
    }
}
