//! Diagnosis Labels
//!
//! The fixed label set. Declaration order doubles as the argmax
//! tie-break priority used during label synthesis.

use serde::{Deserialize, Serialize};

use crate::error::TriageError;

/// Number of diagnosis classes
pub const CLASS_COUNT: usize = 5;

/// Probable febrile illness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Diagnosis {
    Dengue,
    Malaria,
    Typhoid,
    #[serde(rename = "Viral_Fever")]
    ViralFever,
    #[serde(rename = "COVID")]
    Covid,
}

impl Diagnosis {
    /// Every label, in priority order
    pub const ALL: [Diagnosis; CLASS_COUNT] = [
        Diagnosis::Dengue,
        Diagnosis::Malaria,
        Diagnosis::Typhoid,
        Diagnosis::ViralFever,
        Diagnosis::Covid,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self, TriageError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| TriageError::InvalidLabel(format!("class index {}", index)))
    }

    /// Canonical label, as used in training data
    pub fn as_str(self) -> &'static str {
        match self {
            Diagnosis::Dengue => "Dengue",
            Diagnosis::Malaria => "Malaria",
            Diagnosis::Typhoid => "Typhoid",
            Diagnosis::ViralFever => "Viral_Fever",
            Diagnosis::Covid => "COVID",
        }
    }

    /// Human-readable label
    pub fn display_name(self) -> &'static str {
        match self {
            Diagnosis::ViralFever => "Viral Fever",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Diagnosis {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(' ', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| TriageError::InvalidLabel(s.to_string()))
    }
}
