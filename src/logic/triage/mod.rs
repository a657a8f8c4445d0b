//! Triage Module
//!
//! Rule-based severity scoring. Runs independently of the classifier.
//!
//! ## Structure
//! - `types`: Core types (TriageLevel, TriageColor, TriageScore)
//! - `rules`: Point tables and level thresholds
//! - `scorer`: Scoring logic
//!
//! ## Usage
//! ```ignore
//! use crate::logic::triage::{score, TriageLevel};
//!
//! let result = score(&vector);
//! match result.level {
//!     TriageLevel::Critical => escalate(),
//!     TriageLevel::High => urgent_visit(),
//!     _ => routine(),
//! }
//! ```

pub mod types;
pub mod rules;
pub mod scorer;

pub use types::{RuleHit, TriageColor, TriageLevel, TriageScore};

pub use rules::{CRITICAL_MIN_SCORE, HIGH_MIN_SCORE, MAX_SCORE, MODERATE_MIN_SCORE};

pub use scorer::{level_for_score, score};
