//! Policy Module
//!
//! Turns a triage level and the top diagnosis into a care recommendation.
//!
//! ## Structure
//! - `types`: Recommendation
//! - `engine`: Lookup tables and decision logic
//!
//! ## Usage
//! ```ignore
//! use crate::logic::policy::recommend;
//!
//! let rec = recommend(triage.level, top_diagnosis);
//! println!("{}", rec.text());
//! ```

pub mod types;
pub mod engine;

pub use types::Recommendation;

pub use engine::{base_action, lab_tests, recommend, recommendation_text};
