//! `scopecheck-recon`: SOW vs LOE validation engine.
//!
//! Pure engine crate: receives planned tasks and budget entries, returns a
//! validation report. No CLI or IO dependencies.

pub mod classify;
pub mod complexity;
pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod matcher;
pub mod model;
pub mod ruleset;
pub mod similarity;

pub use complexity::ComplexityAnalyzer;
pub use config::{MatchThresholds, ValidatorConfig};
pub use engine::{load_input_json, run, Validator};
pub use error::ValidatorError;
pub use model::{
    BudgetEntry, MatchStatus, PlannedTask, TaskMatch, ValidationInput, ValidationResult,
    ValidationStatus,
};
pub use ruleset::Ruleset;
pub use similarity::{SimilarityBreakdown, SimilarityEngine};
