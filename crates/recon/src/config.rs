use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::complexity::round_to;
use crate::error::ValidatorError;
use crate::ruleset::Ruleset;

/// Minimum similarity (0-100) for a budget entry to be paired with a planned task.
pub const DEFAULT_MATCH_THRESHOLD: u8 = 40;

/// Pairings scoring at or above this are classified `exact`.
pub const DEFAULT_EXACT_THRESHOLD: u8 = 90;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub match_threshold: u8,
    pub exact_threshold: u8,
    pub ruleset: Ruleset,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            exact_threshold: DEFAULT_EXACT_THRESHOLD,
            ruleset: Ruleset::default(),
        }
    }
}

/// The two cutoffs the matcher needs, split out so callers can tune them
/// without rebuilding the engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchThresholds {
    pub accept: u8,
    pub exact: u8,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            accept: DEFAULT_MATCH_THRESHOLD,
            exact: DEFAULT_EXACT_THRESHOLD,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ValidatorConfig {
    pub fn from_toml(input: &str) -> Result<Self, ValidatorError> {
        let config: ValidatorConfig =
            toml::from_str(input).map_err(|e| ValidatorError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ValidatorError> {
        toml::to_string_pretty(self).map_err(|e| ValidatorError::Serialize(e.to_string()))
    }

    pub fn thresholds(&self) -> MatchThresholds {
        MatchThresholds {
            accept: self.match_threshold,
            exact: self.exact_threshold,
        }
    }

    pub fn validate(&self) -> Result<(), ValidatorError> {
        if self.match_threshold == 0 || self.match_threshold > 100 {
            return Err(ValidatorError::ConfigValidation(format!(
                "match_threshold must be between 1 and 100, got {}",
                self.match_threshold
            )));
        }
        if self.exact_threshold < self.match_threshold || self.exact_threshold > 100 {
            return Err(ValidatorError::ConfigValidation(format!(
                "exact_threshold must be between match_threshold ({}) and 100, got {}",
                self.match_threshold, self.exact_threshold
            )));
        }

        let rules = &self.ruleset;

        // Task types
        if rules.task_types.is_empty() {
            return Err(ValidatorError::ConfigValidation(
                "at least one task type is required".into(),
            ));
        }
        let mut seen = HashSet::new();
        for t in &rules.task_types {
            if t.name.trim().is_empty() {
                return Err(ValidatorError::ConfigValidation(
                    "task type with empty name".into(),
                ));
            }
            if !seen.insert(t.name.as_str()) {
                return Err(ValidatorError::ConfigValidation(format!(
                    "duplicate task type '{}'",
                    t.name
                )));
            }
            if !t.min_days.is_finite() || t.min_days <= 0.0 {
                return Err(ValidatorError::ConfigValidation(format!(
                    "task type '{}': min_days must be positive, got {}",
                    t.name, t.min_days
                )));
            }
            if !t.max_days.is_finite() || t.max_days < t.min_days {
                return Err(ValidatorError::ConfigValidation(format!(
                    "task type '{}': max_days ({}) must be >= min_days ({})",
                    t.name, t.max_days, t.min_days
                )));
            }
            // Expected ranges are reported at one decimal.
            for (field, value) in [("min_days", t.min_days), ("max_days", t.max_days)] {
                if round_to(value, 1) != value {
                    return Err(ValidatorError::ConfigValidation(format!(
                        "task type '{}': {field} must have at most one decimal place, got {value}",
                        t.name
                    )));
                }
            }
            check_terms(&format!("task type '{}'", t.name), &t.keywords)?;
        }

        // Complexity keywords
        for k in &rules.complexity_keywords {
            if k.keyword.trim().is_empty() {
                return Err(ValidatorError::ConfigValidation(
                    "complexity keyword with empty text".into(),
                ));
            }
            if !k.multiplier.is_finite() || k.multiplier <= 1.0 {
                return Err(ValidatorError::ConfigValidation(format!(
                    "complexity keyword '{}': multiplier must be > 1.0, got {}",
                    k.keyword, k.multiplier
                )));
            }
        }

        // Similarity tables
        for g in &rules.synonym_groups {
            if g.terms.is_empty() {
                return Err(ValidatorError::ConfigValidation(format!(
                    "synonym group '{}' has no terms",
                    g.name
                )));
            }
            check_terms(&format!("synonym group '{}'", g.name), &g.terms)?;
        }
        check_terms("action_verbs", &rules.action_verbs)?;
        check_terms("subject_nouns", &rules.subject_nouns)?;
        check_terms("stop_words", &rules.stop_words)?;

        Ok(())
    }
}

fn check_terms(owner: &str, terms: &[String]) -> Result<(), ValidatorError> {
    if terms.iter().any(|t| t.trim().is_empty()) {
        return Err(ValidatorError::ConfigValidation(format!(
            "{owner}: empty term"
        )));
    }
    Ok(())
}
