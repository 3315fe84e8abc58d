use chrono::{DateTime, Utc};

use crate::classify::classify_pairing;
use crate::complexity::ComplexityAnalyzer;
use crate::config::{MatchThresholds, ValidatorConfig};
use crate::error::ValidatorError;
use crate::evidence::{collect_findings, compute_summary, decide_status};
use crate::matcher::match_tasks;
use crate::model::{
    BudgetEntry, PlannedTask, TaskMatch, ValidationInput, ValidationMeta, ValidationResult,
};
use crate::similarity::SimilarityEngine;

pub const DEFAULT_CUSTOMER_NAME: &str = "Customer";
pub const DEFAULT_PROJECT_NAME: &str = "Project";

/// Matches SOW tasks to LOE entries and judges each estimate.
///
/// Holds only immutable tables; one instance can serve any number of
/// independent `validate` calls.
#[derive(Debug, Clone)]
pub struct Validator {
    thresholds: MatchThresholds,
    similarity: SimilarityEngine,
    analyzer: ComplexityAnalyzer,
}

impl Validator {
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            thresholds: config.thresholds(),
            similarity: SimilarityEngine::new(&config.ruleset),
            analyzer: ComplexityAnalyzer::new(&config.ruleset),
        }
    }

    pub fn similarity(&self) -> &SimilarityEngine {
        &self.similarity
    }

    pub fn analyzer(&self) -> &ComplexityAnalyzer {
        &self.analyzer
    }

    pub fn thresholds(&self) -> MatchThresholds {
        self.thresholds
    }

    pub fn validate(
        &self,
        tasks: &[PlannedTask],
        entries: &[BudgetEntry],
        customer_name: Option<&str>,
        project_name: Option<&str>,
    ) -> ValidationResult {
        self.validate_at(tasks, entries, customer_name, project_name, Utc::now())
    }

    /// `validate` with a fixed timestamp; output is otherwise a pure function of the inputs.
    pub fn validate_at(
        &self,
        tasks: &[PlannedTask],
        entries: &[BudgetEntry],
        customer_name: Option<&str>,
        project_name: Option<&str>,
        validated_at: DateTime<Utc>,
    ) -> ValidationResult {
        let pair_output = match_tasks(&self.similarity, self.thresholds, tasks, entries);

        let task_matches: Vec<TaskMatch> = pair_output
            .pairs
            .into_iter()
            .map(|pairing| {
                let analysis = self.analyzer.analyze(&pairing.task, pairing.entry.as_ref());
                classify_pairing(pairing, analysis)
            })
            .collect();
        let orphaned = pair_output.orphaned;

        let summary = compute_summary(&task_matches, entries, &orphaned);
        let findings = collect_findings(&summary, &task_matches, &orphaned);
        let status = decide_status(&findings, summary.total_variance_percent);

        log::info!(
            "validated {} task(s) against {} entr(ies): {} matched, {} unmatched, {} orphaned, variance {}% -> {}",
            summary.total_sow_tasks,
            summary.total_loe_entries,
            summary.matched_tasks,
            summary.unmatched_sow_tasks,
            summary.orphaned_loe_entries,
            summary.total_variance_percent,
            status,
        );

        ValidationResult {
            status,
            meta: ValidationMeta {
                customer_name: customer_name.unwrap_or(DEFAULT_CUSTOMER_NAME).to_string(),
                project_name: project_name.unwrap_or(DEFAULT_PROJECT_NAME).to_string(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                match_threshold: self.thresholds.accept,
                validated_at: validated_at.to_rfc3339(),
            },
            summary,
            task_matches,
            orphaned_entries: orphaned,
            critical_issues: findings.critical_issues,
            warnings: findings.warnings,
            recommendations: findings.recommendations,
        }
    }
}

/// Validate config, then run one validation request.
pub fn run(config: &ValidatorConfig, input: &ValidationInput) -> Result<ValidationResult, ValidatorError> {
    config.validate()?;
    let validator = Validator::new(config);
    Ok(validator.validate(
        &input.sow_tasks,
        &input.loe_entries,
        input.customer_name.as_deref(),
        input.project_name.as_deref(),
    ))
}

/// Decode a validation request from JSON.
pub fn load_input_json(json: &str) -> Result<ValidationInput, ValidatorError> {
    serde_json::from_str(json).map_err(|e| ValidatorError::InputParse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MatchStatus, ValidationStatus};

    fn validator() -> Validator {
        Validator::new(&ValidatorConfig::default())
    }

    #[test]
    fn empty_input_passes() {
        let result = validator().validate(&[], &[], None, None);
        assert_eq!(result.status, ValidationStatus::Pass);
        assert_eq!(result.summary.total_sow_tasks, 0);
        assert!(result.task_matches.is_empty());
        assert!(result.critical_issues.is_empty());
        assert_eq!(result.meta.customer_name, "Customer");
        assert_eq!(result.meta.project_name, "Project");
        assert_eq!(result.meta.match_threshold, 40);
    }

    #[test]
    fn unmatched_task_fails() {
        let tasks = vec![PlannedTask::new("Build", "Enterprise HA Cluster Migration", "")];
        let result = validator().validate(&tasks, &[], Some("Acme"), Some("DC Refresh"));
        assert_eq!(result.status, ValidationStatus::Fail);
        assert_eq!(result.task_matches[0].match_status, MatchStatus::Unmatched);
        assert!(result.task_matches[0].issues[0].starts_with("No matching LOE entry found"));
        assert!(result.critical_issues[0].starts_with("1 SOW task(s) have no matching LOE entry"));
        assert_eq!(result.meta.customer_name, "Acme");
    }

    #[test]
    fn unusable_total_days_are_critical() {
        let tasks = vec![PlannedTask::new("Phase 3", "Data Migration", "")];
        let entries = vec![
            BudgetEntry { total_days: Some(f64::NAN), ..BudgetEntry::new("Data Migration", 5.0) },
            BudgetEntry { total_days: Some(-4.0), ..BudgetEntry::new("Travel", 2.0) },
        ];
        let result = validator().validate(&tasks, &entries, None, None);
        assert_eq!(result.status, ValidationStatus::Fail);
        assert_eq!(result.orphaned_entries.len(), 1);
        assert_eq!(
            result.critical_issues,
            vec![
                "Data Migration: Invalid LOE total_days (NaN) on entry 'Data Migration'".to_string(),
                "LOE entry 'Travel' has an invalid total_days (-4)".to_string(),
            ]
        );
        assert_eq!(result.summary.total_loe_days, 0.0);
    }

    #[test]
    fn near_zero_variance_serializes_unsigned() {
        // 6.48 against a 6.5 midpoint rounds to zero percent
        let tasks = vec![PlannedTask::new("Phase 3", "Data Migration", "")];
        let entries = vec![BudgetEntry::new("Data Migration", 6.48)];
        let result = validator().validate(&tasks, &entries, None, None);
        assert_eq!(result.status, ValidationStatus::Pass);
        assert!(result.summary.total_variance_percent.is_sign_positive());
        let json = serde_json::to_string(&result.summary).unwrap();
        assert!(json.contains("\"total_variance_percent\":0.0"), "{json}");
    }

    #[test]
    fn load_input_defaults() {
        let input = load_input_json(
            r#"{"sow_tasks":[{"task":"Install agents"}],"loe_entries":[{"task":"Agents","days":2}]}"#,
        )
        .unwrap();
        assert_eq!(input.sow_tasks[0].owner, "TBD");
        assert_eq!(input.sow_tasks[0].description, "");
        assert_eq!(input.loe_entries[0].days, 2.0);
        assert!(input.customer_name.is_none());
    }

    #[test]
    fn load_input_rejects_bad_days() {
        let err = load_input_json(r#"{"loe_entries":[{"task":"Agents","days":"two"}]}"#).unwrap_err();
        assert!(matches!(err, ValidatorError::InputParse(_)));
    }

    #[test]
    fn run_rejects_invalid_config() {
        let config = ValidatorConfig {
            match_threshold: 0,
            ..ValidatorConfig::default()
        };
        assert!(run(&config, &ValidationInput::default()).is_err());
    }
}
