use std::path::PathBuf;

use chrono::{TimeZone, Utc};

use scopecheck_recon::config::ValidatorConfig;
use scopecheck_recon::engine::{load_input_json, run, Validator};
use scopecheck_recon::model::{MatchStatus, ValidationInput, ValidationResult, ValidationStatus};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_request(name: &str) -> ValidationInput {
    let path = fixtures_dir().join(name);
    let json = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    load_input_json(&json).unwrap()
}

fn load_and_run(request: &str) -> ValidationResult {
    run(&ValidatorConfig::default(), &load_request(request)).unwrap()
}

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// -------------------------------------------------------------------------
// Scenarios
// -------------------------------------------------------------------------

#[test]
fn sso_match_with_orphaned_entry_warns() {
    let result = load_and_run("sso-orphan.request.json");

    assert_eq!(result.status, ValidationStatus::Warning);
    assert_eq!(result.meta.customer_name, "Northwind");
    assert_eq!(result.meta.project_name, "Identity Rollout");

    let m = &result.task_matches[0];
    assert_eq!(m.match_status, MatchStatus::Fuzzy);
    assert_eq!(m.match_score, 67);
    assert_eq!(m.loe_entry.as_ref().unwrap().task, "SSO Config");
    assert_eq!(m.complexity_analysis.detected_task_type, "configuration");
    approx(m.complexity_analysis.expected_days_min, 1.3);
    approx(m.complexity_analysis.expected_days_max, 3.9);
    assert_eq!(m.duration_valid, Some(true));
    assert!(m.issues.is_empty());
    assert!(m.warnings.is_empty());

    assert_eq!(result.orphaned_entries.len(), 1);
    assert_eq!(result.orphaned_entries[0].task, "Database Backup");

    assert!(result.critical_issues.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].starts_with("1 LOE entry has no matching SOW task"));

    // 8 LOE days against a 2.6-day midpoint
    assert_eq!(result.summary.total_loe_days, 8.0);
    assert_eq!(result.summary.total_sow_expected_days, 2.6);
    assert_eq!(result.summary.total_variance_percent, 208.0);
    assert_eq!(result.recommendations.len(), 2);
    assert!(result.recommendations[0].starts_with("Clarify orphaned"));
    assert!(result.recommendations[1].contains("208% above"));
}

#[test]
fn unmatched_task_forces_fail() {
    let result = load_and_run("unmatched-ha.request.json");

    assert_eq!(result.status, ValidationStatus::Fail);
    assert_eq!(result.meta.customer_name, "Customer");
    assert_eq!(result.summary.unmatched_sow_tasks, 1);
    assert_eq!(result.summary.matched_tasks, 0);

    let m = &result.task_matches[0];
    assert_eq!(m.match_status, MatchStatus::Unmatched);
    assert_eq!(m.match_score, 0);
    assert!(m.loe_entry.is_none());
    assert!(m.issues[0].starts_with("No matching LOE entry found"));
    assert_eq!(m.complexity_analysis.total_multiplier, 2.925);

    assert_eq!(result.critical_issues.len(), 2);
    assert!(result.critical_issues[0].starts_with("1 SOW task(s) have no matching LOE entry"));
    assert_eq!(
        result.critical_issues[1],
        "Enterprise HA Cluster Migration: No matching LOE entry found for this SOW task"
    );
    // Unmatched tasks still contribute their expected midpoint
    approx(result.summary.total_sow_expected_days, 19.1);
    assert_eq!(result.summary.total_variance_percent, -100.0);
}

#[test]
fn under_estimated_migration_fails() {
    let result = load_and_run("migration-under.request.json");

    assert_eq!(result.status, ValidationStatus::Fail);
    let m = &result.task_matches[0];
    assert_eq!(m.match_status, MatchStatus::Exact);
    assert_eq!(m.complexity_analysis.detected_task_type, "migration");
    assert_eq!(m.duration_valid, Some(false));
    assert_eq!(m.duration_variance, Some(-83.0));

    assert_eq!(
        result.critical_issues,
        vec!["Data Migration: LOE below expected minimum: 0.5 days vs expected 3.0-10.0 days".to_string()]
    );
    assert_eq!(result.summary.total_variance_percent, -92.0);
    assert!(result.recommendations.iter().any(|r| r.contains("92% below")));
}

#[test]
fn balanced_project_passes() {
    let result = load_and_run("vcenter-project.request.json");

    assert_eq!(result.status, ValidationStatus::Pass);
    assert_eq!(result.summary.total_sow_tasks, 5);
    assert_eq!(result.summary.matched_tasks, 5);
    assert_eq!(result.summary.orphaned_loe_entries, 0);
    assert!(result.critical_issues.is_empty());
    assert!(result.warnings.is_empty());
    assert!(result.recommendations.is_empty());

    let types: Vec<&str> = result
        .task_matches
        .iter()
        .map(|m| m.complexity_analysis.detected_task_type.as_str())
        .collect();
    assert_eq!(
        types,
        vec!["installation", "configuration", "integration", "training", "documentation"]
    );

    // Greedy pairing keeps input order; every entry claimed by its own task
    let paired: Vec<&str> = result
        .task_matches
        .iter()
        .map(|m| m.loe_entry.as_ref().unwrap().task.as_str())
        .collect();
    assert_eq!(
        paired,
        vec![
            "vCenter Server Installation",
            "Storage Policy Configuration",
            "NSX Network Integration",
            "Knowledge Transfer",
            "Documentation",
        ]
    );
    assert_eq!(result.task_matches[3].match_status, MatchStatus::Fuzzy);

    assert_eq!(result.summary.total_loe_days, 11.5);
    assert_eq!(result.summary.total_variance_percent, 4.0);
}

#[test]
fn empty_request_passes() {
    let input = load_input_json("{}").unwrap();
    let result = run(&ValidatorConfig::default(), &input).unwrap();
    assert_eq!(result.status, ValidationStatus::Pass);
    assert_eq!(result.summary.total_sow_tasks, 0);
    assert_eq!(result.summary.total_variance_percent, 0.0);
}

// -------------------------------------------------------------------------
// Custom ruleset
// -------------------------------------------------------------------------

fn spike_config() -> ValidatorConfig {
    let toml = std::fs::read_to_string(fixtures_dir().join("spike.config.toml")).unwrap();
    ValidatorConfig::from_toml(&toml).unwrap()
}

#[test]
fn custom_ruleset_drives_analysis() {
    let result = run(&spike_config(), &load_request("spike.request.json")).unwrap();

    assert_eq!(result.meta.match_threshold, 50);
    assert_eq!(result.meta.project_name, "Project");

    let m = &result.task_matches[0];
    assert_eq!(m.match_status, MatchStatus::Fuzzy);
    assert_eq!(m.complexity_analysis.detected_task_type, "spike");
    assert_eq!(m.complexity_analysis.complexity_factors.len(), 1);
    assert_eq!(m.complexity_analysis.complexity_factors[0].category, "risk");
    approx(m.complexity_analysis.expected_days_min, 3.0);
    approx(m.complexity_analysis.expected_days_max, 6.0);
    assert_eq!(m.duration_valid, Some(true));

    // Orphan counts its total_days (2.0) rather than days (1.5)
    assert_eq!(result.summary.total_loe_days, 5.0);
    assert_eq!(result.summary.total_variance_percent, 11.0);
    assert_eq!(result.status, ValidationStatus::Warning);
}

#[test]
fn raised_threshold_leaves_task_unmatched() {
    let mut config = spike_config();
    config.match_threshold = 70;
    let result = run(&config, &load_request("spike.request.json")).unwrap();

    assert_eq!(result.task_matches[0].match_status, MatchStatus::Unmatched);
    assert_eq!(result.orphaned_entries.len(), 2);
    assert_eq!(result.status, ValidationStatus::Fail);
}

// -------------------------------------------------------------------------
// Determinism
// -------------------------------------------------------------------------

#[test]
fn same_input_same_output() {
    let input = load_request("vcenter-project.request.json");
    let validator = Validator::new(&ValidatorConfig::default());
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

    let first = validator.validate_at(&input.sow_tasks, &input.loe_entries, None, None, at);
    let second = validator.validate_at(&input.sow_tasks, &input.loe_entries, None, None, at);

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first.meta.validated_at, "2025-03-01T12:00:00+00:00");
}

#[test]
fn result_json_shape() {
    let result = load_and_run("sso-orphan.request.json");
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["status"], "WARNING");
    assert_eq!(json["task_matches"][0]["match_status"], "fuzzy");
    assert_eq!(json["task_matches"][0]["duration_valid"], true);
    assert!(json["task_matches"][0]["complexity_analysis"]["reasoning"].is_string());
    assert_eq!(json["orphaned_entries"][0]["task"], "Database Backup");
    assert!(json["orphaned_entries"][0].get("total_days").is_none());
    assert_eq!(json["summary"]["orphaned_loe_entries"], 1);
}
