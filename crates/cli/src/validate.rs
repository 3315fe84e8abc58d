//! `scopecheck validate`: match a SOW task list against LOE entries.

use std::io::Read;
use std::path::{Path, PathBuf};

use scopecheck_recon::model::{TaskMatch, ValidationResult};
use scopecheck_recon::{load_input_json, Validator, ValidationStatus};

use crate::exit_codes::{
    validator_exit_code, EXIT_ERROR, EXIT_IO, EXIT_USAGE, EXIT_VALIDATION_FAIL,
    EXIT_VALIDATION_WARNING,
};
use crate::settings::load_config;
use crate::CliError;

pub struct ValidateArgs {
    pub request: PathBuf,
    pub config: Option<PathBuf>,
    pub threshold: Option<u8>,
    pub customer: Option<String>,
    pub project: Option<String>,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub strict: bool,
}

fn validate_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn read_request(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| validate_err(EXIT_IO, format!("cannot read stdin: {e}")))?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .map_err(|e| validate_err(EXIT_IO, format!("cannot read {}: {e}", path.display())))
}

pub fn cmd_validate(args: ValidateArgs) -> Result<(), CliError> {
    let (mut config, source) = load_config(args.config.as_deref())?;
    log::debug!("config: {source}");

    if let Some(threshold) = args.threshold {
        if threshold == 0 || threshold > 100 {
            return Err(validate_err(EXIT_USAGE, format!("--threshold must be 1-100, got {threshold}")));
        }
        config.match_threshold = threshold;
        config.exact_threshold = config.exact_threshold.max(threshold);
    }
    config
        .validate()
        .map_err(|e| validate_err(validator_exit_code(&e), e.to_string()))?;

    let raw = read_request(&args.request)?;
    let input = load_input_json(&raw).map_err(|e| CliError {
        code: validator_exit_code(&e),
        message: e.to_string(),
        hint: Some("expected {\"sow_tasks\": [...], \"loe_entries\": [...]}".into()),
    })?;

    let customer = args.customer.as_deref().or(input.customer_name.as_deref());
    let project = args.project.as_deref().or(input.project_name.as_deref());

    let validator = Validator::new(&config);
    let result = validator.validate(&input.sow_tasks, &input.loe_entries, customer, project);

    // Output
    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| validate_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &json_str)
            .map_err(|e| validate_err(EXIT_IO, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if args.json {
        println!("{json_str}");
    } else {
        print_table(&result);
    }

    print_summary(&result);

    match result.status {
        ValidationStatus::Fail => Err(validate_err(
            EXIT_VALIDATION_FAIL,
            format!("validation failed: {} critical issue(s)", result.critical_issues.len()),
        )),
        ValidationStatus::Warning if args.strict => Err(validate_err(
            EXIT_VALIDATION_WARNING,
            format!("validation produced {} warning(s) (--strict)", result.warnings.len()),
        )),
        _ => Ok(()),
    }
}

fn print_table(result: &ValidationResult) {
    for m in &result.task_matches {
        println!("{}", task_line(m));
    }
    for entry in &result.orphaned_entries {
        println!("  [orphaned]   {} ({} d)", entry.task, entry.effective_days());
    }
}

fn task_line(m: &TaskMatch) -> String {
    let a = &m.complexity_analysis;
    let expected = format!("expected {:.1}-{:.1} d, {}", a.expected_days_min, a.expected_days_max, a.detected_task_type);
    match &m.loe_entry {
        Some(entry) => format!(
            "  [{} {:>3}]  {} -> {} ({} d, {expected})",
            m.match_status, m.match_score, m.sow_task.task, entry.task, entry.days
        ),
        None => format!("  [unmatched]  {} ({expected})", m.sow_task.task),
    }
}

/// Human summary to stderr.
fn print_summary(result: &ValidationResult) {
    let s = &result.summary;
    eprintln!(
        "{}: {}/{} tasks matched, {} orphaned entries, LOE {:.1} d vs expected {:.1} d ({:+}%)",
        result.status,
        s.matched_tasks,
        s.total_sow_tasks,
        s.orphaned_loe_entries,
        s.total_loe_days,
        s.total_sow_expected_days,
        s.total_variance_percent,
    );
    for issue in &result.critical_issues {
        eprintln!("  critical: {issue}");
    }
    for warning in &result.warnings {
        eprintln!("  warning:  {warning}");
    }
    for rec in &result.recommendations {
        eprintln!("  next:     {rec}");
    }
}
