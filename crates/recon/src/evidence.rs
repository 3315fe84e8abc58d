use crate::complexity::round_to;
use crate::model::{BudgetEntry, TaskMatch, ValidationStatus, ValidationSummary};

/// Total variance below this (percent) recommends raising estimates.
const UNDER_ESTIMATE_RECOMMENDATION: f64 = -20.0;
/// Total variance above this (percent) recommends an over-estimation review.
const OVER_ESTIMATE_RECOMMENDATION: f64 = 50.0;
/// Total variance outside this band (percent) downgrades PASS to WARNING.
const STATUS_VARIANCE_LOW: f64 = -10.0;
const STATUS_VARIANCE_HIGH: f64 = 30.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Findings {
    pub critical_issues: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Counts and day totals over all matches and all input entries.
pub fn compute_summary(matches: &[TaskMatch], entries: &[BudgetEntry], orphaned: &[BudgetEntry]) -> ValidationSummary {
    let matched = matches.iter().filter(|m| m.is_matched()).count();

    let total_loe_days: f64 = entries.iter().map(BudgetEntry::effective_days).sum();
    let total_expected_days: f64 = matches
        .iter()
        .map(|m| m.complexity_analysis.expected_midpoint())
        .sum();

    let total_variance_percent = if total_expected_days > 0.0 {
        round_to(100.0 * (total_loe_days - total_expected_days) / total_expected_days, 0)
    } else {
        0.0
    };

    ValidationSummary {
        total_sow_tasks: matches.len(),
        total_loe_entries: entries.len(),
        matched_tasks: matched,
        unmatched_sow_tasks: matches.len() - matched,
        orphaned_loe_entries: orphaned.len(),
        total_sow_expected_days: round_to(total_expected_days, 1),
        total_loe_days: round_to(total_loe_days, 1),
        total_variance_percent,
    }
}

/// Collect global issues, warnings and recommendations.
pub fn collect_findings(
    summary: &ValidationSummary,
    matches: &[TaskMatch],
    orphaned: &[BudgetEntry],
) -> Findings {
    let mut findings = Findings::default();

    if summary.unmatched_sow_tasks > 0 {
        findings.critical_issues.push(format!(
            "{} SOW task(s) have no matching LOE entry. These tasks may be missing effort estimates.",
            summary.unmatched_sow_tasks
        ));
    }

    if !orphaned.is_empty() {
        findings.warnings.push(format!(
            "{} LOE {} no matching SOW task. Review if these are overhead or out-of-scope items.",
            orphaned.len(),
            if orphaned.len() == 1 { "entry has" } else { "entries have" }
        ));
    }

    // Per-task findings, folded in task order
    for m in matches {
        for issue in &m.issues {
            findings.critical_issues.push(format!("{}: {issue}", m.sow_task.task));
        }
        for warning in &m.warnings {
            findings.warnings.push(format!("{}: {warning}", m.sow_task.task));
        }
    }

    // Orphaned entries are never range-checked; report unusable day values here.
    for entry in orphaned {
        if entry.checked_days().is_none() {
            log::warn!("LOE entry '{}' has unusable days value {}", entry.task, entry.days);
            findings.critical_issues.push(format!(
                "LOE entry '{}' has an invalid day estimate ({})",
                entry.task, entry.days
            ));
        }
        if let Some(total) = entry.invalid_total_days() {
            log::warn!("LOE entry '{}' has unusable total_days value {}", entry.task, total);
            findings.critical_issues.push(format!(
                "LOE entry '{}' has an invalid total_days ({})",
                entry.task, total
            ));
        }
    }

    findings.recommendations = recommendations(summary);
    findings
}

fn recommendations(summary: &ValidationSummary) -> Vec<String> {
    let mut out = Vec::new();
    let variance = summary.total_variance_percent;

    if summary.unmatched_sow_tasks > 0 {
        out.push(format!(
            "Add LOE entries for the {} unmatched SOW task(s) to ensure complete coverage.",
            summary.unmatched_sow_tasks
        ));
    }
    if summary.orphaned_loe_entries > 0 {
        out.push(
            "Clarify orphaned LOE entries: add them to the SOW scope if billable, or mark them as overhead."
                .to_string(),
        );
    }
    if variance < UNDER_ESTIMATE_RECOMMENDATION {
        out.push(format!(
            "Total LOE is {:.0}% below the complexity-adjusted expectation; consider increasing estimates.",
            variance.abs()
        ));
    }
    if variance > OVER_ESTIMATE_RECOMMENDATION {
        out.push(format!(
            "Total LOE is {variance:.0}% above the complexity-adjusted expectation; review for over-estimation."
        ));
    }

    out
}

/// FAIL on any critical issue; WARNING on any warning or out-of-band variance; else PASS.
pub fn decide_status(findings: &Findings, total_variance_percent: f64) -> ValidationStatus {
    if !findings.critical_issues.is_empty() {
        ValidationStatus::Fail
    } else if !findings.warnings.is_empty()
        || total_variance_percent < STATUS_VARIANCE_LOW
        || total_variance_percent > STATUS_VARIANCE_HIGH
    {
        ValidationStatus::Warning
    } else {
        ValidationStatus::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(unmatched: usize, orphaned: usize, variance: f64) -> ValidationSummary {
        ValidationSummary {
            total_sow_tasks: 4,
            total_loe_entries: 4,
            matched_tasks: 4 - unmatched,
            unmatched_sow_tasks: unmatched,
            orphaned_loe_entries: orphaned,
            total_sow_expected_days: 10.0,
            total_loe_days: 10.0,
            total_variance_percent: variance,
        }
    }

    fn findings(issues: usize, warnings: usize) -> Findings {
        Findings {
            critical_issues: vec!["issue".into(); issues],
            warnings: vec!["warning".into(); warnings],
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn status_fail_beats_variance() {
        assert_eq!(decide_status(&findings(1, 0), 0.0), ValidationStatus::Fail);
        assert_eq!(decide_status(&findings(1, 3), 200.0), ValidationStatus::Fail);
    }

    #[test]
    fn status_warning_on_warnings_or_variance() {
        assert_eq!(decide_status(&findings(0, 1), 0.0), ValidationStatus::Warning);
        assert_eq!(decide_status(&findings(0, 0), -11.0), ValidationStatus::Warning);
        assert_eq!(decide_status(&findings(0, 0), 31.0), ValidationStatus::Warning);
    }

    #[test]
    fn status_pass_inside_band() {
        assert_eq!(decide_status(&findings(0, 0), -10.0), ValidationStatus::Pass);
        assert_eq!(decide_status(&findings(0, 0), 30.0), ValidationStatus::Pass);
        assert_eq!(decide_status(&findings(0, 0), 0.0), ValidationStatus::Pass);
    }

    #[test]
    fn recommendations_by_variance() {
        assert!(recommendations(&summary(0, 0, 0.0)).is_empty());

        let low = recommendations(&summary(0, 0, -25.0));
        assert_eq!(low.len(), 1);
        assert!(low[0].contains("25% below"));

        let high = recommendations(&summary(0, 0, 60.0));
        assert_eq!(high.len(), 1);
        assert!(high[0].contains("60% above"));

        // Edges do not trigger
        assert!(recommendations(&summary(0, 0, -20.0)).is_empty());
        assert!(recommendations(&summary(0, 0, 50.0)).is_empty());
    }

    #[test]
    fn recommendations_for_coverage_gaps() {
        let recs = recommendations(&summary(2, 1, 0.0));
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("2 unmatched"));
        assert!(recs[1].starts_with("Clarify orphaned"));
    }

    #[test]
    fn summary_of_empty_input() {
        let s = compute_summary(&[], &[], &[]);
        assert_eq!(s.total_sow_tasks, 0);
        assert_eq!(s.total_variance_percent, 0.0);
        assert_eq!(s.total_loe_days, 0.0);
    }

    #[test]
    fn orphaned_invalid_days_is_critical() {
        let orphaned = vec![BudgetEntry::new("Travel", f64::INFINITY)];
        let f = collect_findings(&summary(0, 1, 0.0), &[], &orphaned);
        assert_eq!(f.warnings.len(), 1);
        assert_eq!(f.critical_issues.len(), 1);
        assert!(f.critical_issues[0].contains("'Travel'"));
    }

    #[test]
    fn orphan_warning_agrees_with_count() {
        let one = vec![BudgetEntry::new("Travel", 1.0)];
        let f = collect_findings(&summary(0, 1, 0.0), &[], &one);
        assert!(f.warnings[0].starts_with("1 LOE entry has no matching SOW task."));

        let two = vec![BudgetEntry::new("Travel", 1.0), BudgetEntry::new("Expenses", 0.5)];
        let f = collect_findings(&summary(0, 2, 0.0), &[], &two);
        assert!(f.warnings[0].starts_with("2 LOE entries have no matching SOW task."));
    }

    #[test]
    fn orphaned_invalid_total_days_is_critical() {
        let travel = BudgetEntry { total_days: Some(-4.0), ..BudgetEntry::new("Travel", 2.0) };
        let f = collect_findings(&summary(0, 1, 0.0), &[], &[travel.clone()]);
        assert_eq!(
            f.critical_issues,
            vec!["LOE entry 'Travel' has an invalid total_days (-4)".to_string()]
        );
        assert_eq!(compute_summary(&[], &[travel.clone()], &[travel]).total_loe_days, 0.0);
    }
}
