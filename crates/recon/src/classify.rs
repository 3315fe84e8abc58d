use crate::complexity::round_to;
use crate::model::{ComplexityAnalysis, Pairing, TaskMatch};

/// LOE above `expected_max * OVER_ESTIMATE_FACTOR` draws a warning.
pub const OVER_ESTIMATE_FACTOR: f64 = 1.5;

pub const NO_MATCH_ISSUE: &str = "No matching LOE entry found for this SOW task";

/// Attach the complexity analysis to a pairing and run the duration checks.
///
/// - No entry → issue, duration fields left empty
/// - Unusable day value → issue, not range-checked
/// - Unusable `total_days` → issue; the entry adds nothing to the LOE total
/// - days < expected_min → issue (under-estimated)
/// - days > expected_max × 1.5 → warning (over-estimated)
pub fn classify_pairing(pairing: Pairing, analysis: ComplexityAnalysis) -> TaskMatch {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();
    let mut duration_valid = None;
    let mut duration_variance = None;

    match &pairing.entry {
        None => issues.push(NO_MATCH_ISSUE.to_string()),
        Some(entry) => match entry.checked_days() {
            None => {
                duration_valid = Some(false);
                issues.push(format!(
                    "Invalid LOE day estimate ({}) on entry '{}'",
                    entry.days, entry.task
                ));
            }
            Some(days) => {
                let min = analysis.expected_days_min;
                let max = analysis.expected_days_max;

                duration_valid = Some(days >= min && days <= max);
                duration_variance = Some(if min > 0.0 {
                    round_to(100.0 * (days - min) / min, 0)
                } else {
                    0.0
                });

                if days < min {
                    issues.push(format!(
                        "LOE below expected minimum: {days} days vs expected {min:.1}-{max:.1} days"
                    ));
                } else if days > max * OVER_ESTIMATE_FACTOR {
                    warnings.push(format!(
                        "LOE exceeds expected maximum: {days} days vs expected {min:.1}-{max:.1} days"
                    ));
                }
            }
        },
    }

    if let Some(entry) = &pairing.entry {
        if let Some(total) = entry.invalid_total_days() {
            log::warn!("entry '{}': total_days {} is not a usable estimate", entry.task, total);
            issues.push(format!(
                "Invalid LOE total_days ({}) on entry '{}'",
                total, entry.task
            ));
        }
    }

    TaskMatch {
        sow_task: pairing.task,
        loe_entry: pairing.entry,
        match_status: pairing.status,
        match_score: pairing.score,
        complexity_analysis: analysis,
        duration_valid,
        duration_variance,
        issues,
        warnings,
    }
}
