//! `scopecheck similarity` and `scopecheck analyze`: ad-hoc probes of the
//! scoring and complexity tables.

use std::path::PathBuf;

use serde::Serialize;

use scopecheck_recon::model::{BudgetEntry, PlannedTask};
use scopecheck_recon::{SimilarityBreakdown, Validator};

use crate::exit_codes::{EXIT_ERROR, EXIT_USAGE};
use crate::settings::load_config;
use crate::CliError;

#[derive(Serialize)]
struct SimilarityReport<'a> {
    a: &'a str,
    b: &'a str,
    #[serde(flatten)]
    scores: SimilarityBreakdown,
    match_threshold: u8,
    accepted: bool,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("JSON serialization error: {e}"),
        hint: None,
    })
}

fn validator(config: Option<PathBuf>) -> Result<Validator, CliError> {
    let (config, source) = load_config(config.as_deref())?;
    log::debug!("config: {source}");
    Ok(Validator::new(&config))
}

pub fn cmd_similarity(a: String, b: String, json: bool, config: Option<PathBuf>) -> Result<(), CliError> {
    let validator = validator(config)?;
    let threshold = validator.thresholds().accept;
    let scores = validator.similarity().breakdown(&a, &b);

    if json {
        let report = SimilarityReport {
            a: &a,
            b: &b,
            scores,
            match_threshold: threshold,
            accepted: scores.combined >= threshold,
        };
        println!("{}", to_json(&report)?);
        return Ok(());
    }

    println!("edit distance   {:>3}", scores.edit);
    println!("token overlap   {:>3}", scores.token);
    println!("semantic groups {:>3}", scores.semantic);
    println!("action/subject  {:>3}", scores.phrase);
    println!("combined        {:>3}  ({} at threshold {threshold})",
        scores.combined,
        if scores.combined >= threshold { "match" } else { "no match" },
    );
    Ok(())
}

pub fn cmd_analyze(
    text: String,
    description: Option<String>,
    days: Option<f64>,
    json: bool,
    config: Option<PathBuf>,
) -> Result<(), CliError> {
    if let Some(d) = days {
        if !d.is_finite() || d < 0.0 {
            return Err(CliError {
                code: EXIT_USAGE,
                message: format!("--days must be a non-negative number, got {d}"),
                hint: None,
            });
        }
    }

    let validator = validator(config)?;
    let task = PlannedTask::new("", text.as_str(), description.unwrap_or_default());
    let entry = days.map(|d| BudgetEntry::new(text.as_str(), d));
    let analysis = validator.analyzer().analyze(&task, entry.as_ref());

    if json {
        println!("{}", to_json(&analysis)?);
        return Ok(());
    }

    println!("type        {} (base {:.2} d)", analysis.detected_task_type, analysis.base_days);
    if analysis.complexity_factors.is_empty() {
        println!("factors     none");
    } else {
        for f in &analysis.complexity_factors {
            println!("factor      {} ({}, x{:.2})", f.keyword, f.category, f.multiplier);
        }
    }
    println!("multiplier  {:.4}", analysis.total_multiplier);
    println!("expected    {:.1}-{:.1} d", analysis.expected_days_min, analysis.expected_days_max);
    println!();
    println!("{}", analysis.reasoning);
    Ok(())
}
