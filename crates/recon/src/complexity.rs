use crate::model::{BudgetEntry, ComplexityAnalysis, ComplexityFactor, PlannedTask};
use crate::ruleset::{ComplexityKeyword, Ruleset, TaskTypeRule, FALLBACK_TASK_TYPE};

/// Characters of the task description carried into the analysis.
const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// Infers a task type and a plausible day range from free text.
#[derive(Debug, Clone)]
pub struct ComplexityAnalyzer {
    task_types: Vec<TaskTypeRule>,
    fallback: TaskTypeRule,
    keywords: Vec<ComplexityKeyword>,
}

impl ComplexityAnalyzer {
    pub fn new(rules: &Ruleset) -> Self {
        let task_types: Vec<TaskTypeRule> = rules
            .task_types
            .iter()
            .map(|t| TaskTypeRule {
                keywords: t.keywords.iter().map(|k| k.to_lowercase()).collect(),
                ..t.clone()
            })
            .collect();

        let fallback = task_types
            .iter()
            .find(|t| t.name == FALLBACK_TASK_TYPE)
            .cloned()
            .unwrap_or_else(|| TaskTypeRule {
                name: FALLBACK_TASK_TYPE.into(),
                keywords: Vec::new(),
                min_days: 1.0,
                max_days: 3.0,
            });

        Self {
            task_types,
            fallback,
            keywords: rules
                .complexity_keywords
                .iter()
                .map(|k| ComplexityKeyword {
                    keyword: k.keyword.to_lowercase(),
                    ..k.clone()
                })
                .collect(),
        }
    }

    /// First task type (in table order) matching `text`, else the fallback.
    ///
    /// The type name matches anywhere in the text, so "redesign" is design
    /// work. Other keywords are stems and must start a word: "test" does not
    /// fire inside "latest".
    pub fn detect_task_type(&self, text: &str) -> &TaskTypeRule {
        let text = text.to_lowercase();
        self.task_types
            .iter()
            .find(|t| {
                contains_term(&text, &t.name.to_lowercase())
                    || t.keywords.iter().any(|k| starts_word(&text, k))
            })
            .unwrap_or(&self.fallback)
    }

    /// Every complexity keyword present in `text`, in table order.
    pub fn detect_factors(&self, text: &str) -> Vec<ComplexityFactor> {
        let text = text.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| contains_term(&text, &k.keyword))
            .map(|k| ComplexityFactor {
                keyword: k.keyword.clone(),
                category: k.category.clone(),
                multiplier: k.multiplier,
            })
            .collect()
    }

    pub fn analyze(&self, task: &PlannedTask, entry: Option<&BudgetEntry>) -> ComplexityAnalysis {
        let text = format!("{} {}", task.task, task.description).to_lowercase();

        let task_type = self.detect_task_type(&text);
        let factors = self.detect_factors(&text);
        // Factors compound.
        let multiplier: f64 = factors.iter().map(|f| f.multiplier).product();

        let expected_min = round_to(task_type.min_days * multiplier, 1);
        let expected_max = round_to(task_type.max_days * multiplier, 1);

        let reasoning = reasoning(task_type, &factors, multiplier, expected_min, expected_max, entry);

        let source = if task.description.trim().is_empty() {
            &task.task
        } else {
            &task.description
        };

        ComplexityAnalysis {
            task_description: source.chars().take(DESCRIPTION_PREVIEW_CHARS).collect(),
            detected_task_type: task_type.name.clone(),
            base_days: task_type.midpoint(),
            complexity_factors: factors,
            total_multiplier: round_to(multiplier, 4),
            expected_days_min: expected_min,
            expected_days_max: expected_max,
            reasoning,
        }
    }
}

fn reasoning(
    task_type: &TaskTypeRule,
    factors: &[ComplexityFactor],
    multiplier: f64,
    expected_min: f64,
    expected_max: f64,
    entry: Option<&BudgetEntry>,
) -> String {
    let mut out = format!(
        "Task type: {} (nominal {:.1}-{:.1} days). ",
        task_type.name, task_type.min_days, task_type.max_days
    );

    if factors.is_empty() {
        out.push_str("No complexity factors detected. ");
    } else {
        let list: Vec<String> = factors
            .iter()
            .map(|f| format!("{} ({}, x{:.2})", f.keyword, f.category, f.multiplier))
            .collect();
        out.push_str(&format!(
            "Complexity factors: {}; combined multiplier {:.2}x. ",
            list.join(", "),
            multiplier
        ));
    }

    out.push_str(&format!("Expected effort: {expected_min:.1}-{expected_max:.1} days."));

    if let Some(entry) = entry {
        match entry.checked_days() {
            Some(days) if days < expected_min => out.push_str(&format!(
                " LOE of {days} days is below the expected range."
            )),
            Some(days) if days > expected_max => out.push_str(&format!(
                " LOE of {days} days is above the expected range."
            )),
            Some(days) => out.push_str(&format!(
                " LOE of {days} days is within the expected range."
            )),
            None => out.push_str(" LOE day value is not a usable estimate."),
        }
    }

    out
}

/// Substring match; terms of three characters or fewer must match a whole word.
fn contains_term(text: &str, term: &str) -> bool {
    if term.chars().count() > 3 {
        return text.contains(term);
    }
    text.split(|c: char| !c.is_alphanumeric())
        .any(|word| word == term)
}

/// True when `term` occurs at the start of a word in `text`.
fn starts_word(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    text.match_indices(term).any(|(at, _)| {
        text[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

/// Rounds half away from zero. Never returns -0.0.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor + 0.0
}
