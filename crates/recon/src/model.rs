use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One unit of work extracted from the Statement of Work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedTask {
    #[serde(default)]
    pub phase: String,
    pub task: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_owner")]
    pub owner: String,
}

fn default_owner() -> String {
    "TBD".into()
}

impl PlannedTask {
    pub fn new(phase: impl Into<String>, task: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            task: task.into(),
            description: description.into(),
            owner: default_owner(),
        }
    }
}

/// One line item from the level-of-effort spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    pub days: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_buffer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_days: Option<f64>,
}

impl BudgetEntry {
    pub fn new(task: impl Into<String>, days: f64) -> Self {
        Self {
            task: task.into(),
            phase: None,
            days,
            risk_buffer: None,
            total_days: None,
        }
    }

    /// `days` if it is a usable estimate (finite, non-negative).
    pub fn checked_days(&self) -> Option<f64> {
        usable(self.days)
    }

    /// The `total_days` value when it is present but not a usable estimate.
    pub fn invalid_total_days(&self) -> Option<f64> {
        self.total_days.filter(|&total| usable(total).is_none())
    }

    /// Days counted toward totals: `total_days` overrides `days` when present.
    /// Unusable values count as zero.
    pub fn effective_days(&self) -> f64 {
        match self.total_days {
            Some(total) => usable(total).unwrap_or(0.0),
            None => self.checked_days().unwrap_or(0.0),
        }
    }
}

fn usable(days: f64) -> Option<f64> {
    (days.is_finite() && days >= 0.0).then_some(days)
}

/// A validation request: the serialized form of the engine's entry point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationInput {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub sow_tasks: Vec<PlannedTask>,
    #[serde(default)]
    pub loe_entries: Vec<BudgetEntry>,
}

// ---------------------------------------------------------------------------
// Complexity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityFactor {
    pub keyword: String,
    pub category: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityAnalysis {
    pub task_description: String,
    pub detected_task_type: String,
    pub base_days: f64,
    pub complexity_factors: Vec<ComplexityFactor>,
    pub total_multiplier: f64,
    pub expected_days_min: f64,
    pub expected_days_max: f64,
    pub reasoning: String,
}

impl ComplexityAnalysis {
    pub fn expected_midpoint(&self) -> f64 {
        (self.expected_days_min + self.expected_days_max) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Pair matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Exact,
    Fuzzy,
    Unmatched,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Fuzzy => write!(f, "fuzzy"),
            Self::Unmatched => write!(f, "unmatched"),
        }
    }
}

/// Matcher output for one planned task, before complexity analysis.
#[derive(Debug, Clone)]
pub struct Pairing {
    pub task: PlannedTask,
    pub entry: Option<BudgetEntry>,
    /// Position of `entry` in the input entry list.
    pub entry_index: Option<usize>,
    pub status: MatchStatus,
    pub score: u8,
}

#[derive(Debug)]
pub struct PairMatchOutput {
    pub pairs: Vec<Pairing>,
    pub orphaned: Vec<BudgetEntry>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TaskMatch {
    pub sow_task: PlannedTask,
    pub loe_entry: Option<BudgetEntry>,
    pub match_status: MatchStatus,
    pub match_score: u8,
    pub complexity_analysis: ComplexityAnalysis,
    /// `None` when no entry is paired.
    pub duration_valid: Option<bool>,
    /// Percent deviation from the expected minimum; `None` when no entry is paired.
    pub duration_variance: Option<f64>,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl TaskMatch {
    pub fn is_matched(&self) -> bool {
        self.match_status != MatchStatus::Unmatched
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    Pass,
    Warning,
    Fail,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Warning => write!(f, "WARNING"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub total_sow_tasks: usize,
    pub total_loe_entries: usize,
    pub matched_tasks: usize,
    pub unmatched_sow_tasks: usize,
    pub orphaned_loe_entries: usize,
    pub total_sow_expected_days: f64,
    pub total_loe_days: f64,
    pub total_variance_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationMeta {
    pub customer_name: String,
    pub project_name: String,
    pub engine_version: String,
    pub match_threshold: u8,
    pub validated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub meta: ValidationMeta,
    pub summary: ValidationSummary,
    pub task_matches: Vec<TaskMatch>,
    pub orphaned_entries: Vec<BudgetEntry>,
    pub critical_issues: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}
