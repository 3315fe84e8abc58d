//! Lookup tables driving similarity scoring and complexity analysis.
//!
//! A [`Ruleset`] is plain data. The engines copy what they need out of it at
//! construction time, so a config file (or a test) can swap in smaller tables.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ruleset {
    /// Dropped from token lists before token matching.
    pub stop_words: Vec<String>,
    /// Synonym clusters for the semantic-group score.
    pub synonym_groups: Vec<SynonymGroup>,
    /// Action vocabulary for the phrase score.
    pub action_verbs: Vec<String>,
    /// Subject vocabulary for the phrase score.
    pub subject_nouns: Vec<String>,
    /// Ordered: the first type whose name occurs in the task text, or one of
    /// whose keywords starts a word there, wins.
    pub task_types: Vec<TaskTypeRule>,
    pub complexity_keywords: Vec<ComplexityKeyword>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymGroup {
    pub name: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskTypeRule {
    pub name: String,
    /// Empty for the fallback type.
    #[serde(default)]
    pub keywords: Vec<String>,
    pub min_days: f64,
    pub max_days: f64,
}

impl TaskTypeRule {
    pub fn midpoint(&self) -> f64 {
        (self.min_days + self.max_days) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityKeyword {
    pub keyword: String,
    pub category: String,
    pub multiplier: f64,
}

/// Name of the type used when no task-type keyword occurs.
pub const FALLBACK_TASK_TYPE: &str = "general";

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn group(name: &str, terms: &[&str]) -> SynonymGroup {
    SynonymGroup {
        name: name.into(),
        terms: words(terms),
    }
}

fn task_type(name: &str, keywords: &[&str], min_days: f64, max_days: f64) -> TaskTypeRule {
    TaskTypeRule {
        name: name.into(),
        keywords: words(keywords),
        min_days,
        max_days,
    }
}

fn factor(keyword: &str, category: &str, multiplier: f64) -> ComplexityKeyword {
    ComplexityKeyword {
        keyword: keyword.into(),
        category: category.into(),
        multiplier,
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            stop_words: words(&[
                "the", "a", "an", "and", "or", "of", "to", "for", "in", "on", "with", "by", "&",
            ]),
            synonym_groups: default_synonym_groups(),
            action_verbs: words(&[
                "install", "configure", "deploy", "test", "migrate", "integrate", "upgrade",
                "document", "train", "design", "review", "plan", "implement", "validate",
                "setup", "build", "develop", "assess", "audit", "monitor", "backup", "restore",
                "troubleshoot", "optimize", "harden", "automate", "provision",
            ]),
            subject_nouns: words(&[
                "connector", "profile", "server", "database", "cluster", "network", "storage",
                "application", "policy", "user", "certificate", "dashboard", "environment",
                "firewall", "gateway", "agent", "workflow", "pipeline", "report", "sso",
                "ldap", "portal", "license", "appliance", "tenant", "site", "endpoint",
            ]),
            task_types: default_task_types(),
            complexity_keywords: default_complexity_keywords(),
        }
    }
}

fn default_synonym_groups() -> Vec<SynonymGroup> {
    vec![
        group("install", &["install", "deploy", "setup", "set up", "provision", "stand up", "rollout"]),
        group("configure", &["configur", "config", "customiz", "tuning", "settings"]),
        group("test", &["test", "validat", "verif", "quality assurance", "user acceptance"]),
        group("migrate", &["migrat", "cutover", "cut-over", "data transfer", "transition"]),
        group("integrate", &["integrat", "connect", "interface", "federat"]),
        group("document", &["document", "runbook", "as-built", "guide", "handbook"]),
        group("train", &["train", "knowledge transfer", "enablement", "education"]),
        group("design", &["design", "architect", "blueprint"]),
        group("plan", &["plan", "roadmap", "schedul", "scoping"]),
        group("review", &["review", "assess", "audit", "health check", "evaluat"]),
        group("upgrade", &["upgrad", "update", "patch"]),
        group("backup", &["backup", "back up", "restore", "recovery", "snapshot"]),
        group("monitor", &["monitor", "observability", "alerting", "logging", "dashboard"]),
        group("security", &["security", "harden", "compliance", "encrypt", "certificate"]),
        group("identity", &[
            "sso", "single sign-on", "single sign on", "saml", "oauth", "idp",
            "identity provider", "authentication", "ldap", "active directory",
        ]),
        group("network", &["network", "load balancer", "dns", "vpn", "routing", "firewall"]),
        group("storage", &["storage", "datastore", "volume", "disk", "vsan"]),
        group("database", &["database", "sql", "postgres", "mysql", "oracle"]),
        group("server", &["server", "host", "virtual machine", "node", "appliance"]),
        group("cluster", &["cluster", "high availability", "failover", "redundan"]),
        group("production", &["production", "prod env", "live environment"]),
        group("non_production", &["staging", "pre-prod", "non-prod", "nonprod", "sandbox"]),
        group("automation", &["automat", "script", "pipeline", "ci/cd", "ansible", "terraform"]),
        group("connector", &["connector", "plugin", "plug-in", "adapter", "agent"]),
        group("profile", &["profile", "polic", "template", "role"]),
        group("user", &["user", "account", "onboard"]),
        group("support", &["support", "hypercare", "handover", "handoff"]),
        group("governance", &["project management", "coordination", "governance", "status report"]),
        group("meeting", &["meeting", "workshop", "session", "kickoff", "kick-off"]),
    ]
}

fn default_task_types() -> Vec<TaskTypeRule> {
    vec![
        task_type("installation", &["installation", "install", "setup", "set up"], 1.0, 3.0),
        task_type("configuration", &["configuration", "configure", "config"], 1.0, 3.0),
        task_type("integration", &["integration", "integrate"], 2.0, 5.0),
        task_type("migration", &["migration", "migrate"], 3.0, 10.0),
        task_type("testing", &["testing", "test", "validation", "validate"], 1.0, 3.0),
        task_type("documentation", &["documentation", "document", "runbook", "as-built"], 0.5, 2.0),
        task_type("training", &["training", "train", "knowledge transfer", "enablement"], 0.5, 2.0),
        task_type("deployment", &["deployment", "deploy", "rollout", "go-live", "go live"], 1.0, 4.0),
        task_type("design", &["design", "architecture", "blueprint"], 2.0, 5.0),
        task_type("development", &["development", "develop", "build"], 3.0, 10.0),
        task_type("review", &["review"], 0.5, 2.0),
        task_type("planning", &["planning", "plan", "roadmap"], 0.5, 2.0),
        task_type("meeting", &["meeting", "kickoff", "kick-off", "status call"], 0.5, 1.0),
        task_type("workshop", &["workshop"], 0.5, 2.0),
        task_type("assessment", &["assessment", "assess", "discovery", "evaluation"], 1.0, 5.0),
        task_type("audit", &["audit"], 1.0, 3.0),
        task_type("support", &["support", "hypercare", "handover"], 1.0, 5.0),
        task_type(FALLBACK_TASK_TYPE, &[], 1.0, 3.0),
    ]
}

fn default_complexity_keywords() -> Vec<ComplexityKeyword> {
    vec![
        factor("complex", "complexity", 1.3),
        factor("advanced", "complexity", 1.3),
        factor("custom", "complexity", 1.4),
        factor("enterprise", "scale", 1.5),
        factor("large scale", "scale", 1.4),
        factor("multi", "scale", 1.3),
        factor("integration", "integration", 1.3),
        factor("api", "integration", 1.2),
        factor("security", "security", 1.2),
        factor("compliance", "security", 1.3),
        factor("encryption", "security", 1.2),
        factor("hardening", "security", 1.3),
        factor("high availability", "architecture", 1.5),
        factor("ha", "architecture", 1.5),
        factor("cluster", "architecture", 1.3),
        factor("disaster recovery", "architecture", 1.4),
        factor("distributed", "architecture", 1.3),
        factor("automation", "automation", 1.3),
        factor("script", "automation", 1.2),
    ]
}
