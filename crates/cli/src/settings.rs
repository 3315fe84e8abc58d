//! Config discovery and `scopecheck config` subcommands.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use scopecheck_recon::ValidatorConfig;

use crate::exit_codes::{validator_exit_code, EXIT_IO};
use crate::CliError;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective config as TOML
    #[command(after_help = "\
Examples:
  scopecheck config show
  scopecheck config show --config team.toml > my-config.toml")]
    Show,

    /// Validate a config file without running anything
    #[command(after_help = "\
Examples:
  scopecheck config validate team.toml")]
    Validate {
        /// Path to the config TOML file
        config: PathBuf,
    },
}

/// Where the effective config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    User(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(p) | Self::User(p) => write!(f, "{}", p.display()),
            Self::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// Per-user config file location.
pub fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scopecheck")
        .join("config.toml")
}

/// Resolve the effective config: explicit path, then the per-user file, then defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<(ValidatorConfig, ConfigSource), CliError> {
    if let Some(path) = explicit {
        let config = read_config(path)?;
        return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
    }

    let user = user_config_path();
    if user.exists() {
        let config = read_config(&user)?;
        return Ok((config, ConfigSource::User(user)));
    }

    Ok((ValidatorConfig::default(), ConfigSource::Defaults))
}

fn read_config(path: &Path) -> Result<ValidatorConfig, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError {
        code: EXIT_IO,
        message: format!("cannot read config {}: {e}", path.display()),
        hint: None,
    })?;
    ValidatorConfig::from_toml(&text).map_err(|e| CliError {
        code: validator_exit_code(&e),
        message: format!("{}: {e}", path.display()),
        hint: Some("run `scopecheck config show` to see the expected layout".into()),
    })
}

pub fn cmd_config(cmd: ConfigCommands, explicit: Option<PathBuf>) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Show => {
            let (config, source) = load_config(explicit.as_deref())?;
            let text = config
                .to_toml()
                .map_err(|e| CliError { code: validator_exit_code(&e), message: e.to_string(), hint: None })?;
            eprintln!("# source: {source}");
            print!("{text}");
            Ok(())
        }
        ConfigCommands::Validate { config } => {
            let parsed = read_config(&config)?;
            eprintln!(
                "ok: {} (match_threshold {}, {} task types, {} complexity keywords)",
                config.display(),
                parsed.match_threshold,
                parsed.ruleset.task_types.len(),
                parsed.ruleset.complexity_keywords.len(),
            );
            Ok(())
        }
    }
}
