// scopecheck CLI - validate SOW task lists against LOE estimates

mod exit_codes;
mod inspect;
mod settings;
mod validate;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::EXIT_SUCCESS;
use settings::ConfigCommands;
use validate::ValidateArgs;

#[derive(Parser)]
#[command(name = "scopecheck")]
#[command(about = "Check that every SOW task has a plausible LOE estimate")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Config TOML (default: <config dir>/scopecheck/config.toml, else built-in tables)
    #[arg(long, global = true, env = "SCOPECHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging to stderr (overrides SCOPECHECK_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a request (exit 0 = PASS, 6 = FAIL, 7 = WARNING with --strict)
    #[command(after_help = "\
Examples:
  scopecheck validate request.json
  scopecheck validate request.json --json
  scopecheck validate request.json --output report.json --strict
  cat request.json | scopecheck validate - --threshold 50

Request shape:
  {\"customer_name\": \"...\", \"project_name\": \"...\",
   \"sow_tasks\":   [{\"phase\": \"...\", \"task\": \"...\", \"description\": \"...\", \"owner\": \"...\"}],
   \"loe_entries\": [{\"task\": \"...\", \"days\": 2.5, \"total_days\": 3.0}]}")]
    Validate {
        /// Request JSON file, or `-` for stdin
        request: PathBuf,

        /// Minimum similarity (1-100) for a pairing to count as a match
        #[arg(long)]
        threshold: Option<u8>,

        /// Customer name for the report (overrides the request)
        #[arg(long)]
        customer: Option<String>,

        /// Project name for the report (overrides the request)
        #[arg(long)]
        project: Option<String>,

        /// Output JSON to stdout instead of the task table
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit non-zero on WARNING as well as FAIL
        #[arg(long)]
        strict: bool,
    },

    /// Score how similar two task names are
    #[command(after_help = "\
Examples:
  scopecheck similarity 'Configure SSO Integration' 'SSO Config'
  scopecheck similarity 'Install connector' 'Connector installation' --json")]
    Similarity {
        a: String,
        b: String,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the task type, complexity factors and expected day range for a task
    #[command(after_help = "\
Examples:
  scopecheck analyze 'Enterprise HA Cluster Migration'
  scopecheck analyze 'Data Migration' --days 0.5
  scopecheck analyze 'Portal rollout' --description 'Custom SSO and API integration' --json")]
    Analyze {
        /// Task name
        text: String,

        /// Longer task description, analysed together with the name
        #[arg(long)]
        description: Option<String>,

        /// LOE estimate to compare against the expected range
        #[arg(long)]
        days: Option<f64>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or check config files
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  scopecheck-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  scopecheck-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

/// Log to stderr so stdout stays a clean JSON channel.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SCOPECHECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Validate {
            request,
            threshold,
            customer,
            project,
            json,
            output,
            strict,
        } => validate::cmd_validate(ValidateArgs {
            request,
            config: cli.config,
            threshold,
            customer,
            project,
            json,
            output,
            strict,
        }),
        Commands::Similarity { a, b, json } => inspect::cmd_similarity(a, b, json, cli.config),
        Commands::Analyze { text, description, days, json } => {
            inspect::cmd_analyze(text, description, days, json, cli.config)
        }
        Commands::Config(cmd) => settings::cmd_config(cmd, cli.config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}
