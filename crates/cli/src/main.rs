//! Fulfillment Desk CLI - order checks and pick lists.
//!
//! # Usage
//!
//! ```bash
//! # Check which orders can be fulfilled from current stock
//! fd-cli check --orders orders.json --stock stock.json
//!
//! # Same, oldest-placed-first, as JSON
//! fd-cli check -o orders.yaml -s stock.yaml --sort-by-placed --format json
//!
//! # Print only the pick list
//! fd-cli pick-list -o orders.json -s stock.json
//! ```
//!
//! # Commands
//!
//! - `check` - Report per-order errors and the pick list
//! - `pick-list` - Print the consolidated pick list
//!
//! # Exit Codes
//!
//! - `0` - Check ran (orders may still have errors)
//! - `1` - Command failed (bad input, bad configuration)
//! - `2` - `--fail-on-blocked` was given and at least one order is blocked

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{CliConfig, DEFAULT_LOG_FILTER, LogFormat, OutputFormat};
use error::CliError;

mod commands;
mod config;
mod error;
mod input;
mod render;

#[derive(Parser)]
#[command(name = "fd-cli")]
#[command(author, version, about = "Fulfillment Desk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check which orders can be fulfilled and build the pick list
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// Report format (overrides `FD_OUTPUT_FORMAT`)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Exit with status 2 if any order is blocked
        #[arg(long)]
        fail_on_blocked: bool,
    },
    /// Print only the consolidated pick list
    PickList {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Orders file (JSON, or YAML with a .yaml/.yml extension), in priority order
    #[arg(short, long)]
    orders: PathBuf,

    /// Stock levels file keyed by SKU
    #[arg(short, long)]
    stock: PathBuf,

    /// Sort orders oldest-placed-first before checking
    #[arg(long)]
    sort_by_placed: bool,
}

impl InputArgs {
    fn as_check_input(&self) -> commands::check::CheckInput<'_> {
        commands::check::CheckInput {
            orders: &self.orders,
            stock: &self.stock,
            sort_by_placed: self.sort_by_placed,
        }
    }
}

fn init_tracing(log_format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    // stdout carries the report, so logs always go to stderr
    let is_json = log_format == LogFormat::Json;
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = CliConfig::from_env();
    init_tracing(config.as_ref().map_or(LogFormat::Text, |c| c.log_format));

    let cli = Cli::parse();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(CliError::from(e)),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: CliConfig) -> Result<ExitCode, CliError> {
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Check {
            input,
            format,
            fail_on_blocked,
        } => {
            let format = format.unwrap_or(config.output_format);
            let outcome = commands::check::check(input.as_check_input(), format, &mut stdout).await?;
            if fail_on_blocked && outcome.blocked > 0 {
                return Ok(ExitCode::from(2));
            }
        }
        Commands::PickList { input } => {
            commands::check::pick_list(input.as_check_input(), &mut stdout).await?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
