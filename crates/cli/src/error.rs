//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON input could not be parsed.
    #[error("Failed to parse {} as JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// YAML input could not be parsed.
    #[error("Failed to parse {} as YAML: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Report could not be serialized.
    #[error("Failed to render report: {0}")]
    Render(String),

    /// Report could not be written to stdout.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
