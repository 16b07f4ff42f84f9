pub mod catalog;
pub mod config;
pub mod price;
pub mod total;

use std::path::PathBuf;

use basket_core::config::{AppConfig, LoadOptions};
use basket_core::errors::ApplicationError;
use basket_core::Catalog;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, cause: &ApplicationError) -> Self {
        error!(
            event_name = "cli.command.failed",
            command,
            error_class = cause.error_class(),
            error = %cause,
            "command failed"
        );
        Self::failure(command, cause.error_class(), cause.to_string(), cause.exit_code())
    }
}

/// Applies a `--catalog` flag on top of the loaded options.
pub fn with_catalog(mut options: LoadOptions, catalog: Option<PathBuf>) -> LoadOptions {
    if catalog.is_some() {
        options.overrides.catalog_path = catalog;
    }
    options
}

pub(crate) fn load_catalog(options: LoadOptions) -> Result<Catalog, ApplicationError> {
    let config = AppConfig::load(options)?;
    Ok(Catalog::load(&config.catalog.path)?)
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
