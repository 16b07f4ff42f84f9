pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use basket_core::config::{AppConfig, LoadOptions};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "basket",
    about = "Basket pricing CLI",
    long_about = "Price baskets of product codes against a catalog of unit prices and quantity offers.",
    after_help = "Examples:\n  basket total SR1 SR1 FR1 SR1\n  basket price --json FR1 FR1\n  basket catalog --catalog config/catalog.toml\n  basket config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a basket.toml config file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Add each product code to a basket and print the formatted total")]
    Total {
        #[arg(long, help = "Catalog file to price against (overrides config)")]
        catalog: Option<PathBuf>,
        #[arg(help = "Product codes, one per purchased unit")]
        codes: Vec<String>,
    },
    #[command(about = "Print an itemised breakdown with the offer applied to each product")]
    Price {
        #[arg(long, help = "Catalog file to price against (overrides config)")]
        catalog: Option<PathBuf>,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
        #[arg(help = "Product codes, one per purchased unit")]
        codes: Vec<String>,
    },
    #[command(about = "Validate the catalog file and summarise its products")]
    Catalog {
        #[arg(long, help = "Catalog file to validate (overrides config)")]
        catalog: Option<PathBuf>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let base_options = LoadOptions { config_path: cli.config, ..LoadOptions::default() };

    if let Ok(config) = AppConfig::load(base_options.clone()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Total { catalog, codes } => {
            commands::total::run(commands::with_catalog(base_options, catalog), &codes)
        }
        Command::Price { catalog, json, codes } => {
            commands::price::run(commands::with_catalog(base_options, catalog), &codes, json)
        }
        Command::Catalog { catalog } => {
            commands::catalog::run(commands::with_catalog(base_options, catalog))
        }
        Command::Config => commands::CommandResult {
            exit_code: 0,
            output: commands::config::run(base_options),
        },
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_logging(config: &AppConfig) {
    use basket_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.logging.format {
        Compact => builder.compact().init(),
        Pretty => builder.pretty().init(),
        Json => builder.json().init(),
    }
}
