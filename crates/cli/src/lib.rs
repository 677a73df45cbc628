pub mod commands;
pub mod render;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use advisor_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};
use advisor_core::sorting::SortOption;

#[derive(Debug, Parser)]
#[command(
    name = "advisor",
    about = "Product advisor CLI",
    long_about = "Narrow a product catalog for a natural-language request, rank the candidates, and sort the results.",
    after_help = "Examples:\n  advisor recommend \"I need a laptop under 50000\"\n  advisor filter \"vacuum for pet hair\" --json\n  advisor sort --input reply.json --by price_low_to_high\n  advisor config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to an advisor.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the catalog JSON file")]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Narrow the catalog and ask the ranker for recommendations")]
    Recommend {
        query: String,
        #[arg(long, default_value = "match_score", help = "match_score | price_low_to_high | price_high_to_low")]
        sort: SortOption,
        #[arg(long, help = "Send the full catalog instead of the smart-filtered candidates")]
        no_smart_filter: bool,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Run the smart filter only and show the candidate set")]
    Filter {
        query: String,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Sort a saved advisor response by a sort key")]
    Sort {
        #[arg(long, help = "Advisor response JSON file")]
        input: PathBuf,
        #[arg(long, default_value = "match_score")]
        by: String,
    },
    #[command(about = "Inspect effective configuration values with source attribution and redaction")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = load_options(&cli);

    if let Ok(config) = AppConfig::load(options.clone()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Recommend { query, sort, no_smart_filter, json } => {
            let mut options = options;
            if no_smart_filter {
                options.overrides.smart_filter_enabled = Some(false);
            }
            commands::recommend::run(options, &query, sort, json)
        }
        Command::Filter { query, json } => commands::filter::run(options, &query, json),
        Command::Sort { input, by } => match read_input(&input) {
            Ok(raw) => commands::sort::run(&raw, &by),
            Err(error) => {
                commands::CommandResult::failure("sort", "input_read", format!("{error:#}"), 2)
            }
        },
        Command::Config => commands::config::run(options),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn load_options(cli: &Cli) -> LoadOptions {
    LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        overrides: ConfigOverrides { catalog_path: cli.catalog.clone(), ..ConfigOverrides::default() },
    }
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read `{}`", path.display()))
}

/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
