//! dealwatch CLI
//!
//! Local execution entry point: runs one scraper pass and prints the
//! extracted records as JSON for a downstream consumer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dealwatch::{error::Result, models::Config, pipeline};

/// dealwatch - Deals-page scraper
#[derive(Parser, Debug)]
#[command(name = "dealwatch", version, about = "Retail deals-page scraper")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "dealwatch.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one full pass and print extracted records as JSON
    Scrape {
        /// Write the JSON outcome to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Scrape { output } => {
            let config = Config::load_or_default(&cli.config);
            config.validate()?;

            let outcome = pipeline::run_scrape(&config).await?;

            log::info!(
                "Pass finished: {} records extracted, {} skipped, {} submenu failures",
                outcome.records.len(),
                outcome.skipped,
                outcome.submenu_failures
            );

            let json = serde_json::to_string_pretty(&outcome)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    log::info!("Outcome written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }

        Command::Validate => {
            let config = Config::load(&cli.config)?;
            config.validate()?;
            log::info!("Configuration at {} is valid", cli.config.display());
        }
    }

    Ok(())
}
