//! Folio CLI - Extract structured records from portfolio statements.

use clap::Parser;
use folio_cli::commands;
use folio_cli::repl;
use folio_cli::{Cli, Command, Config, Formatter};
use folio_extractor::Extractor;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> folio_cli::Result<()> {
    let cli = Cli::parse();

    // Load or create config
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = if config_path.exists() {
        Config::load_from(&config_path)?
    } else {
        let cfg = Config::default();
        cfg.save_to(&config_path).ok();
        cfg
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let extractor = Extractor::new(config.extractor.clone());

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&config, &extractor, &formatter).await?;
        }
        Some(Command::Parse(args)) => {
            commands::execute_parse(args, &extractor, &formatter).await?;
        }
        Some(Command::Merge(args)) => {
            commands::execute_merge(args, &extractor, &formatter).await?;
        }
        Some(Command::Validate(args)) => {
            commands::execute_validate(args, &extractor, &formatter).await?;
        }
    }

    Ok(())
}
