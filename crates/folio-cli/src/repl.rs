//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use folio_extractor::{Extractor, LatestRecord};
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl(config: &Config, extractor: &Extractor, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Folio REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(|e| {
        CliError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to initialize editor: {}", e),
        ))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let latest = LatestRecord::new();

    loop {
        let prompt = if latest.is_empty() {
            "folio (empty)> "
        } else {
            "folio> "
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        match execute_repl_command(cmd, &latest, extractor, formatter).await {
                            Ok(output) => println!("{}", output),
                            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Load { path: PathBuf, fragmented: bool },
    Show,
    Activities,
    Ratings,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "load" => parse_load_command(&parts[1..]),
        "show" => Ok(ReplCommand::Show),
        "activities" => Ok(ReplCommand::Activities),
        "ratings" => Ok(ReplCommand::Ratings),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

fn parse_load_command(args: &[&str]) -> Result<ReplCommand> {
    let (fragmented, rest): (Vec<&str>, Vec<&str>) =
        args.iter().copied().partition(|arg| *arg == "--fragmented");
    match rest.as_slice() {
        [path] => Ok(ReplCommand::Load {
            path: PathBuf::from(path),
            fragmented: !fragmented.is_empty(),
        }),
        _ => Err(CliError::InvalidInput(
            "Usage: load <file> [--fragmented]".to_string(),
        )),
    }
}

/// Execute a REPL command against the latest-record slot.
async fn execute_repl_command(
    cmd: ReplCommand,
    latest: &LatestRecord,
    extractor: &Extractor,
    formatter: &Formatter,
) -> Result<String> {
    match cmd {
        ReplCommand::Load { path, fragmented } => {
            let record = commands::extract_file(extractor, &path, fragmented).await?;
            let message = formatter.record_loaded(&record);
            latest.set(record);
            Ok(message)
        }
        ReplCommand::Show => formatter.format_record(&*current(latest)?),
        ReplCommand::Activities => formatter.format_activities(&current(latest)?.recent_activities),
        ReplCommand::Ratings => formatter.format_ratings(&current(latest)?.debt_fund_ratings),
        ReplCommand::Exit | ReplCommand::Help => Ok(String::new()),
    }
}

fn current(latest: &LatestRecord) -> Result<std::sync::Arc<folio_domain::StructuredRecord>> {
    latest.get().ok_or(CliError::NoRecord)
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let folio_dir = home.join(".folio");
    std::fs::create_dir_all(&folio_dir)?;
    Ok(folio_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  load <file> [--fragmented]     - Extract a statement and keep it as the latest record");
    println!("  show                           - Show the latest record");
    println!("  activities                     - Show recent activities of the latest record");
    println!("  ratings                        - Show the debt-fund risk allocation");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
