//! merklechain CLI entry point.

use clap::{Parser, ValueEnum};
use tracing::Level;

mod commands;
mod print;

#[derive(Parser)]
#[command(name = "merklechain")]
#[command(about = "A hash-linked ledger with merkle-rooted blocks", long_about = None)]
struct Cli {
    /// Log verbosity (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Option<commands::Commands>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Install the process-wide subscriber. Called once, before any command runs.
fn init_logging(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_max_level(Level::from(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Some(cmd) => {
            if let Err(e) = commands::run(cmd) {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("merklechain - A hash-linked ledger with merkle-rooted blocks");
            println!("Run 'merklechain --help' for usage information.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_level_parsing() {
        let cli = Cli::try_parse_from(["merklechain", "--log-level", "debug", "demo"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(Level::from(cli.log_level), Level::DEBUG);

        let cli = Cli::try_parse_from(["merklechain", "demo"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Info);
    }
}
