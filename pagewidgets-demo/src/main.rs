mod actions;
mod session;

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use session::DemoConfig;

/// Table widget demo: edits and row actions against an in-process page.
#[derive(Parser, Debug)]
#[command(name = "pagewidgets-demo")]
#[command(version)]
struct Args {
    /// Log at debug level
    #[arg(short, long)]
    debug: bool,

    /// Number of table rows
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,

    /// Write the log to this file instead of the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Wait between the two echoes of the echo-twice actions, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

fn setup_logging(args: &Args) -> Result<(), String> {
    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let installed = match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Failed to create log file {}: {e}", path.display()))?;
            WriteLogger::init(level, Config::default(), file)
        }
        None => TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto),
    };
    installed.map_err(|e| format!("Failed to initialize logger: {e}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = setup_logging(&args) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let config = DemoConfig {
        rows: args.rows as usize,
        delay: Duration::from_millis(args.delay_ms),
    };

    match session::run(&config).await {
        Ok(log) => {
            println!("Log (newest first):");
            for message in log.render() {
                println!("  {message}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Demo session failed: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
