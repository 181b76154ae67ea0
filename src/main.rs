//! framelite - demonstration runner

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use framelite::demo;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Routine {
    Basic,
    Filtering,
    Derived,
    Summary,
    Cleaning,
    Construction,
}

/// Run the tabular-data demonstration routines
#[derive(Parser, Debug)]
#[command(name = "framelite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Run a single routine instead of the whole sequence
    #[arg(short, long, value_enum)]
    routine: Option<Routine>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.routine {
        None => demo::run_all(),
        Some(Routine::Basic) => demo::basic(&demo::passengers()),
        Some(Routine::Filtering) => demo::filtering(&demo::passengers()),
        Some(Routine::Derived) => {
            demo::derived(&demo::passengers())?;
            Ok(())
        }
        Some(Routine::Summary) => {
            let enriched = demo::derived(&demo::passengers())?;
            demo::summary(&enriched)
        }
        Some(Routine::Cleaning) => demo::cleaning(),
        Some(Routine::Construction) => demo::construction(),
    }
}
