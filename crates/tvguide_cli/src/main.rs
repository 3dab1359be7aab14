//! TV guide command line entry point.
//!
//! # Responsibility
//! - Parse arguments and start logging.
//! - Collect any selection not given on the command line interactively.
//! - Print the report and write it to the output file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tvguide_core::io::generate::generate_guide_file;
use tvguide_core::io::prompt::parse_sort_answer;
use tvguide_core::{
    default_log_dir, default_log_level, init_logging, load_report, publish_report, Console,
    SortMode, Weekday,
};

#[derive(Parser)]
#[command(name = "tvguide", version, about = "Sorted, day-filtered TV guide reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "TVGUIDE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotating log files
    #[arg(long, global = true, env = "TVGUIDE_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a guide file and report one day's shows
    Run {
        /// Guide file to read
        input: PathBuf,

        /// File to write the report to
        output: PathBuf,

        /// Day to report; prompted for when omitted
        #[arg(short, long, value_parser = parse_day)]
        day: Option<Weekday>,

        /// Sort order, `time` or `name`; prompted for when omitted
        #[arg(short, long, value_parser = parse_sort)]
        sort: Option<SortMode>,
    },

    /// Write a random guide file for testing
    Generate {
        /// Number of entries to generate
        count: usize,

        /// File to write
        output: PathBuf,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = start_logging(&cli) {
        eprintln!("Warning: logging disabled: {err:#}");
    }

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_exit module=cli status=error error={err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(cli: &Cli) -> Result<()> {
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);
    init_logging(level, &dir).context("failed to initialize logging")?;
    Ok(())
}

fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            input,
            output,
            day,
            sort,
        } => {
            let mut console = Console::new(io::stdin().lock(), io::stdout(), io::stderr());
            let selection = console
                .complete_selection(day, sort)
                .context("failed to read selection")?;

            let report = load_report(&input, selection)
                .with_context(|| format!("failed to build report from `{}`", input.display()))?;
            publish_report(
                &report,
                &output,
                &mut console.output,
                &mut console.diagnostics,
            )
            .with_context(|| format!("failed to publish report to `{}`", output.display()))?;
        }
        Commands::Generate {
            count,
            output,
            seed,
        } => {
            generate_guide_file(&output, count, seed)
                .with_context(|| format!("failed to write `{}`", output.display()))?;
            println!("Wrote {count} entries to {}", output.display());
        }
    }
    Ok(())
}

fn parse_day(value: &str) -> Result<Weekday, String> {
    Weekday::parse(value).ok_or_else(|| format!("`{value}` is not a day of the week"))
}

fn parse_sort(value: &str) -> Result<SortMode, String> {
    parse_sort_answer(value).ok_or_else(|| format!("`{value}` is not `time` or `name`"))
}
