//! `beats-availability` CLI -- expand and check availability proposals from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Expand a proposal into slots (stdin → stdout)
//! echo '{"startTime":"09:00","endTime":"17:00","mode":"range","fromDate":"2025-06-01","toDate":"2025-06-03"}' \
//!   | beats-availability expand
//!
//! # Check a proposal against a saved calendar; exits 1 on any finding
//! beats-availability check -c calendar.json -i proposal.json
//!
//! # Same, but print the full evaluation as JSON
//! beats-availability check -c calendar.json -i proposal.json --json
//!
//! # Merge a clean proposal into the calendar
//! beats-availability apply -c calendar.json -i proposal.json -o calendar.json
//!
//! # List a saved calendar, one key per line
//! beats-availability show -c calendar.json
//!
//! # Overlap test on two windows
//! beats-availability overlaps 09:00 10:00 09:30 10:30
//! ```
//!
//! Set `RUST_LOG=debug` to see expansion and conflict counts.

use anyhow::{Context, Result};
use availability_engine::{AvailabilityCalendar, AvailabilityProposal, TimeOfDay};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use std::io::{self, Read};
use std::process;

#[derive(Parser)]
#[command(
    name = "beats-availability",
    version,
    about = "Availability conflict checker for Live Local Beats"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a proposal into concrete slots
    Expand {
        /// Proposal JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check a proposal against a saved calendar
    Check {
        /// Calendar JSON file
        #[arg(short, long)]
        calendar: String,
        /// Proposal JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print the full evaluation as JSON instead of plain messages
        #[arg(long)]
        json: bool,
    },
    /// Merge a conflict-free proposal into the calendar
    Apply {
        /// Calendar JSON file
        #[arg(short, long)]
        calendar: String,
        /// Proposal JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List a saved calendar, dates first, then weekdays
    Show {
        /// Calendar JSON file
        #[arg(short, long)]
        calendar: String,
    },
    /// Test whether two HH:MM windows overlap
    Overlaps {
        a_start: String,
        a_end: String,
        b_start: String,
        b_end: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Expand { input, output } => {
            let proposal = read_proposal(input.as_deref())?;
            let slots = availability_engine::expand_proposal(&proposal)
                .context("Failed to expand proposal")?;
            let json = serde_json::to_string_pretty(&slots)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Check {
            calendar,
            input,
            json,
        } => {
            let calendar = read_calendar(&calendar)?;
            let proposal = read_proposal(input.as_deref())?;
            let evaluation = availability_engine::evaluate(&proposal, &calendar);

            if json {
                println!("{}", serde_json::to_string_pretty(&evaluation)?);
            } else if evaluation.report.is_empty() {
                println!("No conflicts ({} slot(s) ready to save)", evaluation.slots.len());
            } else {
                for message in evaluation.report.messages() {
                    println!("{}", message);
                }
            }

            if !evaluation.report.is_empty() {
                process::exit(1);
            }
        }
        Commands::Apply {
            calendar,
            input,
            output,
        } => {
            let existing = read_calendar(&calendar)?;
            let proposal = read_proposal(input.as_deref())?;
            let evaluation = availability_engine::evaluate(&proposal, &existing);

            if !evaluation.can_save() {
                let reasons: Vec<&str> = evaluation.report.messages().collect();
                if reasons.is_empty() {
                    anyhow::bail!("Nothing to save: the proposal is incomplete");
                }
                anyhow::bail!("Refusing to save:\n{}", reasons.join("\n"));
            }

            let merged = existing.with_slots(&evaluation.slots);
            info!(
                "saved {} slot(s); calendar now holds {} window(s)",
                evaluation.slots.len(),
                merged.len()
            );
            write_output(output.as_deref(), &serde_json::to_string_pretty(&merged)?)?;
        }
        Commands::Show { calendar } => {
            let calendar = read_calendar(&calendar)?;
            if calendar.is_empty() {
                println!("No availability saved");
            }
            for (key, windows) in calendar.iter() {
                let ranges: Vec<String> = windows.iter().map(|w| w.to_string()).collect();
                println!("{}: {}", key, ranges.join(", "));
            }
        }
        Commands::Overlaps {
            a_start,
            a_end,
            b_start,
            b_end,
        } => {
            let overlap = availability_engine::overlaps(
                parse_time(&a_start)?,
                parse_time(&a_end)?,
                parse_time(&b_start)?,
                parse_time(&b_end)?,
            );
            println!("{}", overlap);
        }
    }

    Ok(())
}

fn parse_time(s: &str) -> Result<TimeOfDay> {
    s.parse::<TimeOfDay>().with_context(|| format!("Invalid time: {}", s))
}

fn read_proposal(path: Option<&str>) -> Result<AvailabilityProposal> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse proposal JSON")
}

fn read_calendar(path: &str) -> Result<AvailabilityCalendar> {
    let raw = read_input(Some(path))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse calendar JSON: {}", path))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
