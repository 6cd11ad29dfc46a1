//! permit-gate CLI.
//!
//! Reads a JSON intake document from stdin, writes a JSON decision to stdout.
//!
//! Input: `{ "request": {...}, "bookings": [...] }`. Bookings carry a
//! `status`; only approved ones take part in conflict checks.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use simplelog::LevelFilter;

use permit_gate::config::Config;
use permit_gate::conflict::{BookingLedger, ConflictDetector, StoredBooking};
use permit_gate::error::{Error, Result};
use permit_gate::eval::RuleBook;
use permit_gate::logging;
use permit_gate::request::EventRequest;

#[derive(Parser, Debug)]
#[command(
    name = "permit-gate",
    about = "Classify event-permit applications and check venue bookings for conflicts",
    version
)]
struct Cli {
    /// Config overlay to merge over the defaults (instead of ~/.config/permit-gate/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Skip the diagnostic and decision logs
    #[arg(long, global = true)]
    no_log: bool,
    /// Log debug detail (rule escalations, collisions)
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full decision: classification, checklist, conflicts and disposition
    Submit,
    /// Conflict check only
    Availability,
    /// Eligibility checklist only
    Eligibility,
    /// Print the merged configuration
    Config,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Intake {
    request: EventRequest,
    bookings: Vec<StoredBooking>,
}

fn read_intake() -> Result<Intake> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(Error::Stdin)?;
    Ok(serde_json::from_str(&input)?)
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let rulebook = RuleBook::from_config(&config)?;

    let output = match cli.command {
        Command::Config => {
            print!("{}", config.to_toml()?);
            return Ok(());
        }
        Command::Submit => {
            let intake = read_intake()?;
            let ledger = BookingLedger::from(intake.bookings);
            let detector = ConflictDetector::new(&ledger);
            let verdict = rulebook.assess_with(&intake.request, &detector)?;
            log::info!(
                "{} {:?}: {}",
                verdict.disposition.label(),
                intake.request.location,
                verdict.reason()
            );
            if !cli.no_log {
                logging::log_verdict(&intake.request, &verdict);
            }
            serde_json::to_value(&verdict)?
        }
        Command::Availability => {
            let intake = read_intake()?;
            let ledger = BookingLedger::from(intake.bookings);
            let result = ConflictDetector::new(&ledger).check(&intake.request)?;
            serde_json::to_value(&result)?
        }
        Command::Eligibility => {
            let intake = read_intake()?;
            serde_json::to_value(rulebook.check_eligibility(&intake.request))?
        }
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if !cli.no_log {
        logging::init(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("permit-gate: {e}");
            ExitCode::FAILURE
        }
    }
}
