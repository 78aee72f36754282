#![warn(clippy::uninlined_format_args)]

mod bootstrap;
mod config;

use chipledger_application::{EventSettlement, LedgerError, LedgerService, PlayerStanding};
use chipledger_domain::PlCalculator;
use chipledger_infrastructure::{
    InMemoryEventStore, InMemoryPaymentLedger, RosterError, load_roster,
};
use chipledger_presentation::{SettlementPresenter, StandingsPresenter};
use config::{AppConfig, ConfigError};
use serde::Serialize;
use std::{env, path::PathBuf, process};
use thiserror::Error;

const FALLBACK_EVENT: &str = "event";

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: chipledger <roster.json> [--json]")]
    Usage,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

struct Args {
    path: PathBuf,
    json: bool,
}

#[derive(Serialize)]
struct Report {
    standings: Vec<PlayerStanding>,
    settlement: EventSettlement,
}

fn main() {
    bootstrap::init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let args = parse_args(env::args().skip(1))?;
    let config = AppConfig::from_env()?;
    let roster = load_roster(&args.path)?;

    let event = roster.event.clone().unwrap_or_else(|| {
        args.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_EVENT.to_string())
    });

    let events = InMemoryEventStore::new();
    let payments = InMemoryPaymentLedger::new();
    let service = LedgerService::new(&events, &payments)
        .with_calculator(PlCalculator::new(config.default_start))
        .with_context(config.context);

    let event = service.create_event(&event)?;
    service.save_players(&event, roster.players)?;
    for (key, paid) in roster.payments {
        service.mark_paid(&event, &key.from, &key.to, paid)?;
    }

    let standings = service.standings(&event)?;
    let settlement = service.settle(&event)?;

    if args.json {
        let report = Report {
            standings,
            settlement,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let scale = service.context().scale;
        print!("{}", StandingsPresenter::render(&event, &standings, scale));
        println!();
        print!("{}", SettlementPresenter::render(&settlement, scale));
    }

    Ok(())
}

fn parse_args<I>(args: I) -> Result<Args, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut path = None;
    let mut json = false;

    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => return Err(CliError::Usage),
            _ if arg.starts_with('-') => return Err(CliError::Usage),
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ => return Err(CliError::Usage),
        }
    }

    let path = path.ok_or(CliError::Usage)?;
    Ok(Args { path, json })
}
