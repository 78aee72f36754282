//! JSON roster input for a single event.
//!
//! ```json
//! {
//!   "event": "Friday",
//!   "players": [
//!     { "name": "Alice", "start": 20, "buyins": 1, "day1": 35, "day2": "", "day3": "42" }
//!   ],
//!   "payments": [{ "from": "Bob", "to": "Alice", "paid": true }]
//! }
//! ```
//!
//! Day cells keep whatever the user typed; numeric interpretation happens in the
//! P/L calculator. Computed fields such as `pl` or `days_played` are ignored.

use chipledger_application::PaymentKey;
use chipledger_domain::{DAY_SLOTS, DayReading, Money, PlayerSessionRecord};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::{fs, io, path::Path, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub event: Option<String>,
    pub players: Vec<PlayerSessionRecord>,
    /// Previously recorded paid/unpaid flags.
    pub payments: Vec<(PaymentKey, bool)>,
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed roster: {0}")]
    Json(#[from] serde_json::Error),
    #[error("player '{player}' has an invalid {field}: {value}")]
    InvalidField {
        player: String,
        field: &'static str,
        value: String,
    },
}

#[derive(Deserialize)]
struct RawRoster {
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    players: Vec<RawPlayer>,
    #[serde(default)]
    payments: Vec<RawPayment>,
}

#[derive(Deserialize)]
struct RawPayment {
    from: String,
    to: String,
    #[serde(default = "default_paid")]
    paid: bool,
}

fn default_paid() -> bool {
    true
}

#[derive(Deserialize)]
struct RawPlayer {
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    start: Option<Value>,
    #[serde(default)]
    buyins: Option<Value>,
    #[serde(default)]
    day1: Option<Value>,
    #[serde(default)]
    day2: Option<Value>,
    #[serde(default)]
    day3: Option<Value>,
    #[serde(default)]
    day4: Option<Value>,
    #[serde(default)]
    day5: Option<Value>,
    #[serde(default)]
    day6: Option<Value>,
    #[serde(default)]
    day7: Option<Value>,
}

pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let source = fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_roster(&source)
}

pub fn parse_roster(source: &str) -> Result<Roster, RosterError> {
    let raw: RawRoster = serde_json::from_str(source)?;
    let players = raw
        .players
        .into_iter()
        .map(into_record)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(player_count = players.len(), "Parsed roster");

    Ok(Roster {
        event: raw.event.filter(|event| !event.trim().is_empty()),
        players,
        payments: raw
            .payments
            .into_iter()
            .map(|payment| (PaymentKey::new(payment.from, payment.to), payment.paid))
            .collect(),
    })
}

fn into_record(raw: RawPlayer) -> Result<PlayerSessionRecord, RosterError> {
    let start = match raw.start {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            parse_money(&value).ok_or_else(|| invalid(&raw.name, "start", &value))?,
        ),
    };
    let buyins = match raw.buyins {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            parse_count(&value).ok_or_else(|| invalid(&raw.name, "buyins", &value))?,
        ),
    };

    let cells: [Option<Value>; DAY_SLOTS] = [
        raw.day1, raw.day2, raw.day3, raw.day4, raw.day5, raw.day6, raw.day7,
    ];

    Ok(PlayerSessionRecord {
        name: raw.name,
        phone: raw.phone.filter(|phone| !phone.trim().is_empty()),
        start,
        buyins,
        days: cells.map(into_reading),
    })
}

fn into_reading(cell: Option<Value>) -> DayReading {
    match cell {
        None | Some(Value::Null) => DayReading::Empty,
        Some(Value::Number(number)) => {
            let text = number.to_string();
            match parse_decimal(&text) {
                Some(value) => DayReading::Number(value),
                None => DayReading::Text(text),
            }
        }
        Some(Value::String(text)) => DayReading::Text(text),
        Some(other) => DayReading::Text(other.to_string()),
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn parse_money(value: &Value) -> Option<Money> {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()).map(Money::from_decimal),
        Value::String(text) if text.trim().is_empty() => Some(Money::ZERO),
        Value::String(text) => parse_decimal(text).map(Money::from_decimal),
        _ => None,
    }
}

fn parse_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|count| u32::try_from(count).ok()),
        Value::String(text) if text.trim().is_empty() => Some(0),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn invalid(player: &str, field: &'static str, value: &Value) -> RosterError {
    RosterError::InvalidField {
        player: player.to_string(),
        field,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn parses_players_and_day_cells() {
        let roster = parse_roster(
            r#"{
                "event": "Friday",
                "players": [
                    {"name": "Alice", "phone": "555-0100", "start": 20, "buyins": 2,
                     "day1": 35, "day2": "", "day3": "42", "day4": null, "pl": 99},
                    {"name": "Bob", "day1": 12.5, "day7": "n/a"}
                ]
            }"#,
        )
        .expect("roster should parse");

        assert_eq!(roster.event.as_deref(), Some("Friday"));
        assert_eq!(roster.players.len(), 2);

        let alice = &roster.players[0];
        assert_eq!(alice.phone.as_deref(), Some("555-0100"));
        assert_eq!(alice.start, Some(Money::from_i64(20)));
        assert_eq!(alice.buyins, Some(2));
        assert_eq!(alice.days[0], DayReading::number(35));
        assert_eq!(alice.days[1], DayReading::text(""));
        assert_eq!(alice.days[2], DayReading::text("42"));
        assert_eq!(alice.days[3], DayReading::Empty);

        let bob = &roster.players[1];
        assert_eq!(bob.start, None);
        assert_eq!(bob.buyins, None);
        assert_eq!(bob.days[0].value(), Some(Money::new(125, 1)));
        assert_eq!(bob.days[6], DayReading::text("n/a"));
    }

    #[rstest]
    #[case::string_start(r#"{"players": [{"name": "A", "start": "lots"}]}"#, "start")]
    #[case::negative_buyins(r#"{"players": [{"name": "A", "buyins": -1}]}"#, "buyins")]
    #[case::fractional_buyins(r#"{"players": [{"name": "A", "buyins": 1.5}]}"#, "buyins")]
    #[case::bool_start(r#"{"players": [{"name": "A", "start": true}]}"#, "start")]
    fn rejects_invalid_fields(#[case] source: &str, #[case] expected_field: &str) {
        match parse_roster(source) {
            Err(RosterError::InvalidField { player, field, .. }) => {
                assert_eq!(player, "A");
                assert_eq!(field, expected_field);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn numeric_strings_are_accepted_for_start_and_buyins() {
        let roster =
            parse_roster(r#"{"players": [{"name": "A", "start": "50", "buyins": " 3 "}]}"#)
                .expect("roster should parse");
        assert_eq!(roster.players[0].start, Some(Money::from_i64(50)));
        assert_eq!(roster.players[0].buyins, Some(3));
    }

    #[test]
    fn payments_default_to_paid() {
        let roster = parse_roster(
            r#"{"players": [], "payments": [
                {"from": "Bob", "to": "Alice"},
                {"from": "Carol", "to": "Alice", "paid": false}
            ]}"#,
        )
        .expect("parse");

        assert_eq!(
            roster.payments,
            vec![
                (PaymentKey::new("Bob", "Alice"), true),
                (PaymentKey::new("Carol", "Alice"), false),
            ]
        );
    }

    #[test]
    fn blank_event_name_is_dropped() {
        let roster = parse_roster(r#"{"event": "  ", "players": []}"#).expect("parse");
        assert_eq!(roster.event, None);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(parse_roster("{"), Err(RosterError::Json(_))));
    }

    #[test]
    fn loads_roster_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"players": [{{"name": "Alice", "day1": 35}}]}}"#).expect("write");

        let roster = load_roster(file.path()).expect("load");
        assert_eq!(roster.players[0].name, "Alice");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_roster(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(RosterError::Io { .. })));
    }
}
