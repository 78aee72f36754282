#![warn(clippy::uninlined_format_args)]

pub mod memory_store;
pub mod roster;

pub use memory_store::{InMemoryEventStore, InMemoryPaymentLedger};
pub use roster::{Roster, RosterError, load_roster, parse_roster};
