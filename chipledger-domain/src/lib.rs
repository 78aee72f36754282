#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    DAY_SLOTS, DayReading, Money, PlayerResult, PlayerSessionRecord, SettlementPlan, Transfer,
    UnsettledBalance,
};
pub use services::{
    PlCalculationError, PlCalculator, RoundingMode, SettlementCalculator, SettlementContext,
    SettlementContextError,
};
