#![warn(clippy::uninlined_format_args)]

pub mod settlement_presenter;
pub mod standings_presenter;
pub mod strings;
pub mod text_table;

pub use settlement_presenter::SettlementPresenter;
pub use standings_presenter::StandingsPresenter;
pub use text_table::{Alignment, TextTableBuilder};

use chipledger_domain::Money;

/// Fixed-point rendering, so `50.5` at scale 2 reads `50.50`.
pub(crate) fn format_amount(amount: Money, scale: u32) -> String {
    format!("{:.*}", scale as usize, amount.as_decimal())
}
