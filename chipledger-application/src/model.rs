use chipledger_domain::{Money, PlayerResult, Transfer};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PaymentKey {
    pub from: String,
    pub to: String,
}

impl PaymentKey {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl From<&Transfer<'_>> for PaymentKey {
    fn from(transfer: &Transfer<'_>) -> Self {
        Self::new(transfer.from, transfer.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStanding {
    pub name: String,
    pub phone: Option<String>,
    pub pl: Money,
    pub days_played: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementEntry {
    pub from: String,
    pub to: String,
    pub amount: Money,
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsettledEntry {
    pub name: String,
    pub remaining: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSettlement {
    pub event: String,
    pub settlements: Vec<SettlementEntry>,
    pub total_winnings: Money,
    pub total_losses: Money,
    pub unsettled: Vec<UnsettledEntry>,
}

/// Total winnings and total losses; `None` when either does not fit in a `Money`.
pub(crate) fn totals(results: &[PlayerResult<'_>]) -> Option<(Money, Money)> {
    results
        .iter()
        .try_fold((Money::ZERO, Money::ZERO), |(winnings, losses), result| {
            match result.pl.signum() {
                1 => Some((winnings.checked_add(result.pl)?, losses)),
                -1 => Some((winnings, losses.checked_add(result.pl.abs())?)),
                _ => Some((winnings, losses)),
            }
        })
}
