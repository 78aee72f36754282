//! Rounding conventions shared by the P/L calculator and the settlement engine.
//!
//! Every emitted money value (a player's P/L, a transfer amount) is rounded to
//! `scale` decimal places with the configured [`RoundingMode`]. The settlement
//! engine additionally treats any remaining balance below `settle_epsilon` as
//! fully settled; the epsilon should stay at least one atomic unit at `scale`.

use crate::model::Money;
use rust_decimal::RoundingStrategy;
use thiserror::Error;

/// Largest scale a `rust_decimal::Decimal` can carry.
pub const MAX_SETTLEMENT_SCALE: u32 = 28;

/// Rounding mode for emitted amounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half away from zero (e.g., 0.125 -> 0.13, -0.125 -> -0.13).
    HalfUp,
    /// Round half to nearest even number (banker's rounding).
    #[default]
    HalfEven,
}

impl RoundingMode {
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Context for P/L rounding and settlement cursor advancement.
///
/// # Example
/// ```
/// use chipledger_domain::{Money, services::{RoundingMode, SettlementContext}};
///
/// let ctx = SettlementContext::try_new(2, RoundingMode::HalfUp, Money::new(1, 2)).unwrap();
/// assert_eq!(ctx.round(Money::new(1005, 3)), Money::new(101, 2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementContext {
    /// Number of decimal places for emitted amounts (2 for cents).
    pub scale: u32,
    /// Rounding strategy to use.
    pub rounding_mode: RoundingMode,
    /// Remaining balances strictly below this are treated as settled.
    pub settle_epsilon: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SettlementContextError {
    #[error("scale {scale} exceeds the supported maximum of {max_supported}")]
    UnsupportedScale { scale: u32, max_supported: u32 },
    #[error("settle epsilon must be positive (found {0})")]
    NonPositiveEpsilon(Money),
}

impl SettlementContext {
    /// Cent precision, banker's rounding, 0.01 settle epsilon.
    pub fn cents_default() -> Self {
        Self {
            scale: 2,
            rounding_mode: RoundingMode::HalfEven,
            settle_epsilon: Money::new(1, 2),
        }
    }

    pub fn try_new(
        scale: u32,
        rounding_mode: RoundingMode,
        settle_epsilon: Money,
    ) -> Result<Self, SettlementContextError> {
        if scale > MAX_SETTLEMENT_SCALE {
            return Err(SettlementContextError::UnsupportedScale {
                scale,
                max_supported: MAX_SETTLEMENT_SCALE,
            });
        }
        if settle_epsilon.signum() <= 0 {
            return Err(SettlementContextError::NonPositiveEpsilon(settle_epsilon));
        }
        Ok(Self {
            scale,
            rounding_mode,
            settle_epsilon,
        })
    }

    pub fn round(self, amount: Money) -> Money {
        round_money(amount, self)
    }

    /// Whether a remaining balance counts as fully settled.
    pub fn is_settled(self, remaining: Money) -> bool {
        remaining.is_zero() || remaining < self.settle_epsilon
    }
}

impl Default for SettlementContext {
    fn default() -> Self {
        Self::cents_default()
    }
}

pub fn round_money(amount: Money, context: SettlementContext) -> Money {
    amount.round_dp(context.scale, context.rounding_mode.strategy())
}
