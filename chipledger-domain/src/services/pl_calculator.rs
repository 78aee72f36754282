use crate::{
    model::{Money, PlayerResult, PlayerSessionRecord},
    services::SettlementContext,
};
use thiserror::Error;

const DEFAULT_START: i64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlCalculationError {
    #[error("P/L of player '{player}' is out of range")]
    Overflow { player: String },
}

/// Profit/loss calculation for a single player's session record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlCalculator {
    default_start: Money,
}

impl Default for PlCalculator {
    fn default() -> Self {
        Self::new(Money::from_i64(DEFAULT_START))
    }
}

impl PlCalculator {
    pub fn new(default_start: Money) -> Self {
        Self { default_start }
    }

    /// Calculate P/L as the last valid day reading minus total investment.
    ///
    /// Day slots are scanned 1 → 7. Slots that are empty or do not parse as a
    /// number are skipped and do not count as played. A record without any
    /// valid reading yields exactly zero. Each buy-in costs one `start`.
    ///
    /// # Errors
    /// [`PlCalculationError::Overflow`] when the investment or the P/L does not
    /// fit in a `Money`.
    pub fn calculate<'a>(
        &self,
        record: &'a PlayerSessionRecord,
        context: SettlementContext,
    ) -> Result<PlayerResult<'a>, PlCalculationError> {
        let start = match record.start {
            Some(start) if !start.is_zero() => start,
            _ => self.default_start,
        };
        let buyins = record.buyins.unwrap_or(0);

        let mut days_played: u8 = 0;
        let mut last_value = None;
        for (idx, reading) in record.days.iter().enumerate() {
            if !reading.is_filled() {
                continue;
            }
            match reading.value() {
                Some(value) => {
                    days_played += 1;
                    last_value = Some(value);
                }
                None => {
                    tracing::debug!(
                        player = %record.name,
                        day = idx + 1,
                        "Skipping non-numeric day reading"
                    );
                }
            }
        }

        let Some(last_value) = last_value else {
            return Ok(PlayerResult {
                name: &record.name,
                pl: Money::ZERO,
                days_played,
            });
        };

        let pl = start
            .checked_mul(buyins)
            .and_then(|buyin_cost| start.checked_add(buyin_cost))
            .and_then(|total_investment| last_value.checked_sub(total_investment))
            .ok_or_else(|| PlCalculationError::Overflow {
                player: record.name.clone(),
            })?;

        Ok(PlayerResult {
            name: &record.name,
            pl: context.round(pl),
            days_played,
        })
    }
}
