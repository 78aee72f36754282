use crate::{
    model::{Money, PlayerResult, SettlementPlan, Transfer, UnsettledBalance},
    services::SettlementContext,
};

struct OpenPosition<'a> {
    name: &'a str,
    remaining: Money,
}

/// Settlement calculation service
pub struct SettlementCalculator;

impl SettlementCalculator {
    /// Calculate payments from losers to winners with a greedy largest-first merge.
    ///
    /// Winners and losers are each sorted by amount, descending; equal amounts keep
    /// input order. Each step pays `min(winner, loser)` and advances whichever side
    /// dropped below `context.settle_epsilon`, so at most `winners + losers - 1`
    /// transfers are produced. Payments that round to zero are applied but not
    /// emitted.
    ///
    /// # Returns
    /// The ordered transfer list and any balance left when totals do not match.
    pub fn calculate<'a>(
        &self,
        results: &[PlayerResult<'a>],
        context: SettlementContext,
    ) -> SettlementPlan<'a> {
        let mut winners: Vec<OpenPosition<'a>> = results
            .iter()
            .filter(|result| result.pl.signum() > 0)
            .map(|result| OpenPosition {
                name: result.name,
                remaining: result.pl,
            })
            .collect();
        let mut losers: Vec<OpenPosition<'a>> = results
            .iter()
            .filter(|result| result.pl.signum() < 0)
            .map(|result| OpenPosition {
                name: result.name,
                remaining: result.pl.abs(),
            })
            .collect();

        // `sort_by` is stable, which keeps input order for equal amounts.
        winners.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        losers.sort_by(|a, b| b.remaining.cmp(&a.remaining));

        let mut transfers = Vec::with_capacity((winners.len() + losers.len()).saturating_sub(1));
        let (mut i, mut j) = (0, 0);

        while i < winners.len() && j < losers.len() {
            let winner = &mut winners[i];
            let loser = &mut losers[j];

            let payment = winner.remaining.min(loser.remaining);
            let amount = context.round(payment);
            if amount.signum() > 0 {
                transfers.push(Transfer {
                    from: loser.name,
                    to: winner.name,
                    amount,
                });
            } else {
                tracing::debug!(
                    from = loser.name,
                    to = winner.name,
                    payment = %payment,
                    "Dropping payment that rounds to zero"
                );
            }

            winner.remaining -= payment;
            loser.remaining -= payment;

            if context.is_settled(winner.remaining) {
                i += 1;
            }
            if context.is_settled(loser.remaining) {
                j += 1;
            }
        }

        let unsettled: Vec<UnsettledBalance<'a>> = winners[i..]
            .iter()
            .filter(|position| !context.is_settled(position.remaining))
            .map(|position| UnsettledBalance {
                name: position.name,
                remaining: context.round(position.remaining),
            })
            .chain(
                losers[j..]
                    .iter()
                    .filter(|position| !context.is_settled(position.remaining))
                    .map(|position| UnsettledBalance {
                        name: position.name,
                        remaining: -context.round(position.remaining),
                    }),
            )
            .collect();

        if !unsettled.is_empty() {
            let residual = Money::checked_sum(unsettled.iter().map(|balance| balance.remaining));
            tracing::warn!(
                winner_count = winners.len(),
                loser_count = losers.len(),
                unsettled_count = unsettled.len(),
                residual = ?residual,
                "Settlement input does not balance; residual left unsettled"
            );
        }

        debug_assert!(transfers.len() < winners.len() + losers.len() || transfers.is_empty());

        SettlementPlan {
            transfers,
            unsettled,
        }
    }
}
