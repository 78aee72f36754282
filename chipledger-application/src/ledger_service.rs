use crate::{
    error::LedgerError,
    model::{
        EventSettlement, PaymentKey, PlayerStanding, SettlementEntry, UnsettledEntry, totals,
    },
    ports::{EventStore, PaymentLedger},
};
use chipledger_domain::{
    PlCalculator, PlayerResult, PlayerSessionRecord, SettlementCalculator, SettlementContext,
};
use fxhash::FxHashSet;

/// Event bookkeeping and settle-up use cases over the storage ports.
#[derive(Clone, Copy)]
pub struct LedgerService<'a> {
    events: &'a dyn EventStore,
    payments: &'a dyn PaymentLedger,
    calculator: PlCalculator,
    context: SettlementContext,
}

impl<'a> LedgerService<'a> {
    pub fn new(events: &'a dyn EventStore, payments: &'a dyn PaymentLedger) -> Self {
        Self {
            events,
            payments,
            calculator: PlCalculator::default(),
            context: SettlementContext::default(),
        }
    }

    pub fn with_calculator(mut self, calculator: PlCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn with_context(mut self, context: SettlementContext) -> Self {
        self.context = context;
        self
    }

    pub fn context(&self) -> SettlementContext {
        self.context
    }

    pub fn list_events(&self) -> Result<Vec<String>, LedgerError> {
        Ok(self.events.list_events()?)
    }

    /// Registers a new event. The name is trimmed and must be unique.
    pub fn create_event(&self, name: &str) -> Result<String, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyEventName);
        }
        if !self.events.create_event(name)? {
            return Err(LedgerError::EventAlreadyExists(name.to_string()));
        }
        tracing::info!(event = name, "Created event");
        Ok(name.to_string())
    }

    /// Removes an event together with its player records and paid flags.
    pub fn delete_event(&self, event: &str) -> Result<(), LedgerError> {
        if !self.events.delete_event(event)? {
            return Err(LedgerError::EventNotFound(event.to_string()));
        }
        if let Err(err) = self.payments.remove_event(event) {
            tracing::warn!(event, error = %err, "Failed to drop settlement tracking");
        }
        tracing::info!(event, "Deleted event");
        Ok(())
    }

    /// Drops all player records of an event but keeps the event itself.
    pub fn clear_event(&self, event: &str) -> Result<(), LedgerError> {
        self.ensure_event(event)?;
        self.events.save_players(event, Vec::new())?;
        tracing::info!(event, "Cleared event");
        Ok(())
    }

    /// Replaces the event's player records. Records with a blank name are dropped;
    /// names must be unique within the event.
    pub fn save_players(
        &self,
        event: &str,
        records: Vec<PlayerSessionRecord>,
    ) -> Result<usize, LedgerError> {
        self.ensure_event(event)?;

        let records: Vec<PlayerSessionRecord> = records
            .into_iter()
            .filter_map(|mut record| {
                let trimmed = record.name.trim();
                if trimmed.is_empty() {
                    return None;
                }
                if trimmed.len() != record.name.len() {
                    record.name = trimmed.to_string();
                }
                Some(record)
            })
            .collect();

        let mut seen = FxHashSet::default();
        for record in &records {
            if !seen.insert(record.name.as_str()) {
                return Err(LedgerError::DuplicatePlayer {
                    event: event.to_string(),
                    name: record.name.clone(),
                });
            }
        }

        let count = records.len();
        self.events.save_players(event, records)?;
        tracing::debug!(event, player_count = count, "Saved players");
        Ok(count)
    }

    pub fn players(&self, event: &str) -> Result<Vec<PlayerSessionRecord>, LedgerError> {
        self.ensure_event(event)?;
        Ok(self.events.load_players(event)?)
    }

    /// P/L and days played per player, in stored order.
    pub fn standings(&self, event: &str) -> Result<Vec<PlayerStanding>, LedgerError> {
        let records = self.players(event)?;
        records
            .iter()
            .map(|record| -> Result<PlayerStanding, LedgerError> {
                let result = self.calculator.calculate(record, self.context)?;
                Ok(PlayerStanding {
                    name: record.name.clone(),
                    phone: record.phone.clone(),
                    pl: result.pl,
                    days_played: result.days_played,
                })
            })
            .collect()
    }

    /// Computes who owes whom for an event and merges the stored paid flags.
    pub fn settle(&self, event: &str) -> Result<EventSettlement, LedgerError> {
        let records = self.players(event)?;
        let results = records
            .iter()
            .map(|record| self.calculator.calculate(record, self.context))
            .collect::<Result<Vec<PlayerResult<'_>>, _>>()?;

        let (total_winnings, total_losses) =
            totals(&results).ok_or_else(|| LedgerError::TotalsOverflow(event.to_string()))?;
        let plan = SettlementCalculator.calculate(&results, self.context);
        let paid_flags = self.payments.paid_flags(event)?;

        let settlements: Vec<SettlementEntry> = plan
            .transfers
            .iter()
            .map(|transfer| SettlementEntry {
                from: transfer.from.to_string(),
                to: transfer.to.to_string(),
                amount: transfer.amount,
                paid: paid_flags
                    .get(&PaymentKey::from(transfer))
                    .copied()
                    .unwrap_or(false),
            })
            .collect();

        if !plan.is_balanced() {
            tracing::warn!(
                event,
                total_winnings = %total_winnings,
                total_losses = %total_losses,
                "Event ledger does not balance"
            );
        }

        tracing::debug!(
            event,
            player_count = results.len(),
            settlement_count = settlements.len(),
            "Computed settlements"
        );

        Ok(EventSettlement {
            event: event.to_string(),
            settlements,
            total_winnings,
            total_losses,
            unsettled: plan
                .unsettled
                .iter()
                .map(|balance| UnsettledEntry {
                    name: balance.name.to_string(),
                    remaining: balance.remaining,
                })
                .collect(),
        })
    }

    /// Records whether the payment `from → to` of an event has been made.
    pub fn mark_paid(
        &self,
        event: &str,
        from: &str,
        to: &str,
        paid: bool,
    ) -> Result<(), LedgerError> {
        self.ensure_event(event)?;
        self.payments.set_paid(event, PaymentKey::new(from, to), paid)?;
        tracing::info!(event, from, to, paid, "Updated settlement payment status");
        Ok(())
    }

    fn ensure_event(&self, event: &str) -> Result<(), LedgerError> {
        if self.events.event_exists(event)? {
            Ok(())
        } else {
            Err(LedgerError::EventNotFound(event.to_string()))
        }
    }
}
