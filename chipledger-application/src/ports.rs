use crate::{error::StoreError, model::PaymentKey};
use chipledger_domain::PlayerSessionRecord;
use fxhash::FxHashMap;

/// Durable home of events and their player records.
pub trait EventStore: Send + Sync {
    /// Event names in creation order.
    fn list_events(&self) -> Result<Vec<String>, StoreError>;

    fn event_exists(&self, event: &str) -> Result<bool, StoreError>;

    /// Returns `false` when the event already exists.
    fn create_event(&self, event: &str) -> Result<bool, StoreError>;

    /// Returns `false` when the event did not exist.
    fn delete_event(&self, event: &str) -> Result<bool, StoreError>;

    fn load_players(&self, event: &str) -> Result<Vec<PlayerSessionRecord>, StoreError>;

    /// Replaces the event's player list.
    fn save_players(
        &self,
        event: &str,
        players: Vec<PlayerSessionRecord>,
    ) -> Result<(), StoreError>;
}

/// Paid/unpaid flags keyed by `(event, from, to)`.
pub trait PaymentLedger: Send + Sync {
    fn paid_flags(&self, event: &str) -> Result<FxHashMap<PaymentKey, bool>, StoreError>;

    fn set_paid(&self, event: &str, key: PaymentKey, paid: bool) -> Result<(), StoreError>;

    fn remove_event(&self, event: &str) -> Result<(), StoreError>;
}
