use chipledger_application::{EventStore, PaymentKey, PaymentLedger, StoreError};
use chipledger_domain::PlayerSessionRecord;
use dashmap::{DashMap, mapref::entry::Entry};
use fxhash::FxHashMap;
use indexmap::IndexMap;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

struct StoredEvent {
    seq: u64,
    players: Vec<PlayerSessionRecord>,
}

/// Process-local event store.
///
/// Cloning shares the underlying map. Events are listed in creation order.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    inner: Arc<DashMap<String, StoredEvent>>,
    next_seq: Arc<AtomicU64>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for InMemoryEventStore {
    fn list_events(&self) -> Result<Vec<String>, StoreError> {
        let mut events: Vec<(u64, String)> = self
            .inner
            .iter()
            .map(|entry| (entry.value().seq, entry.key().clone()))
            .collect();
        events.sort_unstable_by_key(|(seq, _)| *seq);
        Ok(events.into_iter().map(|(_, name)| name).collect())
    }

    fn event_exists(&self, event: &str) -> Result<bool, StoreError> {
        Ok(self.inner.contains_key(event))
    }

    fn create_event(&self, event: &str) -> Result<bool, StoreError> {
        match self.inner.entry(event.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(StoredEvent {
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                    players: Vec::new(),
                });
                Ok(true)
            }
        }
    }

    fn delete_event(&self, event: &str) -> Result<bool, StoreError> {
        Ok(self.inner.remove(event).is_some())
    }

    fn load_players(&self, event: &str) -> Result<Vec<PlayerSessionRecord>, StoreError> {
        Ok(self
            .inner
            .get(event)
            .map(|stored| stored.players.clone())
            .unwrap_or_default())
    }

    fn save_players(
        &self,
        event: &str,
        players: Vec<PlayerSessionRecord>,
    ) -> Result<(), StoreError> {
        let Some(mut stored) = self.inner.get_mut(event) else {
            return Err(StoreError::new(format!("event '{event}' is not registered")));
        };
        stored.players = players;
        Ok(())
    }
}

/// Process-local paid/unpaid flags, grouped per event.
#[derive(Clone, Default)]
pub struct InMemoryPaymentLedger {
    inner: Arc<DashMap<String, IndexMap<PaymentKey, bool>>>,
}

impl InMemoryPaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaymentLedger for InMemoryPaymentLedger {
    fn paid_flags(&self, event: &str) -> Result<FxHashMap<PaymentKey, bool>, StoreError> {
        Ok(self
            .inner
            .get(event)
            .map(|flags| {
                flags
                    .iter()
                    .map(|(key, paid)| (key.clone(), *paid))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn set_paid(&self, event: &str, key: PaymentKey, paid: bool) -> Result<(), StoreError> {
        self.inner
            .entry(event.to_string())
            .or_default()
            .insert(key, paid);
        Ok(())
    }

    fn remove_event(&self, event: &str) -> Result<(), StoreError> {
        self.inner.remove(event);
        Ok(())
    }
}
