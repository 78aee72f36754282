use chipledger_domain::PlCalculationError;
use thiserror::Error;

/// Failure reported by a storage adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("storage failure: {0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("event name must not be empty")]
    EmptyEventName,
    #[error("event '{0}' already exists")]
    EventAlreadyExists(String),
    #[error("event '{0}' not found")]
    EventNotFound(String),
    #[error("player '{name}' appears more than once in event '{event}'")]
    DuplicatePlayer { event: String, name: String },
    #[error(transparent)]
    Calculation(#[from] PlCalculationError),
    #[error("totals of event '{0}' are out of range")]
    TotalsOverflow(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}
