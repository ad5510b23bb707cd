use capex_state::WorldState;
use uuid::Uuid;

/// Per-invocation context handed to every contract operation.
///
/// Carries the world state handle for the transaction and the transaction id
/// used to correlate log events.
pub struct TransactionContext<'a> {
    tx_id: String,
    state: &'a dyn WorldState,
}

impl<'a> TransactionContext<'a> {
    /// Context with a freshly generated (UUIDv7) transaction id.
    pub fn new(state: &'a dyn WorldState) -> Self {
        Self::with_tx_id(Uuid::now_v7().to_string(), state)
    }

    /// Context with a transaction id assigned by the host.
    pub fn with_tx_id(tx_id: impl Into<String>, state: &'a dyn WorldState) -> Self {
        Self {
            tx_id: tx_id.into(),
            state,
        }
    }

    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    pub fn state(&self) -> &'a dyn WorldState {
        self.state
    }
}

impl std::fmt::Debug for TransactionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionContext")
            .field("tx_id", &self.tx_id)
            .finish_non_exhaustive()
    }
}
