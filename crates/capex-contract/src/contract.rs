use tracing::{debug, info};

use crate::context::TransactionContext;
use crate::error::{ContractError, ContractResult};
use crate::record::{Capex, QueryResult};

/// Prefix of the keys written by [`CapexContract::init_ledger`].
pub const SEED_KEY_PREFIX: &str = "Transaction";

/// Number of seed records written by [`CapexContract::init_ledger`].
pub const SEED_COUNT: usize = 5;

/// The capex record store.
///
/// Stateless: everything it touches comes in through the
/// [`TransactionContext`] of the current call.
#[derive(Clone, Copy, Debug, Default)]
pub struct CapexContract;

impl CapexContract {
    pub fn new() -> Self {
        Self
    }

    /// The records written by [`init_ledger`](Self::init_ledger), keyed
    /// `Transaction0` through `Transaction4`.
    pub fn seed_records() -> Vec<(String, Capex)> {
        (1..=SEED_COUNT)
            .map(|i| {
                (
                    format!("{SEED_KEY_PREFIX}{}", i - 1),
                    Capex::new(format!("B{i}"), format!("C{i}"), format!("D{i}"), format!("M{i}")),
                )
            })
            .collect()
    }

    /// Write the seed records.
    ///
    /// Stops at the first failed put. Records written before the failure stay
    /// in the world state.
    pub fn init_ledger(&self, ctx: &TransactionContext<'_>) -> ContractResult<()> {
        for (key, record) in Self::seed_records() {
            self.put_record(ctx, &key, &record)?;
        }
        info!(tx_id = ctx.tx_id(), records = SEED_COUNT, "ledger initialized");
        Ok(())
    }

    /// Store a new record under `key`, overwriting any existing value.
    pub fn create_transaction(
        &self,
        ctx: &TransactionContext<'_>,
        key: &str,
        bu: &str,
        cocd: &str,
        docno: &str,
        mru: &str,
    ) -> ContractResult<()> {
        self.put_record(ctx, key, &Capex::new(bu, cocd, docno, mru))
    }

    /// Read the record stored under `key`.
    pub fn query_transaction(&self, ctx: &TransactionContext<'_>, key: &str) -> ContractResult<Capex> {
        let bytes = ctx
            .state()
            .get_state(key)
            .map_err(ContractError::Read)?
            .ok_or_else(|| ContractError::NotFound {
                key: key.to_string(),
            })?;
        debug!(tx_id = ctx.tx_id(), key, "read record");
        Capex::decode(key, &bytes)
    }

    /// Read every record in the world state, in the store's key order.
    pub fn query_all_transactions(
        &self,
        ctx: &TransactionContext<'_>,
    ) -> ContractResult<Vec<QueryResult>> {
        let scan = ctx
            .state()
            .get_state_by_range("", "")
            .map_err(ContractError::Scan)?;

        // Leaving the loop early drops `scan`, which closes the cursor.
        let mut results = Vec::new();
        for entry in scan {
            let entry = entry.map_err(ContractError::Scan)?;
            let record = Capex::decode(&entry.key, &entry.value)?;
            results.push(QueryResult {
                key: entry.key,
                record,
            });
        }
        debug!(tx_id = ctx.tx_id(), count = results.len(), "scanned records");
        Ok(results)
    }

    /// Replace the MRU field of the record under `key`.
    pub fn change_transaction(
        &self,
        ctx: &TransactionContext<'_>,
        key: &str,
        new_mru: &str,
    ) -> ContractResult<()> {
        let record = self.query_transaction(ctx, key)?.with_mru(new_mru);
        self.put_record(ctx, key, &record)
    }

    fn put_record(&self, ctx: &TransactionContext<'_>, key: &str, record: &Capex) -> ContractResult<()> {
        let bytes = record.encode(key)?;
        ctx.state()
            .put_state(key, &bytes)
            .map_err(ContractError::Store)?;
        debug!(tx_id = ctx.tx_id(), key, "wrote record");
        Ok(())
    }
}
