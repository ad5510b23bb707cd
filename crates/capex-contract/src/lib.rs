//! Capex chaincode.
//!
//! Records capital-expenditure transactions (business unit, company code,
//! document number, most recently used value) in the ledger's world state.
//!
//! - [`Capex`] / [`QueryResult`] -- record types and their JSON codec
//! - [`TransactionContext`] -- per-call handle to the world state
//! - [`CapexContract`] -- bootstrap, create, read, full scan, update
//! - [`Chaincode`] -- dispatch by host function name, contract metadata
//!
//! The contract keeps no state between calls. Consensus, ordering and
//! conflict resolution belong to the ledger host.

pub mod context;
pub mod contract;
pub mod dispatch;
pub mod error;
pub mod record;

#[cfg(test)]
mod testing;

pub use context::TransactionContext;
pub use contract::{CapexContract, SEED_COUNT, SEED_KEY_PREFIX};
pub use dispatch::{
    Chaincode, ContractMetadata, Function, FunctionMetadata, TransactionKind, CONTRACT_NAME,
};
pub use error::{ContractError, ContractResult};
pub use record::{Capex, QueryResult};
