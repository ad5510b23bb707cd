//! Invocation by function name.
//!
//! The ledger host delivers each call as a function name plus a list of
//! string arguments. [`Chaincode`] resolves the name, checks the argument
//! count, runs the matching [`CapexContract`] operation and returns the
//! response payload: empty for writes, JSON for reads.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::TransactionContext;
use crate::contract::CapexContract;
use crate::error::{ContractError, ContractResult};

/// Name the contract is registered under.
pub const CONTRACT_NAME: &str = "CapexContract";

/// Whether a function writes state (`Submit`) or only reads it (`Evaluate`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Submit,
    Evaluate,
}

/// The functions exposed to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    InitLedger,
    CreateTransaction,
    QueryTransaction,
    QueryAllTransactions,
    ChangeTransaction,
}

impl Function {
    pub const ALL: [Function; 5] = [
        Function::InitLedger,
        Function::CreateTransaction,
        Function::QueryTransaction,
        Function::QueryAllTransactions,
        Function::ChangeTransaction,
    ];

    /// Name used by the host to invoke the function.
    pub fn name(self) -> &'static str {
        match self {
            Self::InitLedger => "InitLedger",
            Self::CreateTransaction => "CreateTransaction",
            Self::QueryTransaction => "QueryTransaction",
            Self::QueryAllTransactions => "QueryAllTransactions",
            Self::ChangeTransaction => "ChangeTransaction",
        }
    }

    pub fn parameters(self) -> &'static [&'static str] {
        match self {
            Self::InitLedger | Self::QueryAllTransactions => &[],
            Self::CreateTransaction => &["transactionNumber", "bu", "cocd", "docno", "mru"],
            Self::QueryTransaction => &["transactionNumber"],
            Self::ChangeTransaction => &["transactionNumber", "newmru"],
        }
    }

    pub fn kind(self) -> TransactionKind {
        match self {
            Self::QueryTransaction | Self::QueryAllTransactions => TransactionKind::Evaluate,
            _ => TransactionKind::Submit,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Description of one exposed function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMetadata {
    pub name: String,
    pub parameters: Vec<String>,
    pub kind: TransactionKind,
}

/// Description of the whole contract, as reported to the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMetadata {
    pub name: String,
    pub version: String,
    pub functions: Vec<FunctionMetadata>,
}

/// Host-facing entry point wrapping a [`CapexContract`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Chaincode {
    contract: CapexContract,
}

impl Chaincode {
    pub fn new(contract: CapexContract) -> Self {
        Self { contract }
    }

    pub fn contract(&self) -> &CapexContract {
        &self.contract
    }

    /// Run `function` with positional string `args` and return its payload.
    pub fn invoke<S: AsRef<str>>(
        &self,
        ctx: &TransactionContext<'_>,
        function: &str,
        args: &[S],
    ) -> ContractResult<Vec<u8>> {
        let func = Function::from_name(function)
            .ok_or_else(|| ContractError::UnknownFunction(function.to_string()))?;
        let expected = func.parameters().len();
        if args.len() != expected {
            return Err(ContractError::ArgumentCount {
                function: function.to_string(),
                expected,
                actual: args.len(),
            });
        }
        debug!(tx_id = ctx.tx_id(), function, "invoking");

        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        match func {
            Function::InitLedger => {
                self.contract.init_ledger(ctx)?;
                Ok(Vec::new())
            }
            Function::CreateTransaction => {
                self.contract
                    .create_transaction(ctx, args[0], args[1], args[2], args[3], args[4])?;
                Ok(Vec::new())
            }
            Function::QueryTransaction => to_payload(&self.contract.query_transaction(ctx, args[0])?),
            Function::QueryAllTransactions => {
                to_payload(&self.contract.query_all_transactions(ctx)?)
            }
            Function::ChangeTransaction => {
                self.contract.change_transaction(ctx, args[0], args[1])?;
                Ok(Vec::new())
            }
        }
    }

    /// Describe the exposed functions.
    pub fn metadata(&self) -> ContractMetadata {
        ContractMetadata {
            name: CONTRACT_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            functions: Function::ALL
                .into_iter()
                .map(|f| FunctionMetadata {
                    name: f.name().to_string(),
                    parameters: f.parameters().iter().map(|p| p.to_string()).collect(),
                    kind: f.kind(),
                })
                .collect(),
        }
    }
}

fn to_payload<T: Serialize>(value: &T) -> ContractResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| ContractError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Capex, QueryResult};
    use capex_state::InMemoryWorldState;

    fn invoke(state: &InMemoryWorldState, function: &str, args: &[&str]) -> ContractResult<Vec<u8>> {
        let ctx = TransactionContext::with_tx_id("tx", state);
        Chaincode::default().invoke(&ctx, function, args)
    }

    #[test]
    fn function_names_round_trip() {
        for f in Function::ALL {
            assert_eq!(Function::from_name(f.name()), Some(f));
        }
        assert_eq!(Function::from_name("DeleteTransaction"), None);
    }

    #[test]
    fn writes_return_empty_payload() {
        let state = InMemoryWorldState::new();
        assert!(invoke(&state, "InitLedger", &[]).unwrap().is_empty());
        assert!(invoke(&state, "CreateTransaction", &["T100", "BU1", "CC1", "DOC1", "MRU1"])
            .unwrap()
            .is_empty());
        assert!(invoke(&state, "ChangeTransaction", &["T100", "MRU2"])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn query_returns_record_json() {
        let state = InMemoryWorldState::new();
        invoke(&state, "CreateTransaction", &["T100", "BU1", "CC1", "DOC1", "MRU1"]).unwrap();
        invoke(&state, "ChangeTransaction", &["T100", "MRU2"]).unwrap();

        let payload = invoke(&state, "QueryTransaction", &["T100"]).unwrap();
        let record: Capex = serde_json::from_slice(&payload).unwrap();
        assert_eq!(record, Capex::new("BU1", "CC1", "DOC1", "MRU2"));
    }

    #[test]
    fn query_all_returns_keyed_results() {
        let state = InMemoryWorldState::new();
        invoke(&state, "InitLedger", &[]).unwrap();

        let payload = invoke(&state, "QueryAllTransactions", &[]).unwrap();
        let results: Vec<QueryResult> = serde_json::from_slice(&payload).unwrap();
        assert_eq!(results.len(), 5);
        assert_eq!(results[4].key, "Transaction4");
        assert_eq!(results[4].record.mru, "M5");

        let raw: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(raw[0]["Key"], "Transaction0");
    }

    #[test]
    fn unknown_function_is_rejected() {
        let state = InMemoryWorldState::new();
        let err = invoke(&state, "DeleteTransaction", &["T1"]).unwrap_err();
        assert!(matches!(err, ContractError::UnknownFunction(ref f) if f == "DeleteTransaction"));
    }

    #[test]
    fn wrong_argument_count_is_rejected_before_touching_state() {
        let state = InMemoryWorldState::new();
        let err = invoke(&state, "CreateTransaction", &["T1", "a"]).unwrap_err();
        assert!(matches!(
            err,
            ContractError::ArgumentCount { expected: 5, actual: 2, .. }
        ));
        assert!(state.is_empty());
    }

    #[test]
    fn contract_errors_pass_through() {
        let state = InMemoryWorldState::new();
        let err = invoke(&state, "QueryTransaction", &["missing"]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn metadata_lists_every_function() {
        let meta = Chaincode::default().metadata();
        assert_eq!(meta.name, CONTRACT_NAME);
        assert_eq!(meta.functions.len(), 5);

        let query = meta
            .functions
            .iter()
            .find(|f| f.name == "QueryTransaction")
            .unwrap();
        assert_eq!(query.kind, TransactionKind::Evaluate);
        assert_eq!(query.parameters, vec!["transactionNumber"]);

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["functions"][0]["kind"], "submit");
    }
}
