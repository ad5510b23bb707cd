use capex_state::StateError;

/// Errors produced by contract operations.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// No value is stored under the key.
    #[error("{key} does not exist")]
    NotFound { key: String },

    /// Writing to the world state failed.
    #[error("failed to put to world state: {0}")]
    Store(#[source] StateError),

    /// Reading from the world state failed.
    #[error("failed to read from world state: {0}")]
    Read(#[source] StateError),

    /// Opening or advancing a range scan failed.
    #[error("failed to scan world state: {0}")]
    Scan(#[source] StateError),

    /// A record could not be encoded, or a stored value could not be decoded.
    #[error("malformed record at {key}: {reason}")]
    Encode { key: String, reason: String },

    /// The dispatcher was asked for a function the contract does not have.
    #[error("function {0} not found in contract")]
    UnknownFunction(String),

    /// The dispatcher received the wrong number of arguments.
    #[error("incorrect number of params for {function}: expected {expected}, received {actual}")]
    ArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// A response payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ContractError {
    /// Returns `true` for the "key has no value" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;
