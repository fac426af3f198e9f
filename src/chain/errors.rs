use ethers_core::types::{H256, U256};
use thiserror::Error;

// Transport and call failures are carried as strings so the trait stays free
// of the middleware's generic error types.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("rpc error: {0}")]
    Rpc(String),
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
    #[error("contract call failed: {0}")]
    Call(String),
    #[error("transaction {0:?} reverted on chain")]
    Reverted(H256),
    #[error("transaction {0:?} was dropped before confirmation")]
    Dropped(H256),
    #[error("deployment transaction {0:?} yielded no contract address")]
    NoContractAddress(H256),
    #[error("no log entry at index {0}")]
    NoSuchLog(U256),
}

impl ChainError {
    pub(crate) fn rpc(err: impl std::fmt::Display) -> Self {
        ChainError::Rpc(err.to_string())
    }

    pub(crate) fn call(err: impl std::fmt::Display) -> Self {
        ChainError::Call(err.to_string())
    }
}
