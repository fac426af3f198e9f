//! Thin client abstraction over the target network, sized so the deployment
//! driver can run against an in-memory double instead of a live chain.

use async_trait::async_trait;
use ethers::contract::EthAbiType;
use ethers_core::{
    abi::Abi,
    types::{Address, H256, U256},
};

use crate::artifacts::ContractArtifact;

pub mod errors;
pub mod mock;
pub mod rpc;

pub use errors::ChainError;

/// Address plus ABI of a contract that is already on chain.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    pub address: Address,
    pub abi: Abi,
}

impl ContractHandle {
    pub fn new(address: Address, abi: Abi) -> Self {
        Self { address, abi }
    }
}

/// The deployment transaction as submitted, before confirmation.
#[derive(Debug, Clone, Copy)]
pub struct DeploymentTx {
    pub hash: H256,
    pub gas_limit: U256,
}

/// Arguments to the contract's `logActivity` endpoint, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct LogActivityArgs {
    pub service_identifier: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: U256,
    pub actor_username: String,
    pub change_description: String,
    pub data_hash: String,
}

/// Mirrors the contract's `ActivityLog` struct, field for field.
#[derive(Debug, Clone, PartialEq, EthAbiType)]
pub struct ActivityLog {
    pub log_id: U256,
    pub service_identifier: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: U256,
    pub actor_username: String,
    pub actor_address: Address,
    pub change_description: String,
    pub data_hash: String,
    pub timestamp: U256,
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    /// The first configured signing account.
    fn signer(&self) -> Address;

    async fn balance_of(&self, address: Address) -> Result<U256, ChainError>;

    async fn gas_price(&self) -> Result<U256, ChainError>;

    /// Submits the contract-creation transaction. Does not wait for
    /// inclusion.
    async fn deploy(&self, artifact: &ContractArtifact) -> Result<DeploymentTx, ChainError>;

    /// Blocks until the deployment is confirmed, then returns the address of
    /// the created contract.
    async fn wait_for_deployment(&self, tx: &DeploymentTx) -> Result<Address, ChainError>;

    async fn log_count(&self, contract: &ContractHandle) -> Result<U256, ChainError>;

    /// Submits a `logActivity` transaction and returns its hash without
    /// waiting for inclusion.
    async fn log_activity(
        &self,
        contract: &ContractHandle,
        entry: &LogActivityArgs,
    ) -> Result<H256, ChainError>;

    /// Blocks until the transaction is confirmed and did not revert.
    async fn wait_for_tx(&self, tx_hash: H256) -> Result<(), ChainError>;

    async fn get_log(
        &self,
        contract: &ContractHandle,
        index: U256,
    ) -> Result<ActivityLog, ChainError>;
}
