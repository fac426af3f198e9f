//! In-memory stand-in for the network layer, used by the test suite.

use std::sync::Mutex;

use async_trait::async_trait;
use ethers_core::{
    types::{Address, H256, U256},
    utils::get_contract_address,
};

use super::{
    ActivityLog, ChainClient, ChainError, ContractHandle, DeploymentTx, LogActivityArgs,
};
use crate::artifacts::ContractArtifact;

pub struct MockChain {
    signer: Address,
    balance: U256,
    gas_price: U256,
    reject_deploys: bool,
    fail_reads: bool,
    inert_writes: bool,
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    nonce: u64,
    submitted: Vec<H256>,
    deployed: Option<Address>,
    logs: Vec<ActivityLog>,
    writes: Vec<LogActivityArgs>,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            signer: Address::from_low_u64_be(0xA11CE),
            balance: U256::from(10u64.pow(19)),
            gas_price: U256::from(1_000_000_000u64),
            reject_deploys: false,
            fail_reads: false,
            inert_writes: false,
            state: Mutex::new(MockState::default()),
        }
    }

    pub fn with_balance(mut self, balance: U256) -> Self {
        self.balance = balance;
        self
    }

    /// Every deployment submission is rejected at the node.
    pub fn rejecting_deploys(mut self) -> Self {
        self.reject_deploys = true;
        self
    }

    /// Every view call fails.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Writes are accepted and confirmed but mutate nothing.
    pub fn inert_writes(mut self) -> Self {
        self.inert_writes = true;
        self
    }

    pub fn deployed_address(&self) -> Option<Address> {
        self.state.lock().unwrap().deployed
    }

    pub fn recorded_writes(&self) -> Vec<LogActivityArgs> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn stored_log_count(&self) -> usize {
        self.state.lock().unwrap().logs.len()
    }

    fn next_tx_hash(state: &mut MockState) -> H256 {
        state.nonce += 1;
        let hash = H256::from_low_u64_be(state.nonce);
        state.submitted.push(hash);
        hash
    }
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainClient for MockChain {
    fn signer(&self) -> Address {
        self.signer
    }

    async fn balance_of(&self, _address: Address) -> Result<U256, ChainError> {
        Ok(self.balance)
    }

    async fn gas_price(&self) -> Result<U256, ChainError> {
        Ok(self.gas_price)
    }

    async fn deploy(&self, artifact: &ContractArtifact) -> Result<DeploymentTx, ChainError> {
        if self.reject_deploys {
            return Err(ChainError::Rpc(
                "deployment transaction rejected".to_string(),
            ));
        }
        let mut state = self.state.lock().unwrap();
        let address = get_contract_address(self.signer, U256::from(state.nonce));
        let hash = Self::next_tx_hash(&mut state);
        state.deployed = Some(address);
        let gas_limit = U256::from(21_000 + artifact.bytecode.len() as u64 * 200);
        Ok(DeploymentTx { hash, gas_limit })
    }

    async fn wait_for_deployment(&self, tx: &DeploymentTx) -> Result<Address, ChainError> {
        let state = self.state.lock().unwrap();
        if !state.submitted.contains(&tx.hash) {
            return Err(ChainError::Dropped(tx.hash));
        }
        state.deployed.ok_or(ChainError::NoContractAddress(tx.hash))
    }

    async fn log_count(&self, _contract: &ContractHandle) -> Result<U256, ChainError> {
        if self.fail_reads {
            return Err(ChainError::Call("read refused by mock".to_string()));
        }
        Ok(U256::from(self.state.lock().unwrap().logs.len()))
    }

    async fn log_activity(
        &self,
        _contract: &ContractHandle,
        entry: &LogActivityArgs,
    ) -> Result<H256, ChainError> {
        let mut state = self.state.lock().unwrap();
        state.writes.push(entry.clone());
        let hash = Self::next_tx_hash(&mut state);
        if !self.inert_writes {
            let log_id = U256::from(state.logs.len());
            let log = ActivityLog {
                log_id,
                service_identifier: entry.service_identifier.clone(),
                action: entry.action.clone(),
                entity_type: entry.entity_type.clone(),
                entity_id: entry.entity_id,
                actor_username: entry.actor_username.clone(),
                actor_address: self.signer,
                change_description: entry.change_description.clone(),
                data_hash: entry.data_hash.clone(),
                timestamp: U256::from(1_700_000_000 + state.nonce),
            };
            state.logs.push(log);
        }
        Ok(hash)
    }

    async fn wait_for_tx(&self, tx_hash: H256) -> Result<(), ChainError> {
        if self.state.lock().unwrap().submitted.contains(&tx_hash) {
            Ok(())
        } else {
            Err(ChainError::Dropped(tx_hash))
        }
    }

    async fn get_log(
        &self,
        _contract: &ContractHandle,
        index: U256,
    ) -> Result<ActivityLog, ChainError> {
        if self.fail_reads {
            return Err(ChainError::Call("read refused by mock".to_string()));
        }
        let state = self.state.lock().unwrap();
        if index >= U256::from(state.logs.len()) {
            return Err(ChainError::NoSuchLog(index));
        }
        Ok(state.logs[index.as_usize()].clone())
    }
}
