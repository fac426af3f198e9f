use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use ethers::{
    contract::{Contract, ContractFactory},
    middleware::SignerMiddleware,
    providers::{Http, Middleware, PendingTransaction, Provider},
    signers::{LocalWallet, Signer},
};
use ethers_core::types::{Address, TransactionReceipt, H256, U256};

use super::{
    ActivityLog, ChainClient, ChainError, ContractHandle, DeploymentTx, LogActivityArgs,
};
use crate::{artifacts::ContractArtifact, config::Config, constants};

type Inner = SignerMiddleware<Provider<Http>, LocalWallet>;

/// JSON-RPC backed client used outside of tests. Confirmation waits rely on
/// the provider's own polling defaults; there is no script-level timeout.
pub struct HttpChainClient {
    inner: Arc<Inner>,
}

impl HttpChainClient {
    pub async fn connect(cfg: &Config) -> Result<Self, ChainError> {
        let provider = Provider::<Http>::try_from(cfg.rpc_url.as_str())
            .map_err(ChainError::rpc)?
            .interval(Duration::from_millis(500));
        let chain_id = provider.get_chainid().await.map_err(ChainError::rpc)?;
        let wallet = cfg
            .private_key
            .parse::<LocalWallet>()
            .map_err(|e| ChainError::InvalidKey(e.to_string()))?
            .with_chain_id(chain_id.as_u64());
        Ok(Self {
            inner: Arc::new(SignerMiddleware::new(provider, wallet)),
        })
    }

    fn instance(&self, handle: &ContractHandle) -> Contract<Inner> {
        Contract::new(handle.address, handle.abi.clone(), Arc::clone(&self.inner))
    }

    async fn await_receipt(&self, tx_hash: H256) -> Result<TransactionReceipt, ChainError> {
        let receipt = PendingTransaction::new(tx_hash, self.inner.provider())
            .confirmations(constants::CONFIRMATIONS)
            .await
            .map_err(ChainError::rpc)?
            .ok_or(ChainError::Dropped(tx_hash))?;
        if receipt.status != Some(1u64.into()) {
            return Err(ChainError::Reverted(tx_hash));
        }
        Ok(receipt)
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    fn signer(&self) -> Address {
        self.inner.signer().address()
    }

    async fn balance_of(&self, address: Address) -> Result<U256, ChainError> {
        self.inner
            .get_balance(address, None)
            .await
            .map_err(ChainError::rpc)
    }

    async fn gas_price(&self) -> Result<U256, ChainError> {
        self.inner.get_gas_price().await.map_err(ChainError::rpc)
    }

    async fn deploy(&self, artifact: &ContractArtifact) -> Result<DeploymentTx, ChainError> {
        let factory = ContractFactory::new(
            artifact.abi.clone(),
            artifact.bytecode.clone(),
            Arc::clone(&self.inner),
        );
        let deployer = factory.deploy(()).map_err(ChainError::call)?;
        let mut tx = deployer.tx;
        // Fill gas and nonce up front so the reported gas limit is the one
        // that actually goes out on the wire.
        self.inner
            .fill_transaction(&mut tx, None)
            .await
            .map_err(ChainError::rpc)?;
        let gas_limit = tx.gas().copied().unwrap_or_default();
        let pending = self
            .inner
            .send_transaction(tx, None)
            .await
            .map_err(ChainError::rpc)?;
        Ok(DeploymentTx {
            hash: *pending,
            gas_limit,
        })
    }

    async fn wait_for_deployment(&self, tx: &DeploymentTx) -> Result<Address, ChainError> {
        let receipt = self.await_receipt(tx.hash).await?;
        receipt
            .contract_address
            .ok_or(ChainError::NoContractAddress(tx.hash))
    }

    async fn log_count(&self, contract: &ContractHandle) -> Result<U256, ChainError> {
        self.instance(contract)
            .method::<_, U256>("logCount", ())
            .map_err(ChainError::call)?
            .call()
            .await
            .map_err(ChainError::call)
    }

    async fn log_activity(
        &self,
        contract: &ContractHandle,
        entry: &LogActivityArgs,
    ) -> Result<H256, ChainError> {
        let call = self
            .instance(contract)
            .method::<_, U256>(
                "logActivity",
                (
                    entry.service_identifier.clone(),
                    entry.action.clone(),
                    entry.entity_type.clone(),
                    entry.entity_id,
                    entry.actor_username.clone(),
                    entry.change_description.clone(),
                    entry.data_hash.clone(),
                ),
            )
            .map_err(ChainError::call)?;
        let pending = call.send().await.map_err(ChainError::call)?;
        Ok(*pending)
    }

    async fn wait_for_tx(&self, tx_hash: H256) -> Result<(), ChainError> {
        self.await_receipt(tx_hash).await.map(|_| ())
    }

    async fn get_log(
        &self,
        contract: &ContractHandle,
        index: U256,
    ) -> Result<ActivityLog, ChainError> {
        self.instance(contract)
            .method::<_, ActivityLog>("getLog", index)
            .map_err(ChainError::call)?
            .call()
            .await
            .map_err(ChainError::call)
    }
}
