use std::fs;

use activity_logger_deploy::{
    artifacts::errors::ArtifactError,
    chain::{mock::MockChain, ChainClient, ContractHandle},
    config::Config,
    constants, deploy, Error,
};
use ethers_core::{abi::Abi, types::U256};
use tempfile::TempDir;

// Trimmed ActivityLogger ABI: the three endpoints the scripts touch.
const ARTIFACT_JSON: &str = r#"{
    "contractName": "ActivityLogger",
    "abi": [
        {
            "inputs": [
                {"internalType": "string", "name": "_serviceIdentifier", "type": "string"},
                {"internalType": "string", "name": "_action", "type": "string"},
                {"internalType": "string", "name": "_entityType", "type": "string"},
                {"internalType": "uint256", "name": "_entityId", "type": "uint256"},
                {"internalType": "string", "name": "_actorUsername", "type": "string"},
                {"internalType": "string", "name": "_changeDescription", "type": "string"},
                {"internalType": "string", "name": "_dataHash", "type": "string"}
            ],
            "name": "logActivity",
            "outputs": [{"internalType": "uint256", "name": "", "type": "uint256"}],
            "stateMutability": "nonpayable",
            "type": "function"
        },
        {
            "inputs": [],
            "name": "logCount",
            "outputs": [{"internalType": "uint256", "name": "", "type": "uint256"}],
            "stateMutability": "view",
            "type": "function"
        },
        {
            "inputs": [{"internalType": "uint256", "name": "_logId", "type": "uint256"}],
            "name": "getLog",
            "outputs": [
                {
                    "components": [
                        {"internalType": "uint256", "name": "logId", "type": "uint256"},
                        {"internalType": "string", "name": "serviceIdentifier", "type": "string"},
                        {"internalType": "string", "name": "action", "type": "string"},
                        {"internalType": "string", "name": "entityType", "type": "string"},
                        {"internalType": "uint256", "name": "entityId", "type": "uint256"},
                        {"internalType": "string", "name": "actorUsername", "type": "string"},
                        {"internalType": "address", "name": "actorAddress", "type": "address"},
                        {"internalType": "string", "name": "changeDescription", "type": "string"},
                        {"internalType": "string", "name": "dataHash", "type": "string"},
                        {"internalType": "uint256", "name": "timestamp", "type": "uint256"}
                    ],
                    "internalType": "struct ActivityLogger.ActivityLog",
                    "name": "",
                    "type": "tuple"
                }
            ],
            "stateMutability": "view",
            "type": "function"
        }
    ],
    "bytecode": "0x608060405234801561001057600080fd5b50610120806100206000396000f3fe"
}"#;

// Build output in the hardhat layout the driver scans.
fn config_with_artifact() -> anyhow::Result<(TempDir, Config)> {
    let dir = TempDir::new()?;
    let nested = dir.path().join("contracts").join("ActivityLogger.sol");
    fs::create_dir_all(&nested)?;
    fs::write(nested.join("ActivityLogger.json"), ARTIFACT_JSON)?;
    let cfg = make_config(&dir);
    Ok((dir, cfg))
}

fn make_config(dir: &TempDir) -> Config {
    Config {
        rpc_url: "http://127.0.0.1:8545".to_string(),
        private_key: String::new(),
        artifacts_dir: dir.path().to_path_buf(),
        contract_address: None,
    }
}

#[tokio::test]
async fn returns_the_deployed_address() -> anyhow::Result<()> {
    let (_dir, cfg) = config_with_artifact()?;
    let chain = MockChain::new();

    let address = deploy::run(&chain, &cfg).await?;

    assert_eq!(
        Some(address),
        chain.deployed_address(),
        "driver must return the address the network reported"
    );
    Ok(())
}

#[tokio::test]
async fn zero_balance_does_not_block_deployment() -> anyhow::Result<()> {
    let (_dir, cfg) = config_with_artifact()?;
    let chain = MockChain::new().with_balance(U256::zero());

    let address = deploy::run(&chain, &cfg).await?;

    assert_eq!(Some(address), chain.deployed_address());
    Ok(())
}

#[tokio::test]
async fn smoke_test_writes_the_fixed_entry() -> anyhow::Result<()> {
    let (_dir, cfg) = config_with_artifact()?;
    let chain = MockChain::new();

    deploy::run(&chain, &cfg).await?;

    let writes = chain.recorded_writes();
    assert_eq!(writes.len(), 1, "exactly one smoke-test write expected");
    let entry = &writes[0];
    assert_eq!(entry.service_identifier, "DEPLOYMENT_TEST");
    assert_eq!(entry.action, "CREATE");
    assert_eq!(entry.entity_type, "Contract");
    assert_eq!(entry.entity_id, U256::one());
    assert_eq!(entry.actor_username, "system");
    assert_eq!(
        entry.change_description,
        "Contract deployed and tested successfully"
    );
    assert_eq!(entry.data_hash, format!("0x{}", "0".repeat(64)));
    assert_eq!(*entry, *constants::SMOKE_TEST_ENTRY);
    Ok(())
}

#[tokio::test]
async fn smoke_test_entry_is_readable_at_index_zero() -> anyhow::Result<()> {
    let (_dir, cfg) = config_with_artifact()?;
    let chain = MockChain::new();

    let address = deploy::run(&chain, &cfg).await?;

    let mut raw: serde_json::Value = serde_json::from_str(ARTIFACT_JSON)?;
    let abi: Abi = serde_json::from_value(raw["abi"].take())?;
    let contract = ContractHandle::new(address, abi);
    let log = chain.get_log(&contract, U256::zero()).await?;
    assert_eq!(log.log_id, U256::zero());
    assert_eq!(log.service_identifier, "DEPLOYMENT_TEST");
    assert_eq!(log.action, "CREATE");
    assert_eq!(log.actor_username, "system");
    Ok(())
}

#[tokio::test]
async fn inert_write_is_not_treated_as_a_failure() -> anyhow::Result<()> {
    let (_dir, cfg) = config_with_artifact()?;
    let chain = MockChain::new().inert_writes();

    let address = deploy::run(&chain, &cfg).await?;

    // The write was issued but changed nothing; the driver only prints the
    // two counts and must still succeed.
    assert_eq!(Some(address), chain.deployed_address());
    assert_eq!(chain.recorded_writes().len(), 1);
    assert_eq!(chain.stored_log_count(), 0);
    Ok(())
}

#[tokio::test]
async fn smoke_test_failure_is_non_fatal() -> anyhow::Result<()> {
    let (_dir, cfg) = config_with_artifact()?;
    let chain = MockChain::new().failing_reads();

    let address = deploy::run(&chain, &cfg).await?;

    assert_eq!(
        Some(address),
        chain.deployed_address(),
        "deployment must survive a failing smoke test"
    );
    Ok(())
}

#[tokio::test]
async fn missing_artifact_aborts_before_deployment() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cfg = make_config(&dir);
    let chain = MockChain::new();

    let err = deploy::run(&chain, &cfg).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Artifact(ArtifactError::NotFound { .. })
    ));
    assert_eq!(chain.deployed_address(), None, "nothing may be deployed");
    assert!(chain.recorded_writes().is_empty(), "nothing may be written");
    Ok(())
}

#[tokio::test]
async fn rejected_deployment_is_fatal() -> anyhow::Result<()> {
    let (_dir, cfg) = config_with_artifact()?;
    let chain = MockChain::new().rejecting_deploys();

    let err = deploy::run(&chain, &cfg).await.unwrap_err();

    assert!(matches!(err, Error::Chain(_)));
    assert!(chain.recorded_writes().is_empty());
    Ok(())
}
