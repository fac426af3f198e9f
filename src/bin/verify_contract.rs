use activity_logger_deploy::{
    chain::{rpc::HttpChainClient, ChainClient, ContractHandle},
    config::Config,
};
use ethers_core::abi::parse_abi;

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(e) = run().await {
        log::error!("contract check failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::from_env()?;

    println!("Testing contract connection...");
    println!("RPC URL: {}", cfg.rpc_url);
    let address = cfg
        .contract_address
        .ok_or("CONTRACT_ADDRESS is not set; run the deploy script first")?;
    println!("Contract address: {address:?}");

    let client = HttpChainClient::connect(&cfg).await?;
    println!("Account: {:?}", client.signer());

    // logCount alone is enough to prove the address points at a live
    // ActivityLogger.
    let abi = parse_abi(&["function logCount() external view returns (uint256)"])?;
    let contract = ContractHandle::new(address, abi);

    match client.log_count(&contract).await {
        Ok(count) => println!("Contract responding. Log count: {count}"),
        Err(e) => {
            println!("Contract error: {e}");
            println!("The CONTRACT_ADDRESS in .env may be outdated; redeploy and update it.");
            std::process::exit(1);
        }
    }
    Ok(())
}
