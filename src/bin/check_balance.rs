use activity_logger_deploy::{
    chain::{rpc::HttpChainClient, ChainClient},
    config::Config,
    Error,
};
use ethers_core::utils::format_ether;

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(e) = run().await {
        log::error!("balance check failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let cfg = Config::from_env()?;
    let client = HttpChainClient::connect(&cfg).await?;

    let account = client.signer();
    let balance = client.balance_of(account).await?;
    let gas_price = client.gas_price().await?;

    println!("Account:   {account:?}");
    println!("Balance:   {} ETH", format_ether(balance));
    println!("Gas price: {gas_price}");
    Ok(())
}
