use activity_logger_deploy::{chain::rpc::HttpChainClient, config::Config, deploy, Error};

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(e) = run().await {
        log::error!("deployment failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let cfg = Config::from_env()?;
    let client = HttpChainClient::connect(&cfg).await?;
    deploy::run(&client, &cfg).await?;
    Ok(())
}
