use std::{env, path::PathBuf};

use ethers_core::types::Address;
use thiserror::Error;

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("{var} holds an invalid address: {value}")]
    InvalidAddress { var: &'static str, value: String },
}

/// Everything the scripts read from the surrounding environment, resolved
/// up front so the driver itself takes no ambient input.
#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub private_key: String,
    pub artifacts_dir: PathBuf,
    pub contract_address: Option<Address>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let rpc_url =
            env::var("BUILDBEAR_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
        // The private key is the only signer source; without it there is no
        // account to deploy from.
        let private_key =
            env::var("PRIVATE_KEY").map_err(|_| ConfigError::MissingVar("PRIVATE_KEY"))?;
        let artifacts_dir = env::var("ARTIFACTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACTS_DIR));
        let contract_address = match env::var("CONTRACT_ADDRESS") {
            Ok(raw) if !raw.trim().is_empty() => {
                Some(parse_address("CONTRACT_ADDRESS", raw.trim())?)
            }
            _ => None,
        };

        Ok(Self {
            rpc_url,
            private_key,
            artifacts_dir,
            contract_address,
        })
    }
}

fn parse_address(var: &'static str, value: &str) -> Result<Address, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidAddress {
        var,
        value: value.to_string(),
    })
}
