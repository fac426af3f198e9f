use ethers_core::types::U256;
use once_cell::sync::Lazy;

use crate::chain::LogActivityArgs;

pub const CONTRACT_NAME: &str = "ActivityLogger";

// One confirmation is enough on the sandbox networks these scripts target.
pub const CONFIRMATIONS: usize = 1;

// Printed in the operator instructions; never called from here.
pub const SERVICE_STATUS_URL: &str = "http://localhost:9005/blockchain/status";
pub const SERVICE_DOCS_URL: &str = "http://localhost:9005/docs";
pub const EXPLORER_ADDRESS_URL: &str =
    "https://explorer.buildbear.io/intimate-warmachine-5f7e8f8e/address";

// The entry written by the post-deployment smoke test. The data hash is the
// zero value for the contract's string-typed hash field.
pub static SMOKE_TEST_ENTRY: Lazy<LogActivityArgs> = Lazy::new(|| LogActivityArgs {
    service_identifier: "DEPLOYMENT_TEST".to_string(),
    action: "CREATE".to_string(),
    entity_type: "Contract".to_string(),
    entity_id: U256::one(),
    actor_username: "system".to_string(),
    change_description: "Contract deployed and tested successfully".to_string(),
    data_hash: format!("0x{}", "0".repeat(64)),
});
