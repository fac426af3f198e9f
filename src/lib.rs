pub mod artifacts;
pub mod chain;
pub mod config;
pub mod constants;
pub mod deploy;

use thiserror::Error;

/// Anything that reaches this enum is fatal: the binaries log it and exit
/// non-zero. Smoke-test failures never get this far.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Artifact(#[from] artifacts::errors::ArtifactError),
    #[error(transparent)]
    Chain(#[from] chain::ChainError),
}
