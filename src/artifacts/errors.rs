use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("no artifact named {name} under {dir} (was the contract compiled?)")]
    NotFound { name: String, dir: PathBuf },
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed artifact {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact {name} has no deployable bytecode")]
    NoBytecode { name: String },
    #[error("artifact {path} holds non-hex bytecode")]
    BadBytecode {
        path: PathBuf,
        #[source]
        source: hex::FromHexError,
    },
}
