use std::{
    fs::File,
    path::{Path, PathBuf},
};

use ethers_core::{abi::Abi, types::Bytes};
use serde::Deserialize;

pub mod errors;

use errors::ArtifactError;

/// A compiled contract as found in the build output: everything needed to
/// submit a creation transaction and talk to the result.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
struct RawArtifact {
    abi: Abi,
    bytecode: String,
}

/// Looks up `<name>.json` under the build output directory and parses it.
pub fn find_artifact(dir: &Path, name: &str) -> Result<ContractArtifact, ArtifactError> {
    let file_name = format!("{name}.json");
    let path = locate(dir, &file_name).ok_or_else(|| ArtifactError::NotFound {
        name: name.to_string(),
        dir: dir.to_path_buf(),
    })?;
    load_artifact(&path, name)
}

// Hardhat nests artifacts one directory per source file, so the exact depth
// of `<name>.json` is not known up front. Debug artifacts end in `.dbg.json`
// and therefore never match.
fn locate(dir: &Path, file_name: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Some(found) = locate(&path, file_name) {
                return Some(found);
            }
        } else if path.file_name().and_then(|f| f.to_str()) == Some(file_name) {
            return Some(path);
        }
    }
    None
}

fn load_artifact(path: &Path, name: &str) -> Result<ContractArtifact, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawArtifact =
        serde_json::from_reader(file).map_err(|source| ArtifactError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    let stripped = raw.bytecode.trim_start_matches("0x");
    if stripped.is_empty() {
        // Interface-only artifacts carry an empty "0x" bytecode field.
        return Err(ArtifactError::NoBytecode {
            name: name.to_string(),
        });
    }
    let bytecode = hex::decode(stripped).map_err(|source| ArtifactError::BadBytecode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ContractArtifact {
        name: name.to_string(),
        abi: raw.abi,
        bytecode: bytecode.into(),
    })
}
