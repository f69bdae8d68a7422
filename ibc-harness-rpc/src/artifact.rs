//! Compiled contract artifacts, as written by the Hardhat/Truffle toolchains.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use alloy_primitives::Bytes;
use ibc_harness::ChainError;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ArtifactFile {
    bytecode: Bytes,
}

/// Looks up creation bytecode by contract name under a root directory.
///
/// `<Name>.json` is searched for recursively, so both a flat directory and
/// Hardhat's `contracts/<File>.sol/<Name>.json` layout work. Loaded bytecode
/// is cached for the lifetime of the store.
#[derive(Debug)]
pub struct ArtifactStore {
    root: PathBuf,
    cache: HashMap<String, Bytes>,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    /// Returns the creation bytecode of contract `name`.
    pub fn bytecode(&mut self, name: &str) -> Result<Bytes, ChainError> {
        if let Some(bytecode) = self.cache.get(name) {
            return Ok(bytecode.clone());
        }

        let path = find_file(&self.root, &format!("{name}.json")).ok_or_else(|| {
            ChainError::MissingArtifact {
                name: name.to_string(),
            }
        })?;
        debug!("loading artifact {name} from {}", path.display());

        let invalid = |description: String| ChainError::InvalidArtifact {
            name: name.to_string(),
            description,
        };

        let content = fs::read_to_string(&path).map_err(|e| invalid(e.to_string()))?;
        let artifact: ArtifactFile =
            serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;

        if artifact.bytecode.is_empty() {
            return Err(invalid(
                "empty bytecode; abstract contracts and interfaces cannot be deployed".to_string(),
            ));
        }

        self.cache
            .insert(name.to_string(), artifact.bytecode.clone());

        Ok(artifact.bytecode)
    }
}

/// Depth-first search for a file called `file_name`, visiting entries in name
/// order so repeated lookups resolve to the same file.
fn find_file(dir: &Path, file_name: &str) -> Option<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    let candidate = dir.join(file_name);
    if candidate.is_file() {
        return Some(candidate);
    }

    entries
        .iter()
        .filter(|path| path.is_dir())
        .find_map(|path| find_file(path, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_artifact(dir: &Path, relative: &str, bytecode: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            path,
            format!(r#"{{"contractName":"x","abi":[],"bytecode":"{bytecode}"}}"#),
        )
        .unwrap();
    }

    #[test]
    fn finds_artifacts_in_hardhat_layout() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "contracts/core/OwnableIBCHandler.sol/OwnableIBCHandler.json",
            "0x6080",
        );
        write_artifact(
            dir.path(),
            "contracts/core/OwnableIBCHandler.sol/OwnableIBCHandler.dbg.json",
            "0x00",
        );

        let mut store = ArtifactStore::new(dir.path());

        assert_eq!(
            store.bytecode("OwnableIBCHandler").unwrap().as_ref(),
            &[0x60, 0x80]
        );
    }

    #[test]
    fn unknown_contract_is_a_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ArtifactStore::new(dir.path());

        assert_eq!(
            store.bytecode("IBCClient"),
            Err(ChainError::MissingArtifact {
                name: "IBCClient".to_string()
            })
        );
    }

    #[test]
    fn interface_artifact_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "IIBCModule.json", "0x");
        let mut store = ArtifactStore::new(dir.path());

        assert!(matches!(
            store.bytecode("IIBCModule"),
            Err(ChainError::InvalidArtifact { .. })
        ));
    }

    #[test]
    fn cached_bytecode_survives_file_removal() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "IBCMockApp.json", "0x60");
        let mut store = ArtifactStore::new(dir.path());

        store.bytecode("IBCMockApp").unwrap();
        fs::remove_file(dir.path().join("IBCMockApp.json")).unwrap();

        assert_eq!(store.bytecode("IBCMockApp").unwrap().as_ref(), &[0x60]);
    }
}
