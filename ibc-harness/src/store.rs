//! Network-scoped storage for address records.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ibc_harness_types::identifiers::NetworkName;
use ibc_harness_types::record::AddressRecord;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::HarnessError;

/// Keeps the latest address record of each network.
///
/// A record is only ever replaced as a whole: `overwrite` discards whatever
/// was stored for the network before.
pub trait AddressStore {
    fn overwrite(&mut self, network: &NetworkName, record: &AddressRecord)
        -> Result<(), HarnessError>;

    fn load(&self, network: &NetworkName) -> Result<AddressRecord, HarnessError>;
}

/// Stores each network's record as `<dir>/<network>.env.sh`.
#[derive(Clone, Debug)]
pub struct EnvFileStore {
    dir: PathBuf,
}

impl EnvFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, network: &NetworkName) -> PathBuf {
        self.dir.join(format!("{network}.env.sh"))
    }
}

impl AddressStore for EnvFileStore {
    fn overwrite(
        &mut self,
        network: &NetworkName,
        record: &AddressRecord,
    ) -> Result<(), HarnessError> {
        let path = self.path_for(network);
        let persistence_failure = |cause| HarnessError::PersistenceFailure {
            path: path.display().to_string(),
            cause,
        };

        fs::create_dir_all(&self.dir).map_err(persistence_failure)?;
        write_atomic(&self.dir, &path, record.to_env_script().as_bytes())
            .map_err(persistence_failure)?;

        debug!("wrote {} entries to {}", record.len(), path.display());

        Ok(())
    }

    fn load(&self, network: &NetworkName) -> Result<AddressRecord, HarnessError> {
        let path = self.path_for(network);

        let script = fs::read_to_string(&path).map_err(|cause| HarnessError::PersistenceFailure {
            path: path.display().to_string(),
            cause,
        })?;

        AddressRecord::parse_env_script(&script).map_err(|cause| HarnessError::MalformedRecord {
            path: path.display().to_string(),
            cause,
        })
    }
}

/// Writes through a temporary file in `dir` that is synced and then renamed
/// over `path`, so readers see either the previous record or the new one. The
/// temporary file is removed if the rename fails.
fn write_atomic(dir: &Path, path: &Path, content: &[u8]) -> io::Result<()> {
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
