use std::collections::BTreeMap;
use std::io;

use ibc_harness::store::AddressStore;
use ibc_harness::HarnessError;
use ibc_harness_types::identifiers::NetworkName;
use ibc_harness_types::record::AddressRecord;

/// Address records kept in memory. When `fail_writes` is set every
/// `overwrite` fails as an unwritable file would.
#[derive(Clone, Debug, Default)]
pub struct MockAddressStore {
    pub records: BTreeMap<NetworkName, AddressRecord>,
    pub writes: usize,
    pub fail_writes: bool,
}

impl MockAddressStore {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn get(&self, network: &NetworkName) -> Option<&AddressRecord> {
        self.records.get(network)
    }

    fn location(network: &NetworkName) -> String {
        format!("memory://{network}")
    }
}

impl AddressStore for MockAddressStore {
    fn overwrite(
        &mut self,
        network: &NetworkName,
        record: &AddressRecord,
    ) -> Result<(), HarnessError> {
        if self.fail_writes {
            return Err(HarnessError::PersistenceFailure {
                path: Self::location(network),
                cause: io::Error::new(io::ErrorKind::PermissionDenied, "read-only store"),
            });
        }

        self.writes += 1;
        self.records.insert(network.clone(), record.clone());
        Ok(())
    }

    fn load(&self, network: &NetworkName) -> Result<AddressRecord, HarnessError> {
        self.records
            .get(network)
            .cloned()
            .ok_or_else(|| HarnessError::PersistenceFailure {
                path: Self::location(network),
                cause: io::Error::new(io::ErrorKind::NotFound, "no record for network"),
            })
    }
}
