//! The address record: which contract plays which role on a network.
//!
//! Records are rendered as a shell script of `export KEY=value` lines so the
//! relayer configuration and e2e scripts can `source` them directly.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use alloy_primitives::Address;

use crate::error::{IdentifierError, RecordError};
use crate::validate::validate_role_key;

const HANDLER_ROLE: &str = "IBC_HANDLER";
const IBFT2_CLIENT_ROLE: &str = "IBFT2_CLIENT";
const QBFT_CLIENT_ROLE: &str = "QBFT_CLIENT";
const MOCKAPP_ROLE: &str = "IBC_MOCKAPP";

/// Logical role of a deployed contract, used as the variable name in the
/// address record.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoleKey(String);

impl RoleKey {
    pub fn new(key: &str) -> Result<Self, IdentifierError> {
        Self::from_str(key)
    }

    pub fn handler() -> Self {
        Self(HANDLER_ROLE.to_string())
    }

    pub fn ibft2_client() -> Self {
        Self(IBFT2_CLIENT_ROLE.to_string())
    }

    pub fn qbft_client() -> Self {
        Self(QBFT_CLIENT_ROLE.to_string())
    }

    pub fn mockapp() -> Self {
        Self(MOCKAPP_ROLE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RoleKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoleKey {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_role_key(s).map(|_| Self(s.to_string()))
    }
}

/// Role to address mapping produced by one deployment run.
///
/// Entries keep their insertion order, which is the order lines appear in the
/// rendered script. Each role appears at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressRecord {
    entries: Vec<(RoleKey, Address)>,
}

impl AddressRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: RoleKey, address: Address) -> Result<(), RecordError> {
        if self.get(&role).is_some() {
            return Err(RecordError::DuplicateRole {
                role: role.to_string(),
            });
        }
        self.entries.push((role, address));
        Ok(())
    }

    /// Builder-style [`AddressRecord::insert`].
    pub fn with(mut self, role: RoleKey, address: Address) -> Result<Self, RecordError> {
        self.insert(role, address)?;
        Ok(self)
    }

    pub fn get(&self, role: &RoleKey) -> Option<Address> {
        self.entries
            .iter()
            .find(|(key, _)| key == role)
            .map(|(_, address)| *address)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoleKey, &Address)> {
        self.entries.iter().map(|(role, address)| (role, address))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the record as `export KEY=value` lines, one per entry.
    pub fn to_env_script(&self) -> String {
        self.entries
            .iter()
            .map(|(role, address)| format!("export {role}={address}\n"))
            .collect()
    }

    /// Parses a rendered record. Blank lines and `#` comments are skipped and
    /// the `export ` prefix is optional.
    pub fn parse_env_script(script: &str) -> Result<Self, RecordError> {
        let mut record = Self::new();

        for (index, raw_line) in script.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let assignment = line
                .strip_prefix("export ")
                .map(str::trim_start)
                .unwrap_or(line);
            let (key, value) =
                assignment
                    .split_once('=')
                    .ok_or_else(|| RecordError::MalformedLine {
                        line: line_number,
                        description: "expected KEY=value".to_string(),
                    })?;

            let role = RoleKey::from_str(key.trim())?;
            let value = value.trim().trim_matches('"');
            let address =
                Address::from_str(value).map_err(|e| RecordError::MalformedLine {
                    line: line_number,
                    description: format!("invalid address `{value}`: {e}"),
                })?;

            record.insert(role, address)?;
        }

        Ok(record)
    }
}
