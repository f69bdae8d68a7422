use core::str::FromStr;

use super::impl_validated_identifier;
use crate::error::IdentifierError;
use crate::validate::validate_network_name;

/// Name of the in-process network of the contract toolchain.
const EPHEMERAL_NETWORK: &str = "hardhat";

/// Name of a configured chain target, e.g. `chain0`.
///
/// The name selects the endpoint an invocation talks to and keys the address
/// record written for that chain.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetworkName(String);

impl NetworkName {
    pub fn new(name: &str) -> Result<Self, IdentifierError> {
        Self::from_str(name)
    }

    /// The in-process network is created and destroyed on every run, so
    /// anything deployed to it is gone once the command exits.
    pub fn is_ephemeral(&self) -> bool {
        self.0 == EPHEMERAL_NETWORK
    }
}

impl_validated_identifier!(NetworkName, validate_network_name);
