//! Defines the harness error types

use std::io;

use derive_more::From;
use displaydoc::Display;
use ibc_harness_types::error::{PacketError, RecordError};
use ibc_harness_types::identifiers::{ClientType, PortId};
use ibc_harness_types::B256;

/// Errors reported by a chain context.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum ChainError {
    /// execution reverted: `{reason}`
    Reverted { reason: String },
    /// transport error: `{description}`
    Transport { description: String },
    /// transaction `{tx_hash}` not confirmed after `{attempts}` receipt polls
    Unconfirmed { tx_hash: B256, attempts: u32 },
    /// node rejected `{method}` with code `{code}`: {message}
    Rejected {
        method: String,
        code: i64,
        message: String,
    },
    /// local signing key error: {description}
    SigningKey { description: String },
    /// missing contract artifact `{name}`
    MissingArtifact { name: String },
    /// invalid contract artifact `{name}`: {description}
    InvalidArtifact { name: String, description: String },
    /// deployment transaction `{tx_hash}` created no contract
    MissingContractAddress { tx_hash: B256 },
    /// invalid response from chain: `{description}`
    InvalidResponse { description: String },
}

impl ChainError {
    pub fn is_revert(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }
}

/// Top-level error of the deployment and dispatch flows.
///
/// Every variant is fatal to the current run: nothing is retried and no
/// partially completed deployment is repaired.
#[derive(Debug, Display, From)]
pub enum HarnessError {
    /// failed to deploy `{module}`: {cause}
    #[from(ignore)]
    DeploymentFailure { module: String, cause: ChainError },
    /// client type `{client_type}` is already registered on the handler
    #[from(ignore)]
    RegistrationConflict { client_type: ClientType },
    /// port `{port_id}` is already bound on the handler
    #[from(ignore)]
    PortAlreadyBound { port_id: PortId },
    /// failed to persist address record to `{path}`: {cause}
    #[from(ignore)]
    PersistenceFailure { path: String, cause: io::Error },
    /// packet dispatch failed: {0}
    #[from(ignore)]
    DispatchFailure(ChainError),
    /// invalid packet: {0}
    InvalidPacket(PacketError),
    /// malformed address record `{path}`: {cause}
    #[from(ignore)]
    MalformedRecord { path: String, cause: RecordError },
    /// address record has no `{role}` entry
    #[from(ignore)]
    MissingRole { role: String },
    /// chain error: {0}
    Chain(ChainError),
}

impl std::error::Error for ChainError {}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DeploymentFailure { cause, .. } => Some(cause),
            Self::PersistenceFailure { cause, .. } => Some(cause),
            Self::DispatchFailure(e) | Self::Chain(e) => Some(e),
            Self::InvalidPacket(e) => Some(e),
            Self::MalformedRecord { cause, .. } => Some(cause),
            Self::RegistrationConflict { .. }
            | Self::PortAlreadyBound { .. }
            | Self::MissingRole { .. } => None,
        }
    }
}
