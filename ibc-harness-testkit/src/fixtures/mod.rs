//! Builders and dummies for tests.

use std::collections::BTreeMap;

use alloy_primitives::address;
use ibc_harness::ChainError;
use ibc_harness_types::identifiers::{ChannelId, PortId};
use ibc_harness_types::packet::PacketDescriptor;
use ibc_harness_types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_harness_types::{Address, Signer};
use typed_builder::TypedBuilder;

use crate::chain::MockChain;

/// Returns the first development account of a local Hardhat or Besu network,
/// for testing purposes only!
pub fn dummy_signer() -> Signer {
    Signer::new(address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"))
}

/// Configuration of a [`MockChain`].
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = MockChain))]
pub struct MockChainConfig {
    #[builder(default = vec![dummy_signer().address()])]
    pub accounts: Vec<Address>,
    #[builder(default = 0)]
    pub block_number: u64,
    /// Contract names whose deployment fails, with the error they fail with.
    #[builder(default)]
    pub failing_deployments: BTreeMap<String, ChainError>,
}

impl From<MockChainConfig> for MockChain {
    fn from(config: MockChainConfig) -> Self {
        MockChain {
            accounts: config.accounts,
            block_number: config.block_number,
            next_address: 0,
            contracts: BTreeMap::new(),
            deployments: Vec::new(),
            sent_packets: Vec::new(),
            failing_deployments: config.failing_deployments,
            failing_calls: None,
        }
    }
}

/// Configuration of a [`PacketDescriptor`]; defaults to the packet the
/// `send-packet` command builds for `hello` with timeout height 1000.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = PacketDescriptor))]
pub struct PacketConfig {
    #[builder(default = b"hello".to_vec())]
    pub payload: Vec<u8>,
    #[builder(default = PortId::mockapp())]
    pub source_port: PortId,
    #[builder(default = ChannelId::zero())]
    pub source_channel: ChannelId,
    #[builder(default = TimeoutHeight::at_revision_height(1000))]
    pub timeout_height: TimeoutHeight,
    #[builder(default = TimeoutTimestamp::Never)]
    pub timeout_timestamp: TimeoutTimestamp,
}

impl From<PacketConfig> for PacketDescriptor {
    fn from(config: PacketConfig) -> Self {
        PacketDescriptor {
            payload: config.payload,
            source_port: config.source_port,
            source_channel: config.source_channel,
            timeout_height: config.timeout_height,
            timeout_timestamp: config.timeout_timestamp,
        }
    }
}
