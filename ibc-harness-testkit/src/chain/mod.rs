//! An in-memory chain emulating the IBC contracts.

mod contract;

use std::collections::BTreeMap;

use ibc_harness::stack::MOCK_APP_ARTIFACT;
use ibc_harness::{ChainContext, ChainError};
use ibc_harness_types::identifiers::{ChannelId, ClientType, ClientVariant, PortId};
use ibc_harness_types::packet::PacketDescriptor;
use ibc_harness_types::plan::{DeploymentPlan, LogicModule, HANDLER_ARTIFACT};
use ibc_harness_types::{Address, Signer, TxReceipt, B256};
use tracing::debug;

pub use self::contract::{HandlerState, MockContract};

/// A contract creation observed by the mock chain, successful or not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentAttempt {
    pub name: String,
    pub constructor_args: Vec<Address>,
    pub address: Option<Address>,
}

/// A packet accepted by a handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentPacket {
    pub app: Address,
    pub handler: Address,
    pub sequence: u64,
    pub packet: PacketDescriptor,
}

/// A chain holding emulated handler, client and application contracts.
///
/// Transactions are mined immediately, one block each. Reverts mirror the
/// conditions under which the real contracts revert.
#[derive(Debug)]
pub struct MockChain {
    pub(crate) accounts: Vec<Address>,
    pub(crate) block_number: u64,
    pub(crate) next_address: u64,
    pub(crate) contracts: BTreeMap<Address, MockContract>,
    pub(crate) deployments: Vec<DeploymentAttempt>,
    pub(crate) sent_packets: Vec<SentPacket>,
    pub(crate) failing_deployments: BTreeMap<String, ChainError>,
    pub(crate) failing_calls: Option<ChainError>,
}

impl Default for MockChain {
    fn default() -> Self {
        crate::fixtures::MockChainConfig::builder().build()
    }
}

impl MockChain {
    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    /// Every contract creation submitted so far, in submission order.
    pub fn deployments(&self) -> &[DeploymentAttempt] {
        &self.deployments
    }

    pub fn sent_packets(&self) -> &[SentPacket] {
        &self.sent_packets
    }

    pub fn contract(&self, address: &Address) -> Option<&MockContract> {
        self.contracts.get(address)
    }

    pub fn handler(&self, address: &Address) -> Option<&HandlerState> {
        self.contracts.get(address).and_then(MockContract::as_handler)
    }

    /// Makes every later deployment of `name` fail with `error`.
    pub fn fail_deployment(&mut self, name: &str, error: ChainError) {
        self.failing_deployments.insert(name.to_string(), error);
    }

    /// Makes every later contract call fail with `error` before reaching the
    /// contract. Deployments are unaffected.
    pub fn fail_calls(&mut self, error: ChainError) {
        self.failing_calls = Some(error);
    }

    /// Opens `channel_id` on `port_id` of the handler, as a completed channel
    /// handshake would.
    pub fn open_channel(
        &mut self,
        handler: &Address,
        port_id: PortId,
        channel_id: ChannelId,
    ) -> Result<(), ChainError> {
        let state = self.handler_mut(handler)?;
        if state.port_owner(&port_id).is_none() {
            return Err(revert("port is not bound"));
        }
        state.open_channels.insert((port_id, channel_id));
        Ok(())
    }

    fn handler_mut(&mut self, address: &Address) -> Result<&mut HandlerState, ChainError> {
        self.contracts
            .get_mut(address)
            .and_then(MockContract::as_handler_mut)
            .ok_or_else(|| revert("call to non-handler contract"))
    }

    fn check_signer(&self, signer: &Signer) -> Result<(), ChainError> {
        if self.accounts.contains(&signer.address()) {
            Ok(())
        } else {
            Err(ChainError::Rejected {
                method: "eth_sendTransaction".to_string(),
                code: -32000,
                message: format!("unknown account {signer}"),
            })
        }
    }

    /// Checks that a call can be submitted at all.
    fn check_call(&self, signer: &Signer) -> Result<(), ChainError> {
        self.check_signer(signer)?;
        match &self.failing_calls {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn mine(&mut self, contract_address: Option<Address>) -> TxReceipt {
        self.block_number += 1;

        TxReceipt {
            tx_hash: B256::left_padding_from(&self.block_number.to_be_bytes()),
            block_number: self.block_number,
            contract_address,
        }
    }

    fn allocate_address(&mut self) -> Address {
        self.next_address += 1;

        let mut bytes = [0u8; 20];
        bytes[0] = 0xc0;
        bytes[12..].copy_from_slice(&self.next_address.to_be_bytes());
        Address::from(bytes)
    }

    /// Runs the constructor of `name`, returning the contract it creates.
    fn construct(&self, name: &str, args: &[Address]) -> Result<MockContract, ChainError> {
        if let Some(module) = LogicModule::from_artifact_name(name) {
            return Ok(MockContract::Logic(module));
        }

        if name == HANDLER_ARTIFACT {
            return self.construct_handler(args);
        }

        let is_client = ClientVariant::ALL
            .iter()
            .any(|variant| variant.artifact_name() == name);

        if is_client || name == MOCK_APP_ARTIFACT {
            let handler = match args {
                [handler] if self.handler(handler).is_some() => *handler,
                _ => return Err(revert("constructor expects the IBC handler address")),
            };
            let name = name.to_string();
            return Ok(if is_client {
                MockContract::Client { name, handler }
            } else {
                MockContract::App { name, handler }
            });
        }

        Err(ChainError::MissingArtifact {
            name: name.to_string(),
        })
    }

    /// The handler constructor takes the logic modules of one of the known
    /// plans, each at its slot.
    fn construct_handler(&self, args: &[Address]) -> Result<MockContract, ChainError> {
        let modules: Vec<Option<LogicModule>> = args
            .iter()
            .map(|address| match self.contracts.get(address) {
                Some(MockContract::Logic(module)) => Some(*module),
                _ => None,
            })
            .collect();

        let matches_plan = DeploymentPlan::ALL.iter().any(|plan| {
            plan.len() == modules.len()
                && plan
                    .iter()
                    .zip(&modules)
                    .all(|(expected, actual)| Some(expected) == *actual)
        });

        if !matches_plan {
            return Err(revert("logic modules do not match the handler slots"));
        }

        Ok(MockContract::Handler(HandlerState::new(args.to_vec())))
    }
}

fn revert(reason: &str) -> ChainError {
    ChainError::Reverted {
        reason: reason.to_string(),
    }
}

impl ChainContext for MockChain {
    fn deploy_contract(
        &mut self,
        signer: &Signer,
        name: &str,
        constructor_args: &[Address],
    ) -> Result<Address, ChainError> {
        self.check_signer(signer)?;

        let outcome = match self.failing_deployments.get(name) {
            Some(error) => Err(error.clone()),
            None => self.construct(name, constructor_args),
        };

        let result = outcome.map(|contract| {
            let address = self.allocate_address();
            self.contracts.insert(address, contract);
            self.mine(Some(address));
            address
        });

        self.deployments.push(DeploymentAttempt {
            name: name.to_string(),
            constructor_args: constructor_args.to_vec(),
            address: result.as_ref().ok().copied(),
        });

        debug!("mock deployment of {name}: {result:?}");

        result
    }

    fn register_client(
        &mut self,
        signer: &Signer,
        handler: &Address,
        client_type: &ClientType,
        client: &Address,
    ) -> Result<TxReceipt, ChainError> {
        self.check_call(signer)?;

        let state = self.handler_mut(handler)?;
        if state.client(client_type.as_str()).is_some() {
            return Err(revert("clientImpl already exists"));
        }
        state
            .clients
            .insert(client_type.as_str().to_string(), *client);

        Ok(self.mine(None))
    }

    fn bind_port(
        &mut self,
        signer: &Signer,
        handler: &Address,
        port_id: &PortId,
        module: &Address,
    ) -> Result<TxReceipt, ChainError> {
        self.check_call(signer)?;

        let state = self.handler_mut(handler)?;
        if state.port_owner(port_id).is_some() {
            return Err(revert("port is already bound"));
        }
        state.ports.insert(port_id.clone(), *module);

        Ok(self.mine(None))
    }

    fn send_packet(
        &mut self,
        signer: &Signer,
        app: &Address,
        packet: &PacketDescriptor,
    ) -> Result<TxReceipt, ChainError> {
        self.check_call(signer)?;

        let handler = match self.contracts.get(app) {
            Some(MockContract::App { handler, .. }) => *handler,
            _ => return Err(revert("call to non-application contract")),
        };

        let state = self.handler_mut(&handler)?;
        if state.port_owner(&packet.source_port) != Some(*app) {
            return Err(revert("caller does not own the source port"));
        }
        if !state.is_channel_open(&packet.source_port, &packet.source_channel) {
            return Err(revert("channel not found"));
        }
        if !packet.timeout_height.is_set() && !packet.timeout_timestamp.is_set() {
            return Err(revert("timeout height and timestamp cannot both be 0"));
        }

        let sequence = state.take_sequence(&packet.source_port, &packet.source_channel);

        self.sent_packets.push(SentPacket {
            app: *app,
            handler,
            sequence,
            packet: packet.clone(),
        });

        Ok(self.mine(None))
    }
}
