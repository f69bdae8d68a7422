use std::collections::{BTreeMap, BTreeSet};

use ibc_harness_types::identifiers::{ChannelId, PortId};
use ibc_harness_types::plan::LogicModule;
use ibc_harness_types::Address;

/// Contracts the mock chain knows how to emulate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockContract {
    Logic(LogicModule),
    Handler(HandlerState),
    /// A light client deployed against `handler`.
    Client { name: String, handler: Address },
    /// An application deployed against `handler`.
    App { name: String, handler: Address },
}

impl MockContract {
    pub fn as_handler(&self) -> Option<&HandlerState> {
        match self {
            Self::Handler(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_handler_mut(&mut self) -> Option<&mut HandlerState> {
        match self {
            Self::Handler(state) => Some(state),
            _ => None,
        }
    }
}

/// Storage of a deployed handler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HandlerState {
    pub logic_modules: Vec<Address>,
    pub clients: BTreeMap<String, Address>,
    pub ports: BTreeMap<PortId, Address>,
    pub open_channels: BTreeSet<(PortId, ChannelId)>,
    pub next_sequence_send: BTreeMap<(PortId, ChannelId), u64>,
}

impl HandlerState {
    pub fn new(logic_modules: Vec<Address>) -> Self {
        Self {
            logic_modules,
            ..Default::default()
        }
    }

    pub fn client(&self, client_type: &str) -> Option<Address> {
        self.clients.get(client_type).copied()
    }

    pub fn port_owner(&self, port_id: &PortId) -> Option<Address> {
        self.ports.get(port_id).copied()
    }

    pub fn is_channel_open(&self, port_id: &PortId, channel_id: &ChannelId) -> bool {
        self.open_channels
            .contains(&(port_id.clone(), channel_id.clone()))
    }

    /// Returns the sequence for the next packet on the channel and advances it.
    pub(crate) fn take_sequence(&mut self, port_id: &PortId, channel_id: &ChannelId) -> u64 {
        let next = self
            .next_sequence_send
            .entry((port_id.clone(), channel_id.clone()))
            .or_insert(1);
        let sequence = *next;
        *next += 1;
        sequence
    }
}
