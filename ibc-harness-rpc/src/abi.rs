//! ABI encoding of contract creation and of the calls issued by the harness.

use alloy_primitives::Bytes;
use alloy_sol_types::{sol, SolCall};
use ibc_harness_types::identifiers::{ClientType, PortId};
use ibc_harness_types::packet::PacketDescriptor;
use ibc_harness_types::Address;

sol! {
    struct Height {
        uint64 revision_number;
        uint64 revision_height;
    }

    function registerClient(string clientType, address client) external;

    function bindPort(string portId, address moduleAddress) external;

    function sendPacket(
        bytes message,
        string sourcePort,
        string sourceChannel,
        Height timeoutHeight,
        uint64 timeoutTimestamp
    ) external returns (uint64);
}

/// Creation payload for a contract whose constructor takes only addresses:
/// the bytecode followed by one left-padded word per argument.
pub fn encode_deployment(bytecode: &[u8], constructor_args: &[Address]) -> Vec<u8> {
    let mut data = Vec::with_capacity(bytecode.len() + 32 * constructor_args.len());
    data.extend_from_slice(bytecode);
    for arg in constructor_args {
        data.extend_from_slice(arg.into_word().as_slice());
    }
    data
}

pub fn encode_register_client(client_type: &ClientType, client: &Address) -> Vec<u8> {
    registerClientCall {
        clientType: client_type.as_str().to_string(),
        client: *client,
    }
    .abi_encode()
}

pub fn encode_bind_port(port_id: &PortId, module: &Address) -> Vec<u8> {
    bindPortCall {
        portId: port_id.as_str().to_string(),
        moduleAddress: *module,
    }
    .abi_encode()
}

/// Encodes `sendPacket` on the application. A timeout height that is not set
/// is passed as the zero height, and likewise for the timestamp.
pub fn encode_send_packet(packet: &PacketDescriptor) -> Vec<u8> {
    let (revision_number, revision_height) = packet.timeout_height.revision_pair();

    sendPacketCall {
        message: Bytes::copy_from_slice(&packet.payload),
        sourcePort: packet.source_port.as_str().to_string(),
        sourceChannel: packet.source_channel.as_str().to_string(),
        timeoutHeight: Height {
            revision_number,
            revision_height,
        },
        timeoutTimestamp: packet.timeout_timestamp.nanoseconds(),
    }
    .abi_encode()
}
