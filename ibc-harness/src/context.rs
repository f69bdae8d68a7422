//! The chain a harness invocation runs against.

use ibc_harness_types::identifiers::{ClientType, PortId};
use ibc_harness_types::packet::PacketDescriptor;
use ibc_harness_types::{Address, Signer, TxReceipt};

use crate::error::ChainError;

/// Capabilities the harness needs from a chain.
///
/// Every method submits one transaction signed by `signer` and blocks until
/// the chain has confirmed it, so an `Ok` result means the state change is
/// included in a block. Implementations decide how long they are willing to
/// wait and report [`ChainError::Unconfirmed`] when they give up.
pub trait ChainContext {
    /// Deploys the contract artifact `name` with the given address-typed
    /// constructor arguments, in order, and returns the created contract's
    /// address.
    fn deploy_contract(
        &mut self,
        signer: &Signer,
        name: &str,
        constructor_args: &[Address],
    ) -> Result<Address, ChainError>;

    /// Calls `registerClient(client_type, client)` on the handler. The handler
    /// reverts if `client_type` is already registered.
    fn register_client(
        &mut self,
        signer: &Signer,
        handler: &Address,
        client_type: &ClientType,
        client: &Address,
    ) -> Result<TxReceipt, ChainError>;

    /// Calls `bindPort(port_id, module)` on the handler. The handler reverts
    /// if `port_id` is already bound.
    fn bind_port(
        &mut self,
        signer: &Signer,
        handler: &Address,
        port_id: &PortId,
        module: &Address,
    ) -> Result<TxReceipt, ChainError>;

    /// Calls `sendPacket` on the application at `app`, which forwards the
    /// packet to the handler it was deployed against.
    fn send_packet(
        &mut self,
        signer: &Signer,
        app: &Address,
        packet: &PacketDescriptor,
    ) -> Result<TxReceipt, ChainError>;
}
