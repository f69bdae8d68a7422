//! Submits packets through a deployed application.

use ibc_harness_types::packet::PacketDescriptor;
use ibc_harness_types::{Address, Signer, TxReceipt};
use tracing::{debug, info};

use crate::context::ChainContext;
use crate::error::HarnessError;

/// Sends `packet` through the application deployed at `app`.
///
/// The packet is checked locally before anything is submitted: a packet
/// without any timeout is rejected with [`HarnessError::InvalidPacket`].
/// Whether the channel exists is up to the handler; a rejection by the chain
/// surfaces as [`HarnessError::DispatchFailure`]. No retry is attempted.
pub fn send_packet<Ctx>(
    ctx: &mut Ctx,
    app: &Address,
    packet: &PacketDescriptor,
    signer: &Signer,
) -> Result<TxReceipt, HarnessError>
where
    Ctx: ChainContext,
{
    packet.validate_basic()?;

    info!("sending packet via {app}: {packet}");
    debug!("packet parameters: {packet:?}");

    let receipt = ctx
        .send_packet(signer, app, packet)
        .map_err(HarnessError::DispatchFailure)?;

    info!(
        "packet sent in tx {} at block {}",
        receipt.tx_hash, receipt.block_number
    );

    Ok(receipt)
}
