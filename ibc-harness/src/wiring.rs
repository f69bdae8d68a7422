//! Registers light clients and binds applications on a deployed handler.

use ibc_harness_types::identifiers::{ClientType, PortId};
use ibc_harness_types::{Address, Signer};
use tracing::info;

use crate::context::ChainContext;
use crate::deploy::{deploy_module, Handler};
use crate::error::HarnessError;

/// A light client registered on a handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientBinding {
    pub client_type: ClientType,
    pub client_address: Address,
}

/// An application bound to a port of a handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortBinding {
    pub port_id: PortId,
    pub app_address: Address,
}

/// Deploys the light client `client_module` against `handler` and registers
/// it under `client_type`.
///
/// The handler owns the uniqueness of client types, so a revert of the
/// registration call is reported as [`HarnessError::RegistrationConflict`].
/// Registering several distinct client types on one handler is supported.
pub fn register_client<Ctx>(
    ctx: &mut Ctx,
    handler: &Handler,
    client_type: &ClientType,
    client_module: &str,
    signer: &Signer,
) -> Result<ClientBinding, HarnessError>
where
    Ctx: ChainContext,
{
    let client = deploy_module(ctx, signer, client_module, vec![handler.address()])?;

    ctx.register_client(signer, &handler.address(), client_type, &client.address)
        .map_err(|e| {
            if e.is_revert() {
                HarnessError::RegistrationConflict {
                    client_type: client_type.clone(),
                }
            } else {
                HarnessError::Chain(e)
            }
        })?;

    info!("registered {client_module} as client type {client_type}");

    Ok(ClientBinding {
        client_type: client_type.clone(),
        client_address: client.address,
    })
}

/// Deploys the application `app_module` against `handler` and binds it to
/// `port_id`.
///
/// A revert of the binding call is reported as
/// [`HarnessError::PortAlreadyBound`].
pub fn bind_port<Ctx>(
    ctx: &mut Ctx,
    handler: &Handler,
    port_id: &PortId,
    app_module: &str,
    signer: &Signer,
) -> Result<PortBinding, HarnessError>
where
    Ctx: ChainContext,
{
    let app = deploy_module(ctx, signer, app_module, vec![handler.address()])?;

    ctx.bind_port(signer, &handler.address(), port_id, &app.address)
        .map_err(|e| {
            if e.is_revert() {
                HarnessError::PortAlreadyBound {
                    port_id: port_id.clone(),
                }
            } else {
                HarnessError::Chain(e)
            }
        })?;

    info!("bound {app_module} to port {port_id}");

    Ok(PortBinding {
        port_id: port_id.clone(),
        app_address: app.address,
    })
}
