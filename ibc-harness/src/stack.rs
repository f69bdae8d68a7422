//! Runs a complete deployment: handler, light client, application and the
//! network's address record.

use ibc_harness_types::identifiers::{ClientVariant, NetworkName, PortId};
use ibc_harness_types::plan::DeploymentPlan;
use ibc_harness_types::record::{AddressRecord, RoleKey};
use ibc_harness_types::Signer;
use tracing::{error, info};

use crate::context::ChainContext;
use crate::deploy::{deploy_stack, Handler};
use crate::error::HarnessError;
use crate::store::AddressStore;
use crate::wiring::{bind_port, register_client, ClientBinding, PortBinding};

/// Contract artifact of the test application bound by default.
pub const MOCK_APP_ARTIFACT: &str = "IBCMockApp";

/// What `run_deploy_stack` deploys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackConfig {
    pub plan: DeploymentPlan,
    pub client: ClientVariant,
    pub port_id: PortId,
    pub app_module: String,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            plan: DeploymentPlan::MINIMAL,
            client: ClientVariant::Ibft2,
            port_id: PortId::mockapp(),
            app_module: MOCK_APP_ARTIFACT.to_string(),
        }
    }
}

/// Everything created by a successful `run_deploy_stack`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedStack {
    pub handler: Handler,
    pub client: ClientBinding,
    pub port: PortBinding,
    pub record: AddressRecord,
}

/// Deploys the handler with `config.plan`, registers the light client,
/// binds the application and finally overwrites `network`'s address record.
///
/// The record is written only once every on-chain step has succeeded. If
/// writing it fails, the record is logged in its persisted form before the
/// error is returned, since the contracts already exist on chain.
pub fn run_deploy_stack<Ctx, Store>(
    ctx: &mut Ctx,
    store: &mut Store,
    network: &NetworkName,
    config: &StackConfig,
    signer: &Signer,
) -> Result<DeployedStack, HarnessError>
where
    Ctx: ChainContext,
    Store: AddressStore,
{
    let handler = deploy_stack(ctx, &config.plan, signer)?;

    let client = register_client(
        ctx,
        &handler,
        &config.client.client_type(),
        config.client.artifact_name(),
        signer,
    )?;

    let port = bind_port(ctx, &handler, &config.port_id, &config.app_module, signer)?;

    let record = AddressRecord::new()
        .with(RoleKey::handler(), handler.address())
        .and_then(|r| r.with(config.client.role_key(), client.client_address))
        .and_then(|r| r.with(RoleKey::mockapp(), port.app_address))
        .map_err(|cause| HarnessError::MalformedRecord {
            path: network.to_string(),
            cause,
        })?;

    if let Err(e) = store.overwrite(network, &record) {
        error!(
            "failed to persist addresses for `{network}`: {e}; deployed contracts:\n{}",
            record.to_env_script()
        );
        return Err(e);
    }

    info!(
        "deployed {} stack on `{network}` with handler {}",
        config.plan,
        handler.address()
    );

    Ok(DeployedStack {
        handler,
        client,
        port,
        record,
    })
}
