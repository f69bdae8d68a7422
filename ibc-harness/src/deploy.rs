//! Deploys the IBC handler together with the logic modules it delegates to.

use ibc_harness_types::plan::{DeploymentPlan, LogicModule, HANDLER_ARTIFACT};
use ibc_harness_types::{Address, Signer};
use tracing::info;

use crate::context::ChainContext;
use crate::error::HarnessError;

/// A contract created by the harness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedModule {
    pub name: String,
    pub address: Address,
    pub constructor_args: Vec<Address>,
}

/// The deployed handler and the plan its logic modules came from.
///
/// The handler's constructor arguments are the logic module addresses in
/// slot order; `logic_address` relies on that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Handler {
    module: DeployedModule,
    plan: DeploymentPlan,
}

impl Handler {
    pub fn address(&self) -> Address {
        self.module.address
    }

    pub fn plan(&self) -> DeploymentPlan {
        self.plan
    }

    pub fn logic_addresses(&self) -> &[Address] {
        &self.module.constructor_args
    }

    pub fn logic_count(&self) -> usize {
        self.module.constructor_args.len()
    }

    /// Address the handler delegates `module`'s operations to, if the plan
    /// includes it.
    pub fn logic_address(&self, module: LogicModule) -> Option<Address> {
        self.module.constructor_args.get(module.slot()).copied()
    }
}

/// Deploys one contract and waits for it, tagging any failure with the
/// contract's name.
pub fn deploy_module<Ctx>(
    ctx: &mut Ctx,
    signer: &Signer,
    name: &str,
    constructor_args: Vec<Address>,
) -> Result<DeployedModule, HarnessError>
where
    Ctx: ChainContext,
{
    let address = ctx
        .deploy_contract(signer, name, &constructor_args)
        .map_err(|cause| HarnessError::DeploymentFailure {
            module: name.to_string(),
            cause,
        })?;

    info!("{name} address: {address}");

    Ok(DeployedModule {
        name: name.to_string(),
        address,
        constructor_args,
    })
}

/// Deploys every logic module of `plan` and then the handler referencing them.
///
/// Logic modules take no constructor arguments. Their addresses are collected
/// in plan order, which is handler slot order, and passed to the handler
/// constructor unchanged. The first failure aborts the run; the handler is
/// only deployed once every logic module exists.
pub fn deploy_stack<Ctx>(
    ctx: &mut Ctx,
    plan: &DeploymentPlan,
    signer: &Signer,
) -> Result<Handler, HarnessError>
where
    Ctx: ChainContext,
{
    info!(
        "deploying {} logic modules of the {plan} plan",
        plan.len()
    );

    let mut logic_addresses = Vec::with_capacity(plan.len());
    for module in plan.iter() {
        let deployed = deploy_module(ctx, signer, module.artifact_name(), Vec::new())?;
        logic_addresses.push(deployed.address);
    }

    let module = deploy_module(ctx, signer, HANDLER_ARTIFACT, logic_addresses)?;

    Ok(Handler {
        module,
        plan: *plan,
    })
}
