use alloy_primitives::utils::format_ether;
use anyhow::Context;
use ibc_harness::dispatch::send_packet;
use ibc_harness::stack::{run_deploy_stack, StackConfig, MOCK_APP_ARTIFACT};
use ibc_harness::store::{AddressStore, EnvFileStore};
use ibc_harness::HarnessError;
use ibc_harness_rpc::{ArtifactStore, JsonRpcClient, RpcContext};
use ibc_harness_types::packet::PacketDescriptor;
use ibc_harness_types::record::{AddressRecord, RoleKey};
use ibc_harness_types::{Address, Signer};
use tracing::{info, warn};

use crate::cli::{DeployStackArgs, GlobalArgs, PersistArgs, SendPacketArgs};
use crate::config::HarnessConfig;

/// Opens the configured network and resolves the account to sign with.
fn connect(config: &HarnessConfig, global: &GlobalArgs) -> anyhow::Result<(RpcContext, Signer)> {
    let network = config.network(&global.network)?;
    if global.network.is_ephemeral() {
        warn!(
            "network `{}` is an in-process chain; its state is lost when the process exits",
            global.network
        );
    }

    let client = JsonRpcClient::new(&network.url, config.http_timeout())?;
    let mut ctx = RpcContext::new(
        client,
        ArtifactStore::new(&config.artifacts),
        config.confirmation.into(),
    );
    if let Some(wallet) = network
        .wallet()
        .with_context(|| format!("invalid signing wallet for `{}`", global.network))?
    {
        ctx = ctx.with_wallet(wallet);
    }

    let chain_id = ctx
        .chain_id()
        .with_context(|| format!("failed to reach {}", ctx.client().url()))?;
    info!("connected to `{}` at {} (chain id {chain_id})", global.network, network.url);

    let signer = match global.from.or(network.from).or(ctx.wallet_address()) {
        Some(address) => Signer::from(address),
        None => ctx
            .default_signer()
            .with_context(|| format!("failed to query accounts of {}", network.url))?,
    };

    Ok((ctx, signer))
}

pub fn deploy_stack(
    config: &HarnessConfig,
    global: &GlobalArgs,
    args: &DeployStackArgs,
) -> anyhow::Result<()> {
    let (mut ctx, signer) = connect(config, global)?;

    let balance = ctx
        .balance(&signer.address())
        .context("failed to query deployer balance")?;
    info!("deploying contracts with the account: {signer}");
    info!("account balance: {} ETH", format_ether(balance));

    let stack_config = StackConfig {
        plan: args.plan,
        client: args.client,
        port_id: args.port.clone(),
        app_module: MOCK_APP_ARTIFACT.to_string(),
    };
    let mut store = EnvFileStore::new(&config.out_dir);

    let stack = run_deploy_stack(&mut ctx, &mut store, &global.network, &stack_config, &signer)
        .with_context(|| format!("deployment to `{}` failed", global.network))?;

    info!(
        "wrote {} addresses to {}",
        stack.record.len(),
        store.path_for(&global.network).display()
    );

    Ok(())
}

pub fn send(config: &HarnessConfig, global: &GlobalArgs, args: &SendPacketArgs) -> anyhow::Result<()> {
    let app = match args.mockapp {
        Some(address) => address,
        None => recorded_mockapp(config, global)?,
    };

    let (mut ctx, signer) = connect(config, global)?;

    let packet = PacketDescriptor::from_message(
        &args.message,
        args.port.clone(),
        args.channel.clone(),
        args.timeout_height,
    );

    send_packet(&mut ctx, &app, &packet, &signer)
        .with_context(|| format!("sending packet on `{}` failed", global.network))?;

    Ok(())
}

fn recorded_mockapp(config: &HarnessConfig, global: &GlobalArgs) -> anyhow::Result<Address> {
    let store = EnvFileStore::new(&config.out_dir);
    let record = store
        .load(&global.network)
        .context("no --mockapp given and no address record to read it from")?;

    let role = RoleKey::mockapp();
    let address = record
        .get(&role)
        .ok_or_else(|| HarnessError::MissingRole {
            role: role.to_string(),
        })?;

    info!("using {role}={address} from {}", store.path_for(&global.network).display());

    Ok(address)
}

pub fn persist(config: &HarnessConfig, global: &GlobalArgs, args: &PersistArgs) -> anyhow::Result<()> {
    let mut record = AddressRecord::new();
    for (role, address) in &args.entries {
        record
            .insert(role.clone(), *address)
            .context("invalid --record entries")?;
    }

    let mut store = EnvFileStore::new(&config.out_dir);
    store.overwrite(&global.network, &record)?;

    info!(
        "wrote {} addresses to {}",
        record.len(),
        store.path_for(&global.network).display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::str::FromStr;

    use clap::Parser;
    use ibc_harness_types::identifiers::NetworkName;

    use super::*;
    use crate::cli::{Cli, Command};

    fn config_in(dir: &std::path::Path) -> HarnessConfig {
        HarnessConfig {
            out_dir: dir.to_path_buf(),
            ..HarnessConfig::default()
        }
    }

    #[test]
    fn persist_writes_the_given_record() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "ibc-harness",
            "persist",
            "--network",
            "chain1",
            "--record",
            "IBC_HANDLER=0x00000000000000000000000000000000000000aa",
            "--record",
            "IBC_MOCKAPP=0x00000000000000000000000000000000000000cc",
        ])
        .unwrap();
        let Command::Persist(args) = &cli.command else {
            panic!("expected persist");
        };

        persist(&config_in(dir.path()), &cli.global, args).unwrap();

        let content = fs::read_to_string(dir.path().join("chain1.env.sh")).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.starts_with("export IBC_HANDLER="));
    }

    #[test]
    fn duplicate_persist_roles_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "ibc-harness",
            "persist",
            "--record",
            "IBC_HANDLER=0x00000000000000000000000000000000000000aa",
            "--record",
            "IBC_HANDLER=0x00000000000000000000000000000000000000bb",
        ])
        .unwrap();
        let Command::Persist(args) = &cli.command else {
            panic!("expected persist");
        };

        assert!(persist(&config_in(dir.path()), &cli.global, args).is_err());
        assert!(!dir.path().join("chain0.env.sh").exists());
    }

    #[test]
    fn mockapp_is_read_from_the_record() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("chain0.env.sh"),
            "export IBC_HANDLER=0x00000000000000000000000000000000000000aa\n\
             export IBC_MOCKAPP=0x00000000000000000000000000000000000000cc\n",
        )
        .unwrap();
        let global = GlobalArgs {
            config: None,
            network: NetworkName::from_str("chain0").unwrap(),
            from: None,
        };

        let app = recorded_mockapp(&config_in(dir.path()), &global).unwrap();

        assert_eq!(app, Address::with_last_byte(0xcc));
    }

    #[test]
    fn record_without_mockapp_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("chain0.env.sh"),
            "export IBC_HANDLER=0x00000000000000000000000000000000000000aa\n",
        )
        .unwrap();
        let global = GlobalArgs {
            config: None,
            network: NetworkName::from_str("chain0").unwrap(),
            from: None,
        };

        let err = recorded_mockapp(&config_in(dir.path()), &global).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<HarnessError>(),
            Some(HarnessError::MissingRole { .. })
        ));
    }
}
