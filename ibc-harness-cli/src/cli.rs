use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use ibc_harness_types::identifiers::{ChannelId, ClientVariant, NetworkName, PortId};
use ibc_harness_types::plan::DeploymentPlan;
use ibc_harness_types::record::RoleKey;
use ibc_harness_types::Address;

#[derive(Debug, Parser)]
#[command(name = "ibc-harness")]
#[command(about = "Deploys an IBC stack to EVM chains and sends test packets")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true, env = "IBC_HARNESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Network to run against
    #[arg(long, global = true, default_value = "chain0")]
    pub network: NetworkName,

    /// Account to sign with, overriding the configured one
    #[arg(long, global = true)]
    pub from: Option<Address>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Deploy the handler, a light client and the mock application, then
    /// write the network's address record
    DeployStack(DeployStackArgs),
    /// Send a packet through the mock application
    SendPacket(SendPacketArgs),
    /// Rewrite the network's address record from explicit values
    Persist(PersistArgs),
}

#[derive(Debug, Args)]
pub struct DeployStackArgs {
    /// Logic modules to deploy: minimal or extended
    #[arg(long, default_value = "minimal")]
    pub plan: DeploymentPlan,

    /// Light client to register: ibft2 or qbft
    #[arg(long, default_value = "ibft2")]
    pub client: ClientVariant,

    /// Port the mock application is bound to
    #[arg(long, default_value = "mockapp")]
    pub port: PortId,
}

#[derive(Debug, Args)]
pub struct SendPacketArgs {
    /// Mock application address; read from the address record when omitted
    #[arg(long, env = "IBC_MOCKAPP")]
    pub mockapp: Option<Address>,

    /// Packet payload, sent as UTF-8
    #[arg(long)]
    pub message: String,

    /// Source port the application is bound to, e.g. mockapp
    #[arg(long)]
    pub port: PortId,

    /// Open source channel, e.g. channel-0
    #[arg(long)]
    pub channel: ChannelId,

    /// Timeout height on revision 0. Must be non-zero: a packet without any
    /// timeout is rejected before it is submitted
    #[arg(long)]
    pub timeout_height: u64,
}

#[derive(Debug, Args)]
pub struct PersistArgs {
    /// Address entries as ROLE=0xADDRESS, for example IBC_HANDLER=0x...
    #[arg(long = "record", value_name = "ROLE=ADDRESS", required = true, value_parser = parse_entry)]
    pub entries: Vec<(RoleKey, Address)>,
}

fn parse_entry(s: &str) -> Result<(RoleKey, Address), String> {
    let (role, address) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ROLE=ADDRESS, got `{s}`"))?;

    let role = RoleKey::from_str(role.trim()).map_err(|e| e.to_string())?;
    let address = Address::from_str(address.trim()).map_err(|e| e.to_string())?;

    Ok((role, address))
}
