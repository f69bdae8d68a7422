mod cli;
mod commands;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::HarnessConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = HarnessConfig::load(cli.global.config.as_deref())?;

    match &cli.command {
        Command::DeployStack(args) => commands::deploy_stack(&config, &cli.global, args),
        Command::SendPacket(args) => commands::send(&config, &cli.global, args),
        Command::Persist(args) => commands::persist(&config, &cli.global, args),
    }
}
