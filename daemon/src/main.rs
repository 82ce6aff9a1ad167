//! Tessera daemon — entry point for running a chain node.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tokio::sync::Mutex;

use tessera_bridge::LocalChannel;
use tessera_heritage::StaticBadgeFeed;
use tessera_node::{ChainNode, DeploymentRecord, NodeConfig, ShutdownController};
use tessera_rpc::RpcServer;
use tessera_types::{ChainId, NetworkId, WalletAddress};

#[derive(Parser)]
#[command(name = "tessera-daemon", about = "Tessera protocol node daemon")]
struct Cli {
    /// Network: "live", "test", or "dev". Defaults to the config file's
    /// network value.
    #[arg(long, env = "TESSERA_NETWORK")]
    network: Option<String>,

    /// Chain id this node writes for.
    #[arg(long, env = "TESSERA_CHAIN_ID")]
    chain_id: Option<u64>,

    /// Data directory for node state.
    #[arg(long, env = "TESSERA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable the RPC server.
    #[arg(long, default_value_t = true, env = "TESSERA_ENABLE_RPC")]
    rpc: bool,

    /// RPC server port (defaults to the network default).
    #[arg(long, env = "TESSERA_RPC_PORT")]
    rpc_port: Option<u16>,

    /// Path to the per-network deployment record (JSON). Supplies the
    /// bridge contract and authority addresses.
    #[arg(long, env = "TESSERA_DEPLOYMENT")]
    deployment: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "TESSERA_LOG_LEVEL")]
    log_level: String,

    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Start the node.
    #[command(name = "node")]
    Node {
        #[command(subcommand)]
        action: NodeAction,
    },
}

#[derive(clap::Subcommand)]
enum NodeAction {
    /// Run the node.
    Run,
}

fn build_config(cli: &Cli) -> anyhow::Result<NodeConfig> {
    let mut config = match &cli.config {
        Some(path) => NodeConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => NodeConfig::default(),
    };
    if let Some(network) = &cli.network {
        config.network = NetworkId::parse(network)
            .with_context(|| format!("unknown network {network:?}"))?;
    }
    if let Some(chain_id) = cli.chain_id {
        config.chain_id = chain_id;
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    config.enable_rpc = cli.rpc;
    config.rpc_port = cli
        .rpc_port
        .unwrap_or_else(|| config.network.default_rpc_port());
    Ok(config)
}

/// Resolve the bridge and authority addresses from the deployment record
/// or the config file, in that order.
fn resolve_addresses(
    cli: &Cli,
    config: &NodeConfig,
) -> anyhow::Result<(WalletAddress, WalletAddress)> {
    if let Some(path) = &cli.deployment {
        let record = DeploymentRecord::from_json_file(path)
            .with_context(|| format!("loading deployment record from {}", path.display()))?;
        return Ok((record.contracts.bridge, record.deployer));
    }
    match (&config.bridge_address, &config.authority) {
        (Some(bridge), Some(authority)) => Ok((bridge.clone(), authority.clone())),
        _ => bail!(
            "bridge_address and authority must come from --deployment or the config file"
        ),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level.clone())),
        )
        .init();

    let config = build_config(&cli)?;
    let (bridge_address, authority) = resolve_addresses(&cli, &config)?;

    let Command::Node {
        action: NodeAction::Run,
    } = cli.command;

    tracing::info!(
        network = config.network.as_str(),
        chain = %ChainId::new(config.chain_id),
        "starting tessera node"
    );

    let node = ChainNode::new(
        config.chain(),
        config.params.clone(),
        authority,
        bridge_address,
        Box::new(LocalChannel::new()),
        Box::new(StaticBadgeFeed::new()),
    );
    let node = Arc::new(Mutex::new(node));

    let shutdown = ShutdownController::new();

    if config.enable_rpc {
        let server = RpcServer::new(config.rpc_port);
        let rpc_node = node.clone();
        tokio::select! {
            result = server.start(rpc_node) => {
                result.context("RPC server failed")?;
            }
            _ = shutdown.wait_for_signal() => {}
        }
    } else {
        shutdown.wait_for_signal().await;
    }

    tracing::info!("tessera node stopped");
    Ok(())
}
