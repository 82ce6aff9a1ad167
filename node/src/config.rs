//! Node configuration with TOML file support, and the per-network
//! deployment record consumed by external tooling.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tessera_types::{ChainId, NetworkId, ProtocolParams, Timestamp, WalletAddress};

use crate::NodeError;

/// Configuration for a Tessera node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Which network this node belongs to.
    #[serde(default = "default_network")]
    pub network: NetworkId,

    /// The chain this node is the single writer for.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Data directory for node state.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// This chain's bridge contract address.
    pub bridge_address: Option<WalletAddress>,

    /// Route/admin authority address.
    pub authority: Option<WalletAddress>,

    /// Whether to enable the RPC server.
    #[serde(default = "default_true")]
    pub enable_rpc: bool,

    /// RPC port (if enabled).
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Protocol parameters (network-wide, not per-node TOML config).
    #[serde(skip)]
    pub params: ProtocolParams,
}

fn default_network() -> NetworkId {
    NetworkId::Dev
}

fn default_chain_id() -> u64 {
    1
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./tessera_data")
}

fn default_true() -> bool {
    true
}

fn default_rpc_port() -> u16 {
    NetworkId::Dev.default_rpc_port()
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            chain_id: default_chain_id(),
            data_dir: default_data_dir(),
            bridge_address: None,
            authority: None,
            enable_rpc: true,
            rpc_port: default_rpc_port(),
            params: ProtocolParams::default(),
        }
    }
}

impl NodeConfig {
    pub fn chain(&self) -> ChainId {
        ChainId::new(self.chain_id)
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, NodeError> {
        let raw = std::fs::read_to_string(path)?;
        let mut config: NodeConfig =
            toml::from_str(&raw).map_err(|e| NodeError::Config(e.to_string()))?;
        config.params = ProtocolParams::default();
        Ok(config)
    }

    /// Write configuration to a TOML file.
    pub fn to_toml_file(&self, path: &Path) -> Result<(), NodeError> {
        let raw = toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

/// Contract addresses of one deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContracts {
    pub reputation: WalletAddress,
    pub factory: WalletAddress,
    pub bridge: WalletAddress,
}

/// Per-network deployment record, persisted as JSON for the deployment
/// and verification tooling. The node only reads/writes it; the tooling
/// owns its lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub network: NetworkId,
    pub chain_id: u64,
    pub deployer: WalletAddress,
    pub treasury: WalletAddress,
    pub timestamp: Timestamp,
    pub contracts: DeployedContracts,
}

impl DeploymentRecord {
    pub fn from_json_file(path: &Path) -> Result<Self, NodeError> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn to_json_file(&self, path: &Path) -> Result<(), NodeError> {
        let raw =
            serde_json::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}
