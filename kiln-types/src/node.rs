use serde::{Deserialize, Serialize};

use crate::client::ClientKind;

/// Per-instance configuration of a client node.
///
/// Optional settings are `None`/empty when unset; translation skips them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSpec {
    pub client: ClientKind,
    /// Whether a node identity key file is mounted by the secrets collaborator.
    pub nodekey: bool,
    pub p2p_port: Option<u16>,
    pub sync_mode: Option<SyncMode>,
    /// Declared peers. The caller resolves these into the bootnode list
    /// handed to the translator.
    pub bootnodes: Vec<String>,
    pub miner: bool,
    pub coinbase: Option<String>,
    pub rpc: ApiServer,
    pub ws: ApiServer,
    pub graphql: ApiServer,
    /// Host allow-list.
    pub hosts: Vec<String>,
    /// CORS origins, applied to every enabled HTTP server.
    pub cors_domains: Vec<String>,
    /// Account imported into the client keystore.
    pub import: Option<ImportedAccount>,
    pub logging: Option<Verbosity>,
}

impl Default for NodeSpec {
    fn default() -> Self {
        Self {
            client: ClientKind::Besu,
            nodekey: false,
            p2p_port: None,
            sync_mode: None,
            bootnodes: Vec::new(),
            miner: false,
            coinbase: None,
            rpc: ApiServer::default(),
            ws: ApiServer::default(),
            graphql: ApiServer::default(),
            hosts: Vec::new(),
            cors_domains: Vec::new(),
            import: None,
            logging: None,
        }
    }
}

/// Settings of one API server (JSON-RPC over HTTP, WebSocket, GraphQL).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiServer {
    pub enabled: bool,
    pub port: Option<u16>,
    pub host: Option<String>,
    pub apis: Vec<Api>,
}

impl ApiServer {
    /// An enabled server with no other settings.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}

/// JSON-RPC API namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Api {
    Admin,
    Clique,
    Debug,
    Eea,
    Eth,
    Ibft,
    Miner,
    Net,
    Perm,
    Plugins,
    Priv,
    Txpool,
    Web3,
}

impl Api {
    pub fn as_str(&self) -> &'static str {
        match self {
            Api::Admin => "admin",
            Api::Clique => "clique",
            Api::Debug => "debug",
            Api::Eea => "eea",
            Api::Eth => "eth",
            Api::Ibft => "ibft",
            Api::Miner => "miner",
            Api::Net => "net",
            Api::Perm => "perm",
            Api::Plugins => "plugins",
            Api::Priv => "priv",
            Api::Txpool => "txpool",
            Api::Web3 => "web3",
        }
    }
}

/// Blockchain synchronization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    Fast,
    Full,
}

/// Client log verbosity, from quietest to loudest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Off,
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    All,
}

/// Account imported into the client keystore by the secrets collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedAccount {
    pub address: String,
}
