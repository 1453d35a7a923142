//! Per-client flag spellings.
//!
//! A setting the client has no flag for is `None`; translation skips it.

use kiln_types::{ClientKind, SyncMode, Verbosity};

/// How a client is told to join a predefined network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinStyle {
    /// `--flag NAME`
    Value(&'static str),
    /// `--NAME`
    Switch,
}

/// Flags of one API server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerFlags {
    pub enable: Option<&'static str>,
    pub port: Option<&'static str>,
    pub host: Option<&'static str>,
    pub api: Option<&'static str>,
    pub cors: Option<&'static str>,
}

impl ServerFlags {
    const NONE: ServerFlags = ServerFlags {
        enable: None,
        port: None,
        host: None,
        api: None,
        cors: None,
    };
}

/// Flag spellings of one client family.
#[derive(Debug, Clone, Copy)]
pub struct FlagTable {
    pub client: ClientKind,
    /// NAT hint, emitted first and unconditionally.
    pub nat: [&'static str; 2],
    pub network_id: Option<&'static str>,
    pub nodekey: Option<&'static str>,
    pub genesis: Option<&'static str>,
    pub data_dir: &'static str,
    pub join: JoinStyle,
    pub p2p_port: Option<&'static str>,
    pub bootnodes: Option<&'static str>,
    pub sync_mode: Option<(&'static str, fn(SyncMode) -> &'static str)>,
    pub miner: Option<&'static str>,
    pub coinbase: Option<&'static str>,
    pub rpc: ServerFlags,
    pub ws: ServerFlags,
    pub graphql: ServerFlags,
    /// The host allow-list is repeated under each of these.
    pub host_allowlist: &'static [&'static str],
    pub unlock: Option<&'static str>,
    pub password: Option<&'static str>,
    pub verbosity: Option<(&'static str, fn(Verbosity) -> &'static str)>,
}

// ─── Value spellings ────────────────────────────────────────────────────────

fn besu_sync_mode(mode: SyncMode) -> &'static str {
    match mode {
        SyncMode::Fast => "FAST",
        SyncMode::Full => "FULL",
    }
}

fn geth_sync_mode(mode: SyncMode) -> &'static str {
    match mode {
        SyncMode::Fast => "fast",
        SyncMode::Full => "full",
    }
}

/// Parity has no sync mode; pruning is the nearest knob.
fn parity_pruning(mode: SyncMode) -> &'static str {
    match mode {
        SyncMode::Fast => "fast",
        SyncMode::Full => "archive",
    }
}

fn besu_logging(level: Verbosity) -> &'static str {
    match level {
        Verbosity::Off => "OFF",
        Verbosity::Fatal => "FATAL",
        Verbosity::Error => "ERROR",
        Verbosity::Warn => "WARN",
        Verbosity::Info => "INFO",
        Verbosity::Debug => "DEBUG",
        Verbosity::Trace => "TRACE",
        Verbosity::All => "ALL",
    }
}

/// 0 silent, 1 error, 2 warn, 3 info, 4 debug, 5 detail.
fn geth_verbosity(level: Verbosity) -> &'static str {
    match level {
        Verbosity::Off => "0",
        Verbosity::Fatal | Verbosity::Error => "1",
        Verbosity::Warn => "2",
        Verbosity::Info => "3",
        Verbosity::Debug => "4",
        Verbosity::Trace | Verbosity::All => "5",
    }
}

fn parity_logging(level: Verbosity) -> &'static str {
    match level {
        Verbosity::Off | Verbosity::Fatal | Verbosity::Error => "error",
        Verbosity::Warn => "warn",
        Verbosity::Info => "info",
        Verbosity::Debug => "debug",
        Verbosity::Trace | Verbosity::All => "trace",
    }
}

// ─── Tables ─────────────────────────────────────────────────────────────────

pub const BESU: FlagTable = FlagTable {
    client: ClientKind::Besu,
    nat: ["--nat-method", "KUBERNETES"],
    network_id: Some("--network-id"),
    nodekey: Some("--node-private-key-file"),
    genesis: Some("--genesis-file"),
    data_dir: "--data-path",
    join: JoinStyle::Value("--network"),
    p2p_port: Some("--p2p-port"),
    bootnodes: Some("--bootnodes"),
    sync_mode: Some(("--sync-mode", besu_sync_mode)),
    miner: Some("--miner-enabled"),
    coinbase: Some("--miner-coinbase"),
    rpc: ServerFlags {
        enable: Some("--rpc-http-enabled"),
        port: Some("--rpc-http-port"),
        host: Some("--rpc-http-host"),
        api: Some("--rpc-http-api"),
        cors: Some("--rpc-http-cors-origins"),
    },
    ws: ServerFlags {
        enable: Some("--rpc-ws-enabled"),
        port: Some("--rpc-ws-port"),
        host: Some("--rpc-ws-host"),
        api: Some("--rpc-ws-api"),
        cors: None,
    },
    graphql: ServerFlags {
        enable: Some("--graphql-http-enabled"),
        port: Some("--graphql-http-port"),
        host: Some("--graphql-http-host"),
        api: None,
        cors: Some("--graphql-http-cors-origins"),
    },
    host_allowlist: &["--host-whitelist"],
    unlock: None,
    password: None,
    verbosity: Some(("--logging", besu_logging)),
};

/// Geth reads its genesis through a separate `geth init`, so there is no
/// genesis flag.
pub const GETH: FlagTable = FlagTable {
    client: ClientKind::Geth,
    nat: ["--nat", "any"],
    network_id: Some("--networkid"),
    nodekey: Some("--nodekey"),
    genesis: None,
    data_dir: "--datadir",
    join: JoinStyle::Switch,
    p2p_port: Some("--port"),
    bootnodes: Some("--bootnodes"),
    sync_mode: Some(("--syncmode", geth_sync_mode)),
    miner: Some("--mine"),
    coinbase: Some("--miner.etherbase"),
    rpc: ServerFlags {
        enable: Some("--http"),
        port: Some("--http.port"),
        host: Some("--http.addr"),
        api: Some("--http.api"),
        cors: Some("--http.corsdomain"),
    },
    ws: ServerFlags {
        enable: Some("--ws"),
        port: Some("--ws.port"),
        host: Some("--ws.addr"),
        api: Some("--ws.api"),
        cors: None,
    },
    graphql: ServerFlags {
        enable: Some("--graphql"),
        port: None,
        host: None,
        api: None,
        cors: Some("--graphql.corsdomain"),
    },
    host_allowlist: &["--http.vhosts", "--graphql.vhosts"],
    unlock: Some("--unlock"),
    password: Some("--password"),
    verbosity: Some(("--verbosity", geth_verbosity)),
};

/// Parity servers are on by default; it has no enable flags and no GraphQL.
pub const PARITY: FlagTable = FlagTable {
    client: ClientKind::Parity,
    nat: ["--nat", "any"],
    network_id: Some("--network-id"),
    nodekey: Some("--node-key"),
    genesis: Some("--chain"),
    data_dir: "--base-path",
    join: JoinStyle::Value("--chain"),
    p2p_port: Some("--port"),
    bootnodes: Some("--bootnodes"),
    sync_mode: Some(("--pruning", parity_pruning)),
    miner: None,
    coinbase: Some("--author"),
    rpc: ServerFlags {
        enable: None,
        port: Some("--jsonrpc-port"),
        host: Some("--jsonrpc-interface"),
        api: Some("--jsonrpc-apis"),
        cors: Some("--jsonrpc-cors"),
    },
    ws: ServerFlags {
        enable: None,
        port: Some("--ws-port"),
        host: Some("--ws-interface"),
        api: Some("--ws-apis"),
        cors: None,
    },
    graphql: ServerFlags::NONE,
    host_allowlist: &["--jsonrpc-hosts"],
    unlock: Some("--unlock"),
    password: Some("--password"),
    verbosity: Some(("--logging", parity_logging)),
};

/// Flag table of a client.
pub fn flags_for(client: ClientKind) -> &'static FlagTable {
    match client {
        ClientKind::Besu => &BESU,
        ClientKind::Geth => &GETH,
        ClientKind::Parity => &PARITY,
    }
}
