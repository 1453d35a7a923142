//! Node and network configuration to an ordered argument vector.
//!
//! Argument order is stable: callers and golden tests depend on it.

use kiln_types::constants::{
    PATH_ACCOUNT_PASSWORD, PATH_BLOCKCHAIN_DATA, PATH_GENESIS_FILE, PATH_NODEKEY,
};
use kiln_types::{ApiServer, NetworkSpec, NodeSpec};

use crate::flags::{FlagTable, JoinStyle, ServerFlags};

struct Args {
    inner: Vec<String>,
}

impl Args {
    fn switch(&mut self, flag: Option<&str>) {
        if let Some(flag) = flag {
            self.inner.push(flag.to_string());
        }
    }

    fn value(&mut self, flag: Option<&str>, value: impl ToString) {
        if let Some(flag) = flag {
            self.inner.push(flag.to_string());
            self.inner.push(value.to_string());
        }
    }

    fn list(&mut self, flag: Option<&str>, values: &[impl AsRef<str>]) {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(",");
            self.value(flag, joined);
        }
    }
}

/// Translate `node` on `network` into the argument vector of `table`'s client.
///
/// `bootnodes` are resolved peer addresses, passed through in order.
pub fn translate(
    table: &FlagTable,
    node: &NodeSpec,
    network: &NetworkSpec,
    bootnodes: &[String],
) -> Vec<String> {
    let mut args = Args { inner: Vec::new() };

    args.value(Some(table.nat[0]), table.nat[1]);

    if network.chain_id != 0 {
        args.value(table.network_id, network.chain_id);
    }
    if node.nodekey {
        args.value(table.nodekey, PATH_NODEKEY);
    }
    if network.genesis.is_some() {
        args.value(table.genesis, PATH_GENESIS_FILE);
    }
    args.value(Some(table.data_dir), PATH_BLOCKCHAIN_DATA);

    if let Some(name) = &network.network_name {
        match table.join {
            JoinStyle::Value(flag) => args.value(Some(flag), name),
            JoinStyle::Switch => args.inner.push(format!("--{}", name)),
        }
    }

    if let Some(port) = node.p2p_port {
        args.value(table.p2p_port, port);
    }
    args.list(table.bootnodes, bootnodes);
    if let (Some(mode), Some((flag, spell))) = (node.sync_mode, table.sync_mode) {
        args.value(Some(flag), spell(mode));
    }

    // Coinbase does not depend on mining being enabled.
    if node.miner {
        args.switch(table.miner);
    }
    if let Some(coinbase) = &node.coinbase {
        args.value(table.coinbase, coinbase);
    }

    server(&mut args, &table.rpc, &node.rpc);
    server(&mut args, &table.ws, &node.ws);
    server(&mut args, &table.graphql, &node.graphql);

    for flag in table.host_allowlist {
        args.list(Some(*flag), &node.hosts);
    }

    if node.rpc.enabled {
        args.list(table.rpc.cors, &node.cors_domains);
    }
    if node.graphql.enabled {
        args.list(table.graphql.cors, &node.cors_domains);
    }

    if let Some(account) = &node.import {
        args.value(table.unlock, &account.address);
        if table.unlock.is_some() {
            args.value(table.password, PATH_ACCOUNT_PASSWORD);
        }
    }

    if let (Some(level), Some((flag, spell))) = (node.logging, table.verbosity) {
        args.value(Some(flag), spell(level));
    }

    tracing::debug!(
        client = %table.client,
        count = args.inner.len(),
        args = ?args.inner,
        "translated node arguments"
    );
    args.inner
}

/// Port, host and APIs follow their own presence, not the enable flag.
fn server(args: &mut Args, flags: &ServerFlags, server: &ApiServer) {
    if server.enabled {
        args.switch(flags.enable);
    }
    if let Some(port) = server.port {
        args.value(flags.port, port);
    }
    if let Some(host) = &server.host {
        args.value(flags.host, host);
    }
    let apis: Vec<&str> = server.apis.iter().map(|api| api.as_str()).collect();
    args.list(flags.api, &apis);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{BESU, GETH, PARITY};
    use kiln_types::{Api, Consensus, Genesis, ImportedAccount, SyncMode, Verbosity};
    use proptest::prelude::*;

    fn custom_network(chain_id: u64) -> NetworkSpec {
        NetworkSpec {
            chain_id,
            network_name: None,
            consensus: Consensus::ProofOfAuthority,
            genesis: None,
        }
    }

    fn s(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_minimal_node_only_mandatory_args() {
        let node = NodeSpec::default();
        let network = custom_network(0);
        assert_eq!(
            translate(&BESU, &node, &network, &[]),
            s(&["--nat-method", "KUBERNETES", "--data-path", "/mnt/data"])
        );
        assert_eq!(
            translate(&GETH, &node, &network, &[]),
            s(&["--nat", "any", "--datadir", "/mnt/data"])
        );
        assert_eq!(
            translate(&PARITY, &node, &network, &[]),
            s(&["--nat", "any", "--base-path", "/mnt/data"])
        );
    }

    #[test]
    fn test_besu_full_vector() {
        let node = NodeSpec {
            nodekey: true,
            p2p_port: Some(30303),
            sync_mode: Some(SyncMode::Fast),
            miner: true,
            coinbase: Some("0xabc".to_string()),
            rpc: ApiServer {
                enabled: true,
                port: Some(8545),
                host: Some("0.0.0.0".to_string()),
                apis: vec![Api::Eth, Api::Net],
            },
            ws: ApiServer {
                enabled: true,
                port: Some(8546),
                host: None,
                apis: vec![Api::Web3],
            },
            graphql: ApiServer {
                enabled: true,
                port: Some(8547),
                host: Some("127.0.0.1".to_string()),
                apis: vec![],
            },
            hosts: vec!["a".to_string(), "b".to_string()],
            cors_domains: vec!["*".to_string()],
            logging: Some(Verbosity::Debug),
            ..NodeSpec::default()
        };
        let mut network = custom_network(2021);
        network.genesis = Some(Genesis::default());
        let bootnodes = s(&["enode://1@h1:30303", "enode://2@h2:30303"]);

        assert_eq!(
            translate(&BESU, &node, &network, &bootnodes),
            s(&[
                "--nat-method",
                "KUBERNETES",
                "--network-id",
                "2021",
                "--node-private-key-file",
                "/mnt/secrets/nodekey",
                "--genesis-file",
                "/mnt/config/genesis.json",
                "--data-path",
                "/mnt/data",
                "--p2p-port",
                "30303",
                "--bootnodes",
                "enode://1@h1:30303,enode://2@h2:30303",
                "--sync-mode",
                "FAST",
                "--miner-enabled",
                "--miner-coinbase",
                "0xabc",
                "--rpc-http-enabled",
                "--rpc-http-port",
                "8545",
                "--rpc-http-host",
                "0.0.0.0",
                "--rpc-http-api",
                "eth,net",
                "--rpc-ws-enabled",
                "--rpc-ws-port",
                "8546",
                "--rpc-ws-api",
                "web3",
                "--graphql-http-enabled",
                "--graphql-http-port",
                "8547",
                "--graphql-http-host",
                "127.0.0.1",
                "--host-whitelist",
                "a,b",
                "--rpc-http-cors-origins",
                "*",
                "--graphql-http-cors-origins",
                "*",
                "--logging",
                "DEBUG",
            ])
        );
    }

    #[test]
    fn test_geth_vector() {
        let node = NodeSpec {
            sync_mode: Some(SyncMode::Full),
            miner: true,
            coinbase: Some("0xabc".to_string()),
            rpc: ApiServer {
                enabled: true,
                port: Some(8545),
                host: None,
                apis: vec![Api::Eth],
            },
            graphql: ApiServer::enabled(),
            hosts: vec!["*".to_string()],
            cors_domains: vec!["x.io".to_string()],
            import: Some(ImportedAccount {
                address: "0xdef".to_string(),
            }),
            logging: Some(Verbosity::Info),
            ..NodeSpec::default()
        };
        let network = NetworkSpec::join("rinkeby", Consensus::ProofOfAuthority);

        assert_eq!(
            translate(&GETH, &node, &network, &[]),
            s(&[
                "--nat",
                "any",
                "--datadir",
                "/mnt/data",
                "--rinkeby",
                "--syncmode",
                "full",
                "--mine",
                "--miner.etherbase",
                "0xabc",
                "--http",
                "--http.port",
                "8545",
                "--http.api",
                "eth",
                "--graphql",
                "--http.vhosts",
                "*",
                "--graphql.vhosts",
                "*",
                "--http.corsdomain",
                "x.io",
                "--graphql.corsdomain",
                "x.io",
                "--unlock",
                "0xdef",
                "--password",
                "/mnt/secrets/account.password",
                "--verbosity",
                "3",
            ])
        );
    }

    #[test]
    fn test_parity_vector() {
        let node = NodeSpec {
            nodekey: true,
            sync_mode: Some(SyncMode::Full),
            miner: true,
            coinbase: Some("0xabc".to_string()),
            rpc: ApiServer {
                enabled: true,
                port: Some(8545),
                host: Some("all".to_string()),
                apis: vec![Api::Eth, Api::Web3],
            },
            ws: ApiServer {
                enabled: true,
                port: Some(8546),
                host: None,
                apis: vec![],
            },
            graphql: ApiServer {
                enabled: true,
                port: Some(8547),
                host: None,
                apis: vec![],
            },
            hosts: vec!["h".to_string()],
            cors_domains: vec!["c".to_string()],
            ..NodeSpec::default()
        };
        let mut network = custom_network(7);
        network.genesis = Some(Genesis::default());

        assert_eq!(
            translate(&PARITY, &node, &network, &[]),
            s(&[
                "--nat",
                "any",
                "--network-id",
                "7",
                "--node-key",
                "/mnt/secrets/nodekey",
                "--chain",
                "/mnt/config/genesis.json",
                "--base-path",
                "/mnt/data",
                "--pruning",
                "archive",
                "--author",
                "0xabc",
                "--jsonrpc-port",
                "8545",
                "--jsonrpc-interface",
                "all",
                "--jsonrpc-apis",
                "eth,web3",
                "--ws-port",
                "8546",
                "--jsonrpc-hosts",
                "h",
                "--jsonrpc-cors",
                "c",
            ])
        );
    }

    #[test]
    fn test_join_value_style() {
        let network = NetworkSpec::join("goerli", Consensus::ProofOfAuthority);
        let args = translate(&BESU, &NodeSpec::default(), &network, &[]);
        assert_eq!(&args[4..], &s(&["--network", "goerli"])[..]);
        let args = translate(&PARITY, &NodeSpec::default(), &network, &[]);
        assert_eq!(&args[4..], &s(&["--chain", "goerli"])[..]);
    }

    #[test]
    fn test_quirk_server_settings_emitted_without_enable() {
        let node = NodeSpec {
            rpc: ApiServer {
                enabled: false,
                port: Some(8545),
                host: Some("0.0.0.0".to_string()),
                apis: vec![Api::Admin],
            },
            ..NodeSpec::default()
        };
        let args = translate(&BESU, &node, &custom_network(0), &[]);
        assert!(!args.contains(&"--rpc-http-enabled".to_string()));
        assert!(args.contains(&"--rpc-http-port".to_string()));
        assert!(args.contains(&"--rpc-http-host".to_string()));
        assert!(args.contains(&"--rpc-http-api".to_string()));
    }

    #[test]
    fn test_quirk_ws_and_graphql_settings_emitted_without_enable() {
        let node = NodeSpec {
            ws: ApiServer {
                enabled: false,
                port: Some(8546),
                host: Some("0.0.0.0".to_string()),
                apis: vec![Api::Eth],
            },
            graphql: ApiServer {
                enabled: false,
                port: Some(8547),
                host: Some("127.0.0.1".to_string()),
                apis: vec![],
            },
            cors_domains: vec!["*".to_string()],
            ..NodeSpec::default()
        };
        let args = translate(&BESU, &node, &custom_network(0), &[]);
        assert!(!args.contains(&"--rpc-ws-enabled".to_string()));
        assert!(!args.contains(&"--graphql-http-enabled".to_string()));
        assert!(!args.contains(&"--graphql-http-cors-origins".to_string()));

        let after = |flag: &str| {
            let at = args.iter().position(|a| a == flag).unwrap();
            args[at + 1].clone()
        };
        assert_eq!(after("--rpc-ws-port"), "8546");
        assert_eq!(after("--rpc-ws-host"), "0.0.0.0");
        assert_eq!(after("--rpc-ws-api"), "eth");
        assert_eq!(after("--graphql-http-port"), "8547");
        assert_eq!(after("--graphql-http-host"), "127.0.0.1");
    }

    #[test]
    fn test_quirk_coinbase_without_miner() {
        let node = NodeSpec {
            coinbase: Some("0x01".to_string()),
            ..NodeSpec::default()
        };
        let args = translate(&BESU, &node, &custom_network(0), &[]);
        assert!(!args.contains(&"--miner-enabled".to_string()));
        assert_eq!(
            &args[args.len() - 2..],
            &s(&["--miner-coinbase", "0x01"])[..]
        );
    }

    #[test]
    fn test_cors_requires_enabled_server() {
        let node = NodeSpec {
            cors_domains: vec!["*".to_string()],
            ..NodeSpec::default()
        };
        let args = translate(&BESU, &node, &custom_network(0), &[]);
        assert!(args.iter().all(|a| !a.contains("cors")));

        let node = NodeSpec {
            rpc: ApiServer::enabled(),
            ..node
        };
        let args = translate(&BESU, &node, &custom_network(0), &[]);
        assert!(args.contains(&"--rpc-http-cors-origins".to_string()));
        assert!(!args.contains(&"--graphql-http-cors-origins".to_string()));
    }

    #[test]
    fn test_besu_ignores_imported_account() {
        let node = NodeSpec {
            import: Some(ImportedAccount {
                address: "0x02".to_string(),
            }),
            ..NodeSpec::default()
        };
        let args = translate(&BESU, &node, &custom_network(0), &[]);
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn test_geth_has_no_genesis_flag() {
        let mut network = custom_network(5);
        network.genesis = Some(Genesis::default());
        let args = translate(&GETH, &NodeSpec::default(), &network, &[]);
        assert!(!args.contains(&"/mnt/config/genesis.json".to_string()));
        assert_eq!(&args[2..4], &s(&["--networkid", "5"])[..]);
    }

    proptest! {
        #[test]
        fn proptest_bootnodes_keep_input_order(
            peers in proptest::collection::vec("[a-z0-9]{1,8}", 1..8)
        ) {
            let bootnodes: Vec<String> =
                peers.iter().map(|p| format!("enode://{p}@10.0.0.1:30303")).collect();
            let args = translate(&GETH, &NodeSpec::default(), &custom_network(0), &bootnodes);
            let at = args.iter().position(|a| a == "--bootnodes").unwrap();
            prop_assert_eq!(&args[at + 1], &bootnodes.join(","));
        }

        #[test]
        fn proptest_translation_is_deterministic(port in 1u16..=u16::MAX, chain_id in 0u64..100_000) {
            let node = NodeSpec {
                p2p_port: Some(port),
                rpc: ApiServer::enabled(),
                ..NodeSpec::default()
            };
            let network = custom_network(chain_id);
            prop_assert_eq!(
                translate(&BESU, &node, &network, &[]),
                translate(&BESU, &node, &network, &[])
            );
        }
    }
}
