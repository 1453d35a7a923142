//! Ethereum client command-line arguments.
//!
//! One translation algorithm, parameterized by a per-client [`FlagTable`].

pub mod flags;
pub mod translate;

use kiln_types::{NetworkSpec, NodeSpec};

pub use flags::{flags_for, FlagTable, JoinStyle, ServerFlags};
pub use translate::translate;

/// Arguments for `node` using the flag table of its own client.
pub fn client_args(node: &NodeSpec, network: &NetworkSpec, bootnodes: &[String]) -> Vec<String> {
    translate(flags_for(node.client), node, network, bootnodes)
}
