pub mod client;
pub mod constants;
pub mod error;
pub mod genesis;
pub mod network;
pub mod node;
pub mod primitives;

pub use client::ClientKind;
pub use genesis::{Account, ConsensusParams, Forks, Genesis};
pub use network::{Consensus, NetworkSpec};
pub use node::{Api, ApiServer, ImportedAccount, NodeSpec, SyncMode, Verbosity};
pub use primitives::{Address, Hash};
