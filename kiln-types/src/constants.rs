// ─── Mount Paths ─────────────────────────────────────────────────────────────

macro_rules! config_root {
    () => {
        "/mnt/config"
    };
}

macro_rules! secrets_root {
    () => {
        "/mnt/secrets"
    };
}

/// Mount point of the genesis/config volume.
pub const PATH_CONFIG: &str = config_root!();

/// Mount point of the blockchain data volume.
pub const PATH_BLOCKCHAIN_DATA: &str = "/mnt/data";

/// Mount point of the secrets volume (private keys, passwords).
pub const PATH_SECRETS: &str = secrets_root!();

/// Node identity private key file.
pub const PATH_NODEKEY: &str = concat!(secrets_root!(), "/nodekey");

/// Genesis document written by the file-provisioning collaborator.
pub const PATH_GENESIS_FILE: &str = concat!(config_root!(), "/genesis.json");

/// Password of the account imported into the client keystore.
pub const PATH_ACCOUNT_PASSWORD: &str = concat!(secrets_root!(), "/account.password");

// ─── Genesis Defaults ────────────────────────────────────────────────────────

/// Default block gas limit (4,700,000).
pub const DEFAULT_GAS_LIMIT: u64 = 0x47b760;

/// Default initial difficulty.
pub const DEFAULT_DIFFICULTY: u64 = 1;

/// Default Clique/IBFT2 block period in seconds.
pub const DEFAULT_BLOCK_PERIOD: u64 = 15;

/// Default Clique/IBFT2 epoch length in blocks.
pub const DEFAULT_EPOCH_LENGTH: u64 = 30_000;

/// Default IBFT2 round request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 10;

/// Default IBFT2 message queue limit.
pub const DEFAULT_MESSAGE_QUEUE_LIMIT: u64 = 1_000;

/// Default IBFT2 duplicate message limit.
pub const DEFAULT_DUPLICATE_MESSAGE_LIMIT: u64 = 100;

/// Default IBFT2 future messages limit.
pub const DEFAULT_FUTURE_MESSAGES_LIMIT: u64 = 1_000;

/// Default IBFT2 future messages max distance.
pub const DEFAULT_FUTURE_MESSAGES_MAX_DISTANCE: u64 = 10;
