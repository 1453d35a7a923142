use clap::Parser;
use tracing_subscriber::EnvFilter;

use kiln_cli::cli;
use kiln_cli::config::KilnConfig;

fn main() {
    let cli = cli::Cli::parse();

    // RUST_LOG wins, then the config file's level, then "info".
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = cli
            .config_path()
            .and_then(|path| KilnConfig::load(path).ok())
            .map(|config| config.logging.level)
            .unwrap_or_else(|| "info".to_string());
        EnvFilter::new(level)
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run(cli) {
        tracing::error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}
