use clap::Parser;
use tracing_subscriber::EnvFilter;

use trigger_dispatch::cli::{self, Cli};
use trigger_dispatch::config;

fn main() {
    // Load .env if present so TRIGGER_* and LOG_FILTER can live next to the binary
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting trigger-dispatch in {:?} mode", config.environment);

    if let Err(e) = cli::run(Cli::parse()) {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}
