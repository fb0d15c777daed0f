//! runwatch binary entry point.
//!
//! Wires configuration, logging and the production report sink together,
//! then executes one run. The exit code is the run verdict: 0 for a passing
//! run, 1 for any failing path, 2 for unusable configuration.

use clap::Parser;
use dotenvy::dotenv;
use mimalloc::MiMalloc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use runwatch::client::ApiClient;
use runwatch::config::Config;
use runwatch::report::LogSink;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    // Initialize tracing (M-LOG-STRUCTURED)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // Load .env (if present)
    let _ = dotenv();

    let config = Config::parse();
    if let Err(err) = Url::parse(&config.origin) {
        eprintln!("Configuration error: invalid origin {:?}: {err}", config.origin);
        std::process::exit(2);
    }

    info!(
        name: "run.config.loaded",
        origin = %config.origin,
        fail_fast = config.fail_fast,
        max_retries = config.max_retries,
        deadline_secs = ?config.deadline_secs,
        "configuration loaded"
    );

    let client = ApiClient::new(&config.origin, &config.api_key);
    let sink = LogSink;
    let passed = runwatch::run::execute(&client, &config, &sink).await;
    std::process::exit(i32::from(!passed));
}
