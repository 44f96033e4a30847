//! Posts API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p posts-api
//! ```
//!
//! Configuration is loaded from environment variables (see `.env.example`).

use posts_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    let tracing_config = match config.as_ref().map(|c| c.app.env) {
        Ok(Environment::Production) => TracingConfig::production(),
        Ok(Environment::Development) => TracingConfig::development(),
        _ => TracingConfig::default(),
    };
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        "Configuration loaded"
    );

    if let Err(e) = posts_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
