//! Server startup utilities.

use roster_config::AppConfig;
use std::net::SocketAddr;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r"
    ____             __
   / __ \____  _____/ /____  _____
  / /_/ / __ \/ ___/ __/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/  __/ /
/_/ |_|\____/____/\__/\___/_/
    "
    );
}

/// Prints where the server can be reached.
pub fn print_startup_info(config: &AppConfig, addr: SocketAddr) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    info!("Users API:   http://{}{}/users", addr, config.server.api_prefix);
    info!("Health:      http://{}/health", addr);
    info!("API Docs:    http://{}/swagger-ui", addr);
    info!("{}", separator);
}
