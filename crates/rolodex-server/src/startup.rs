//! Server startup utilities.

use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
    ____        __          __
   / __ \____  / /___  ____/ /__  _  __
  / /_/ / __ \/ / __ \/ __  / _ \| |/_/
 / _, _/ /_/ / / /_/ / /_/ /  __/>  <
/_/ |_|\____/_/\____/\__,_/\___/_/|_|

                         User Directory
    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(rest_port: u16) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://0.0.0.0:{}/api", rest_port);
    info!("Health:    http://0.0.0.0:{}/health", rest_port);
    info!("API Docs:  http://0.0.0.0:{}/swagger-ui", rest_port);
    info!("{}", separator);
}
