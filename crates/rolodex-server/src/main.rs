//! # Rolodex Server
//!
//! Main entry point for the Rolodex user directory service.

use std::sync::Arc;

use rolodex_config::{AppConfig, ConfigLoader};
use rolodex_core::RolodexResult;
use rolodex_repository::{create_pool, MySqlUserRepository};
use rolodex_rest::{create_router, AppState};
use rolodex_security::{PasswordHasher, TokenProvider};
use rolodex_service::{UserService, UserServiceImpl};
use tokio::signal;
use tracing::{error, info};

mod startup;

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    startup::print_banner();
    info!("Starting Rolodex Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> RolodexResult<()> {
    // Load configuration
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    info!("Environment: {}", config.app.environment);

    serve(config).await
}

async fn serve(config: AppConfig) -> RolodexResult<()> {
    // Create database pool
    let db_pool = create_pool(&config.database).await?;

    // Run migrations
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    // Wire up the application
    let user_repository = Arc::new(MySqlUserRepository::new(db_pool));
    let password_hasher = Arc::new(PasswordHasher::new());
    let security_config = Arc::new(config.security.clone());
    let token_provider = Arc::new(TokenProvider::new(security_config));

    let user_service: Arc<dyn UserService> =
        Arc::new(UserServiceImpl::new(user_repository, password_hasher));

    let app_state = AppState::new(user_service);
    let router = create_router(app_state, token_provider, &config.server);

    // Start REST server
    let rest_addr = config.server.addr();
    info!("Starting REST server on http://{}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr)
        .await
        .map_err(|e| rolodex_core::RolodexError::Internal(format!("Failed to bind REST: {}", e)))?;

    startup::print_startup_info(config.server.port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| rolodex_core::RolodexError::Internal(format!("REST server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rolodex=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
