//! `agroportald` — the AgroPortal server binary.
//!
//! Usage:
//!   agroportald -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/agroportal/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod config;
mod gates;
mod routes;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use agroportal_core::Module;

use config::ServerConfig;
use routes::AppState;

/// AgroPortal server.
#[derive(Parser, Debug)]
#[command(name = "agroportald", about = "AgroPortal server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides default 0.0.0.0:8080).
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    server_config.verify()?;

    // Initialize storage.
    let data_dir = std::path::PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    // Embedded store (shared by all modules).
    let kv: Arc<dyn agroportal_kv::KVStore> = Arc::new(
        agroportal_kv::RedbStore::open(&data_dir.join("data.redb"))
            .map_err(|e| anyhow::anyhow!("failed to open KV store: {}", e))?,
    );

    // External identity endpoint.
    let identity = Arc::new(session::service::identity::HttpIdentityProvider::new(
        server_config.identity.login_url.clone(),
    ));

    let session_module = session::SessionModule::new(Arc::clone(&kv), identity);
    info!("Session module initialized");

    let cart_module = cart::CartModule::new(Arc::clone(&kv));
    info!("Cart module initialized");

    let module_routes = vec![
        (session_module.name(), session_module.routes()),
        (cart_module.name(), cart_module.routes()),
    ];

    // Application state for the navigation gates.
    let app_state = AppState {
        session: session_module.service().clone(),
    };

    // Build router.
    let app = routes::build_router(app_state, module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("AgroPortal server listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
