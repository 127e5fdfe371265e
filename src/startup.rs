use crate::components::store::StoreActor;
use crate::components::{ComponentManager, ConfigService, SiteContent};
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use crate::web::auth::{AuthConfig, AuthService};
use crate::web::{self, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Initialize components and start the web server
pub async fn start_server(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    // Set locale from config
    {
        let config_read = config.read().await;
        crate::utils::i18n::set_locale(&config_read.site_locale);
        info!("Setting locale to {}", config_read.site_locale);
    }

    // Initialize the store actor
    let (mut store_actor, store_handle) = StoreActor::new(Arc::clone(&config));

    // Spawn store actor task
    tokio::spawn(async move {
        store_actor.run().await;
    });

    // Initialize component manager
    let mut component_manager = ComponentManager::new(Arc::clone(&config));

    // The site content service is shared between the component keeping
    // it live and the request handlers reading it
    let site_service = Arc::new(ConfigService::new());
    component_manager.register(SiteContent::new(Arc::clone(&site_service)));

    let component_manager = Arc::new(component_manager);

    if let Err(e) = component_manager.init_all(store_handle.clone()).await {
        error!("Failed to initialize components: {:?}", e);
    }

    // Ensure the upload directory exists
    let upload_dir = {
        let config_read = config.read().await;
        config_read.upload_dir.clone()
    };
    std::fs::create_dir_all(&upload_dir).map_err(Error::from)?;

    // Auth service for the admin panel
    let auth_service = {
        let config_read = config.read().await;
        Arc::new(AuthService::new(AuthConfig {
            jwt_secret: config_read.jwt_secret.clone(),
            token_expiration_minutes: 60 * 24, // 24 hours
            admin_username: config_read.admin_username.clone(),
            admin_password: config_read.admin_password.clone(),
        }))
    };

    let state = AppState {
        config: Arc::clone(&config),
        site: site_service,
        store: store_handle.clone(),
        auth_service,
        upload_dir,
    };

    let app = web::router(state);

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    tokio::spawn(shutdown::handle_signals(
        shutdown_send,
        Arc::clone(&component_manager),
        store_handle,
    ));

    // Bind to address and run server
    let port = {
        let config_read = config.read().await;
        config_read.port
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(Error::from)?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_recv.await;
            info!("Received shutdown signal, shutting down server...");
        })
        .await
        .map_err(Error::from)?;

    info!("Server stopped");
    Ok(())
}
