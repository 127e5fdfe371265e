pub mod admin;
pub mod auth;
pub mod handlers;
pub mod pages;

use crate::components::site_config::ConfigService;
use crate::components::store::StoreHandle;
use crate::config::Config;
use auth::AuthService;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Process configuration
    pub config: Arc<RwLock<Config>>,
    /// Cached site content, kept live by the store subscription
    pub site: Arc<ConfigService>,
    /// Document store handle
    pub store: StoreHandle,
    /// Auth service for admin sessions
    pub auth_service: Arc<AuthService>,
    /// Directory where uploaded files are stored
    pub upload_dir: String,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public pages
        .route("/", get(handlers::index_handler))
        .route("/about", get(handlers::about_handler))
        .route("/about/{section}", get(handlers::about_section_handler))
        .route("/ministry", get(handlers::ministry_handler))
        .route("/ministry/{slug}", get(handlers::ministry_detail_handler))
        .route("/news", get(handlers::notices_handler))
        .route("/news/notices", get(handlers::notices_handler))
        .route("/news/bulletins", get(handlers::bulletins_handler))
        .route("/news/gallery", get(handlers::gallery_handler))
        .route("/news/calendar", get(handlers::calendar_handler))
        .route("/news/columns", get(handlers::columns_handler))
        .route("/sermons", get(handlers::sermons_handler))
        .route("/sermons/daily", get(handlers::devotionals_handler))
        .route("/health", get(handlers::health_handler))
        // Admin panel
        .route(
            "/admin/login",
            get(admin::login_form_handler).post(admin::login_handler),
        )
        .route("/admin/logout", post(admin::logout_handler))
        .route("/admin", get(admin::dashboard_handler))
        .route(
            "/admin/site",
            get(admin::site_form_handler).post(admin::site_save_handler),
        )
        .route(
            "/admin/content/{collection}",
            get(admin::collection_page_handler).post(admin::collection_save_handler),
        )
        .route(
            "/admin/content/{collection}/delete",
            post(admin::collection_delete_handler),
        )
        .route(
            "/admin/content/{collection}/reset",
            post(admin::collection_reset_handler),
        )
        .route("/admin/upload", post(admin::upload_handler))
        // Admin authentication gate
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ))
        // Static files
        .nest_service("/assets", ServeDir::new("assets"))
        .nest_service("/uploads", ServeDir::new(state.upload_dir.clone()))
        // Everything else is not built yet
        .fallback(handlers::coming_soon_handler)
        // Other middlewares
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB upload limit
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
