//! Shared state and the HTTP router.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::asset::LogoAsset;
use crate::config::AppConfig;
use crate::customer_config::CustomerConfig;
use crate::store::PostStore;
use crate::ui;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup.
    pub customer: Arc<CustomerConfig>,
    /// Checked again on every render.
    pub logo: Arc<LogoAsset>,
    pub store: Arc<PostStore>,
}

impl AppState {
    pub fn new(customer: CustomerConfig, logo: LogoAsset, store: PostStore) -> Self {
        Self {
            customer: Arc::new(customer),
            logo: Arc::new(logo),
            store: Arc::new(store),
        }
    }

    /// Load the customer config and wire paths from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            CustomerConfig::load(&config.customer_config_path()),
            LogoAsset::under(&config.base_dir),
            PostStore::new(&config.data_dir()),
        )
    }
}

pub fn router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .route("/", get(ui::user_page))
        .route("/admin", get(ui::admin_page))
        .route("/admin/analytics.csv", get(ui::analytics_csv))
        .route("/health", get(ui::health_check))
        .nest_service("/static", ServeDir::new(config.static_dir()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
