//! Post Studio
//!
//! Serves the branded post generator view at `/` and the admin dashboard at
//! `/admin`.

use std::net::SocketAddr;

use post_studio::AppConfig;
use post_studio::api::{AppState, router};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,post_studio=debug")),
        )
        .init();

    let config = AppConfig::from_env();
    info!(
        "Starting Post Studio on {}:{} (base dir {})",
        config.host,
        config.port,
        config.base_dir.display()
    );

    let state = AppState::from_config(&config);
    info!("Branding for {}", state.customer.customer_name);

    let app = router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
