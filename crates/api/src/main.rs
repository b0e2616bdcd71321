use std::net::SocketAddr;

use anyhow::Context;

use newsdesk_api::{app, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    newsdesk_observability::init();

    let config = Config::from_env().context("invalid configuration")?;

    let store = app::services::build_store(&config)
        .await
        .context("failed to open news store")?;

    let app = app::build_app(store, &config.webapp_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}
