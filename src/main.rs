use anyhow::Context;
use clap::Parser;
use shop_cart::cart::{sql, AppState};
use shop_cart::config::{init_tracing, Backend, ServeArgs};
use shop_cart::router::create_app_router;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = ServeArgs::parse();

    // Initialize application state
    let pool = match args.backend {
        Backend::Memory => None,
        Backend::Sql => {
            let pool = sql::connect(&args.database_url)
                .await
                .context("failed to connect to the database")?;
            sql::migrate(&pool).await.context("failed to migrate")?;
            Some(pool)
        }
    };
    let state = match &pool {
        Some(pool) => Arc::new(AppState::sql(pool.clone())),
        None => Arc::new(AppState::new()),
    };

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let addr = args.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, backend = ?args.backend, "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let (Some(pool), true) = (&pool, args.clean) {
        sql::clean(pool).await.context("failed to drop cart tables")?;
    }
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
