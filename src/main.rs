use fitboard::{
    resolve_cache_path, resolve_tick_period, router, spawn_weight_tick, AppState, Dashboard,
    FileImageStore, ImageStore,
};
use std::{env, net::SocketAddr, sync::Arc};
use tokio::{fs, sync::watch};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cache_path = resolve_cache_path()?;
    if let Some(parent) = cache_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let store: Arc<dyn ImageStore> = Arc::new(FileImageStore::new(cache_path));
    let mut dashboard = Dashboard::new();
    if let Some(image) = store.load().await {
        dashboard.adopt_profile_image(image);
    }

    let state = AppState::new(store, dashboard);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let tick = spawn_weight_tick(state.clone(), resolve_tick_period(), shutdown_rx);

    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    tick.await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
    }
}
