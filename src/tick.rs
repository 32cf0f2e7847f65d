use crate::state::AppState;
use std::{env, time::Duration};
use tokio::{sync::watch, task::JoinHandle, time::interval};

pub const DEFAULT_TICK_MS: u64 = 60_000;

pub fn resolve_tick_period() -> Duration {
    let millis = env::var("WEIGHT_TICK_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TICK_MS);
    Duration::from_millis(millis)
}

/// Drives the weight-loss percentage while the server runs. The task holds
/// the dashboard lock only for the duration of one tick and exits as soon
/// as the shutdown signal flips.
pub fn spawn_weight_tick(
    state: AppState,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        // tokio intervals complete immediately on the first tick; swallow
        // it so the seeded percentage survives startup untouched
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let mut dashboard = state.dashboard.lock().await;
                    dashboard.tick_weight_loss();
                }
                _ = shutdown.changed() => break,
            }
        }
    })
}
