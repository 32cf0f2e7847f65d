pub mod app;
pub mod dashboard;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod tick;
pub mod ui;

pub use app::router;
pub use dashboard::Dashboard;
pub use state::AppState;
pub use storage::{resolve_cache_path, FileImageStore, ImageStore};
pub use tick::{resolve_tick_period, spawn_weight_tick};
