use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/water/add", post(handlers::water_add))
        .route("/water/sub", post(handlers::water_sub))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/water", post(handlers::water))
        .route("/api/activity/:slug/advance", post(handlers::advance_activity))
        .route(
            "/api/profile/image",
            get(handlers::get_profile_image).post(handlers::set_profile_image),
        )
        .layer(DefaultBodyLimit::max(handlers::MAX_UPLOAD_BYTES))
        .with_state(state)
}
