use crate::dashboard::{Dashboard, STREAK_GOAL, WATER_GOAL};
use crate::errors::AppError;
use crate::models::{
    ActivityAdvanceResponse, DashboardResponse, ProfileImageResponse, WaterRequest, WaterResponse,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    response::{Html, Redirect},
    Json,
};
use base64ct::{Base64, Encoding};
use chrono::Local;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let dashboard = state.dashboard.lock().await;
    Html(render_index(&today_string(), &dashboard))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let dashboard = state.dashboard.lock().await;
    Ok(Json(to_snapshot(&dashboard)))
}

pub async fn water(
    State(state): State<AppState>,
    Json(payload): Json<WaterRequest>,
) -> Result<Json<WaterResponse>, AppError> {
    let action = payload.action.trim();
    if action != "add" && action != "sub" {
        return Err(AppError::bad_request("action must be 'add' or 'sub'"));
    }

    Ok(Json(apply_water(&state, action).await))
}

pub async fn water_add(State(state): State<AppState>) -> Redirect {
    apply_water(&state, "add").await;
    Redirect::to("/")
}

pub async fn water_sub(State(state): State<AppState>) -> Redirect {
    apply_water(&state, "sub").await;
    Redirect::to("/")
}

async fn apply_water(state: &AppState, action: &str) -> WaterResponse {
    let mut dashboard = state.dashboard.lock().await;
    if action == "add" {
        dashboard.add_water();
    } else {
        dashboard.sub_water();
    }

    WaterResponse {
        water_count: dashboard.water_count(),
        water_goal: WATER_GOAL,
        week_streak: dashboard.week_streak(),
    }
}

pub async fn advance_activity(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ActivityAdvanceResponse>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let outcome = dashboard
        .advance_activity(&slug)
        .ok_or_else(|| AppError::not_found(format!("no activity named '{slug}'")))?;

    Ok(Json(ActivityAdvanceResponse {
        slug,
        progress: outcome.progress,
        completed: outcome.completed,
        week_streak: dashboard.week_streak(),
    }))
}

pub async fn get_profile_image(
    State(state): State<AppState>,
) -> Result<Json<ProfileImageResponse>, AppError> {
    let dashboard = state.dashboard.lock().await;
    Ok(Json(ProfileImageResponse {
        image: dashboard.profile_image().map(str::to_string),
    }))
}

pub async fn set_profile_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProfileImageResponse>, AppError> {
    let (content_type, bytes) = read_image_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::bad_request("multipart field 'image' is required"))?;

    if !content_type.starts_with("image/") {
        return Err(AppError::unsupported_media_type(format!(
            "expected an image upload, got '{content_type}'"
        )));
    }
    if bytes.is_empty() {
        return Err(AppError::bad_request("uploaded image is empty"));
    }

    let encoded = format!("data:{content_type};base64,{}", Base64::encode_string(&bytes));
    state.store.save(&encoded).await?;

    let mut dashboard = state.dashboard.lock().await;
    dashboard.adopt_profile_image(encoded.clone());

    Ok(Json(ProfileImageResponse {
        image: Some(encoded),
    }))
}

async fn read_image_field(multipart: &mut Multipart) -> Result<Option<(String, Bytes)>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(err.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::bad_request(err.to_string()))?;
        return Ok(Some((content_type, bytes)));
    }

    Ok(None)
}

fn to_snapshot(dashboard: &Dashboard) -> DashboardResponse {
    DashboardResponse {
        date: today_string(),
        water_count: dashboard.water_count(),
        water_goal: WATER_GOAL,
        weight_loss_pct: dashboard.weight_loss_pct(),
        week_streak: dashboard.week_streak(),
        streak_goal: STREAK_GOAL,
        profile_image: dashboard.profile_image().map(str::to_string),
        cards: dashboard.cards().to_vec(),
    }
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}
