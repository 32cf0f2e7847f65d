use crate::dashboard::ActivityCard;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct WaterRequest {
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct WaterResponse {
    pub water_count: u8,
    pub water_goal: u8,
    pub week_streak: u8,
}

#[derive(Debug, Serialize)]
pub struct ActivityAdvanceResponse {
    pub slug: String,
    pub progress: u8,
    pub completed: bool,
    pub week_streak: u8,
}

#[derive(Debug, Serialize)]
pub struct ProfileImageResponse {
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub date: String,
    pub water_count: u8,
    pub water_goal: u8,
    pub weight_loss_pct: f64,
    pub week_streak: u8,
    pub streak_goal: u8,
    pub profile_image: Option<String>,
    pub cards: Vec<ActivityCard>,
}
