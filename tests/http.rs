use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct DashboardResponse {
    date: String,
    water_count: u8,
    water_goal: u8,
    weight_loss_pct: f64,
    week_streak: u8,
    streak_goal: u8,
    profile_image: Option<String>,
    cards: Vec<CardView>,
}

#[derive(Debug, Deserialize)]
struct CardView {
    slug: String,
    progress: u8,
}

#[derive(Debug, Deserialize)]
struct WaterResponse {
    water_count: u8,
    week_streak: u8,
}

#[derive(Debug, Deserialize)]
struct ActivityAdvanceResponse {
    slug: String,
    progress: u8,
    completed: bool,
    week_streak: u8,
}

#[derive(Debug, Deserialize)]
struct ProfileImageResponse {
    image: Option<String>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static CHILD_PIDS: Lazy<Mutex<Vec<i32>>> = Lazy::new(|| Mutex::new(Vec::new()));

#[cfg(unix)]
mod cleanup {
    use super::CHILD_PIDS;
    use std::sync::Once;

    static REGISTER: Once = Once::new();

    pub fn register(pid: u32) {
        if let Ok(mut pids) = CHILD_PIDS.lock() {
            pids.push(pid as i32);
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = CHILD_PIDS.lock() {
            for pid in pids.iter() {
                unsafe {
                    libc::kill(*pid, libc::SIGTERM);
                }
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_cache_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("fitboard_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

struct ServerConfig {
    cache_path: String,
    tick_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            cache_path: unique_cache_path(),
            // long enough that the weight never drifts during a test
            tick_ms: 3_600_000,
        }
    }
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/dashboard")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(config: &ServerConfig) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_fitboard"))
        .env("PORT", port.to_string())
        .env("APP_CACHE_PATH", &config.cache_path)
        .env("WEIGHT_TICK_MS", config.tick_ms.to_string())
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn get_dashboard(client: &Client, server: &TestServer) -> DashboardResponse {
    client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn click_water(client: &Client, server: &TestServer, action: &str) -> WaterResponse {
    let response = client
        .post(format!("{}/api/water", server.base_url))
        .json(&serde_json::json!({ "action": action }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

async fn advance(client: &Client, server: &TestServer, slug: &str) -> ActivityAdvanceResponse {
    let response = client
        .post(format!("{}/api/activity/{slug}/advance", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot a real image but the server never decodes it";

fn png_form() -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(FAKE_PNG.to_vec())
        .file_name("avatar.png")
        .mime_str("image/png")
        .unwrap();
    reqwest::multipart::Form::new().part("image", part)
}

#[tokio::test]
async fn http_dashboard_snapshot_has_seed_values() {
    let server = spawn_server(&ServerConfig::default()).await;
    let client = Client::new();

    let dashboard = get_dashboard(&client, &server).await;
    assert!(!dashboard.date.is_empty());
    assert_eq!(dashboard.water_count, 2);
    assert_eq!(dashboard.water_goal, 10);
    assert_eq!(dashboard.week_streak, 3);
    assert_eq!(dashboard.streak_goal, 7);
    assert!((dashboard.weight_loss_pct - 3.0).abs() < 0.5);
    assert!(dashboard.profile_image.is_none());

    let slugs: Vec<&str> = dashboard.cards.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, ["cycling-hero", "daily-running", "daily-steps"]);
    let progress: Vec<u8> = dashboard.cards.iter().map(|c| c.progress).collect();
    assert_eq!(progress, [55, 75, 95]);
}

#[tokio::test]
async fn http_water_clamps_and_first_sip_bumps_streak() {
    let server = spawn_server(&ServerConfig::default()).await;
    let client = Client::new();

    // seed is 2 cups; draining past zero clamps at zero
    let mut last = click_water(&client, &server, "sub").await;
    for _ in 0..4 {
        last = click_water(&client, &server, "sub").await;
    }
    assert_eq!(last.water_count, 0);
    assert_eq!(last.week_streak, 3);

    // first cup from zero bumps the streak along with the count
    let first = click_water(&client, &server, "add").await;
    assert_eq!(first.water_count, 1);
    assert_eq!(first.week_streak, 4);

    // filling past the goal clamps at the goal without touching the streak
    let mut full = first;
    for _ in 0..12 {
        full = click_water(&client, &server, "add").await;
    }
    assert_eq!(full.water_count, 10);
    assert_eq!(full.week_streak, 4);

    let down = click_water(&client, &server, "sub").await;
    assert_eq!(down.water_count, 9);
}

#[tokio::test]
async fn http_water_rejects_unknown_action() {
    let server = spawn_server(&ServerConfig::default()).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/water", server.base_url))
        .json(&serde_json::json!({ "action": "gulp" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_activity_completion_bumps_streak_once() {
    let server = spawn_server(&ServerConfig::default()).await;
    let client = Client::new();

    // daily-steps starts at 95, so one advance completes it
    let done = advance(&client, &server, "daily-steps").await;
    assert_eq!(done.slug, "daily-steps");
    assert_eq!(done.progress, 100);
    assert!(done.completed);
    assert_eq!(done.week_streak, 4);

    let again = advance(&client, &server, "daily-steps").await;
    assert_eq!(again.progress, 100);
    assert!(!again.completed);
    assert_eq!(again.week_streak, 4);
}

#[tokio::test]
async fn http_activity_advances_in_fixed_steps() {
    let server = spawn_server(&ServerConfig::default()).await;
    let client = Client::new();

    // daily-running starts at 75 and needs five steps
    for expected in [80u8, 85, 90, 95] {
        let step = advance(&client, &server, "daily-running").await;
        assert_eq!(step.progress, expected);
        assert!(!step.completed);
    }
    let done = advance(&client, &server, "daily-running").await;
    assert_eq!(done.progress, 100);
    assert!(done.completed);
}

#[tokio::test]
async fn http_unknown_activity_is_not_found() {
    let server = spawn_server(&ServerConfig::default()).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/activity/swimming/advance", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_profile_image_uploads_and_survives_restart() {
    let config = ServerConfig::default();
    let server = spawn_server(&config).await;
    let client = Client::new();

    let empty: ProfileImageResponse = client
        .get(format!("{}/api/profile/image", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(empty.image.is_none());

    let stored: ProfileImageResponse = client
        .post(format!("{}/api/profile/image", server.base_url))
        .multipart(png_form())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let image = stored.image.expect("image missing after upload");
    assert!(image.starts_with("data:image/png;base64,"));

    let fetched: ProfileImageResponse = client
        .get(format!("{}/api/profile/image", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched.image.as_deref(), Some(image.as_str()));

    // a fresh process over the same cache file adopts the image at startup
    drop(server);
    let revived = spawn_server(&config).await;
    let dashboard = get_dashboard(&client, &revived).await;
    assert_eq!(dashboard.profile_image.as_deref(), Some(image.as_str()));
}

#[tokio::test]
async fn http_profile_image_rejects_bad_uploads() {
    let server = spawn_server(&ServerConfig::default()).await;
    let client = Client::new();

    let text_part = reqwest::multipart::Part::bytes(b"hello".to_vec())
        .file_name("notes.txt")
        .mime_str("text/plain")
        .unwrap();
    let response = client
        .post(format!("{}/api/profile/image", server.base_url))
        .multipart(reqwest::multipart::Form::new().part("image", text_part))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let response = client
        .post(format!("{}/api/profile/image", server.base_url))
        .multipart(reqwest::multipart::Form::new().text("other", "field"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // rejected uploads leave the cached image untouched
    let current: ProfileImageResponse = client
        .get(format!("{}/api/profile/image", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(current.image.is_none());
}

#[tokio::test]
async fn http_form_posts_redirect_to_index() {
    let server = spawn_server(&ServerConfig::default()).await;
    let client = Client::new();

    // the no-JS fallback: a form post lands back on the dashboard page
    let response = client
        .post(format!("{}/water/add", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert!(response.url().path() == "/");

    let dashboard = get_dashboard(&client, &server).await;
    assert_eq!(dashboard.water_count, 3);

    let response = client
        .post(format!("{}/water/sub", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(get_dashboard(&client, &server).await.water_count, 2);
}

#[tokio::test]
async fn http_weight_loss_ticks_monotonically() {
    let config = ServerConfig {
        tick_ms: 25,
        ..ServerConfig::default()
    };
    let server = spawn_server(&config).await;
    let client = Client::new();

    let start = get_dashboard(&client, &server).await.weight_loss_pct;
    sleep(Duration::from_millis(500)).await;
    let mid = get_dashboard(&client, &server).await.weight_loss_pct;
    sleep(Duration::from_millis(300)).await;
    let late = get_dashboard(&client, &server).await.weight_loss_pct;

    assert!(mid > start, "expected {mid} > {start}");
    assert!(late >= mid, "expected {late} >= {mid}");
    assert!(late <= 100.0);
}

#[tokio::test]
async fn http_index_renders_dashboard() {
    let server = spawn_server(&ServerConfig::default()).await;
    let client = Client::new();

    let response = client.get(&server.base_url).send().await.unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Daily water goal"));
    assert!(body.contains("Cycling Hero"));
    assert!(body.contains("Week Streak"));
    assert!(!body.contains("{{"), "unreplaced template placeholder");
}
