use crate::errors::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};
use tokio::fs;
use tracing::error;

/// On-disk shape of the cache file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CachedProfile {
    image: Option<String>,
}

/// Key-value cache for the encoded profile image. There is exactly one
/// entry; a missing image is valid state, not an error.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn load(&self) -> Option<String>;
    async fn save(&self, image: &str) -> Result<(), AppError>;
}

pub struct FileImageStore {
    path: PathBuf,
}

impl FileImageStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ImageStore for FileImageStore {
    async fn load(&self) -> Option<String> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<CachedProfile>(&bytes) {
                Ok(cached) => cached.image,
                Err(err) => {
                    error!("failed to parse cache file: {err}");
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                error!("failed to read cache file: {err}");
                None
            }
        }
    }

    async fn save(&self, image: &str) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(&CachedProfile {
            image: Some(image.to_string()),
        })
        .map_err(AppError::internal)?;
        fs::write(&self.path, payload).await?;
        Ok(())
    }
}

pub fn resolve_cache_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_CACHE_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/profile.json"))
}
