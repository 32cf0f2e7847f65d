use crate::dashboard::Dashboard;
use crate::storage::ImageStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ImageStore>,
    pub dashboard: Arc<Mutex<Dashboard>>,
}

impl AppState {
    pub fn new(store: Arc<dyn ImageStore>, dashboard: Dashboard) -> Self {
        Self {
            store,
            dashboard: Arc::new(Mutex::new(dashboard)),
        }
    }
}
