mod fixtures;
mod operations;

pub use fixtures::{sample_snapshot, sample_tasks};
pub use operations::*;

#[cfg(feature = "test-mocks")]
pub use operations::MockTaskService;

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::ServiceConfig;
use crate::model::BoardSnapshot;

/// Fetch tasks and columns concurrently; resolves once both have arrived.
pub async fn load_snapshot(service: &dyn TaskService) -> Result<BoardSnapshot, ServiceError> {
    let (tasks, columns) = tokio::try_join!(service.fetch_tasks(), service.fetch_columns())?;
    Ok(BoardSnapshot { tasks, columns })
}

/// Pick the backend described by the config
pub fn from_config(config: &ServiceConfig) -> Arc<dyn TaskService> {
    let delay = Duration::from_millis(config.delay_ms);
    match &config.seed_file {
        Some(path) => {
            info!(path = %path.display(), delay_ms = config.delay_ms, "using JSON seed file");
            Arc::new(JsonTaskService::new(path.clone(), delay))
        }
        None => {
            info!(delay_ms = config.delay_ms, "using simulated backend");
            Arc::new(SimulatedTaskService::new(delay))
        }
    }
}
