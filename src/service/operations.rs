//! The data-fetch collaborator the board loads its initial state from.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

use crate::model::{BoardSnapshot, ColumnConfig, Task};

use super::fixtures;

/// Errors from loading board data
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("failed to read board data from {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse board data in {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of the initial task list and column configuration
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Fetch every task on the board
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ServiceError>;

    /// Fetch the ordered column configuration
    async fn fetch_columns(&self) -> Result<Vec<ColumnConfig>, ServiceError>;
}

/// Serves built-in sample data after an artificial network delay
pub struct SimulatedTaskService {
    delay: Duration,
    snapshot: BoardSnapshot,
}

impl SimulatedTaskService {
    pub fn new(delay: Duration) -> Self {
        Self::with_snapshot(delay, fixtures::sample_snapshot())
    }

    pub fn with_snapshot(delay: Duration, snapshot: BoardSnapshot) -> Self {
        Self { delay, snapshot }
    }
}

#[async_trait]
impl TaskService for SimulatedTaskService {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.snapshot.tasks.clone())
    }

    async fn fetch_columns(&self) -> Result<Vec<ColumnConfig>, ServiceError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.snapshot.columns.clone())
    }
}

/// Serves board data from a JSON file shaped like [`BoardSnapshot`]
pub struct JsonTaskService {
    path: PathBuf,
    delay: Duration,
}

impl JsonTaskService {
    pub fn new(path: impl Into<PathBuf>, delay: Duration) -> Self {
        Self {
            path: path.into(),
            delay,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_snapshot(&self) -> Result<BoardSnapshot, ServiceError> {
        tokio::time::sleep(self.delay).await;
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ServiceError::Io {
                path: self.path.clone(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| ServiceError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl TaskService for JsonTaskService {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        Ok(self.read_snapshot().await?.tasks)
    }

    async fn fetch_columns(&self) -> Result<Vec<ColumnConfig>, ServiceError> {
        Ok(self.read_snapshot().await?.columns)
    }
}
