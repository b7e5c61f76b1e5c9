//! Tests driving the board through a mocked `TaskService`.
//!
//! Run with: cargo test --features test-mocks

#![cfg(feature = "test-mocks")]

use std::path::PathBuf;

use taskboard::model::{ColumnConfig, Task, TaskStatus};
use taskboard::service::{load_snapshot, MockTaskService, ServiceError};
use taskboard::store::BoardStore;

#[tokio::test]
async fn test_mock_service_loads_each_list_once() {
    let mut mock = MockTaskService::new();

    mock.expect_fetch_tasks()
        .times(1)
        .returning(|| Ok(vec![Task::new("1", "Mow the Lawn", TaskStatus::Todo)]));
    mock.expect_fetch_columns()
        .times(1)
        .returning(|| Ok(ColumnConfig::standard()));

    let snapshot = load_snapshot(&mock).await.unwrap();
    let store = BoardStore::ready(snapshot);

    assert!(!store.is_loading());
    assert_eq!(store.tasks_in(TaskStatus::Todo).len(), 1);
    assert_eq!(store.columns().len(), 3);
}

#[tokio::test]
async fn test_mock_service_failure_propagates() {
    let mut mock = MockTaskService::new();

    mock.expect_fetch_tasks().returning(|| {
        Err(ServiceError::Io {
            path: PathBuf::from("remote"),
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        })
    });
    mock.expect_fetch_columns()
        .returning(|| Ok(ColumnConfig::standard()));

    let result = load_snapshot(&mock).await;

    assert!(matches!(result, Err(ServiceError::Io { .. })));
}

#[tokio::test]
async fn test_snapshot_adopted_verbatim() {
    let tasks = vec![
        Task::new("1", "Mow the Lawn", TaskStatus::Todo),
        Task::new("2", "Pull weeds", TaskStatus::InProgress),
        Task::new("3", "Rake the leaves", TaskStatus::Done),
    ];
    let expected = tasks.clone();

    let mut mock = MockTaskService::new();
    mock.expect_fetch_tasks().returning(move || Ok(tasks.clone()));
    mock.expect_fetch_columns()
        .returning(|| Ok(ColumnConfig::standard()));

    let mut store = BoardStore::new();
    store.finish_loading(load_snapshot(&mock).await.unwrap());

    assert_eq!(store.tasks(), expected.as_slice());
    assert_eq!(store.columns(), ColumnConfig::standard().as_slice());
}
