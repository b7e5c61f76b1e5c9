use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use taskboard::config::ServiceConfig;
use taskboard::model::{BoardSnapshot, ColumnConfig, Task, TaskStatus};
use taskboard::service::{
    self, load_snapshot, JsonTaskService, ServiceError, SimulatedTaskService, TaskService,
};
use taskboard::store::BoardStore;

/// Service whose fetches only resolve once the test releases them
struct GatedService {
    tasks_gate: Arc<Notify>,
    columns_gate: Arc<Notify>,
}

#[async_trait]
impl TaskService for GatedService {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        self.tasks_gate.notified().await;
        Ok(vec![])
    }

    async fn fetch_columns(&self) -> Result<Vec<ColumnConfig>, ServiceError> {
        self.columns_gate.notified().await;
        Ok(ColumnConfig::standard())
    }
}

#[tokio::test]
async fn test_load_waits_for_both_fetches() {
    let tasks_gate = Arc::new(Notify::new());
    let columns_gate = Arc::new(Notify::new());
    let service = GatedService {
        tasks_gate: Arc::clone(&tasks_gate),
        columns_gate: Arc::clone(&columns_gate),
    };
    let mut store = BoardStore::new();
    assert!(store.is_loading());

    let load = load_snapshot(&service);
    tokio::pin!(load);

    // Nothing released yet
    assert!(tokio::time::timeout(Duration::from_millis(20), &mut load).await.is_err());

    // Tasks alone are not enough
    tasks_gate.notify_one();
    assert!(tokio::time::timeout(Duration::from_millis(20), &mut load).await.is_err());
    assert!(store.is_loading());

    columns_gate.notify_one();
    let snapshot = load.await.unwrap();
    store.finish_loading(snapshot);

    assert!(!store.is_loading());
    assert!(store.tasks().is_empty());
    let ids: Vec<TaskStatus> = store.columns().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done]);
}

#[tokio::test]
async fn test_simulated_service_serves_sample_data() {
    let service = SimulatedTaskService::new(Duration::ZERO);

    let snapshot = load_snapshot(&service).await.unwrap();

    assert_eq!(snapshot, service::sample_snapshot());
    let titles: Vec<&str> = snapshot.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Mow the Lawn", "Pull weeds", "Rake the leaves"]);
    let column_titles: Vec<&str> = snapshot.columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(column_titles, vec!["To Do", "In Progress", "Done"]);
}

#[tokio::test(start_paused = true)]
async fn test_simulated_service_fetches_run_concurrently() {
    let service = SimulatedTaskService::new(Duration::from_millis(200));

    let started = tokio::time::Instant::now();
    load_snapshot(&service).await.unwrap();
    let elapsed = started.elapsed();

    // Paused clock: both 200ms sleeps overlap, sequential would be 400ms
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_millis(400));
}

#[tokio::test]
async fn test_simulated_service_with_custom_snapshot() {
    let snapshot = BoardSnapshot {
        tasks: vec![Task::new("x", "Custom", TaskStatus::InProgress)],
        columns: ColumnConfig::standard(),
    };
    let service = SimulatedTaskService::with_snapshot(Duration::ZERO, snapshot.clone());

    assert_eq!(service.fetch_tasks().await.unwrap(), snapshot.tasks);
    assert_eq!(service.fetch_columns().await.unwrap(), snapshot.columns);
}

#[tokio::test]
async fn test_json_service_reads_seed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");
    std::fs::write(
        &path,
        r#"{
            "tasks": [
                { "id": "1", "title": "Mow the Lawn", "status": "TODO" },
                { "id": "2", "title": "Pull weeds", "status": "IN_PROGRESS" }
            ],
            "columns": [
                { "id": "TODO", "title": "To Do" },
                { "id": "IN_PROGRESS", "title": "In Progress" },
                { "id": "DONE", "title": "Done" }
            ]
        }"#,
    )
    .unwrap();

    let service = JsonTaskService::new(&path, Duration::ZERO);
    assert_eq!(service.path(), path.as_path());

    let snapshot = load_snapshot(&service).await.unwrap();
    assert_eq!(snapshot.tasks.len(), 2);
    assert_eq!(snapshot.tasks[1].status, TaskStatus::InProgress);
    assert_eq!(snapshot.columns, ColumnConfig::standard());
}

#[tokio::test]
async fn test_json_service_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let service = JsonTaskService::new(dir.path().join("missing.json"), Duration::ZERO);

    let err = load_snapshot(&service).await.unwrap_err();

    assert!(matches!(err, ServiceError::Io { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[tokio::test]
async fn test_json_service_rejects_unknown_status() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");
    std::fs::write(
        &path,
        r#"{ "tasks": [{ "id": "1", "title": "A", "status": "BLOCKED" }], "columns": [] }"#,
    )
    .unwrap();

    let service = JsonTaskService::new(&path, Duration::ZERO);
    let err = service.fetch_tasks().await.unwrap_err();

    assert!(matches!(err, ServiceError::Parse { .. }));
}

#[tokio::test]
async fn test_from_config_picks_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");
    std::fs::write(&path, r#"{ "tasks": [], "columns": [{ "id": "TODO", "title": "Only" }] }"#).unwrap();

    let simulated = service::from_config(&ServiceConfig {
        delay_ms: 0,
        seed_file: None,
    });
    assert_eq!(simulated.fetch_tasks().await.unwrap().len(), 3);

    let seeded = service::from_config(&ServiceConfig {
        delay_ms: 0,
        seed_file: Some(path),
    });
    let columns = seeded.fetch_columns().await.unwrap();
    assert_eq!(columns, vec![ColumnConfig::new(TaskStatus::Todo, "Only")]);
}
