use crate::model::{BoardSnapshot, ColumnConfig, Task, TaskStatus};

/// Sample data served by the simulated backend
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new("1", "Mow the Lawn", TaskStatus::Todo),
        Task::new("2", "Pull weeds", TaskStatus::InProgress),
        Task::new("3", "Rake the leaves", TaskStatus::Done),
    ]
}

pub fn sample_snapshot() -> BoardSnapshot {
    BoardSnapshot {
        tasks: sample_tasks(),
        columns: ColumnConfig::standard(),
    }
}
