use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Task status in the kanban board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }

    /// Human readable label, used when no column title is configured
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    /// All statuses in flow order
    pub fn flow() -> &'static [TaskStatus] {
        &[TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done]
    }

    /// Status every new task starts in
    pub fn first() -> TaskStatus {
        TaskStatus::Todo
    }
}

/// Requested move direction. `Left` is toward the start of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

/// A task on the kanban board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status,
        }
    }
}

/// One board column; `id` is the status whose tasks it shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub id: TaskStatus,
    pub title: String,
}

impl ColumnConfig {
    pub fn new(id: TaskStatus, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// The standard three-stage column set
    pub fn standard() -> Vec<ColumnConfig> {
        TaskStatus::flow()
            .iter()
            .map(|status| ColumnConfig::new(*status, status.label()))
            .collect()
    }
}

/// Everything the board needs to leave the loading state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

impl BoardSnapshot {
    /// Column ids that appear more than once, in first-repeat order
    pub fn duplicate_column_ids(&self) -> Vec<TaskStatus> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for column in &self.columns {
            if !seen.insert(column.id) && !dups.contains(&column.id) {
                dups.push(column.id);
            }
        }
        dups
    }

    /// Task ids that appear more than once, in first-repeat order
    pub fn duplicate_task_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for task in &self.tasks {
            let id = task.id.as_str();
            if !seen.insert(id) && !dups.contains(&id) {
                dups.push(id);
            }
        }
        dups
    }
}
