//! In-memory board state: the task list, the column configuration and the
//! loading flag. The composition root owns one `BoardStore` and passes it to
//! whatever renders it.

use tracing::{debug, info, warn};

use crate::model::{next_status, BoardSnapshot, ColumnConfig, Direction, Task, TaskStatus};

/// Result of [`BoardStore::move_task`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The task's status changed
    Moved { from: TaskStatus, to: TaskStatus },
    /// Already at the first/last column for this direction
    AtBoundary,
    /// No task has that id
    NotFound,
}

#[derive(Debug)]
pub struct BoardStore {
    tasks: Vec<Task>,
    columns: Vec<ColumnConfig>,
    loading: bool,
}

impl BoardStore {
    pub fn new() -> Self {
        Self {
            tasks: vec![],
            columns: vec![],
            loading: true,
        }
    }

    /// A store that is already past loading. Mostly useful in tests.
    pub fn ready(snapshot: BoardSnapshot) -> Self {
        let mut store = Self::new();
        store.finish_loading(snapshot);
        store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn columns(&self) -> &[ColumnConfig] {
        &self.columns
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Tasks shown in the column for `status`, in creation order
    pub fn tasks_in(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Adopt the initial snapshot and leave the loading state.
    /// Returns false if the board was already loaded.
    pub fn finish_loading(&mut self, snapshot: BoardSnapshot) -> bool {
        if !self.loading {
            warn!("ignoring second board snapshot");
            return false;
        }

        // Adopted as-is; repeated columns render their tasks twice
        for status in snapshot.duplicate_column_ids() {
            warn!(status = status.as_str(), "duplicate column id in snapshot");
        }
        for task_id in snapshot.duplicate_task_ids() {
            warn!(task_id, "duplicate task id in snapshot");
        }

        let BoardSnapshot { tasks, columns } = snapshot;
        for task in &tasks {
            if !columns.iter().any(|c| c.id == task.status) {
                warn!(task_id = %task.id, status = task.status.as_str(), "task status has no column");
            }
        }

        info!(tasks = tasks.len(), columns = columns.len(), "board loaded");
        self.tasks = tasks;
        self.columns = columns;
        self.loading = false;
        true
    }

    /// Append a new task in the first status of the flow.
    /// Blank titles are ignored.
    pub fn create_task(&mut self, title: &str) -> Option<&Task> {
        let title = title.trim();
        if title.is_empty() {
            debug!("ignoring task with empty title");
            return None;
        }

        let id = self.fresh_id();
        info!(task_id = %id, title, "task created");
        self.tasks.push(Task::new(id, title, TaskStatus::first()));
        self.tasks.last()
    }

    /// Move a task one column in `direction`. The task keeps its id and
    /// position in the list; only its status changes.
    pub fn move_task(&mut self, task_id: &str, direction: Direction) -> MoveOutcome {
        let Some(index) = self.tasks.iter().position(|t| t.id == task_id) else {
            debug!(task_id, "move ignored: no such task");
            return MoveOutcome::NotFound;
        };

        let from = self.tasks[index].status;
        let Some(to) = self.target_status(from, direction) else {
            debug!(task_id, status = from.as_str(), direction = direction.as_str(), "move ignored: at boundary");
            return MoveOutcome::AtBoundary;
        };

        self.tasks[index].status = to;
        info!(task_id, from = from.as_str(), to = to.as_str(), "task moved");
        MoveOutcome::Moved { from, to }
    }

    /// Whether `move_task` would move this task
    pub fn can_move(&self, task: &Task, direction: Direction) -> bool {
        self.target_status(task.status, direction).is_some()
    }

    /// Index of the column showing `status`
    pub fn column_index(&self, status: TaskStatus) -> Option<usize> {
        self.columns.iter().position(|c| c.id == status)
    }

    // A target with no configured column would orphan the task, so treat it
    // like a boundary.
    fn target_status(&self, from: TaskStatus, direction: Direction) -> Option<TaskStatus> {
        next_status(from, direction).filter(|to| self.column_index(*to).is_some())
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if self.task(&id).is_none() {
                return id;
            }
        }
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}
