use crate::model::{Direction, Task};
use crate::store::{BoardStore, MoveOutcome};

/// State for the kanban board view: the store plus the selection cursor
#[derive(Debug)]
pub struct BoardState {
    pub store: BoardStore,
    pub selected_column: usize,
    pub selected_row: usize,
}

impl BoardState {
    pub fn new() -> Self {
        Self::with_store(BoardStore::new())
    }

    pub fn with_store(store: BoardStore) -> Self {
        Self {
            store,
            selected_column: 0,
            selected_row: 0,
        }
    }

    /// Get tasks in a specific column
    pub fn tasks_in_column(&self, column: usize) -> Vec<&Task> {
        match self.store.columns().get(column) {
            Some(c) => self.store.tasks_in(c.id),
            None => vec![],
        }
    }

    /// Get the currently selected task
    pub fn selected_task(&self) -> Option<&Task> {
        let column_tasks = self.tasks_in_column(self.selected_column);
        column_tasks.get(self.selected_row).copied()
    }

    /// Move selection left
    pub fn select_left(&mut self) {
        if self.selected_column > 0 {
            self.selected_column -= 1;
            self.clamp_row();
        }
    }

    /// Move selection right
    pub fn select_right(&mut self) {
        if self.selected_column + 1 < self.store.columns().len() {
            self.selected_column += 1;
            self.clamp_row();
        }
    }

    /// Move selection up
    pub fn select_up(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        }
    }

    /// Move selection down
    pub fn select_down(&mut self) {
        let column_count = self.tasks_in_column(self.selected_column).len();
        if self.selected_row < column_count.saturating_sub(1) {
            self.selected_row += 1;
        }
    }

    /// Point the cursor at a task, wherever it is
    pub fn select_task(&mut self, task_id: &str) -> bool {
        let Some(status) = self.store.task(task_id).map(|t| t.status) else {
            return false;
        };
        let Some(column) = self.store.column_index(status) else {
            return false;
        };
        let row = self
            .store
            .tasks_in(status)
            .iter()
            .position(|t| t.id == task_id)
            .unwrap_or(0);
        self.selected_column = column;
        self.selected_row = row;
        true
    }

    /// Move the selected task one column and keep it selected
    pub fn move_selected_task(&mut self, direction: Direction) -> Option<MoveOutcome> {
        let task_id = self.selected_task()?.id.clone();
        let outcome = self.store.move_task(&task_id, direction);
        if matches!(outcome, MoveOutcome::Moved { .. }) {
            self.select_task(&task_id);
        }
        Some(outcome)
    }

    /// Create a task and select it. Blank titles are ignored.
    pub fn create_task(&mut self, title: &str) -> bool {
        let Some(task_id) = self.store.create_task(title).map(|t| t.id.clone()) else {
            return false;
        };
        self.select_task(&task_id);
        true
    }

    /// Ensure selected_row is valid for current column
    fn clamp_row(&mut self) {
        let column_count = self.tasks_in_column(self.selected_column).len();
        if column_count == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= column_count {
            self.selected_row = column_count - 1;
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}
