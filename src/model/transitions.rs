//! Status transition table.
//!
//! Each status maps to its neighbours in the flow. New statuses (a branching
//! `Blocked` state, say) are added by extending `TaskStatus` and this table.

use super::models::{Direction, TaskStatus};

/// Neighbours of a status in the flow. `None` marks a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLink {
    pub prev: Option<TaskStatus>,
    pub next: Option<TaskStatus>,
}

const STATUS_FLOW: &[(TaskStatus, StatusLink)] = &[
    (
        TaskStatus::Todo,
        StatusLink {
            prev: None,
            next: Some(TaskStatus::InProgress),
        },
    ),
    (
        TaskStatus::InProgress,
        StatusLink {
            prev: Some(TaskStatus::Todo),
            next: Some(TaskStatus::Done),
        },
    ),
    (
        TaskStatus::Done,
        StatusLink {
            prev: Some(TaskStatus::InProgress),
            next: None,
        },
    ),
];

/// Look up the flow entry for a status
pub fn link(status: TaskStatus) -> Option<StatusLink> {
    STATUS_FLOW
        .iter()
        .find(|(s, _)| *s == status)
        .map(|(_, link)| *link)
}

/// Target status for a move, or `None` when `current` is already at the boundary
pub fn next_status(current: TaskStatus, direction: Direction) -> Option<TaskStatus> {
    let link = link(current)?;
    match direction {
        Direction::Left => link.prev,
        Direction::Right => link.next,
    }
}

/// Like [`next_status`] but clamps to `current` at a boundary
pub fn resolve_status(current: TaskStatus, direction: Direction) -> TaskStatus {
    next_status(current, direction).unwrap_or(current)
}
