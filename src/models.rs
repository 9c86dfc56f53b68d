// Data models for TodoList

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque task identifier
///
/// Backed by a UUIDv7, so ids are time-ordered and never collide within a
/// session even when tasks are created in the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a fresh id
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub removed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create an active task with a fresh id
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TaskId::generate(),
            title: title.into(),
            completed: false,
            removed: false,
            created_at: Utc::now(),
        }
    }

    /// Title may only change while the task is active
    pub fn is_editable(&self) -> bool {
        !self.completed && !self.removed
    }

    /// Completion may only change while the task is out of the trash
    pub fn is_checkable(&self) -> bool {
        !self.removed
    }
}

/// Per-status tallies over the whole collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub removed: usize,
}

impl TaskCounts {
    pub fn tally<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut counts, task| {
            counts.total += 1;
            if task.removed {
                counts.removed += 1;
            } else if task.completed {
                counts.completed += 1;
            } else {
                counts.active += 1;
            }
            counts
        })
    }
}
