// Status filters for the visible task list

use crate::models::Task;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::str::FromStr;

/// Which subset of tasks the view shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Incomplete,
    Removed,
    /// Any other selector value; shows every task outside the trash
    Unknown(String),
}

impl Filter {
    /// The fixed selector options, in display order
    pub const OPTIONS: [Filter; 4] = [Filter::All, Filter::Completed, Filter::Incomplete, Filter::Removed];

    /// Parse a selector value; never fails
    pub fn parse(value: &str) -> Self {
        match value {
            "all" => Filter::All,
            "completed" => Filter::Completed,
            "incomplete" => Filter::Incomplete,
            "removed" => Filter::Removed,
            other => Filter::Unknown(other.to_string()),
        }
    }

    /// Selector value
    pub fn as_str(&self) -> &str {
        match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Incomplete => "incomplete",
            Filter::Removed => "removed",
            Filter::Unknown(raw) => raw,
        }
    }

    /// Human-readable label shown in the selector
    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All tasks",
            Filter::Completed => "Completed tasks",
            Filter::Incomplete => "Current tasks",
            Filter::Removed => "Trash",
            Filter::Unknown(_) => "Active tasks",
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => task.completed && !task.removed,
            Filter::Incomplete => !task.completed && !task.removed,
            Filter::Removed => task.removed,
            Filter::Unknown(_) => !task.removed,
        }
    }

    /// Ordered subsequence of `tasks` passing this filter
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Filter::parse(s))
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Filter::parse(&raw))
    }
}
