// TodoList - In-memory task list with soft-delete trash and filtered views

pub mod command;
pub mod filter;
pub mod models;
pub mod render;
pub mod repl;
pub mod store;
pub mod view;

// Re-export main types for convenience
pub use filter::Filter;
pub use models::{Task, TaskCounts, TaskId};
pub use render::Format;
pub use repl::Session;
pub use store::{Snapshot, TaskStore};
pub use view::{Event, Outcome, View, ViewModel};
