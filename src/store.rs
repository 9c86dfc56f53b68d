// In-memory task store with whole-collection replacement

use crate::filter::Filter;
use crate::models::{Task, TaskCounts, TaskId};
use std::sync::Arc;
use tracing::debug;

/// Immutable view of the collection at one point in time
pub type Snapshot = Arc<[Task]>;

/// Canonical task collection plus the current filter selection
///
/// Tasks are held newest-first. Every mutation builds a new collection and
/// swaps it in, so a [`Snapshot`] handed out earlier never changes underneath
/// its holder. All operations are total: requests that do not apply (unknown
/// id, task in the wrong state, blank title) are ignored and reported through
/// the return value.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Snapshot,
    filter: Filter,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Create an empty store showing all tasks
    pub fn new() -> Self {
        Self::with_filter(Filter::All)
    }

    /// Create an empty store with an initial filter
    pub fn with_filter(filter: Filter) -> Self {
        Self {
            tasks: Arc::from(Vec::new()),
            filter,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Current snapshot of the whole collection, newest first
    pub fn tasks(&self) -> Snapshot {
        Arc::clone(&self.tasks)
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Tasks passing the current filter, in collection order
    pub fn visible(&self) -> Vec<&Task> {
        self.filter.apply(&self.tasks)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether any task sits in the trash
    pub fn has_trash(&self) -> bool {
        self.tasks.iter().any(|task| task.removed)
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::tally(self.tasks.iter())
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Prepend a new active task
    ///
    /// Returns the new id, or `None` when the title is empty or blank.
    pub fn add(&mut self, title: &str) -> Option<TaskId> {
        if title.trim().is_empty() {
            debug!("add: blank title, ignoring");
            return None;
        }

        let task = Task::new(title);
        let id = task.id;

        let tasks: Vec<Task> = std::iter::once(task).chain(self.tasks.iter().cloned()).collect();
        self.tasks = tasks.into();

        debug!(%id, count = self.tasks.len(), "add: task created");
        Some(id)
    }

    /// Replace the title of an active task
    ///
    /// Empty titles are accepted here, unlike [`TaskStore::add`].
    pub fn edit_title(&mut self, id: TaskId, title: &str) -> bool {
        self.modify("edit_title", id, Task::is_editable, |task| {
            task.title = title.to_string();
        })
    }

    /// Set the completion flag of a task that is not in the trash
    pub fn set_completed(&mut self, id: TaskId, completed: bool) -> bool {
        self.modify("set_completed", id, Task::is_checkable, |task| {
            task.completed = completed;
        })
    }

    /// Move a task into the trash or restore it, regardless of completion
    pub fn set_removed(&mut self, id: TaskId, removed: bool) -> bool {
        self.modify("set_removed", id, |_| true, |task| {
            task.removed = removed;
        })
    }

    /// Permanently drop every task in the trash
    ///
    /// Returns the number of tasks destroyed.
    pub fn empty_trash(&mut self) -> usize {
        let before = self.tasks.len();

        let kept: Vec<Task> = self.tasks.iter().filter(|task| !task.removed).cloned().collect();
        self.tasks = kept.into();

        let purged = before - self.tasks.len();
        debug!(purged, remaining = self.tasks.len(), "empty_trash: done");
        purged
    }

    pub fn set_filter(&mut self, filter: Filter) {
        debug!(from = %self.filter, to = %filter, "set_filter");
        self.filter = filter;
    }

    /// Rebuild the collection with `change` applied to the task matching `id`
    ///
    /// Returns false without touching the collection when the task is missing
    /// or `allowed` rejects its current state.
    fn modify(
        &mut self,
        op: &'static str,
        id: TaskId,
        allowed: impl Fn(&Task) -> bool,
        mut change: impl FnMut(&mut Task),
    ) -> bool {
        let Some(target) = self.get(id) else {
            debug!(op, %id, "task not found, ignoring");
            return false;
        };

        if !allowed(target) {
            debug!(op, %id, completed = target.completed, removed = target.removed, "task locked, ignoring");
            return false;
        }

        let tasks: Vec<Task> = self
            .tasks
            .iter()
            .map(|task| {
                let mut task = task.clone();
                if task.id == id {
                    change(&mut task);
                }
                task
            })
            .collect();
        self.tasks = tasks.into();

        debug!(op, %id, "task updated");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|task| task.title.clone()).collect()
    }

    #[test]
    fn test_add_prepends_active_task() {
        let mut store = TaskStore::new();
        store.add("first").unwrap();
        let id = store.add("second").unwrap();

        assert_eq!(store.len(), 2);
        let tasks = store.tasks();
        let head = &tasks[0];
        assert_eq!(head.id, id);
        assert_eq!(head.title, "second");
        assert!(!head.completed);
        assert!(!head.removed);
    }

    #[test]
    fn test_add_blank_title_is_ignored() {
        let mut store = TaskStore::new();
        assert!(store.add("").is_none());
        assert!(store.add("   \t").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_produces_distinct_ids() {
        let mut store = TaskStore::new();
        let ids: HashSet<TaskId> = (0..50).map(|i| store.add(&format!("task {}", i)).unwrap()).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_edit_title_active_task() {
        let mut store = TaskStore::new();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();

        assert!(store.edit_title(a, "renamed"));
        assert_eq!(store.get(a).unwrap().title, "renamed");
        assert_eq!(store.get(b).unwrap().title, "b");
    }

    #[test]
    fn test_edit_title_allows_empty() {
        let mut store = TaskStore::new();
        let id = store.add("a").unwrap();
        assert!(store.edit_title(id, ""));
        assert_eq!(store.get(id).unwrap().title, "");
    }

    #[test]
    fn test_edit_title_completed_or_removed_is_ignored() {
        let mut store = TaskStore::new();
        let done = store.add("done").unwrap();
        let trashed = store.add("trashed").unwrap();
        store.set_completed(done, true);
        store.set_removed(trashed, true);

        assert!(!store.edit_title(done, "x"));
        assert!(!store.edit_title(trashed, "x"));
        assert_eq!(store.get(done).unwrap().title, "done");
        assert_eq!(store.get(trashed).unwrap().title, "trashed");
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut store = TaskStore::new();
        store.add("a").unwrap();
        let before = store.tasks();

        let ghost = TaskId::generate();
        assert!(!store.edit_title(ghost, "x"));
        assert!(!store.set_completed(ghost, true));
        assert!(!store.set_removed(ghost, true));
        assert_eq!(store.tasks(), before);
    }

    #[test]
    fn test_set_completed_requires_not_removed() {
        let mut store = TaskStore::new();
        let id = store.add("a").unwrap();
        store.set_removed(id, true);

        assert!(!store.set_completed(id, true));
        assert!(!store.get(id).unwrap().completed);
    }

    #[test]
    fn test_set_removed_ignores_completion() {
        let mut store = TaskStore::new();
        let id = store.add("a").unwrap();
        store.set_completed(id, true);

        assert!(store.set_removed(id, true));
        let task = store.get(id).unwrap();
        assert!(task.removed);
        assert!(task.completed);

        assert!(store.set_removed(id, false));
        assert!(!store.get(id).unwrap().removed);
    }

    #[test]
    fn test_completed_filter_views() {
        let mut store = TaskStore::new();
        let id = store.add("a").unwrap();
        store.set_completed(id, true);

        store.set_filter(Filter::Completed);
        assert_eq!(store.visible().len(), 1);
        store.set_filter(Filter::Incomplete);
        assert!(store.visible().is_empty());
    }

    #[test]
    fn test_soft_delete_keeps_task() {
        let mut store = TaskStore::new();
        let id = store.add("a").unwrap();
        store.set_removed(id, true);

        store.set_filter(Filter::Removed);
        assert_eq!(store.visible()[0].id, id);
        store.set_filter(Filter::All);
        assert_eq!(store.len(), 1);
        assert!(store.has_trash());
    }

    #[test]
    fn test_empty_trash_keeps_survivors_in_order() {
        let mut store = TaskStore::new();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        store.add("c").unwrap();
        store.add("d").unwrap();
        store.set_removed(a, true);
        store.set_removed(b, true);

        assert_eq!(store.empty_trash(), 2);
        assert!(!store.has_trash());
        assert_eq!(titles(&store.visible()), vec!["d", "c"]);
        assert_eq!(store.empty_trash(), 0);
    }

    #[test]
    fn test_set_filter_leaves_collection_alone() {
        let mut store = TaskStore::new();
        store.add("a").unwrap();
        let before = store.tasks();

        store.set_filter(Filter::Removed);
        assert!(Arc::ptr_eq(&before, &store.tasks()));
        assert_eq!(store.filter(), &Filter::Removed);
    }

    #[test]
    fn test_snapshot_survives_mutation() {
        let mut store = TaskStore::new();
        let id = store.add("a").unwrap();
        let snapshot = store.tasks();

        store.set_completed(id, true);
        store.add("b").unwrap();

        assert_eq!(snapshot.len(), 1);
        assert!(!snapshot[0].completed);
        assert!(store.get(id).unwrap().completed);
    }

    #[test]
    fn test_buy_milk_scenario() {
        let mut store = TaskStore::new();
        let id = store.add("buy milk").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].title, "buy milk");

        store.set_completed(id, true);
        store.set_filter(Filter::Incomplete);
        assert!(store.visible().is_empty());
        store.set_filter(Filter::Completed);
        assert_eq!(titles(&store.visible()), vec!["buy milk"]);

        store.set_removed(id, true);
        assert!(store.visible().is_empty());
        store.set_filter(Filter::Removed);
        assert_eq!(titles(&store.visible()), vec!["buy milk"]);

        store.empty_trash();
        assert!(store.is_empty());
    }

    #[test]
    fn test_counts() {
        let mut store = TaskStore::new();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        store.add("c").unwrap();
        store.set_completed(a, true);
        store.set_removed(b, true);

        let counts = store.counts();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.active, 1);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.removed, 1);
    }
}
