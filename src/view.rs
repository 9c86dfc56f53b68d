// View state: controls derived from the store and the events they emit

use crate::filter::Filter;
use crate::models::{Task, TaskCounts, TaskId};
use crate::store::TaskStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// User interaction aimed at one of the rendered controls
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Filter selector changed
    SelectFilter(Filter),
    /// Add-form text input changed
    InputChanged(String),
    /// Add form submitted
    Submit,
    /// Row checkbox clicked
    ToggleCompleted(TaskId),
    /// Row title field changed
    EditTitle(TaskId, String),
    /// Row delete/restore button pressed
    ToggleRemoved(TaskId),
    /// Empty-trash button pressed
    EmptyTrash,
}

/// Result of dispatching an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The targeted control was hidden or disabled, or the store declined
    Ignored,
}

impl From<bool> for Outcome {
    fn from(applied: bool) -> Self {
        if applied { Outcome::Applied } else { Outcome::Ignored }
    }
}

/// Top-level session state: the task store plus the add-form input text
#[derive(Debug, Clone, Default)]
pub struct View {
    store: TaskStore,
    input: String,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: Filter) -> Self {
        Self {
            store: TaskStore::with_filter(filter),
            input: String::new(),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Current add-form text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The add form is hidden only while viewing completed tasks
    pub fn add_form_visible(&self) -> bool {
        !matches!(self.store.filter(), Filter::Completed)
    }

    pub fn empty_trash_visible(&self) -> bool {
        matches!(self.store.filter(), Filter::Removed)
    }

    /// Route an event to the store if its control is visible and enabled
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        debug!(?event, "dispatch");

        let outcome = match event {
            Event::SelectFilter(filter) => {
                self.store.set_filter(filter);
                Outcome::Applied
            }
            Event::InputChanged(text) => {
                if !self.add_form_visible() {
                    return Outcome::Ignored;
                }
                self.input = text;
                Outcome::Applied
            }
            Event::Submit => self.submit(),
            Event::ToggleCompleted(id) => match self.visible_task(id) {
                Some(task) if task.is_checkable() => {
                    let completed = !task.completed;
                    self.store.set_completed(id, completed).into()
                }
                _ => Outcome::Ignored,
            },
            Event::EditTitle(id, title) => match self.visible_task(id) {
                Some(task) if task.is_editable() => self.store.edit_title(id, &title).into(),
                _ => Outcome::Ignored,
            },
            Event::ToggleRemoved(id) => match self.visible_task(id) {
                Some(task) => {
                    let removed = !task.removed;
                    self.store.set_removed(id, removed).into()
                }
                None => Outcome::Ignored,
            },
            Event::EmptyTrash => {
                if self.empty_trash_visible() && self.store.has_trash() {
                    self.store.empty_trash();
                    Outcome::Applied
                } else {
                    Outcome::Ignored
                }
            }
        };

        debug!(?outcome, "dispatch: done");
        outcome
    }

    fn submit(&mut self) -> Outcome {
        if !self.add_form_visible() || self.input.is_empty() {
            return Outcome::Ignored;
        }

        match self.store.add(&self.input) {
            Some(_) => {
                self.input.clear();
                Outcome::Applied
            }
            None => Outcome::Ignored,
        }
    }

    /// Only rendered rows can receive row events
    fn visible_task(&self, id: TaskId) -> Option<&Task> {
        self.store.get(id).filter(|task| self.store.filter().matches(task))
    }

    /// Build the renderable state of every control
    pub fn model(&self) -> ViewModel {
        let filter = self.store.filter().clone();

        let add_form = self.add_form_visible().then(|| AddForm {
            text: self.input.clone(),
            submit: Button {
                label: "add",
                enabled: true,
            },
        });

        let empty_trash = self.empty_trash_visible().then(|| Button {
            label: "empty trash",
            enabled: self.store.has_trash(),
        });

        let rows = self.store.visible().into_iter().map(TaskRow::from).collect();

        ViewModel {
            filter: FilterSelector {
                options: Filter::OPTIONS
                    .into_iter()
                    .map(|value| FilterOption {
                        label: value.label(),
                        value,
                    })
                    .collect(),
                selected: filter,
            },
            add_form,
            empty_trash,
            rows,
            counts: self.store.counts(),
        }
    }
}

/// Immutable snapshot of everything the view renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub filter: FilterSelector,
    pub add_form: Option<AddForm>,
    pub empty_trash: Option<Button>,
    pub rows: Vec<TaskRow>,
    pub counts: TaskCounts,
}

impl ViewModel {
    /// Row by its 1-based display number
    pub fn row(&self, number: usize) -> Option<&TaskRow> {
        number.checked_sub(1).and_then(|index| self.rows.get(index))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSelector {
    pub selected: Filter,
    pub options: Vec<FilterOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOption {
    pub value: Filter,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddForm {
    pub text: String,
    pub submit: Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Checkbox {
    pub checked: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextField {
    pub value: String,
    pub enabled: bool,
}

/// What a row's action button does; doubles as its label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowAction {
    Delete,
    Restore,
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            RowAction::Delete => "delete",
            RowAction::Restore => "restore",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    pub id: TaskId,
    pub checkbox: Checkbox,
    pub title: TextField,
    pub action: RowAction,
    /// Underlying flags, for styling
    pub completed: bool,
    pub removed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            checkbox: Checkbox {
                checked: task.completed,
                enabled: task.is_checkable(),
            },
            title: TextField {
                value: task.title.clone(),
                enabled: task.is_editable(),
            },
            action: if task.removed { RowAction::Restore } else { RowAction::Delete },
            completed: task.completed,
            removed: task.removed,
            created_at: task.created_at,
        }
    }
}
