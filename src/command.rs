// Line-oriented command language for the interactive session

use crate::filter::Filter;
use crate::view::{Event, RowAction, TaskRow, ViewModel};
use clap::{CommandFactory, Parser, Subcommand};
use eyre::{Result, eyre};

#[derive(Debug, Parser)]
#[command(
    name = "commands",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

/// One session command
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Select which tasks are shown (all, completed, incomplete, removed)
    Filter { value: String },

    /// Set the new-task input text
    Type {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Submit the new-task form, optionally setting its text first
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Tick or untick the task at row N
    Toggle { row: usize },

    /// Change the title of the task at row N
    Edit {
        row: usize,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        title: Vec<String>,
    },

    /// Move the task at row N to the trash
    Delete { row: usize },

    /// Bring the task at row N back from the trash
    Restore { row: usize },

    /// Permanently drop everything in the trash
    Empty,

    /// Render the list again
    Show,

    /// Print this help
    Help,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// What the session should do with a parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Dispatch(Vec<Event>),
    Show,
    Help,
    Quit,
}

/// Parse one input line
///
/// Blank lines and `#` comments yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parsed = Line::try_parse_from(line.split_whitespace()).map_err(|e| {
        let rendered = e.render().to_string();
        let message = rendered.strip_prefix("error: ").unwrap_or(&rendered);
        eyre!("{}", message.trim_end())
    })?;
    Ok(Some(parsed.command))
}

/// Help text listing every command
pub fn help() -> String {
    Line::command().render_help().to_string()
}

impl Command {
    /// Resolve row numbers against the rendered view and produce view events
    pub fn resolve(self, model: &ViewModel) -> Result<Action> {
        let action = match self {
            Command::Filter { value } => Action::Dispatch(vec![Event::SelectFilter(Filter::parse(&value))]),
            Command::Type { text } => Action::Dispatch(vec![Event::InputChanged(text.join(" "))]),
            Command::Add { text } => {
                let mut events = Vec::new();
                if !text.is_empty() {
                    events.push(Event::InputChanged(text.join(" ")));
                }
                events.push(Event::Submit);
                Action::Dispatch(events)
            }
            Command::Toggle { row } => Action::Dispatch(vec![Event::ToggleCompleted(lookup(model, row)?.id)]),
            Command::Edit { row, title } => {
                Action::Dispatch(vec![Event::EditTitle(lookup(model, row)?.id, title.join(" "))])
            }
            Command::Delete { row } => Action::Dispatch(vec![press(model, row, RowAction::Delete)?]),
            Command::Restore { row } => Action::Dispatch(vec![press(model, row, RowAction::Restore)?]),
            Command::Empty => Action::Dispatch(vec![Event::EmptyTrash]),
            Command::Show => Action::Show,
            Command::Help => Action::Help,
            Command::Quit => Action::Quit,
        };
        Ok(action)
    }
}

fn lookup(model: &ViewModel, row: usize) -> Result<&TaskRow> {
    model
        .row(row)
        .ok_or_else(|| eyre!("No task at row {} ({} shown)", row, model.rows.len()))
}

/// Press a row's action button, checking it carries the expected label
fn press(model: &ViewModel, row: usize, expected: RowAction) -> Result<Event> {
    let target = lookup(model, row)?;
    if target.action != expected {
        return Err(eyre!(
            "Task at row {} offers '{}', not '{}'",
            row,
            target.action.label(),
            expected.label()
        ));
    }
    Ok(Event::ToggleRemoved(target.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::View;

    fn view_with(titles: &[&str]) -> View {
        let mut view = View::new();
        for title in titles {
            view.dispatch(Event::InputChanged(title.to_string()));
            view.dispatch(Event::Submit);
        }
        view
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("# setup").unwrap(), None);
    }

    #[test]
    fn test_parse_multi_word_title() {
        let command = parse("add buy  oat milk").unwrap().unwrap();
        assert_eq!(
            command,
            Command::Add {
                text: vec!["buy".to_string(), "oat".to_string(), "milk".to_string()]
            }
        );
    }

    #[test]
    fn test_parse_hyphenated_title() {
        let command = parse("add -- not a flag").unwrap().unwrap();
        match command {
            Command::Add { text } => assert!(text.join(" ").contains("not a flag")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_exit_alias() {
        assert_eq!(parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("frobnicate").is_err());
        assert!(parse("toggle").is_err());
        assert!(parse("toggle two").is_err());
    }

    #[test]
    fn test_parse_error_message_has_no_prefix() {
        let err = parse("bogus").unwrap_err().to_string();
        assert!(!err.starts_with("error:"), "unexpected message: {}", err);
        assert!(err.contains("bogus"));
    }

    #[test]
    fn test_help_lists_commands() {
        let text = help();
        for name in ["filter", "add", "toggle", "edit", "delete", "restore", "empty", "quit"] {
            assert!(text.contains(name), "help is missing {}", name);
        }
    }

    #[test]
    fn test_resolve_add_with_and_without_text() {
        let model = View::new().model();

        let action = Command::Add {
            text: vec!["buy".to_string(), "milk".to_string()],
        }
        .resolve(&model)
        .unwrap();
        assert_eq!(
            action,
            Action::Dispatch(vec![Event::InputChanged("buy milk".to_string()), Event::Submit])
        );

        let action = Command::Add { text: vec![] }.resolve(&model).unwrap();
        assert_eq!(action, Action::Dispatch(vec![Event::Submit]));
    }

    #[test]
    fn test_resolve_rows() {
        let model = view_with(&["a", "b"]).model();
        let second = model.rows[1].id;

        let action = Command::Toggle { row: 2 }.resolve(&model).unwrap();
        assert_eq!(action, Action::Dispatch(vec![Event::ToggleCompleted(second)]));

        let action = Command::Edit {
            row: 2,
            title: vec![],
        }
        .resolve(&model)
        .unwrap();
        assert_eq!(action, Action::Dispatch(vec![Event::EditTitle(second, String::new())]));

        assert!(Command::Toggle { row: 0 }.resolve(&model).is_err());
        assert!(Command::Toggle { row: 3 }.resolve(&model).is_err());
    }

    #[test]
    fn test_resolve_delete_and_restore_check_label() {
        let mut view = view_with(&["a"]);
        let model = view.model();
        assert!(Command::Restore { row: 1 }.resolve(&model).is_err());
        let action = Command::Delete { row: 1 }.resolve(&model).unwrap();
        let Action::Dispatch(events) = action else {
            panic!("expected dispatch");
        };
        for event in events {
            view.dispatch(event);
        }

        let model = view.model();
        assert!(Command::Delete { row: 1 }.resolve(&model).is_err());
        assert!(Command::Restore { row: 1 }.resolve(&model).is_ok());
    }

    #[test]
    fn test_resolve_filter_accepts_unknown() {
        let model = View::new().model();
        let action = Command::Filter {
            value: "someday".to_string(),
        }
        .resolve(&model)
        .unwrap();
        assert_eq!(
            action,
            Action::Dispatch(vec![Event::SelectFilter(Filter::Unknown("someday".to_string()))])
        );
    }
}
