// Rendering of the view model for the terminal

use crate::filter::Filter;
use crate::view::{Button, Checkbox, FilterSelector, RowAction, TaskRow, ViewModel};
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use eyre::{Context, Result};

/// Output format for a rendered view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub fn render(model: &ViewModel, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(render_text(model)),
        Format::Json => render_json(model),
    }
}

pub fn render_json(model: &ViewModel) -> Result<String> {
    serde_json::to_string_pretty(model).context("Failed to serialize view model")
}

/// Human-readable rendering; rows are numbered from 1 in display order
pub fn render_text(model: &ViewModel) -> String {
    let mut lines = vec![format!("{} {}", "Filter:".bold(), selector(&model.filter))];

    if let Some(form) = &model.add_form {
        let text = if form.text.is_empty() {
            "(empty)".dimmed()
        } else {
            form.text.normal()
        };
        lines.push(format!("{} > {} {}", "New task:".bold(), text, button(&form.submit)));
    }

    if let Some(empty_trash) = &model.empty_trash {
        lines.push(button(empty_trash).to_string());
    }

    if model.rows.is_empty() {
        lines.push(format!("  {}", "no tasks".dimmed()));
    }

    for (index, row) in model.rows.iter().enumerate() {
        lines.push(format!("{:>3}. {}", index + 1, task_row(row)));
    }

    let counts = &model.counts;
    lines.push(
        format!(
            "{} total: {} active, {} completed, {} in trash",
            counts.total, counts.active, counts.completed, counts.removed
        )
        .dimmed()
        .to_string(),
    );

    lines.join("\n")
}

fn selector(selector: &FilterSelector) -> String {
    let mut parts: Vec<String> = selector
        .options
        .iter()
        .map(|option| {
            if option.value == selector.selected {
                format!("[{}]", option.label).bold().cyan().to_string()
            } else {
                option.label.to_string()
            }
        })
        .collect();

    if let Filter::Unknown(raw) = &selector.selected {
        parts.push(format!("[{} ({})]", selector.selected.label(), raw).bold().cyan().to_string());
    }

    parts.join(" | ")
}

fn button(button: &Button) -> ColoredString {
    let text = format!("({})", button.label);
    if button.enabled { text.yellow() } else { text.dimmed() }
}

fn checkbox(checkbox: &Checkbox) -> ColoredString {
    let mark = if checkbox.checked { "[x]" } else { "[ ]" };
    if checkbox.enabled { mark.normal() } else { mark.dimmed() }
}

fn task_row(row: &TaskRow) -> String {
    let mut title = if row.title.value.is_empty() {
        "(untitled)".italic()
    } else {
        row.title.value.normal()
    };
    if row.completed {
        title = title.strikethrough();
    }
    if row.removed {
        title = title.red();
    } else if !row.title.enabled {
        title = title.dimmed();
    }

    let action = format!("({})", row.action.label());
    let action = match row.action {
        RowAction::Delete => action.yellow(),
        RowAction::Restore => action.green(),
    };

    let added = format!("added {}", row.created_at.format("%H:%M")).dimmed();

    format!("{} {} {} {}", checkbox(&row.checkbox), title, action, added)
}
