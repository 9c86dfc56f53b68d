//! Demo 01: Basic Session
//!
//! Drives a view through the same events the terminal front end emits and
//! prints the rendered result after each step.
//!
//! Run with: cargo run --example 01_basic_session

use eyre::Result;
use todolist::render::render_text;
use todolist::{Event, Filter, View};

fn main() -> Result<()> {
    println!("TodoList Basic Session");
    println!("======================\n");

    let mut view = View::new();

    println!("1. Adding tasks...");
    for title in ["buy milk", "walk dog", "write report"] {
        view.dispatch(Event::InputChanged(title.to_string()));
        view.dispatch(Event::Submit);
    }
    println!("{}\n", render_text(&view.model()));

    println!("2. Completing the oldest task...");
    let model = view.model();
    if let Some(row) = model.rows.last() {
        view.dispatch(Event::ToggleCompleted(row.id));
    }
    println!("{}\n", render_text(&view.model()));

    println!("3. Renaming the newest task...");
    let model = view.model();
    if let Some(row) = model.row(1) {
        view.dispatch(Event::EditTitle(row.id, "write quarterly report".to_string()));
    }
    println!("{}\n", render_text(&view.model()));

    println!("4. Moving 'walk dog' to the trash...");
    let model = view.model();
    if let Some(row) = model.rows.iter().find(|row| row.title.value == "walk dog") {
        view.dispatch(Event::ToggleRemoved(row.id));
    }
    view.dispatch(Event::SelectFilter(Filter::Removed));
    println!("{}\n", render_text(&view.model()));

    println!("5. Emptying the trash...");
    view.dispatch(Event::EmptyTrash);
    view.dispatch(Event::SelectFilter(Filter::All));
    println!("{}\n", render_text(&view.model()));

    println!("Done!");
    Ok(())
}
