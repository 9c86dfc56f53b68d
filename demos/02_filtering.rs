//! Demo 02: Filtering
//!
//! Shows how each filter selects from the same collection, and that
//! snapshots taken earlier keep their contents after later mutations.
//!
//! Run with: cargo run --example 02_filtering

use eyre::{Result, eyre};
use todolist::{Filter, TaskStore};

fn main() -> Result<()> {
    println!("TodoList Filtering Demo");
    println!("=======================\n");

    let mut store = TaskStore::new();

    let milk = store.add("buy milk").ok_or_else(|| eyre!("blank title"))?;
    let dog = store.add("walk dog").ok_or_else(|| eyre!("blank title"))?;
    store.add("write report").ok_or_else(|| eyre!("blank title"))?;
    store.add("   ");

    store.set_completed(milk, true);
    store.set_removed(dog, true);

    let before_purge = store.tasks();

    for filter in Filter::OPTIONS.into_iter().chain([Filter::parse("archived")]) {
        store.set_filter(filter);
        let titles: Vec<&str> = store.visible().iter().map(|task| task.title.as_str()).collect();
        println!("{:<16} ({:<10}) -> {:?}", store.filter().label(), store.filter(), titles);
    }
    println!();

    let purged = store.empty_trash();
    println!("Emptied trash: {} task(s) destroyed", purged);
    println!("Store now holds {} task(s)", store.len());
    println!("Earlier snapshot still holds {} task(s)", before_purge.len());

    let counts = store.counts();
    println!(
        "\nCounts: {} total, {} active, {} completed, {} in trash",
        counts.total, counts.active, counts.completed, counts.removed
    );

    Ok(())
}
