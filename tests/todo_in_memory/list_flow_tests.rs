//! End-to-end list editing through the todo service.

use crate::todo_in_memory::helpers::{orders, runtime, service_for, store, texts};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use todo_sync::todo::adapters::memory::InMemoryTodoStore;
use tokio::runtime::Runtime;

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Adding two todos and dragging the second above the first.
#[rstest]
fn add_then_drag_to_top(runtime: io::Result<Runtime>, store: Arc<InMemoryTodoStore>) -> TestResult {
    let rt = runtime?;
    let service = service_for(&store);

    rt.block_on(service.add("Buy milk"))?;
    rt.block_on(service.add("Walk dog"))?;
    let moved = rt.block_on(service.reorder(1, 0))?;

    let todos = rt.block_on(service.get_todos())?;
    assert!(moved);
    assert_eq!(texts(&todos), vec!["Walk dog", "Buy milk"]);
    assert_eq!(orders(&todos), vec![1, 2]);
    Ok(())
}

/// A longer session touching every operation.
#[rstest]
fn full_editing_session(runtime: io::Result<Runtime>, store: Arc<InMemoryTodoStore>) -> TestResult {
    let rt = runtime?;
    let service = service_for(&store);

    let seeded = rt.block_on(service.seed())?;
    assert_eq!(seeded, 10);

    let todos = rt.block_on(service.get_todos())?;
    let call_mom = todos
        .iter()
        .find(|todo| todo.text().as_str() == "Call mom")
        .map(|todo| todo.id())
        .ok_or("sample todo missing")?;
    rt.block_on(service.edit(call_mom, "Call mom back"))?;
    rt.block_on(service.toggle(call_mom))?;
    rt.block_on(service.reorder(7, 0))?;
    let cleared = rt.block_on(service.clear_completed())?;
    let added = rt.block_on(service.add("Water the plants"))?;

    let todos = rt.block_on(service.get_todos())?;
    assert_eq!(cleared, 2);
    assert_eq!(todos.len(), 9);
    assert!(todos.iter().all(|todo| !todo.is_completed()));
    assert_eq!(todos.last().map(|todo| todo.id()), Some(added));
    assert_eq!(orders(&todos).last(), Some(&11));
    assert!(!texts(&todos).contains(&"Call mom back".to_owned()));
    Ok(())
}

/// Deleting then toggling the same todo is a silent no-op.
#[rstest]
fn toggle_after_delete_is_ignored(
    runtime: io::Result<Runtime>,
    store: Arc<InMemoryTodoStore>,
) -> TestResult {
    let rt = runtime?;
    let service = service_for(&store);

    let id = rt.block_on(service.add("Ephemeral"))?;
    assert!(rt.block_on(service.delete(id))?);

    assert_eq!(rt.block_on(service.toggle(id))?, None);
    assert_eq!(store.count()?, 0);
    Ok(())
}
