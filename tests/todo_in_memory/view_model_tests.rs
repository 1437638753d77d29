//! View model behaviour over a live in-memory store.

use crate::todo_in_memory::helpers::{service_for, store, texts};
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;
use todo_sync::{
    config::TodoConfig,
    todo::{
        adapters::memory::InMemoryTodoStore,
        domain::TodoFilter,
        view_model::{MISSING_TODO_MESSAGE, TodoViewModel},
    },
};

/// A second client's write shows up in the first client's filtered view.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn views_follow_writes_from_other_clients(store: Arc<InMemoryTodoStore>) {
    let mut mine = TodoViewModel::new(service_for(&store), Duration::from_secs(5));
    let theirs = TodoViewModel::new(service_for(&store), Duration::from_secs(5));
    mine.set_filter(TodoFilter::Active);

    let id = theirs.add("Their todo").await.expect("add");
    assert_eq!(texts(&mine.todos()), vec!["Their todo"]);

    theirs.toggle(id).await;
    assert!(mine.todos().is_empty());
    assert_eq!(mine.items_left_label(), "0 items left");
}

/// Editing a todo that another client just deleted shows a banner.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_after_remote_delete_reports_missing_todo(store: Arc<InMemoryTodoStore>) {
    let mine = TodoViewModel::with_config(service_for(&store), &TodoConfig::default());
    let theirs = TodoViewModel::with_config(service_for(&store), &TodoConfig::default());

    let id = mine.add("Soon gone").await.expect("add");
    assert!(theirs.delete(id).await);

    assert!(!mine.edit(id, "Too late").await);
    assert_eq!(mine.error().as_deref(), Some(MISSING_TODO_MESSAGE));
    assert_eq!(theirs.error(), None);
}

/// Validation banners disappear once the display window passes.
#[rstest]
#[tokio::test(start_paused = true)]
async fn validation_banner_clears_after_the_configured_window(store: Arc<InMemoryTodoStore>) {
    let config = TodoConfig {
        error_display_ms: 2_000,
        ..TodoConfig::default()
    };
    let view_model = TodoViewModel::with_config(service_for(&store), &config);

    assert_eq!(view_model.add("  ").await, None);
    assert!(view_model.error().is_some());

    tokio::time::sleep(Duration::from_millis(1_999)).await;
    assert!(view_model.error().is_some());

    tokio::time::sleep(Duration::from_millis(2)).await;
    tokio::task::yield_now().await;
    assert_eq!(view_model.error(), None);
}

/// Waiting on the view model resolves when the store changes.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn changed_resolves_after_a_write(store: Arc<InMemoryTodoStore>) {
    let mut view_model = TodoViewModel::new(service_for(&store), Duration::from_secs(5));
    let writer = service_for(&store);

    writer.add("ping").await.expect("add");
    let snapshot = tokio::time::timeout(Duration::from_secs(1), view_model.changed())
        .await
        .expect("snapshot arrives")
        .expect("store alive");

    assert_eq!(snapshot.len(), 1);
    assert_eq!(view_model.snapshot().revision(), snapshot.revision());
}
