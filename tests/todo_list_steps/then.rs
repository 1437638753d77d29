//! Then steps for todo list BDD scenarios.

use super::world::{TodoWorld, split_list};
use rstest_bdd_macros::then;
use todo_sync::todo::{domain::TodoFilter, view_model::derive::filter_todos};

#[then(r#"the list reads "{items}""#)]
fn list_reads(world: &TodoWorld, items: String) -> Result<(), eyre::Report> {
    let actual: Vec<String> = world
        .view_model
        .todos()
        .iter()
        .map(|todo| todo.text().to_string())
        .collect();
    let expected = split_list(&items);
    if actual != expected {
        return Err(eyre::eyre!("expected {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the orders are "{orders}""#)]
fn orders_are(world: &TodoWorld, orders: String) -> Result<(), eyre::Report> {
    let actual: Vec<String> = world
        .view_model
        .all_todos()
        .iter()
        .map(|todo| todo.order().to_string())
        .collect();
    let expected = split_list(&orders);
    if actual != expected {
        return Err(eyre::eyre!("expected orders {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the footer reads "{label}""#)]
fn footer_reads(world: &TodoWorld, label: String) -> Result<(), eyre::Report> {
    let actual = world.view_model.items_left_label();
    if actual != label {
        return Err(eyre::eyre!("expected footer {label:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the error reads "{message}""#)]
fn error_reads(world: &TodoWorld, message: String) -> Result<(), eyre::Report> {
    match world.view_model.error() {
        Some(actual) if actual == message => Ok(()),
        other => Err(eyre::eyre!("expected error {message:?}, found {other:?}")),
    }
}

#[then("the list is empty")]
fn list_is_empty(world: &TodoWorld) -> Result<(), eyre::Report> {
    let count = world.view_model.all_todos().len();
    if count != 0 {
        return Err(eyre::eyre!("expected no todos, found {count}"));
    }
    Ok(())
}

#[then("the list has {count:usize} todos")]
fn list_has(world: &TodoWorld, count: usize) -> Result<(), eyre::Report> {
    let actual = world.view_model.all_todos().len();
    if actual != count {
        return Err(eyre::eyre!("expected {count} todos, found {actual}"));
    }
    Ok(())
}

#[then(r#"the "{filter}" filter shows no todos"#)]
fn filter_shows_none(world: &TodoWorld, filter: String) -> Result<(), eyre::Report> {
    let parsed = TodoFilter::try_from(filter.as_str())?;
    let shown = filter_todos(&world.view_model.all_todos(), parsed);
    if !shown.is_empty() {
        return Err(eyre::eyre!("expected no {filter} todos, found {}", shown.len()));
    }
    Ok(())
}
