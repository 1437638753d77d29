//! Given steps for todo list BDD scenarios.

use super::world::{TodoWorld, run_async, split_list};
use rstest_bdd_macros::given;

#[given("an empty todo list")]
fn empty_todo_list(world: &TodoWorld) -> Result<(), eyre::Report> {
    if !world.view_model.all_todos().is_empty() {
        return Err(eyre::eyre!("expected a fresh store"));
    }
    Ok(())
}

#[given(r#"the todos "{items}""#)]
fn existing_todos(world: &mut TodoWorld, items: String) -> Result<(), eyre::Report> {
    for item in split_list(&items) {
        run_async(world.view_model.add(&item))
            .ok_or_else(|| eyre::eyre!("failed to add {item}: {:?}", world.view_model.error()))?;
    }
    Ok(())
}

#[given(r#"the todo "{text}" is completed"#)]
fn todo_is_completed(world: &mut TodoWorld, text: String) -> Result<(), eyre::Report> {
    let id = world
        .view_model
        .all_todos()
        .iter()
        .find(|todo| todo.text().as_str() == text)
        .map(todo_sync::todo::domain::Todo::id)
        .ok_or_else(|| eyre::eyre!("no todo with text {text}"))?;
    if !run_async(world.view_model.toggle(id)) {
        return Err(eyre::eyre!("toggle failed for {text}"));
    }
    Ok(())
}
