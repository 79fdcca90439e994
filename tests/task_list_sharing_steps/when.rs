//! When steps for task list sharing BDD scenarios.

use super::world::{SharingWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#""{actor}" shares the task list with "{friend}""#)]
fn share_task_list(
    world: &mut SharingWorld,
    actor: String,
    friend: String,
) -> Result<(), eyre::Report> {
    let context = world.context(&actor)?;
    let friend_id = world.user_id(&friend)?;
    let id = world.task_list_id()?;
    let result = run_async(world.task_lists.add_connection(&context, id, friend_id));
    world.last_result = Some(result.map(|_| ()));
    Ok(())
}

#[when(r#""{actor}" reads the task list"#)]
fn read_task_list(world: &mut SharingWorld, actor: String) -> Result<(), eyre::Report> {
    let context = world.context(&actor)?;
    let id = world.task_list_id()?;
    let result = run_async(world.task_lists.get_task_list(&context, id));
    world.last_result = Some(result.map(|_| ()));
    Ok(())
}

#[when(r#""{actor}" deletes the task list"#)]
fn delete_task_list(world: &mut SharingWorld, actor: String) -> Result<(), eyre::Report> {
    let context = world.context(&actor)?;
    let id = world.task_list_id()?;
    let result = run_async(world.task_lists.delete_task_list(&context, id));
    world.last_result = Some(result.map(|_| ()));
    Ok(())
}
