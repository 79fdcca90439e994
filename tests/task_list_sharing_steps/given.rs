//! Given steps for task list sharing BDD scenarios.

use super::world::{SharingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasklists::task_list::services::CreateTaskListRequest;
use tasklists::user::services::AddUserRequest;

#[given(r#"a registered user "{name}""#)]
fn registered_user(world: &mut SharingWorld, name: String) -> Result<(), eyre::Report> {
    let id = run_async(world.users.add_user(AddUserRequest::new(name.as_str())))
        .wrap_err("register scenario user")?
        .into_inner();
    world.registered.insert(name, id);
    Ok(())
}

#[given(r#""{owner}" owns a task list named "{list_name}""#)]
fn owned_task_list(
    world: &mut SharingWorld,
    owner: String,
    list_name: String,
) -> Result<(), eyre::Report> {
    let context = world.context(&owner)?;
    let id = run_async(
        world
            .task_lists
            .create_task_list(&context, CreateTaskListRequest::new(list_name)),
    )
    .wrap_err("create scenario task list")?
    .into_inner();
    world.task_list_id = Some(id);
    Ok(())
}

#[given(r#""{actor}" has shared the task list with "{friend}""#)]
fn shared_task_list(
    world: &mut SharingWorld,
    actor: String,
    friend: String,
) -> Result<(), eyre::Report> {
    let context = world.context(&actor)?;
    let friend_id = world.user_id(&friend)?;
    let id = world.task_list_id()?;
    run_async(world.task_lists.add_connection(&context, id, friend_id))
        .wrap_err("share scenario task list")?;
    Ok(())
}
