//! Then steps for task list sharing BDD scenarios.

use super::world::{SharingWorld, run_async};
use rstest_bdd_macros::then;
use tasklists::error::{Classify, ErrorKind};

#[then("the request succeeds")]
fn request_succeeds(world: &SharingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing request result in scenario world"))?;
    result
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected request failure: {err}"))?;
    Ok(())
}

#[then(r#"the request fails as "{kind}" with message "{message}""#)]
fn request_fails(
    world: &SharingWorld,
    kind: String,
    message: String,
) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing request result in scenario world"))?;
    let Err(err) = result else {
        return Err(eyre::eyre!("expected the request to fail as {kind}"));
    };

    if err.kind().as_str() != kind {
        return Err(eyre::eyre!("expected {kind} failure, got {}", err.kind()));
    }
    if err.to_string() != message {
        return Err(eyre::eyre!("expected message {message:?}, got {:?}", err.to_string()));
    }
    Ok(())
}

#[then(r#""{reader}" can read the task list owned by "{owner}""#)]
fn reader_sees_owner(
    world: &SharingWorld,
    reader: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let context = world.context(&reader)?;
    let id = world.task_list_id()?;
    let details = run_async(world.task_lists.get_task_list(&context, id))
        .map_err(|err| eyre::eyre!("read failed: {err}"))?;

    if details.owner_name != owner {
        return Err(eyre::eyre!(
            "expected owner {owner}, found {}",
            details.owner_name
        ));
    }
    Ok(())
}

#[then(r#"the task list is shared with "{friend}""#)]
fn list_is_shared_with(world: &SharingWorld, friend: String) -> Result<(), eyre::Report> {
    let id = world.task_list_id()?;
    let friend_context = world.context(&friend)?;
    let connections = run_async(world.task_lists.list_connections(&friend_context, id))
        .map_err(|err| eyre::eyre!("listing connections failed: {err}"))?;

    let names: Vec<_> = connections.iter().map(|view| view.name.as_str()).collect();
    if names != [friend.as_str()] {
        return Err(eyre::eyre!("expected only {friend} connected, found {names:?}"));
    }
    Ok(())
}

#[then(r#"the task list no longer exists for "{actor}""#)]
fn list_is_gone(world: &SharingWorld, actor: String) -> Result<(), eyre::Report> {
    let context = world.context(&actor)?;
    let id = world.task_list_id()?;
    let result = run_async(world.task_lists.get_task_list(&context, id));

    match result {
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        other => Err(eyre::eyre!("expected task list to be gone, got {other:?}")),
    }
}
