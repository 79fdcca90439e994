//! In-memory integration tests for sharing task lists between users.

use super::helpers::{App, app};
use rstest::rstest;
use tasklists::error::{Classify, ErrorKind};
use tasklists::pagination::PageQuery;
use tasklists::task_list::services::UpdateTaskListRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn shared_list_lifecycle_follows_ownership_rules(app: App) {
    let (_owner_id, owner) = app.register("Una").await;
    let (friend_id, friend) = app.register("Vic").await;
    let (_stranger_id, stranger) = app.register("Wes").await;

    let id = app.create_list(&owner, "Groceries").await;
    let added = app
        .task_lists
        .add_connection(&owner, id, friend_id)
        .await
        .expect("owner may share the list");
    assert!(added.is_created());

    let details = app
        .task_lists
        .get_task_list(&friend, id)
        .await
        .expect("connected user may read the list");
    assert_eq!(details.name, "Groceries");
    assert_eq!(details.owner_name, "Una");

    let stranger_read = app
        .task_lists
        .get_task_list(&stranger, id)
        .await
        .expect_err("stranger must not read the list");
    assert_eq!(stranger_read.kind(), ErrorKind::Forbidden);

    let friend_delete = app
        .task_lists
        .delete_task_list(&friend, id)
        .await
        .expect_err("only the owner may delete");
    assert_eq!(friend_delete.kind(), ErrorKind::Forbidden);
    assert_eq!(friend_delete.to_string(), "User is not an owner of this task list.");

    let deleted = app
        .task_lists
        .delete_task_list(&owner, id)
        .await
        .expect("owner may delete");
    assert!(deleted.is_deleted());

    let after_delete = app
        .task_lists
        .get_task_list(&owner, id)
        .await
        .expect_err("deleted list is gone");
    assert_eq!(after_delete.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn shared_list_appears_in_both_listings(app: App) {
    let (_owner_id, owner) = app.register("Una").await;
    let (friend_id, friend) = app.register("Vic").await;
    let shared = app.create_list(&owner, "Shared").await;
    app.create_list(&owner, "Private").await;
    app.task_lists
        .add_connection(&owner, shared, friend_id)
        .await
        .expect("owner may share the list");

    let owners = app
        .task_lists
        .list_task_lists(&owner, &PageQuery::default())
        .await
        .expect("listing should succeed");
    let friends = app
        .task_lists
        .list_task_lists(&friend, &PageQuery::default())
        .await
        .expect("listing should succeed");

    assert_eq!(owners.pagination.total_count, 2);
    assert_eq!(friends.pagination.total_count, 1);
    let visible: Vec<_> = friends.data.iter().map(|summary| summary.id).collect();
    assert_eq!(visible, vec![shared]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn connected_user_may_rename_and_manage_connections(app: App) {
    let (_owner_id, owner) = app.register("Una").await;
    let (friend_id, friend) = app.register("Vic").await;
    let (third_id, _third) = app.register("Wes").await;
    let id = app.create_list(&owner, "Groceries").await;
    app.task_lists
        .add_connection(&owner, id, friend_id)
        .await
        .expect("owner may share the list");

    app.task_lists
        .update_task_list(&friend, id, UpdateTaskListRequest::new("  Weekly shop  "))
        .await
        .expect("connected user may rename");
    app.task_lists
        .add_connection(&friend, id, third_id)
        .await
        .expect("connected user may share further");

    let details = app
        .task_lists
        .get_task_list(&owner, id)
        .await
        .expect("owner may read the list");
    assert_eq!(details.name, "Weekly shop");
    let connections = app
        .task_lists
        .list_connections(&owner, id)
        .await
        .expect("owner may list connections");
    let names: Vec<_> = connections.iter().map(|view| view.name.as_str()).collect();
    assert_eq!(names, vec!["Vic", "Wes"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removed_connection_loses_access(app: App) {
    let (owner_id, owner) = app.register("Una").await;
    let (friend_id, friend) = app.register("Vic").await;
    let id = app.create_list(&owner, "Groceries").await;
    app.task_lists
        .add_connection(&owner, id, friend_id)
        .await
        .expect("owner may share the list");

    let owner_removal = app
        .task_lists
        .remove_connection(&friend, id, owner_id)
        .await
        .expect_err("owner cannot be removed");
    assert_eq!(owner_removal.to_string(), "You cannot remove an owner.");

    app.task_lists
        .remove_connection(&owner, id, friend_id)
        .await
        .expect("owner may unshare the list");
    let read = app
        .task_lists
        .get_task_list(&friend, id)
        .await
        .expect_err("former connection must not read the list");
    assert_eq!(read.kind(), ErrorKind::Forbidden);
    let second_removal = app
        .task_lists
        .remove_connection(&owner, id, friend_id)
        .await
        .expect_err("user is no longer connected");
    assert_eq!(second_removal.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn connecting_twice_or_connecting_the_owner_conflicts(app: App) {
    let (owner_id, owner) = app.register("Una").await;
    let (friend_id, _friend) = app.register("Vic").await;
    let id = app.create_list(&owner, "Groceries").await;
    app.task_lists
        .add_connection(&owner, id, friend_id)
        .await
        .expect("owner may share the list");

    let again = app
        .task_lists
        .add_connection(&owner, id, friend_id)
        .await
        .expect_err("duplicate connection is rejected");
    let owner_again = app
        .task_lists
        .add_connection(&owner, id, owner_id)
        .await
        .expect_err("owner cannot be connected");

    assert_eq!(again.kind(), ErrorKind::Conflict);
    assert_eq!(again.to_string(), "User is already connected to this task list.");
    assert_eq!(owner_again.kind(), ErrorKind::Conflict);
    assert_eq!(owner_again.to_string(), "User is the owner of this task list.");
}
