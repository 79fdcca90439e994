//! In-memory integration tests for tasks inside shared lists.

use super::helpers::{App, app};
use chrono::{Duration, Utc};
use rstest::rstest;
use tasklists::error::{Classify, ErrorKind};
use tasklists::pagination::PageQuery;
use tasklists::task::services::{CreateTaskRequest, UpdateTaskRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn connected_user_completes_task_created_by_owner(app: App) {
    let (_owner_id, owner) = app.register("Una").await;
    let (friend_id, friend) = app.register("Vic").await;
    let list = app.create_list(&owner, "Groceries").await;
    app.task_lists
        .add_connection(&owner, list, friend_id)
        .await
        .expect("owner may share the list");

    let due = Utc::now() + Duration::days(2);
    let task_id = app
        .tasks
        .create_task(
            &owner,
            list,
            CreateTaskRequest::new("Milk")
                .with_description("Two litres")
                .with_due_date(due),
        )
        .await
        .expect("owner may add tasks")
        .into_inner();
    app.tasks
        .set_task_completion(&friend, task_id, true)
        .await
        .expect("connected user may complete tasks");

    let page = app
        .tasks
        .list_tasks(&owner, list, &PageQuery::default())
        .await
        .expect("listing should succeed");
    let task = page.data.first().expect("one task is listed");
    assert_eq!(page.pagination.total_count, 1);
    assert_eq!(task.id, task_id);
    assert_eq!(task.description.as_deref(), Some("Two litres"));
    assert_eq!(task.due_date, Some(due));
    assert!(task.is_completed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_every_editable_field(app: App) {
    let (_owner_id, owner) = app.register("Una").await;
    let list = app.create_list(&owner, "Chores").await;
    let task_id = app
        .tasks
        .create_task(
            &owner,
            list,
            CreateTaskRequest::new("Laundry").with_description("Whites"),
        )
        .await
        .expect("owner may add tasks")
        .into_inner();

    app.tasks
        .update_task(&owner, task_id, UpdateTaskRequest::new("  Ironing "))
        .await
        .expect("owner may edit tasks");

    let page = app
        .tasks
        .list_tasks(&owner, list, &PageQuery::default())
        .await
        .expect("listing should succeed");
    let task = page.data.first().expect("one task is listed");
    assert_eq!(task.name, "Ironing");
    assert_eq!(task.description, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stranger_cannot_touch_tasks(app: App) {
    let (_owner_id, owner) = app.register("Una").await;
    let (_stranger_id, stranger) = app.register("Wes").await;
    let list = app.create_list(&owner, "Private").await;
    let task_id = app
        .tasks
        .create_task(&owner, list, CreateTaskRequest::new("Secret"))
        .await
        .expect("owner may add tasks")
        .into_inner();

    let listing = app
        .tasks
        .list_tasks(&stranger, list, &PageQuery::default())
        .await
        .expect_err("stranger may not list tasks");
    let deletion = app
        .tasks
        .delete_task(&stranger, task_id)
        .await
        .expect_err("stranger may not delete tasks");

    assert_eq!(listing.kind(), ErrorKind::Forbidden);
    assert_eq!(deletion.kind(), ErrorKind::Forbidden);
    assert_eq!(deletion.to_string(), "User is not connected to this task list.");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_are_paged_in_creation_order(app: App) {
    let (_owner_id, owner) = app.register("Una").await;
    let list = app.create_list(&owner, "Many").await;
    for name in ["First", "Second", "Third"] {
        app.tasks
            .create_task(&owner, list, CreateTaskRequest::new(name))
            .await
            .expect("owner may add tasks");
    }

    let second_page = app
        .tasks
        .list_tasks(&owner, list, &PageQuery::new(2, 2))
        .await
        .expect("listing should succeed");
    let newest_first = app
        .tasks
        .list_tasks(&owner, list, &PageQuery::new(1, 1).descending())
        .await
        .expect("listing should succeed");

    let names: Vec<_> = second_page.data.iter().map(|task| task.name.as_str()).collect();
    assert_eq!(names, vec!["Third"]);
    assert_eq!(second_page.pagination.total_pages, 2);
    let newest: Vec<_> = newest_first.data.iter().map(|task| task.name.as_str()).collect();
    assert_eq!(newest, vec!["Third"]);
}
