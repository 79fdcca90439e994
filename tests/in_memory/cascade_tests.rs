//! In-memory integration tests for cascading task list deletion.

use super::helpers::{App, app};
use rstest::rstest;
use tasklists::error::{Classify, ErrorKind};
use tasklists::pagination::{PageQuery, validate};
use tasklists::task::{ports::TaskRepository, services::CreateTaskRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_list_removes_only_its_tasks(app: App) {
    let (_owner_id, owner) = app.register("Una").await;
    let doomed = app.create_list(&owner, "Doomed").await;
    let kept = app.create_list(&owner, "Kept").await;
    let doomed_task = app
        .tasks
        .create_task(&owner, doomed, CreateTaskRequest::new("Gone"))
        .await
        .expect("owner may add tasks")
        .into_inner();
    app.tasks
        .create_task(&owner, kept, CreateTaskRequest::new("Stays"))
        .await
        .expect("owner may add tasks");

    app.task_lists
        .delete_task_list(&owner, doomed)
        .await
        .expect("owner may delete");

    let missing = app
        .tasks
        .set_task_completion(&owner, doomed_task, true)
        .await
        .expect_err("task of a deleted list is gone");
    assert_eq!(missing.kind(), ErrorKind::NotFound);
    assert_eq!(missing.to_string(), "Task not found.");

    let request = validate(&PageQuery::default()).expect("valid paging");
    let remaining = app
        .task_repository
        .get_paged(request)
        .await
        .expect("listing should succeed");
    assert_eq!(remaining.total_count(), 1);
    let survivor = remaining.items().first().expect("one task remains");
    assert_eq!(survivor.task_list_id(), kept);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_unknown_list_reports_not_found(app: App) {
    let (_owner_id, owner) = app.register("Una").await;
    let id = app.create_list(&owner, "Once").await;
    app.task_lists
        .delete_task_list(&owner, id)
        .await
        .expect("owner may delete");

    let err = app
        .task_lists
        .delete_task_list(&owner, id)
        .await
        .expect_err("second delete finds nothing");

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "TaskList not found");
}
