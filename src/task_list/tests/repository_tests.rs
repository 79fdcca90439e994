//! Behavioural tests for the in-memory task list repository.

use crate::pagination::{PageQuery, validate};
use crate::repository::RepositoryError;
use crate::task_list::{
    adapters::memory::InMemoryTaskListRepository, domain::TaskList, ports::TaskListRepository,
};
use crate::user::domain::UserId;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> InMemoryTaskListRepository {
    InMemoryTaskListRepository::new()
}

fn new_list(name: &str, owner: UserId) -> TaskList {
    TaskList::create(name, owner, &DefaultClock).expect("valid list")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_advances_revision(repository: InMemoryTaskListRepository) {
    let owner = UserId::new();
    let mut task_list = new_list("Chores", owner);
    repository.create(&task_list).await.expect("create");

    task_list.update(owner, "Errands").expect("rename");
    repository.update(&task_list).await.expect("update");

    let stored = repository
        .get(task_list.id())
        .await
        .expect("lookup")
        .expect("stored list");
    assert_eq!(stored.revision(), 1);
    assert_eq!(stored.name().as_str(), "Errands");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_revision_is_conflict(repository: InMemoryTaskListRepository) {
    let owner = UserId::new();
    let task_list = new_list("Chores", owner);
    repository.create(&task_list).await.expect("create");
    let mut first = task_list.clone();
    let mut second = task_list;

    first.update(owner, "First").expect("rename");
    repository.update(&first).await.expect("first writer wins");
    second.update(owner, "Second").expect("rename");
    let result = repository.update(&second).await;

    assert!(matches!(
        result,
        Err(RepositoryError::Conflict {
            expected_revision: 0,
            ..
        })
    ));
    let stored = repository
        .get(first.id())
        .await
        .expect("lookup")
        .expect("stored list");
    assert_eq!(stored.name().as_str(), "First");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_of_missing_list_are_not_found(
    repository: InMemoryTaskListRepository,
) {
    let task_list = new_list("Ghost", UserId::new());

    assert!(matches!(
        repository.update(&task_list).await,
        Err(RepositoryError::NotFound { .. })
    ));
    assert!(matches!(
        repository.delete(task_list.id()).await,
        Err(RepositoryError::NotFound { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_create_is_rejected(repository: InMemoryTaskListRepository) {
    let task_list = new_list("Once", UserId::new());
    repository.create(&task_list).await.expect("create");

    assert!(matches!(
        repository.create(&task_list).await,
        Err(RepositoryError::Duplicate { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_listing_includes_owned_and_shared_lists(repository: InMemoryTaskListRepository) {
    let alice = UserId::new();
    let bob = UserId::new();
    let owned = new_list("Alice's", alice);
    let mut shared = new_list("Bob's shared", bob);
    shared.add_connection(bob, alice).expect("share");
    let private = new_list("Bob's private", bob);
    for task_list in [&owned, &shared, &private] {
        repository.create(task_list).await.expect("create");
    }
    let request = validate(&PageQuery::default()).expect("valid paging");

    let page = repository
        .get_by_user_id_paged(alice, request)
        .await
        .expect("listing");

    let ids: Vec<_> = page.items().iter().map(TaskList::id).collect();
    assert_eq!(ids, [owned.id(), shared.id()]);
    assert_eq!(page.total_count(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn descending_listing_reverses_identifier_order(repository: InMemoryTaskListRepository) {
    let owner = UserId::new();
    let older = new_list("Older", owner);
    let newer = new_list("Newer", owner);
    repository.create(&older).await.expect("create");
    repository.create(&newer).await.expect("create");
    let request = validate(&PageQuery::new(1, 1).descending()).expect("valid paging");

    let page = repository.get_paged(request).await.expect("listing");

    let ids: Vec<_> = page.items().iter().map(TaskList::id).collect();
    assert_eq!(ids, [newer.id()]);
    assert_eq!(page.total_count(), 2);
}
