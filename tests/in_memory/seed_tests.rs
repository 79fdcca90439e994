//! In-memory integration tests for the demonstration dataset.

use std::sync::Arc;

use super::helpers::{App, app};
use mockable::DefaultClock;
use rstest::rstest;
use tasklists::identity::UserContext;
use tasklists::pagination::PageQuery;
use tasklists::seed::Seeder;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_users_see_their_shared_lists(app: App) {
    let seeder = Seeder::new(
        Arc::clone(&app.user_repository),
        Arc::clone(&app.task_list_repository),
        Arc::clone(&app.task_repository),
        Arc::new(DefaultClock),
    );
    seeder.seed().await.expect("seeding should succeed");

    let users = app
        .users
        .list_users(&PageQuery::default())
        .await
        .expect("listing should succeed");
    let bob = users
        .data
        .iter()
        .find(|user| user.name == "Bob")
        .expect("Bob is seeded");
    let bob_context = UserContext::authenticated(bob.id);

    let lists = app
        .task_lists
        .list_task_lists(&bob_context, &PageQuery::default())
        .await
        .expect("listing should succeed");
    let names: Vec<_> = lists.data.iter().map(|list| list.name.as_str()).collect();

    assert_eq!(lists.pagination.total_count, 4);
    assert!(names.contains(&"J List 1"));
    assert!(names.contains(&"B List 1"));
    assert!(!names.contains(&"J List 2"));
}
