//! Diesel row models for task list persistence.

use super::schema::task_lists;
use crate::postgres::to_sql_bigint;
use crate::repository::{RepositoryError, RepositoryResult};
use crate::task_list::domain::{PersistedTaskListData, TaskList, TaskListId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert row for task list records.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskListRow {
    /// Task list identifier.
    pub id: uuid::Uuid,
    /// List name.
    pub name: String,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Connected users in insertion order.
    pub connected_user_ids: Vec<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Revision counter.
    pub revision: i64,
}

impl From<&TaskList> for TaskListRow {
    fn from(task_list: &TaskList) -> Self {
        Self {
            id: task_list.id().into_inner(),
            name: task_list.name().as_str().to_owned(),
            owner_id: task_list.owner_id().into_inner(),
            connected_user_ids: task_list
                .connected_user_ids()
                .iter()
                .map(|user_id| user_id.into_inner())
                .collect(),
            created_at: task_list.created_at(),
            revision: to_sql_bigint(task_list.revision()),
        }
    }
}

impl TaskListRow {
    /// Reconstructs the domain aggregate, rejecting rows that break its
    /// invariants.
    pub fn into_domain(self) -> RepositoryResult<TaskList> {
        let revision =
            u64::try_from(self.revision).map_err(RepositoryError::invalid_persisted_data)?;
        TaskList::from_persisted(PersistedTaskListData {
            id: TaskListId::from_uuid(self.id),
            name: self.name,
            owner_id: UserId::from_uuid(self.owner_id),
            connected_user_ids: self
                .connected_user_ids
                .into_iter()
                .map(UserId::from_uuid)
                .collect(),
            created_at: self.created_at,
            revision,
        })
        .map_err(RepositoryError::invalid_persisted_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::DefaultClock;
    use rstest::rstest;

    fn row_with_roster(owner: uuid::Uuid, roster: Vec<uuid::Uuid>) -> TaskListRow {
        TaskListRow {
            id: uuid::Uuid::now_v7(),
            name: "Groceries".to_owned(),
            owner_id: owner,
            connected_user_ids: roster,
            created_at: Utc::now(),
            revision: 3,
        }
    }

    #[rstest]
    fn row_round_trips_through_domain() {
        let owner = UserId::new();
        let friend = UserId::new();
        let mut task_list = TaskList::create("Groceries", owner, &DefaultClock).expect("valid list");
        task_list.add_connection(owner, friend).expect("valid connection");

        let restored = TaskListRow::from(&task_list)
            .into_domain()
            .expect("valid row");

        assert_eq!(restored, task_list);
    }

    #[rstest]
    fn owner_in_roster_is_invalid_persisted_data() {
        let owner = uuid::Uuid::now_v7();

        let result = row_with_roster(owner, vec![owner]).into_domain();

        assert!(matches!(result, Err(RepositoryError::InvalidPersistedData(_))));
    }

    #[rstest]
    fn duplicate_roster_entry_is_invalid_persisted_data() {
        let friend = uuid::Uuid::now_v7();

        let result = row_with_roster(uuid::Uuid::now_v7(), vec![friend, friend]).into_domain();

        assert!(matches!(result, Err(RepositoryError::InvalidPersistedData(_))));
    }

    #[rstest]
    fn negative_revision_is_invalid_persisted_data() {
        let mut row = row_with_roster(uuid::Uuid::now_v7(), Vec::new());
        row.revision = -1;

        assert!(matches!(
            row.into_domain(),
            Err(RepositoryError::InvalidPersistedData(_))
        ));
    }
}
