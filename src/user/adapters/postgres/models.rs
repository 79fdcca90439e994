//! Diesel row models for user persistence.

use super::schema::users;
use crate::repository::{RepositoryError, RepositoryResult};
use crate::user::domain::{User, UserId, UserName};
use diesel::prelude::*;

/// Query result and insert row for user records.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().into_inner(),
            name: user.name().as_str().to_owned(),
        }
    }
}

impl UserRow {
    /// Reconstructs the domain user, rejecting rows with a blank name.
    pub fn into_domain(self) -> RepositoryResult<User> {
        let name = UserName::new(self.name).map_err(RepositoryError::invalid_persisted_data)?;
        Ok(User::from_persisted(UserId::from_uuid(self.id), name))
    }
}
