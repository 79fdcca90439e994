//! Application services for user registration and lookup.

mod users;

pub use users::{AddUserRequest, UserService, UserServiceError, UserServiceResult, UserView};
