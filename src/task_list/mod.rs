//! Task lists and their sharing rules.
//!
//! A task list is owned by the user who created it and may be shared with
//! other users, its connections. Only connected users may read or change a
//! list, and only the owner may delete it.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
