//! Core library modules: the schema validator, record models and the
//! configuration, storage and messaging plumbing around them.
//!
//! ```rust,no_run
//! use todo_guard::db::users::Users;
//! use todo_guard::libs::models::User;
//!
//! let mut users = Users::new()?;
//! let alice = users.create(&User::new("alice", "alice@example.com", "longenough1"))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod messages;
pub mod models;
pub mod password;
pub mod schema;
pub mod view;
