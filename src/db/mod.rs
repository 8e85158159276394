//! SQLite persistence for validated records.
//!
//! Every write goes through the schema validator inside an `IMMEDIATE`
//! transaction, with [`snapshot::SqliteSnapshot`] reading the same
//! transaction, so a record that passes validation is still valid when it is
//! committed.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use todo_guard::db::{db::Db, task_lists::TaskLists, tasks::Tasks, users::Users};
//! use todo_guard::libs::models::{NewTask, TaskList, User};
//!
//! let mut users = Users::from_db(Db::open("todo-guard.db")?);
//! let alice = users.create(&User::new("alice", "alice@example.com", "longenough1"))?;
//!
//! let mut lists = TaskLists::from_db(Db::open("todo-guard.db")?);
//! let inbox = lists.create(&TaskList::new(alice.id, "Inbox", None))?;
//!
//! let mut tasks = Tasks::from_db(Db::open("todo-guard.db")?);
//! let task = tasks.create(NewTask::new(alice.id, inbox.id, "Buy milk"))?;
//! tasks.complete(task.id)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup and shared write helpers.
pub mod db;

/// Typed store errors returned inside `anyhow::Error`.
pub mod error;

/// Versioned schema changes.
pub mod migrations;

/// Validator lookups backed by the database.
pub mod snapshot;

pub mod labels;
pub mod task_lists;
pub mod tasks;
pub mod users;
