//! # todo-guard
//!
//! Schema validation and referential integrity for a small todo store of
//! users, task lists, tasks and labels.
//!
//! - [`libs::schema`] checks candidate records field by field and against a
//!   snapshot of existing records.
//! - [`db`] persists accepted records in SQLite and enforces delete policies.
//! - [`commands`] exposes both through the `todo-guard` command line.

pub mod commands;
pub mod db;
pub mod libs;
