use super::db::{stamp_update, uuid_column, write_transaction, Db};
use super::error::StoreError;
use super::snapshot::SqliteSnapshot;
use crate::libs::config::DeletePolicy;
use crate::libs::models::{fields_of, User, UserPatch};
use crate::libs::password;
use crate::libs::schema::{validate, validate_update, RecordKind};
use crate::msg_debug;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const INSERT_USER: &str = "INSERT INTO users (id, username, email, password, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_USER: &str = "UPDATE users SET username = ?2, email = ?3, password = ?4, updated_at = ?5 WHERE id = ?1";
const DELETE_USER: &str = "DELETE FROM users WHERE id = ?1";
const SELECT_USERS: &str = "SELECT id, username, email, password, created_at, updated_at FROM users";
const ORDER_BY_USERNAME: &str = "ORDER BY username";
const COUNT_DEPENDENTS: &str = "SELECT
    (SELECT COUNT(*) FROM task_lists WHERE user_id = ?1)
    + (SELECT COUNT(*) FROM tasks WHERE user_id = ?1
        OR task_list_id IN (SELECT id FROM task_lists WHERE user_id = ?1))
    + (SELECT COUNT(*) FROM labels WHERE user_id = ?1)";
const DELETE_DEPENDENT_TASKS: &str = "DELETE FROM tasks WHERE user_id = ?1
    OR task_list_id IN (SELECT id FROM task_lists WHERE user_id = ?1)";
const DELETE_DEPENDENT_TASK_LISTS: &str = "DELETE FROM task_lists WHERE user_id = ?1";
const DELETE_DEPENDENT_LABELS: &str = "DELETE FROM labels WHERE user_id = ?1";

pub struct Users {
    conn: Connection,
}

impl Users {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { conn: db.conn }
    }

    /// Validates and stores a new user. The password is checked in plaintext
    /// and stored as an Argon2 hash.
    pub fn create(&mut self, user: &User) -> Result<User> {
        let tx = write_transaction(&mut self.conn)?;

        let validated = validate(RecordKind::User, &fields_of(user)?, &SqliteSnapshot::new(&tx))?;
        let mut stored: User = validated.to_model()?;
        stored.password = password::hash(&stored.password)?;

        tx.execute(
            INSERT_USER,
            params![stored.id.to_string(), stored.username, stored.email, stored.password, stored.created_at, stored.updated_at],
        )?;
        tx.commit()?;

        msg_debug!(format!("Created user {} ({})", stored.username, stored.id));
        Ok(stored)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<User>> {
        select_user(&self.conn, &id).map_err(Into::into)
    }

    pub fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        self.conn
            .query_row(&format!("{} WHERE username = ?1", SELECT_USERS), params![username], user_from_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn list(&self) -> Result<Vec<User>> {
        let mut stmt = self.conn.prepare(&format!("{} {}", SELECT_USERS, ORDER_BY_USERNAME))?;
        let users = stmt.query_map([], user_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Applies a partial update; only the touched fields are re-validated.
    pub fn update(&mut self, id: Uuid, patch: &UserPatch) -> Result<User> {
        let tx = write_transaction(&mut self.conn)?;
        let current = select_user(&tx, &id)?.ok_or_else(|| StoreError::not_found(RecordKind::User, id))?;

        let mut changes = fields_of(patch)?;
        stamp_update(&mut changes, current.updated_at.unwrap_or(current.created_at))?;

        let validated = validate_update(RecordKind::User, &fields_of(&current)?, &changes, &SqliteSnapshot::new(&tx))?;
        let mut updated: User = validated.to_model()?;
        if patch.password.is_some() {
            updated.password = password::hash(&updated.password)?;
        }

        tx.execute(
            UPDATE_USER,
            params![updated.id.to_string(), updated.username, updated.email, updated.password, updated.updated_at],
        )?;
        tx.commit()?;

        msg_debug!(format!("Updated user {}", updated.id));
        Ok(updated)
    }

    /// Deletes a user. Under [`DeletePolicy::Cascade`] their task lists, the
    /// tasks in them or owned by them, and their labels go too.
    pub fn delete(&mut self, id: Uuid, policy: DeletePolicy) -> Result<()> {
        let tx = write_transaction(&mut self.conn)?;
        let key = id.to_string();

        if select_user(&tx, &id)?.is_none() {
            return Err(StoreError::not_found(RecordKind::User, id).into());
        }

        let dependents: i64 = tx.query_row(COUNT_DEPENDENTS, params![key], |row| row.get(0))?;
        if dependents > 0 {
            match policy {
                DeletePolicy::Restrict => {
                    return Err(StoreError::HasDependents {
                        kind: RecordKind::User,
                        id: key,
                        dependents: dependents as usize,
                    }
                    .into());
                }
                DeletePolicy::Cascade => {
                    tx.execute(DELETE_DEPENDENT_TASKS, params![key])?;
                    tx.execute(DELETE_DEPENDENT_TASK_LISTS, params![key])?;
                    tx.execute(DELETE_DEPENDENT_LABELS, params![key])?;
                }
            }
        }

        tx.execute(DELETE_USER, params![key])?;
        tx.commit()?;

        msg_debug!(format!("Deleted user {} with {} dependent record(s)", key, dependents));
        Ok(())
    }

    /// Checks a plaintext password against the stored hash.
    pub fn verify_password(&self, username: &str, password: &str) -> Result<bool> {
        match self.get_by_username(username)? {
            Some(user) => password::verify(password, &user.password),
            None => Ok(false),
        }
    }
}

fn select_user(conn: &Connection, id: &Uuid) -> rusqlite::Result<Option<User>> {
    conn.query_row(&format!("{} WHERE id = ?1", SELECT_USERS), params![id.to_string()], user_from_row)
        .optional()
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: uuid_column(row, 0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
