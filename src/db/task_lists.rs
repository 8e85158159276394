use super::db::{stamp_update, uuid_column, write_transaction, Db};
use super::error::StoreError;
use super::snapshot::SqliteSnapshot;
use crate::libs::config::DeletePolicy;
use crate::libs::models::{fields_of, TaskList, TaskListPatch};
use crate::libs::schema::{validate, validate_update, RecordKind};
use crate::msg_debug;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const INSERT_TASK_LIST: &str = "INSERT INTO task_lists (id, title, description, user_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_TASK_LIST: &str = "UPDATE task_lists SET title = ?2, description = ?3, updated_at = ?4 WHERE id = ?1";
const DELETE_TASK_LIST: &str = "DELETE FROM task_lists WHERE id = ?1";
const SELECT_TASK_LISTS: &str = "SELECT id, title, description, user_id, created_at, updated_at FROM task_lists";
const WHERE_ID: &str = "WHERE id = ?1";
const WHERE_USER: &str = "WHERE user_id = ?1";
const ORDER_BY_CREATED: &str = "ORDER BY created_at, id";
const COUNT_TASKS: &str = "SELECT COUNT(*) FROM tasks WHERE task_list_id = ?1";
const DELETE_TASKS: &str = "DELETE FROM tasks WHERE task_list_id = ?1";

pub struct TaskLists {
    conn: Connection,
}

impl TaskLists {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { conn: db.conn }
    }

    pub fn create(&mut self, list: &TaskList) -> Result<TaskList> {
        let tx = write_transaction(&mut self.conn)?;

        let validated = validate(RecordKind::TaskList, &fields_of(list)?, &SqliteSnapshot::new(&tx))?;
        let stored: TaskList = validated.to_model()?;

        tx.execute(
            INSERT_TASK_LIST,
            params![
                stored.id.to_string(),
                stored.title,
                stored.description,
                stored.user_id.to_string(),
                stored.created_at,
                stored.updated_at
            ],
        )?;
        tx.commit()?;

        msg_debug!(format!("Created task list {} for user {}", stored.id, stored.user_id));
        Ok(stored)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<TaskList>> {
        select_task_list(&self.conn, &id).map_err(Into::into)
    }

    pub fn list(&self) -> Result<Vec<TaskList>> {
        let mut stmt = self.conn.prepare(&format!("{} {}", SELECT_TASK_LISTS, ORDER_BY_CREATED))?;
        let lists = stmt.query_map([], task_list_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    pub fn list_by_user(&self, user_id: Uuid) -> Result<Vec<TaskList>> {
        let mut stmt = self.conn.prepare(&format!("{} {} {}", SELECT_TASK_LISTS, WHERE_USER, ORDER_BY_CREATED))?;
        let lists = stmt
            .query_map(params![user_id.to_string()], task_list_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    pub fn update(&mut self, id: Uuid, patch: &TaskListPatch) -> Result<TaskList> {
        let tx = write_transaction(&mut self.conn)?;
        let current = select_task_list(&tx, &id)?.ok_or_else(|| StoreError::not_found(RecordKind::TaskList, id))?;

        let mut changes = fields_of(patch)?;
        stamp_update(&mut changes, current.updated_at.unwrap_or(current.created_at))?;

        let validated = validate_update(RecordKind::TaskList, &fields_of(&current)?, &changes, &SqliteSnapshot::new(&tx))?;
        let updated: TaskList = validated.to_model()?;

        tx.execute(
            UPDATE_TASK_LIST,
            params![updated.id.to_string(), updated.title, updated.description, updated.updated_at],
        )?;
        tx.commit()?;

        msg_debug!(format!("Updated task list {}", updated.id));
        Ok(updated)
    }

    /// Deletes a task list. Under [`DeletePolicy::Cascade`] its tasks go too.
    pub fn delete(&mut self, id: Uuid, policy: DeletePolicy) -> Result<()> {
        let tx = write_transaction(&mut self.conn)?;
        let key = id.to_string();

        if select_task_list(&tx, &id)?.is_none() {
            return Err(StoreError::not_found(RecordKind::TaskList, id).into());
        }

        let dependents: i64 = tx.query_row(COUNT_TASKS, params![key], |row| row.get(0))?;
        if dependents > 0 {
            match policy {
                DeletePolicy::Restrict => {
                    return Err(StoreError::HasDependents {
                        kind: RecordKind::TaskList,
                        id: key,
                        dependents: dependents as usize,
                    }
                    .into());
                }
                DeletePolicy::Cascade => {
                    tx.execute(DELETE_TASKS, params![key])?;
                }
            }
        }

        tx.execute(DELETE_TASK_LIST, params![key])?;
        tx.commit()?;

        msg_debug!(format!("Deleted task list {} with {} task(s)", key, dependents));
        Ok(())
    }
}

fn select_task_list(conn: &Connection, id: &Uuid) -> rusqlite::Result<Option<TaskList>> {
    conn.query_row(&format!("{} {}", SELECT_TASK_LISTS, WHERE_ID), params![id.to_string()], task_list_from_row)
        .optional()
}

fn task_list_from_row(row: &Row<'_>) -> rusqlite::Result<TaskList> {
    Ok(TaskList {
        id: uuid_column(row, 0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        user_id: uuid_column(row, 3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
