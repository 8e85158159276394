use super::db::{stamp_update, uuid_column, write_transaction, Db};
use super::error::StoreError;
use super::snapshot::SqliteSnapshot;
use crate::libs::models::{fields_of, NewTask, Task, TaskFilter, TaskPatch};
use crate::libs::schema::{validate, validate_update, RecordKind};
use crate::msg_debug;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

const NEXT_TASK_ID: &str = "INSERT INTO sequences (name, value) VALUES ('tasks', 1)
    ON CONFLICT(name) DO UPDATE SET value = value + 1
    RETURNING value";
const INSERT_TASK: &str = "INSERT INTO tasks (id, user_id, task_list_id, title, description, due_date, completed, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const UPDATE_TASK: &str = "UPDATE tasks SET task_list_id = ?2, title = ?3, description = ?4, due_date = ?5, completed = ?6, updated_at = ?7 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const SELECT_TASKS: &str = "SELECT id, user_id, task_list_id, title, description, due_date, completed, created_at, updated_at FROM tasks";
const WHERE_ID: &str = "WHERE id = ?1";
const WHERE_USER: &str = "WHERE user_id = ?1";
const WHERE_LIST: &str = "WHERE task_list_id = ?1";
const ORDER_BY_ID: &str = "ORDER BY id";

pub struct Tasks {
    conn: Connection,
}

impl Tasks {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { conn: db.conn }
    }

    /// Assigns the next task id, validates and stores the task. A rejected
    /// task does not consume an id.
    pub fn create(&mut self, task: NewTask) -> Result<Task> {
        let tx = write_transaction(&mut self.conn)?;

        let id: i64 = tx.query_row(NEXT_TASK_ID, [], |row| row.get(0))?;
        let candidate = task.into_task(id);

        let validated = validate(RecordKind::Task, &fields_of(&candidate)?, &SqliteSnapshot::new(&tx))?;
        let stored: Task = validated.to_model()?;

        tx.execute(
            INSERT_TASK,
            params![
                stored.id,
                stored.user_id.to_string(),
                stored.task_list_id.to_string(),
                stored.title,
                stored.description,
                stored.due_date,
                stored.completed,
                stored.created_at,
                stored.updated_at
            ],
        )?;
        tx.commit()?;

        msg_debug!(format!("Created task {} in list {}", stored.id, stored.task_list_id));
        Ok(stored)
    }

    pub fn get(&self, id: i64) -> Result<Option<Task>> {
        select_task(&self.conn, id).map_err(Into::into)
    }

    pub fn fetch(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let (sql, key) = match filter {
            TaskFilter::All => (format!("{} {}", SELECT_TASKS, ORDER_BY_ID), None),
            TaskFilter::ByUser(user_id) => (format!("{} {} {}", SELECT_TASKS, WHERE_USER, ORDER_BY_ID), Some(user_id)),
            TaskFilter::ByList(list_id) => (format!("{} {} {}", SELECT_TASKS, WHERE_LIST, ORDER_BY_ID), Some(list_id)),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = match key {
            Some(key) => stmt.query_map(params![key.to_string()], task_from_row)?.collect::<Result<Vec<_>, _>>()?,
            None => stmt.query_map([], task_from_row)?.collect::<Result<Vec<_>, _>>()?,
        };
        Ok(tasks)
    }

    /// Applies a partial update. Moving a task to another list re-checks that
    /// the list exists.
    pub fn update(&mut self, id: i64, patch: &TaskPatch) -> Result<Task> {
        let tx = write_transaction(&mut self.conn)?;
        let current = select_task(&tx, id)?.ok_or_else(|| StoreError::not_found(RecordKind::Task, id))?;

        let mut changes = fields_of(patch)?;
        stamp_update(&mut changes, current.updated_at.unwrap_or(current.created_at))?;

        let validated = validate_update(RecordKind::Task, &fields_of(&current)?, &changes, &SqliteSnapshot::new(&tx))?;
        let updated: Task = validated.to_model()?;

        tx.execute(
            UPDATE_TASK,
            params![
                updated.id,
                updated.task_list_id.to_string(),
                updated.title,
                updated.description,
                updated.due_date,
                updated.completed,
                updated.updated_at
            ],
        )?;
        tx.commit()?;

        msg_debug!(format!("Updated task {}", updated.id));
        Ok(updated)
    }

    pub fn complete(&mut self, id: i64) -> Result<Task> {
        let patch = TaskPatch {
            completed: Some(true),
            ..TaskPatch::default()
        };
        self.update(id, &patch)
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_TASK, params![id])?;
        if affected == 0 {
            return Err(StoreError::not_found(RecordKind::Task, id).into());
        }

        msg_debug!(format!("Deleted task {}", id));
        Ok(())
    }
}

fn select_task(conn: &Connection, id: i64) -> rusqlite::Result<Option<Task>> {
    conn.query_row(&format!("{} {}", SELECT_TASKS, WHERE_ID), params![id], task_from_row)
        .optional()
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        user_id: uuid_column(row, 1)?,
        task_list_id: uuid_column(row, 2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        due_date: row.get(5)?,
        completed: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
