use super::db::{stamp_update, uuid_column, write_transaction, Db};
use super::error::StoreError;
use super::snapshot::SqliteSnapshot;
use crate::libs::models::{fields_of, Label, LabelPatch};
use crate::libs::schema::{validate, validate_update, RecordKind};
use crate::msg_debug;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const INSERT_LABEL: &str = "INSERT INTO labels (id, name, color, user_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_LABEL: &str = "UPDATE labels SET name = ?2, color = ?3, updated_at = ?4 WHERE id = ?1";
const DELETE_LABEL: &str = "DELETE FROM labels WHERE id = ?1";
const SELECT_LABELS: &str = "SELECT id, name, color, user_id, created_at, updated_at FROM labels";
const SELECT_LABEL_BY_ID: &str = "SELECT id, name, color, user_id, created_at, updated_at FROM labels WHERE id = ?1";
const SELECT_LABELS_BY_USER: &str = "SELECT id, name, color, user_id, created_at, updated_at FROM labels WHERE user_id = ?1 ORDER BY name";

pub struct Labels {
    conn: Connection,
}

impl Labels {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { conn: db.conn }
    }

    pub fn create(&mut self, label: &Label) -> Result<Label> {
        let tx = write_transaction(&mut self.conn)?;

        let validated = validate(RecordKind::Label, &fields_of(label)?, &SqliteSnapshot::new(&tx))?;
        let stored: Label = validated.to_model()?;

        tx.execute(
            INSERT_LABEL,
            params![
                stored.id.to_string(),
                stored.name,
                stored.color,
                stored.user_id.to_string(),
                stored.created_at,
                stored.updated_at
            ],
        )?;
        tx.commit()?;

        msg_debug!(format!("Created label '{}' for user {}", stored.name, stored.user_id));
        Ok(stored)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Label>> {
        select_label(&self.conn, &id).map_err(Into::into)
    }

    pub fn list(&self) -> Result<Vec<Label>> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY name", SELECT_LABELS))?;
        let labels = stmt.query_map([], label_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(labels)
    }

    pub fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Label>> {
        let mut stmt = self.conn.prepare(SELECT_LABELS_BY_USER)?;
        let labels = stmt
            .query_map(params![user_id.to_string()], label_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(labels)
    }

    pub fn update(&mut self, id: Uuid, patch: &LabelPatch) -> Result<Label> {
        let tx = write_transaction(&mut self.conn)?;
        let current = select_label(&tx, &id)?.ok_or_else(|| StoreError::not_found(RecordKind::Label, id))?;

        let mut changes = fields_of(patch)?;
        stamp_update(&mut changes, current.updated_at.unwrap_or(current.created_at))?;

        let validated = validate_update(RecordKind::Label, &fields_of(&current)?, &changes, &SqliteSnapshot::new(&tx))?;
        let updated: Label = validated.to_model()?;

        tx.execute(
            UPDATE_LABEL,
            params![updated.id.to_string(), updated.name, updated.color, updated.updated_at],
        )?;
        tx.commit()?;

        msg_debug!(format!("Updated label {}", updated.id));
        Ok(updated)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        let affected = self.conn.execute(DELETE_LABEL, params![id.to_string()])?;
        if affected == 0 {
            return Err(StoreError::not_found(RecordKind::Label, id).into());
        }

        msg_debug!(format!("Deleted label {}", id));
        Ok(())
    }
}

fn select_label(conn: &Connection, id: &Uuid) -> rusqlite::Result<Option<Label>> {
    conn.query_row(SELECT_LABEL_BY_ID, params![id.to_string()], label_from_row).optional()
}

fn label_from_row(row: &Row<'_>) -> rusqlite::Result<Label> {
    Ok(Label {
        id: uuid_column(row, 0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        user_id: uuid_column(row, 3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
