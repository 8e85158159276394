use crate::libs::schema::{LookupError, RecordKind, Snapshot};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

const SELECT_USER_BY_USERNAME: &str = "SELECT id FROM users WHERE username = ?1";
const SELECT_USER_BY_EMAIL: &str = "SELECT id FROM users WHERE email = ?1";

/// Snapshot answered by the live database through its primary keys and
/// unique indexes. Use it inside the write transaction that persists the
/// validated record.
pub struct SqliteSnapshot<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteSnapshot<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl Snapshot for SqliteSnapshot<'_> {
    fn exists(&self, kind: RecordKind, id: &Uuid) -> Result<bool, LookupError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", kind.table());
        let mut stmt = self.conn.prepare_cached(&sql).map_err(LookupError::new)?;
        stmt.query_row(params![id.to_string()], |row| row.get(0)).map_err(LookupError::new)
    }

    fn find_unique(&self, kind: RecordKind, field: &str, value: &str) -> Result<Option<Uuid>, LookupError> {
        let sql = match (kind, field) {
            (RecordKind::User, "username") => SELECT_USER_BY_USERNAME,
            (RecordKind::User, "email") => SELECT_USER_BY_EMAIL,
            _ => return Err(LookupError(format!("{} has no unique index on '{}'", kind, field))),
        };
        let mut stmt = self.conn.prepare_cached(sql).map_err(LookupError::new)?;
        let owner: Option<String> = stmt.query_row(params![value], |row| row.get(0)).optional().map_err(LookupError::new)?;

        owner.map(|raw| Uuid::parse_str(&raw).map_err(LookupError::new)).transpose()
    }
}
