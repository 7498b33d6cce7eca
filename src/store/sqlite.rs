//! SQLite repository.
//!
//! One row per smartlink: the id, a sortable creation timestamp, and the
//! full record as a camelCase JSON document. Deleted ids move to
//! `retired_ids` so they are never handed out again, even after a restart.

use std::path::Path;

use chrono::SecondsFormat;
use rusqlite::{Connection, OptionalExtension, params};

use super::{SmartlinkRepository, StoreError};
use crate::model::Smartlink;

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "smartlinks.db";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS smartlinks (
    id          TEXT PRIMARY KEY NOT NULL,
    created_at  TEXT NOT NULL,
    body        TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS retired_ids (
    id          TEXT PRIMARY KEY NOT NULL
);
"#;

/// Repository backed by a single SQLite file.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open (or create) the database at `path` and ensure the schema exists.
    ///
    /// The parent directory is created if needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| StoreError::CreateDir(dir.to_path_buf(), e))?;
        }

        let conn = Connection::open(path)?;
        let repo = Self::with_connection(conn)?;
        tracing::debug!(target: "smartlink::store", path = %path.display(), "Opened SQLite store");
        Ok(repo)
    }

    /// A private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

fn decode(body: &str) -> Result<Smartlink, StoreError> {
    Ok(serde_json::from_str(body)?)
}

impl SmartlinkRepository for SqliteRepository {
    fn load(&self, id: &str) -> Result<Option<Smartlink>, StoreError> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM smartlinks WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        body.as_deref().map(decode).transpose()
    }

    fn load_all(&self) -> Result<Vec<Smartlink>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT body FROM smartlinks ORDER BY created_at, id")?;
        let bodies = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        bodies.iter().map(|body| decode(body)).collect()
    }

    fn save(&mut self, link: &Smartlink) -> Result<(), StoreError> {
        let body = serde_json::to_string(link)?;
        self.conn.execute(
            r#"
            INSERT INTO smartlinks (id, created_at, body)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                body = excluded.body
            "#,
            params![
                link.id,
                link.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
                body
            ],
        )?;
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        let affected = tx.execute("DELETE FROM smartlinks WHERE id = ?1", params![id])?;
        if affected > 0 {
            tx.execute(
                "INSERT OR IGNORE INTO retired_ids (id) VALUES (?1)",
                params![id],
            )?;
        }
        tx.commit()?;
        Ok(affected > 0)
    }

    fn is_id_taken(&self, id: &str) -> Result<bool, StoreError> {
        let taken: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM smartlinks WHERE id = ?1)
                 OR EXISTS(SELECT 1 FROM retired_ids WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(taken)
    }
}
