//! SQLite-backed storage.
//!
//! Provides persistent storage for:
//! - Key-value records (shopping list, countdown state)
//! - Locally scheduled notifications

use std::path::Path;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::StorageError;

/// A notification waiting to fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: String,
    pub title: String,
    /// Epoch milliseconds at which the notification is due.
    pub fire_at: i64,
    pub scheduled_at: i64,
}

/// SQLite database for taskly records.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/taskly.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("taskly.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS scheduled_notifications (
                id           TEXT PRIMARY KEY,
                title        TEXT NOT NULL,
                fire_at      INTEGER NOT NULL,
                scheduled_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_notifications_fire_at
                ON scheduled_notifications(fire_at);",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store, replacing any prior value.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn insert_notification(&self, record: &NotificationRecord) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO scheduled_notifications (id, title, fire_at, scheduled_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![record.id, record.title, record.fire_at, record.scheduled_at],
        )?;
        Ok(())
    }

    /// Remove a scheduled notification. Returns `false` if no row matched.
    pub fn delete_notification(&self, id: &str) -> Result<bool, rusqlite::Error> {
        let changed = self
            .conn
            .execute("DELETE FROM scheduled_notifications WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// All scheduled notifications, soonest first.
    pub fn list_notifications(&self) -> Result<Vec<NotificationRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, fire_at, scheduled_at
             FROM scheduled_notifications
             ORDER BY fire_at ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(NotificationRecord {
                id: row.get(0)?,
                title: row.get(1)?,
                fire_at: row.get(2)?,
                scheduled_at: row.get(3)?,
            })
        })?;
        rows.collect()
    }

    /// Remove and return every notification due at or before `now`.
    ///
    /// The read and the delete share one transaction, and only the rows
    /// that were read get deleted.
    pub fn take_due_notifications(
        &self,
        now: i64,
    ) -> Result<Vec<NotificationRecord>, rusqlite::Error> {
        let tx = self.conn.unchecked_transaction()?;
        let due = {
            let mut stmt = tx.prepare(
                "SELECT id, title, fire_at, scheduled_at
                 FROM scheduled_notifications
                 WHERE fire_at <= ?1
                 ORDER BY fire_at ASC",
            )?;
            let rows = stmt.query_map(params![now], |row| {
                Ok(NotificationRecord {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    fire_at: row.get(2)?,
                    scheduled_at: row.get(3)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };
        for n in &due {
            tx.execute(
                "DELETE FROM scheduled_notifications WHERE id = ?1",
                params![n.id],
            )?;
        }
        tx.commit()?;
        Ok(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, fire_at: i64) -> NotificationRecord {
        NotificationRecord {
            id: id.to_string(),
            title: "The thing is due!".to_string(),
            fire_at,
            scheduled_at: 0,
        }
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn kv_last_write_wins() {
        let db = Database::open_memory().unwrap();
        db.kv_set("k", "first").unwrap();
        db.kv_set("k", "second").unwrap();
        assert_eq!(db.kv_get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn notifications_listed_soonest_first() {
        let db = Database::open_memory().unwrap();
        db.insert_notification(&record("b", 200)).unwrap();
        db.insert_notification(&record("a", 100)).unwrap();
        let ids: Vec<_> = db
            .list_notifications()
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn take_due_only_removes_due_rows() {
        let db = Database::open_memory().unwrap();
        db.insert_notification(&record("due", 100)).unwrap();
        db.insert_notification(&record("later", 500)).unwrap();

        let due = db.take_due_notifications(100).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, "due");

        let left = db.list_notifications().unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, "later");
    }

    #[test]
    fn take_due_delivers_each_row_once_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taskly.db");
        let deliverer = Database::open_at(&path).unwrap();
        let scheduler = Database::open_at(&path).unwrap();

        scheduler.insert_notification(&record("first", 100)).unwrap();
        scheduler.insert_notification(&record("second", 150)).unwrap();
        let due = deliverer.take_due_notifications(200).unwrap();
        let ids: Vec<&str> = due.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);

        scheduler.insert_notification(&record("third", 120)).unwrap();
        let due = deliverer.take_due_notifications(200).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, "third");
        assert!(scheduler.list_notifications().unwrap().is_empty());
    }

    #[test]
    fn delete_missing_notification_reports_false() {
        let db = Database::open_memory().unwrap();
        assert!(!db.delete_notification("nope").unwrap());
    }

    #[test]
    fn reopen_on_disk_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taskly.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.kv_set("shopping-list", "[]").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.kv_get("shopping-list").unwrap().as_deref(), Some("[]"));
    }
}
