use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::errors::ServerError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Handle to the single SQLite connection of the process.
///
/// Lifecycle: `open` once at startup, hand clones to whoever needs the
/// store, `close` on shutdown. Clones share the same connection; access is
/// serialized by the inner mutex.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: &str) -> Result<Self, ServerError> {
        let conn = Connection::open(path)
            .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        let mut conn = self.conn.lock().map_err(|_| ServerError::InternalError)?;
        f(&mut conn)
    }

    /// Close the connection. Fails if other handles are still alive.
    pub fn close(self) -> Result<(), ServerError> {
        let mutex = Arc::try_unwrap(self.conn).map_err(|_| {
            ServerError::DbError("Close DB failed: connection still shared".into())
        })?;
        let conn = mutex.into_inner().map_err(|_| ServerError::InternalError)?;

        conn.close()
            .map_err(|(_, e)| ServerError::DbError(format!("Close DB failed: {e}")))
    }
}

/// Apply the bundled schema. Safe to run on every start.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })?;

    tracing::info!("database schema applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_db_is_idempotent() {
        let db = Database::open(":memory:").unwrap();
        init_db(&db).unwrap();
        init_db(&db).unwrap();

        let tables: i64 = db
            .with_conn(|conn| {
                conn.query_row(
                    "select count(*) from sqlite_master where type = 'table' and name = 'apartments'",
                    [],
                    |r| r.get(0),
                )
                .map_err(|e| ServerError::DbError(e.to_string()))
            })
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn close_refuses_while_shared() {
        let db = Database::open(":memory:").unwrap();
        let other = db.clone();

        assert!(db.close().is_err());
        // the failed close released its share
        assert!(other.close().is_ok());
    }
}
