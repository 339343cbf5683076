use crate::error::{Result, StoreError};
use rusqlite::{Connection, OpenFlags, ToSql, params};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Addresses one SQLite file. Holds nothing but the path: every call opens
/// its own connection, which is closed when it goes out of scope.
#[derive(Debug, Clone)]
pub struct CoreLocalStorage {
    db_path: PathBuf,
}

impl CoreLocalStorage {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        CoreLocalStorage {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    pub fn exists(&self) -> bool {
        self.db_path.exists()
    }

    /// Opens the file for reading and writing. A missing file is an error.
    pub fn get_connection(&self) -> Result<Connection> {
        if !self.exists() {
            return Err(StoreError::DatabaseNotFound(self.db_path.clone()));
        }

        debug!("Opening database. path: {}", self.db_path.display());
        let conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Ok(conn)
    }

    /// Opens the file, creating an empty database when it does not exist yet.
    pub fn open_or_create(&self) -> Result<Connection> {
        debug!("Opening or creating database. path: {}", self.db_path.display());
        let conn = Connection::open(&self.db_path)?;

        Ok(conn)
    }

    /// Runs a `CREATE TABLE IF NOT EXISTS` statement on an open connection.
    pub fn create_table(conn: &Connection, create_statement: &str) -> Result<()> {
        conn.execute(create_statement, [])?;
        Ok(())
    }

    pub fn count(&self, table_name: &str) -> Result<i64> {
        let conn = self.get_connection()?;
        let query = format!("SELECT COUNT(*) FROM {}", table_name);
        let count = conn.query_row(&query, [], |row| row.get(0))?;

        Ok(count)
    }

    pub fn delete_by_column(
        &self,
        table_name: &str,
        column_name: &str,
        value: &dyn ToSql,
    ) -> Result<usize> {
        let conn = self.get_connection()?;
        let query = format!("DELETE FROM {} WHERE {} = ?", table_name, column_name);
        let rows_affected = conn.execute(&query, params![value])?;

        Ok(rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_get_connection_requires_existing_file() {
        let dir = tempdir().unwrap();
        let storage = CoreLocalStorage::new(dir.path().join("missing.db"));

        let result = storage.get_connection();

        assert!(matches!(result, Err(StoreError::DatabaseNotFound(_))));
        assert!(!storage.exists());
    }

    #[test]
    fn test_open_or_create_creates_file() -> Result<()> {
        let dir = tempdir().unwrap();
        let storage = CoreLocalStorage::new(dir.path().join("new.db"));

        let conn = storage.open_or_create()?;
        CoreLocalStorage::create_table(&conn, "CREATE TABLE IF NOT EXISTS t (id INTEGER PRIMARY KEY)")?;
        drop(conn);

        assert!(storage.exists());
        assert_eq!(storage.count("t")?, 0);
        Ok(())
    }

    #[test]
    fn test_delete_by_column() -> Result<()> {
        let dir = tempdir().unwrap();
        let storage = CoreLocalStorage::new(dir.path().join("delete.db"));

        let conn = storage.open_or_create()?;
        CoreLocalStorage::create_table(&conn, "CREATE TABLE IF NOT EXISTS t (id INTEGER PRIMARY KEY, v TEXT)")?;
        conn.execute("INSERT INTO t (v) VALUES ('a'), ('b')", [])?;
        drop(conn);

        assert_eq!(storage.delete_by_column("t", "id", &1_i64)?, 1);
        assert_eq!(storage.delete_by_column("t", "id", &1_i64)?, 0);
        assert_eq!(storage.count("t")?, 1);
        Ok(())
    }
}
