//! Per-request database sessions.
//!
//! # Responsibility
//! - Hold the only process-wide persistence state: where the database lives.
//! - Hand out one fresh connection per unit of work and drop it afterwards.
//!
//! # Invariants
//! - A session never outlives the closure it was opened for.
//! - Write sessions commit only when the closure returns `Ok`; any error
//!   rolls the transaction back on drop.
//! - Foreign keys are enforced on every session except the ones opened by
//!   `write_without_foreign_keys`.

use super::{open_db, DbError, DbResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};
use std::path::PathBuf;

/// Injected handle to the relational store.
///
/// Cheap to clone; carries no open connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Points at a database file without opening it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the file once so migrations run before traffic is served.
    pub fn bootstrap(path: impl Into<PathBuf>) -> DbResult<Self> {
        let database = Self::new(path);
        drop(database.session()?);
        info!(
            "event=db_ready module=db status=ok path={}",
            database.path.display()
        );
        Ok(database)
    }

    /// Acquires a new migrated connection owned by the caller.
    pub fn session(&self) -> DbResult<Connection> {
        open_db(&self.path)
    }

    /// Runs `op` against a fresh connection without an explicit transaction.
    pub fn read<T, E>(&self, op: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let conn = self.session()?;
        op(&conn)
    }

    /// Runs `op` inside an immediate transaction on a fresh connection.
    ///
    /// The transaction is committed when `op` succeeds.
    pub fn write<T, E>(&self, op: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let mut conn = self.session()?;
        commit_with(&mut conn, op)
    }

    /// Runs `op` like [`Database::write`], on a session that does not enforce
    /// foreign keys.
    ///
    /// Deleting a company goes through here: its obligations keep their
    /// `company_id` and are not cascaded.
    pub fn write_without_foreign_keys<T, E>(
        &self,
        op: impl FnOnce(&Connection) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let mut conn = self.session()?;
        // The pragma is ignored inside a transaction, so it goes first.
        conn.execute_batch("PRAGMA foreign_keys = OFF;")
            .map_err(DbError::from)?;
        commit_with(&mut conn, op)
    }
}

fn commit_with<T, E>(
    conn: &mut Connection,
    op: impl FnOnce(&Connection) -> Result<T, E>,
) -> Result<T, E>
where
    E: From<DbError>,
{
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(DbError::from)?;
    let value = op(&tx)?;
    tx.commit().map_err(DbError::from)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::Database;
    use crate::db::DbError;

    #[test]
    fn failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let database = Database::bootstrap(dir.path().join("session.db")).unwrap();

        let result: Result<(), DbError> = database.write(|conn| {
            conn.execute(
                "INSERT INTO companies (name, tax_id, address, email, phone)
                 VALUES ('A', '1', 'Rua', 'a@b.com', '1');",
                [],
            )?;
            conn.execute(
                "INSERT INTO companies (name, tax_id, address, email, phone)
                 VALUES ('B', '1', 'Rua', 'b@b.com', '2');",
                [],
            )?;
            Ok(())
        });
        assert!(result.is_err());

        let count: i64 = database
            .read(|conn| {
                conn.query_row("SELECT COUNT(*) FROM companies;", [], |row| row.get(0))
                    .map_err(DbError::from)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn delete_without_foreign_keys_keeps_dependent_rows() {
        let dir = tempfile::tempdir().unwrap();
        let database = Database::bootstrap(dir.path().join("orphans.db")).unwrap();

        database
            .write(|conn| {
                conn.execute_batch(
                    "INSERT INTO companies (id, name, tax_id, address, email, phone)
                     VALUES (1, 'A', '1', 'Rua', 'a@b.com', '1');
                     INSERT INTO obligations (name, period, company_id)
                     VALUES ('DCTF', 'mensal', 1);",
                )
                .map_err(DbError::from)
            })
            .unwrap();

        let blocked: Result<usize, DbError> = database.write(|conn| {
            conn.execute("DELETE FROM companies WHERE id = 1;", [])
                .map_err(DbError::from)
        });
        assert!(blocked.is_err());

        database
            .write_without_foreign_keys(|conn| {
                conn.execute("DELETE FROM companies WHERE id = 1;", [])
                    .map_err(DbError::from)
            })
            .unwrap();

        let (companies, obligations): (i64, i64) = database
            .read(|conn| {
                conn.query_row(
                    "SELECT
                        (SELECT COUNT(*) FROM companies),
                        (SELECT COUNT(*) FROM obligations WHERE company_id = 1);",
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .map_err(DbError::from)
            })
            .unwrap();
        assert_eq!((companies, obligations), (0, 1));
    }

    #[test]
    fn sessions_share_the_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let database = Database::bootstrap(dir.path().join("shared.db")).unwrap();

        database
            .write(|conn| {
                conn.execute(
                    "INSERT INTO companies (name, tax_id, address, email, phone)
                     VALUES ('A', '1', 'Rua', 'a@b.com', '1');",
                    [],
                )
                .map_err(DbError::from)
            })
            .unwrap();

        let count: i64 = database
            .read(|conn| {
                conn.query_row("SELECT COUNT(*) FROM companies;", [], |row| row.get(0))
                    .map_err(DbError::from)
            })
            .unwrap();
        assert_eq!(count, 1);
    }
}
