//! Scoped transactions
//!
//! Closure API in the manner of `Database::transaction`: the closure runs
//! inside a transaction that commits when it returns `Ok` and rolls back
//! when it returns `Err` or unwinds.

use bucketstore_core::{Error, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::warn;

/// Run `f` in a write transaction.
///
/// The transaction is `IMMEDIATE`: the write lock is taken up front, so a
/// read-then-write sequence inside `f` cannot be interleaved with another
/// writer.
pub(crate) fn write<T, F>(conn: &mut Connection, op: &'static str, f: F) -> Result<T>
where
    F: FnOnce(&Transaction<'_>) -> Result<T>,
{
    run(conn, TransactionBehavior::Immediate, op, f)
}

/// Run `f` in a read transaction, giving it one consistent snapshot.
pub(crate) fn read<T, F>(conn: &mut Connection, op: &'static str, f: F) -> Result<T>
where
    F: FnOnce(&Transaction<'_>) -> Result<T>,
{
    run(conn, TransactionBehavior::Deferred, op, f)
}

fn run<T, F>(conn: &mut Connection, behavior: TransactionBehavior, op: &'static str, f: F) -> Result<T>
where
    F: FnOnce(&Transaction<'_>) -> Result<T>,
{
    let is_write = matches!(behavior, TransactionBehavior::Immediate);
    let tx = conn
        .transaction_with_behavior(behavior)
        .map_err(Error::unexpected)?;

    match f(&tx) {
        Ok(value) => {
            tx.commit().map_err(Error::unexpected)?;
            Ok(value)
        }
        Err(err) => {
            if is_write {
                warn!(target: "bucketstore::txn", op, error = %err, "Rolling back transaction");
            }
            if let Err(rollback_err) = tx.rollback() {
                warn!(target: "bucketstore::txn", op, error = %rollback_err, "Rollback failed");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER NOT NULL)").unwrap();
        conn
    }

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0)).unwrap()
    }

    #[test]
    fn test_commit_on_ok() {
        let mut conn = conn();
        write(&mut conn, "test", |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1)", [])
                .map_err(Error::unexpected)?;
            Ok(())
        })
        .unwrap();
        assert_eq!(count(&conn), 1);
    }

    #[test]
    fn test_rollback_on_domain_error() {
        let mut conn = conn();
        let result: Result<()> = write(&mut conn, "test", |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1)", [])
                .map_err(Error::unexpected)?;
            Err(Error::BucketAlreadyExists("t".into()))
        });
        assert!(matches!(result, Err(Error::BucketAlreadyExists(_))));
        assert_eq!(count(&conn), 0);
    }

    #[test]
    fn test_rollback_on_storage_error() {
        let mut conn = conn();
        let result: Result<()> = write(&mut conn, "test", |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1)", [])
                .map_err(Error::unexpected)?;
            tx.execute("INSERT INTO t (v) VALUES (NULL)", [])
                .map_err(Error::unexpected)?;
            Ok(())
        });
        assert!(matches!(result, Err(Error::Unexpected(_))));
        assert_eq!(count(&conn), 0);
    }

    #[test]
    fn test_rollback_on_panic() {
        let mut conn = conn();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: Result<()> = write(&mut conn, "test", |tx| {
                tx.execute("INSERT INTO t (v) VALUES (1)", []).unwrap();
                panic!("boom");
            });
        }));
        assert!(outcome.is_err());
        assert_eq!(count(&conn), 0);
    }
}
