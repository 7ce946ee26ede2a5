//! Schema migration registry for the local key-value table.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_kv_entries.sql"),
}];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies pending migrations inside one transaction.
///
/// # Errors
/// - `DbError::NewerSchema` when the file was written by a newer build.
/// - `DbError::Migration` naming the first script that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    apply(conn, MIGRATIONS)
}

fn apply(conn: &mut Connection, migrations: &[Migration]) -> DbResult<()> {
    let current = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let latest = migrations.last().map_or(0, |migration| migration.version);

    if current > latest {
        return Err(DbError::NewerSchema {
            found: current,
            supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in migrations.iter().filter(|m| m.version > current) {
        tx.execute_batch(migration.sql)
            .and_then(|()| {
                tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))
            })
            .map_err(|source| {
                error!(
                    "event=db_migrate module=db status=error version={}",
                    migration.version
                );
                DbError::Migration {
                    version: migration.version,
                    source,
                }
            })?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        current, latest
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{apply, Migration};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn failed_migration_names_its_version_and_rolls_back() {
        let mut conn = Connection::open_in_memory().expect("in-memory db");
        let migrations = [
            Migration {
                version: 1,
                sql: "CREATE TABLE first_step (id INTEGER);",
            },
            Migration {
                version: 2,
                sql: "CREATE TABLE broken (;",
            },
        ];

        match apply(&mut conn, &migrations) {
            Err(DbError::Migration { version, .. }) => assert_eq!(version, 2),
            other => panic!("unexpected result: {other:?}"),
        }

        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .expect("user_version");
        assert_eq!(version, 0);
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'first_step';",
                [],
                |row| row.get(0),
            )
            .expect("sqlite_master");
        assert_eq!(tables, 0);
    }
}
