use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, Result};

use crate::core::config::requisites::{CARD_SLOTS, DEFAULT_PERCENTAGE};
use crate::core::error::{AppError, AppResult};
use crate::storage::migrations::run_migrations;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Create a new database connection pool
///
/// Initializes a connection pool with up to 10 connections, runs schema
/// migrations and seeds the singleton rows (admin settings, card slots).
///
/// # Arguments
///
/// * `database_path` - Path to SQLite database file
/// * `default_admin_password` - Password stored when admin settings are empty
///
/// # Example
///
/// ```no_run
/// use cardflow::storage::create_pool;
///
/// let pool = create_pool("database.sqlite", "123")?;
/// # Ok::<(), cardflow::core::AppError>(())
/// ```
pub fn create_pool(database_path: &str, default_admin_password: &str) -> AppResult<DbPool> {
    let manager = SqliteConnectionManager::file(database_path)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;"));
    let pool = Pool::builder()
        .max_size(10) // Maximum 10 connections in the pool
        .build(manager)?;

    let mut conn = pool.get()?;
    run_migrations(&mut conn).map_err(AppError::Migration)?;
    seed_defaults(&conn, default_admin_password)?;

    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is automatically returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, r2d2::Error> {
    pool.get()
}

/// Inserts the rows the bot expects to always exist.
///
/// Existing rows are never touched, so an admin-changed password survives restarts.
pub fn seed_defaults(conn: &Connection, default_admin_password: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO admin_settings (id, admin_password, personal_requisites_link)
         SELECT 1, ?1, NULL
         WHERE NOT EXISTS (SELECT 1 FROM admin_settings)",
        params![default_admin_password],
    )?;

    for card_order in 1..=CARD_SLOTS {
        conn.execute(
            "INSERT OR IGNORE INTO requisites
                 (card_order, card_number, card_name, bank_name, min_amount, max_amount, percentage)
             VALUES (?1, '-', '-', '-', 0, 0, ?2)",
            params![card_order, DEFAULT_PERCENTAGE],
        )?;
    }

    conn.execute(
        "INSERT OR IGNORE INTO statistics (id, total_profits_count, total_profits_amount) VALUES (1, 0, 0)",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_pool_seeds_defaults_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.sqlite");
        let path = path.to_str().unwrap();

        let pool = create_pool(path, "123").unwrap();
        {
            let conn = get_connection(&pool).unwrap();
            conn.execute("UPDATE admin_settings SET admin_password = 'changed' WHERE id = 1", [])
                .unwrap();
        }
        drop(pool);

        let pool = create_pool(path, "123").unwrap();
        let conn = get_connection(&pool).unwrap();
        let password: String = conn
            .query_row("SELECT admin_password FROM admin_settings WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(password, "changed");

        let slots: i64 = conn
            .query_row("SELECT COUNT(*) FROM requisites", [], |row| row.get(0))
            .unwrap();
        assert_eq!(slots, CARD_SLOTS);
    }
}
