//! Curators supervising students

use rusqlite::{params, Connection, OptionalExtension, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curator {
    pub user_id: i64,
    pub username: String,
}

/// Registers the curator or refreshes their username.
///
/// Telegram usernames move between accounts, so a stale row of another
/// user still holding this username is dropped first.
pub fn add_curator(conn: &Connection, user_id: i64, username: &str) -> Result<()> {
    let username = username.trim().trim_start_matches('@');
    let tx = conn.unchecked_transaction()?;
    let stale = tx.execute(
        "DELETE FROM curators WHERE username = ?1 COLLATE NOCASE AND user_id != ?2",
        params![username, user_id],
    )?;
    if stale > 0 {
        log::info!("Dropped stale curator row holding @{}", username);
    }
    tx.execute(
        "INSERT INTO curators (user_id, username) VALUES (?1, ?2)
         ON CONFLICT(user_id) DO UPDATE SET username = excluded.username",
        params![user_id, username],
    )?;
    tx.commit()
}

/// Removes by username. Students of the curator are detached by the foreign key.
pub fn remove_curator(conn: &Connection, username: &str) -> Result<bool> {
    let username = username.trim().trim_start_matches('@');
    let removed = conn.execute(
        "DELETE FROM curators WHERE username = ?1 COLLATE NOCASE",
        params![username],
    )?;
    Ok(removed > 0)
}

pub fn get_curators(conn: &Connection) -> Result<Vec<Curator>> {
    let mut stmt = conn.prepare("SELECT user_id, username FROM curators ORDER BY username COLLATE NOCASE")?;
    let rows = stmt.query_map([], |row| {
        Ok(Curator {
            user_id: row.get(0)?,
            username: row.get(1)?,
        })
    })?;
    rows.collect()
}

pub fn get_curator(conn: &Connection, user_id: i64) -> Result<Option<Curator>> {
    conn.query_row(
        "SELECT user_id, username FROM curators WHERE user_id = ?1",
        params![user_id],
        |row| {
            Ok(Curator {
                user_id: row.get(0)?,
                username: row.get(1)?,
            })
        },
    )
    .optional()
}

pub fn is_curator(conn: &Connection, user_id: i64) -> Result<bool> {
    Ok(get_curator(conn, user_id)?.is_some())
}
