//! Users, their curator link, staff attributes and bans

use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use crate::core::wizard::UserRef;

/// Role value stored for staff members.
pub const STAFF_ROLE: &str = "staff";

/// A bot user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub registration_complete: bool,
    pub experience: Option<String>,
    pub time_commitment: Option<String>,
    pub source: Option<String>,
    pub unique_tag: Option<String>,
    pub curator_id: Option<i64>,
    pub role: Option<String>,
    pub position: Option<String>,
    pub is_on_shift: bool,
    pub is_banned: bool,
}

impl User {
    /// `@username` when known, otherwise the numeric id.
    pub fn display_name(&self) -> String {
        match &self.username {
            Some(name) => format!("@{}", name),
            None => self.user_id.to_string(),
        }
    }
}

const USER_COLUMNS: &str = "user_id, username, first_name, registration_complete, experience, time_commitment, \
                            source, unique_tag, curator_id, role, position, is_on_shift, is_banned";

fn user_from_row(row: &Row<'_>) -> Result<User> {
    Ok(User {
        user_id: row.get(0)?,
        username: row.get(1)?,
        first_name: row.get(2)?,
        registration_complete: row.get(3)?,
        experience: row.get(4)?,
        time_commitment: row.get(5)?,
        source: row.get(6)?,
        unique_tag: row.get(7)?,
        curator_id: row.get(8)?,
        role: row.get(9)?,
        position: row.get(10)?,
        is_on_shift: row.get(11)?,
        is_banned: row.get(12)?,
    })
}

fn query_users(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<Vec<User>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, user_from_row)?;
    rows.collect()
}

/// Inserts the user on first contact, otherwise refreshes the Telegram names.
pub fn add_user(conn: &Connection, user_id: i64, username: Option<&str>, first_name: Option<&str>) -> Result<()> {
    conn.execute(
        "INSERT INTO users (user_id, username, first_name) VALUES (?1, ?2, ?3)
         ON CONFLICT(user_id) DO UPDATE SET username = excluded.username, first_name = excluded.first_name",
        params![user_id, username, first_name],
    )?;
    Ok(())
}

pub fn get_user(conn: &Connection, user_id: i64) -> Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {} FROM users WHERE user_id = ?1", USER_COLUMNS),
        params![user_id],
        user_from_row,
    )
    .optional()
}

/// Case-insensitive lookup; a leading `@` is ignored.
pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    let username = username.trim().trim_start_matches('@');
    conn.query_row(
        &format!(
            "SELECT {} FROM users WHERE username = ?1 COLLATE NOCASE LIMIT 1",
            USER_COLUMNS
        ),
        params![username],
        user_from_row,
    )
    .optional()
}

pub fn find_user(conn: &Connection, user_ref: &UserRef) -> Result<Option<User>> {
    match user_ref {
        UserRef::Id(id) => get_user(conn, *id),
        UserRef::Username(name) => get_user_by_username(conn, name),
    }
}

pub fn complete_registration(
    conn: &Connection,
    user_id: i64,
    experience: &str,
    time_commitment: &str,
    source: &str,
) -> Result<()> {
    conn.execute(
        "UPDATE users
         SET experience = ?1, time_commitment = ?2, source = ?3, registration_complete = 1
         WHERE user_id = ?4",
        params![experience, time_commitment, source, user_id],
    )?;
    Ok(())
}

pub fn set_unique_tag(conn: &Connection, user_id: i64, unique_tag: Option<&str>) -> Result<()> {
    conn.execute(
        "UPDATE users SET unique_tag = ?1 WHERE user_id = ?2",
        params![unique_tag, user_id],
    )?;
    Ok(())
}

pub fn count_users(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
}

// --- Curator link ---

pub fn set_user_curator(conn: &Connection, user_id: i64, curator_id: Option<i64>) -> Result<()> {
    conn.execute(
        "UPDATE users SET curator_id = ?1 WHERE user_id = ?2",
        params![curator_id, user_id],
    )?;
    Ok(())
}

/// Username of the user's curator, if one is assigned.
pub fn get_user_curator(conn: &Connection, user_id: i64) -> Result<Option<String>> {
    conn.query_row(
        "SELECT c.username
         FROM users u
         JOIN curators c ON u.curator_id = c.user_id
         WHERE u.user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )
    .optional()
}

pub fn get_students(conn: &Connection, curator_id: i64) -> Result<Vec<User>> {
    query_users(
        conn,
        &format!(
            "SELECT {} FROM users WHERE curator_id = ?1 ORDER BY created_at, user_id",
            USER_COLUMNS
        ),
        params![curator_id],
    )
}

// --- Staff ---

/// Marks the user as staff. Returns false when the user is unknown.
pub fn set_staff(conn: &Connection, user_id: i64, position: &str) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE users SET role = ?1, position = ?2 WHERE user_id = ?3",
        params![STAFF_ROLE, position, user_id],
    )?;
    Ok(changed > 0)
}

pub fn clear_staff(conn: &Connection, user_id: i64) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE users SET role = NULL, position = NULL, is_on_shift = 0 WHERE user_id = ?1 AND role = ?2",
        params![user_id, STAFF_ROLE],
    )?;
    Ok(changed > 0)
}

/// Flips the shift flag of a staff member and returns the new value.
///
/// `None` means the user is not staff.
pub fn toggle_shift(conn: &Connection, user_id: i64) -> Result<Option<bool>> {
    conn.query_row(
        "UPDATE users SET is_on_shift = NOT is_on_shift
         WHERE user_id = ?1 AND role = ?2
         RETURNING is_on_shift",
        params![user_id, STAFF_ROLE],
        |row| row.get(0),
    )
    .optional()
}

pub fn get_staff(conn: &Connection) -> Result<Vec<User>> {
    query_users(
        conn,
        &format!(
            "SELECT {} FROM users WHERE role = ?1 ORDER BY is_on_shift DESC, username",
            USER_COLUMNS
        ),
        params![STAFF_ROLE],
    )
}

// --- Bans ---

pub fn set_banned(conn: &Connection, user_id: i64, banned: bool) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE users SET is_banned = ?1 WHERE user_id = ?2",
        params![banned, user_id],
    )?;
    Ok(changed > 0)
}

/// Unknown users are not banned.
pub fn is_banned(conn: &Connection, user_id: i64) -> Result<bool> {
    let banned: Option<bool> = conn
        .query_row(
            "SELECT is_banned FROM users WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(banned.unwrap_or(false))
}

pub fn get_banned_users(conn: &Connection) -> Result<Vec<User>> {
    query_users(
        conn,
        &format!("SELECT {} FROM users WHERE is_banned = 1 ORDER BY user_id", USER_COLUMNS),
        [],
    )
}
