//! Singleton admin settings row (`id = 1`)

use rusqlite::{params, Connection, OptionalExtension, Result};

/// Current admin panel password.
///
/// Restores the default row if it went missing, so the panel is never locked out.
pub fn get_admin_password(conn: &Connection, default_password: &str) -> Result<String> {
    let password: Option<String> = conn
        .query_row("SELECT admin_password FROM admin_settings WHERE id = 1", [], |row| {
            row.get(0)
        })
        .optional()?;

    match password {
        Some(password) => Ok(password),
        None => {
            log::warn!("admin_settings row is missing, restoring the default password");
            conn.execute(
                "INSERT OR REPLACE INTO admin_settings (id, admin_password, personal_requisites_link)
                 VALUES (1, ?1, NULL)",
                params![default_password],
            )?;
            Ok(default_password.to_string())
        }
    }
}

pub fn update_admin_password(conn: &Connection, new_password: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO admin_settings (id, admin_password) VALUES (1, ?1)
         ON CONFLICT(id) DO UPDATE SET admin_password = excluded.admin_password",
        params![new_password],
    )?;
    Ok(())
}

pub fn get_personal_requisites_link(conn: &Connection) -> Result<Option<String>> {
    let link: Option<Option<String>> = conn
        .query_row(
            "SELECT personal_requisites_link FROM admin_settings WHERE id = 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(link.flatten())
}

/// `None` clears the link.
pub fn update_personal_requisites_link(conn: &Connection, link: Option<&str>) -> Result<()> {
    conn.execute(
        "UPDATE admin_settings SET personal_requisites_link = ?1 WHERE id = 1",
        params![link],
    )?;
    Ok(())
}
