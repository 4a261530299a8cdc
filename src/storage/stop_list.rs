//! Stop-list of disabled card numbers

use rusqlite::{params, Connection, Result};

/// Entries, newest first.
pub fn get_stopped_cards(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT card_number FROM stopped_cards ORDER BY added_at DESC, id DESC")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    rows.collect()
}

/// Returns false when the entry was already listed.
pub fn add_stopped_card(conn: &Connection, card_number: &str) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO stopped_cards (card_number) VALUES (?1)",
        params![card_number.trim()],
    )?;
    Ok(inserted > 0)
}

/// Returns false when there was nothing to remove.
pub fn remove_stopped_card(conn: &Connection, card_number: &str) -> Result<bool> {
    let removed = conn.execute(
        "DELETE FROM stopped_cards WHERE card_number = ?1",
        params![card_number.trim()],
    )?;
    Ok(removed > 0)
}
