//! The three card slots shown to users

use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use crate::core::requisites::{digits_of, Requisite};

fn requisite_from_row(row: &Row<'_>) -> Result<Requisite> {
    Ok(Requisite {
        card_order: row.get(0)?,
        card_number: row.get(1)?,
        card_name: row.get(2)?,
        bank_name: row.get(3)?,
        min_amount: row.get(4)?,
        max_amount: row.get(5)?,
        percentage: row.get(6)?,
    })
}

/// All card slots ordered by `card_order`.
pub fn get_all_requisites(conn: &Connection) -> Result<Vec<Requisite>> {
    let mut stmt = conn.prepare(
        "SELECT card_order, card_number, card_name, bank_name, min_amount, max_amount, percentage
         FROM requisites
         ORDER BY card_order",
    )?;
    let rows = stmt.query_map([], requisite_from_row)?;
    rows.collect()
}

pub fn get_requisite_by_order(conn: &Connection, card_order: i64) -> Result<Option<Requisite>> {
    conn.query_row(
        "SELECT card_order, card_number, card_name, bank_name, min_amount, max_amount, percentage
         FROM requisites
         WHERE card_order = ?1",
        params![card_order],
        requisite_from_row,
    )
    .optional()
}

/// Finds the slot holding `card_number`, comparing digits only when both sides have any.
pub fn get_card_order_by_number(conn: &Connection, card_number: &str) -> Result<Option<i64>> {
    let wanted = card_number.trim();
    let wanted_digits = digits_of(wanted);
    let found = get_all_requisites(conn)?.into_iter().find(|card| {
        card.card_number.trim() == wanted
            || (!wanted_digits.is_empty() && card.digits() == wanted_digits)
    });
    Ok(found.map(|card| card.card_order))
}

/// Writes the slot, creating it when it does not exist yet.
pub fn update_requisite(conn: &Connection, requisite: &Requisite) -> Result<()> {
    conn.execute(
        "INSERT INTO requisites
             (card_order, card_number, card_name, bank_name, min_amount, max_amount, percentage)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(card_order) DO UPDATE SET
             card_number = excluded.card_number,
             card_name = excluded.card_name,
             bank_name = excluded.bank_name,
             min_amount = excluded.min_amount,
             max_amount = excluded.max_amount,
             percentage = excluded.percentage",
        params![
            requisite.card_order,
            requisite.card_number,
            requisite.card_name,
            requisite.bank_name,
            requisite.min_amount,
            requisite.max_amount,
            requisite.percentage,
        ],
    )?;
    Ok(())
}
