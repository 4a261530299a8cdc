//! Profit checks and the approved-profit statistics

use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use crate::core::profit::{ProfitCheck, ProfitStatus, ProfitTotals};

fn check_from_row(row: &Row<'_>) -> Result<ProfitCheck> {
    let raw_status: String = row.get(4)?;
    let status = ProfitStatus::parse(&raw_status)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e)))?;
    Ok(ProfitCheck {
        id: row.get(0)?,
        user_id: row.get(1)?,
        amount: row.get(2)?,
        photo_file_id: row.get(3)?,
        status,
        created_at: row.get(5)?,
        processed_at: row.get(6)?,
    })
}

/// Stores a new pending check and returns its id.
pub fn create_profit_check(conn: &Connection, user_id: i64, amount: i64, photo_file_id: Option<&str>) -> Result<i64> {
    conn.execute(
        "INSERT INTO profit_checks (user_id, amount, photo_file_id, status) VALUES (?1, ?2, ?3, ?4)",
        params![user_id, amount, photo_file_id, ProfitStatus::Pending.as_ref()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_profit_check(conn: &Connection, check_id: i64) -> Result<Option<ProfitCheck>> {
    conn.query_row(
        "SELECT id, user_id, amount, photo_file_id, status, created_at, processed_at
         FROM profit_checks
         WHERE id = ?1",
        params![check_id],
        check_from_row,
    )
    .optional()
}

/// Moves a pending check to `status`; a check that is not pending stays untouched.
///
/// Approval adds the amount to the global statistics in the same transaction.
fn finish_profit_check(conn: &Connection, check_id: i64, status: ProfitStatus) -> Result<Option<ProfitCheck>> {
    let tx = conn.unchecked_transaction()?;

    let changed = tx.execute(
        "UPDATE profit_checks
         SET status = ?1, processed_at = CURRENT_TIMESTAMP
         WHERE id = ?2 AND status = ?3",
        params![status.as_ref(), check_id, ProfitStatus::Pending.as_ref()],
    )?;
    if changed == 0 {
        return Ok(None);
    }

    let check = get_profit_check(&tx, check_id)?;
    if let (ProfitStatus::Approved, Some(check)) = (status, check.as_ref()) {
        tx.execute(
            "INSERT INTO statistics (id, total_profits_count, total_profits_amount) VALUES (1, 1, ?1)
             ON CONFLICT(id) DO UPDATE SET
                 total_profits_count = total_profits_count + 1,
                 total_profits_amount = total_profits_amount + excluded.total_profits_amount",
            params![check.amount],
        )?;
    }

    tx.commit()?;
    Ok(check)
}

/// `None` when the check is missing or already processed.
pub fn approve_profit_check(conn: &Connection, check_id: i64) -> Result<Option<ProfitCheck>> {
    finish_profit_check(conn, check_id, ProfitStatus::Approved)
}

/// `None` when the check is missing or already processed.
pub fn reject_profit_check(conn: &Connection, check_id: i64) -> Result<Option<ProfitCheck>> {
    finish_profit_check(conn, check_id, ProfitStatus::Rejected)
}

/// Global approved-profit totals.
pub fn get_statistics(conn: &Connection) -> Result<ProfitTotals> {
    let totals = conn
        .query_row(
            "SELECT total_profits_count, total_profits_amount FROM statistics WHERE id = 1",
            [],
            |row| {
                Ok(ProfitTotals {
                    count: row.get(0)?,
                    amount: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(totals.unwrap_or_default())
}

/// Approved checks of one user.
pub fn get_user_profit_statistics(conn: &Connection, user_id: i64) -> Result<ProfitTotals> {
    conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(amount), 0)
         FROM profit_checks
         WHERE user_id = ?1 AND status = ?2",
        params![user_id, ProfitStatus::Approved.as_ref()],
        |row| {
            Ok(ProfitTotals {
                count: row.get(0)?,
                amount: row.get(1)?,
            })
        },
    )
}
