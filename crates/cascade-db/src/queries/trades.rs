//! Trade and distribution ledger query functions.
//!
//! Trade rows and their distribution rows are write-once. Distribution rows
//! are inserted in cascade traversal order inside the trade's transaction, so
//! reading them back ordered by id reproduces that order.

use cascade_types::{ParticipantId, TradeDirection, TradeId};
use rusqlite::{Connection, OptionalExtension};

use crate::Result;

/// Insert a trade row, returning its id.
pub fn insert_trade(
    conn: &Connection,
    customer_id: ParticipantId,
    amount_minor: i64,
    direction: TradeDirection,
    created_at: u64,
) -> Result<TradeId> {
    conn.execute(
        "INSERT INTO trade (customer_id, amount_minor, direction, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![customer_id, amount_minor, direction.as_str(), created_at as i64],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a trade by id.
pub fn find_trade(conn: &Connection, trade_id: TradeId) -> Result<Option<TradeRow>> {
    let row = conn
        .query_row(
            "SELECT id, customer_id, amount_minor, direction, created_at
             FROM trade WHERE id = ?1",
            [trade_id],
            map_trade,
        )
        .optional()?;
    Ok(row)
}

/// All trades ordered by id. The daily report scans this.
pub fn all_trades(conn: &Connection) -> Result<Vec<TradeRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, customer_id, amount_minor, direction, created_at FROM trade ORDER BY id",
    )?;

    let rows = stmt
        .query_map([], map_trade)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Insert one ledger row for a trade's cascade.
pub fn insert_distribution(
    conn: &Connection,
    trade_id: TradeId,
    participant_id: ParticipantId,
    kept_minor: i64,
    passed_minor: i64,
    created_at: u64,
) -> Result<()> {
    conn.execute(
        "INSERT INTO trade_distribution (trade_id, participant_id, kept_minor, passed_minor, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            trade_id,
            participant_id,
            kept_minor,
            passed_minor,
            created_at as i64,
        ],
    )?;
    Ok(())
}

/// A trade's ledger rows in traversal order, with current participant names.
pub fn distributions_of(conn: &Connection, trade_id: TradeId) -> Result<Vec<DistributionLineRow>> {
    let mut stmt = conn.prepare(
        "SELECT d.participant_id, p.name, d.kept_minor, d.passed_minor
         FROM trade_distribution d
         JOIN participant p ON p.id = d.participant_id
         WHERE d.trade_id = ?1
         ORDER BY d.id",
    )?;

    let rows = stmt
        .query_map([trade_id], |row| {
            Ok(DistributionLineRow {
                participant_id: row.get(0)?,
                participant_name: row.get(1)?,
                kept_minor: row.get(2)?,
                passed_minor: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_trade(row: &rusqlite::Row<'_>) -> std::result::Result<TradeRow, rusqlite::Error> {
    let raw_direction: String = row.get(3)?;
    Ok(TradeRow {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        amount_minor: row.get(2)?,
        direction: super::parse_direction(3, &raw_direction)?,
        created_at: row.get::<_, i64>(4)? as u64,
    })
}

/// A raw trade row.
#[derive(Debug)]
pub struct TradeRow {
    pub id: TradeId,
    pub customer_id: ParticipantId,
    pub amount_minor: i64,
    pub direction: TradeDirection,
    pub created_at: u64,
}

/// A ledger row joined with its participant's name.
#[derive(Debug)]
pub struct DistributionLineRow {
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub kept_minor: i64,
    pub passed_minor: i64,
}
