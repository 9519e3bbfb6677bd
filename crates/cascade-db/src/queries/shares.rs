//! Share rule query functions.
//!
//! Rules are versioned: writes append a new row per directed edge, and the
//! effective rule is the row with the greatest `updated_at` (ties broken by
//! greatest id). Percentages are stored as INTEGER hundredths of a percent,
//! so `90.00%` persists as `9000`.

use cascade_types::ParticipantId;
use rusqlite::{Connection, OptionalExtension};

use crate::Result;

/// Append a new rule version for a directed edge, returning its id.
pub fn append(
    conn: &Connection,
    superior_id: ParticipantId,
    subordinate_id: ParticipantId,
    pass_pct_minor: i64,
    updated_at: u64,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO share_config (superior_id, subordinate_id, pass_pct_minor, updated_at)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![superior_id, subordinate_id, pass_pct_minor, updated_at as i64],
    )?;
    Ok(conn.last_insert_rowid())
}

/// The effective rule for a directed edge, or `None` when no rule exists.
pub fn effective(
    conn: &Connection,
    superior_id: ParticipantId,
    subordinate_id: ParticipantId,
) -> Result<Option<ShareConfigRow>> {
    let row = conn
        .query_row(
            "SELECT id, superior_id, subordinate_id, pass_pct_minor, updated_at
             FROM share_config
             WHERE superior_id = ?1 AND subordinate_id = ?2
             ORDER BY updated_at DESC, id DESC
             LIMIT 1",
            rusqlite::params![superior_id, subordinate_id],
            map_share,
        )
        .optional()?;
    Ok(row)
}

/// List every rule version ordered by id.
pub fn list(conn: &Connection) -> Result<Vec<ShareConfigRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, superior_id, subordinate_id, pass_pct_minor, updated_at
         FROM share_config ORDER BY id",
    )?;

    let rows = stmt
        .query_map([], map_share)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_share(row: &rusqlite::Row<'_>) -> std::result::Result<ShareConfigRow, rusqlite::Error> {
    Ok(ShareConfigRow {
        id: row.get(0)?,
        superior_id: row.get(1)?,
        subordinate_id: row.get(2)?,
        pass_pct_minor: row.get(3)?,
        updated_at: row.get::<_, i64>(4)? as u64,
    })
}

/// A raw share rule row.
#[derive(Debug)]
pub struct ShareConfigRow {
    pub id: i64,
    pub superior_id: ParticipantId,
    pub subordinate_id: ParticipantId,
    pub pass_pct_minor: i64,
    pub updated_at: u64,
}
