//! Hierarchy link query functions.
//!
//! Links are directed superior -> subordinate edges. Storage rejects duplicate
//! edges but deliberately does not enforce a single superior per participant;
//! traversal detects multi-superior states and fails the trade instead.

use cascade_types::ParticipantId;
use rusqlite::Connection;

use crate::{DbError, Result};

/// Insert a hierarchy link, returning its id.
///
/// A duplicate edge trips the storage uniqueness constraint and surfaces as
/// [`DbError::Constraint`].
pub fn insert(
    conn: &Connection,
    superior_id: ParticipantId,
    subordinate_id: ParticipantId,
    created_at: u64,
) -> Result<i64> {
    let result = conn.execute(
        "INSERT INTO hierarchy_link (superior_id, subordinate_id, created_at)
         VALUES (?1, ?2, ?3)",
        rusqlite::params![superior_id, subordinate_id, created_at as i64],
    );
    match result {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(DbError::Constraint(format!(
                "link {superior_id} -> {subordinate_id} already exists"
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// All superiors of a participant, oldest link first.
///
/// A well-formed hierarchy yields zero or one entries; more than one is the
/// inconsistent state the engine rejects.
pub fn superiors_of(conn: &Connection, subordinate_id: ParticipantId) -> Result<Vec<ParticipantId>> {
    let mut stmt = conn.prepare(
        "SELECT superior_id FROM hierarchy_link WHERE subordinate_id = ?1 ORDER BY id",
    )?;

    let rows = stmt
        .query_map([subordinate_id], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// List all links ordered by id.
pub fn list(conn: &Connection) -> Result<Vec<LinkRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, superior_id, subordinate_id, created_at FROM hierarchy_link ORDER BY id",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(LinkRow {
                id: row.get(0)?,
                superior_id: row.get(1)?,
                subordinate_id: row.get(2)?,
                created_at: row.get::<_, i64>(3)? as u64,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// A raw hierarchy link row.
#[derive(Debug)]
pub struct LinkRow {
    pub id: i64,
    pub superior_id: ParticipantId,
    pub subordinate_id: ParticipantId,
    pub created_at: u64,
}
