//! Participant query functions.

use cascade_types::{Participant, ParticipantId, ParticipantRole};
use rusqlite::{Connection, OptionalExtension};

use crate::{DbError, Result};

/// Insert a new participant, returning its id.
pub fn insert(
    conn: &Connection,
    name: &str,
    role: ParticipantRole,
    created_at: u64,
) -> Result<ParticipantId> {
    conn.execute(
        "INSERT INTO participant (name, role, created_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![name, role.as_str(), created_at as i64],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a participant by id.
pub fn find(conn: &Connection, id: ParticipantId) -> Result<Option<Participant>> {
    let row = conn
        .query_row(
            "SELECT id, name, role, created_at FROM participant WHERE id = ?1",
            [id],
            map_participant,
        )
        .optional()?;
    Ok(row)
}

/// List all participants ordered by id.
pub fn list(conn: &Connection) -> Result<Vec<Participant>> {
    let mut stmt =
        conn.prepare("SELECT id, name, role, created_at FROM participant ORDER BY id")?;

    let rows = stmt
        .query_map([], map_participant)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Update a participant's name and role.
pub fn update(
    conn: &Connection,
    id: ParticipantId,
    name: &str,
    role: ParticipantRole,
) -> Result<()> {
    let updated = conn.execute(
        "UPDATE participant SET name = ?1, role = ?2 WHERE id = ?3",
        rusqlite::params![name, role.as_str(), id],
    )?;
    if updated == 0 {
        return Err(DbError::NotFound(format!("participant {id}")));
    }
    Ok(())
}

/// Count participants (used to decide whether demo seeding applies).
pub fn count(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM participant", [], |row| row.get(0))?;
    Ok(count as u64)
}

fn map_participant(row: &rusqlite::Row<'_>) -> std::result::Result<Participant, rusqlite::Error> {
    let raw_role: String = row.get(2)?;
    Ok(Participant {
        id: row.get(0)?,
        name: row.get(1)?,
        role: super::parse_role(2, &raw_role)?,
        created_at: row.get::<_, i64>(3)? as u64,
    })
}
