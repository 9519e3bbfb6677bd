//! Effective share rule lookup.

use cascade_db::queries::shares;
use cascade_types::money::{from_minor, valid_percent};
use cascade_types::ParticipantId;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{EngineError, Result};

/// The effective pass-through percentage for a directed edge.
///
/// Reads the newest rule version for the exact (superior, subordinate) pair.
/// There is no default: an edge without a rule cannot carry a cascade.
///
/// # Errors
///
/// - [`EngineError::ShareConfigMissing`] if no rule exists for the edge
/// - [`EngineError::ShareOutOfRange`] if the stored rule lies outside [0, 100]
pub fn effective_share(
    conn: &Connection,
    superior_id: ParticipantId,
    subordinate_id: ParticipantId,
) -> Result<Decimal> {
    let rule = shares::effective(conn, superior_id, subordinate_id)?.ok_or(
        EngineError::ShareConfigMissing {
            superior_id,
            subordinate_id,
        },
    )?;

    let pct = from_minor(rule.pass_pct_minor);
    if !valid_percent(pct) {
        return Err(EngineError::ShareOutOfRange {
            superior_id,
            subordinate_id,
            pct,
        });
    }

    Ok(pct)
}
