//! Ancestor chain resolution.
//!
//! The chain starts at a participant and follows superior links upward until
//! a participant with no superior (the root) is reached. The hierarchy is
//! expected to be a forest of trees; anything else fails the resolution.

use std::collections::HashSet;

use cascade_db::queries::{hierarchy, participants};
use cascade_types::{Participant, ParticipantId};
use rusqlite::Connection;

use crate::{EngineError, Result};

/// Resolve the ancestor chain for a participant.
///
/// Element 0 is the participant itself; the last element is the root. A
/// participant with no superior resolves to a chain of length 1.
///
/// # Errors
///
/// - [`EngineError::ParticipantNotFound`] if any id on the walk is unknown
/// - [`EngineError::InconsistentHierarchy`] if a participant has more than
///   one superior
/// - [`EngineError::HierarchyCycle`] if superior links revisit a participant
pub fn resolve_chain(conn: &Connection, participant_id: ParticipantId) -> Result<Vec<Participant>> {
    let start = participants::find(conn, participant_id)?
        .ok_or(EngineError::ParticipantNotFound(participant_id))?;

    let mut chain = vec![start];
    let mut seen = HashSet::from([participant_id]);
    let mut current = participant_id;

    loop {
        let superiors = hierarchy::superiors_of(conn, current)?;
        match superiors.as_slice() {
            [] => break,
            [superior_id] => {
                if !seen.insert(*superior_id) {
                    return Err(EngineError::HierarchyCycle(*superior_id));
                }
                let superior = participants::find(conn, *superior_id)?
                    .ok_or(EngineError::ParticipantNotFound(*superior_id))?;
                chain.push(superior);
                current = *superior_id;
            }
            _ => return Err(EngineError::InconsistentHierarchy(current)),
        }
    }

    Ok(chain)
}
