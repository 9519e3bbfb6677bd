//! Database query functions organized by domain.

pub mod hierarchy;
pub mod participants;
pub mod shares;
pub mod trades;

use cascade_types::{ParticipantRole, TradeDirection};

/// Map a text column that failed enum parsing into a rusqlite conversion error.
///
/// Used inside `query_map` closures so malformed rows surface as
/// `rusqlite::Error` instead of panicking.
fn column_parse_error(
    index: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        index,
        rusqlite::types::Type::Text,
        Box::new(err),
    )
}

/// Parse a `role` TEXT column value.
fn parse_role(index: usize, raw: &str) -> std::result::Result<ParticipantRole, rusqlite::Error> {
    raw.parse().map_err(|e| column_parse_error(index, e))
}

/// Parse a `direction` TEXT column value.
fn parse_direction(
    index: usize,
    raw: &str,
) -> std::result::Result<TradeDirection, rusqlite::Error> {
    raw.parse().map_err(|e| column_parse_error(index, e))
}
