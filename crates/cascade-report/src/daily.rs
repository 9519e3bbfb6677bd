//! Per-participant daily totals.
//!
//! A trade belongs to a calendar day if its creation instant, converted to
//! the configured reporting offset, falls on that day. The summary folds
//! every ledger row of every matching trade into per-participant totals.
//! Trade volumes are small enough that a full scan is fine.

use std::collections::BTreeMap;

use cascade_db::queries::trades;
use cascade_types::money::from_minor;
use cascade_types::ParticipantId;
use chrono::{DateTime, FixedOffset, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ReportError, Result};

/// Aggregated totals for one participant on one day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    /// Participant name at read time.
    pub name: String,
    pub total_kept: Decimal,
    pub total_passed: Decimal,
}

/// Parse a reporting offset string like `"+05:30"` or `"-08:00"`.
pub fn parse_offset(raw: &str) -> Result<FixedOffset> {
    raw.trim()
        .parse::<FixedOffset>()
        .map_err(|_| ReportError::InvalidOffset(raw.to_string()))
}

/// Fold the ledger into per-participant totals for one calendar day.
///
/// The map is keyed by participant id; participants without any row on that
/// day are absent.
pub fn daily_summary(
    conn: &Connection,
    date: NaiveDate,
    offset: FixedOffset,
) -> Result<BTreeMap<ParticipantId, ParticipantSummary>> {
    let mut summary: BTreeMap<ParticipantId, ParticipantSummary> = BTreeMap::new();

    for trade in trades::all_trades(conn)? {
        if local_day(trade.created_at, offset) != Some(date) {
            continue;
        }

        for line in trades::distributions_of(conn, trade.id)? {
            let entry = summary
                .entry(line.participant_id)
                .or_insert_with(|| ParticipantSummary {
                    name: line.participant_name.clone(),
                    total_kept: Decimal::ZERO,
                    total_passed: Decimal::ZERO,
                });
            entry.total_kept += from_minor(line.kept_minor);
            entry.total_passed += from_minor(line.passed_minor);
        }
    }

    Ok(summary)
}

/// The calendar day an epoch-seconds instant falls on in the given offset.
fn local_day(epoch_secs: u64, offset: FixedOffset) -> Option<NaiveDate> {
    let ts = i64::try_from(epoch_secs).ok()?;
    let utc = DateTime::from_timestamp(ts, 0)?;
    Some(utc.with_timezone(&offset).date_naive())
}
