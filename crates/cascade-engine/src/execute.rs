//! Trade execution: the cascading distribution.
//!
//! A LOSS enters at the customer and climbs the chain; each participant keeps
//! its cut and passes the remainder up. A PROFIT enters at the root and
//! descends; each superior keeps its cut and passes the remainder down. The
//! same per-edge rule drives both directions, and every split rounds half-up
//! to 2 decimal places, so the kept amounts always sum to the trade amount
//! exactly.

use cascade_db::queries::trades;
use cascade_types::money::{from_minor, round_money, to_minor};
use cascade_types::{DistributionLine, Participant, ParticipantId, TradeDirection, TradeId};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{chain, share, EngineError, Result};

/// The persisted result of one executed trade.
#[derive(Debug)]
pub struct TradeOutcome {
    pub trade_id: TradeId,
    pub amount: Decimal,
    pub direction: TradeDirection,
    /// Ledger lines in traversal order.
    pub lines: Vec<DistributionLine>,
}

/// Execute a trade: resolve the customer's chain, cascade the amount through
/// it, and persist the trade with its full ledger atomically.
///
/// The amount is rounded half-up to 2 decimals on entry and must then be
/// positive. All reads and writes run inside a single transaction; any
/// failure rolls back completely, leaving no trade and no ledger rows.
pub fn execute_trade(
    conn: &mut Connection,
    customer_id: ParticipantId,
    amount: Decimal,
    direction: TradeDirection,
    created_at: u64,
) -> Result<TradeOutcome> {
    let amount = round_money(amount);
    if amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount(amount));
    }
    let amount_minor = minor_units(amount)?;

    let tx = conn.transaction().map_err(cascade_db::DbError::Sqlite)?;

    let chain = chain::resolve_chain(&tx, customer_id)?;
    if chain.len() < 2 {
        return Err(EngineError::NoHierarchyConfigured(customer_id));
    }

    // The trade row goes in before the cascade so ledger rows can reference it.
    let trade_id = trades::insert_trade(&tx, customer_id, amount_minor, direction, created_at)?;

    // LOSS walks the chain bottom-up; PROFIT walks it top-down.
    let ordered: Vec<&Participant> = match direction {
        TradeDirection::Loss => chain.iter().collect(),
        TradeDirection::Profit => chain.iter().rev().collect(),
    };

    let mut current = amount;
    let mut lines = Vec::with_capacity(ordered.len());

    for (i, participant) in ordered.iter().enumerate() {
        let (kept, passed) = match ordered.get(i + 1) {
            Some(next) => {
                // The superior end of the edge is whoever sits higher in the
                // tree, regardless of walk direction.
                let (superior_id, subordinate_id) = match direction {
                    TradeDirection::Loss => (next.id, participant.id),
                    TradeDirection::Profit => (participant.id, next.id),
                };
                let pct = share::effective_share(&tx, superior_id, subordinate_id)?;
                let passed = round_money(current * pct / Decimal::ONE_HUNDRED);
                (current - passed, passed)
            }
            // Terminal participant: keeps whatever arrived, passes nothing.
            None => (current, Decimal::new(0, 2)),
        };

        trades::insert_distribution(
            &tx,
            trade_id,
            participant.id,
            minor_units(kept)?,
            minor_units(passed)?,
            created_at,
        )?;
        lines.push(DistributionLine {
            participant_id: participant.id,
            participant_name: participant.name.clone(),
            amount_kept: kept,
            amount_passed: passed,
        });
        current = passed;
    }

    tx.commit().map_err(cascade_db::DbError::Sqlite)?;

    tracing::info!(
        trade_id,
        customer_id,
        %amount,
        direction = direction.as_str(),
        participants = lines.len(),
        "trade distributed"
    );

    Ok(TradeOutcome {
        trade_id,
        amount,
        direction,
        lines,
    })
}

/// A trade's ledger lines in traversal order.
///
/// # Errors
///
/// - [`EngineError::TradeNotFound`] if the trade id is unknown
pub fn trade_lines(conn: &Connection, trade_id: TradeId) -> Result<Vec<DistributionLine>> {
    trades::find_trade(conn, trade_id)?.ok_or(EngineError::TradeNotFound(trade_id))?;

    let rows = trades::distributions_of(conn, trade_id)?;
    Ok(rows
        .into_iter()
        .map(|row| DistributionLine {
            participant_id: row.participant_id,
            participant_name: row.participant_name,
            amount_kept: from_minor(row.kept_minor),
            amount_passed: from_minor(row.passed_minor),
        })
        .collect())
}

fn minor_units(value: Decimal) -> Result<i64> {
    to_minor(value).ok_or(EngineError::AmountOutOfRange(value))
}
