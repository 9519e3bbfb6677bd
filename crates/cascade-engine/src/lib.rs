//! # cascade-engine
//!
//! Trade distribution engine: resolves a customer's ancestor chain, cascades
//! a trade amount through it edge by edge, and persists the trade with its
//! distribution ledger in one atomic transaction.
//!
//! ## Modules
//!
//! - [`chain`] — ancestor chain resolution over hierarchy links
//! - [`share`] — effective share rule lookup per directed edge
//! - [`execute`] — the cascade itself: trade execution and ledger lookup
//!
//! The engine never retries and never applies defaults: a missing share rule,
//! a malformed hierarchy, or a bad amount aborts the whole trade before
//! anything is written.

pub mod chain;
pub mod execute;
pub mod share;

use cascade_types::{ParticipantId, TradeId};
use rust_decimal::Decimal;

pub use execute::{execute_trade, trade_lines, TradeOutcome};

/// Error types for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Referenced participant does not exist.
    #[error("participant {0} not found")]
    ParticipantNotFound(ParticipantId),

    /// The customer has no superior at all; a trade needs at least one edge.
    #[error("participant {0} has no hierarchy configured above it")]
    NoHierarchyConfigured(ParticipantId),

    /// A participant on the chain has more than one superior.
    #[error("participant {0} has multiple superiors")]
    InconsistentHierarchy(ParticipantId),

    /// Following superior links revisited a participant.
    #[error("hierarchy cycle detected at participant {0}")]
    HierarchyCycle(ParticipantId),

    /// An edge on the chain has no share rule configured.
    #[error("no share rule for edge {superior_id} -> {subordinate_id}")]
    ShareConfigMissing {
        /// Superior end of the edge.
        superior_id: ParticipantId,
        /// Subordinate end of the edge.
        subordinate_id: ParticipantId,
    },

    /// A stored share rule lies outside the [0, 100] percentage band.
    #[error("share rule for edge {superior_id} -> {subordinate_id} out of range: {pct}")]
    ShareOutOfRange {
        /// Superior end of the edge.
        superior_id: ParticipantId,
        /// Subordinate end of the edge.
        subordinate_id: ParticipantId,
        /// The stored percentage.
        pct: Decimal,
    },

    /// Trade amount is zero or negative after rounding.
    #[error("trade amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Monetary value does not fit the ledger's integer minor units.
    #[error("amount out of representable range: {0}")]
    AmountOutOfRange(Decimal),

    /// Referenced trade does not exist.
    #[error("trade {0} not found")]
    TradeNotFound(TradeId),

    /// Underlying storage failure.
    #[error(transparent)]
    Db(#[from] cascade_db::DbError),
}

/// Convenience result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
