//! # cascade-report
//!
//! Read-side aggregation over the distribution ledger.
//!
//! ## Modules
//!
//! - [`daily`] — per-participant daily totals in a fixed reporting timezone

pub mod daily;

pub use daily::{daily_summary, parse_offset, ParticipantSummary};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Configured timezone offset string could not be parsed.
    #[error("invalid timezone offset: {0}")]
    InvalidOffset(String),

    /// Underlying storage failure.
    #[error(transparent)]
    Db(#[from] cascade_db::DbError),
}

/// Convenience result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
