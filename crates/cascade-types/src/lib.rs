//! # cascade-types
//!
//! Shared domain types used across the Cascade workspace: participants and
//! their roles, trade directions, distribution ledger lines, and the
//! fixed-point money helpers every other crate builds on.

pub mod ledger;
pub mod money;
pub mod participant;
pub mod trade;

/// Row identifier of a participant.
pub type ParticipantId = i64;

/// Row identifier of a trade.
pub type TradeId = i64;

pub use ledger::DistributionLine;
pub use participant::{Participant, ParticipantRole};
pub use trade::TradeDirection;
