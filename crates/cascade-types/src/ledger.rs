//! Distribution ledger line shapes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ParticipantId;

/// One participant's share of a single trade's cascade.
///
/// Lines are emitted in traversal order: customer-first for a LOSS,
/// root-first for a PROFIT. The last line of a trade always has
/// `amount_passed == 0`, and the `amount_kept` values of all lines sum to
/// the trade amount exactly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistributionLine {
    pub participant_id: ParticipantId,
    pub participant_name: String,
    /// Amount this participant retained, scale 2, never negative.
    pub amount_kept: Decimal,
    /// Amount forwarded along the chain, scale 2, never negative.
    pub amount_passed: Decimal,
}
