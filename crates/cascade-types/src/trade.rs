//! Trade direction tags.

use serde::{Deserialize, Serialize};

/// Which way a trade's amount cascades through the hierarchy.
///
/// A LOSS starts at the customer and climbs toward the root; a PROFIT starts
/// at the root and descends to the customer. The per-edge percentage rules
/// are the same in both directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDirection {
    Loss,
    Profit,
}

impl TradeDirection {
    /// Canonical storage/wire tag for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Loss => "LOSS",
            TradeDirection::Profit => "PROFIT",
        }
    }
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The given string names no known trade direction.
#[derive(Debug, thiserror::Error)]
#[error("unknown trade direction: {0:?} (expected LOSS or PROFIT)")]
pub struct ParseDirectionError(pub String);

impl std::str::FromStr for TradeDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.eq_ignore_ascii_case("LOSS") {
            Ok(TradeDirection::Loss)
        } else if tag.eq_ignore_ascii_case("PROFIT") {
            Ok(TradeDirection::Profit)
        } else {
            Err(ParseDirectionError(s.to_string()))
        }
    }
}
