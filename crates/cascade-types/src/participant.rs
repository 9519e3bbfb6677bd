//! Participant identity and role tags.

use serde::{Deserialize, Serialize};

use crate::ParticipantId;

/// Where a participant sits in the ownership tree.
///
/// The set is closed: every participant carries exactly one of these tags.
/// Chain traversal follows hierarchy links, not roles; the role only drives
/// seeding and operator-facing listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantRole {
    Owner,
    Operator,
    Agent,
    Customer,
}

impl ParticipantRole {
    /// Canonical storage/wire tag for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Owner => "OWNER",
            ParticipantRole::Operator => "OPERATOR",
            ParticipantRole::Agent => "AGENT",
            ParticipantRole::Customer => "CUSTOMER",
        }
    }
}

impl std::fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The given string names no known role.
#[derive(Debug, thiserror::Error)]
#[error("unknown participant role: {0:?} (expected OWNER, OPERATOR, AGENT or CUSTOMER)")]
pub struct ParseRoleError(pub String);

impl std::str::FromStr for ParticipantRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        for role in [
            ParticipantRole::Owner,
            ParticipantRole::Operator,
            ParticipantRole::Agent,
            ParticipantRole::Customer,
        ] {
            if tag.eq_ignore_ascii_case(role.as_str()) {
                return Ok(role);
            }
        }
        Err(ParseRoleError(s.to_string()))
    }
}

/// A participant in the ownership tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub role: ParticipantRole,
    /// Unix epoch seconds.
    pub created_at: u64,
}
