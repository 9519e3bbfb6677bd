//! IPC command handlers.
//!
//! Each submodule implements the commands for one domain area.

pub mod participants;
pub mod reports;
pub mod shares;
pub mod trades;

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::rpc::RpcError;

/// Extract a monetary or percentage parameter.
///
/// Accepts decimal strings ("1000.00") as the canonical form; bare JSON
/// numbers are tolerated and parsed through their text representation.
pub(crate) fn decimal_param(params: &Value, key: &str) -> std::result::Result<Decimal, RpcError> {
    let value = params
        .get(key)
        .ok_or_else(|| RpcError::invalid_params(&format!("{key} required")))?;

    let parsed = match value {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    };

    parsed.ok_or_else(|| RpcError::invalid_params(&format!("{key} must be a decimal amount")))
}
