//! Report command handlers.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Per-participant totals for one calendar day in the reporting timezone.
pub async fn daily_report(state: &Arc<DaemonState>, params: &Value) -> Result {
    let date_str = params
        .get("date")
        .and_then(|v| v.as_str())
        .ok_or_else(|| RpcError::invalid_params("date required"))?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| RpcError::invalid_params("date must be formatted YYYY-MM-DD"))?;

    let db = state.db.lock().await;
    let summary = cascade_report::daily_summary(&db, date, state.report_offset)
        .map_err(|e| RpcError::internal_error(&e.to_string()))?;

    Ok(serde_json::json!(summary))
}
