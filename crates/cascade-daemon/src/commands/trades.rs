//! Trade command handlers.

use std::sync::Arc;

use cascade_types::TradeDirection;
use serde_json::Value;

use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Execute a trade and return its full distribution.
pub async fn execute_trade(state: &Arc<DaemonState>, params: &Value) -> Result {
    let customer_id = params
        .get("customer_id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| RpcError::invalid_params("customer_id required"))?;
    let amount = super::decimal_param(params, "amount")?;
    let direction: TradeDirection = params
        .get("direction")
        .and_then(|v| v.as_str())
        .ok_or_else(|| RpcError::invalid_params("direction required"))?
        .parse()
        .map_err(|_| RpcError::invalid_params("direction must be LOSS or PROFIT"))?;

    let mut db = state.db.lock().await;
    let outcome =
        cascade_engine::execute_trade(&mut db, customer_id, amount, direction, crate::now_secs())
            .map_err(RpcError::from_engine)?;

    Ok(serde_json::json!({
        "trade_id": outcome.trade_id,
        "amount": outcome.amount,
        "direction": outcome.direction.as_str(),
        "distributions": outcome.lines,
    }))
}

/// Fetch the distribution ledger of an executed trade.
pub async fn get_trade(state: &Arc<DaemonState>, params: &Value) -> Result {
    let trade_id = params
        .get("trade_id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| RpcError::invalid_params("trade_id required"))?;

    let db = state.db.lock().await;
    let lines = cascade_engine::trade_lines(&db, trade_id).map_err(RpcError::from_engine)?;

    Ok(serde_json::json!({
        "trade_id": trade_id,
        "distributions": lines,
    }))
}
