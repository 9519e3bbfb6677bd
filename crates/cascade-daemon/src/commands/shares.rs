//! Share rule command handlers.

use std::sync::Arc;

use cascade_db::queries::{participants, shares};
use cascade_types::money::{from_minor, round_money, to_minor, valid_percent};
use serde_json::Value;

use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Append a new share rule version for a directed edge.
pub async fn set_share_config(state: &Arc<DaemonState>, params: &Value) -> Result {
    let superior_id = params
        .get("superior_id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| RpcError::invalid_params("superior_id required"))?;
    let subordinate_id = params
        .get("subordinate_id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| RpcError::invalid_params("subordinate_id required"))?;

    if superior_id == subordinate_id {
        return Err(RpcError::invalid_params(
            "cannot set a share rule from a participant to itself",
        ));
    }

    let pct = round_money(super::decimal_param(params, "pass_percentage")?);
    let pct_minor = if valid_percent(pct) {
        to_minor(pct)
    } else {
        None
    }
    .ok_or_else(|| RpcError::invalid_params("pass_percentage must be between 0 and 100"))?;

    let db = state.db.lock().await;
    for id in [superior_id, subordinate_id] {
        participants::find(&db, id)
            .map_err(|e| RpcError::internal_error(&format!("db error: {e}")))?
            .ok_or_else(|| RpcError::participant_not_found(id))?;
    }

    let updated_at = crate::now_secs();
    let config_id = shares::append(&db, superior_id, subordinate_id, pct_minor, updated_at)
        .map_err(|e| RpcError::internal_error(&format!("db error: {e}")))?;

    tracing::info!(superior_id, subordinate_id, %pct, "share rule updated");

    Ok(serde_json::json!({
        "config_id": config_id,
        "superior_id": superior_id,
        "subordinate_id": subordinate_id,
        "pass_percentage": pct,
        "updated_at": updated_at,
    }))
}

/// List every share rule version, history included.
pub async fn list_share_configs(state: &Arc<DaemonState>) -> Result {
    let db = state.db.lock().await;
    let rules = shares::list(&db)
        .map_err(|e| RpcError::internal_error(&format!("db error: {e}")))?;

    let result: Vec<Value> = rules
        .iter()
        .map(|r| {
            serde_json::json!({
                "config_id": r.id,
                "superior_id": r.superior_id,
                "subordinate_id": r.subordinate_id,
                "pass_percentage": from_minor(r.pass_pct_minor),
                "updated_at": r.updated_at,
            })
        })
        .collect();

    Ok(serde_json::json!(result))
}

/// The effective rule for one directed edge, latest version only.
pub async fn lookup_share_config(state: &Arc<DaemonState>, params: &Value) -> Result {
    let superior_id = params
        .get("superior_id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| RpcError::invalid_params("superior_id required"))?;
    let subordinate_id = params
        .get("subordinate_id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| RpcError::invalid_params("subordinate_id required"))?;

    let db = state.db.lock().await;
    for id in [superior_id, subordinate_id] {
        participants::find(&db, id)
            .map_err(|e| RpcError::internal_error(&format!("db error: {e}")))?
            .ok_or_else(|| RpcError::participant_not_found(id))?;
    }

    let rule = shares::effective(&db, superior_id, subordinate_id)
        .map_err(|e| RpcError::internal_error(&format!("db error: {e}")))?
        .ok_or_else(|| RpcError::share_config_missing(superior_id, subordinate_id))?;

    Ok(serde_json::json!({
        "config_id": rule.id,
        "superior_id": rule.superior_id,
        "subordinate_id": rule.subordinate_id,
        "pass_percentage": from_minor(rule.pass_pct_minor),
        "updated_at": rule.updated_at,
    }))
}
