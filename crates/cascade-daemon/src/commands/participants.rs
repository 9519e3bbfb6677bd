//! Participant and hierarchy command handlers.

use std::sync::Arc;

use cascade_db::queries::{hierarchy, participants};
use cascade_db::DbError;
use cascade_types::ParticipantRole;
use serde_json::Value;

use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Create a participant.
pub async fn create_participant(state: &Arc<DaemonState>, params: &Value) -> Result {
    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RpcError::invalid_params("name required and must not be blank"))?;
    let role: ParticipantRole = params
        .get("role")
        .and_then(|v| v.as_str())
        .ok_or_else(|| RpcError::invalid_params("role required"))?
        .parse()
        .map_err(|_| RpcError::invalid_params("role must be OWNER, OPERATOR, AGENT or CUSTOMER"))?;

    let db = state.db.lock().await;
    let id = participants::insert(&db, name, role, crate::now_secs())
        .map_err(|e| RpcError::internal_error(&format!("db error: {e}")))?;

    tracing::info!(participant_id = id, name, role = role.as_str(), "participant created");

    Ok(serde_json::json!({
        "participant_id": id,
        "name": name,
        "role": role.as_str(),
    }))
}

/// Update a participant's name and/or role.
pub async fn update_participant(state: &Arc<DaemonState>, params: &Value) -> Result {
    let id = params
        .get("participant_id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| RpcError::invalid_params("participant_id required"))?;

    let db = state.db.lock().await;
    let existing = participants::find(&db, id)
        .map_err(|e| RpcError::internal_error(&format!("db error: {e}")))?
        .ok_or_else(|| RpcError::participant_not_found(id))?;

    let name = match params.get("name") {
        Some(v) => v
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RpcError::invalid_params("name must not be blank"))?
            .to_string(),
        None => existing.name,
    };
    let role: ParticipantRole = match params.get("role") {
        Some(v) => v
            .as_str()
            .ok_or_else(|| RpcError::invalid_params("role must be a string"))?
            .parse()
            .map_err(|_| {
                RpcError::invalid_params("role must be OWNER, OPERATOR, AGENT or CUSTOMER")
            })?,
        None => existing.role,
    };

    participants::update(&db, id, &name, role)
        .map_err(|e| RpcError::internal_error(&format!("db error: {e}")))?;

    Ok(serde_json::json!({
        "participant_id": id,
        "name": name,
        "role": role.as_str(),
    }))
}

/// List all participants.
pub async fn list_participants(state: &Arc<DaemonState>) -> Result {
    let db = state.db.lock().await;
    let all = participants::list(&db)
        .map_err(|e| RpcError::internal_error(&format!("db error: {e}")))?;

    let result: Vec<Value> = all
        .iter()
        .map(|p| {
            serde_json::json!({
                "participant_id": p.id,
                "name": p.name,
                "role": p.role.as_str(),
                "created_at": p.created_at,
            })
        })
        .collect();

    Ok(serde_json::json!(result))
}

/// Link a subordinate under a superior.
pub async fn link_participants(state: &Arc<DaemonState>, params: &Value) -> Result {
    let superior_id = params
        .get("superior_id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| RpcError::invalid_params("superior_id required"))?;
    let subordinate_id = params
        .get("subordinate_id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| RpcError::invalid_params("subordinate_id required"))?;

    if superior_id == subordinate_id {
        return Err(RpcError::invalid_params("cannot link a participant to itself"));
    }

    let db = state.db.lock().await;
    for id in [superior_id, subordinate_id] {
        participants::find(&db, id)
            .map_err(|e| RpcError::internal_error(&format!("db error: {e}")))?
            .ok_or_else(|| RpcError::participant_not_found(id))?;
    }

    let link_id = match hierarchy::insert(&db, superior_id, subordinate_id, crate::now_secs()) {
        Ok(id) => id,
        Err(DbError::Constraint(detail)) => return Err(RpcError::invalid_params(&detail)),
        Err(e) => return Err(RpcError::internal_error(&format!("db error: {e}"))),
    };

    tracing::info!(superior_id, subordinate_id, "hierarchy link created");

    Ok(serde_json::json!({
        "link_id": link_id,
        "superior_id": superior_id,
        "subordinate_id": subordinate_id,
    }))
}

/// List all hierarchy links.
pub async fn list_links(state: &Arc<DaemonState>) -> Result {
    let db = state.db.lock().await;
    let links = hierarchy::list(&db)
        .map_err(|e| RpcError::internal_error(&format!("db error: {e}")))?;

    let result: Vec<Value> = links
        .iter()
        .map(|l| {
            serde_json::json!({
                "link_id": l.id,
                "superior_id": l.superior_id,
                "subordinate_id": l.subordinate_id,
                "created_at": l.created_at,
            })
        })
        .collect();

    Ok(serde_json::json!(result))
}
