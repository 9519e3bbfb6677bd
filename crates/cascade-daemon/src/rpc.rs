//! JSON-RPC server over Unix socket.
//!
//! Listens on a Unix domain socket, accepts connections, and dispatches
//! line-delimited JSON-RPC method calls to the appropriate command handlers.

use std::path::PathBuf;
use std::sync::Arc;

use cascade_engine::EngineError;
use cascade_types::{ParticipantId, TradeId};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;
use tracing::{debug, error, info, warn};

use crate::commands;
use crate::DaemonState;

/// JSON-RPC request.
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    /// JSON-RPC version (must be "2.0").
    pub jsonrpc: String,
    /// Request ID.
    pub id: serde_json::Value,
    /// Method name.
    pub method: String,
    /// Parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

/// JSON-RPC response.
#[derive(Debug, Serialize)]
pub struct RpcResponse {
    /// JSON-RPC version.
    pub jsonrpc: String,
    /// Request ID.
    pub id: serde_json::Value,
    /// Result or error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RpcError {
    /// Error code.
    pub code: i32,
    /// Error name.
    pub message: String,
    /// Optional structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcResponse {
    /// Create a success response.
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: serde_json::Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

impl RpcError {
    // Standard JSON-RPC errors

    /// Parse error (-32700).
    pub fn parse_error() -> Self {
        Self {
            code: -32700,
            message: "PARSE_ERROR".to_string(),
            data: None,
        }
    }

    /// Invalid request (-32600).
    pub fn invalid_request() -> Self {
        Self {
            code: -32600,
            message: "INVALID_REQUEST".to_string(),
            data: None,
        }
    }

    /// Method not found (-32601).
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "METHOD_NOT_FOUND".to_string(),
            data: Some(serde_json::json!({"method": method})),
        }
    }

    /// Invalid params (-32602).
    pub fn invalid_params(detail: &str) -> Self {
        Self {
            code: -32602,
            message: "INVALID_PARAMS".to_string(),
            data: Some(serde_json::json!({"detail": detail})),
        }
    }

    /// Internal error (-32603).
    pub fn internal_error(detail: &str) -> Self {
        Self {
            code: -32603,
            message: "INTERNAL_ERROR".to_string(),
            data: Some(serde_json::json!({"detail": detail})),
        }
    }

    // Domain errors

    /// Participant not found (-32001).
    pub fn participant_not_found(id: ParticipantId) -> Self {
        Self {
            code: -32001,
            message: "PARTICIPANT_NOT_FOUND".to_string(),
            data: Some(serde_json::json!({"participant_id": id})),
        }
    }

    /// No hierarchy configured above the customer (-32002).
    pub fn no_hierarchy_configured(id: ParticipantId) -> Self {
        Self {
            code: -32002,
            message: "NO_HIERARCHY_CONFIGURED".to_string(),
            data: Some(serde_json::json!({"participant_id": id})),
        }
    }

    /// Hierarchy is not a forest of trees (-32003). Covers cycles.
    pub fn inconsistent_hierarchy(detail: &str) -> Self {
        Self {
            code: -32003,
            message: "INCONSISTENT_HIERARCHY".to_string(),
            data: Some(serde_json::json!({"detail": detail})),
        }
    }

    /// No share rule for an edge on the chain (-32004).
    pub fn share_config_missing(superior_id: ParticipantId, subordinate_id: ParticipantId) -> Self {
        Self {
            code: -32004,
            message: "SHARE_CONFIG_MISSING".to_string(),
            data: Some(serde_json::json!({
                "superior_id": superior_id,
                "subordinate_id": subordinate_id,
            })),
        }
    }

    /// A stored share rule that cannot be applied (-32004, same code as a
    /// missing rule).
    pub fn share_config_invalid(
        superior_id: ParticipantId,
        subordinate_id: ParticipantId,
        detail: &str,
    ) -> Self {
        Self {
            code: -32004,
            message: "SHARE_CONFIG_INVALID".to_string(),
            data: Some(serde_json::json!({
                "superior_id": superior_id,
                "subordinate_id": subordinate_id,
                "detail": detail,
            })),
        }
    }

    /// Trade amount rejected (-32005).
    pub fn invalid_amount(detail: &str) -> Self {
        Self {
            code: -32005,
            message: "INVALID_AMOUNT".to_string(),
            data: Some(serde_json::json!({"detail": detail})),
        }
    }

    /// Trade not found (-32006).
    pub fn trade_not_found(id: TradeId) -> Self {
        Self {
            code: -32006,
            message: "TRADE_NOT_FOUND".to_string(),
            data: Some(serde_json::json!({"trade_id": id})),
        }
    }

    /// Map an engine failure onto the wire error taxonomy.
    pub fn from_engine(err: EngineError) -> Self {
        match err {
            EngineError::ParticipantNotFound(id) => Self::participant_not_found(id),
            EngineError::NoHierarchyConfigured(id) => Self::no_hierarchy_configured(id),
            EngineError::InconsistentHierarchy(id) => {
                Self::inconsistent_hierarchy(&format!("participant {id} has multiple superiors"))
            }
            EngineError::HierarchyCycle(id) => {
                Self::inconsistent_hierarchy(&format!("hierarchy cycle at participant {id}"))
            }
            EngineError::ShareConfigMissing {
                superior_id,
                subordinate_id,
            } => Self::share_config_missing(superior_id, subordinate_id),
            EngineError::ShareOutOfRange {
                superior_id,
                subordinate_id,
                pct,
            } => Self::share_config_invalid(
                superior_id,
                subordinate_id,
                &format!("stored rule out of range: {pct}"),
            ),
            EngineError::InvalidAmount(_) | EngineError::AmountOutOfRange(_) => {
                Self::invalid_amount(&err.to_string())
            }
            EngineError::TradeNotFound(id) => Self::trade_not_found(id),
            EngineError::Db(_) => Self::internal_error(&err.to_string()),
        }
    }
}

/// The RPC server.
pub struct RpcServer {
    state: Arc<DaemonState>,
    socket_path: PathBuf,
}

impl RpcServer {
    /// Create a new RPC server.
    pub fn new(state: Arc<DaemonState>, socket_path: PathBuf) -> Self {
        Self { state, socket_path }
    }

    /// Run the server, accepting connections.
    pub async fn run(&self) -> anyhow::Result<()> {
        // Remove stale socket file
        let _ = std::fs::remove_file(&self.socket_path);

        let listener = UnixListener::bind(&self.socket_path)?;
        info!("IPC server listening on {:?}", self.socket_path);

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let state = self.state.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(state, stream).await {
                            warn!("Connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    error!("Accept error: {}", e);
                }
            }
        }
    }
}

/// Handle a single client connection.
async fn handle_connection(
    state: Arc<DaemonState>,
    stream: tokio::net::UnixStream,
) -> anyhow::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break; // EOF
        }

        let response = match serde_json::from_str::<RpcRequest>(&line) {
            Ok(request) => dispatch_request(state.clone(), request).await,
            Err(_) => RpcResponse::error(serde_json::Value::Null, RpcError::parse_error()),
        };

        let mut response_json = serde_json::to_string(&response)?;
        response_json.push('\n');
        writer.write_all(response_json.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

/// Dispatch a JSON-RPC request to the appropriate command handler.
async fn dispatch_request(state: Arc<DaemonState>, request: RpcRequest) -> RpcResponse {
    let id = request.id.clone();
    let method = request.method.as_str();

    if request.jsonrpc != "2.0" {
        return RpcResponse::error(id, RpcError::invalid_request());
    }

    debug!("Dispatching RPC method: {}", method);

    let result = match method {
        // Participant & hierarchy commands
        "create_participant" => {
            commands::participants::create_participant(&state, &request.params).await
        }
        "update_participant" => {
            commands::participants::update_participant(&state, &request.params).await
        }
        "list_participants" => commands::participants::list_participants(&state).await,
        "link_participants" => {
            commands::participants::link_participants(&state, &request.params).await
        }
        "list_links" => commands::participants::list_links(&state).await,

        // Share rule commands
        "set_share_config" => commands::shares::set_share_config(&state, &request.params).await,
        "list_share_configs" => commands::shares::list_share_configs(&state).await,
        "lookup_share_config" => {
            commands::shares::lookup_share_config(&state, &request.params).await
        }

        // Trade commands
        "execute_trade" => commands::trades::execute_trade(&state, &request.params).await,
        "get_trade" => commands::trades::get_trade(&state, &request.params).await,

        // Report commands
        "daily_report" => commands::reports::daily_report(&state, &request.params).await,

        _ => Err(RpcError::method_not_found(method)),
    };

    match result {
        Ok(value) => RpcResponse::success(id, value),
        Err(err) => RpcResponse::error(id, err),
    }
}
