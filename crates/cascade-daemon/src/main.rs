//! cascade-daemon: the Cascade distribution daemon.
//!
//! Single OS process running a Tokio async runtime. Clients talk to the
//! daemon via JSON-RPC over a Unix socket; every command works against the
//! shared SQLite database behind one async mutex.

mod commands;
mod config;
mod rpc;
mod seed;

use std::sync::Arc;

use chrono::FixedOffset;
use tracing::{error, info};

use crate::config::DaemonConfig;
use crate::rpc::RpcServer;

/// Daemon-wide shared state.
///
/// Everything else the config carries (data dir, log level, seeding) is
/// consumed in `main` before the state exists.
pub struct DaemonState {
    /// Database connection.
    pub db: Arc<tokio::sync::Mutex<rusqlite::Connection>>,
    /// Reporting timezone, parsed once at startup.
    pub report_offset: FixedOffset,
}

/// Current wall-clock time as Unix epoch seconds.
pub fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config (tracing level comes from it)
    let config = DaemonConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.advanced.log_level.parse()?),
        )
        .init();

    info!("Cascade daemon starting");

    let data_dir = config.data_dir();
    std::fs::create_dir_all(&data_dir)?;

    // 2. Open database and seed demo data if configured
    let db_path = data_dir.join("cascade.db");
    let mut conn = cascade_db::open(&db_path)?;
    seed::seed_if_empty(&mut conn, config.seed.demo_data)?;
    let db = Arc::new(tokio::sync::Mutex::new(conn));

    // 3. Parse the reporting offset once
    let report_offset = cascade_report::parse_offset(&config.report.timezone_offset)?;

    // 4. Build daemon state
    let state = Arc::new(DaemonState { db, report_offset });

    // 5. Start IPC server
    let socket_path = data_dir.join("daemon.sock");
    let rpc_server = RpcServer::new(state.clone(), socket_path.clone());

    info!("Starting JSON-RPC server on {:?}", socket_path);

    tokio::select! {
        result = rpc_server.run() => {
            if let Err(e) = result {
                error!("RPC server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down");
        }
    }

    // Clean up socket file
    let _ = std::fs::remove_file(&socket_path);

    info!("Daemon stopped");
    Ok(())
}
