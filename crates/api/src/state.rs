use std::sync::Arc;

use warden_telemetry::Recorder;

use crate::blocklist::BlocklistService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: warden_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Telemetry recording handle (counters + event queue).
    pub recorder: Recorder,
    /// Blocklist service with the hot-path membership index.
    pub blocklist: Arc<BlocklistService>,
}
