/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local appliance; override via
/// environment variables in production.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session lifetime in hours (default: `168` = 7 days).
    pub session_ttl_hours: i64,
    /// Telemetry queue capacity in events (default: `4096`).
    pub telemetry_queue_capacity: usize,
    /// Event retention window in days; `0` disables the retention sweep
    /// (default: `0`).
    pub retention_days: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `8080`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `SESSION_TTL_HOURS`        | `168`                   |
    /// | `TELEMETRY_QUEUE_CAPACITY` | `4096`                  |
    /// | `RETENTION_DAYS`           | `0` (disabled)          |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "168".into())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid i64");

        let telemetry_queue_capacity: usize = std::env::var("TELEMETRY_QUEUE_CAPACITY")
            .unwrap_or_else(|_| "4096".into())
            .parse()
            .expect("TELEMETRY_QUEUE_CAPACITY must be a valid usize");

        let retention_days: u32 = std::env::var("RETENTION_DAYS")
            .unwrap_or_else(|_| "0".into())
            .parse()
            .expect("RETENTION_DAYS must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_ttl_hours,
            telemetry_queue_capacity,
            retention_days,
        }
    }
}
