//! Server configuration
//!
//! All settings can be overridden via environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/comanda | Working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | KITCHEN_POLL_SECS | 5 | Kitchen board poll interval |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | SHUTDOWN_TIMEOUT_MS | 10000 | Graceful shutdown timeout |
//!
//! ```ignore
//! WORK_DIR=/data/comanda HTTP_PORT=8080 cargo run
//! ```

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the redb database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Kitchen board poll interval in seconds
    pub kitchen_poll_secs: u64,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Graceful shutdown timeout (milliseconds)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/comanda".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            kitchen_poll_secs: std::env::var("KITCHEN_POLL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
        }
    }

    /// Override work dir and port, commonly for tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Path of the embedded database file
    pub fn db_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("comanda.redb")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
