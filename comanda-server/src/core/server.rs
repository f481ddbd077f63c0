//! Server Implementation
//!
//! HTTP server startup and lifecycle: wires the state, starts the kitchen
//! board poller, serves the API and shuts everything down on ctrl-c.

use std::time::Duration;

use crate::api;
use crate::core::{BackgroundTasks, Config, ServerState, TaskKind};
use crate::kitchen::run_board_poller;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for sharing with tests)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let state = match self.state {
            Some(s) => s,
            None => ServerState::initialize(&self.config)?,
        };

        // Background tasks: the kitchen board poller is the only recurring
        // activity; it runs until shutdown
        let mut tasks = BackgroundTasks::new();
        let poll_interval = Duration::from_secs(self.config.kitchen_poll_secs);
        tasks.spawn(
            "kitchen_board_poller",
            TaskKind::Periodic,
            run_board_poller(state.board.clone(), poll_interval, tasks.shutdown_token()),
        );

        let app = api::router(state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!(
            %addr,
            poll_secs = self.config.kitchen_poll_secs,
            environment = %self.config.environment,
            "Comanda server starting"
        );

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        // Bound the background-task drain so a stuck task cannot hang exit
        let timeout = Duration::from_millis(self.config.shutdown_timeout_ms);
        if tokio::time::timeout(timeout, tasks.shutdown()).await.is_err() {
            tracing::warn!("Background tasks did not stop within the shutdown timeout");
        }

        Ok(())
    }
}
