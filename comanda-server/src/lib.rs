//! Comanda Server - restaurant order lifecycle service
//!
//! # Architecture overview
//!
//! The service connects the two sides of a comanda's life:
//!
//! - **POS producer** (`pos`): waiters build drafts on order pads and send
//!   them to the kitchen; cashiers hold/recall drafts and take payment.
//! - **Shared store** (`store`): an embedded redb database is the single
//!   channel between the roles. No pub/sub - readers poll, and whole-list
//!   writes are last-writer-wins.
//! - **Kitchen consumer** (`kitchen`): the board polls the store on a fixed
//!   interval, derives prep estimates and priority, and advances ticket
//!   status through a checked transition table.
//!
//! # Module layout
//!
//! ```text
//! comanda-server/src/
//! ├── core/       # config, state, server, background tasks
//! ├── store/      # redb ticket store
//! ├── pos/        # producer: pads, floor plan, catalog, payments
//! ├── kitchen/    # consumer: board, derivations, poller
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # errors, logging
//! ```

pub mod api;
pub mod core;
pub mod kitchen;
pub mod pos;
pub mod store;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::kitchen::{KitchenBoard, estimate_prep_minutes};
pub use crate::pos::{Catalog, FloorPlan, OrderPad, PadService, PosError};
pub use crate::store::{StoreError, TicketStore};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// Load .env, create the work dir and initialize logging
pub fn setup_environment() -> std::io::Result<()> {
    let _ = dotenv::dotenv();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/comanda".into());
    std::fs::create_dir_all(&work_dir)?;

    let log_dir = std::path::Path::new(&work_dir).join("logs");
    std::fs::create_dir_all(&log_dir)?;
    init_logger_with_file(
        std::env::var("LOG_LEVEL").ok().as_deref(),
        log_dir.to_str(),
    );

    Ok(())
}
