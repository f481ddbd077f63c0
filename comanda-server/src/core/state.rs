//! Server state - shared singletons for every service
//!
//! `ServerState` holds `Arc`-shared handles to the store, the floor plan,
//! the catalog, the pad registry and the kitchen board. Cloning is shallow
//! and cheap, which is what axum's `State` extractor expects.

use std::sync::Arc;

use crate::core::Config;
use crate::kitchen::KitchenBoard;
use crate::pos::{Catalog, FloorPlan, PadService};
use crate::store::TicketStore;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: TicketStore,
    pub floor: Arc<FloorPlan>,
    pub catalog: Arc<Catalog>,
    pub pads: Arc<PadService>,
    pub board: Arc<KitchenBoard>,
}

impl ServerState {
    /// Open the database under the configured work dir and wire up every
    /// service
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let store = TicketStore::open(config.db_path())?;
        Ok(Self::with_store(config.clone(), store))
    }

    /// Build state around an existing store (used by tests)
    pub fn with_store(config: Config, store: TicketStore) -> Self {
        let floor = Arc::new(FloorPlan::seeded());
        let catalog = Arc::new(Catalog::seeded());
        let pads = Arc::new(PadService::new(
            store.clone(),
            floor.clone(),
            catalog.clone(),
        ));
        let board = Arc::new(KitchenBoard::new(store.clone()));

        Self {
            config,
            store,
            floor,
            catalog,
            pads,
            board,
        }
    }
}
