//! Shared types for the Comanda restaurant system
//!
//! Domain models used by both the point-of-sale (producer) and the kitchen
//! board (consumer) roles, plus small time utilities. The server crate owns
//! persistence and workflows; everything here is plain data.

pub mod models;
pub mod util;

// Re-exports
pub use models::{
    CompletedOrder, DiningTable, HeldOrder, PaymentMethod, PaymentRecord, Priority, Product,
    ProductCategory, Role, Session, TableSnapshot, TableStatus, Ticket, TicketLine, TicketStatus,
    TransitionError,
};
pub use serde::{Deserialize, Serialize};
