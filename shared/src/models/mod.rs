//! Data models
//!
//! Shared between the comanda server and its POS / kitchen clients.
//! Timestamps are Unix millis (`i64`), money is in currency units (`f64`).

pub mod dining_table;
pub mod held_order;
pub mod payment;
pub mod product;
pub mod session;
pub mod ticket;

// Re-exports
pub use dining_table::*;
pub use held_order::*;
pub use payment::*;
pub use product::*;
pub use session::*;
pub use ticket::*;
