//! Point-of-sale (producer) side of the order lifecycle
//!
//! A waiter builds a draft on an [`OrderPad`], picks a table from the
//! [`FloorPlan`], and sends the comanda to the kitchen through the
//! [`PadService`], which is the only component that touches the store on the
//! producer's behalf. The cashier workflow (hold/recall, payment) lives here
//! too.

mod catalog;
mod floor;
mod pad;
mod service;

pub use catalog::Catalog;
pub use floor::FloorPlan;
pub use pad::{OrderPad, PadStatus, PaymentInput, PosError, PosResult};
pub use service::{PadService, PadView};
