//! Kitchen board (consumer) side of the order lifecycle
//!
//! The board polls the store on a fixed interval, derives prep estimates,
//! elapsed time and priority for every ticket, and advances ticket status on
//! staff action. It never learns about a new comanda before its next tick:
//! propagation is poll-based by design, with staleness bounded by the poll
//! interval.

mod board;
mod poller;

pub use board::{
    BoardEntry, BoardNotification, BoardStats, KitchenBoard, MIN_PREP_MINUTES,
    NEW_TICKET_WINDOW_MILLIS, estimate_prep_minutes,
};
pub use poller::run_board_poller;
