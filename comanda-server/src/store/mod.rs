//! Persistence layer
//!
//! A single embedded redb database is the only channel between the POS
//! (producer) and the kitchen board (consumer). There is no pub/sub: readers
//! poll, and whole-list writes are last-writer-wins.

mod ticket_store;

pub use ticket_store::{StoreError, StoreResult, StoreStats, TicketStore};
