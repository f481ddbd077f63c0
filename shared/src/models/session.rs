//! Session Model
//!
//! Identity persisted at login so a restart lands the user back on the view
//! for their role. Only the persisted contract lives here; credential
//! checking is the server's concern.

use serde::{Deserialize, Serialize};

/// Staff role, used for routing after login
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Cashier,
    Host,
    Waiter,
    Kitchen,
}

/// Persisted session identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub name: String,
    pub role: Role,
    pub email: String,
    pub token: String,
}
