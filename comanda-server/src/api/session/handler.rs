//! Session API Handlers
//!
//! Login checks a fixed staff roster and persists the resulting identity in
//! the store, so a restart lands the user back on the view for their role.
//! This mirrors the system it models: there is no credential server, and
//! the token is an opaque random value with no cryptographic meaning.

use axum::{Json, extract::State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use shared::models::{Role, Session};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// The fixed staff roster: (email, password, role, display name)
const STAFF: &[(&str, &str, Role, &str)] = &[
    (
        "admin@spaikrestaurant.com",
        "admin123",
        Role::Admin,
        "Carlos Administrador",
    ),
    (
        "gerente@spaikrestaurant.com",
        "gerente123",
        Role::Manager,
        "María Gerente",
    ),
    (
        "cajero@spaikrestaurant.com",
        "cajero123",
        Role::Cashier,
        "Juan Cajero",
    ),
    (
        "anfitrion@spaikrestaurant.com",
        "anfitrion123",
        Role::Host,
        "Ana Anfitriona",
    ),
    (
        "cocina@spaikrestaurant.com",
        "cocina123",
        Role::Kitchen,
        "Pedro Cocinero",
    ),
];

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must have at least 6 characters"))]
    pub password: String,
}

/// POST /api/session/login - authenticate against the staff roster
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<Session>> {
    payload.validate()?;

    let (email, _, role, name) = STAFF
        .iter()
        .find(|(email, password, _, _)| *email == payload.email && *password == payload.password)
        .ok_or(AppError::Unauthorized)?;

    let session = Session {
        name: (*name).to_string(),
        role: *role,
        email: (*email).to_string(),
        token: Uuid::new_v4().to_string(),
    };
    state.store.save_session(&session)?;

    tracing::info!(email = %session.email, role = ?session.role, "User logged in");
    Ok(Json(session))
}

/// GET /api/session - the persisted identity, if any
pub async fn current(State(state): State<ServerState>) -> AppResult<Json<Session>> {
    let session = state.store.load_session()?.ok_or(AppError::Unauthorized)?;
    Ok(Json(session))
}

/// DELETE /api/session - log out
pub async fn logout(State(state): State<ServerState>) -> AppResult<Json<bool>> {
    state.store.clear_session()?;
    Ok(Json(true))
}
