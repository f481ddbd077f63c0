//! Product Catalog API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{Product, ProductCategory};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict to one category
    pub category: Option<ProductCategory>,
    /// Only products highlighted on the grid
    #[serde(default)]
    pub popular: bool,
}

/// GET /api/products - the menu, optionally filtered by category
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products: Vec<Product> = if query.popular {
        state.catalog.popular().into_iter().cloned().collect()
    } else if let Some(category) = query.category {
        state
            .catalog
            .by_category(category)
            .into_iter()
            .cloned()
            .collect()
    } else {
        state.catalog.products().to_vec()
    };
    Ok(Json(products))
}

/// GET /api/products/:id - one product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state
        .catalog
        .find(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product))
}
