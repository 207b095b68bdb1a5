use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};

use tally_core::{PaginatedEnvelope, Product, ProductDraft, Resource};

use crate::db::product::{insert_product, list_products, soft_delete_product, update_product};
use crate::errors::{RestError, RestResult};
use crate::router::{parse_list_query, validate_draft};
use crate::state::AppState;

async fn list(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<Json<PaginatedEnvelope<Product>>> {
    let (page, per_page, filters) = parse_list_query(&query);
    let conn = state.conn()?;
    let (products, total) = list_products(&conn, &filters, page, per_page)?;
    Ok(Json(PaginatedEnvelope::build(
        products, page, per_page, total, "/products",
    )))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> RestResult<(StatusCode, Json<Product>)> {
    validate_draft(&draft)?;
    let conn = state.conn()?;
    let product = insert_product(&conn, &draft)?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<ProductDraft>,
) -> RestResult<Json<Product>> {
    validate_draft(&draft)?;
    let conn = state.conn()?;
    match update_product(&conn, &id, &draft)? {
        Some(product) => Ok(Json(product)),
        None => Err(RestError::NotFound(Product::NAME)),
    }
}

// Deleting an already-deleted or unknown row is still a 204.
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> RestResult<StatusCode> {
    let conn = state.conn()?;
    soft_delete_product(&conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/:id", put(update).delete(delete))
}
