use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};

use tally_core::{PaginatedEnvelope, Resource, Supplier, SupplierDraft};

use crate::db::supplier::{insert_supplier, list_suppliers, soft_delete_supplier, update_supplier};
use crate::errors::{RestError, RestResult};
use crate::router::{parse_list_query, validate_draft};
use crate::state::AppState;

async fn list(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<Json<PaginatedEnvelope<Supplier>>> {
    let (page, per_page, filters) = parse_list_query(&query);
    let conn = state.conn()?;
    let (suppliers, total) = list_suppliers(&conn, &filters, page, per_page)?;
    Ok(Json(PaginatedEnvelope::build(
        suppliers, page, per_page, total, "/suppliers",
    )))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<SupplierDraft>,
) -> RestResult<(StatusCode, Json<Supplier>)> {
    validate_draft(&draft)?;
    let conn = state.conn()?;
    let supplier = insert_supplier(&conn, &draft)?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<SupplierDraft>,
) -> RestResult<Json<Supplier>> {
    validate_draft(&draft)?;
    let conn = state.conn()?;
    match update_supplier(&conn, &id, &draft)? {
        Some(supplier) => Ok(Json(supplier)),
        None => Err(RestError::NotFound(Supplier::NAME)),
    }
}

async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> RestResult<StatusCode> {
    let conn = state.conn()?;
    soft_delete_supplier(&conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", get(list).post(create))
        .route("/suppliers/:id", put(update).delete(delete))
}
