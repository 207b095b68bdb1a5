use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};

use tally_core::{PaginatedEnvelope, Purchase, PurchaseDraft, Resource, Wrapped};

use crate::db::purchase::{insert_purchase, list_purchases, soft_delete_purchase, update_purchase};
use crate::errors::{RestError, RestResult};
use crate::router::{parse_list_query, validate_draft};
use crate::state::AppState;

// The purchases endpoints keep the older wrapped response shape.
fn wrap<T>(data: T) -> Json<Wrapped<T>> {
    Json(Wrapped {
        status: "ok".to_string(),
        message: None,
        data,
    })
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<Json<Wrapped<PaginatedEnvelope<Purchase>>>> {
    let (page, per_page, filters) = parse_list_query(&query);
    let conn = state.conn()?;
    let (purchases, total) = list_purchases(&conn, &filters, page, per_page)?;
    Ok(wrap(PaginatedEnvelope::build(
        purchases,
        page,
        per_page,
        total,
        "/purchases",
    )))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<PurchaseDraft>,
) -> RestResult<(StatusCode, Json<Wrapped<Purchase>>)> {
    validate_draft(&draft)?;
    let conn = state.conn()?;
    let purchase = insert_purchase(&conn, &draft)?;
    Ok((StatusCode::CREATED, wrap(purchase)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<PurchaseDraft>,
) -> RestResult<Json<Wrapped<Purchase>>> {
    validate_draft(&draft)?;
    let conn = state.conn()?;
    match update_purchase(&conn, &id, &draft)? {
        Some(purchase) => Ok(wrap(purchase)),
        None => Err(RestError::NotFound(Purchase::NAME)),
    }
}

async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> RestResult<StatusCode> {
    let conn = state.conn()?;
    soft_delete_purchase(&conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn purchase_routes() -> Router<AppState> {
    Router::new()
        .route("/purchases", get(list).post(create))
        .route("/purchases/:id", put(update).delete(delete))
}
