use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};

use tally_core::{Establishment, EstablishmentDraft, PaginatedEnvelope, Resource};

use crate::db::establishment::{
    insert_establishment, list_establishments, soft_delete_establishment, update_establishment,
};
use crate::errors::{RestError, RestResult};
use crate::router::{parse_list_query, validate_draft};
use crate::state::AppState;

async fn list(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<Json<PaginatedEnvelope<Establishment>>> {
    let (page, per_page, filters) = parse_list_query(&query);
    let conn = state.conn()?;
    let (establishments, total) = list_establishments(&conn, &filters, page, per_page)?;
    Ok(Json(PaginatedEnvelope::build(
        establishments,
        page,
        per_page,
        total,
        "/establishments",
    )))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<EstablishmentDraft>,
) -> RestResult<(StatusCode, Json<Establishment>)> {
    validate_draft(&draft)?;
    let conn = state.conn()?;
    let establishment = insert_establishment(&conn, &draft)?;
    Ok((StatusCode::CREATED, Json(establishment)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<EstablishmentDraft>,
) -> RestResult<Json<Establishment>> {
    validate_draft(&draft)?;
    let conn = state.conn()?;
    match update_establishment(&conn, &id, &draft)? {
        Some(establishment) => Ok(Json(establishment)),
        None => Err(RestError::NotFound(Establishment::NAME)),
    }
}

async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> RestResult<StatusCode> {
    let conn = state.conn()?;
    soft_delete_establishment(&conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn establishment_routes() -> Router<AppState> {
    Router::new()
        .route("/establishments", get(list).post(create))
        .route("/establishments/:id", put(update).delete(delete))
}
