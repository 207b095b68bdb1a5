use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};

use tally_core::{Account, AccountDraft, PaginatedEnvelope, Resource};

use crate::db::account::{insert_account, list_accounts, soft_delete_account, update_account};
use crate::errors::{RestError, RestResult};
use crate::router::{parse_list_query, validate_draft};
use crate::state::AppState;

async fn list(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<Json<PaginatedEnvelope<Account>>> {
    let (page, per_page, filters) = parse_list_query(&query);
    let conn = state.conn()?;
    let (accounts, total) = list_accounts(&conn, &filters, page, per_page)?;
    Ok(Json(PaginatedEnvelope::build(
        accounts, page, per_page, total, "/accounts",
    )))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<AccountDraft>,
) -> RestResult<(StatusCode, Json<Account>)> {
    validate_draft(&draft)?;
    let conn = state.conn()?;
    let account = insert_account(&conn, &draft)?;
    Ok((StatusCode::CREATED, Json(account)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<AccountDraft>,
) -> RestResult<Json<Account>> {
    validate_draft(&draft)?;
    let conn = state.conn()?;
    match update_account(&conn, &id, &draft)? {
        Some(account) => Ok(Json(account)),
        None => Err(RestError::NotFound(Account::NAME)),
    }
}

async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> RestResult<StatusCode> {
    let conn = state.conn()?;
    soft_delete_account(&conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list).post(create))
        .route("/accounts/:id", put(update).delete(delete))
}
