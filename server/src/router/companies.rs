use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Form, Json, Router};
use serde::Deserialize;

use tally_core::{Company, CompanyDraft, PaginatedEnvelope, Resource};

use crate::db::company::{insert_company, list_companies, soft_delete_company, update_company};
use crate::errors::{RestError, RestResult};
use crate::router::{parse_list_query, validate_draft};
use crate::state::AppState;

/// Company writes arrive urlencoded, so every field comes in as a string
/// and booleans come in as "1"/"0".
#[derive(Debug, Deserialize)]
pub struct CompanyForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub legal_name: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub is_active: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl CompanyForm {
    fn into_draft(self) -> CompanyDraft {
        let is_active = self
            .is_active
            .as_deref()
            .map(|v| v == "1" || v == "true")
            .unwrap_or(true);
        CompanyDraft {
            name: self.name.unwrap_or_default(),
            legal_name: non_blank(self.legal_name),
            tax_id: self.tax_id.unwrap_or_default(),
            email: non_blank(self.email),
            website: non_blank(self.website),
            is_active,
        }
    }
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<Json<PaginatedEnvelope<Company>>> {
    let (page, per_page, filters) = parse_list_query(&query);
    let conn = state.conn()?;
    let (companies, total) = list_companies(&conn, &filters, page, per_page)?;
    Ok(Json(PaginatedEnvelope::build(
        companies, page, per_page, total, "/companies",
    )))
}

async fn create(
    State(state): State<AppState>,
    Form(form): Form<CompanyForm>,
) -> RestResult<(StatusCode, Json<Company>)> {
    let draft = form.into_draft();
    validate_draft(&draft)?;
    let conn = state.conn()?;
    let company = insert_company(&conn, &draft)?;
    Ok((StatusCode::CREATED, Json(company)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CompanyForm>,
) -> RestResult<Json<Company>> {
    let draft = form.into_draft();
    validate_draft(&draft)?;
    let conn = state.conn()?;
    match update_company(&conn, &id, &draft)? {
        Some(company) => Ok(Json(company)),
        None => Err(RestError::NotFound(Company::NAME)),
    }
}

async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> RestResult<StatusCode> {
    let conn = state.conn()?;
    soft_delete_company(&conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list).post(create))
        .route("/companies/:id", put(update).delete(delete))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn form_booleans_and_blanks() {
        let form = CompanyForm {
            name: Some("Acme".to_string()),
            legal_name: Some("   ".to_string()),
            tax_id: Some("ES-B1234".to_string()),
            email: None,
            website: Some("https://acme.example".to_string()),
            is_active: Some("0".to_string()),
        };

        let draft = form.into_draft();

        assert_eq!(draft.name, "Acme");
        assert_eq!(draft.legal_name, None);
        assert_eq!(draft.website.as_deref(), Some("https://acme.example"));
        assert!(!draft.is_active);
    }

    #[test]
    fn missing_is_active_defaults_on() {
        let form = CompanyForm {
            name: Some("Acme".to_string()),
            legal_name: None,
            tax_id: Some("ES-B1234".to_string()),
            email: None,
            website: None,
            is_active: None,
        };

        assert!(form.into_draft().is_active);
    }
}
