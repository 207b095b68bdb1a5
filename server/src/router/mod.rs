use std::collections::HashMap;

use axum::Router;
use tower_http::trace::TraceLayer;

use tally_core::{Draft, FilterSet, FilterValue, ValidationErrorBody, DEFAULT_ROWS_PER_PAGE};

use crate::errors::RestError;
use crate::state::AppState;

pub mod accounts;
pub mod companies;
pub mod establishments;
pub mod health;
pub mod products;
pub mod purchases;
pub mod suppliers;

pub fn setup_router(app_state: AppState) -> Router {
    Router::new()
        .merge(health::health_routes())
        .merge(accounts::account_routes())
        .merge(companies::company_routes())
        .merge(establishments::establishment_routes())
        .merge(products::product_routes())
        .merge(purchases::purchase_routes())
        .merge(suppliers::supplier_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Pull pagination out of a raw query map; everything else becomes a filter.
/// Blank values are dropped, bools arrive as "1"/"0" or "true"/"false".
pub fn parse_list_query(query: &HashMap<String, String>) -> (u32, u32, FilterSet) {
    let page = query
        .get("page")
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1);
    let per_page = query
        .get("per_page")
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(DEFAULT_ROWS_PER_PAGE);

    let mut filters = FilterSet::new();
    for (key, value) in query {
        if key == "page" || key == "per_page" {
            continue;
        }
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match value {
            "true" => filters.set(key.clone(), FilterValue::Bool(true)),
            "false" => filters.set(key.clone(), FilterValue::Bool(false)),
            "1" | "0" if key == "is_active" => {
                filters.set(key.clone(), FilterValue::Bool(value == "1"));
            }
            _ => filters.set(key.clone(), FilterValue::Text(value.to_string())),
        }
    }

    (page, per_page, filters)
}

/// Run draft validation and map failures to the 422 body.
pub fn validate_draft<D: Draft>(draft: &D) -> Result<(), RestError> {
    let errors = draft.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(RestError::Unprocessable(ValidationErrorBody::new(
            "validation failed",
            errors,
        )))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn parse_list_query_splits_pagination_from_filters() {
        let mut query = HashMap::new();
        query.insert("page".to_string(), "3".to_string());
        query.insert("per_page".to_string(), "10".to_string());
        query.insert("search".to_string(), "widget".to_string());
        query.insert("is_active".to_string(), "1".to_string());
        query.insert("blank".to_string(), "   ".to_string());

        let (page, per_page, filters) = parse_list_query(&query);

        assert_eq!(page, 3);
        assert_eq!(per_page, 10);
        assert_eq!(
            filters.get("search"),
            Some(&FilterValue::Text("widget".to_string()))
        );
        assert_eq!(filters.get("is_active"), Some(&FilterValue::Bool(true)));
        assert!(filters.get("blank").is_none());
    }

    #[test]
    fn parse_list_query_defaults() {
        let (page, per_page, filters) = parse_list_query(&HashMap::new());

        assert_eq!(page, 1);
        assert_eq!(per_page, DEFAULT_ROWS_PER_PAGE);
        assert!(filters.is_empty());
    }

    #[test]
    fn parse_list_query_rejects_zero_page() {
        let mut query = HashMap::new();
        query.insert("page".to_string(), "0".to_string());

        let (page, _, _) = parse_list_query(&query);

        assert_eq!(page, 1);
    }
}
