use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use tally_core::{
    unwrap_payload, ApiError, CollectionService, ListParams, PaginatedEnvelope, Resource,
    ValidationErrorBody,
};

/// REST transport for one collection.
///
/// JSON in and out for every entity except the form-encoded ones, whose
/// writes travel urlencoded with booleans rendered as "1"/"0". Responses may
/// arrive bare or wrapped in `{status, message, data}`; both decode the same.
pub struct RestCollection<E: Resource> {
    client: reqwest::Client,
    base_url: String,
    _marker: PhantomData<E>,
}

impl<E: Resource> RestCollection<E> {
    pub fn new(base_url: &str) -> Self {
        RestCollection {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            _marker: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, E::ENDPOINT)
    }

    fn entity_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, E::ENDPOINT, id)
    }

    fn send_draft(&self, request: reqwest::RequestBuilder, draft: &E::Draft) -> Result<reqwest::RequestBuilder, ApiError> {
        if E::FORM_ENCODED {
            Ok(request.form(&form_pairs(draft)?))
        } else {
            Ok(request.json(draft))
        }
    }
}

fn transport(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

/// Decode a response body, mapping 422 to field errors and other failures
/// to a status error carrying the server's message when it sent one.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
        let parsed = serde_json::from_str::<ValidationErrorBody>(&body).unwrap_or_else(|_| {
            ValidationErrorBody::new("validation failed", Default::default())
        });
        return Err(ApiError::Validation(parsed));
    }
    if !status.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| status.to_string());
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    unwrap_payload::<T>(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Flatten a draft into urlencoded pairs. Booleans become "1"/"0" and
/// absent optionals are skipped entirely.
pub fn form_pairs<D: Serialize>(draft: &D) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(draft).map_err(|e| ApiError::Decode(e.to_string()))?;
    let map = match value {
        serde_json::Value::Object(map) => map,
        other => {
            return Err(ApiError::Decode(format!(
                "expected an object to form-encode, got {}",
                other
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            serde_json::Value::Null => {}
            serde_json::Value::Bool(b) => {
                pairs.push((key, if b { "1" } else { "0" }.to_string()));
            }
            serde_json::Value::String(s) => pairs.push((key, s)),
            other => pairs.push((key, other.to_string())),
        }
    }
    Ok(pairs)
}

#[async_trait]
impl<E: Resource> CollectionService<E> for RestCollection<E> {
    async fn list(&self, params: &ListParams) -> Result<PaginatedEnvelope<E>, ApiError> {
        let response = self
            .client
            .get(self.collection_url())
            .query(&params.to_query_pairs())
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    async fn create(&self, draft: &E::Draft) -> Result<E, ApiError> {
        let request = self.client.post(self.collection_url());
        let response = self
            .send_draft(request, draft)?
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    async fn update(&self, id: &str, draft: &E::Draft) -> Result<E, ApiError> {
        let request = self.client.put(self.entity_url(id));
        let response = self
            .send_draft(request, draft)?
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.entity_url(id))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.map_err(transport)?;
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| status.to_string());
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use std::collections::HashMap;

    use axum::extract::Form;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    use tally_core::{Company, CompanyDraft, FilterSet, Product, Purchase, PurchaseDraft};

    use super::*;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn product_row() -> serde_json::Value {
        json!({
            "id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
            "sku": "SKU-1",
            "name": "Widget",
            "unit": "ea",
            "unit_price_cents": 1250,
            "is_active": true,
            "created_at": 1,
            "updated_at": 2,
            "deleted_at": null
        })
    }

    #[tokio::test]
    async fn list_decodes_bare_envelope() {
        let router = Router::new().route(
            "/products",
            get(|| async {
                Json(json!({
                    "current_page": 1,
                    "data": [product_row()],
                    "last_page": 1,
                    "per_page": 15,
                    "total": 1
                }))
            }),
        );
        let base = spawn_stub(router).await;

        let service = RestCollection::<Product>::new(&base);
        let envelope = service
            .list(&ListParams::new(1, 15, FilterSet::new()))
            .await
            .unwrap();

        assert_eq!(envelope.total, 1);
        assert_eq!(envelope.data[0].sku, "SKU-1");
    }

    #[tokio::test]
    async fn list_decodes_wrapped_envelope() {
        let router = Router::new().route(
            "/purchases",
            get(|| async {
                Json(json!({
                    "status": "ok",
                    "message": null,
                    "data": {
                        "current_page": 1,
                        "data": [],
                        "last_page": 1,
                        "per_page": 15,
                        "total": 0
                    }
                }))
            }),
        );
        let base = spawn_stub(router).await;

        let service = RestCollection::<Purchase>::new(&base);
        let envelope = service
            .list(&ListParams::new(1, 15, FilterSet::new()))
            .await
            .unwrap();

        assert_eq!(envelope.total, 0);
    }

    #[tokio::test]
    async fn create_maps_422_to_validation_error() {
        let router = Router::new().route(
            "/purchases",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({
                        "message": "validation failed",
                        "errors": { "reference": ["reference is required"] }
                    })),
                )
            }),
        );
        let base = spawn_stub(router).await;

        let service = RestCollection::<Purchase>::new(&base);
        let error = service
            .create(&PurchaseDraft::default())
            .await
            .unwrap_err();

        match error {
            ApiError::Validation(body) => {
                assert_eq!(body.first("reference"), Some("reference is required"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn company_create_travels_as_form() {
        let router = Router::new().route(
            "/companies",
            post(|Form(fields): Form<HashMap<String, String>>| async move {
                assert_eq!(fields.get("name").map(String::as_str), Some("Acme"));
                assert_eq!(fields.get("is_active").map(String::as_str), Some("1"));
                // skipped optionals never appear as "null"
                assert!(!fields.contains_key("legal_name"));
                (
                    StatusCode::CREATED,
                    Json(json!({
                        "id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
                        "name": "Acme",
                        "legal_name": null,
                        "tax_id": "ES-B1234",
                        "email": null,
                        "website": null,
                        "is_active": true,
                        "created_at": 1,
                        "updated_at": 1,
                        "deleted_at": null
                    })),
                )
            }),
        );
        let base = spawn_stub(router).await;

        let service = RestCollection::<Company>::new(&base);
        let draft = CompanyDraft {
            name: "Acme".to_string(),
            tax_id: "ES-B1234".to_string(),
            ..CompanyDraft::default()
        };
        let company = service.create(&draft).await.unwrap();

        assert_eq!(company.name, "Acme");
    }

    #[tokio::test]
    async fn non_success_status_carries_server_message() {
        let router = Router::new().route(
            "/products/:id",
            axum::routing::put(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "product not found" })),
                )
            }),
        );
        let base = spawn_stub(router).await;

        let service = RestCollection::<Product>::new(&base);
        let error = service
            .update("missing", &Default::default())
            .await
            .unwrap_err();

        match error {
            ApiError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "product not found");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn form_pairs_renders_booleans_and_skips_null() {
        let draft = CompanyDraft {
            name: "Acme".to_string(),
            tax_id: "ES-B1234".to_string(),
            is_active: false,
            ..CompanyDraft::default()
        };

        let pairs = form_pairs(&draft).unwrap();

        assert!(pairs.contains(&("is_active".to_string(), "0".to_string())));
        assert!(pairs.contains(&("name".to_string(), "Acme".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "legal_name"));
    }
}
