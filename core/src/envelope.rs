use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Field name -> messages, as returned by the backend on a 422 and as
/// produced by client-side draft validation.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// The backend's standard wrapped list-response shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedEnvelope<T> {
    pub current_page: u32,
    pub data: Vec<T>,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub to: Option<u64>,
    #[serde(default)]
    pub next_page_url: Option<String>,
    #[serde(default)]
    pub prev_page_url: Option<String>,
}

impl<T> PaginatedEnvelope<T> {
    /// Build an envelope from a page of rows and a total count.
    pub fn build(data: Vec<T>, page: u32, per_page: u32, total: u64, base_url: &str) -> Self {
        let per = per_page.max(1);
        let last_page = (total.div_ceil(u64::from(per)) as u32).max(1);
        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            let from = u64::from(page.saturating_sub(1)) * u64::from(per) + 1;
            (Some(from), Some(from + data.len() as u64 - 1))
        };
        let next_page_url = (page < last_page).then(|| format!("{}?page={}", base_url, page + 1));
        let prev_page_url = (page > 1).then(|| format!("{}?page={}", base_url, page - 1));

        Self {
            current_page: page,
            data,
            last_page,
            per_page: per,
            total,
            from,
            to,
            next_page_url,
            prev_page_url,
        }
    }
}

/// Outer wrapper some legacy endpoints add around their payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wrapped<T> {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// Decode a payload that may or may not be wrapped in `{status, message,
/// data}`. The bare shape is tried first; on failure the wrapped shape is
/// tried, and the original error is reported if both fail.
pub fn unwrap_payload<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    match serde_json::from_str::<T>(body) {
        Ok(value) => Ok(value),
        Err(bare_err) => serde_json::from_str::<Wrapped<T>>(body)
            .map(|wrapped| wrapped.data)
            .map_err(|_| bare_err),
    }
}

/// The backend's validation failure body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    pub message: String,
    #[serde(default)]
    pub errors: FieldErrors,
}

impl ValidationErrorBody {
    pub fn new(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }

    /// First message for a field; only the first is ever displayed.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn build_computes_last_page_and_bounds() {
        let envelope = PaginatedEnvelope::build(vec![1, 2, 3, 4, 5], 2, 5, 13, "/products");

        assert_eq!(envelope.last_page, 3);
        assert_eq!(envelope.from, Some(6));
        assert_eq!(envelope.to, Some(10));
        assert_eq!(envelope.next_page_url.as_deref(), Some("/products?page=3"));
        assert_eq!(envelope.prev_page_url.as_deref(), Some("/products?page=1"));
    }

    #[test]
    fn build_empty_result_still_has_one_page() {
        let envelope = PaginatedEnvelope::<u8>::build(vec![], 1, 15, 0, "/products");

        assert_eq!(envelope.last_page, 1);
        assert_eq!(envelope.from, None);
        assert!(envelope.next_page_url.is_none());
    }

    #[test]
    fn unwrap_payload_handles_both_shapes() {
        let bare = r#"{"current_page":1,"data":[7],"last_page":1,"per_page":15,"total":1}"#;
        let wrapped = format!(r#"{{"status":"ok","message":null,"data":{}}}"#, bare);

        let a: PaginatedEnvelope<u8> = unwrap_payload(bare).unwrap();
        let b: PaginatedEnvelope<u8> = unwrap_payload(&wrapped).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.data, vec![7]);
    }

    #[test]
    fn validation_body_first_message_wins() {
        let body: ValidationErrorBody = serde_json::from_str(
            r#"{"message":"validation failed","errors":{"email":["invalid","taken"]}}"#,
        )
        .unwrap();

        assert_eq!(body.first("email"), Some("invalid"));
        assert_eq!(body.first("name"), None);
    }
}
