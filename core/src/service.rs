use async_trait::async_trait;

use crate::entities::Resource;
use crate::envelope::PaginatedEnvelope;
use crate::error::ApiError;
use crate::params::ListParams;

/// Stateless request/response mapping for one entity collection.
///
/// Implementations build the wire request from the load parameters, call the
/// transport, and return the normalized envelope. No caching, no retries;
/// errors propagate unchanged to the store layer.
#[async_trait]
pub trait CollectionService<E: Resource>: Send + Sync {
    async fn list(&self, params: &ListParams) -> Result<PaginatedEnvelope<E>, ApiError>;

    async fn create(&self, draft: &E::Draft) -> Result<E, ApiError>;

    async fn update(&self, id: &str, draft: &E::Draft) -> Result<E, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;

    /// Search is a list with the term merged into the filter set.
    async fn search(
        &self,
        term: &str,
        params: &ListParams,
    ) -> Result<PaginatedEnvelope<E>, ApiError> {
        let mut merged = params.clone();
        merged.filters.set_text("search", term);
        self.list(&merged).await
    }
}
