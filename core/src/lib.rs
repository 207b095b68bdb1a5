#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod arena;
pub mod controller;
pub mod debounce;
pub mod entities;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod filter_bar;
pub mod form;
pub mod lifecycle;
pub mod pagination;
pub mod params;
pub mod persist;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use controller::Controller;
pub use entities::{
    Account, AccountDraft, AccountKind, Company, CompanyDraft, Draft, Establishment,
    EstablishmentDraft, Product, ProductDraft, Purchase, PurchaseDraft, PurchaseStatus, Resource,
    Supplier, SupplierDraft,
};
pub use envelope::{unwrap_payload, FieldErrors, PaginatedEnvelope, ValidationErrorBody, Wrapped};
pub use error::ApiError;
pub use filter::{FilterSet, FilterValue};
pub use filter_bar::FilterBar;
pub use form::{EntityForm, FormMode};
pub use lifecycle::{LifecycleFlags, OpKind};
pub use pagination::{Pagination, DEFAULT_ROWS_PER_PAGE};
pub use params::ListParams;
pub use service::CollectionService;
pub use store::{Action, CollectionState, CollectionStore, Store};
