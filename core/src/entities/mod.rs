use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::envelope::FieldErrors;

pub mod account;
pub mod company;
pub mod establishment;
pub mod product;
pub mod purchase;
pub mod supplier;

pub use account::{Account, AccountDraft, AccountKind};
pub use company::{Company, CompanyDraft};
pub use establishment::{Establishment, EstablishmentDraft};
pub use product::{Product, ProductDraft};
pub use purchase::{Purchase, PurchaseDraft, PurchaseStatus};
pub use supplier::{Supplier, SupplierDraft};

/// A REST collection entity with the shared soft-delete lifecycle columns.
pub trait Resource:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Collection path segment, e.g. "products".
    const ENDPOINT: &'static str;
    /// Singular name for user-facing messages.
    const NAME: &'static str;
    /// Send create/update bodies form-encoded (booleans as "1"/"0") instead
    /// of as JSON. Set where the collaborating backend expects form semantics.
    const FORM_ENCODED: bool = false;

    type Draft: Draft;

    fn id(&self) -> &str;
    fn deleted_at(&self) -> Option<i64>;
}

/// The mutable payload behind a create/edit form.
pub trait Draft: Clone + Default + Send + Sync + Serialize + 'static {
    /// Synchronous client-side validation. An empty map means the draft is
    /// acceptable; keys match the backend's field names so server errors land
    /// in the same place.
    fn validate(&self) -> FieldErrors;
}

pub(crate) fn push_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors.entry(field.to_string()).or_default().push(message.into());
}

pub(crate) fn require(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        push_error(errors, field, format!("{} is required", field));
    }
}

pub(crate) fn max_len(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        push_error(
            errors,
            field,
            format!("{} must be at most {} characters", field, max),
        );
    }
}

pub(crate) fn check_email(errors: &mut FieldErrors, field: &str, value: &str) {
    let Some((local, domain)) = value.split_once('@') else {
        push_error(errors, field, format!("{} must be a valid email address", field));
        return;
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        push_error(errors, field, format!("{} must be a valid email address", field));
    }
}

pub(crate) fn check_url(errors: &mut FieldErrors, field: &str, value: &str) {
    if !value.starts_with("http://") && !value.starts_with("https://") {
        push_error(errors, field, format!("{} must be an http(s) URL", field));
    }
}

pub(crate) fn check_date(errors: &mut FieldErrors, field: &str, value: &str) {
    if chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        push_error(errors, field, format!("{} must be a date (YYYY-MM-DD)", field));
    }
}
