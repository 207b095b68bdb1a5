use crate::controller::Controller;
use crate::entities::{Draft, Resource};
use crate::envelope::FieldErrors;
use crate::error::ApiError;
use crate::service::CollectionService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

/// A single entity's draft plus its error map.
///
/// Client-side validation failures and server-returned 422 field errors land
/// in the same map, keyed by field name; only the first message per field is
/// displayed. Switching between create and edit mode fully resets the draft
/// and the errors so nothing leaks across entities.
pub struct EntityForm<E: Resource> {
    mode: FormMode,
    draft: E::Draft,
    errors: FieldErrors,
    alert: Option<String>,
}

impl<E: Resource> EntityForm<E> {
    pub fn create() -> Self {
        EntityForm {
            mode: FormMode::Create,
            draft: E::Draft::default(),
            errors: FieldErrors::new(),
            alert: None,
        }
    }

    /// Open in edit mode with the draft prefilled from the entity being
    /// edited.
    pub fn edit(id: impl Into<String>, draft: E::Draft) -> Self {
        EntityForm {
            mode: FormMode::Edit(id.into()),
            draft,
            errors: FieldErrors::new(),
            alert: None,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &E::Draft {
        &self.draft
    }

    /// Switch modes, discarding draft and error state entirely.
    pub fn switch(&mut self, mode: FormMode, draft: E::Draft) {
        self.mode = mode;
        self.draft = draft;
        self.errors.clear();
        self.alert = None;
    }

    /// Apply an edit to one field. The field's errors clear as soon as the
    /// user touches it; other fields keep theirs.
    pub fn edit_field(&mut self, field: &str, apply: impl FnOnce(&mut E::Draft)) {
        self.errors.remove(field);
        apply(&mut self.draft);
    }

    pub fn first_error(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Top-level failure message for the modal alert.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Run client-side validation, recording any failures.
    pub fn validate(&mut self) -> bool {
        self.errors = self.draft.validate();
        self.errors.is_empty()
    }

    /// Validate and submit through the collection's create or update
    /// operation. Returns the saved entity on success; on failure the error
    /// map and alert are populated and `None` is returned so the form stays
    /// open.
    pub async fn submit<S>(&mut self, controller: &Controller<E, S>) -> Option<E>
    where
        S: CollectionService<E> + 'static,
    {
        if !self.validate() {
            return None;
        }
        let result = match &self.mode {
            FormMode::Create => controller.create(&self.draft).await,
            FormMode::Edit(id) => controller.update(id, &self.draft).await,
        };
        match result {
            Ok(entity) => {
                self.alert = None;
                Some(entity)
            }
            Err(ApiError::Validation(body)) => {
                // Server-side field errors merge into the same display path
                // as client-side ones.
                for (field, messages) in body.errors {
                    self.errors.entry(field).or_default().extend(messages);
                }
                self.alert = Some(body.message);
                None
            }
            Err(other) => {
                self.alert = Some(other.to_string());
                None
            }
        }
    }
}
