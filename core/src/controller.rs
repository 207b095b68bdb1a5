use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::debounce::Debounce;
use crate::entities::Resource;
use crate::envelope::FieldErrors;
use crate::error::ApiError;
use crate::lifecycle::OpKind;
use crate::params::ListParams;
use crate::service::CollectionService;
use crate::store::{Action, CollectionStore};

/// Delay applied to filter/pagination-driven reloads. First-run and forced
/// reloads skip it.
pub const RELOAD_DEBOUNCE: Duration = Duration::from_millis(600);

/// The reconciliation loop for one collection view.
///
/// [`sync`](Self::sync) is called after every state change the view observes
/// and decides whether the current (page, page size, filters) tuple differs
/// from the last tuple it loaded. Unchanged parameters never re-issue a
/// request; changed parameters issue exactly one, immediately for
/// first-run/forced reloads and debounced otherwise.
///
/// Every issued load carries a sequence number; a response that is no longer
/// the newest outstanding request is discarded without touching state, so the
/// newest request wins regardless of resolution order.
pub struct Controller<E: Resource, S: CollectionService<E>> {
    inner: Arc<Inner<E, S>>,
}

impl<E: Resource, S: CollectionService<E>> Clone for Controller<E, S> {
    fn clone(&self) -> Self {
        Controller {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<E: Resource, S> {
    store: CollectionStore<E>,
    service: S,
    /// Serialized parameters of the last load this controller issued. Written
    /// before the request settles so an identical repeat is suppressed while
    /// the call is still in flight.
    last_load: Mutex<Option<String>>,
    seq: AtomicU64,
    debounce: Debounce,
}

impl<E, S> Controller<E, S>
where
    E: Resource,
    S: CollectionService<E> + 'static,
{
    pub fn new(store: CollectionStore<E>, service: S) -> Self {
        Self::with_debounce(store, service, RELOAD_DEBOUNCE)
    }

    pub fn with_debounce(store: CollectionStore<E>, service: S, delay: Duration) -> Self {
        Controller {
            inner: Arc::new(Inner {
                store,
                service,
                last_load: Mutex::new(None),
                seq: AtomicU64::new(0),
                debounce: Debounce::new(delay),
            }),
        }
    }

    pub fn store(&self) -> &CollectionStore<E> {
        &self.inner.store
    }

    /// Reconcile the visible collection with the current load parameters.
    pub async fn sync(&self) {
        let (params, needs_reload) = self.inner.store.read(|state| {
            (
                ListParams::new(
                    state.pagination.current_page,
                    state.pagination.rows_per_page,
                    state.filters.clone(),
                ),
                state.needs_reload,
            )
        });
        let key = params.cache_key();
        let (first_run, changed) = {
            let last = self.inner.last_load.lock();
            (last.is_none(), last.as_deref() != Some(key.as_str()))
        };
        if !(first_run || needs_reload || changed) {
            return;
        }
        *self.inner.last_load.lock() = Some(key);

        if first_run || needs_reload {
            // First paint and programmatic refresh must not be delayed.
            self.inner.debounce.cancel();
            Inner::issue(Arc::clone(&self.inner), params, needs_reload, true).await;
        } else {
            tracing::debug!(key = %params.cache_key(), "scheduling debounced load");
            let inner = Arc::clone(&self.inner);
            self.inner
                .debounce
                .schedule(async move { Inner::issue(inner, params, false, true).await });
        }
    }

    pub async fn create(&self, draft: &E::Draft) -> Result<E, ApiError> {
        self.inner.store.dispatch(Action::Pending(OpKind::Create));
        match self.inner.service.create(draft).await {
            Ok(entity) => {
                self.inner.store.dispatch(Action::CreateOk(entity.clone()));
                Ok(entity)
            }
            Err(error) => {
                self.dispatch_failure(OpKind::Create, &error);
                Err(error)
            }
        }
    }

    pub async fn update(&self, id: &str, draft: &E::Draft) -> Result<E, ApiError> {
        self.inner.store.dispatch(Action::Pending(OpKind::Update));
        match self.inner.service.update(id, draft).await {
            Ok(entity) => {
                self.inner.store.dispatch(Action::UpdateOk(entity.clone()));
                Ok(entity)
            }
            Err(error) => {
                self.dispatch_failure(OpKind::Update, &error);
                Err(error)
            }
        }
    }

    /// Delete is a confirmed removal: on success the row is dropped from the
    /// local page without a re-fetch. The reducer may step the page back and
    /// request a reload when this empties a page above the first; the next
    /// [`sync`](Self::sync) picks that up.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.inner.store.dispatch(Action::Pending(OpKind::Delete));
        match self.inner.service.delete(id).await {
            Ok(()) => {
                self.inner.store.dispatch(Action::DeleteOk(id.to_string()));
                Ok(())
            }
            Err(error) => {
                self.dispatch_failure(OpKind::Delete, &error);
                Err(error)
            }
        }
    }

    fn dispatch_failure(&self, op: OpKind, error: &ApiError) {
        let (message, fields) = match error {
            ApiError::Validation(body) => (body.message.clone(), body.errors.clone()),
            other => (other.to_string(), FieldErrors::new()),
        };
        self.inner.store.dispatch(Action::Failed {
            op,
            message,
            fields,
        });
    }
}

impl<E, S> Inner<E, S>
where
    E: Resource,
    S: CollectionService<E> + 'static,
{
    async fn issue(
        inner: Arc<Self>,
        params: ListParams,
        clear_reload: bool,
        allow_correction: bool,
    ) {
        let seq = inner.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let op = if params.filters.get("search").is_some() {
            OpKind::Search
        } else {
            OpKind::Fetch
        };
        inner.store.dispatch(Action::Pending(op));

        let result = inner.service.list(&params).await;

        // A newer load was issued while this one was in flight.
        if inner.seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "dropping stale load response");
            return;
        }

        match result {
            Ok(envelope) => {
                let overshoot = params.page > envelope.last_page.max(1);
                inner.store.dispatch(Action::FetchOk(envelope));
                if clear_reload {
                    inner.store.dispatch(Action::ReloadHandled);
                }
                if overshoot && allow_correction {
                    // The requested page no longer exists; load the clamped
                    // page once.
                    let corrected = inner.store.read(|state| {
                        ListParams::new(
                            state.pagination.current_page,
                            state.pagination.rows_per_page,
                            state.filters.clone(),
                        )
                    });
                    tracing::debug!(page = corrected.page, "issuing corrective load");
                    *inner.last_load.lock() = Some(corrected.cache_key());
                    Box::pin(Self::issue(inner, corrected, false, false)).await;
                }
            }
            Err(error) => {
                let (message, fields) = match &error {
                    ApiError::Validation(body) => (body.message.clone(), body.errors.clone()),
                    other => (other.to_string(), FieldErrors::new()),
                };
                inner.store.dispatch(Action::Failed {
                    op,
                    message,
                    fields,
                });
                if clear_reload {
                    inner.store.dispatch(Action::ReloadHandled);
                }
            }
        }
    }
}
