use std::sync::Arc;

use parking_lot::Mutex;

use crate::arena::Arena;
use crate::entities::Resource;
use crate::envelope::{FieldErrors, PaginatedEnvelope};
use crate::filter::FilterSet;
use crate::lifecycle::{LifecycleFlags, OpKind};
use crate::pagination::Pagination;

/// The full list-screen state for one entity collection.
#[derive(Debug, Clone)]
pub struct CollectionState<E: Resource> {
    pub entities: Arena<E>,
    pub filters: FilterSet,
    pub pagination: Pagination,
    pub flags: LifecycleFlags,
    pub error: Option<String>,
    pub field_errors: FieldErrors,
    pub needs_reload: bool,
}

impl<E: Resource> Default for CollectionState<E> {
    fn default() -> Self {
        CollectionState {
            entities: Arena::new(),
            filters: FilterSet::new(),
            pagination: Pagination::default(),
            flags: LifecycleFlags::default(),
            error: None,
            field_errors: FieldErrors::new(),
            needs_reload: false,
        }
    }
}

#[derive(Debug)]
pub enum Action<E: Resource> {
    /// An operation was dispatched; marks the matching lifecycle flag and
    /// clears the previous error.
    Pending(OpKind),
    /// A list/search settled; replaces the page and adopts pagination.
    FetchOk(PaginatedEnvelope<E>),
    /// A create settled; the new row goes to the front, total grows by one.
    CreateOk(E),
    /// An update settled; the row is replaced in place.
    UpdateOk(E),
    /// A delete settled; the row is removed, total shrinks by one.
    DeleteOk(String),
    /// Any operation failed.
    Failed {
        op: OpKind,
        message: String,
        fields: FieldErrors,
    },
    SetFilters(FilterSet),
    ClearFilters,
    SetPage(u32),
    SetRowsPerPage(u32),
    ForceReload,
    ReloadHandled,
    ClearError,
    ClearFieldError(String),
}

/// Pure reducer for one collection. All mutation flows through here.
pub fn reduce<E: Resource>(state: &mut CollectionState<E>, action: Action<E>) {
    match action {
        Action::Pending(op) => {
            state.flags.set(op, true);
            state.error = None;
            if matches!(op, OpKind::Create | OpKind::Update) {
                state.field_errors.clear();
            }
        }
        Action::FetchOk(envelope) => {
            state.flags.set(OpKind::Fetch, false);
            state.flags.set(OpKind::Search, false);
            state.pagination.apply(&envelope);
            state.entities.replace_all(envelope.data);
        }
        Action::CreateOk(entity) => {
            state.flags.set(OpKind::Create, false);
            state.field_errors.clear();
            state.entities.prepend(entity);
            state.pagination.record_added();
        }
        Action::UpdateOk(entity) => {
            state.flags.set(OpKind::Update, false);
            state.field_errors.clear();
            state.entities.replace(entity);
        }
        Action::DeleteOk(id) => {
            state.flags.set(OpKind::Delete, false);
            // Removing an id that is not on the page is a no-op but still a
            // success.
            if state.entities.remove(&id).is_some() {
                // Emptying a page above the first steps back (record_removed
                // clamps the page) and reloads on the next cycle.
                let emptied =
                    state.entities.is_empty() && state.pagination.current_page > 1;
                state.pagination.record_removed();
                if emptied {
                    state.needs_reload = true;
                }
            }
        }
        Action::Failed {
            op,
            message,
            fields,
        } => {
            state.flags.set(op, false);
            state.error = Some(message);
            if matches!(op, OpKind::Create | OpKind::Update) {
                state.field_errors = fields;
            }
        }
        Action::SetFilters(filters) => {
            if state.filters != filters {
                state.filters = filters;
                state.pagination.current_page = 1;
            }
        }
        Action::ClearFilters => {
            state.filters.clear();
            state.pagination.current_page = 1;
            state.needs_reload = true;
        }
        Action::SetPage(page) => {
            state.pagination.current_page = page.max(1);
        }
        Action::SetRowsPerPage(rows) => {
            state.pagination.rows_per_page = rows.max(1);
            state.pagination.current_page = 1;
        }
        Action::ForceReload => {
            state.needs_reload = true;
        }
        Action::ReloadHandled => {
            state.needs_reload = false;
        }
        Action::ClearError => {
            state.error = None;
        }
        Action::ClearFieldError(field) => {
            state.field_errors.remove(&field);
        }
    }
}

type Listener<S> = Box<dyn Fn(&S) + Send + Sync>;

/// A typed state container: a reducer plus subscribers, reached by handle.
/// Handles are cheap clones of one shared store; nothing here is a process
/// global.
pub struct Store<S, A> {
    inner: Arc<StoreInner<S, A>>,
}

struct StoreInner<S, A> {
    state: Mutex<S>,
    reducer: fn(&mut S, A),
    listeners: Mutex<Vec<Listener<S>>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Store {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Clone, A> Store<S, A> {
    pub fn new(initial: S, reducer: fn(&mut S, A)) -> Self {
        Store {
            inner: Arc::new(StoreInner {
                state: Mutex::new(initial),
                reducer,
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Run the action through the reducer, then notify subscribers with the
    /// settled state. Listeners run outside the state lock.
    pub fn dispatch(&self, action: A) {
        let snapshot = {
            let mut state = self.inner.state.lock();
            (self.inner.reducer)(&mut state, action);
            state.clone()
        };
        for listener in self.inner.listeners.lock().iter() {
            listener(&snapshot);
        }
    }

    pub fn state(&self) -> S {
        self.inner.state.lock().clone()
    }

    /// Read without cloning the whole state.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.state.lock())
    }

    pub fn subscribe(&self, listener: impl Fn(&S) + Send + Sync + 'static) {
        self.inner.listeners.lock().push(Box::new(listener));
    }
}

/// The store every feature module instantiates.
pub type CollectionStore<E> = Store<CollectionState<E>, Action<E>>;

impl<E: Resource> CollectionStore<E> {
    pub fn collection() -> Self {
        Store::new(CollectionState::default(), reduce)
    }

    pub fn from_state(state: CollectionState<E>) -> Self {
        Store::new(state, reduce)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::entities::Product;
    use crate::envelope::PaginatedEnvelope;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            unit: None,
            unit_price_cents: 500,
            is_active: true,
            created_at: 0,
            updated_at: 0,
            deleted_at: None,
        }
    }

    fn loaded_state(ids: &[&str], page: u32, total: u64) -> CollectionState<Product> {
        let mut state = CollectionState::default();
        let envelope = PaginatedEnvelope::build(
            ids.iter().map(|id| product(id)).collect(),
            page,
            15,
            total,
            "/products",
        );
        reduce(&mut state, Action::FetchOk(envelope));
        state
    }

    #[test]
    fn pending_sets_flag_and_clears_error() {
        let mut state = CollectionState::<Product>::default();
        state.error = Some("old failure".to_string());

        reduce(&mut state, Action::Pending(OpKind::Fetch));

        assert!(state.flags.fetching);
        assert!(state.error.is_none());
    }

    #[test]
    fn create_prepends_and_increments() {
        let mut state = loaded_state(&["a", "b"], 1, 2);

        reduce(&mut state, Action::CreateOk(product("c")));

        let ids: Vec<&str> = state.entities.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(state.pagination.total_records, 3);
        assert!(!state.flags.creating);
    }

    #[test]
    fn delete_removes_and_decrements() {
        let mut state = loaded_state(&["a", "b"], 1, 2);

        reduce(&mut state, Action::DeleteOk("a".to_string()));

        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.pagination.total_records, 1);
    }

    #[test]
    fn delete_of_unknown_id_is_noop_but_succeeds() {
        let mut state = loaded_state(&["a"], 1, 1);

        reduce(&mut state, Action::DeleteOk("missing".to_string()));

        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.pagination.total_records, 1);
        assert!(!state.flags.deleting);
    }

    #[test]
    fn delete_emptying_page_above_first_steps_back() {
        let mut state = loaded_state(&["only"], 3, 31);

        reduce(&mut state, Action::DeleteOk("only".to_string()));

        assert_eq!(state.pagination.current_page, 2);
        assert!(state.needs_reload);
    }

    #[test]
    fn delete_emptying_first_page_stays_put() {
        let mut state = loaded_state(&["only"], 1, 1);

        reduce(&mut state, Action::DeleteOk("only".to_string()));

        assert_eq!(state.pagination.current_page, 1);
        assert!(!state.needs_reload);
    }

    #[test]
    fn failed_create_stores_field_errors() {
        let mut state = CollectionState::<Product>::default();
        let mut fields = FieldErrors::new();
        fields.insert("sku".to_string(), vec!["sku is taken".to_string()]);

        reduce(&mut state, Action::Pending(OpKind::Create));
        reduce(
            &mut state,
            Action::Failed {
                op: OpKind::Create,
                message: "validation failed".to_string(),
                fields,
            },
        );

        assert!(!state.flags.creating);
        assert_eq!(state.error.as_deref(), Some("validation failed"));
        assert_eq!(
            state.field_errors.get("sku").map(|v| v[0].as_str()),
            Some("sku is taken")
        );
    }

    #[test]
    fn filter_change_resets_to_first_page() {
        let mut state = loaded_state(&["a"], 2, 31);

        reduce(
            &mut state,
            Action::SetFilters(FilterSet::new().with("search", "acme")),
        );

        assert_eq!(state.pagination.current_page, 1);
    }

    #[test]
    fn identical_filters_do_not_reset_page() {
        let mut state = loaded_state(&["a"], 2, 31);
        let filters = FilterSet::new().with("search", "acme");
        reduce(&mut state, Action::SetFilters(filters.clone()));
        reduce(&mut state, Action::SetPage(2));

        reduce(&mut state, Action::SetFilters(filters));

        assert_eq!(state.pagination.current_page, 2);
    }

    #[test]
    fn clear_filters_forces_reload_of_first_page() {
        let mut state = loaded_state(&["a"], 2, 31);
        reduce(
            &mut state,
            Action::SetFilters(
                FilterSet::new().with("search", "acme").with("is_active", true),
            ),
        );

        reduce(&mut state, Action::ClearFilters);

        assert!(state.filters.is_empty());
        assert_eq!(state.pagination.current_page, 1);
        assert!(state.needs_reload);
    }

    #[test]
    fn subscribers_see_settled_state() {
        let store = CollectionStore::<Product>::collection();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |state: &CollectionState<Product>| {
            sink.lock().push(state.entities.len());
        });

        store.dispatch(Action::CreateOk(product("a")));
        store.dispatch(Action::CreateOk(product("b")));

        assert_eq!(*seen.lock(), vec![1, 2]);
    }
}
