use std::time::Duration;

use crate::debounce::Debounce;
use crate::entities::Resource;
use crate::filter::{FilterSet, FilterValue};
use crate::store::{Action, CollectionStore};

/// Delay between the last keystroke and the filter commit.
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(700);

/// Owns the transient, per-keystroke filter state and commits it to the
/// collection store only after the debounce window (or an explicit submit).
///
/// The debounce slot belongs to this instance; a second bar over another
/// collection cannot cancel it.
pub struct FilterBar<E: Resource> {
    store: CollectionStore<E>,
    draft: FilterSet,
    debounce: Debounce,
}

impl<E: Resource> FilterBar<E> {
    pub fn new(store: CollectionStore<E>) -> Self {
        Self::with_debounce(store, FILTER_DEBOUNCE)
    }

    pub fn with_debounce(store: CollectionStore<E>, delay: Duration) -> Self {
        FilterBar {
            store,
            draft: FilterSet::new(),
            debounce: Debounce::new(delay),
        }
    }

    pub fn draft(&self) -> &FilterSet {
        &self.draft
    }

    /// A keystroke in a text field. Empty input clears the key, and the
    /// commit is (re)scheduled.
    pub fn input_text(&mut self, key: &str, value: &str) {
        self.draft.set_text(key, value);
        self.schedule_commit();
    }

    /// A change to a non-text control (checkbox, select).
    pub fn input(&mut self, key: &str, value: impl Into<FilterValue>) {
        self.draft.set(key, value);
        self.schedule_commit();
    }

    pub fn unset(&mut self, key: &str) {
        self.draft.remove(key);
        self.schedule_commit();
    }

    /// Enter key: commit right now, cancelling the pending timer.
    pub fn submit(&mut self) {
        self.debounce.cancel();
        self.store.dispatch(Action::SetFilters(self.draft.clone()));
    }

    /// Reset every field, commit an empty set, and force a reload so the
    /// table refreshes without waiting out a debounce.
    pub fn clear(&mut self) {
        self.debounce.cancel();
        self.draft.clear();
        self.store.dispatch(Action::ClearFilters);
    }

    fn schedule_commit(&self) {
        let store = self.store.clone();
        let filters = self.draft.clone();
        self.debounce
            .schedule(async move { store.dispatch(Action::SetFilters(filters)) });
    }
}
