use indexmap::IndexMap;

use crate::entities::Resource;

/// Id-keyed, insertion-ordered collection of one page of entities.
///
/// Lookup and in-place replacement are O(1); removal preserves display order
/// and costs at most one page of shifts, which is bounded by `rows_per_page`.
#[derive(Debug, Clone)]
pub struct Arena<E: Resource> {
    items: IndexMap<String, E>,
}

impl<E: Resource> Default for Arena<E> {
    fn default() -> Self {
        Arena {
            items: IndexMap::new(),
        }
    }
}

impl<E: Resource> Arena<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&E> {
        self.items.get(id)
    }

    /// Replace the whole page, keeping the server's ordering.
    pub fn replace_all(&mut self, entities: Vec<E>) {
        self.items = entities
            .into_iter()
            .map(|e| (e.id().to_string(), e))
            .collect();
    }

    /// Insert at the front of the page (newly created rows show first).
    pub fn prepend(&mut self, entity: E) {
        self.items
            .shift_insert(0, entity.id().to_string(), entity);
    }

    /// Replace an existing entity in place; position is preserved. Returns
    /// false when the id is not on the current page.
    pub fn replace(&mut self, entity: E) -> bool {
        let id = entity.id().to_string();
        if self.items.contains_key(&id) {
            self.items.insert(id, entity);
            true
        } else {
            false
        }
    }

    /// Remove by id, preserving the order of the remaining rows.
    pub fn remove(&mut self, id: &str) -> Option<E> {
        self.items.shift_remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.items.values()
    }

    pub fn to_vec(&self) -> Vec<E> {
        self.items.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::entities::Product;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: name.to_string(),
            unit: None,
            unit_price_cents: 100,
            is_active: true,
            created_at: 0,
            updated_at: 0,
            deleted_at: None,
        }
    }

    #[test]
    fn prepend_puts_new_rows_first() {
        let mut arena = Arena::new();
        arena.replace_all(vec![product("a", "first"), product("b", "second")]);

        arena.prepend(product("c", "newest"));

        let ids: Vec<&str> = arena.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut arena = Arena::new();
        arena.replace_all(vec![product("a", "one"), product("b", "two"), product("c", "three")]);

        assert!(arena.replace(product("b", "renamed")));

        let names: Vec<&str> = arena.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["one", "renamed", "three"]);
    }

    #[test]
    fn remove_preserves_order_of_rest() {
        let mut arena = Arena::new();
        arena.replace_all(vec![product("a", "one"), product("b", "two"), product("c", "three")]);

        assert!(arena.remove("b").is_some());
        assert!(arena.remove("missing").is_none());

        let ids: Vec<&str> = arena.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
