use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::Resource;
use crate::filter::FilterSet;
use crate::lifecycle::LifecycleFlags;
use crate::pagination::Pagination;
use crate::store::CollectionState;

/// Current snapshot layout version. Version 1 predates the lifecycle flags;
/// loading it backfills them as idle.
pub const SNAPSHOT_VERSION: u32 = 2;

/// One collection's persisted list state.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<E: Resource> {
    pub version: u32,
    /// Unix timestamp in milliseconds
    pub saved_at: i64,
    pub entities: Vec<E>,
    pub filters: FilterSet,
    pub pagination: Pagination,
    #[serde(default)]
    pub flags: LifecycleFlags,
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to access snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("snapshot has no version field")]
    MissingVersion,
    #[error("snapshot version {0} is newer than this build supports")]
    FutureVersion(u64),
}

/// Path of the snapshot file for one collection under `dir`.
pub fn snapshot_path(dir: &Path, endpoint: &str) -> PathBuf {
    dir.join(format!("{}.state.json", endpoint))
}

/// Persist the collection's current list state.
pub fn save_snapshot<E: Resource>(
    path: &Path,
    state: &CollectionState<E>,
) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let snapshot = Snapshot::<E> {
        version: SNAPSHOT_VERSION,
        saved_at: chrono::Utc::now().timestamp_millis(),
        entities: state.entities.to_vec(),
        filters: state.filters.clone(),
        pagination: state.pagination,
        flags: state.flags,
    };
    let json = serde_json::to_string_pretty(&snapshot)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a snapshot, migrating older layouts forward.
pub fn load_snapshot<E: Resource>(path: &Path) -> Result<Snapshot<E>, PersistError> {
    let contents = std::fs::read_to_string(path)?;
    let mut value: serde_json::Value = serde_json::from_str(&contents)?;
    migrate(&mut value)?;
    Ok(serde_json::from_value(value)?)
}

impl<E: Resource> Snapshot<E> {
    /// Rebuild a collection state from the snapshot. Flags come back idle:
    /// an operation that was in flight when the state was written has long
    /// since settled.
    pub fn into_state(self) -> CollectionState<E> {
        let mut state = CollectionState::default();
        state.entities.replace_all(self.entities);
        state.filters = self.filters;
        state.pagination = self.pagination;
        state
    }
}

/// Bring a raw snapshot document up to `SNAPSHOT_VERSION`, one step at a
/// time.
fn migrate(value: &mut serde_json::Value) -> Result<(), PersistError> {
    let mut version = value
        .get("version")
        .and_then(serde_json::Value::as_u64)
        .ok_or(PersistError::MissingVersion)?;

    if version == 1 {
        // V1 predates per-operation lifecycle flags: backfill as idle.
        if let Some(root) = value.as_object_mut() {
            root.entry("flags")
                .or_insert_with(|| serde_json::json!(LifecycleFlags::default()));
            root.insert("version".to_string(), serde_json::json!(2));
        }
        version = 2;
    }

    if u64::from(SNAPSHOT_VERSION) < version {
        return Err(PersistError::FutureVersion(version));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use tempfile::TempDir;

    use super::*;
    use crate::entities::Product;
    use crate::envelope::PaginatedEnvelope;
    use crate::store::{reduce, Action};

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            unit: Some("ea".to_string()),
            unit_price_cents: 1250,
            is_active: true,
            created_at: 1,
            updated_at: 2,
            deleted_at: None,
        }
    }

    #[test]
    fn snapshot_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = snapshot_path(dir.path(), Product::ENDPOINT);

        let mut state = CollectionState::<Product>::default();
        let envelope = PaginatedEnvelope::build(
            vec![product("a"), product("b")],
            1,
            15,
            2,
            "/products",
        );
        reduce(&mut state, Action::FetchOk(envelope));
        reduce(
            &mut state,
            Action::SetFilters(FilterSet::new().with("is_active", true)),
        );

        save_snapshot(&path, &state).unwrap();
        let restored = load_snapshot::<Product>(&path).unwrap().into_state();

        assert_eq!(restored.entities.to_vec(), state.entities.to_vec());
        assert_eq!(restored.filters, state.filters);
        assert_eq!(restored.pagination, state.pagination);
        assert!(!restored.flags.any());
    }

    #[test]
    fn v1_snapshot_backfills_lifecycle_flags() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.state.json");

        // layout written before the flags existed
        let v1 = serde_json::json!({
            "version": 1,
            "saved_at": 1700000000000i64,
            "entities": [product("a")],
            "filters": {},
            "pagination": {
                "current_page": 1,
                "rows_per_page": 15,
                "total_pages": 1,
                "total_records": 1
            }
        });
        std::fs::write(&path, serde_json::to_string(&v1).unwrap()).unwrap();

        let snapshot = load_snapshot::<Product>(&path).unwrap();

        assert_eq!(snapshot.flags, LifecycleFlags::default());
        assert_eq!(snapshot.entities.len(), 1);
    }

    #[test]
    fn future_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.state.json");
        std::fs::write(&path, r#"{"version": 99}"#).unwrap();

        let result = load_snapshot::<Product>(&path);

        assert!(matches!(result, Err(PersistError::FutureVersion(99))));
    }

    #[test]
    fn missing_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.state.json");
        std::fs::write(&path, r#"{"entities": []}"#).unwrap();

        let result = load_snapshot::<Product>(&path);

        assert!(matches!(result, Err(PersistError::MissingVersion)));
    }
}
