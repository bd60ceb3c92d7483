//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor.
//!
//! The pack-size catalog has two backends:
//! - **Postgres** when a pool is present. Every read goes to the database so
//!   replicas never serve a stale catalog.
//! - **In-memory** [`PackSizeStore`] otherwise, seeded from configuration.
//!
//! [`AppState`] hides the choice behind async catalog operations; handlers
//! never branch on the backend.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::AppConfig;
use crate::db;
use crate::error::AppError;

/// A pack size in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PackSizeRecord {
    pub id: i64,
    /// Items per pack.
    pub size: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// In-memory catalog failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("pack size with id {0} not found")]
    NotFound(i64),

    #[error("pack size {0} already exists")]
    DuplicateSize(i64),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound(err.to_string()),
            StoreError::DuplicateSize(_) => Self::Conflict(err.to_string()),
        }
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    records: BTreeMap<i64, PackSizeRecord>,
    next_id: i64,
}

impl StoreInner {
    fn size_taken(&self, size: i64, except: Option<i64>) -> bool {
        self.records
            .values()
            .any(|r| r.size == size && Some(r.id) != except)
    }
}

/// Thread-safe, cloneable in-memory pack-size catalog.
///
/// The lock is `parking_lot` and is never held across `.await`. Uniqueness
/// checks and writes happen under one write lock.
#[derive(Debug, Clone, Default)]
pub struct PackSizeStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl PackSizeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the distinct positive values of `sizes`.
    pub fn seeded(sizes: &[i64]) -> Self {
        let store = Self::new();
        let now = Utc::now();
        for &size in sizes {
            if size > 0 {
                // Duplicates in the seed list are skipped.
                let _ = store.create(size, now);
            }
        }
        store
    }

    /// All records, smallest size first.
    pub fn list(&self) -> Vec<PackSizeRecord> {
        let mut records: Vec<_> = self.inner.read().records.values().cloned().collect();
        records.sort_by_key(|r| r.size);
        records
    }

    /// All sizes, ascending.
    pub fn sizes(&self) -> Vec<i64> {
        self.list().into_iter().map(|r| r.size).collect()
    }

    /// Retrieve a record by ID.
    pub fn get(&self, id: i64) -> Option<PackSizeRecord> {
        self.inner.read().records.get(&id).cloned()
    }

    /// Add a size.
    pub fn create(&self, size: i64, now: DateTime<Utc>) -> Result<PackSizeRecord, StoreError> {
        let mut inner = self.inner.write();
        if inner.size_taken(size, None) {
            return Err(StoreError::DuplicateSize(size));
        }
        inner.next_id += 1;
        let record = PackSizeRecord {
            id: inner.next_id,
            size,
            created_at: now,
            updated_at: now,
        };
        inner.records.insert(record.id, record.clone());
        Ok(record)
    }

    /// Change the size of record `id`.
    pub fn update(
        &self,
        id: i64,
        size: i64,
        now: DateTime<Utc>,
    ) -> Result<PackSizeRecord, StoreError> {
        let mut inner = self.inner.write();
        if !inner.records.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        if inner.size_taken(size, Some(id)) {
            return Err(StoreError::DuplicateSize(size));
        }
        let record = inner
            .records
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        record.size = size;
        record.updated_at = now;
        Ok(record.clone())
    }

    /// Remove record `id`.
    pub fn remove(&self, id: i64) -> Result<PackSizeRecord, StoreError> {
        self.inner
            .write()
            .records
            .remove(&id)
            .ok_or(StoreError::NotFound(id))
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Postgres pool. `None` means in-memory mode.
    pub db_pool: Option<PgPool>,
    /// In-memory catalog, authoritative only when `db_pool` is `None`.
    pub pack_sizes: PackSizeStore,
    /// Prometheus render handle, present when the binary installed a recorder.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// In-memory state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// State from `config`. Without a pool the in-memory catalog is seeded
    /// from `config.packs.sizes`.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        let pack_sizes = if db_pool.is_some() {
            PackSizeStore::new()
        } else {
            PackSizeStore::seeded(&config.packs.sizes)
        };
        Self {
            config: Arc::new(config),
            db_pool,
            pack_sizes,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Whether the catalog is persisted.
    pub fn is_persistent(&self) -> bool {
        self.db_pool.is_some()
    }

    /// Current catalog sizes, ascending. Fresh on every call.
    pub async fn catalog_snapshot(&self) -> Result<Vec<i64>, AppError> {
        match &self.db_pool {
            Some(pool) => Ok(db::pack_sizes::list_sizes(pool).await?),
            None => Ok(self.pack_sizes.sizes()),
        }
    }

    /// All pack-size records, smallest first.
    pub async fn list_pack_sizes(&self) -> Result<Vec<PackSizeRecord>, AppError> {
        match &self.db_pool {
            Some(pool) => Ok(db::pack_sizes::list_all(pool).await?),
            None => Ok(self.pack_sizes.list()),
        }
    }

    /// One pack-size record.
    pub async fn get_pack_size(&self, id: i64) -> Result<PackSizeRecord, AppError> {
        let record = match &self.db_pool {
            Some(pool) => db::pack_sizes::get_by_id(pool, id).await?,
            None => self.pack_sizes.get(id),
        };
        record.ok_or_else(|| StoreError::NotFound(id).into())
    }

    /// Add a pack size.
    pub async fn create_pack_size(&self, size: i64) -> Result<PackSizeRecord, AppError> {
        let record = match &self.db_pool {
            Some(pool) => db::pack_sizes::insert(pool, size)
                .await
                .map_err(|e| duplicate_or(e, size))?,
            None => self.pack_sizes.create(size, Utc::now())?,
        };
        tracing::info!(id = record.id, size, "pack size created");
        Ok(record)
    }

    /// Change a pack size.
    pub async fn update_pack_size(&self, id: i64, size: i64) -> Result<PackSizeRecord, AppError> {
        let record = match &self.db_pool {
            Some(pool) => db::pack_sizes::update(pool, id, size)
                .await
                .map_err(|e| duplicate_or(e, size))?
                .ok_or(StoreError::NotFound(id))?,
            None => self.pack_sizes.update(id, size, Utc::now())?,
        };
        tracing::info!(id, size, "pack size updated");
        Ok(record)
    }

    /// Delete a pack size.
    pub async fn delete_pack_size(&self, id: i64) -> Result<(), AppError> {
        match &self.db_pool {
            Some(pool) => {
                if !db::pack_sizes::delete(pool, id).await? {
                    return Err(StoreError::NotFound(id).into());
                }
            }
            None => {
                self.pack_sizes.remove(id)?;
            }
        }
        tracing::info!(id, "pack size deleted");
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn duplicate_or(err: sqlx::Error, size: i64) -> AppError {
    if db::pack_sizes::is_unique_violation(&err) {
        StoreError::DuplicateSize(size).into()
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_is_sorted_and_distinct() {
        let store = PackSizeStore::seeded(&[500, 250, 500, -1, 0, 1000]);
        assert_eq!(store.sizes(), vec![250, 500, 1000]);
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn create_rejects_duplicate() {
        let store = PackSizeStore::new();
        store.create(250, Utc::now()).unwrap();
        assert_eq!(
            store.create(250, Utc::now()),
            Err(StoreError::DuplicateSize(250))
        );
    }

    #[test]
    fn ids_are_sequential_and_not_reused() {
        let store = PackSizeStore::new();
        let a = store.create(10, Utc::now()).unwrap();
        store.remove(a.id).unwrap();
        let b = store.create(20, Utc::now()).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn update_changes_size_and_timestamp() {
        let store = PackSizeStore::new();
        let created = store.create(10, Utc::now()).unwrap();
        let later = created.created_at + chrono::Duration::seconds(5);
        let updated = store.update(created.id, 15, later).unwrap();
        assert_eq!(updated.size, 15);
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn update_to_own_size_is_allowed() {
        let store = PackSizeStore::new();
        let created = store.create(10, Utc::now()).unwrap();
        assert!(store.update(created.id, 10, Utc::now()).is_ok());
    }

    #[test]
    fn update_to_other_records_size_conflicts() {
        let store = PackSizeStore::new();
        store.create(10, Utc::now()).unwrap();
        let b = store.create(20, Utc::now()).unwrap();
        assert_eq!(
            store.update(b.id, 10, Utc::now()),
            Err(StoreError::DuplicateSize(10))
        );
    }

    #[test]
    fn missing_ids_are_not_found() {
        let store = PackSizeStore::new();
        assert_eq!(store.update(9, 1, Utc::now()), Err(StoreError::NotFound(9)));
        assert_eq!(store.remove(9), Err(StoreError::NotFound(9)));
        assert!(store.get(9).is_none());
    }

    #[tokio::test]
    async fn in_memory_state_serves_seeded_catalog() {
        let state = AppState::new();
        assert!(!state.is_persistent());
        assert_eq!(
            state.catalog_snapshot().await.unwrap(),
            vec![250, 500, 1000, 2000, 5000]
        );
    }

    #[tokio::test]
    async fn state_crud_round_trip() {
        let state = AppState::new();
        let created = state.create_pack_size(42).await.unwrap();
        assert_eq!(state.get_pack_size(created.id).await.unwrap().size, 42);

        state.update_pack_size(created.id, 43).await.unwrap();
        assert!(state.catalog_snapshot().await.unwrap().contains(&43));

        state.delete_pack_size(created.id).await.unwrap();
        let err = state.get_pack_size(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
