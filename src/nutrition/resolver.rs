use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::{repo, repo_types::FoodCategory};

#[derive(Debug, Error)]
pub enum ResolveError {
    /// No catalog row for this identifier.
    #[error("food category {0} not found")]
    NotFound(Uuid),

    #[error("catalog lookup failed: {0}")]
    Store(#[from] anyhow::Error),
}

/// Categories fetched for one aggregation call.
#[derive(Debug, Clone, Default)]
pub struct ResolvedCategories {
    rows: HashMap<Uuid, FoodCategory>,
}

impl ResolvedCategories {
    pub fn get(&self, id: Uuid) -> Result<&FoodCategory, ResolveError> {
        self.rows.get(&id).ok_or(ResolveError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<FoodCategory> for ResolvedCategories {
    fn from_iter<I: IntoIterator<Item = FoodCategory>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().map(|c| (c.id, c)).collect(),
        }
    }
}

/// Looks up food categories that live outside the tracker database.
///
/// `resolve_many` leaves unknown identifiers out of the result instead of
/// failing, so callers decide per identifier what a miss means.
#[async_trait]
pub trait CategoryResolver: Send + Sync {
    async fn resolve_many(&self, ids: &[Uuid]) -> Result<ResolvedCategories, ResolveError>;

    async fn resolve(&self, id: Uuid) -> Result<FoodCategory, ResolveError> {
        let found = self.resolve_many(&[id]).await?;
        found.get(id).cloned()
    }
}

/// Resolver backed by the catalog pool.
#[derive(Clone)]
pub struct PgCategoryResolver {
    pool: PgPool,
}

impl PgCategoryResolver {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryResolver for PgCategoryResolver {
    async fn resolve_many(&self, ids: &[Uuid]) -> Result<ResolvedCategories, ResolveError> {
        if ids.is_empty() {
            return Ok(ResolvedCategories::default());
        }
        let resolved: ResolvedCategories =
            repo::find_many(&self.pool, ids).await?.into_iter().collect();
        debug!(requested = ids.len(), found = resolved.len(), "categories resolved");
        Ok(resolved)
    }
}

#[cfg(test)]
pub use in_memory::InMemoryCategories;

#[cfg(test)]
mod in_memory {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Test resolver that counts round-trips.
    #[derive(Default)]
    pub struct InMemoryCategories {
        rows: Mutex<HashMap<Uuid, FoodCategory>>,
        calls: AtomicUsize,
    }

    impl InMemoryCategories {
        pub fn with(categories: impl IntoIterator<Item = FoodCategory>) -> Self {
            Self {
                rows: Mutex::new(categories.into_iter().map(|c| (c.id, c)).collect()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn remove(&self, id: Uuid) {
            self.rows.lock().unwrap().remove(&id);
        }
    }

    #[async_trait]
    impl CategoryResolver for InMemoryCategories {
        async fn resolve_many(&self, ids: &[Uuid]) -> Result<ResolvedCategories, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let rows = self.rows.lock().unwrap();
            Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
        }
    }
}
