//! Blocklist service: durable store plus the hot-path membership index.
//!
//! The resolver consults [`BlocklistService::is_blocked`] on every query,
//! so membership checks run against a copy-on-write `Arc<HashSet>`
//! snapshot: readers clone the `Arc` under a briefly-held read lock and
//! then probe the set with no lock at all. Mutations write the table
//! first, rebuild the set, and swap the `Arc`.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use warden_core::domain::normalize_domain;
use warden_core::error::CoreError;
use warden_core::types::now_ms;
use warden_db::repositories::BlocklistRepo;
use warden_db::DbPool;

pub struct BlocklistService {
    pool: DbPool,
    index: RwLock<Arc<HashSet<String>>>,
}

impl BlocklistService {
    /// Build the service and load the initial index from the table.
    pub async fn load(pool: DbPool) -> Result<Self, sqlx::Error> {
        let domains = BlocklistRepo::all_domains(&pool).await?;
        let count = domains.len();
        let service = Self {
            pool,
            index: RwLock::new(Arc::new(domains.into_iter().collect())),
        };
        tracing::info!(count, "blocklist index loaded");
        Ok(service)
    }

    /// Block a domain. Idempotent: blocking an already-blocked domain
    /// succeeds. Returns `true` when the domain was newly inserted.
    pub async fn add(&self, raw: &str) -> Result<bool, CoreError> {
        let domain = normalize_domain(raw)?;
        let inserted = BlocklistRepo::insert(&self.pool, &domain, now_ms())
            .await
            .map_err(|e| CoreError::Internal(format!("insert blocklist entry: {e}")))?;
        self.reload().await?;
        Ok(inserted)
    }

    /// Unblock a domain. Idempotent: removing an absent domain succeeds.
    pub async fn remove(&self, raw: &str) -> Result<(), CoreError> {
        let domain = normalize_domain(raw)?;
        BlocklistRepo::delete(&self.pool, &domain)
            .await
            .map_err(|e| CoreError::Internal(format!("delete blocklist entry: {e}")))?;
        self.reload().await?;
        Ok(())
    }

    /// Hot-path membership check. Unparseable names are never blocked.
    pub fn is_blocked(&self, name: &str) -> bool {
        let Ok(domain) = normalize_domain(name) else {
            return false;
        };
        let index = self.index.read().unwrap().clone();
        index.contains(&domain)
    }

    async fn reload(&self) -> Result<(), CoreError> {
        let domains = BlocklistRepo::all_domains(&self.pool)
            .await
            .map_err(|e| CoreError::Internal(format!("reload blocklist index: {e}")))?;
        *self.index.write().unwrap() = Arc::new(domains.into_iter().collect());
        Ok(())
    }
}
