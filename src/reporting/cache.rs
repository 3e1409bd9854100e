use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::domain::employee::Employee;
use crate::domain::repositories::RepositoryError;

/// Production TTL for cached result sets.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

struct CacheEntry {
    employees: Vec<Employee>,
    expires_at: Instant,
}

/// Process-local cache-aside store for search result sets.
///
/// Entries use a sliding expiration: every hit within the window extends
/// the window by the full TTL. The cache is auxiliary and lossy; losing
/// its contents only causes reloads, never incorrect results. Access is
/// atomic per key and independent across keys.
pub struct QueryCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached result set for `key`, or invokes `loader`, stores
    /// its result under `key`, and returns it. The boolean reports whether
    /// the result came from the cache.
    ///
    /// The internal lock is never held across the loader await; two
    /// concurrent misses on the same key may both load, with the later
    /// insert winning.
    pub async fn get_or_load<F, Fut>(
        &self,
        key: &str,
        loader: F,
    ) -> Result<(Vec<Employee>, bool), RepositoryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Employee>, RepositoryError>>,
    {
        let now = Instant::now();
        {
            let mut entries = self.entries.write().await;
            if let Some(entry) = entries.get_mut(key) {
                if now < entry.expires_at {
                    entry.expires_at = now + self.ttl;
                    tracing::debug!(key, "query cache hit");
                    return Ok((entry.employees.clone(), true));
                }
                entries.remove(key);
            }
        }

        tracing::debug!(key, "query cache miss, loading");
        let employees = loader().await?;

        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                employees: employees.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok((employees, false))
    }
}
