use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::MultiSeasonResult;

#[derive(Debug, Clone)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        let now = Utc::now();
        (now - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            let remaining_mins = minutes % 60;
            if remaining_mins >= 30 {
                // Round up: 1h 30m+ becomes 2h
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            let remaining_hours = (minutes % 1440) / 60;
            if remaining_hours >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }

    pub fn is_stale(&self, ttl_minutes: i64) -> bool {
        self.age_minutes() >= ttl_minutes
    }
}

/// Holds the latest multi-season result for one refresh cycle.
///
/// Readers share the result through an `Arc`; it is never mutated. Once the
/// entry is older than the TTL the next caller recomputes it while any
/// concurrent callers wait for that same computation.
pub struct StandingsCache {
    ttl_minutes: i64,
    entry: Mutex<Option<CachedData<Arc<MultiSeasonResult>>>>,
}

impl StandingsCache {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            ttl_minutes,
            entry: Mutex::new(None),
        }
    }

    /// The cached result if it is still fresh
    pub async fn get(&self) -> Option<Arc<MultiSeasonResult>> {
        let entry = self.entry.lock().await;
        entry
            .as_ref()
            .filter(|cached| !cached.is_stale(self.ttl_minutes))
            .map(|cached| Arc::clone(&cached.data))
    }

    /// Return the cached result, recomputing it with `refresh` when missing
    /// or stale.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Arc<MultiSeasonResult>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = MultiSeasonResult>,
    {
        let mut entry = self.entry.lock().await;
        if let Some(cached) = entry.as_ref() {
            if !cached.is_stale(self.ttl_minutes) {
                debug!(age = %cached.age_display(), "Standings cache hit");
                return Arc::clone(&cached.data);
            }
        }

        info!("Standings cache stale, recomputing");
        let fresh = Arc::new(refresh().await);
        *entry = Some(CachedData::new(Arc::clone(&fresh)));
        fresh
    }

    /// Drop the cached result so the next call recomputes
    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }

    pub async fn age_display(&self) -> String {
        self.entry
            .lock()
            .await
            .as_ref()
            .map(|cached| cached.age_display())
            .unwrap_or_else(|| "never".to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Duration;

    fn empty_result() -> MultiSeasonResult {
        MultiSeasonResult {
            seasons: BTreeMap::new(),
            team_colors: BTreeMap::new(),
            failed: BTreeMap::new(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_cached_data_age_display() {
        let mut cached = CachedData::new(vec![1, 2, 3]);
        assert_eq!(cached.age_display(), "just now");

        cached.cached_at = Utc::now() - Duration::minutes(95);
        assert_eq!(cached.age_display(), "2h ago");

        cached.cached_at = Utc::now() - Duration::hours(26);
        assert_eq!(cached.age_display(), "1d ago");
    }

    #[test]
    fn test_cached_data_is_stale() {
        let fresh = CachedData::new(vec![1]);
        assert!(!fresh.is_stale(720));

        let mut old = CachedData::new(vec![1]);
        old.cached_at = Utc::now() - Duration::minutes(721);
        assert!(old.is_stale(720));
    }

    #[tokio::test]
    async fn test_refresh_runs_once_while_fresh() {
        let cache = StandingsCache::new(720);
        let calls = &AtomicUsize::new(0);

        for _ in 0..3 {
            cache
                .get_or_refresh(move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    empty_result()
                })
                .await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.get().await.is_some());
    }

    #[tokio::test]
    async fn test_invalidate_forces_recompute() {
        let cache = StandingsCache::new(720);
        let calls = &AtomicUsize::new(0);
        let refresh = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            empty_result()
        };

        cache.get_or_refresh(refresh).await;
        cache.invalidate().await;
        assert!(cache.get().await.is_none());
        assert_eq!(cache.age_display().await, "never");

        cache.get_or_refresh(refresh).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_recomputes() {
        let cache = StandingsCache::new(0);
        let calls = &AtomicUsize::new(0);
        for _ in 0..2 {
            cache
                .get_or_refresh(move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    empty_result()
                })
                .await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
