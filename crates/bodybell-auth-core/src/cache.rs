//! Session cache
//!
//! Short-lived memoization of token -> principal and email -> admin flag.
//! Expiry and capacity are enforced by moka, so stale entries are dropped
//! rather than accumulating for the life of the process.

use std::time::Duration;

use bodybell_types::Principal;
use moka::future::Cache;
use sha2::{Digest, Sha256};

use crate::config::DEFAULT_SESSION_TTL;

/// Hash a bearer token for use as a cache key (SHA-256, hex)
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Clone)]
pub struct SessionCache {
    /// sha256(token) -> principal
    principals: Cache<String, Principal>,
    /// email -> admin flag
    admin_flags: Cache<String, bool>,
    ttl: Duration,
}

impl SessionCache {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        Self {
            principals: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(max_entries)
                .build(),
            admin_flags: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(max_entries)
                .build(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn principal(&self, token: &str) -> Option<Principal> {
        let hit = self.principals.get(&hash_token(token)).await;
        record("principal", hit.is_some());
        hit
    }

    pub async fn put_principal(&self, token: &str, principal: Principal) {
        self.principals.insert(hash_token(token), principal).await;
    }

    pub async fn admin_flag(&self, email: &str) -> Option<bool> {
        let hit = self.admin_flags.get(email).await;
        record("admin", hit.is_some());
        hit
    }

    pub async fn put_admin_flag(&self, email: &str, is_admin: bool) {
        self.admin_flags.insert(email.to_string(), is_admin).await;
    }

    /// Forget the principal cached for a token
    pub async fn invalidate_token(&self, token: &str) {
        self.principals.invalidate(&hash_token(token)).await;
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL, 10_000)
    }
}

fn record(cache: &'static str, hit: bool) {
    if hit {
        metrics::counter!("label_auth_cache_hits", "cache" => cache).increment(1);
    } else {
        metrics::counter!("label_auth_cache_misses", "cache" => cache).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token() {
        let hash1 = hash_token("session_token");
        let hash2 = hash_token("session_token");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert_ne!(hash1, hash_token("other_token"));
    }

    #[tokio::test]
    async fn test_principal_round_trip_and_invalidate() {
        let cache = SessionCache::default();
        assert!(cache.principal("tok").await.is_none());

        cache
            .put_principal("tok", Principal::new("ben@bodybell.example"))
            .await;
        let cached = cache.principal("tok").await.unwrap();
        assert_eq!(cached.email, "ben@bodybell.example");

        cache.invalidate_token("tok").await;
        assert!(cache.principal("tok").await.is_none());
    }

    #[tokio::test]
    async fn test_admin_flags_are_keyed_by_email() {
        let cache = SessionCache::default();
        cache.put_admin_flag("a@x.io", true).await;
        cache.put_admin_flag("b@x.io", false).await;
        assert_eq!(cache.admin_flag("a@x.io").await, Some(true));
        assert_eq!(cache.admin_flag("b@x.io").await, Some(false));
        assert_eq!(cache.admin_flag("c@x.io").await, None);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = SessionCache::new(Duration::from_millis(50), 100);
        cache.put_principal("tok", Principal::new("a@x.io")).await;
        assert!(cache.principal("tok").await.is_some());

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(cache.principal("tok").await.is_none());
    }
}
