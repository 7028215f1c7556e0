//! Cached existence resolution.
//!
//! # Responsibilities
//! - Answer "is this slug a published blog post" and "is this slug a
//!   published app or game" without a backend round-trip on every request
//! - Apply the fail-open policy for backend errors
//!
//! # Design Decisions
//! - Two independent caches (posts, apps/games), each entry bound to the
//!   configured TTL; no invalidation on content mutation
//! - App table is queried before the game table; the game table is only
//!   consulted on a confirmed app miss
//! - Backend results are a tagged `Lookup`; `Failed` collapses to "not
//!   found" in exactly one match arm below, and is never cached, so the
//!   next request retries the backend
//! - No single-flight de-duplication: concurrent misses for the same slug
//!   may each query the backend; lookups are idempotent and read-only

use std::sync::Arc;
use std::time::Duration;

use crate::cache::ExistenceCache;
use crate::observability::metrics;
use crate::store::rest::{ContentStore, ContentTable};

/// Outcome of a single backend point lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Found,
    NotFound,
    Failed,
}

/// TTL-cached front for the content store's existence queries.
pub struct ExistenceResolver {
    store: Arc<dyn ContentStore>,
    posts: ExistenceCache,
    apps: ExistenceCache,
    ttl: Duration,
}

impl ExistenceResolver {
    pub fn new(store: Arc<dyn ContentStore>, ttl: Duration) -> Self {
        Self::with_caches(
            store,
            ttl,
            ExistenceCache::new("posts"),
            ExistenceCache::new("apps"),
        )
    }

    /// Inject caches directly; used by tests to control time.
    pub fn with_caches(
        store: Arc<dyn ContentStore>,
        ttl: Duration,
        posts: ExistenceCache,
        apps: ExistenceCache,
    ) -> Self {
        Self {
            store,
            posts,
            apps,
            ttl,
        }
    }

    /// Does `slug` name a published blog post?
    pub async fn post_exists(&self, slug: &str) -> bool {
        self.resolve(&self.posts, &[ContentTable::Posts], slug).await
    }

    /// Does `slug` name a published app or game?
    pub async fn app_or_game_exists(&self, slug: &str) -> bool {
        self.resolve(&self.apps, &[ContentTable::Apps, ContentTable::Games], slug)
            .await
    }

    async fn resolve(&self, cache: &ExistenceCache, tables: &[ContentTable], slug: &str) -> bool {
        if let Some(found) = cache.get(slug) {
            return found;
        }

        for &table in tables {
            match self.lookup(table, slug).await {
                Lookup::Found => {
                    cache.set(slug, true, self.ttl);
                    return true;
                }
                Lookup::NotFound => continue,
                // Fail open: an unreachable backend means "not found" for
                // this request only. The result is not cached.
                Lookup::Failed => return false,
            }
        }

        cache.set(slug, false, self.ttl);
        false
    }

    async fn lookup(&self, table: ContentTable, slug: &str) -> Lookup {
        match self.store.slug_exists(table, slug).await {
            Ok(true) => Lookup::Found,
            Ok(false) => Lookup::NotFound,
            Err(e) => {
                tracing::warn!(
                    table = table.kind(),
                    slug = slug,
                    error = %e,
                    "Content lookup failed; treating slug as not found"
                );
                metrics::record_store_error(table.kind());
                Lookup::Failed
            }
        }
    }
}
