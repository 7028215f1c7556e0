//! Redirect/rewrite decision engine.
//!
//! # Responsibilities
//! - Turn a classified request (host, path, query) into exactly one action:
//!   forward unchanged, permanent redirect, or internal rewrite
//!
//! # Design Decisions
//! - Rules evaluate in strict, fixed order; first match terminates
//! - Casing normalization fires before every other rule, including the
//!   reserved-path check
//! - Reserved names are never promoted to a subdomain, even when a content
//!   row with that slug exists
//! - Promotions require a confirmed existence answer from the resolver;
//!   there are no speculative redirects
//! - Deterministic apart from cache/backend state: same input, same action

use std::sync::Arc;

use crate::routing::hostname::{EnvironmentMode, HostClassifier, HostContext};
use crate::routing::rules::{self, SlugClass};
use crate::store::ExistenceResolver;

/// Terminal routing action for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Pass the request through to the origin unchanged.
    Forward,
    /// Answer with a 301 to `location`.
    Redirect { location: String },
    /// Forward to the origin with the path replaced; not client-visible.
    Rewrite { path: String },
}

impl RouteAction {
    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            RouteAction::Forward => "forward",
            RouteAction::Redirect { .. } => "redirect",
            RouteAction::Rewrite { .. } => "rewrite",
        }
    }
}

/// The ordered rule machine of the edge router.
pub struct DecisionEngine {
    classifier: HostClassifier,
    mode: EnvironmentMode,
    resolver: Arc<ExistenceResolver>,
}

impl DecisionEngine {
    pub fn new(
        mode: EnvironmentMode,
        local_root: impl Into<String>,
        resolver: Arc<ExistenceResolver>,
    ) -> Self {
        Self {
            classifier: HostClassifier::new(mode, local_root),
            mode,
            resolver,
        }
    }

    /// Evaluate the rule chain for one request. `query` is the raw query
    /// string without the leading `?`.
    pub async fn decide(&self, host: &str, path: &str, query: Option<&str>) -> RouteAction {
        let ctx = self.classifier.classify(host);
        let scheme = self.mode.scheme();
        let suffix = query.map(|q| format!("?{q}")).unwrap_or_default();

        // Rule 1: casing normalization, before everything else.
        if path.chars().any(|c| c.is_ascii_uppercase()) {
            return RouteAction::Redirect {
                location: format!("{scheme}://{}{}{suffix}", ctx.host, path.to_lowercase()),
            };
        }

        // Rule 2: crawlers always get the robots file as served.
        if path == "/robots.txt" {
            return RouteAction::Forward;
        }

        // Rules 3 and 4: only the root domain serves a sitemap.
        if path == "/sitemap.xml" {
            if ctx.subdomain.is_some() {
                return RouteAction::Redirect {
                    location: format!("{scheme}://{}/sitemap.xml", ctx.root_domain),
                };
            }
            return RouteAction::Forward;
        }

        match &ctx.subdomain {
            None => self.decide_on_root(&ctx, scheme, path, &suffix).await,
            Some(subdomain) => decide_on_subdomain(subdomain, path),
        }
    }

    /// Rule 5: slug resolution for root-domain requests of the form
    /// `/app/<slug>...` or a single bare `/<slug>`.
    async fn decide_on_root(
        &self,
        ctx: &HostContext,
        scheme: &str,
        path: &str,
        suffix: &str,
    ) -> RouteAction {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let Some(&first) = segments.first() else {
            return RouteAction::Forward;
        };
        if rules::is_reserved_path(first) {
            return RouteAction::Forward;
        }
        if first == "blog" || first == "blogs" {
            return RouteAction::Forward;
        }

        let (slug, remainder) = if first == "app" {
            let Some(&slug) = segments.get(1) else {
                return RouteAction::Forward;
            };
            if rules::is_reserved_subdomain(slug) {
                return RouteAction::Forward;
            }
            let rest = path
                .strip_prefix("/app/")
                .and_then(|r| r.strip_prefix(slug))
                .unwrap_or("");
            (slug, if rest.is_empty() { "/" } else { rest })
        } else if segments.len() == 1 {
            match rules::classify_slug(first) {
                SlugClass::Reserved | SlugClass::LikelyBlogPost => return RouteAction::Forward,
                SlugClass::Candidate => {}
            }
            // Short bare slugs can still be posts; confirm before treating
            // the segment as an app/game candidate.
            if self.resolver.post_exists(first).await {
                return RouteAction::Forward;
            }
            (first, "/")
        } else {
            return RouteAction::Forward;
        };

        if self.resolver.app_or_game_exists(slug).await {
            return RouteAction::Redirect {
                location: format!(
                    "{scheme}://{slug}.{}{remainder}{suffix}",
                    ctx.root_domain
                ),
            };
        }

        RouteAction::Forward
    }
}

/// Rule 6: subdomain requests transparently serve the app detail routes.
fn decide_on_subdomain(subdomain: &str, path: &str) -> RouteAction {
    if rules::is_reserved_subdomain(subdomain) {
        return RouteAction::Forward;
    }
    RouteAction::Rewrite {
        path: format!("/app/{subdomain}{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::rest::{ContentStore, ContentTable, StoreError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FakeStore {
        rows: Vec<(ContentTable, &'static str)>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContentStore for FakeStore {
        async fn slug_exists(&self, table: ContentTable, slug: &str) -> Result<bool, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.iter().any(|(t, s)| *t == table && *s == slug))
        }
    }

    fn engine_with(rows: Vec<(ContentTable, &'static str)>) -> (DecisionEngine, Arc<FakeStore>) {
        let store = Arc::new(FakeStore {
            rows,
            calls: AtomicUsize::new(0),
        });
        let resolver = Arc::new(ExistenceResolver::new(
            store.clone(),
            Duration::from_secs(3600),
        ));
        (
            DecisionEngine::new(EnvironmentMode::Production, "localhost:3000", resolver),
            store,
        )
    }

    fn catalog() -> (DecisionEngine, Arc<FakeStore>) {
        engine_with(vec![
            (ContentTable::Apps, "example-game-mod-apk"),
            (ContentTable::Games, "tetris"),
            (ContentTable::Posts, "release-notes"),
        ])
    }

    #[tokio::test]
    async fn app_path_promotes_to_subdomain() {
        let (engine, _) = catalog();
        let action = engine
            .decide("installmod.com", "/app/example-game-mod-apk", None)
            .await;
        assert_eq!(
            action,
            RouteAction::Redirect {
                location: "https://example-game-mod-apk.installmod.com/".into()
            }
        );
    }

    #[tokio::test]
    async fn app_path_keeps_remaining_path_and_query() {
        let (engine, _) = catalog();
        let action = engine
            .decide(
                "installmod.com",
                "/app/example-game-mod-apk/screenshots",
                Some("page=2"),
            )
            .await;
        assert_eq!(
            action,
            RouteAction::Redirect {
                location: "https://example-game-mod-apk.installmod.com/screenshots?page=2".into()
            }
        );
    }

    #[tokio::test]
    async fn bare_slug_promotes_when_confirmed() {
        let (engine, _) = catalog();
        let action = engine.decide("installmod.com", "/tetris", None).await;
        assert_eq!(
            action,
            RouteAction::Redirect {
                location: "https://tetris.installmod.com/".into()
            }
        );
    }

    #[tokio::test]
    async fn unconfirmed_slug_is_not_promoted() {
        let (engine, _) = engine_with(vec![]);
        let action = engine.decide("installmod.com", "/unknown-app", None).await;
        assert_eq!(action, RouteAction::Forward);
    }

    #[tokio::test]
    async fn existing_post_passes_through() {
        let (engine, _) = catalog();
        let action = engine.decide("installmod.com", "/release-notes", None).await;
        assert_eq!(action, RouteAction::Forward);
    }

    #[tokio::test]
    async fn uppercase_redirects_before_any_other_rule() {
        let (engine, store) = catalog();
        // Reserved path, but the case rule fires first.
        let action = engine
            .decide("installmod.com", "/ADMIN/Settings", None)
            .await;
        assert_eq!(
            action,
            RouteAction::Redirect {
                location: "https://installmod.com/admin/settings".into()
            }
        );
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lowercase_path_does_not_trigger_case_rule() {
        let (engine, _) = catalog();
        let action = engine.decide("installmod.com", "/admin/settings", None).await;
        assert_eq!(action, RouteAction::Forward);
    }

    #[tokio::test]
    async fn uppercase_redirect_preserves_query() {
        let (engine, _) = catalog();
        let action = engine
            .decide("installmod.com", "/Search", Some("q=Tetris"))
            .await;
        assert_eq!(
            action,
            RouteAction::Redirect {
                location: "https://installmod.com/search?q=Tetris".into()
            }
        );
    }

    #[tokio::test]
    async fn robots_passes_through_everywhere() {
        let (engine, _) = catalog();
        assert_eq!(
            engine.decide("installmod.com", "/robots.txt", None).await,
            RouteAction::Forward
        );
        assert_eq!(
            engine.decide("sub.installmod.com", "/robots.txt", None).await,
            RouteAction::Forward
        );
    }

    #[tokio::test]
    async fn sitemap_redirects_to_root_from_subdomain() {
        let (engine, _) = catalog();
        let action = engine.decide("sub.installmod.com", "/sitemap.xml", None).await;
        assert_eq!(
            action,
            RouteAction::Redirect {
                location: "https://installmod.com/sitemap.xml".into()
            }
        );
        assert_eq!(
            engine.decide("installmod.com", "/sitemap.xml", None).await,
            RouteAction::Forward
        );
    }

    #[tokio::test]
    async fn blog_heuristic_short_circuits_without_backend_calls() {
        let (engine, store) = catalog();
        let action = engine
            .decide(
                "installmod.com",
                "/how-to-fix-app-not-installed-error-on-android",
                None,
            )
            .await;
        assert_eq!(action, RouteAction::Forward);
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reserved_slug_is_never_promoted() {
        // Even with a content row named "admin", reserved wins.
        let (engine, store) = engine_with(vec![(ContentTable::Apps, "admin")]);
        assert_eq!(
            engine.decide("installmod.com", "/admin", None).await,
            RouteAction::Forward
        );
        assert_eq!(
            engine.decide("installmod.com", "/app/admin", None).await,
            RouteAction::Forward
        );
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blog_prefix_passes_through() {
        let (engine, _) = catalog();
        assert_eq!(
            engine.decide("installmod.com", "/blog/some-post", None).await,
            RouteAction::Forward
        );
        assert_eq!(
            engine.decide("installmod.com", "/blogs", None).await,
            RouteAction::Forward
        );
    }

    #[tokio::test]
    async fn subdomain_rewrites_to_app_path() {
        let (engine, _) = catalog();
        let action = engine
            .decide("example-game-mod-apk.installmod.com", "/screenshots", None)
            .await;
        assert_eq!(
            action,
            RouteAction::Rewrite {
                path: "/app/example-game-mod-apk/screenshots".into()
            }
        );
    }

    #[tokio::test]
    async fn subdomain_root_rewrites_to_app_detail() {
        let (engine, _) = catalog();
        let action = engine
            .decide("example-game-mod-apk.installmod.com", "/", None)
            .await;
        assert_eq!(
            action,
            RouteAction::Rewrite {
                path: "/app/example-game-mod-apk/".into()
            }
        );
    }

    #[tokio::test]
    async fn reserved_subdomain_is_not_rewritten() {
        let (engine, _) = catalog();
        let action = engine.decide("admin.installmod.com", "/users", None).await;
        assert_eq!(action, RouteAction::Forward);
    }

    #[tokio::test]
    async fn multi_segment_bare_path_passes_through() {
        let (engine, _) = catalog();
        let action = engine.decide("installmod.com", "/tetris/extras", None).await;
        assert_eq!(action, RouteAction::Forward);
    }

    #[tokio::test]
    async fn root_path_passes_through() {
        let (engine, _) = catalog();
        assert_eq!(
            engine.decide("installmod.com", "/", None).await,
            RouteAction::Forward
        );
    }

    #[tokio::test]
    async fn www_host_promotes_onto_root_domain() {
        let (engine, _) = catalog();
        let action = engine.decide("www.installmod.com", "/tetris", None).await;
        assert_eq!(
            action,
            RouteAction::Redirect {
                location: "https://tetris.installmod.com/".into()
            }
        );
    }
}
