//! Static rule tables and slug classification.
//!
//! # Responsibilities
//! - Reserved subdomain/segment names that must never be treated as content
//! - Reserved top-level paths (well-known files)
//! - Blog-likelihood heuristics over a slug string
//!
//! # Design Decisions
//! - Tables are compile-time constants, immutable for the process lifetime
//! - Heuristics run before any backend lookup (cost/precision trade-off);
//!   keep the ordering inside `classify_slug` so callers cannot reorder it
//! - Any single matching heuristic classifies a slug as a likely blog post

/// Names that are never interpreted as a content slug, whether they appear
/// as a subdomain label or as the first path segment.
pub const RESERVED_SUBDOMAINS: &[&str] = &[
    "admin",
    "api",
    "app",
    "apps",
    "auth",
    "blog",
    "blogs",
    "category",
    "cdn",
    "dashboard",
    "games",
    "login",
    "mail",
    "publisher",
    "search",
    "static",
    "tag",
    "www",
];

/// Well-known non-content top-level paths, matched against the first
/// path segment.
pub const RESERVED_PATHS: &[&str] = &[
    "robots.txt",
    "sitemap.xml",
    "favicon.ico",
    "ads.txt",
];

/// Keywords that mark a slug as editorial content. Anchored with hyphens
/// where a bare substring would be ambiguous (`vs` appears inside ordinary
/// words, `how-to` does not).
const BLOG_KEYWORDS: &[&str] = &[
    "how-to",
    "what-is",
    "guide",
    "tips",
    "review",
    "tutorial",
    "-vs-",
    "best-",
    "top-",
];

/// Classification of a slug candidate, in decision order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugClass {
    /// Reserved name; never content, takes absolute precedence.
    Reserved,
    /// Matches a blog heuristic; handled by blog routing without a lookup.
    LikelyBlogPost,
    /// Possibly an app/game slug; requires backend confirmation.
    Candidate,
}

pub fn is_reserved_subdomain(name: &str) -> bool {
    RESERVED_SUBDOMAINS.contains(&name)
}

pub fn is_reserved_path(segment: &str) -> bool {
    RESERVED_PATHS.contains(&segment)
}

/// True if any blog-likelihood heuristic matches.
///
/// Heuristics: more than 5 hyphens, longer than 40 characters, or presence
/// of an editorial keyword. This is an approximation and can misclassify;
/// it exists to skip a backend round-trip for obviously-editorial slugs.
pub fn likely_blog_post(slug: &str) -> bool {
    slug.matches('-').count() > 5
        || slug.len() > 40
        || BLOG_KEYWORDS.iter().any(|kw| slug.contains(kw))
}

/// Ordered, short-circuiting slug classification.
pub fn classify_slug(slug: &str) -> SlugClass {
    if is_reserved_subdomain(slug) {
        SlugClass::Reserved
    } else if likely_blog_post(slug) {
        SlugClass::LikelyBlogPost
    } else {
        SlugClass::Candidate
    }
}
