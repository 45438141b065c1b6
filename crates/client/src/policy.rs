//! Per-request cache opt-in policy.
//!
//! The decision is deliberately coarse: the `cache: true` pair the
//! application attaches, or any non-empty `Cache-Control` value, opts the
//! request in. Cache-Control directives are never parsed, so even
//! `Cache-Control: no-store` opts in.

use crate::headers::Headers;

/// Name of the custom opt-in header.
pub const CACHE: &str = "cache";

/// Standard cache-control header name.
pub const CACHE_CONTROL: &str = "Cache-Control";

/// Ready-made header pairs an application can attach to opt a request in.
pub mod presets {
    /// The custom opt-in pair.
    pub const NORMAL: (&str, &str) = ("cache", "true");
    /// Client-side caching only.
    pub const PRIVATE: (&str, &str) = ("Cache-Control", "private");
    /// Client and proxy caching.
    pub const PUBLIC: (&str, &str) = ("Cache-Control", "public");
    /// Revalidate against the origin before reuse.
    pub const NO_CACHE: (&str, &str) = ("Cache-Control", "no-cache");
    /// Store nothing. Still opts in here: only header presence is checked.
    pub const NO_STORE: (&str, &str) = ("Cache-Control", "no-store");

    /// Expire after `seconds`.
    pub fn max_age(seconds: u64) -> (&'static str, String) {
        ("Cache-Control", format!("max-age={seconds}"))
    }
}

/// Decide whether the interceptor should attempt caching for a request.
///
/// Returns `true` iff the `cache` header has the literal value `true`, or
/// `Cache-Control` is present with a non-empty value. Pure; no side
/// effects.
pub fn should_attempt_cache(headers: &Headers) -> bool {
    if headers.get(CACHE) == Some("true") {
        return true;
    }
    matches!(headers.get(CACHE_CONTROL), Some(value) if !value.is_empty())
}
