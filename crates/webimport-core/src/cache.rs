//! URL to cache-path mapping.
//!
//! The relationship between a resolved URL and its on-disk artifact is a
//! pure function of the URL and the cache root: no index, no metadata
//! sidecar. Cache files live at `<root>/<scheme>/<host>/<sha256-digest>`
//! with no extension, so an external fetch/compile step can write once and
//! this library can read many times.

use std::path::{Path, PathBuf};
use url::Url;
use webimport_util::fs::absolutize;
use webimport_util::hash::sha256_hex_str;

/// Content-address for a URL: SHA-256 hex digest of its path and query.
///
/// The query is appended behind a `?` only when non-empty; fragment, scheme,
/// and host are excluded. Callers that need to disambiguate across hosts
/// fold scheme and host into the surrounding directory layout instead
/// (see [`cache_path`]).
#[must_use]
pub fn url_digest(url: &Url) -> String {
    let formatted = match url.query() {
        Some(query) if !query.is_empty() => format!("{}?{query}", url.path()),
        _ => url.path().to_string(),
    };
    sha256_hex_str(&formatted)
}

/// Map a resolved URL to its local cache file path.
///
/// Composes `cache_root / scheme / host / digest` and lexically normalizes
/// the result into an absolute path. Deterministic and idempotent; whether
/// a file exists there is the loader's concern, not this function's.
#[must_use]
pub fn cache_path(url: &Url, cache_root: &Path) -> PathBuf {
    let mut path = cache_root.to_path_buf();
    path.push(url.scheme());
    path.push(url.host_str().unwrap_or_default());
    path.push(url_digest(url));
    absolutize(&path)
}

/// Platform-appropriate default cache root.
///
/// - Linux: `$XDG_CACHE_HOME/webimport` or `~/.cache/webimport`
/// - macOS: `~/Library/Caches/webimport`
/// - Windows: `%LOCALAPPDATA%\webimport`
///
/// Falls back to `.webimport-cache` in the working directory when no
/// platform cache directory can be determined.
#[must_use]
pub fn default_cache_root() -> PathBuf {
    dirs_next::cache_dir().map_or_else(
        || PathBuf::from(".webimport-cache"),
        |p| p.join("webimport"),
    )
}
