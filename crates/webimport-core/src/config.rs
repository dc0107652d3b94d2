//! Import-map configuration.
//!
//! Wraps the `import_map` crate's compliant resolution algorithm
//! (longest-prefix match, trailing-slash expansion, scope override) behind
//! a small loading and querying surface. The algorithm itself is consumed,
//! not reimplemented.

use crate::error::Error;
use import_map::ImportMap;
use serde_json::Value;
use std::path::Path;
use url::Url;

/// A parsed import map together with the raw JSON it came from.
///
/// The raw value is kept so the top-level alias keys can be listed when the
/// resolution rule is built; the parsed map drives actual resolution.
/// Immutable once constructed.
pub struct ImportMapConfig {
    raw: Value,
    inner: ImportMap,
}

impl ImportMapConfig {
    /// Build from an already-parsed JSON value.
    ///
    /// Relative target URLs in the map are resolved against `base_url`.
    /// A structurally invalid map is a construction-time error.
    pub fn from_value(base_url: &Url, value: Value) -> Result<Self, Error> {
        let parsed = import_map::parse_from_value(base_url.clone(), value.clone())
            .map_err(|source| Error::ImportMapInvalid { source })?;
        Ok(Self {
            raw: value,
            inner: parsed.import_map,
        })
    }

    /// Build from JSON text.
    pub fn from_json(base_url: &Url, json: &str) -> Result<Self, Error> {
        let value: Value =
            serde_json::from_str(json).map_err(|source| Error::ImportMapParse { source })?;
        Self::from_value(base_url, value)
    }

    /// Build from a JSON file on disk.
    pub fn from_file(base_url: &Url, path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::ImportMapRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(base_url, &json)
    }

    /// Top-level `imports` alias keys.
    ///
    /// Key order is irrelevant to matching: the keys only gate which
    /// specifiers enter resolution at all, and precedence among overlapping
    /// aliases belongs to the resolution algorithm. Scoped keys do not
    /// participate; the scope override is applied by the algorithm itself.
    #[must_use]
    pub fn alias_keys(&self) -> Vec<String> {
        self.raw
            .get("imports")
            .and_then(Value::as_object)
            .map(|imports| imports.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Resolve a specifier against the import map.
    ///
    /// An absolute URL with no matching alias resolves to itself. A bare
    /// specifier with no matching alias is an error: the caller performs no
    /// fallback, so an unresolved specifier is fatal for that module.
    pub fn resolve(&self, specifier: &str, referrer: &Url) -> Result<Url, Error> {
        self.inner
            .resolve(specifier, referrer)
            .map_err(|source| Error::UnresolvableSpecifier {
                specifier: specifier.to_string(),
                source,
            })
    }
}

impl std::fmt::Debug for ImportMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportMapConfig")
            .field("aliases", &self.alias_keys())
            .finish_non_exhaustive()
    }
}
