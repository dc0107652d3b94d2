use std::path::PathBuf;
use thiserror::Error;

/// Core error type for webimport operations.
///
/// Every failure propagates to the host build unchanged; there are no
/// retries, no fallbacks, and no partial results at this layer.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read import map at {path}: {source}")]
    ImportMapRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse import map: {source}")]
    ImportMapParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid import map: {source}")]
    ImportMapInvalid {
        #[source]
        source: import_map::ImportMapError,
    },

    #[error("Cannot resolve '{specifier}': {source}")]
    UnresolvableSpecifier {
        specifier: String,
        #[source]
        source: import_map::ImportMapError,
    },

    #[error("Invalid importer URL '{importer}': {source}")]
    InvalidImporter {
        importer: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Cannot resolve '{specifier}' against '{importer}': {source}")]
    InvalidRelative {
        specifier: String,
        importer: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid module URL '{url}': {source}")]
    InvalidModuleUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to materialize {url}: {source}")]
    Materialize {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to read cached module at {path}: {source}")]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid resolution pattern: {source}")]
    Rule {
        #[source]
        source: regex_lite::Error,
    },
}
