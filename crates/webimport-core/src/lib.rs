#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Import-map aware module resolution and cache mapping for bundler plugins.
//!
//! This library resolves module specifiers through web-style import maps
//! (bare aliases and absolute URLs) and maps each resolved URL to a
//! deterministic local cache location, so a host bundler can load remote or
//! aliased modules that an external fetch/compile step has materialized on
//! disk.
//!
//! ## Pipeline
//!
//! 1. A specifier matching the resolution rule (an import-map alias or an
//!    `http(s)://` URL) is rewritten through the import-map algorithm and
//!    claimed into the plugin's private namespace.
//! 2. Relative imports discovered inside a claimed module resolve against
//!    the importing module's URL, bypassing the import map.
//! 3. Loading a claimed module reads the file at
//!    `<cache root>/<scheme>/<host>/<sha256(path + query)>` and infers the
//!    loader kind from the URL's extension.
//!
//! Fetching, compiling, and bundling are collaborator concerns: the
//! [`Materializer`] trait is the boundary to the fetch/compile step, and
//! [`BuildHooks`] is the seam to the host bundler's resolve/load protocol.
//!
//! ## Example
//!
//! ```ignore
//! use webimport_core::{ImportMapConfig, PluginOptions, WebImportPlugin, BuildHooks};
//!
//! let base_url = url::Url::parse("https://example.com/app/main.ts")?;
//! let import_map = ImportMapConfig::from_json(&base_url, r#"{
//!     "imports": { "i18n/": "https://example.com/i18n@1.1.0/" }
//! }"#)?;
//!
//! let plugin = std::sync::Arc::new(WebImportPlugin::new(PluginOptions {
//!     name: "webimport".to_string(),
//!     cache_root: webimport_core::default_cache_root(),
//!     base_url,
//!     import_map,
//! })?);
//!
//! let mut hooks = BuildHooks::new();
//! plugin.register(&mut hooks);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod loader;
pub mod plugin;
pub mod resolver;

pub use cache::{cache_path, default_cache_root, url_digest};
pub use config::ImportMapConfig;
pub use error::Error;
pub use loader::{Materializer, ModuleLoader, NoopMaterializer};
pub use plugin::{
    BuildHooks, LoadArgs, LoaderKind, MatchRule, ModuleSource, Resolution, ResolveArgs,
};
pub use resolver::{PluginOptions, WebImportPlugin};
