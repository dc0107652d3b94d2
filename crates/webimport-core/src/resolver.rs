//! Import-map resolution plugin.
//!
//! [`WebImportPlugin`] is the coordinator for a two-pass resolution
//! protocol:
//!
//! 1. **Bare/URL pass** — a specifier in the host's default namespace that
//!    matches the resolution rule (an `http(s)://` prefix or a top-level
//!    import-map alias) is resolved through the import-map algorithm
//!    against the base URL and claimed into this plugin's namespace.
//! 2. **Relative pass** — a specifier encountered inside an
//!    already-claimed module resolves relative to its importer's URL; the
//!    import map is not consulted again, it was applied when the importer
//!    itself was resolved.
//!
//! Keeping claimed modules in a private namespace stops the host's default
//! filesystem resolver from ever seeing URL-shaped paths.

use crate::config::ImportMapConfig;
use crate::error::Error;
use crate::loader::{Materializer, ModuleLoader, NoopMaterializer};
use crate::plugin::{BuildHooks, MatchRule, ModuleSource, Resolution};
use log::{debug, trace};
use regex_lite::Regex;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Construction parameters for [`WebImportPlugin`].
#[derive(Debug)]
pub struct PluginOptions {
    /// Plugin name, used as the namespace tag on every resolved module.
    pub name: String,
    /// Root directory of the local module cache.
    pub cache_root: PathBuf,
    /// URL identity of the entry module or config file; resolution base
    /// for bare specifiers and relative import-map targets.
    pub base_url: Url,
    /// The import map, already loaded.
    pub import_map: ImportMapConfig,
}

/// The resolution coordinator.
///
/// All state is captured at construction and immutable afterwards, so a
/// host may interleave resolve and load calls for distinct modules freely.
pub struct WebImportPlugin {
    name: String,
    base_url: Url,
    import_map: ImportMapConfig,
    rule: Regex,
    match_all: Regex,
    loader: ModuleLoader,
}

impl WebImportPlugin {
    /// Build a plugin from options, with a no-op materializer.
    pub fn new(options: PluginOptions) -> Result<Self, Error> {
        let rule = resolution_rule(&options.import_map)?;
        let match_all = Regex::new(".*").map_err(|source| Error::Rule { source })?;
        trace!("resolution rule for '{}': {}", options.name, rule.as_str());

        Ok(Self {
            name: options.name,
            base_url: options.base_url,
            import_map: options.import_map,
            rule,
            match_all,
            loader: ModuleLoader::new(options.cache_root, Box::new(NoopMaterializer)),
        })
    }

    /// Replace the materialization collaborator.
    #[must_use]
    pub fn with_materializer(mut self, materializer: Box<dyn Materializer>) -> Self {
        let cache_root = self.loader.cache_root().to_path_buf();
        self.loader = ModuleLoader::new(cache_root, materializer);
        self
    }

    /// Plugin name, also the namespace tag.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pattern gating pass-1 resolution.
    #[must_use]
    pub fn rule(&self) -> &Regex {
        &self.rule
    }

    /// Pass 1: resolve a bare or absolute-URL specifier through the import
    /// map against the base URL.
    ///
    /// An absolute `http(s)://` URL with no matching alias resolves to
    /// itself; either way the result is claimed into this plugin's
    /// namespace. Alias precedence (longest prefix wins) belongs entirely
    /// to the import-map algorithm.
    pub fn resolve_specifier(&self, specifier: &str) -> Result<Resolution, Error> {
        let url = self.import_map.resolve(specifier, &self.base_url)?;
        debug!("resolved '{specifier}' -> {url}");

        Ok(Resolution {
            path: url.to_string(),
            namespace: Some(self.name.clone()),
        })
    }

    /// Pass 2: resolve a specifier found inside an already-claimed module,
    /// relative to the importing module's URL.
    pub fn resolve_relative(&self, specifier: &str, importer: &str) -> Result<Resolution, Error> {
        let importer_url = Url::parse(importer).map_err(|source| Error::InvalidImporter {
            importer: importer.to_string(),
            source,
        })?;
        let url = importer_url
            .join(specifier)
            .map_err(|source| Error::InvalidRelative {
                specifier: specifier.to_string(),
                importer: importer.to_string(),
                source,
            })?;
        debug!("resolved '{specifier}' against {importer} -> {url}");

        Ok(Resolution {
            path: url.to_string(),
            namespace: Some(self.name.clone()),
        })
    }

    /// Load a previously resolved module by its path string.
    pub fn load_module(&self, path: &str) -> Result<ModuleSource, Error> {
        let url = Url::parse(path).map_err(|source| Error::InvalidModuleUrl {
            url: path.to_string(),
            source,
        })?;
        self.loader.load(&url)
    }

    /// Register this plugin's hooks with the host.
    ///
    /// Exactly three hooks: pass-1 resolution for the default namespace,
    /// pass-2 resolution for everything already in this plugin's
    /// namespace, and a load hook for the same.
    pub fn register(self: &Arc<Self>, hooks: &mut BuildHooks) {
        let pass1 = Arc::clone(self);
        hooks.on_resolve(MatchRule::new(self.rule.clone()), move |args| {
            pass1.resolve_specifier(args.path)
        });

        let pass2 = Arc::clone(self);
        hooks.on_resolve(
            MatchRule::in_namespace(self.match_all.clone(), self.name.clone()),
            move |args| pass2.resolve_relative(args.path, args.importer.unwrap_or_default()),
        );

        let load = Arc::clone(self);
        hooks.on_load(
            MatchRule::in_namespace(self.match_all.clone(), self.name.clone()),
            move |args| load.load_module(args.path),
        );
    }
}

impl std::fmt::Debug for WebImportPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebImportPlugin")
            .field("name", &self.name)
            .field("base_url", &self.base_url.as_str())
            .field("rule", &self.rule.as_str())
            .finish_non_exhaustive()
    }
}

/// Build the pass-1 matching pattern: the `http(s)` scheme prefix plus
/// every top-level alias key, each regex-escaped. Computed once at
/// construction and never mutated.
fn resolution_rule(import_map: &ImportMapConfig) -> Result<Regex, Error> {
    let mut alternatives = vec!["https?://".to_string()];
    alternatives.extend(
        import_map
            .alias_keys()
            .iter()
            .map(|key| regex_lite::escape(key)),
    );

    Regex::new(&format!("^({})", alternatives.join("|")))
        .map_err(|source| Error::Rule { source })
}
