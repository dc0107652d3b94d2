//! Module loading from the local cache.
//!
//! Loading a resolved URL is a two-step sequence: ask the materialization
//! collaborator to ensure the cached artifact exists, then read the text at
//! the mapped cache path. The fetch/compile step itself lives outside this
//! library; [`Materializer::materialize`] returning `Ok` is the completion
//! signal that the artifact is on disk.

use crate::cache::cache_path;
use crate::error::Error;
use crate::plugin::{LoaderKind, ModuleSource};
use log::debug;
use std::path::{Path, PathBuf};
use url::Url;

/// External fetch/compile collaborator.
///
/// Implementations download, transpile, or otherwise produce the cached
/// artifact for a URL at [`cache_path`]`(url, root)`. A failure propagates
/// uncaught and is fatal for that module's build.
pub trait Materializer: Send + Sync {
    fn materialize(&self, url: &Url, cache_root: &Path) -> Result<(), Error>;
}

/// Materializer for hosts that populate the cache out of band.
///
/// Assumes every artifact is already on disk; loading a URL that was never
/// materialized surfaces as a cache-read error.
#[derive(Debug, Default)]
pub struct NoopMaterializer;

impl Materializer for NoopMaterializer {
    fn materialize(&self, _url: &Url, _cache_root: &Path) -> Result<(), Error> {
        Ok(())
    }
}

/// Reads resolved modules out of the local cache.
pub struct ModuleLoader {
    cache_root: PathBuf,
    materializer: Box<dyn Materializer>,
}

impl ModuleLoader {
    #[must_use]
    pub fn new(cache_root: PathBuf, materializer: Box<dyn Materializer>) -> Self {
        Self {
            cache_root,
            materializer,
        }
    }

    /// The cache root this loader reads from.
    #[must_use]
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Materialize and read the module at `url`.
    ///
    /// The loader kind is inferred from the URL's extension, not from the
    /// cache file (cache files carry no extension). Contents are exactly
    /// the bytes found at the mapped path, decoded as UTF-8 text; a missing
    /// or unreadable file is an error, never empty output.
    pub fn load(&self, url: &Url) -> Result<ModuleSource, Error> {
        self.materializer.materialize(url, &self.cache_root)?;

        let local = cache_path(url, &self.cache_root);
        let contents = std::fs::read_to_string(&local).map_err(|source| Error::CacheRead {
            path: local.clone(),
            source,
        })?;

        let loader = LoaderKind::from_url(url);
        debug!("loaded {url} from {} as {}", local.display(), loader.as_str());

        Ok(ModuleSource { loader, contents })
    }
}

impl std::fmt::Debug for ModuleLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleLoader")
            .field("cache_root", &self.cache_root)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Materializer that writes fixed contents to the mapped cache path.
    struct WritingMaterializer {
        contents: &'static str,
    }

    impl Materializer for WritingMaterializer {
        fn materialize(&self, url: &Url, cache_root: &Path) -> Result<(), Error> {
            let path = cache_path(url, cache_root);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, self.contents).unwrap();
            Ok(())
        }
    }

    struct FailingMaterializer;

    impl Materializer for FailingMaterializer {
        fn materialize(&self, url: &Url, _cache_root: &Path) -> Result<(), Error> {
            Err(Error::Materialize {
                url: url.to_string(),
                source: "network unreachable".into(),
            })
        }
    }

    #[test]
    fn test_load_reads_materialized_module() {
        let dir = tempdir().unwrap();
        let loader = ModuleLoader::new(
            dir.path().to_path_buf(),
            Box::new(WritingMaterializer {
                contents: "export class Translator {}",
            }),
        );

        let url = Url::parse("https://example.com/i18n@1.1/src/translator.ts").unwrap();
        let source = loader.load(&url).unwrap();

        assert_eq!(source.loader, LoaderKind::Ts);
        assert_eq!(source.contents, "export class Translator {}");
    }

    #[test]
    fn test_load_infers_loader_from_url_not_cache_file() {
        let dir = tempdir().unwrap();
        let loader = ModuleLoader::new(
            dir.path().to_path_buf(),
            Box::new(WritingMaterializer { contents: "1" }),
        );

        // The cache file has no extension; the tsx kind comes from the URL.
        let url = Url::parse("https://example.com/app/view.tsx").unwrap();
        assert_eq!(loader.load(&url).unwrap().loader, LoaderKind::Tsx);
    }

    #[test]
    fn test_load_missing_cache_file() {
        let dir = tempdir().unwrap();
        let loader = ModuleLoader::new(dir.path().to_path_buf(), Box::new(NoopMaterializer));

        let url = Url::parse("https://example.com/never/materialized.ts").unwrap();
        let err = loader.load(&url).unwrap_err();
        assert!(matches!(err, Error::CacheRead { .. }));
    }

    #[test]
    fn test_materialize_failure_propagates() {
        let dir = tempdir().unwrap();
        let loader = ModuleLoader::new(dir.path().to_path_buf(), Box::new(FailingMaterializer));

        let url = Url::parse("https://example.com/mod.ts").unwrap();
        let err = loader.load(&url).unwrap_err();
        assert!(matches!(err, Error::Materialize { .. }));
    }
}
