//! Host plugin protocol.
//!
//! Bundler hosts drive this library through two hook kinds: resolve hooks,
//! called per unresolved specifier, and load hooks, called per resolved
//! module needing source text. Each hook is registered with a match rule
//! (filter pattern plus optional namespace); the host dispatches to the
//! first registered hook whose rule matches, in registration order.
//!
//! [`BuildHooks`] is both the registration surface a plugin populates and a
//! dispatcher a host (or a test) can call directly.

#![allow(clippy::type_complexity)]

use crate::error::Error;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Loader identifier telling the host how to parse a module's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoaderKind {
    /// Generic script loader; also the fallback for unrecognized extensions.
    #[default]
    Js,
    Ts,
    Tsx,
}

impl LoaderKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Ts => "ts",
            Self::Tsx => "tsx",
        }
    }

    /// Infer the loader kind from the final extension segment of a URL path.
    ///
    /// Recognizes `js`, `ts`, and `tsx`; anything else, including an absent
    /// extension, falls back to the generic script loader.
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        let ext = url
            .path()
            .rsplit('/')
            .next()
            .and_then(|segment| segment.rsplit_once('.'))
            .map(|(_, ext)| ext);

        match ext {
            Some("ts") => Self::Ts,
            Some("tsx") => Self::Tsx,
            _ => Self::Js,
        }
    }
}

/// Arguments to a resolve hook.
#[derive(Debug, Clone)]
pub struct ResolveArgs<'a> {
    /// The specifier as written in the import statement.
    pub path: &'a str,
    /// URL or path of the importing module, if any.
    pub importer: Option<&'a str>,
    /// Namespace the specifier was encountered in. `None` is the host's
    /// default namespace.
    pub namespace: Option<&'a str>,
}

/// Output of a resolve hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Fully resolved module path (an absolute URL for this plugin).
    pub path: String,
    /// Namespace claiming the module for subsequent resolve/load requests.
    pub namespace: Option<String>,
}

/// Arguments to a load hook.
#[derive(Debug, Clone)]
pub struct LoadArgs<'a> {
    /// The resolved module path.
    pub path: &'a str,
    /// Namespace the module was resolved into.
    pub namespace: Option<&'a str>,
}

/// Output of a load hook.
#[derive(Debug, Clone)]
pub struct ModuleSource {
    pub loader: LoaderKind,
    pub contents: String,
}

/// Filter a hook registers under.
///
/// A rule matches when the filter pattern matches the path and the
/// namespaces are equal; a rule without a namespace only matches requests
/// in the host's default namespace.
#[derive(Debug, Clone)]
pub struct MatchRule {
    pub filter: Regex,
    pub namespace: Option<String>,
}

impl MatchRule {
    #[must_use]
    pub fn new(filter: Regex) -> Self {
        Self {
            filter,
            namespace: None,
        }
    }

    #[must_use]
    pub fn in_namespace(filter: Regex, namespace: impl Into<String>) -> Self {
        Self {
            filter,
            namespace: Some(namespace.into()),
        }
    }

    #[must_use]
    pub fn matches(&self, path: &str, namespace: Option<&str>) -> bool {
        self.namespace.as_deref() == namespace && self.filter.is_match(path)
    }
}

type ResolveHandler = dyn Fn(&ResolveArgs) -> Result<Resolution, Error> + Send + Sync;
type LoadHandler = dyn Fn(&LoadArgs) -> Result<ModuleSource, Error> + Send + Sync;

struct ResolveHook {
    rule: MatchRule,
    handler: Box<ResolveHandler>,
}

struct LoadHook {
    rule: MatchRule,
    handler: Box<LoadHandler>,
}

/// Hook registry and dispatcher.
///
/// Hooks run in registration order; the first whose rule matches handles
/// the request. An unmatched request returns `Ok(None)`, leaving it to the
/// host's default resolution. Handler errors propagate unchanged.
#[derive(Default)]
pub struct BuildHooks {
    resolvers: Vec<ResolveHook>,
    loaders: Vec<LoadHook>,
}

impl BuildHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolve hook.
    pub fn on_resolve<F>(&mut self, rule: MatchRule, handler: F)
    where
        F: Fn(&ResolveArgs) -> Result<Resolution, Error> + Send + Sync + 'static,
    {
        self.resolvers.push(ResolveHook {
            rule,
            handler: Box::new(handler),
        });
    }

    /// Register a load hook.
    pub fn on_load<F>(&mut self, rule: MatchRule, handler: F)
    where
        F: Fn(&LoadArgs) -> Result<ModuleSource, Error> + Send + Sync + 'static,
    {
        self.loaders.push(LoadHook {
            rule,
            handler: Box::new(handler),
        });
    }

    /// Dispatch a resolve request to the first matching hook.
    pub fn resolve(&self, args: &ResolveArgs) -> Result<Option<Resolution>, Error> {
        for hook in &self.resolvers {
            if hook.rule.matches(args.path, args.namespace) {
                return (hook.handler)(args).map(Some);
            }
        }
        Ok(None)
    }

    /// Dispatch a load request to the first matching hook.
    pub fn load(&self, args: &LoadArgs) -> Result<Option<ModuleSource>, Error> {
        for hook in &self.loaders {
            if hook.rule.matches(args.path, args.namespace) {
                return (hook.handler)(args).map(Some);
            }
        }
        Ok(None)
    }

    /// Number of registered resolve hooks.
    #[must_use]
    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }

    /// Number of registered load hooks.
    #[must_use]
    pub fn loader_count(&self) -> usize {
        self.loaders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_kind_from_url() {
        let cases = [
            ("https://example.com/mod.ts", LoaderKind::Ts),
            ("https://example.com/app.tsx", LoaderKind::Tsx),
            ("https://example.com/lib.js", LoaderKind::Js),
            ("https://example.com/lib.min.js", LoaderKind::Js),
            ("https://example.com/data.wasm", LoaderKind::Js),
            ("https://example.com/no-extension", LoaderKind::Js),
            ("https://example.com/pkg@1.0/x.ts", LoaderKind::Ts),
        ];

        for (url, expected) in cases {
            let url = Url::parse(url).unwrap();
            assert_eq!(LoaderKind::from_url(&url), expected, "url: {url}");
        }
    }

    #[test]
    fn test_loader_kind_ignores_dots_in_directories() {
        // Extension comes from the final path segment only.
        let url = Url::parse("https://example.com/pkg.ts/entry").unwrap();
        assert_eq!(LoaderKind::from_url(&url), LoaderKind::Js);
    }

    #[test]
    fn test_match_rule_namespace_gating() {
        let rule = MatchRule::new(Regex::new("^pkg/").unwrap());
        assert!(rule.matches("pkg/mod.ts", None));
        assert!(!rule.matches("pkg/mod.ts", Some("other")));
        assert!(!rule.matches("lib/mod.ts", None));

        let scoped = MatchRule::in_namespace(Regex::new(".*").unwrap(), "mine");
        assert!(scoped.matches("anything", Some("mine")));
        assert!(!scoped.matches("anything", None));
    }

    #[test]
    fn test_dispatch_first_match_wins() {
        let mut hooks = BuildHooks::new();

        hooks.on_resolve(MatchRule::new(Regex::new("^a").unwrap()), |_| {
            Ok(Resolution {
                path: "first".to_string(),
                namespace: None,
            })
        });
        hooks.on_resolve(MatchRule::new(Regex::new("^ab").unwrap()), |_| {
            Ok(Resolution {
                path: "second".to_string(),
                namespace: None,
            })
        });

        let result = hooks
            .resolve(&ResolveArgs {
                path: "abc",
                importer: None,
                namespace: None,
            })
            .unwrap()
            .unwrap();
        assert_eq!(result.path, "first");
    }

    #[test]
    fn test_dispatch_unmatched_returns_none() {
        let mut hooks = BuildHooks::new();
        hooks.on_resolve(MatchRule::new(Regex::new("^pkg/").unwrap()), |_| {
            Ok(Resolution {
                path: "x".to_string(),
                namespace: None,
            })
        });

        let result = hooks
            .resolve(&ResolveArgs {
                path: "./local.ts",
                importer: None,
                namespace: None,
            })
            .unwrap();
        assert!(result.is_none());
    }
}
