//! Feature bundles and the registry that resolves them.
//!
//! A [`FeatureBundle`] is the unit of reusable script: its source plus the API
//! directives it declares. Exported JS APIs become compiler externs.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

// =============================================================================
// API Directives
// =============================================================================

/// Kind of API surface a directive declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiType {
    Js,
    Rpc,
}

/// A single declared API of a feature bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDirective {
    pub kind: ApiType,
    /// Dotted symbol path, e.g. `gadgets.util.registerOnLoadHandler`.
    pub name: String,
    /// Exported APIs form the public surface; the rest are required imports.
    pub exported: bool,
}

impl ApiDirective {
    pub fn exported(kind: ApiType, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            exported: true,
        }
    }

    pub fn required(kind: ApiType, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            exported: false,
        }
    }
}

// =============================================================================
// FeatureBundle
// =============================================================================

/// A named script feature with its declared APIs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureBundle {
    name: String,
    script: String,
    apis: Vec<ApiDirective>,
    deps: Vec<String>,
}

impl FeatureBundle {
    pub fn new(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
            ..Self::default()
        }
    }

    pub fn with_api(mut self, api: ApiDirective) -> Self {
        self.apis.push(api);
        self
    }

    pub fn with_dep(mut self, dep: impl Into<String>) -> Self {
        self.deps.push(dep.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn deps(&self) -> &[String] {
        &self.deps
    }

    /// APIs of the given type. With `exported_only`, required (imported) APIs
    /// are skipped.
    pub fn apis(&self, kind: ApiType, exported_only: bool) -> impl Iterator<Item = &str> {
        self.apis
            .iter()
            .filter(move |api| api.kind == kind && (api.exported || !exported_only))
            .map(|api| api.name.as_str())
    }
}

// =============================================================================
// Lookup
// =============================================================================

/// Opaque feature lookup consumed by the build pipeline.
pub trait FeatureLookup: Send + Sync {
    fn lookup(&self, name: &str) -> Option<Arc<FeatureBundle>>;

    /// Resolve `names` and their transitive dependencies.
    fn resolve(&self, names: &[String]) -> Resolution {
        let mut resolution = Resolution::default();
        let mut visited = FxHashSet::default();
        for name in names {
            visit(self, name, &mut visited, &mut resolution);
        }
        resolution
    }
}

fn visit<L: FeatureLookup + ?Sized>(
    lookup: &L,
    name: &str,
    visited: &mut FxHashSet<String>,
    out: &mut Resolution,
) {
    if !visited.insert(name.to_string()) {
        return;
    }
    let Some(bundle) = lookup.lookup(name) else {
        out.unknown.push(name.to_string());
        return;
    };
    for dep in bundle.deps() {
        visit(lookup, dep, visited, out);
    }
    out.bundles.push(bundle);
}

/// Result of resolving a list of requested features.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Bundles ordered dependencies-first, each at most once.
    pub bundles: Vec<Arc<FeatureBundle>>,
    /// Requested or depended-upon names with no registered bundle.
    pub unknown: Vec<String>,
}

/// In-memory feature registry, fixed at configuration time.
#[derive(Debug, Default)]
pub struct FeatureRegistry {
    bundles: FxHashMap<String, Arc<FeatureBundle>>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bundle, replacing any previous bundle of the same name.
    pub fn register(&mut self, bundle: FeatureBundle) {
        self.bundles.insert(bundle.name.clone(), Arc::new(bundle));
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl FeatureLookup for FeatureRegistry {
    fn lookup(&self, name: &str) -> Option<Arc<FeatureBundle>> {
        self.bundles.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn registry() -> FeatureRegistry {
        let mut registry = FeatureRegistry::new();
        registry.register(FeatureBundle::new("globals", "var gadgets = {};"));
        registry.register(
            FeatureBundle::new("core", "gadgets.util = {};")
                .with_dep("globals")
                .with_api(ApiDirective::exported(ApiType::Js, "gadgets.util")),
        );
        registry.register(
            FeatureBundle::new("rpc", "gadgets.rpc = {};")
                .with_dep("core")
                .with_dep("globals"),
        );
        registry
    }

    #[test]
    fn test_apis_filters_by_type_and_export() {
        let bundle = FeatureBundle::new("f", "")
            .with_api(ApiDirective::exported(ApiType::Js, "a.exported"))
            .with_api(ApiDirective::required(ApiType::Js, "a.required"))
            .with_api(ApiDirective::exported(ApiType::Rpc, "a.rpc"));

        let exported: Vec<_> = bundle.apis(ApiType::Js, true).collect();
        assert_eq!(exported, vec!["a.exported"]);

        let all_js: Vec<_> = bundle.apis(ApiType::Js, false).collect();
        assert_eq!(all_js, vec!["a.exported", "a.required"]);
    }

    #[test]
    fn test_resolve_orders_dependencies_first() {
        let resolution = registry().resolve(&names(&["rpc"]));
        let names: Vec<_> = resolution.bundles.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["globals", "core", "rpc"]);
        assert!(resolution.unknown.is_empty());
    }

    #[test]
    fn test_resolve_deduplicates_shared_dependencies() {
        let resolution = registry().resolve(&names(&["core", "rpc", "core"]));
        let names: Vec<_> = resolution.bundles.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["globals", "core", "rpc"]);
    }

    #[test]
    fn test_resolve_reports_unknown() {
        let resolution = registry().resolve(&names(&["core", "missing"]));
        assert_eq!(resolution.unknown, vec!["missing".to_string()]);
        assert_eq!(resolution.bundles.len(), 2);
    }

    #[test]
    fn test_lookup() {
        let registry = registry();
        assert!(registry.lookup("core").is_some());
        assert!(registry.lookup("nope").is_none());
    }
}
