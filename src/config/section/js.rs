//! `[js]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [js]
//! stages = ["if-modified-since", "features", "onload", "compile", "caching"]
//! compiler = "oxc"            # oxc | passthrough
//! mangle = true               # Rename local bindings (oxc only)
//! versioned_ttl = 31536000    # Cache TTL for `?v=` targets, in seconds
//! unversioned_ttl = 3600      # Cache TTL for everything else
//! feature_dir = "features"    # Base of feature scripts, relative to the config file
//!
//! [[js.feature]]
//! name = "core"
//! script = "core.js"          # Relative to `feature_dir`
//! exports = ["gadgets.util"]
//! requires = ["gadgets.config"]
//! deps = ["globals"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ConfigDiagnostics;

/// A build pipeline stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StageKind {
    IfModifiedSince,
    Features,
    Onload,
    Compile,
    Caching,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IfModifiedSince => "if-modified-since",
            Self::Features => "features",
            Self::Onload => "onload",
            Self::Compile => "compile",
            Self::Caching => "caching",
        }
    }
}

/// Compiler used by the `compile` stage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompilerKind {
    #[default]
    Oxc,
    Passthrough,
}

/// One `[[js.feature]]` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FeatureConfig {
    pub name: String,
    pub script: PathBuf,
    /// JS APIs the feature exports (kept by the compiler).
    pub exports: Vec<String>,
    /// JS APIs the feature uses from elsewhere.
    pub requires: Vec<String>,
    /// Features that must load first.
    pub deps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JsSectionConfig {
    /// Stages in execution order.
    pub stages: Vec<StageKind>,
    pub compiler: CompilerKind,
    pub mangle: bool,
    pub versioned_ttl: u32,
    pub unversioned_ttl: u32,
    /// Directory feature scripts resolve against. Empty means the config
    /// file's directory.
    pub feature_dir: PathBuf,
    #[serde(rename = "feature")]
    pub features: Vec<FeatureConfig>,
}

impl Default for JsSectionConfig {
    fn default() -> Self {
        Self {
            stages: vec![
                StageKind::IfModifiedSince,
                StageKind::Features,
                StageKind::Onload,
                StageKind::Compile,
                StageKind::Caching,
            ],
            compiler: CompilerKind::Oxc,
            mangle: true,
            versioned_ttl: 365 * 24 * 3600,
            unversioned_ttl: 3600,
            feature_dir: PathBuf::new(),
            features: Vec::new(),
        }
    }
}

impl JsSectionConfig {
    /// Script path of `feature`, relative to the config file.
    pub fn script_path(&self, feature: &FeatureConfig) -> PathBuf {
        self.feature_dir.join(&feature.script)
    }

    /// Validate `[js]` configuration.
    ///
    /// # Checks
    /// - each stage appears at most once
    /// - `features` runs before `onload` and `compile`
    /// - `caching` runs after `compile`
    /// - feature names are non-empty and unique, scripts are set
    /// - feature deps name configured features
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let position = |kind: StageKind| self.stages.iter().position(|s| *s == kind);

        for (i, stage) in self.stages.iter().enumerate() {
            if self.stages[..i].contains(stage) {
                diag.error_with_hint(
                    "js.stages",
                    format!("duplicate stage `{}`", stage.as_str()),
                    "list each stage once",
                );
            }
        }

        if let Some(features) = position(StageKind::Features) {
            for later in [StageKind::Onload, StageKind::Compile] {
                if position(later).is_some_and(|p| p < features) {
                    diag.error(
                        "js.stages",
                        format!("`{}` must run after `features`", later.as_str()),
                    );
                }
            }
        } else {
            diag.warn("js.stages", "no `features` stage, builds start empty");
        }

        if let (Some(compile), Some(caching)) =
            (position(StageKind::Compile), position(StageKind::Caching))
            && caching < compile
        {
            diag.error("js.stages", "`caching` must run after `compile`");
        }

        for (i, feature) in self.features.iter().enumerate() {
            let field = format!("js.feature[{i}]");
            if feature.name.is_empty() {
                diag.error(format!("{field}.name"), "feature name is empty");
            } else if self.features[..i].iter().any(|f| f.name == feature.name) {
                diag.error(
                    format!("{field}.name"),
                    format!("duplicate feature `{}`", feature.name),
                );
            }
            if feature.script.as_os_str().is_empty() {
                diag.error(format!("{field}.script"), "feature script is not set");
            }
            for dep in &feature.deps {
                if !self.features.iter().any(|f| &f.name == dep) {
                    diag.error_with_hint(
                        format!("{field}.deps"),
                        format!("unknown dependency `{dep}`"),
                        "add a [[js.feature]] entry for it",
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> JsSectionConfig {
        toml::from_str(toml_str).unwrap()
    }

    fn validate(config: &JsSectionConfig) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        diag
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = JsSectionConfig::default();
        let diag = validate(&config);
        assert!(!diag.has_errors());
        assert_eq!(config.stages.len(), 5);
        assert_eq!(config.compiler, CompilerKind::Oxc);
    }

    #[test]
    fn test_parse_stages_and_features() {
        let config = parse(
            r#"
            stages = ["features", "compile"]
            compiler = "passthrough"

            [[feature]]
            name = "core"
            script = "features/core.js"
            exports = ["gadgets.util"]
            "#,
        );
        assert_eq!(config.stages, vec![StageKind::Features, StageKind::Compile]);
        assert_eq!(config.compiler, CompilerKind::Passthrough);
        assert_eq!(config.features.len(), 1);
        assert_eq!(config.features[0].exports, vec!["gadgets.util"]);
        assert!(config.features[0].deps.is_empty());
        assert_eq!(config.script_path(&config.features[0]), PathBuf::from("features/core.js"));
    }

    #[test]
    fn test_feature_dir_prefixes_scripts() {
        let config = parse(
            r#"
            feature_dir = "lib/features"

            [[feature]]
            name = "core"
            script = "core.js"

            [[feature]]
            name = "abs"
            script = "/opt/abs.js"
            "#,
        );
        assert_eq!(config.feature_dir, PathBuf::from("lib/features"));
        assert_eq!(config.script_path(&config.features[0]), PathBuf::from("lib/features/core.js"));
        assert_eq!(config.script_path(&config.features[1]), PathBuf::from("/opt/abs.js"));
    }

    #[test]
    fn test_unknown_stage_fails_to_parse() {
        assert!(toml::from_str::<JsSectionConfig>(r#"stages = ["obfuscate"]"#).is_err());
    }

    #[test]
    fn test_duplicate_and_misordered_stages() {
        let config = parse(r#"stages = ["compile", "features", "compile", "caching"]"#);
        let diag = validate(&config);
        let messages: Vec<_> = diag.errors().iter().map(|e| e.message.as_str()).collect();
        assert!(messages.contains(&"duplicate stage `compile`"));
        assert!(messages.contains(&"`compile` must run after `features`"));
    }

    #[test]
    fn test_caching_before_compile() {
        let config = parse(r#"stages = ["features", "caching", "compile"]"#);
        assert!(validate(&config).has_errors());
    }

    #[test]
    fn test_feature_checks() {
        let config = parse(
            r#"
            [[feature]]
            name = "core"
            script = "core.js"
            deps = ["globals"]

            [[feature]]
            name = "core"
            "#,
        );
        let diag = validate(&config);
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"js.feature[0].deps"));
        assert!(fields.contains(&"js.feature[1].name"));
        assert!(fields.contains(&"js.feature[1].script"));
    }
}
