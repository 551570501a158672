//! Configuration management for `gadgetkit.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── js         # [js] and [[js.feature]]
//! │   └── rewrite    # [rewrite]
//! ├── error          # ConfigError, ConfigDiagnostics
//! └── mod.rs         # GadgetConfig (this file)
//! ```

mod error;
pub mod section;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use section::{
    CompilerKind, FeatureConfig, JsSectionConfig, RewriteSectionConfig, RewriterKind, StageKind,
};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "gadgetkit.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing gadgetkit.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GadgetConfig {
    /// Directory relative paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Build pipeline settings
    #[serde(default)]
    pub js: JsSectionConfig,

    /// Rewriter chain settings
    #[serde(default)]
    pub rewrite: RewriteSectionConfig,
}

impl GadgetConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file at the default location yields the default
    /// configuration rooted at the current directory.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() && path == Path::new(CONFIG_FILE) {
            crate::debug!("config"; "no {} found, using defaults", CONFIG_FILE);
            let mut config = Self::default();
            config.root = std::env::current_dir()?;
            return Ok(config);
        }

        let mut config = Self::from_path(path)?;
        config.root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        config.validate()?;
        Ok(config)
    }

    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            let mut diag = ConfigDiagnostics::new();
            for field in ignored {
                diag.warn(field, "unknown field, ignored");
            }
            diag.print_warnings();
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Validate all sections, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.js.validate(&mut diag);
        self.rewrite.validate(&mut diag);
        if !self.js.feature_dir.as_os_str().is_empty() && !self.resolve(&self.js.feature_dir).is_dir() {
            diag.error_with_hint(
                "js.feature_dir",
                format!("{} is not a directory", self.js.feature_dir.display()),
                "paths are relative to the config file",
            );
        }
        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Resolve a config-relative path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_sets_root_and_sections() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
            [js]
            stages = ["features", "compile"]

            [rewrite]
            rewriters = ["minify-css"]
            "#,
        );
        let config = GadgetConfig::load(&path).unwrap();
        assert_eq!(config.root, dir.path());
        assert_eq!(config.js.stages, vec![StageKind::Features, StageKind::Compile]);
        assert_eq!(config.rewrite.rewriters, vec![RewriterKind::MinifyCss]);
        assert_eq!(
            config.resolve(Path::new("features/core.js")),
            dir.path().join("features/core.js")
        );
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let (config, ignored) =
            GadgetConfig::parse_with_ignored("[js]\nminify = true\n[extra]\na = 1\n").unwrap();
        assert_eq!(config.js, JsSectionConfig::default());
        assert!(ignored.contains(&"js.minify".to_string()));
        assert!(ignored.contains(&"extra".to_string()));
    }

    #[test]
    fn test_invalid_config_reports_diagnostics() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[rewrite]\nrewriters = [\"minify-css\", \"minify-css\"]\n");
        let err = GadgetConfig::load(&path).unwrap_err();
        let config_err = err.downcast_ref::<ConfigError>().unwrap();
        assert!(matches!(config_err, ConfigError::Diagnostics(d) if d.len() == 1));
    }

    #[test]
    fn test_feature_dir_must_exist() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[js]\nfeature_dir = \"scripts\"\n");
        let err = GadgetConfig::load(&path).unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err:?}");
        };
        assert_eq!(diag.errors()[0].field, "js.feature_dir");

        fs::create_dir(dir.path().join("scripts")).unwrap();
        let config = GadgetConfig::load(&path).unwrap();
        assert_eq!(config.js.feature_dir, PathBuf::from("scripts"));
    }

    #[test]
    fn test_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[js\n");
        let err = GadgetConfig::load(&path).unwrap_err();
        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::Toml(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = GadgetConfig::load(&dir.path().join("other.toml")).unwrap_err();
        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::Io(..))));
    }
}
