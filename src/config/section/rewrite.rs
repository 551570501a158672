//! `[rewrite]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [rewrite]
//! rewriters = ["absolutize-urls", "minify-css"]   # Applied in this order
//! minify_css = true                                # false skips `minify-css`
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// A content rewriter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RewriterKind {
    AbsolutizeUrls,
    MinifyCss,
}

impl RewriterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AbsolutizeUrls => "absolutize-urls",
            Self::MinifyCss => "minify-css",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RewriteSectionConfig {
    /// Rewriters in application order.
    pub rewriters: Vec<RewriterKind>,
    pub minify_css: bool,
}

impl Default for RewriteSectionConfig {
    fn default() -> Self {
        Self {
            rewriters: vec![RewriterKind::AbsolutizeUrls, RewriterKind::MinifyCss],
            minify_css: true,
        }
    }
}

impl RewriteSectionConfig {
    /// Rewriters that actually run, in order.
    pub fn enabled(&self) -> impl Iterator<Item = RewriterKind> + '_ {
        self.rewriters
            .iter()
            .copied()
            .filter(|kind| self.minify_css || *kind != RewriterKind::MinifyCss)
    }

    /// Validate `[rewrite]` configuration.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.minify_css && !self.rewriters.contains(&RewriterKind::MinifyCss) {
            diag.warn("rewrite.minify_css", "`minify-css` is not in `rewriters`, toggle has no effect");
        }
        for (i, kind) in self.rewriters.iter().enumerate() {
            if self.rewriters[..i].contains(kind) {
                diag.error_with_hint(
                    "rewrite.rewriters",
                    format!("duplicate rewriter `{}`", kind.as_str()),
                    "list each rewriter once",
                );
            }
        }
    }
}
