//! Script fragments flowing through the build pipeline.

use std::sync::Arc;

use super::feature::FeatureBundle;

/// An immutable unit of script text.
///
/// Content produced from a feature carries its bundle so later stages can
/// recover the declared APIs. Ad-hoc script (onload callbacks, compiler
/// output) has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsContent {
    content: Arc<str>,
    /// Where the content came from, for diagnostics.
    source: Arc<str>,
    feature: Option<Arc<FeatureBundle>>,
}

impl JsContent {
    /// Create ad-hoc content with no backing feature.
    pub fn from_text(content: &str, source: &str) -> Self {
        Self {
            content: Arc::from(content),
            source: Arc::from(source),
            feature: None,
        }
    }

    /// Create content backed by a feature bundle.
    pub fn from_feature(content: &str, source: &str, bundle: Arc<FeatureBundle>) -> Self {
        Self {
            feature: Some(bundle),
            ..Self::from_text(content, source)
        }
    }

    pub fn get(&self) -> &str {
        &self.content
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn feature(&self) -> Option<&Arc<FeatureBundle>> {
        self.feature.as_ref()
    }

    /// Join fragments into one script.
    ///
    /// A fragment whose last line does not end in `;` is closed with a
    /// standalone `;` line, so the next fragment cannot continue its final
    /// expression (`}` followed by `(` parses as a call).
    pub fn concat(contents: &[JsContent]) -> String {
        let mut out = String::with_capacity(contents.iter().map(|c| c.content.len() + 3).sum());
        for (i, content) in contents.iter().enumerate() {
            if i > 0 {
                out.push_str(if is_terminated(&out) { "\n" } else { "\n;\n" });
            }
            out.push_str(content.get());
        }
        out
    }
}

/// Whether `script` ends in a `;` outside a trailing line comment.
fn is_terminated(script: &str) -> bool {
    let last_line = script.trim_end().rsplit('\n').next().unwrap_or_default();
    last_line.ends_with(';') && !last_line.contains("//")
}
