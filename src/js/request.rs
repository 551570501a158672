//! JS build targets and requests.
//!
//! A target is addressed by a URI of the form
//! `/js/<feature>:<feature>.js?onload=<callback>&debug=1&v=<version>&c=<container>`.

use percent_encoding::percent_decode_str;
use url::Url;

use super::error::JsError;

/// Container assumed when the uri does not name one.
pub const DEFAULT_CONTAINER: &str = "default";

// =============================================================================
// JsUri
// =============================================================================

/// Parsed build target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsUri {
    /// The uri as given, used as the compiler's target identifier.
    target: String,
    features: Vec<String>,
    onload: Option<String>,
    debug: bool,
    version: Option<String>,
    container: String,
}

impl JsUri {
    /// Parse an absolute or host-relative JS uri.
    pub fn parse(uri: &str) -> Result<Self, JsError> {
        let url = Url::parse("http://localhost/")
            .and_then(|base| base.join(uri))
            .map_err(|e| JsError::invalid_uri(uri, e.to_string()))?;

        let last = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default();
        let Some(stem) = last.strip_suffix(".js") else {
            return Err(JsError::invalid_uri(uri, "target must end with `.js`"));
        };

        let mut features: Vec<String> = Vec::new();
        for segment in stem.split(':').filter(|s| !s.is_empty()) {
            let name = percent_decode_str(segment)
                .decode_utf8()
                .map_err(|e| JsError::invalid_uri(uri, format!("feature `{segment}`: {e}")))?;
            if !features.iter().any(|f| *f == name) {
                features.push(name.into_owned());
            }
        }
        if features.is_empty() {
            return Err(JsError::invalid_uri(uri, "no features requested"));
        }

        let mut parsed = Self {
            target: uri.to_string(),
            features,
            onload: None,
            debug: false,
            version: None,
            container: DEFAULT_CONTAINER.to_string(),
        };

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "onload" if !value.is_empty() => parsed.onload = Some(value.into_owned()),
                "debug" => parsed.debug = matches!(value.as_ref(), "1" | "true"),
                "v" if !value.is_empty() => parsed.version = Some(value.into_owned()),
                "c" if !value.is_empty() => parsed.container = value.into_owned(),
                _ => {}
            }
        }

        Ok(parsed)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn onload(&self) -> Option<&str> {
        self.onload.as_deref()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn container(&self) -> &str {
        &self.container
    }
}

// =============================================================================
// JsRequest
// =============================================================================

/// Read-only description of one build. Never mutated by stages.
#[derive(Debug, Clone)]
pub struct JsRequest {
    uri: JsUri,
    /// Client sent a conditional request (`If-Modified-Since`).
    if_modified_since: bool,
}

impl JsRequest {
    pub fn new(uri: JsUri) -> Self {
        Self {
            uri,
            if_modified_since: false,
        }
    }

    pub fn with_if_modified_since(mut self, conditional: bool) -> Self {
        self.if_modified_since = conditional;
        self
    }

    pub fn uri(&self) -> &JsUri {
        &self.uri
    }

    pub fn is_conditional(&self) -> bool {
        self.if_modified_since
    }
}
