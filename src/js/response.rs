//! The response accumulator threaded through the build pipeline.
//!
//! # Field semantics
//!
//! | Field       | Mutation                                       |
//! |-------------|------------------------------------------------|
//! | js          | append / prepend, or replaced via `clear_js`   |
//! | externs     | append only, duplicates dropped                |
//! | status code | overwritten (last writer wins), default 200    |
//! | errors      | append only                                    |
//!
//! Mixing these up (overwriting errors, appending a status) is the classic
//! bug in stage code; the builder API only offers the operations above.

use rustc_hash::FxHashSet;

use super::content::JsContent;

/// HTTP-style status reported for a build.
pub type StatusCode = u16;

pub const STATUS_OK: StatusCode = 200;
pub const STATUS_NOT_MODIFIED: StatusCode = 304;
pub const STATUS_BAD_REQUEST: StatusCode = 400;
pub const STATUS_NOT_FOUND: StatusCode = 404;
pub const STATUS_INTERNAL_ERROR: StatusCode = 500;

// =============================================================================
// JsResponse
// =============================================================================

/// Finalized, immutable build result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsResponse {
    js: Vec<JsContent>,
    externs: Vec<String>,
    status_code: StatusCode,
    errors: Vec<String>,
    cache_ttl_secs: Option<u32>,
    proxy_cacheable: bool,
}

impl JsResponse {
    pub fn js(&self) -> &[JsContent] {
        &self.js
    }

    pub fn externs(&self) -> &[String] {
        &self.externs
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }

    pub fn cache_ttl_secs(&self) -> Option<u32> {
        self.cache_ttl_secs
    }

    pub fn proxy_cacheable(&self) -> bool {
        self.proxy_cacheable
    }

    /// Script body, fragments joined in content order.
    pub fn to_js_string(&self) -> String {
        JsContent::concat(&self.js)
    }
}

// =============================================================================
// JsResponseBuilder
// =============================================================================

/// Mutable accumulator for one build request.
#[derive(Debug, Clone)]
pub struct JsResponseBuilder {
    js: Vec<JsContent>,
    externs: Vec<String>,
    declared: FxHashSet<String>,
    status_code: StatusCode,
    errors: Vec<String>,
    cache_ttl_secs: Option<u32>,
    proxy_cacheable: bool,
}

impl Default for JsResponseBuilder {
    fn default() -> Self {
        Self {
            js: Vec::new(),
            externs: Vec::new(),
            declared: FxHashSet::default(),
            status_code: STATUS_OK,
            errors: Vec::new(),
            cache_ttl_secs: None,
            proxy_cacheable: false,
        }
    }
}

impl JsResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn js(&self) -> &[JsContent] {
        &self.js
    }

    pub fn externs(&self) -> &[String] {
        &self.externs
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn append_js(&mut self, content: JsContent) -> &mut Self {
        self.js.push(content);
        self
    }

    pub fn append_all_js(&mut self, contents: impl IntoIterator<Item = JsContent>) -> &mut Self {
        self.js.extend(contents);
        self
    }

    pub fn prepend_js(&mut self, content: JsContent) -> &mut Self {
        self.js.insert(0, content);
        self
    }

    /// Drop all js content. Externs, status and errors are untouched.
    pub fn clear_js(&mut self) -> &mut Self {
        self.js.clear();
        self
    }

    /// Declare externs, skipping names already declared.
    pub fn append_externs<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if self.declared.insert(name.clone()) {
                self.externs.push(name);
            }
        }
        self
    }

    pub fn set_status_code(&mut self, status_code: StatusCode) -> &mut Self {
        self.status_code = status_code;
        self
    }

    pub fn add_error(&mut self, error: impl Into<String>) -> &mut Self {
        self.errors.push(error.into());
        self
    }

    pub fn add_errors(&mut self, errors: impl IntoIterator<Item = String>) -> &mut Self {
        self.errors.extend(errors);
        self
    }

    pub fn set_cache_ttl_secs(&mut self, ttl: u32) -> &mut Self {
        self.cache_ttl_secs = Some(ttl);
        self
    }

    pub fn set_proxy_cacheable(&mut self, cacheable: bool) -> &mut Self {
        self.proxy_cacheable = cacheable;
        self
    }

    /// Snapshot of the response so far. The builder stays usable.
    pub fn build(&self) -> JsResponse {
        JsResponse {
            js: self.js.clone(),
            externs: self.externs.clone(),
            status_code: self.status_code,
            errors: self.errors.clone(),
            cache_ttl_secs: self.cache_ttl_secs,
            proxy_cacheable: self.proxy_cacheable,
        }
    }

    /// Finalize without copying.
    pub fn into_response(self) -> JsResponse {
        JsResponse {
            js: self.js,
            externs: self.externs,
            status_code: self.status_code,
            errors: self.errors,
            cache_ttl_secs: self.cache_ttl_secs,
            proxy_cacheable: self.proxy_cacheable,
        }
    }
}
