//! Content rewriting for gadget markup and proxied responses.
//!
//! # Module Structure
//!
//! ```text
//! rewrite/
//! ├── gadget      # Gadget, View
//! ├── http        # HttpRequest, HttpResponse
//! ├── error       # RewriteError
//! ├── registry    # ContentRewriterRegistry
//! └── rewriters/  # UrlAbsolutizer, CssMinifier
//! ```

pub mod error;
pub mod gadget;
pub mod http;
pub mod registry;
pub mod rewriters;

pub use error::RewriteError;
pub use gadget::{Gadget, View, ViewKind};
pub use http::{HttpRequest, HttpResponse};
pub use registry::ContentRewriterRegistry;
pub use rewriters::{CssMinifier, UrlAbsolutizer};

/// One transformation strategy in the rewriter chain.
///
/// Both methods default to leaving content alone, so a rewriter only
/// implements the artifacts it understands. `Ok(None)` means unchanged.
/// Rewriters are shared across concurrent requests.
pub trait ContentRewriter: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    fn rewrite_gadget(&self, _gadget: &Gadget, _content: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    fn rewrite_response(
        &self,
        _request: &HttpRequest,
        _response: &HttpResponse,
    ) -> anyhow::Result<Option<HttpResponse>> {
        Ok(None)
    }
}
