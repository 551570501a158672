//! Failures of the rewriter chain.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("view `{view}` of gadget {gadget} is not inline markup")]
    ViewNotInline { gadget: String, view: String },

    #[error("rewriter `{rewriter}` failed on {target}")]
    Rewriter {
        rewriter: &'static str,
        /// Gadget spec url or request url being rewritten.
        target: String,
        #[source]
        source: anyhow::Error,
    },
}

impl RewriteError {
    /// Name of the failing rewriter, if a rewriter failed.
    pub fn rewriter(&self) -> Option<&'static str> {
        match self {
            Self::Rewriter { rewriter, .. } => Some(*rewriter),
            Self::ViewNotInline { .. } => None,
        }
    }
}
