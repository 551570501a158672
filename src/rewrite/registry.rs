//! Ordered application of content rewriters.
//!
//! ```text
//! markup ──▶ [rewriter 1] ──▶ [rewriter 2] ──▶ ... ──▶ rewritten markup
//! ```
//!
//! The chain is fixed when the registry is built. A failing rewriter aborts
//! the call; there is no partial result.

use std::sync::Arc;

use super::error::RewriteError;
use super::gadget::{Gadget, View};
use super::http::{HttpRequest, HttpResponse};
use super::rewriters::{CssMinifier, UrlAbsolutizer};
use super::ContentRewriter;
use crate::config::{RewriteSectionConfig, RewriterKind};
use crate::debug;

#[derive(Default)]
pub struct ContentRewriterRegistry {
    rewriters: Vec<Box<dyn ContentRewriter>>,
}

impl ContentRewriterRegistry {
    pub fn new(rewriters: Vec<Box<dyn ContentRewriter>>) -> Self {
        Self { rewriters }
    }

    /// Build the chain in `[rewrite].rewriters` order, honoring `minify_css`.
    pub fn from_config(config: &RewriteSectionConfig) -> Self {
        let rewriters = config
            .enabled()
            .map(|kind| -> Box<dyn ContentRewriter> {
                match kind {
                    RewriterKind::AbsolutizeUrls => Box::new(UrlAbsolutizer),
                    RewriterKind::MinifyCss => Box::new(CssMinifier),
                }
            })
            .collect();
        Self::new(rewriters)
    }

    /// Rewriter names in application order.
    pub fn names(&self) -> Vec<&'static str> {
        self.rewriters.iter().map(|r| r.name()).collect()
    }

    /// Rewrite the inline markup of `view`.
    pub fn rewrite_gadget_view(&self, gadget: &Gadget, view: &View) -> Result<String, RewriteError> {
        let markup = view.markup(gadget)?;
        self.rewrite_gadget(gadget, markup)
    }

    /// Rewrite markup already in hand, with `gadget` as context.
    pub fn rewrite_gadget(&self, gadget: &Gadget, content: &str) -> Result<String, RewriteError> {
        let mut current = content.to_string();
        for rewriter in &self.rewriters {
            let rewritten = rewriter
                .rewrite_gadget(gadget, &current)
                .map_err(|source| RewriteError::Rewriter {
                    rewriter: rewriter.name(),
                    target: gadget.spec_url().to_string(),
                    source,
                })?;
            match rewritten {
                Some(next) => current = next,
                None => debug!("rewrite"; "`{}` left {} unchanged", rewriter.name(), gadget.spec_url()),
            }
        }
        Ok(current)
    }

    /// Rewrite a fetched response.
    ///
    /// When no rewriter changes anything the same `Arc` is returned, so
    /// `Arc::ptr_eq(&original, &result)` tells callers nothing was rewritten.
    pub fn rewrite_http_response(
        &self,
        request: &HttpRequest,
        response: Arc<HttpResponse>,
    ) -> Result<Arc<HttpResponse>, RewriteError> {
        let mut current = response;
        for rewriter in &self.rewriters {
            let rewritten = rewriter
                .rewrite_response(request, &current)
                .map_err(|source| RewriteError::Rewriter {
                    rewriter: rewriter.name(),
                    target: request.url().to_string(),
                    source,
                })?;
            if let Some(next) = rewritten {
                debug!("rewrite"; "`{}` rewrote {}", rewriter.name(), request.url());
                current = Arc::new(next);
            }
        }
        Ok(current)
    }
}

impl std::fmt::Debug for ContentRewriterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRewriterRegistry")
            .field("rewriters", &self.names())
            .finish()
    }
}
