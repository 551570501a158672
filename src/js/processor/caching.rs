//! Cache policy stage.

use crate::js::error::JsError;
use crate::js::pipeline::{CONTINUE, Flow, JsProcessor};
use crate::js::request::JsRequest;
use crate::js::response::JsResponseBuilder;

/// Sets cache lifetime and proxy cacheability.
///
/// Failed builds are never cached. Versioned targets get the long TTL.
#[derive(Debug, Clone, Copy)]
pub struct CachingProcessor {
    versioned_ttl_secs: u32,
    unversioned_ttl_secs: u32,
}

impl CachingProcessor {
    pub fn new(versioned_ttl_secs: u32, unversioned_ttl_secs: u32) -> Self {
        Self {
            versioned_ttl_secs,
            unversioned_ttl_secs,
        }
    }
}

impl JsProcessor for CachingProcessor {
    fn name(&self) -> &'static str {
        "caching"
    }

    fn process(&self, request: &JsRequest, builder: &mut JsResponseBuilder) -> Result<Flow, JsError> {
        if !builder.errors().is_empty() || builder.status_code() >= 400 {
            builder.set_cache_ttl_secs(0).set_proxy_cacheable(false);
            return Ok(CONTINUE);
        }

        let ttl = if request.uri().version().is_some() {
            self.versioned_ttl_secs
        } else {
            self.unversioned_ttl_secs
        };
        builder.set_cache_ttl_secs(ttl).set_proxy_cacheable(true);
        Ok(CONTINUE)
    }
}
