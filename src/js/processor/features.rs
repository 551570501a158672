//! Feature resolution stage.
//!
//! Appends the script of every requested feature, dependencies first. Unknown
//! features end the run with a 404.

use std::sync::Arc;

use crate::js::content::JsContent;
use crate::js::error::JsError;
use crate::js::feature::FeatureLookup;
use crate::js::pipeline::{CONTINUE, Flow, JsProcessor, STOP};
use crate::js::request::JsRequest;
use crate::js::response::{JsResponseBuilder, STATUS_NOT_FOUND};

pub struct FeatureResolutionProcessor {
    lookup: Arc<dyn FeatureLookup>,
}

impl FeatureResolutionProcessor {
    pub fn new(lookup: Arc<dyn FeatureLookup>) -> Self {
        Self { lookup }
    }
}

impl JsProcessor for FeatureResolutionProcessor {
    fn name(&self) -> &'static str {
        "features"
    }

    fn process(&self, request: &JsRequest, builder: &mut JsResponseBuilder) -> Result<Flow, JsError> {
        let resolution = self.lookup.resolve(request.uri().features());

        if !resolution.unknown.is_empty() {
            for name in &resolution.unknown {
                builder.add_error(format!("unknown feature `{name}`"));
            }
            builder.set_status_code(STATUS_NOT_FOUND);
            return Ok(STOP);
        }

        for bundle in resolution.bundles {
            builder.append_js(JsContent::from_feature(
                bundle.script(),
                bundle.name(),
                Arc::clone(&bundle),
            ));
        }
        Ok(CONTINUE)
    }
}
