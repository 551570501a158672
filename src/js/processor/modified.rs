//! Conditional request stage.

use crate::js::error::JsError;
use crate::js::pipeline::{CONTINUE, Flow, JsProcessor, STOP};
use crate::js::request::JsRequest;
use crate::js::response::{JsResponseBuilder, STATUS_NOT_MODIFIED};

/// Answers a conditional request for a versioned target with 304.
///
/// Versioned content never changes under the same version, so the client
/// copy is always current.
#[derive(Debug, Default)]
pub struct IfModifiedSinceProcessor;

impl JsProcessor for IfModifiedSinceProcessor {
    fn name(&self) -> &'static str {
        "if-modified-since"
    }

    fn process(&self, request: &JsRequest, builder: &mut JsResponseBuilder) -> Result<Flow, JsError> {
        if request.is_conditional() && request.uri().version().is_some() {
            builder.clear_js().set_status_code(STATUS_NOT_MODIFIED);
            return Ok(STOP);
        }
        Ok(CONTINUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::js::content::JsContent;
    use crate::js::request::JsUri;
    use crate::js::response::STATUS_OK;

    fn run(uri: &str, conditional: bool) -> (Flow, JsResponseBuilder) {
        let mut builder = JsResponseBuilder::new();
        builder.append_js(JsContent::from_text("seed();", "seed"));
        let request = JsRequest::new(JsUri::parse(uri).unwrap()).with_if_modified_since(conditional);
        let flow = IfModifiedSinceProcessor.process(&request, &mut builder).unwrap();
        (flow, builder)
    }

    #[test]
    fn test_versioned_conditional_request_is_not_modified() {
        let (flow, builder) = run("/js/core.js?v=123", true);
        assert_eq!(flow, STOP);
        assert_eq!(builder.status_code(), STATUS_NOT_MODIFIED);
        assert!(builder.js().is_empty());
    }

    #[test]
    fn test_unversioned_or_unconditional_requests_continue() {
        for (uri, conditional) in [("/js/core.js", true), ("/js/core.js?v=123", false)] {
            let (flow, builder) = run(uri, conditional);
            assert_eq!(flow, CONTINUE);
            assert_eq!(builder.status_code(), STATUS_OK);
            assert_eq!(builder.js().len(), 1);
        }
    }
}
