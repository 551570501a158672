//! Onload callback stage.

use std::sync::LazyLock;

use regex::Regex;

use crate::js::content::JsContent;
use crate::js::error::JsError;
use crate::js::pipeline::{CONTINUE, Flow, JsProcessor, STOP};
use crate::js::request::JsRequest;
use crate::js::response::{JsResponseBuilder, STATUS_BAD_REQUEST};

/// Source name of the generated callback invocation.
pub const ONLOAD_SOURCE: &str = "[onload]";

/// Dotted JS identifier path, e.g. `init` or `app.boot.start`.
static RE_CALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$").unwrap()
});

/// Appends a call to the `onload` callback named in the uri.
///
/// The callback path is walked from `window` at runtime and called with its
/// owner as `this`. Anything but a dotted identifier ends the run with a 400.
#[derive(Debug, Default)]
pub struct OnloadProcessor;

impl OnloadProcessor {
    fn invocation(callback: &str) -> String {
        format!(
            "(function(){{var p='{callback}'.split('.'),o=window,i;\
             for(i=0;o&&i<p.length-1;i++){{o=o[p[i]];}}\
             if(o&&typeof o[p[i]]==='function'){{o[p[i]]();}}}})();"
        )
    }
}

impl JsProcessor for OnloadProcessor {
    fn name(&self) -> &'static str {
        "onload"
    }

    fn process(&self, request: &JsRequest, builder: &mut JsResponseBuilder) -> Result<Flow, JsError> {
        let Some(callback) = request.uri().onload() else {
            return Ok(CONTINUE);
        };

        if !RE_CALLBACK.is_match(callback) {
            builder
                .set_status_code(STATUS_BAD_REQUEST)
                .add_error(format!("invalid onload callback `{callback}`"));
            return Ok(STOP);
        }

        builder.append_js(JsContent::from_text(&Self::invocation(callback), ONLOAD_SOURCE));
        Ok(CONTINUE)
    }
}
