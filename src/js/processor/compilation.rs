//! Compilation stage.
//!
//! | Builder field | Access                                    |
//! |---------------|-------------------------------------------|
//! | js            | read at entry, then replaced wholesale    |
//! | externs       | appended (exported JS APIs of bundles)    |
//! | status code   | overwritten with the compiler's status    |
//! | errors        | appended with the compiler's errors       |

use std::sync::Arc;

use crate::js::compiler::JsCompiler;
use crate::js::error::JsError;
use crate::js::feature::ApiType;
use crate::js::pipeline::{CONTINUE, Flow, JsProcessor};
use crate::js::request::JsRequest;
use crate::js::response::JsResponseBuilder;

pub struct CompilationProcessor {
    compiler: Arc<dyn JsCompiler>,
}

impl CompilationProcessor {
    pub fn new(compiler: Arc<dyn JsCompiler>) -> Self {
        Self { compiler }
    }
}

impl JsProcessor for CompilationProcessor {
    fn name(&self) -> &'static str {
        "compile"
    }

    /// Never stops the pipeline. A non-success status from the compiler is
    /// left for later stages and the caller.
    fn process(&self, request: &JsRequest, builder: &mut JsResponseBuilder) -> Result<Flow, JsError> {
        // Extern collection and compilation both use this snapshot.
        let so_far = builder.build();

        for content in so_far.js() {
            if let Some(bundle) = content.feature() {
                builder.append_externs(bundle.apis(ApiType::Js, true));
            }
        }

        let uri = request.uri();
        let result = self
            .compiler
            .compile(uri, so_far.js(), builder.externs())
            .map_err(|source| JsError::Compiler {
                target: uri.target().to_string(),
                source,
            })?;

        builder
            .clear_js()
            .append_all_js(result.js().iter().cloned())
            .set_status_code(result.status_code())
            .add_errors(result.errors().iter().cloned());
        Ok(CONTINUE)
    }
}
