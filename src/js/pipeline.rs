//! Ordered stage execution for JS builds.
//!
//! ```text
//! JsRequest ─┐
//!            ▼
//!   [stage 1] → [stage 2] → ... → [stage n]
//!       │           │                 │
//!       └──── &mut JsResponseBuilder ─┘
//! ```
//!
//! A stage returns `Continue` to hand over to the next stage or `Break` to end
//! the run early. An `Err` aborts the run; the builder is then indeterminate.

use std::ops::ControlFlow;

use super::error::JsError;
use super::request::JsRequest;
use super::response::{JsResponse, JsResponseBuilder};
use crate::debug;

/// Outcome of a single stage.
pub type Flow = ControlFlow<()>;

/// Continue with the next stage.
pub const CONTINUE: Flow = ControlFlow::Continue(());
/// Stop the run; not an error.
pub const STOP: Flow = ControlFlow::Break(());

/// One step of the build pipeline.
///
/// Stages are shared across concurrent requests and must not keep
/// per-request state.
pub trait JsProcessor: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    fn process(&self, request: &JsRequest, builder: &mut JsResponseBuilder)
    -> Result<Flow, JsError>;
}

/// An immutable, ordered list of stages.
#[derive(Default)]
pub struct JsPipeline {
    stages: Vec<Box<dyn JsProcessor>>,
}

impl JsPipeline {
    pub fn new(stages: Vec<Box<dyn JsProcessor>>) -> Self {
        Self { stages }
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage in order against `builder`.
    pub fn run(&self, request: &JsRequest, builder: &mut JsResponseBuilder) -> Result<(), JsError> {
        for stage in &self.stages {
            let flow = stage.process(request, builder).inspect_err(|e| {
                debug!("js"; "stage `{}` failed for {}: {}", stage.name(), request.uri().target(), e);
            })?;
            if flow.is_break() {
                debug!("js"; "stage `{}` stopped the pipeline", stage.name());
                break;
            }
        }
        Ok(())
    }

    /// Run against a fresh builder seeded with nothing and finalize it.
    pub fn execute(&self, request: &JsRequest) -> Result<JsResponse, JsError> {
        let mut builder = JsResponseBuilder::new();
        self.run(request, &mut builder)?;
        Ok(builder.into_response())
    }
}

impl std::fmt::Debug for JsPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsPipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}
