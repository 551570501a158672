//! Gadgetkit - JavaScript build pipeline and content rewriting for gadget serving.
//!
//! Two independent chains, both configured once and shared across requests:
//!
//! - [`js::JsPipeline`]: ordered stages threading a [`js::JsResponseBuilder`]
//!   from requested features to a compiled script.
//! - [`rewrite::ContentRewriterRegistry`]: ordered rewriters applied to gadget
//!   markup or fetched responses.

pub mod cli;
pub mod config;
pub mod js;
pub mod logger;
pub mod rewrite;
