//! JavaScript build pipeline.
//!
//! # Module Structure
//!
//! ```text
//! js/
//! ├── content     # JsContent
//! ├── feature     # FeatureBundle, FeatureLookup, FeatureRegistry
//! ├── request     # JsUri, JsRequest
//! ├── response    # JsResponse, JsResponseBuilder
//! ├── error       # JsError
//! ├── pipeline    # JsProcessor, JsPipeline
//! ├── processor/  # Concrete stages
//! ├── compiler/   # JsCompiler implementations
//! └── setup       # Pipeline assembly from config
//! ```

pub mod compiler;
pub mod content;
pub mod error;
pub mod feature;
pub mod pipeline;
pub mod processor;
pub mod request;
pub mod response;
pub mod setup;

pub use compiler::{JsCompiler, OxcCompiler, PassthroughCompiler};
pub use content::JsContent;
pub use error::JsError;
pub use feature::{ApiDirective, ApiType, FeatureBundle, FeatureLookup, FeatureRegistry};
pub use pipeline::{CONTINUE, Flow, JsPipeline, JsProcessor, STOP};
pub use request::{JsRequest, JsUri};
pub use response::{JsResponse, JsResponseBuilder, StatusCode};
