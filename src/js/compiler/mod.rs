//! Compilers invoked by the compilation stage.
//!
//! | Compiler      | Behavior                                    |
//! |---------------|---------------------------------------------|
//! | `passthrough` | Returns the content unchanged               |
//! | `oxc`         | Minifies with oxc, skipped for debug builds |

mod minify;
mod passthrough;

pub use minify::{COMPILED_SOURCE, OxcCompiler};
pub use passthrough::PassthroughCompiler;

use super::content::JsContent;
use super::request::JsUri;
use super::response::JsResponse;

/// Compiles ordered script fragments for one target.
///
/// Syntax problems in the input are reported through the returned response's
/// status code and errors. An `Err` means the compiler itself could not run.
pub trait JsCompiler: Send + Sync {
    fn compile(
        &self,
        target: &JsUri,
        content: &[JsContent],
        externs: &[String],
    ) -> anyhow::Result<JsResponse>;
}
