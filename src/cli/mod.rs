//! Command-line interface module.

mod args;
pub mod common;
pub mod js;
pub mod rewrite;

pub use args::{Cli, Commands, JsArgs, RewriteArgs};
