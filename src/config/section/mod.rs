//! Configuration section definitions.
//!
//! | Module    | TOML Section   | Purpose                                |
//! |-----------|----------------|----------------------------------------|
//! | `js`      | `[js]`         | Build stages, compiler, features       |
//! | `rewrite` | `[rewrite]`    | Content rewriter chain                 |

pub mod js;
pub mod rewrite;

pub use js::{CompilerKind, FeatureConfig, JsSectionConfig, StageKind};
pub use rewrite::{RewriteSectionConfig, RewriterKind};
