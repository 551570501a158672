//! Build pipeline stages.
//!
//! | Stage               | Reads          | Writes                                | Stops when          |
//! |---------------------|----------------|---------------------------------------|---------------------|
//! | `if-modified-since` | request        | js (clear), status                    | conditional + `?v=` |
//! | `features`          | request        | js (append), errors, status           | unknown feature     |
//! | `onload`            | request        | js (append), errors, status           | invalid callback    |
//! | `compile`           | js, externs    | js (replace), externs, status, errors | never               |
//! | `caching`           | status, errors | cache ttl, proxy cacheable            | never               |

mod caching;
mod compilation;
mod features;
mod modified;
mod onload;

pub use caching::CachingProcessor;
pub use compilation::CompilationProcessor;
pub use features::FeatureResolutionProcessor;
pub use modified::IfModifiedSinceProcessor;
pub use onload::{ONLOAD_SOURCE, OnloadProcessor};
