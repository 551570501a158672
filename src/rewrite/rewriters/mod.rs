//! Built-in content rewriters.
//!
//! | Rewriter          | Gadget markup            | Responses          |
//! |-------------------|--------------------------|--------------------|
//! | `absolutize-urls` | href/src vs. spec url    | `text/html`        |
//! | `minify-css`      | `<style>` blocks         | `text/css`         |

mod css;
mod links;

pub use css::{CssMinifier, minify_css};
pub use links::{UrlAbsolutizer, absolutize};
