//! Stylesheet minification.
//!
//! Uses lightningcss. CSS that fails to parse is left untouched.

use std::sync::LazyLock;

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use regex::{Captures, Regex};

use crate::rewrite::ContentRewriter;
use crate::rewrite::gadget::Gadget;
use crate::rewrite::http::{HttpRequest, HttpResponse};

static RE_STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(<[sS][tT][yY][lL][eE][^>]*>)(.*?)(</[sS][tT][yY][lL][eE]>)").unwrap()
});

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Option<String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default()).ok()?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .ok()?;
    Some(result.code)
}

/// Minify every `<style>` block in `markup`. `None` when nothing changed.
fn minify_style_blocks(markup: &str) -> Option<String> {
    let mut changed = false;
    let rewritten = RE_STYLE_BLOCK.replace_all(markup, |caps: &Captures<'_>| {
        match minify_css(&caps[2]).filter(|css| css != &caps[2]) {
            Some(css) => {
                changed = true;
                format!("{}{css}{}", &caps[1], &caps[3])
            }
            None => caps[0].to_string(),
        }
    });
    changed.then(|| rewritten.into_owned())
}

/// Minifies inline `<style>` blocks and `text/css` responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssMinifier;

impl ContentRewriter for CssMinifier {
    fn name(&self) -> &'static str {
        "minify-css"
    }

    fn rewrite_gadget(&self, _gadget: &Gadget, content: &str) -> anyhow::Result<Option<String>> {
        Ok(minify_style_blocks(content))
    }

    fn rewrite_response(
        &self,
        _request: &HttpRequest,
        response: &HttpResponse,
    ) -> anyhow::Result<Option<HttpResponse>> {
        if response.content_type().as_deref() != Some("text/css") {
            return Ok(None);
        }
        let minified = response
            .text()
            .and_then(|text| minify_css(text).filter(|css| css != text));
        Ok(minified.map(|css| response.with_body(css)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn gadget() -> Gadget {
        Gadget::new(Url::parse("https://example.com/g.xml").unwrap())
    }

    #[test]
    fn test_minify_css() {
        let css = minify_css(".a {\n  color: red;\n}\n").unwrap();
        assert_eq!(css, ".a{color:red}");
    }

    #[test]
    fn test_style_blocks_in_markup() {
        let markup = "<style type=\"text/css\">\n.a {\n  color: red;\n}\n</style><p>keep   me</p>";
        let result = CssMinifier.rewrite_gadget(&gadget(), markup).unwrap().unwrap();
        assert_eq!(result, "<style type=\"text/css\">.a{color:red}</style><p>keep   me</p>");
    }

    #[test]
    fn test_style_block_containing_angle_bracket() {
        let markup = "<style>\n.a:before {\n  content: \"<\";\n}\n</style><style>.b {\n  margin: 0;\n}</style>";
        let result = CssMinifier.rewrite_gadget(&gadget(), markup).unwrap().unwrap();
        assert_eq!(
            result,
            "<style>.a:before{content:\"<\"}</style><style>.b{margin:0}</style>"
        );
    }

    #[test]
    fn test_already_minified_markup_is_unchanged() {
        let markup = "<style>.a{color:red}</style>";
        assert!(CssMinifier.rewrite_gadget(&gadget(), markup).unwrap().is_none());
    }

    #[test]
    fn test_css_response() {
        let request = HttpRequest::new(Url::parse("https://example.com/site.css").unwrap());
        let response = HttpResponse::new(200, "body {\n  margin: 0;\n}\n")
            .with_header("content-type", "text/css; charset=utf-8");
        let rewritten = CssMinifier.rewrite_response(&request, &response).unwrap().unwrap();
        assert_eq!(rewritten.text(), Some("body{margin:0}"));
        assert_eq!(rewritten.header("content-type"), Some("text/css; charset=utf-8"));
    }

    #[test]
    fn test_other_content_types_are_ignored() {
        let request = HttpRequest::new(Url::parse("https://example.com/data.json").unwrap());
        let response = HttpResponse::new(200, "{ \"a\": 1 }").with_header("content-type", "application/json");
        assert!(CssMinifier.rewrite_response(&request, &response).unwrap().is_none());
    }
}
