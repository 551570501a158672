//! Relative URL absolutization.
//!
//! Relative `href`/`src` references only work where the markup was authored.
//! Once rendered inside a container they must point at the gadget's origin.
//!
//! | Reference        | Example           | Result                   |
//! |------------------|-------------------|--------------------------|
//! | Absolute         | `https://...`     | Preserved                |
//! | Fragment         | `#top`            | Preserved                |
//! | Inline scheme    | `data:`, `mailto:`| Preserved                |
//! | Relative         | `img/a.png`       | Joined with the base url |

use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

use crate::rewrite::ContentRewriter;
use crate::rewrite::gadget::Gadget;
use crate::rewrite::http::{HttpRequest, HttpResponse};

static RE_URL_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([ \t\r\n])([hH][rR][eE][fF]|[sS][rR][cC])([ \t\r\n]*=[ \t\r\n]*)("[^"]*"|'[^']*')"#)
        .unwrap()
});

/// Schemes that never refer to a fetchable resource.
const INLINE_SCHEMES: [&str; 4] = ["data:", "javascript:", "mailto:", "about:"];

/// Resolve one reference against `base`, or `None` to keep it as is.
fn resolve(value: &str, base: &Url) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if INLINE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return None;
    }
    if Url::parse(trimmed).is_ok() {
        return None;
    }
    base.join(trimmed).ok().map(String::from)
}

/// Rewrite relative href/src attributes in `markup` against `base`.
///
/// Returns `None` when nothing changed.
pub fn absolutize(markup: &str, base: &Url) -> Option<String> {
    let mut changed = false;
    let rewritten = RE_URL_ATTR.replace_all(markup, |caps: &Captures<'_>| {
        let quoted = &caps[4];
        let quote = &quoted[..1];
        let value = &quoted[1..quoted.len() - 1];
        match resolve(value, base) {
            Some(url) => {
                changed = true;
                format!("{}{}{}{quote}{url}{quote}", &caps[1], &caps[2], &caps[3])
            }
            None => caps[0].to_string(),
        }
    });
    changed.then(|| rewritten.into_owned())
}

/// Makes relative references absolute.
///
/// Gadget markup resolves against the spec url, responses against the url
/// they were fetched from. Non-HTML responses are left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct UrlAbsolutizer;

impl ContentRewriter for UrlAbsolutizer {
    fn name(&self) -> &'static str {
        "absolutize-urls"
    }

    fn rewrite_gadget(&self, gadget: &Gadget, content: &str) -> anyhow::Result<Option<String>> {
        Ok(absolutize(content, gadget.spec_url()))
    }

    fn rewrite_response(
        &self,
        request: &HttpRequest,
        response: &HttpResponse,
    ) -> anyhow::Result<Option<HttpResponse>> {
        if response.content_type().as_deref() != Some("text/html") {
            return Ok(None);
        }
        let Some(text) = response.text() else {
            return Ok(None);
        };
        Ok(absolutize(text, request.url()).map(|body| response.with_body(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/gadgets/hello.xml").unwrap()
    }

    #[test]
    fn test_relative_references_are_joined() {
        let markup = r#"<img src="img/a.png"><a href='../about.html'>x</a>"#;
        let result = absolutize(markup, &base()).unwrap();
        assert_eq!(
            result,
            r#"<img src="https://example.com/gadgets/img/a.png"><a href='https://example.com/about.html'>x</a>"#
        );
    }

    #[test]
    fn test_root_relative_reference() {
        let result = absolutize(r#"<script src="/js/app.js"></script>"#, &base()).unwrap();
        assert_eq!(result, r#"<script src="https://example.com/js/app.js"></script>"#);
    }

    #[test]
    fn test_preserved_references() {
        for markup in [
            r##"<a href="#top">x</a>"##,
            r#"<a href="https://other.org/">x</a>"#,
            r#"<a href="mailto:a@b.c">x</a>"#,
            r#"<img src="data:image/png;base64,AAAA">"#,
            r#"<a href="">x</a>"#,
            "<p>no links</p>",
        ] {
            assert_eq!(absolutize(markup, &base()), None, "{markup}");
        }
    }

    #[test]
    fn test_attribute_case_and_spacing() {
        let result = absolutize(r#"<IMG SRC = "a.png">"#, &base()).unwrap();
        assert_eq!(result, r#"<IMG SRC = "https://example.com/gadgets/a.png">"#);
    }

    #[test]
    fn test_attribute_names_must_stand_alone() {
        assert_eq!(absolutize(r#"<div data-src="a.png"></div>"#, &base()), None);
    }

    #[test]
    fn test_gadget_markup_uses_spec_url() {
        let gadget = Gadget::new(base());
        let result = UrlAbsolutizer.rewrite_gadget(&gadget, r#"<a href="b.html">"#).unwrap();
        assert_eq!(
            result.as_deref(),
            Some(r#"<a href="https://example.com/gadgets/b.html">"#)
        );
    }

    #[test]
    fn test_only_html_responses_are_rewritten() {
        let request = HttpRequest::new(Url::parse("https://cdn.example.com/page/index.html").unwrap());

        let html = HttpResponse::new(200, r#"<a href="next.html">"#).with_header("Content-Type", "text/html");
        let rewritten = UrlAbsolutizer.rewrite_response(&request, &html).unwrap().unwrap();
        assert_eq!(
            rewritten.text(),
            Some(r#"<a href="https://cdn.example.com/page/next.html">"#)
        );

        let json = HttpResponse::new(200, r#"{"a":" href=\"x\""}"#)
            .with_header("Content-Type", "application/json");
        assert!(UrlAbsolutizer.rewrite_response(&request, &json).unwrap().is_none());
    }
}
