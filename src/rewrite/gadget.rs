//! Gadget rendering context consumed by rewriters.
//!
//! Gadgets and views are produced by spec parsing elsewhere; rewriters only
//! read them.

use rustc_hash::FxHashMap;
use url::Url;

use super::error::RewriteError;

/// How a view supplies its markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Markup is inline in the gadget spec.
    Html,
    /// The container navigates to `href`; nothing to rewrite inline.
    Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    name: String,
    kind: ViewKind,
    content: String,
    href: Option<Url>,
}

impl View {
    pub fn html(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ViewKind::Html,
            content: content.into(),
            href: None,
        }
    }

    pub fn url(name: impl Into<String>, href: Url) -> Self {
        Self {
            name: name.into(),
            kind: ViewKind::Url,
            content: String::new(),
            href: Some(href),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn href(&self) -> Option<&Url> {
        self.href.as_ref()
    }

    /// Inline markup of this view within `gadget`.
    pub fn markup(&self, gadget: &Gadget) -> Result<&str, RewriteError> {
        match self.kind {
            ViewKind::Html => Ok(&self.content),
            ViewKind::Url => Err(RewriteError::ViewNotInline {
                gadget: gadget.spec_url().to_string(),
                view: self.name.clone(),
            }),
        }
    }
}

/// A parsed gadget.
#[derive(Debug, Clone)]
pub struct Gadget {
    spec_url: Url,
    features: Vec<String>,
    views: FxHashMap<String, View>,
    container: String,
}

impl Gadget {
    pub fn new(spec_url: Url) -> Self {
        Self {
            spec_url,
            features: Vec::new(),
            views: FxHashMap::default(),
            container: crate::js::request::DEFAULT_CONTAINER.to_string(),
        }
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.views.insert(view.name.clone(), view);
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    /// Location of the gadget spec; relative references resolve against it.
    pub fn spec_url(&self) -> &Url {
        &self.spec_url
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn view(&self, name: &str) -> Option<&View> {
        self.views.get(name)
    }

    pub fn container(&self) -> &str {
        &self.container
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gadget() -> Gadget {
        Gadget::new(Url::parse("https://example.com/gadgets/hello.xml").unwrap())
            .with_feature("core")
            .with_view(View::html("default", "<b>hi</b>"))
            .with_view(View::url(
                "canvas",
                Url::parse("https://example.com/canvas.html").unwrap(),
            ))
    }

    #[test]
    fn test_html_view_markup() {
        let gadget = gadget();
        let view = gadget.view("default").unwrap();
        assert_eq!(view.markup(&gadget).unwrap(), "<b>hi</b>");
    }

    #[test]
    fn test_url_view_is_not_inline() {
        let gadget = gadget();
        let view = gadget.view("canvas").unwrap();
        let err = view.markup(&gadget).unwrap_err();
        assert!(err.to_string().contains("canvas"));
        assert!(err.to_string().contains("hello.xml"));
    }

    #[test]
    fn test_accessors() {
        let gadget = gadget().with_container("shell");
        assert_eq!(gadget.features(), ["core"]);
        assert_eq!(gadget.container(), "shell");
        assert!(gadget.view("missing").is_none());
    }
}
