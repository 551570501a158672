//! Fetched resources passed through the rewriter chain.

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    url: Url,
    method: String,
    /// Spec url of the gadget the fetch was made for, if any.
    gadget: Option<Url>,
}

impl HttpRequest {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            method: "GET".to_string(),
            gadget: None,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_gadget(mut self, gadget: Url) -> Self {
        self.gadget = Some(gadget);
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn gadget(&self) -> Option<&Url> {
        self.gadget.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Lowercased media type without parameters, e.g. `text/html`.
    pub fn content_type(&self) -> Option<String> {
        let value = self.header("content-type")?;
        let mime = value.split(';').next().unwrap_or_default().trim();
        (!mime.is_empty()).then(|| mime.to_ascii_lowercase())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8 text, if it is valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Copy of this response with a new body.
    pub fn with_body(&self, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: self.status,
            headers: self.headers.clone(),
            body: body.into(),
        }
    }
}
