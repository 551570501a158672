use super::JsCompiler;
use crate::js::content::JsContent;
use crate::js::request::JsUri;
use crate::js::response::{JsResponse, JsResponseBuilder};

/// Compiler that performs no transformation.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughCompiler;

impl JsCompiler for PassthroughCompiler {
    fn compile(
        &self,
        _target: &JsUri,
        content: &[JsContent],
        externs: &[String],
    ) -> anyhow::Result<JsResponse> {
        let mut builder = JsResponseBuilder::new();
        builder
            .append_all_js(content.iter().cloned())
            .append_externs(externs.iter().cloned());
        Ok(builder.into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_preserves_content() {
        let target = JsUri::parse("/js/core.js").unwrap();
        let content = vec![
            JsContent::from_text("var a = 1;", "a"),
            JsContent::from_text("var b = 2;", "b"),
        ];
        let response = PassthroughCompiler
            .compile(&target, &content, &["a".to_string()])
            .unwrap();
        assert_eq!(response.js(), content.as_slice());
        assert!(response.is_success());
        assert!(response.errors().is_empty());
    }
}
