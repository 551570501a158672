//! Minifying compiler backed by oxc.
//!
//! Fragments are parsed one by one so syntax errors can name their source.
//! Only when every fragment parses is the concatenation minified.
//! Exported APIs are global or property paths, which the mangler leaves alone
//! in script mode; each extern is still checked against the output.

use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::JsCompiler;
use crate::debug;
use crate::js::content::JsContent;
use crate::js::request::JsUri;
use crate::js::response::{JsResponse, JsResponseBuilder, STATUS_INTERNAL_ERROR};

/// Source name given to compiled output.
pub const COMPILED_SOURCE: &str = "[compiled]";

#[derive(Debug, Clone, Copy)]
pub struct OxcCompiler {
    mangle: bool,
}

impl Default for OxcCompiler {
    fn default() -> Self {
        Self { mangle: true }
    }
}

impl OxcCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle local-name mangling.
    pub fn with_mangle(mut self, mangle: bool) -> Self {
        self.mangle = mangle;
        self
    }

    fn minify(&self, source: &str) -> String {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::cjs()).parse();
        let mut program = ret.program;
        let options = MinifierOptions {
            mangle: self.mangle.then(MangleOptions::default),
            compress: Some(CompressOptions::smallest()),
        };
        let ret = Minifier::new(options).minify(&allocator, &mut program);
        Codegen::new()
            .with_options(CodegenOptions {
                minify: true,
                comments: CommentOptions::disabled(),
                ..CodegenOptions::default()
            })
            .with_scoping(ret.scoping)
            .build(&program)
            .code
    }
}

/// Syntax errors of one fragment, prefixed with its source name.
fn syntax_errors(content: &JsContent) -> Vec<String> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, content.get(), SourceType::cjs()).parse();
    ret.errors
        .iter()
        .map(|e| format!("{}: {}", content.source(), e))
        .collect()
}

/// Externs whose final path segment does not appear as a whole identifier
/// in `code`.
fn missing_externs<'a>(code: &str, externs: &'a [String]) -> impl Iterator<Item = &'a String> {
    externs.iter().filter(move |name| {
        let symbol = name.rsplit('.').next().unwrap_or(name.as_str());
        !contains_identifier(code, symbol)
    })
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn contains_identifier(code: &str, ident: &str) -> bool {
    !ident.is_empty()
        && code.match_indices(ident).any(|(start, _)| {
            let before = code[..start].chars().next_back();
            let after = code[start + ident.len()..].chars().next();
            !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
        })
}

impl JsCompiler for OxcCompiler {
    fn compile(
        &self,
        target: &JsUri,
        content: &[JsContent],
        externs: &[String],
    ) -> anyhow::Result<JsResponse> {
        let mut builder = JsResponseBuilder::new();
        builder.append_externs(externs.iter().cloned());

        if target.is_debug() {
            debug!("js"; "debug target {}, skipping minification", target.target());
            builder.append_all_js(content.iter().cloned());
            return Ok(builder.into_response());
        }

        let errors: Vec<String> = content.iter().flat_map(syntax_errors).collect();
        if !errors.is_empty() {
            builder
                .append_all_js(content.iter().cloned())
                .set_status_code(STATUS_INTERNAL_ERROR)
                .add_errors(errors);
            return Ok(builder.into_response());
        }

        let code = self.minify(&JsContent::concat(content));

        let lost: Vec<String> = missing_externs(&code, externs)
            .map(|name| format!("extern `{name}` was removed by the compiler"))
            .collect();
        builder
            .append_js(JsContent::from_text(&code, COMPILED_SOURCE))
            .add_errors(lost);
        Ok(builder.into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::js::response::STATUS_OK;

    fn target(uri: &str) -> JsUri {
        JsUri::parse(uri).unwrap()
    }

    #[test]
    fn test_minifies_into_single_fragment() {
        let content = vec![
            JsContent::from_text("var gadgets = gadgets || {};\n", "globals"),
            JsContent::from_text(
                "gadgets.util = { makeClosure: function (scope, callback) { return callback; } };\n",
                "core",
            ),
        ];
        let response = OxcCompiler::new()
            .compile(&target("/js/core.js"), &content, &["gadgets.util.makeClosure".into()])
            .unwrap();

        assert_eq!(response.status_code(), STATUS_OK);
        assert!(response.errors().is_empty(), "{:?}", response.errors());
        assert_eq!(response.js().len(), 1);
        assert_eq!(response.js()[0].source(), COMPILED_SOURCE);
        assert!(response.js()[0].get().contains("makeClosure"));
        assert!(response.to_js_string().len() < content.iter().map(|c| c.get().len()).sum::<usize>());
    }

    #[test]
    fn test_syntax_errors_are_data() {
        let content = vec![
            JsContent::from_text("var ok = 1;", "fine"),
            JsContent::from_text("function (", "broken"),
        ];
        let response = OxcCompiler::new()
            .compile(&target("/js/core.js"), &content, &[])
            .unwrap();

        assert_eq!(response.status_code(), STATUS_INTERNAL_ERROR);
        assert!(!response.errors().is_empty());
        assert!(response.errors().iter().all(|e| e.starts_with("broken: ")));
        assert_eq!(response.js(), content.as_slice());
    }

    #[test]
    fn test_debug_target_is_not_minified() {
        let content = vec![JsContent::from_text("var  spaced  =  1;", "a")];
        let response = OxcCompiler::new()
            .compile(&target("/js/core.js?debug=1"), &content, &[])
            .unwrap();
        assert_eq!(response.js(), content.as_slice());
    }

    #[test]
    fn test_missing_externs() {
        let externs = vec!["gadgets.util.present".to_string(), "gadgets.gone".to_string()];
        let missing: Vec<_> = missing_externs("a.present=1", &externs).collect();
        assert_eq!(missing, vec!["gadgets.gone"]);
    }

    #[test]
    fn test_extern_must_match_whole_identifier() {
        let externs = vec!["x.util".to_string(), "x.$get".to_string()];
        let missing: Vec<_> = missing_externs("a.utility=1;b.$getter=2", &externs).collect();
        assert_eq!(missing, vec!["x.util", "x.$get"]);

        let missing: Vec<_> = missing_externs("a.util=1;b[\"$get\"]=2", &externs).collect();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_fragments_without_semicolons_compile() {
        let content = vec![
            JsContent::from_text("window.f = function () { return 1 }", "core"),
            JsContent::from_text("(function () { window.g = 2 })()", "[onload]"),
        ];
        let response = OxcCompiler::new()
            .compile(&target("/js/core.js"), &content, &["window.g".into()])
            .unwrap();
        assert_eq!(response.status_code(), STATUS_OK);
        assert!(response.errors().is_empty(), "{:?}", response.errors());
    }
}
