//! Failures of the JavaScript build pipeline.
//!
//! Only failures that prevent a stage from executing live here. Ordinary
//! compile problems are recorded on the response builder as status and
//! error messages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsError {
    #[error("invalid js uri `{uri}`: {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("compiler failed for `{target}`")]
    Compiler {
        target: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("stage `{stage}` failed")]
    Stage {
        stage: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl JsError {
    pub fn invalid_uri(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUri {
            uri: uri.into(),
            reason: reason.into(),
        }
    }
}
