//! `js` command: run the build pipeline for one target.

use std::sync::Arc;

use anyhow::{Result, bail};

use super::args::JsArgs;
use super::common::write_output;
use crate::config::GadgetConfig;
use crate::js::response::STATUS_NOT_MODIFIED;
use crate::js::setup::{load_features, pipeline_from_config};
use crate::js::{JsRequest, JsUri};
use crate::log;

pub fn run_js(args: &JsArgs, config: &GadgetConfig) -> Result<()> {
    let registry = load_features(config)?;
    let pipeline = pipeline_from_config(&config.js, Arc::new(registry));

    let uri = JsUri::parse(&args.uri)?;
    let request = JsRequest::new(uri).with_if_modified_since(args.if_modified_since);
    let response = pipeline.execute(&request)?;

    for error in response.errors() {
        log!("warning"; "{}", error);
    }

    match response.status_code() {
        STATUS_NOT_MODIFIED => {
            log!("js"; "{}: not modified", args.uri);
            Ok(())
        }
        _ if response.is_success() => {
            write_output(args.output.as_deref(), &response.to_js_string())?;
            log!(
                "js"; "{}: {} externs, cache ttl {}s",
                args.uri,
                response.externs().len(),
                response.cache_ttl_secs().unwrap_or_default()
            );
            Ok(())
        }
        status => bail!("build of `{}` failed with status {}", args.uri, status),
    }
}
