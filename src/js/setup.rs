//! Assemble the build pipeline from configuration.

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::compiler::{JsCompiler, OxcCompiler, PassthroughCompiler};
use super::feature::{ApiDirective, ApiType, FeatureBundle, FeatureLookup, FeatureRegistry};
use super::pipeline::{JsPipeline, JsProcessor};
use super::processor::{
    CachingProcessor, CompilationProcessor, FeatureResolutionProcessor, IfModifiedSinceProcessor,
    OnloadProcessor,
};
use crate::config::{CompilerKind, GadgetConfig, JsSectionConfig, StageKind};
use crate::{debug, log};

/// Read every `[[js.feature]]` script and register its bundle.
pub fn load_features(config: &GadgetConfig) -> Result<FeatureRegistry> {
    let mut registry = FeatureRegistry::new();
    for feature in &config.js.features {
        let path = config.resolve(&config.js.script_path(feature));
        let script = fs::read_to_string(&path)
            .with_context(|| format!("failed to read feature `{}` from {}", feature.name, path.display()))?;

        let mut bundle = FeatureBundle::new(&feature.name, script);
        for api in &feature.exports {
            bundle = bundle.with_api(ApiDirective::exported(ApiType::Js, api));
        }
        for api in &feature.requires {
            bundle = bundle.with_api(ApiDirective::required(ApiType::Js, api));
        }
        for dep in &feature.deps {
            bundle = bundle.with_dep(dep);
        }
        registry.register(bundle);
    }
    if registry.is_empty() {
        log!("warning"; "no [[js.feature]] entries configured");
    } else {
        debug!("js"; "registered {} features", registry.len());
    }
    Ok(registry)
}

/// Compiler selected by `[js].compiler`.
pub fn compiler_from_config(config: &JsSectionConfig) -> Arc<dyn JsCompiler> {
    match config.compiler {
        CompilerKind::Oxc => Arc::new(OxcCompiler::new().with_mangle(config.mangle)),
        CompilerKind::Passthrough => Arc::new(PassthroughCompiler),
    }
}

/// Build the stage list in configured order.
pub fn pipeline_from_config(config: &JsSectionConfig, lookup: Arc<dyn FeatureLookup>) -> JsPipeline {
    let compiler = compiler_from_config(config);
    let stages = config
        .stages
        .iter()
        .map(|kind| -> Box<dyn JsProcessor> {
            match kind {
                StageKind::IfModifiedSince => Box::new(IfModifiedSinceProcessor),
                StageKind::Features => Box::new(FeatureResolutionProcessor::new(Arc::clone(&lookup))),
                StageKind::Onload => Box::new(OnloadProcessor),
                StageKind::Compile => Box::new(CompilationProcessor::new(Arc::clone(&compiler))),
                StageKind::Caching => Box::new(CachingProcessor::new(
                    config.versioned_ttl,
                    config.unversioned_ttl,
                )),
            }
        })
        .collect();
    JsPipeline::new(stages)
}
