//! `rewrite` command: run the rewriter chain over a file.

use std::sync::Arc;

use anyhow::{Context, Result};
use url::Url;

use super::args::RewriteArgs;
use super::common::{read_input, write_output};
use crate::config::GadgetConfig;
use crate::rewrite::{ContentRewriterRegistry, Gadget, HttpRequest, HttpResponse};
use crate::{debug, log};

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).with_context(|| format!("invalid url `{raw}`"))
}

/// Gadget context for markup mode.
fn gadget_from_args(args: &RewriteArgs, url: Url) -> Gadget {
    let mut gadget = args
        .features
        .iter()
        .fold(Gadget::new(url), |gadget, feature| gadget.with_feature(feature));
    if let Some(container) = &args.container {
        gadget = gadget.with_container(container);
    }
    gadget
}

/// Request context for response mode.
fn request_from_args(args: &RewriteArgs, url: Url) -> Result<HttpRequest> {
    let mut request = HttpRequest::new(url).with_method(&args.method);
    if let Some(gadget) = &args.gadget {
        request = request.with_gadget(parse_url(gadget)?);
    }
    Ok(request)
}

pub fn run_rewrite(args: &RewriteArgs, config: &GadgetConfig) -> Result<()> {
    let registry = ContentRewriterRegistry::from_config(&config.rewrite);
    debug!("rewrite"; "chain: {:?}", registry.names());

    let url = parse_url(&args.url)?;
    let input = read_input(&args.input)?;

    let output = match &args.content_type {
        None => {
            let gadget = gadget_from_args(args, url);
            debug!(
                "rewrite"; "gadget {} (container {}, features {:?})",
                gadget.spec_url(), gadget.container(), gadget.features()
            );
            registry.rewrite_gadget(&gadget, &input)?
        }
        Some(content_type) => {
            let request = request_from_args(args, url)?;
            let response =
                Arc::new(HttpResponse::new(200, input).with_header("Content-Type", content_type));
            let rewritten = registry.rewrite_http_response(&request, Arc::clone(&response))?;
            if Arc::ptr_eq(&response, &rewritten) {
                log!("rewrite"; "{}: unchanged", args.url);
            }
            String::from_utf8_lossy(rewritten.body()).into_owned()
        }
    };

    write_output(args.output.as_deref(), &output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{Cli, Commands};
    use clap::Parser;

    fn rewrite_args(argv: &[&str]) -> RewriteArgs {
        let cli = Cli::try_parse_from(["gadgetkit", "rewrite"].iter().chain(argv)).unwrap();
        match cli.command {
            Commands::Rewrite { args } => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_gadget_context_from_args() {
        let args = rewrite_args(&[
            "-",
            "-u",
            "https://example.com/g.xml",
            "--feature",
            "core",
            "--container",
            "shell",
        ]);
        let gadget = gadget_from_args(&args, parse_url(&args.url).unwrap());
        assert_eq!(gadget.features(), ["core"]);
        assert_eq!(gadget.container(), "shell");
    }

    #[test]
    fn test_request_context_from_args() {
        let args = rewrite_args(&[
            "-",
            "-u",
            "https://example.com/data.css",
            "--content-type",
            "text/css",
            "--method",
            "POST",
            "--gadget",
            "https://example.com/g.xml",
        ]);
        let request = request_from_args(&args, parse_url(&args.url).unwrap()).unwrap();
        assert_eq!(request.method(), "POST");
        assert_eq!(request.gadget().map(Url::as_str), Some("https://example.com/g.xml"));
    }

    #[test]
    fn test_invalid_gadget_url_is_an_error() {
        let args = rewrite_args(&["-", "-u", "https://example.com/a", "--gadget", "not a url"]);
        assert!(request_from_args(&args, parse_url(&args.url).unwrap()).is_err());
    }
}
