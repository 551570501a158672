//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CONFIG_FILE;

/// Gadget JavaScript builder and content rewriter
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print per-stage and per-rewriter details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the JavaScript for a target uri, e.g. `/js/core:rpc.js?v=1`
    #[command(visible_alias = "j")]
    Js {
        #[command(flatten)]
        args: JsArgs,
    },

    /// Rewrite gadget markup or a fetched response body
    #[command(visible_alias = "r")]
    Rewrite {
        #[command(flatten)]
        args: RewriteArgs,
    },
}

/// Js command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct JsArgs {
    /// Target uri
    #[arg(value_name = "URI")]
    pub uri: String,

    /// Treat the request as conditional (If-Modified-Since)
    #[arg(long)]
    pub if_modified_since: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Rewrite command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RewriteArgs {
    /// Input file, `-` for stdin
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Gadget spec url (markup mode) or request url (response mode)
    #[arg(short, long)]
    pub url: String,

    /// Rewrite as a fetched response with this content type instead of gadget markup
    #[arg(long, value_name = "MIME")]
    pub content_type: Option<String>,

    /// Feature the gadget requires (markup mode, repeatable)
    #[arg(long = "feature", value_name = "NAME")]
    pub features: Vec<String>,

    /// Container rendering the gadget (markup mode)
    #[arg(long)]
    pub container: Option<String>,

    /// Gadget spec url the fetch was made for (response mode)
    #[arg(long, value_name = "URL")]
    pub gadget: Option<String>,

    /// Request method of the fetch (response mode)
    #[arg(long, default_value = "GET")]
    pub method: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
