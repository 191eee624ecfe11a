use std::{io::Read, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use reqmap::{RequestMapConfig, RequestMapResolver, http::req::Request};

/// Print the normalized parameter map of a raw HTTP request as JSON.
#[derive(Parser, Debug)]
#[command(name = "reqmap")]
struct Opt {
    /// Raw HTTP request file; stdin when omitted.
    #[arg(long)]
    request: Option<PathBuf>,

    /// Route pattern the request path is matched against, e.g. `/user/:id`.
    #[arg(long)]
    pattern: String,

    /// Keep surrounding whitespace.
    #[arg(long)]
    no_strip: bool,

    /// Keep duplicate values.
    #[arg(long)]
    no_distinct: bool,

    /// Always print value lists, even for single values.
    #[arg(long)]
    multi: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::parse();

    let raw = match &opt.request {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).context("reading stdin")?;
            buf
        }
    };

    let mut meta = Request::parse(&raw).context("parsing request")?;
    meta.route(&opt.pattern).context("routing request")?;

    let config = RequestMapConfig::new()
        .allow_strip(!opt.no_strip)
        .allow_distinct(!opt.no_distinct)
        .multi_value(opt.multi);

    let map = RequestMapResolver::default().resolve(&meta, &config)?;
    println!("{}", serde_json::to_string_pretty(&map)?);
    Ok(())
}
