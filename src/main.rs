use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use bidifix_config::BidifixConfig;
use bidifix_engine::Engine;
use tracing::info;

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the annotated document when
    // no --out file is given.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bidifix=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        eprintln!(
            "Usage: bidifix <html-file> [--url <page-url>] [--out <file>] [--config <bidifix.toml>]"
        );
        bail!("missing <html-file>");
    }

    let input = PathBuf::from(args.remove(0));
    if !input.exists() {
        bail!("input file not found: {}", input.display());
    }

    let mut url = String::from("https://claude.ai/");
    let mut out: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--url" => {
                if i + 1 >= args.len() {
                    bail!("--url expects a value");
                }
                url = args[i + 1].clone();
                i += 2;
            }
            "--out" => {
                if i + 1 >= args.len() {
                    bail!("--out expects a path");
                }
                out = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--config" => {
                if i + 1 >= args.len() {
                    bail!("--config expects a path");
                }
                config_path = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    let config = match &config_path {
        Some(path) => BidifixConfig::load_from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => BidifixConfig::load(),
    };

    let html = fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let mut engine = Engine::new(&config);
    let outcome = engine.load(&html, &url, Instant::now());
    info!(
        platform = engine.platform().unwrap_or("generic"),
        containers = outcome.report.containers,
        visited = outcome.report.visited,
        styled = outcome.report.styled,
        "annotation finished"
    );

    let annotated = engine.html();
    match out {
        Some(path) => fs::write(&path, annotated)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{annotated}"),
    }

    Ok(())
}
