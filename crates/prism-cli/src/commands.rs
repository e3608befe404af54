use std::io::Write;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use prism_router::{Manifest, PrefixRouter};
use serde::Serialize;

use crate::cli::*;

#[derive(Serialize)]
struct Entry<'a> {
    key: &'a str,
    value: &'a str,
}

pub fn run_command(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let Cli { command, format, separator, .. } = cli;
    let separator = separator.as_deref();
    match command {
        Command::Resolve(args) => {
            let router = load_router(&args.manifest, separator)?;
            cmd_resolve(&router, &args.key, &format, out)
        }
        Command::Exists(args) => {
            let router = load_router(&args.manifest, separator)?;
            cmd_exists(&router, &args.key, &format, out)
        }
        Command::Keys(args) => cmd_keys(&load_router(&args.manifest, separator)?, &format, out),
        Command::Dump(args) => cmd_dump(&load_router(&args.manifest, separator)?, &format, out),
    }
}

fn load_router(path: &Path, separator: Option<&str>) -> anyhow::Result<PrefixRouter> {
    let mut manifest = Manifest::load(path)
        .with_context(|| format!("failed to load manifest {}", path.display()))?;
    if let Some(separator) = separator {
        manifest.router.separator = separator.to_string();
    }
    manifest
        .build()
        .with_context(|| format!("invalid manifest {}", path.display()))
}

fn cmd_resolve(
    router: &PrefixRouter,
    key: &str,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let value = router.resolve(key)?;
    match format {
        OutputFormat::Text => writeln!(out, "{value}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &Entry { key, value: &value })?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn cmd_exists(
    router: &PrefixRouter,
    key: &str,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let exists = router.exists(key);
    match format {
        OutputFormat::Text if exists => writeln!(out, "{}", "true".green())?,
        OutputFormat::Text => writeln!(out, "{}", "false".red())?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &serde_json::json!({ "key": key, "exists": exists }))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn cmd_keys(router: &PrefixRouter, format: &OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for key in router.enumerate_keys() {
                writeln!(out, "{key}")?;
            }
        }
        OutputFormat::Json => {
            let keys: Vec<String> = router.enumerate_keys().collect();
            serde_json::to_writer(&mut *out, &keys)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn cmd_dump(router: &PrefixRouter, format: &OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{router}")?,
        OutputFormat::Json => {
            let pairs: Vec<(String, String)> = router
                .enumerate_keys()
                .filter_map(|key| router.resolve(&key).ok().map(|value| (key, value)))
                .collect();
            let entries: Vec<Entry<'_>> = pairs
                .iter()
                .map(|(key, value)| Entry { key, value })
                .collect();
            serde_json::to_writer(&mut *out, &entries)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
