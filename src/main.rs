//! tessera command-line entry point

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use tessera::cli::{run, CliArgs};
use tessera::config::EngineConfig;

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            Ok(source)
        }
    }
}

fn main() -> Result<()> {
    tessera::tracing::init();

    let args = CliArgs::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    };

    let source = if args.action.needs_input() {
        read_input(args.action.input().map(|p| p.as_path()))?
    } else {
        String::new()
    };

    let output = run(&args.action, &source, config, args.json)?;
    println!("{}", output);
    Ok(())
}
