//! tacdoc: generate HTML reference pages and version manifests for the
//! TAC Lua tree by parsing its annotated source comments.
//!
//! With no arguments the tool scans the current directory and writes into
//! `docs/`, creating it if absent. Per-file failures are reported as
//! warnings and never fail the run.

mod discover;
mod manifest;
mod model;
mod parser;
mod project;
mod render;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "tacdoc",
    about = "Generate TAC documentation and version manifests from annotated Lua sources"
)]
struct Cli {
    /// Source tree root to scan
    #[arg(short = 'i', long, default_value = ".")]
    input: PathBuf,

    /// Output directory (defaults to docs/ under the input root)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = cli.output.unwrap_or_else(|| cli.input.join("docs"));
    run(&cli.input, &output)
}

fn run(input_dir: &Path, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let files = discover::lua_files(input_dir)?;
    let modules = parse_modules(input_dir, &files);

    for module in &modules {
        let path = output_dir.join(module.page_name());
        fs::write(&path, render::html::module_page(module))
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let index_path = output_dir.join("index.html");
    fs::write(&index_path, render::index::index_page(&modules))
        .with_context(|| format!("failed to write {}", index_path.display()))?;

    write_api(input_dir, output_dir, &modules)?;

    println!(
        "generated documentation for {} modules in {}",
        modules.len(),
        output_dir.display()
    );
    Ok(())
}

/// Parse every discovered file, keeping only documented modules.
///
/// Unreadable files are reported and skipped; one bad file never aborts
/// the run.
fn parse_modules(input_dir: &Path, files: &[String]) -> Vec<model::Module> {
    let mut modules = Vec::new();
    for rel in files {
        match fs::read_to_string(input_dir.join(rel)) {
            Ok(content) => {
                let module = parser::parse_file(rel, &content);
                if module.is_documented() {
                    modules.push(module);
                }
            }
            Err(e) => println!("warning: skipping {}: {}", rel, e),
        }
    }
    modules
}

fn write_api(input_dir: &Path, output_dir: &Path, modules: &[model::Module]) -> Result<()> {
    let api_dir = output_dir.join("api");
    fs::create_dir_all(&api_dir)
        .with_context(|| format!("failed to create api directory: {}", api_dir.display()))?;

    let command_files = discover::command_files(input_dir)?;
    write_json(
        &api_dir.join("versions.json"),
        &manifest::build_versions(modules, &command_files),
    )?;

    let updated_at = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    write_json(
        &api_dir.join("latest.json"),
        &manifest::build_latest(modules, updated_at),
    )?;

    for ext in manifest::extension_manifests(modules) {
        write_json(&api_dir.join(format!("{}.json", ext.name)), &ext)?;
    }
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
