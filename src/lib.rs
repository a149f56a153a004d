pub mod adapters;
pub mod cli;
pub mod config;
pub mod display;
pub mod domain;
pub mod errors;
pub mod normalizer;
pub mod output;
pub mod services;
pub mod stats;
pub mod tracker;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Command};
use crate::config::settings::AppConfig;
use crate::services::processing::ProcessingService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_analyze(xml_file: Option<&Path>) -> Result<()> {
    let path = match xml_file {
        Some(path) => path.to_path_buf(),
        None => find_xml_file(Path::new("."))?,
    };
    let config = AppConfig::new();
    let service = ProcessingService::new(config);
    service.run(&path)
}

pub fn handle_display(compact: bool) -> Result<()> {
    let config = AppConfig::new();
    display::show_play_table(&config, compact)
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

/// First `*.xml` file of `dir` in file-name order
fn find_xml_file(dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory: {}", dir.display()))?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
        })
        .collect();
    candidates.sort();
    candidates
        .into_iter()
        .next()
        .with_context(|| format!("No XML file given and none found in {}", dir.display()))
}
