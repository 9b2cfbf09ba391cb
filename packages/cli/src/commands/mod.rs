pub mod branch;
pub mod init;
pub mod search;
pub mod template;
pub mod transfer;
pub mod version;

pub use branch::{branch, merge, BranchArgs, MergeArgs};
pub use init::{init, InitArgs};
pub use search::{search, SearchArgs};
pub use template::{template, TemplateCommand};
pub use transfer::{clone, export, import, CloneArgs, ExportArgs, ImportArgs};
pub use version::{diff, log, revert, save, show, DiffArgs, LogArgs, RevertArgs, SaveArgs, ShowArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use folio_diff::{ChangeKind, PageDiff};
use folio_layout::Layout;
use folio_store::{FileBackend, PageService, PageVersion};
use std::path::{Path, PathBuf};
use tracing::debug;

pub(crate) type Service = PageService<FileBackend>;

/// Open the store named by the config in `cwd`
pub(crate) async fn open_service(cwd: &str) -> Result<(Config, Service)> {
    let config = Config::load(cwd)?;
    let store_dir = config.get_store_dir(cwd);
    let backend = FileBackend::open(&store_dir)
        .await
        .with_context(|| format!("Cannot open store at {}", store_dir.display()))?;
    debug!(store = %store_dir.display(), author = %config.author, "Opened page store");
    let service = PageService::with_config(backend, config.service_config());
    Ok((config, service))
}

pub(crate) fn resolve(cwd: &str, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        PathBuf::from(cwd).join(path)
    }
}

pub(crate) fn read_layout(cwd: &str, path: &Path) -> Result<Layout> {
    let path = resolve(cwd, path);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not a valid layout", path.display()))
}

pub(crate) fn format_time(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| millis.to_string())
}

pub(crate) fn print_version_line(version: &PageVersion) {
    let branch = version
        .branch_name
        .as_deref()
        .map(|b| format!(" [{}]", b).cyan().to_string())
        .unwrap_or_default();

    println!(
        "  {} {}{} {}",
        version.id.yellow(),
        format_time(version.timestamp).dimmed(),
        branch,
        version.metadata.name.bright_white()
    );
}

pub(crate) fn print_diff(diff: &PageDiff) {
    if diff.is_empty() {
        println!("  {}", "No changes".dimmed());
        return;
    }

    for change in &diff.changes {
        let path = if change.path.is_empty() { "<root>" } else { change.path.as_str() };
        match change.kind {
            ChangeKind::Add => println!("  {} {}", "+".green().bold(), path.green()),
            ChangeKind::Remove => println!("  {} {}", "-".red().bold(), path.red()),
            ChangeKind::Modify => println!("  {} {}", "~".yellow().bold(), path.yellow()),
        }
    }
    println!();
    println!("  {}", diff.summary().to_string().dimmed());
}
