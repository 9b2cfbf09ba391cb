use super::{open_service, print_diff, print_version_line, read_layout, resolve};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_diff::generate_diff;
use folio_store::PageMetadata;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Layout JSON file
    pub layout: PathBuf,

    /// Existing page to save onto (creates a new page when omitted)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Page name (defaults to the current name when saving onto a page)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Page description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Tags, repeatable
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
}

pub async fn save(args: SaveArgs, cwd: &str) -> Result<()> {
    let (config, service) = open_service(cwd).await?;
    let state = read_layout(cwd, &args.layout)?;

    let current = match &args.page {
        Some(page_id) => Some(service.current_version(page_id).await?),
        None => None,
    };

    let mut metadata = match &current {
        Some(current) => current.metadata.clone(),
        None => PageMetadata::new(
            args.name.clone().unwrap_or_else(|| "Untitled page".to_string()),
            config.author.clone(),
        ),
    };
    if let Some(name) = args.name {
        metadata.name = name;
    }
    if let Some(description) = args.description {
        metadata.description = Some(description);
    }
    if !args.tags.is_empty() {
        metadata.tags = args.tags;
    }

    let version = match &args.page {
        Some(page_id) => service.create_version(page_id, state, metadata).await?,
        None => service.create_page(state, metadata).await?,
    };

    println!("{} Saved version", "✓".green());
    println!("  page:    {}", version.page_id.bright_white());
    println!("  version: {}", version.id.yellow());
    if let Some(diff) = service.version_diff(&version.id).await? {
        println!("  changes: {}", diff.summary());
    }

    Ok(())
}

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Page id
    pub page: String,

    /// Oldest first instead of newest first
    #[arg(long)]
    pub reverse: bool,
}

pub async fn log(args: LogArgs, cwd: &str) -> Result<()> {
    let (_, service) = open_service(cwd).await?;
    let page = service.get_page(&args.page).await?;
    let mut versions = service.list_versions(&args.page).await?;

    if !args.reverse {
        versions.reverse();
    }

    println!(
        "{} {} ({} versions)",
        "📜".bright_blue(),
        page.name.bright_white().bold(),
        versions.len()
    );
    for version in &versions {
        let marker = if version.id == page.current_version_id { "*" } else { " " };
        print!("{}", marker.green().bold());
        print_version_line(version);
    }

    Ok(())
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Version id
    pub version: String,

    /// Write the layout to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let (_, service) = open_service(cwd).await?;
    let version = service.get_version(&args.version).await?;
    let json = serde_json::to_string_pretty(&version.state)?;

    match args.output {
        Some(path) => {
            let path = resolve(cwd, &path);
            fs::write(&path, json)?;
            println!("{} Wrote {}", "✓".green(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Version id; alone, shows the changes recorded with it
    pub from: String,

    /// Second version id; compares `from` → `to`
    pub to: Option<String>,
}

pub async fn diff(args: DiffArgs, cwd: &str) -> Result<()> {
    let (_, service) = open_service(cwd).await?;

    let diff = match &args.to {
        Some(to) => {
            let before = service.get_version(&args.from).await?;
            let after = service.get_version(to).await?;
            println!("{} {} → {}", "Δ".bright_blue().bold(), before.id.yellow(), after.id.yellow());
            generate_diff(&before.state, &after.state)?.with_version_id(&after.id)
        }
        None => {
            let version = service.get_version(&args.from).await?;
            println!("{} {}", "Δ".bright_blue().bold(), version.id.yellow());
            match service.version_diff(&version.id).await? {
                Some(diff) => diff,
                None => {
                    println!("  {}", "First version of the page, nothing to compare".dimmed());
                    return Ok(());
                }
            }
        }
    };

    print_diff(&diff);
    Ok(())
}

#[derive(Debug, Args)]
pub struct RevertArgs {
    /// Version to restore
    pub version: String,
}

pub async fn revert(args: RevertArgs, cwd: &str) -> Result<()> {
    let (_, service) = open_service(cwd).await?;
    let version = service.revert_to_version(&args.version).await?;

    println!(
        "{} {} is now current as {}",
        "↩".green().bold(),
        args.version.yellow(),
        version.id.yellow()
    );
    Ok(())
}
