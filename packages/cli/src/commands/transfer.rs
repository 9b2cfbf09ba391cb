use super::{open_service, resolve};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use folio_store::{PageExport, PageMetadata};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Page id
    pub page: String,

    /// Include every version and the diffs between them
    #[arg(long)]
    pub history: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let (_, service) = open_service(cwd).await?;
    let bundle = service.export_page(&args.page, args.history).await?;
    let json = bundle.to_json_pretty()?;

    match args.output {
        Some(path) => {
            let path = resolve(cwd, &path);
            fs::write(&path, json)?;
            let versions = bundle.history.as_ref().map_or(1, Vec::len);
            println!(
                "{} Exported {} ({} version{}) → {}",
                "✓".green(),
                bundle.version.metadata.name.bright_white(),
                versions,
                if versions == 1 { "" } else { "s" },
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Export bundle produced by `folio export`
    pub file: PathBuf,
}

pub async fn import(args: ImportArgs, cwd: &str) -> Result<()> {
    let path = resolve(cwd, &args.file);
    let content = fs::read_to_string(&path).with_context(|| format!("Cannot read {}", path.display()))?;
    let bundle = PageExport::from_json(&content)?;

    let (_, service) = open_service(cwd).await?;
    let page_id = service.import_page(bundle).await?;

    println!("{} Imported page {}", "✓".green(), page_id.bright_white());
    Ok(())
}

#[derive(Debug, Args)]
pub struct CloneArgs {
    /// Page to copy
    pub page: String,

    /// Name of the copy (defaults to "<name> (copy)")
    #[arg(short, long)]
    pub name: Option<String>,
}

pub async fn clone(args: CloneArgs, cwd: &str) -> Result<()> {
    let (config, service) = open_service(cwd).await?;
    let source = service.current_version(&args.page).await?;

    let name = args
        .name
        .unwrap_or_else(|| format!("{} (copy)", source.metadata.name));
    let mut metadata = PageMetadata::new(name, config.author);
    metadata.description = source.metadata.description.clone();
    metadata.tags = source.metadata.tags.clone();

    let page_id = service.clone_page(&args.page, metadata).await?;
    println!(
        "{} Cloned {} → {}",
        "✓".green(),
        args.page.yellow(),
        page_id.bright_white()
    );
    Ok(())
}
