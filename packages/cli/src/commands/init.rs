use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_store::FileBackend;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Store directory
    #[arg(short, long, default_value = ".folio")]
    pub store_dir: String,

    /// Author recorded on saved versions
    #[arg(short, long, default_value = "anonymous")]
    pub author: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub async fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Folio store...".bright_blue().bold());

    let config = Config {
        store_dir: args.store_dir.clone(),
        author: args.author,
        ..Config::default()
    };

    FileBackend::open(config.get_store_dir(cwd)).await?;
    println!("  {} Created {}/", "✓".green(), args.store_dir);

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✅ Store initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Export a layout from the builder as page.json");
    println!("  2. Run: folio save page.json --name \"Home\"");
    println!("  3. Run: folio log <page-id>");

    Ok(())
}
