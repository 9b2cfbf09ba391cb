use super::{open_service, print_version_line, read_layout};
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use folio_store::{PageMetadata, SearchQuery, DEFAULT_TEMPLATE_CATEGORY};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Create a template from a layout file or an existing version
    Create(CreateTemplateArgs),

    /// List templates
    List(ListTemplatesArgs),

    /// Apply a template to a page as a new version
    Apply(ApplyTemplateArgs),
}

#[derive(Debug, Args)]
pub struct CreateTemplateArgs {
    /// Layout JSON file
    #[arg(required_unless_present = "from_version", conflicts_with = "from_version")]
    pub layout: Option<PathBuf>,

    /// Use the state of this version instead of a file
    #[arg(long)]
    pub from_version: Option<String>,

    /// Template name
    #[arg(short, long)]
    pub name: String,

    /// Template description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Category
    #[arg(short, long, default_value = DEFAULT_TEMPLATE_CATEGORY)]
    pub category: String,

    /// Thumbnail path or URL
    #[arg(long)]
    pub thumbnail: Option<String>,

    /// Tags, repeatable
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ListTemplatesArgs {
    /// Only this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Match name, description or tags
    #[arg(short, long)]
    pub term: Option<String>,
}

#[derive(Debug, Args)]
pub struct ApplyTemplateArgs {
    /// Template id
    pub template: String,

    /// Page to apply it to
    pub page: String,
}

pub async fn template(command: TemplateCommand, cwd: &str) -> Result<()> {
    match command {
        TemplateCommand::Create(args) => create(args, cwd).await,
        TemplateCommand::List(args) => list(args, cwd).await,
        TemplateCommand::Apply(args) => apply(args, cwd).await,
    }
}

async fn create(args: CreateTemplateArgs, cwd: &str) -> Result<()> {
    let (config, service) = open_service(cwd).await?;

    let state = match (&args.layout, &args.from_version) {
        (_, Some(version_id)) => service.get_version(version_id).await?.state,
        (Some(path), None) => read_layout(cwd, path)?,
        (None, None) => anyhow::bail!("Provide a layout file or --from-version"),
    };

    let mut metadata = PageMetadata::new(args.name, config.author).with_tags(args.tags);
    metadata.description = args.description;

    let template = service
        .create_template_in(state, metadata, &args.category, args.thumbnail)
        .await?;

    println!(
        "{} Created template {} ({})",
        "✓".green(),
        template.name.bright_white().bold(),
        template.id.yellow()
    );
    Ok(())
}

async fn list(args: ListTemplatesArgs, cwd: &str) -> Result<()> {
    let (_, service) = open_service(cwd).await?;
    let query = SearchQuery {
        term: args.term,
        category: args.category,
        ..SearchQuery::default()
    };
    let templates = service.list_templates(&query).await?;

    if templates.is_empty() {
        println!("{}", "⚠️  No templates found".yellow());
        return Ok(());
    }

    for template in &templates {
        println!(
            "  {} {} {}",
            template.id.yellow(),
            format!("[{}]", template.category).cyan(),
            template.name.bright_white()
        );
        if let Some(description) = &template.description {
            println!("      {}", description.dimmed());
        }
    }
    Ok(())
}

async fn apply(args: ApplyTemplateArgs, cwd: &str) -> Result<()> {
    let (_, service) = open_service(cwd).await?;
    let version = service.apply_template(&args.template, &args.page).await?;

    println!("{} Applied template to {}", "✓".green(), version.page_id.bright_white());
    print_version_line(&version);
    Ok(())
}
