mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    branch, clone, diff, export, import, init, log, merge, revert, save, search, show, template,
    BranchArgs, CloneArgs, DiffArgs, ExportArgs, ImportArgs, InitArgs, LogArgs, MergeArgs,
    RevertArgs, SaveArgs, SearchArgs, ShowArgs, TemplateCommand,
};

/// Folio CLI - Version control for visual page layouts
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a Folio store in this directory
    Init(InitArgs),

    /// Save a layout file as a new version
    Save(SaveArgs),

    /// List the versions of a page
    Log(LogArgs),

    /// Print the layout of a version
    Show(ShowArgs),

    /// Show the changes of a version, or between two versions
    Diff(DiffArgs),

    /// Make an older version current again
    Revert(RevertArgs),

    /// Start a branch from a version
    Branch(BranchArgs),

    /// Merge one version into another (last writer wins)
    Merge(MergeArgs),

    /// Manage page templates
    Template {
        #[command(subcommand)]
        command: TemplateCommand,
    },

    /// Export a page to a JSON bundle
    Export(ExportArgs),

    /// Import a page from a JSON bundle
    Import(ImportArgs),

    /// Copy a page into a new, independent page
    Clone(CloneArgs),

    /// Find pages by name, tag, author or date
    Search(SearchArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("folio=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd).await,
        Command::Save(args) => save(args, &cwd).await,
        Command::Log(args) => log(args, &cwd).await,
        Command::Show(args) => show(args, &cwd).await,
        Command::Diff(args) => diff(args, &cwd).await,
        Command::Revert(args) => revert(args, &cwd).await,
        Command::Branch(args) => branch(args, &cwd).await,
        Command::Merge(args) => merge(args, &cwd).await,
        Command::Template { command } => template(command, &cwd).await,
        Command::Export(args) => export(args, &cwd).await,
        Command::Import(args) => import(args, &cwd).await,
        Command::Clone(args) => clone(args, &cwd).await,
        Command::Search(args) => search(args, &cwd).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
