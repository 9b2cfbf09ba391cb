use super::{open_service, print_diff, print_version_line};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct BranchArgs {
    /// Version to branch from
    pub version: String,

    /// Branch name
    pub name: String,
}

pub async fn branch(args: BranchArgs, cwd: &str) -> Result<()> {
    let (_, service) = open_service(cwd).await?;
    let version = service.create_branch(&args.version, &args.name).await?;

    println!("{} Created branch {}", "✓".green(), args.name.cyan().bold());
    print_version_line(&version);
    Ok(())
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Version whose state wins
    pub source: String,

    /// Version to merge into
    pub target: String,

    /// Also list added paths
    #[arg(short, long)]
    pub verbose: bool,
}

pub async fn merge(args: MergeArgs, cwd: &str) -> Result<()> {
    let (_, service) = open_service(cwd).await?;
    let outcome = service.merge_branch(&args.source, &args.target).await?;

    println!("{} Merged {} into {}", "✓".green(), args.source.yellow(), args.target.yellow());
    print_version_line(&outcome.version);
    println!();

    println!(
        "{} Strategy: {}; values from {} replaced the target's wherever they differed",
        "⚠️".yellow(),
        outcome.strategy.to_string().bold(),
        args.source.yellow()
    );

    let overwritten = outcome.overwritten_paths();
    if overwritten.is_empty() {
        println!("  {}", "No target values were overwritten".dimmed());
    } else {
        println!("  Overwritten ({}):", overwritten.len());
        for path in overwritten {
            println!("    {} {}", "~".yellow(), path);
        }
    }

    if args.verbose {
        println!();
        print_diff(&outcome.diff);
    }

    Ok(())
}
