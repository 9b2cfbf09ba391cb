use super::{open_service, print_version_line};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_store::{SearchQuery, TimeRange};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Match page name or description
    pub term: Option<String>,

    /// Tags, repeatable; any match counts
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Author
    #[arg(short, long)]
    pub author: Option<String>,

    /// Modified at or after (ms since epoch)
    #[arg(long)]
    pub since: Option<i64>,

    /// Modified at or before (ms since epoch)
    #[arg(long)]
    pub until: Option<i64>,
}

impl SearchArgs {
    fn into_query(self) -> SearchQuery {
        let time_range = match (self.since, self.until) {
            (None, None) => None,
            (start, end) => Some(TimeRange {
                start: start.unwrap_or(i64::MIN),
                end: end.unwrap_or(i64::MAX),
            }),
        };

        SearchQuery {
            term: self.term,
            tags: (!self.tags.is_empty()).then_some(self.tags),
            time_range,
            author: self.author,
            category: None,
        }
    }
}

pub async fn search(args: SearchArgs, cwd: &str) -> Result<()> {
    let (_, service) = open_service(cwd).await?;
    let results = service.search_pages(&args.into_query()).await?;

    if results.is_empty() {
        println!("{}", "⚠️  No matching pages".yellow());
        return Ok(());
    }

    println!("Found {} pages", results.len());
    for version in &results {
        println!("{}", version.page_id.bright_white().bold());
        print_version_line(version);
    }
    Ok(())
}
