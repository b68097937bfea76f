//! crawl subcommand - route structure diagram

use clap::Args;
use crawl::{crawl_to_file, CrawlConfig};
use std::path::PathBuf;

#[derive(Args)]
pub struct CrawlArgs {
    /// Root of the app directory, e.g. src/app
    root: PathBuf,
    /// Output file (default: nextjs_project_structure.mmd)
    output: Option<PathBuf>,
    /// Sort entries by name for platform-independent output
    #[arg(long)]
    sorted: bool,
    /// Follow symbolic links
    #[arg(long)]
    follow_links: bool,
    /// Wrap the diagram in a ```mermaid block
    #[arg(long)]
    fenced: bool,
    /// Also print the pruned tree as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CrawlArgs) -> anyhow::Result<()> {
    let mut config = CrawlConfig::from_env();
    config.sorted |= args.sorted;
    config.follow_links |= args.follow_links;
    config.fenced |= args.fenced;
    let output = args.output.unwrap_or_else(|| config.output.clone());

    let report = crawl_to_file(&args.root, &output, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.tree)?);
    }
    println!("Mermaid diagram saved to {}", report.output.display());
    println!("Render this diagram on https://mermaid.live or in Markdown");

    Ok(())
}
