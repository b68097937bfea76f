//! crawl CLI - 路由结构图生成

use clap::Parser;
use crawl::{crawl_to_file, CrawlConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crawl")]
#[command(about = "Generate a Mermaid diagram of an app router directory", version)]
struct Cli {
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

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = CrawlConfig::from_env();
    config.sorted |= cli.sorted;
    config.follow_links |= cli.follow_links;
    config.fenced |= cli.fenced;
    let output = cli.output.unwrap_or_else(|| config.output.clone());

    let report = crawl_to_file(&cli.root, &output, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report.tree)?);
    }
    println!("Mermaid diagram saved to {}", report.output.display());
    println!("Render this diagram on https://mermaid.live or in Markdown");

    Ok(())
}
