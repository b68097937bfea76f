//! routemap - route structure diagrams and media compression

mod crawl_cli;
mod media_cli;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "routemap")]
#[command(about = "Route structure diagrams and media compression", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Mermaid diagram of an app router directory
    Crawl(crawl_cli::CrawlArgs),
    /// Halve an image's dimensions and re-encode it as JPEG
    Image(media_cli::ImageArgs),
    /// Compress a video to a target size
    Video(media_cli::VideoArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl(args) => crawl_cli::run(args)?,
        Commands::Image(args) => media_cli::run_image(args).await?,
        Commands::Video(args) => media_cli::run_video(args).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_target_size_must_be_positive() {
        let result = Cli::try_parse_from(["routemap", "video", "in.mp4", "--target-size", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_video_target_size_rejects_overflowing_value() {
        let result = Cli::try_parse_from([
            "routemap",
            "video",
            "in.mp4",
            "--target-size",
            "18446744073709551616",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_video_target_size_accepts_one() {
        let cli = Cli::try_parse_from(["routemap", "video", "in.mp4", "--target-size", "1"]).unwrap();
        assert!(matches!(cli.command, Commands::Video(_)));
    }
}
