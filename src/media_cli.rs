//! image / video subcommands - compression via ffmpeg

use anyhow::Context;
use clap::Args;
use media::{compress_image, compress_video, MediaConfig};
use std::path::PathBuf;

#[derive(Args)]
pub struct ImageArgs {
    /// Input image
    input: PathBuf,
    /// Output JPEG
    output: PathBuf,
    /// JPEG quality 1-100 (default: 70)
    #[arg(short, long)]
    quality: Option<u32>,
}

#[derive(Args)]
pub struct VideoArgs {
    /// Input video
    input: PathBuf,
    /// Target size in MB (default: 100)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    target_size: Option<u64>,
    /// Output directory (default: next to the input)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

pub async fn run_image(args: ImageArgs) -> anyhow::Result<()> {
    let config = MediaConfig::from_env();

    let quality = match args.quality {
        Some(q) if (1..=100).contains(&q) => q,
        Some(q) => {
            println!(
                "Quality must be between 1 and 100 (got {}), using default quality of {}",
                q, config.jpeg_quality
            );
            config.jpeg_quality
        }
        None => config.jpeg_quality,
    };

    let report = compress_image(&args.input, &args.output, quality, &config)
        .await
        .with_context(|| format!("Failed to compress {}", args.input.display()))?;

    println!(
        "Successfully compressed image from {}x{} to {}x{}",
        report.original.0, report.original.1, report.resized.0, report.resized.1
    );
    println!(
        "File size reduced from {:.2}KB to {:.2}KB",
        report.original_bytes as f64 / 1024.0,
        report.resized_bytes as f64 / 1024.0
    );

    Ok(())
}

pub async fn run_video(args: VideoArgs) -> anyhow::Result<()> {
    let config = MediaConfig::from_env();
    let target = args.target_size.unwrap_or(config.target_size_mb);

    println!("Compressing video to target size of {}MB...", target);
    let output = compress_video(&args.input, target, args.output_dir.as_deref(), &config)
        .await
        .with_context(|| format!("Video compression failed for {}", args.input.display()))?;

    let size_mb = std::fs::metadata(&output)?.len() as f64 / (1024.0 * 1024.0);
    println!("Successfully compressed video to: {}", output.display());
    println!("Output file size: {:.2}MB", size_mb);

    Ok(())
}
