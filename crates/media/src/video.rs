use crate::config::MediaConfig;
use crate::error::{MediaError, Result};
use crate::process::{capture, status, stderr_text};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

const AUDIO_BITRATE: &str = "128k";
/// 目标大小中留给视频流的比例, 其余给音频和容器
const VIDEO_SHARE: f64 = 0.875;
/// 超过目标大小 5% 时告警
const OVERSIZE_TOLERANCE: f64 = 1.05;

/// 由目标大小和时长计算视频码率 (bit/s)
///
/// 以 f64 计算; 目标为 0 或码率超出 ffmpeg 参数可表示范围时返回错误
pub fn target_bitrate(target_size_mb: u64, duration_secs: f64) -> Result<u64> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(MediaError::Duration(format!("invalid duration {}", duration_secs)));
    }
    if target_size_mb == 0 {
        return Err(MediaError::InvalidTargetSize(target_size_mb));
    }

    let target_bytes = target_size_mb as f64 * 1024.0 * 1024.0;
    let bitrate = (target_bytes * VIDEO_SHARE * 8.0) / duration_secs;
    // -bufsize 取 3 倍码率, 也必须能用 u64 表示
    if !(1.0..=(u64::MAX / 3) as f64).contains(&bitrate) {
        return Err(MediaError::InvalidTargetSize(target_size_mb));
    }
    Ok(bitrate as u64)
}

/// 输出路径: <dir>/<stem>_compressed<.ext>, 默认与输入同目录
pub fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string());
    let file_name = match input.extension() {
        Some(ext) => format!("{}_compressed.{}", stem, ext.to_string_lossy()),
        None => format!("{}_compressed", stem),
    };

    let dir = output_dir
        .or_else(|| input.parent())
        .unwrap_or_else(|| Path::new(""));
    dir.join(file_name)
}

/// ffmpeg 参数: H.264 + AAC, 去掉元数据
pub fn encoder_args(input: &Path, output: &Path, video_bitrate: u64) -> Vec<String> {
    let maxrate = (video_bitrate as f64 * 1.5) as u64;
    let bufsize = video_bitrate.saturating_mul(3);
    vec![
        "-i".to_string(),
        input.to_string_lossy().into_owned(),
        "-map_metadata".to_string(),
        "-1".to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-preset".to_string(),
        "slow".to_string(),
        "-b:v".to_string(),
        video_bitrate.to_string(),
        "-maxrate".to_string(),
        maxrate.to_string(),
        "-bufsize".to_string(),
        bufsize.to_string(),
        "-c:a".to_string(),
        "aac".to_string(),
        "-b:a".to_string(),
        AUDIO_BITRATE.to_string(),
        "-movflags".to_string(),
        "+faststart".to_string(),
        "-y".to_string(),
        output.to_string_lossy().into_owned(),
    ]
}

pub(crate) fn parse_duration(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let duration: f64 = trimmed
        .parse()
        .map_err(|_| MediaError::Duration(format!("unexpected ffprobe output: {:?}", trimmed)))?;
    if !duration.is_finite() || duration <= 0.0 {
        return Err(MediaError::Duration(format!("invalid duration {}", duration)));
    }
    Ok(duration)
}

/// 用 ffprobe 查询时长 (秒)
pub async fn probe_duration(input: &Path, config: &MediaConfig) -> Result<f64> {
    let output = capture(
        &config.ffprobe,
        [
            OsStr::new("-v"),
            OsStr::new("error"),
            OsStr::new("-show_entries"),
            OsStr::new("format=duration"),
            OsStr::new("-of"),
            OsStr::new("default=noprint_wrappers=1:nokey=1"),
            input.as_os_str(),
        ],
    )
    .await?;

    if !output.status.success() {
        return Err(MediaError::Duration(stderr_text(&output)));
    }
    parse_duration(&String::from_utf8_lossy(&output.stdout))
}

/// 按目标大小压缩视频, 返回输出文件路径
pub async fn compress_video(
    input: &Path,
    target_size_mb: u64,
    output_dir: Option<&Path>,
    config: &MediaConfig,
) -> Result<PathBuf> {
    if target_size_mb == 0 {
        return Err(MediaError::InvalidTargetSize(target_size_mb));
    }
    if !input.exists() {
        return Err(MediaError::InputNotFound(input.to_path_buf()));
    }

    let output = output_path(input, output_dir);
    let duration = probe_duration(input, config).await?;
    let bitrate = target_bitrate(target_size_mb, duration)?;

    tracing::info!(
        "Compressing {} to target size of {}MB, video bitrate {:.2}kbps",
        input.display(),
        target_size_mb,
        bitrate as f64 / 1024.0
    );

    let exit = status(&config.ffmpeg, encoder_args(input, &output, bitrate)).await?;
    if !exit.success() {
        return Err(MediaError::EncoderFailed(exit.to_string()));
    }

    let output_mb = std::fs::metadata(&output)?.len() as f64 / (1024.0 * 1024.0);
    if output_mb > target_size_mb as f64 * OVERSIZE_TOLERANCE {
        tracing::warn!(
            "Output {} is {:.2}MB, larger than the {}MB target",
            output.display(),
            output_mb,
            target_size_mb
        );
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_target_bitrate() {
        // 100MB, 100s: 104857600 * 0.875 * 8 / 100
        assert_eq!(target_bitrate(100, 100.0).unwrap(), 7_340_032);
        assert_eq!(target_bitrate(10, 60.0).unwrap(), 1_223_338);
    }

    #[test]
    fn test_target_bitrate_scales_with_duration() {
        assert!(target_bitrate(50, 30.0).unwrap() > target_bitrate(50, 60.0).unwrap());
    }

    #[test]
    fn test_target_bitrate_rejects_zero_target() {
        assert!(matches!(target_bitrate(0, 10.0), Err(MediaError::InvalidTargetSize(0))));
    }

    #[test]
    fn test_target_bitrate_huge_target_does_not_overflow() {
        let huge = u64::MAX / 1024;
        assert!(matches!(target_bitrate(huge, 10.0), Err(MediaError::InvalidTargetSize(_))));
        assert!(matches!(target_bitrate(u64::MAX, 1.0), Err(MediaError::InvalidTargetSize(_))));
        // 大但可表示的目标仍然可用
        assert!(target_bitrate(1_000_000, 1.0).is_ok());
    }

    #[test]
    fn test_target_bitrate_rejects_bad_duration() {
        assert!(matches!(target_bitrate(10, 0.0), Err(MediaError::Duration(_))));
        assert!(matches!(target_bitrate(10, f64::NAN), Err(MediaError::Duration(_))));
    }

    #[test]
    fn test_encoder_args_saturate_bufsize() {
        let args = encoder_args(Path::new("in.mp4"), Path::new("out.mp4"), u64::MAX);
        let pos = args.iter().position(|a| a == "-bufsize").unwrap();
        assert_eq!(args[pos + 1], u64::MAX.to_string());
    }

    #[test]
    fn test_output_path_defaults_to_input_dir() {
        let out = output_path(Path::new("/videos/clip.mp4"), None);
        assert_eq!(out, PathBuf::from("/videos/clip_compressed.mp4"));
    }

    #[test]
    fn test_output_path_with_dir_and_no_extension() {
        let out = output_path(Path::new("/videos/raw"), Some(Path::new("/tmp/out")));
        assert_eq!(out, PathBuf::from("/tmp/out/raw_compressed"));
    }

    #[test]
    fn test_encoder_args() {
        let args = encoder_args(Path::new("in.mov"), Path::new("out.mov"), 1000);
        let pos = |flag: &str| args.iter().position(|a| a == flag).unwrap();

        assert_eq!(args[pos("-i") + 1], "in.mov");
        assert_eq!(args[pos("-b:v") + 1], "1000");
        assert_eq!(args[pos("-maxrate") + 1], "1500");
        assert_eq!(args[pos("-bufsize") + 1], "3000");
        assert_eq!(args[pos("-b:a") + 1], "128k");
        assert_eq!(args[pos("-map_metadata") + 1], "-1");
        assert_eq!(args.last().map(String::as_str), Some("out.mov"));
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("12.5\n").unwrap(), 12.5);
        assert!(matches!(parse_duration("N/A"), Err(MediaError::Duration(_))));
        assert!(matches!(parse_duration("0"), Err(MediaError::Duration(_))));
        assert!(matches!(parse_duration(""), Err(MediaError::Duration(_))));
    }

    #[tokio::test]
    async fn test_compress_video_missing_input() {
        let dir = tempdir().unwrap();
        let err = compress_video(&dir.path().join("none.mp4"), 10, None, &MediaConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::InputNotFound(_)));
    }

    #[tokio::test]
    async fn test_compress_video_zero_target() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        std::fs::write(&input, b"x").unwrap();
        let err = compress_video(&input, 0, None, &MediaConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::InvalidTargetSize(0)));
    }

    #[tokio::test]
    async fn test_probe_duration_missing_binary() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        std::fs::write(&input, b"not a video").unwrap();

        let config = MediaConfig {
            ffprobe: "definitely-not-a-real-ffprobe".to_string(),
            ..MediaConfig::default()
        };
        let err = probe_duration(&input, &config).await.unwrap_err();
        assert!(matches!(err, MediaError::Spawn { .. }));
    }
}
