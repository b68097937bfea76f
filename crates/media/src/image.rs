use crate::config::MediaConfig;
use crate::error::{MediaError, Result};
use crate::process::{capture, stderr_text};
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// 图片压缩结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReport {
    pub original: (u32, u32),
    pub resized: (u32, u32),
    pub original_bytes: u64,
    pub resized_bytes: u64,
}

/// 1-100 的质量映射到 MJPEG 的 -q:v (31 最差, 2 最好)
pub fn jpeg_qscale(quality: u32) -> u32 {
    let quality = quality.clamp(1, 100);
    31 - (quality - 1) * 29 / 99
}

/// 宽高各减半, 至少 1 像素
pub(crate) fn halve((width, height): (u32, u32)) -> (u32, u32) {
    ((width / 2).max(1), (height / 2).max(1))
}

/// 解析 ffprobe 的 "WxH" 输出
pub(crate) fn parse_dimensions(text: &str) -> Option<(u32, u32)> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    let (w, h) = line.split_once('x')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

/// ffmpeg 参数: 强制 MJPEG 编码, 与输出扩展名无关
pub(crate) fn encoder_args(
    input: &Path,
    output: &Path,
    (width, height): (u32, u32),
    quality: u32,
) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        input.as_os_str().to_os_string(),
        "-vf".into(),
        format!("scale={}:{}:flags=lanczos", width, height).into(),
        "-frames:v".into(),
        "1".into(),
        "-c:v".into(),
        "mjpeg".into(),
        "-q:v".into(),
        jpeg_qscale(quality).to_string().into(),
        output.as_os_str().to_os_string(),
    ]
}

async fn probe_dimensions(input: &Path, config: &MediaConfig) -> Result<(u32, u32)> {
    let output = capture(
        &config.ffprobe,
        [
            OsStr::new("-v"),
            OsStr::new("error"),
            OsStr::new("-select_streams"),
            OsStr::new("v:0"),
            OsStr::new("-show_entries"),
            OsStr::new("stream=width,height"),
            OsStr::new("-of"),
            OsStr::new("csv=s=x:p=0"),
            input.as_os_str(),
        ],
    )
    .await?;

    if !output.status.success() {
        return Err(MediaError::Probe(stderr_text(&output)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_dimensions(&stdout)
        .ok_or_else(|| MediaError::Probe(format!("unexpected dimensions output: {}", stdout.trim())))
}

/// 图片宽高减半并按给定质量重新编码为 JPEG
pub async fn compress_image(
    input: &Path,
    output: &Path,
    quality: u32,
    config: &MediaConfig,
) -> Result<ImageReport> {
    if !(1..=100).contains(&quality) {
        return Err(MediaError::InvalidQuality(quality));
    }
    if !input.exists() {
        return Err(MediaError::InputNotFound(input.to_path_buf()));
    }

    let original = probe_dimensions(input, config).await?;
    let resized = halve(original);
    tracing::info!(
        "Resizing {} from {}x{} to {}x{}",
        input.display(),
        original.0,
        original.1,
        resized.0,
        resized.1
    );

    let result = capture(&config.ffmpeg, encoder_args(input, output, resized, quality)).await?;

    if !result.status.success() {
        return Err(MediaError::EncoderFailed(format!(
            "{}: {}",
            result.status,
            stderr_text(&result)
        )));
    }

    Ok(ImageReport {
        original,
        resized,
        original_bytes: std::fs::metadata(input)?.len(),
        resized_bytes: std::fs::metadata(output)?.len(),
    })
}
