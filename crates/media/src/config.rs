//! 压缩配置

/// 压缩配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConfig {
    /// ffmpeg 可执行文件
    pub ffmpeg: String,
    /// ffprobe 可执行文件
    pub ffprobe: String,
    /// JPEG 质量 1-100
    pub jpeg_quality: u32,
    /// 视频目标大小 (MB)
    pub target_size_mb: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            jpeg_quality: 70,
            target_size_mb: 100,
        }
    }
}

impl MediaConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[doc(hidden)]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("MEDIA_FFMPEG") {
            if !v.is_empty() {
                config.ffmpeg = v;
            }
        }

        if let Some(v) = lookup("MEDIA_FFPROBE") {
            if !v.is_empty() {
                config.ffprobe = v;
            }
        }

        if let Some(v) = lookup("MEDIA_JPEG_QUALITY") {
            if let Ok(q) = v.parse::<u32>() {
                if (1..=100).contains(&q) {
                    config.jpeg_quality = q;
                }
            }
        }

        if let Some(v) = lookup("MEDIA_TARGET_SIZE_MB") {
            if let Ok(mb) = v.parse::<u64>() {
                if mb > 0 {
                    config.target_size_mb = mb;
                }
            }
        }

        config
    }
}
