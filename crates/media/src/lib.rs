//! media - 图片 / 视频压缩
//!
//! 封装 ffprobe / ffmpeg 外部进程, 本身不做编解码

mod config;
mod error;
mod image;
mod process;
mod video;

pub use config::MediaConfig;
pub use error::{MediaError, Result};
pub use image::{compress_image, jpeg_qscale, ImageReport};
pub use video::{compress_video, encoder_args, output_path, probe_duration, target_bitrate};
