//! 爬取配置

use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "nextjs_project_structure.mmd";

/// 爬取配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// 未指定输出文件时使用
    pub output: PathBuf,
    /// 按文件名排序遍历
    pub sorted: bool,
    pub follow_links: bool,
    /// 输出包在 ```mermaid 代码块里
    pub fenced: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            sorted: false,
            follow_links: false,
            fenced: false,
        }
    }
}

impl CrawlConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[doc(hidden)]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("CRAWL_OUTPUT") {
            if !v.is_empty() {
                config.output = PathBuf::from(v);
            }
        }

        if let Some(v) = lookup("CRAWL_SORTED") {
            config.sorted = parse_flag(&v).unwrap_or(config.sorted);
        }

        if let Some(v) = lookup("CRAWL_FOLLOW_LINKS") {
            config.follow_links = parse_flag(&v).unwrap_or(config.follow_links);
        }

        if let Some(v) = lookup("CRAWL_FENCED") {
            config.fenced = parse_flag(&v).unwrap_or(config.fenced);
        }

        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
