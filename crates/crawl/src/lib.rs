//! crawl - 路由目录结构爬取
//!
//! 按文件名/目录名识别 page、layout、动态段，裁剪无组件分支，生成 Mermaid 流程图

pub mod classifier;
mod builder;
mod config;
mod mermaid;
mod pipeline;
mod pruner;
mod types;
mod writer;

pub use builder::{PathIndex, TreeBuilder};
pub use config::CrawlConfig;
pub use mermaid::MermaidGenerator;
pub use pipeline::{crawl_to_file, CrawlReport};
pub use pruner::prune;
pub use types::{CrawlError, NodeKind, Result, RouteNode};
pub use writer::write_diagram;
