use crate::builder::TreeBuilder;
use crate::config::CrawlConfig;
use crate::mermaid::MermaidGenerator;
use crate::pruner::prune;
use crate::types::{Result, RouteNode};
use crate::writer::write_diagram;
use std::path::{Path, PathBuf};

/// 一次爬取的结果
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub output: PathBuf,
    /// 裁剪前登记的路径数
    pub registered: usize,
    /// 裁剪后的节点数
    pub nodes: usize,
    /// 裁剪后的树
    pub tree: RouteNode,
}

/// 构建 -> 裁剪 -> 生成 -> 写出
///
/// 任一步失败都不会写出文件
pub fn crawl_to_file(root: &Path, output: &Path, config: &CrawlConfig) -> Result<CrawlReport> {
    let builder = TreeBuilder::new()
        .with_sorted(config.sorted)
        .with_follow_links(config.follow_links);

    tracing::info!("Crawling {}", root.display());
    let index = builder.scan(root)?;
    let registered = index.len();
    let mut tree = index.into_tree();

    prune(&mut tree);
    let nodes = tree.count();
    tracing::info!("Pruned {} registered paths down to {} nodes", registered, nodes);

    let diagram = MermaidGenerator::new()
        .with_fenced(config.fenced)
        .emit(&tree);
    write_diagram(output, &diagram)?;

    Ok(CrawlReport {
        output: output.to_path_buf(),
        registered,
        nodes,
        tree,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CrawlError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_crawl_to_file_writes_pruned_diagram() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("app");
        fs::create_dir_all(root.join("about")).unwrap();
        fs::create_dir_all(root.join("unused")).unwrap();
        fs::write(root.join("about/page.tsx"), "").unwrap();
        fs::write(root.join("styles.css"), "").unwrap();
        let out = dir.path().join("out.mmd");

        let report = crawl_to_file(&root, &out, &CrawlConfig::default()).unwrap();
        assert_eq!(report.registered, 4);
        assert_eq!(report.nodes, 3);
        assert_eq!(report.output, out);

        let diagram = fs::read_to_string(&out).unwrap();
        assert!(diagram.contains("app --> app_about"));
        assert!(diagram.contains("app_about --> app_about_page_tsx"));
        assert!(!diagram.contains("unused"));
        assert!(!diagram.contains("styles"));
    }

    #[test]
    fn test_crawl_to_file_missing_root_writes_nothing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.mmd");

        let err = crawl_to_file(&dir.path().join("missing"), &out, &CrawlConfig::default())
            .unwrap_err();
        assert!(matches!(err, CrawlError::PathNotFound(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_crawl_to_file_fenced() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("app");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("page.js"), "").unwrap();
        let out = dir.path().join("out.md");

        let config = CrawlConfig {
            fenced: true,
            ..CrawlConfig::default()
        };
        crawl_to_file(&root, &out, &config).unwrap();

        let diagram = fs::read_to_string(&out).unwrap();
        assert!(diagram.starts_with("```mermaid\n"));
    }
}
