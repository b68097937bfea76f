use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Path '{}' does not exist", .0.display())]
    PathNotFound(PathBuf),
    #[error("Failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CrawlError>;

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// page.{js,jsx,ts,tsx}
    Page,
    /// layout.{js,jsx,ts,tsx}
    Layout,
    /// 动态路由段目录: [slug]
    Dynamic,
    /// 普通目录 (包括根目录)
    Folder,
}

impl NodeKind {
    /// page / layout 即为组件
    pub fn is_component(self) -> bool {
        matches!(self, NodeKind::Page | NodeKind::Layout)
    }
}

/// 路由树节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteNode {
    /// 文件名或目录名
    pub name: String,
    /// 相对于根目录父级的路径, 以 '/' 分隔
    pub path: String,
    pub kind: NodeKind,
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    pub fn new(name: impl Into<String>, path: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: RouteNode) {
        self.children.push(child);
    }

    pub fn has_component(&self) -> bool {
        self.kind.is_component()
    }

    /// 子树中是否存在 page 或 layout (含自身)
    pub fn has_component_in_subtree(&self) -> bool {
        self.has_component() || self.children.iter().any(|c| c.has_component_in_subtree())
    }

    /// 子树节点总数 (含自身)
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(RouteNode::count).sum::<usize>()
    }
}
