use crate::classifier;
use crate::types::{CrawlError, NodeKind, Result, RouteNode};
use std::collections::HashMap;
use std::path::Path;
use walkdir::WalkDir;

/// 路径索引中的一项
#[derive(Debug, Clone)]
struct IndexEntry {
    name: String,
    path: String,
    kind: NodeKind,
    parent: Option<usize>,
}

/// 相对路径 -> 节点 的映射
///
/// 每个相对路径只登记一次; 父节点总是先于子节点登记, 所以父索引必然小于子索引
#[derive(Debug, Clone)]
pub struct PathIndex {
    entries: Vec<IndexEntry>,
    by_path: HashMap<String, usize>,
}

impl PathIndex {
    fn new(root_name: &str) -> Self {
        let root = IndexEntry {
            name: root_name.to_string(),
            path: root_name.to_string(),
            kind: NodeKind::Folder,
            parent: None,
        };
        let mut by_path = HashMap::new();
        by_path.insert(root_name.to_string(), 0);
        Self {
            entries: vec![root],
            by_path,
        }
    }

    /// 登记节点, 已存在的路径直接复用
    fn register(&mut self, name: String, path: String, kind: NodeKind) -> usize {
        if let Some(&idx) = self.by_path.get(&path) {
            return idx;
        }

        let parent = path
            .rsplit_once('/')
            .and_then(|(parent, _)| self.by_path.get(parent).copied());
        if parent.is_none() {
            // 父目录未登记: 只记录, 不挂到树上
            tracing::debug!("No parent registered for {}, leaving it detached", path);
        }

        let idx = self.entries.len();
        tracing::debug!("Registered {:?} {}", kind, path);
        self.by_path.insert(path.clone(), idx);
        self.entries.push(IndexEntry {
            name,
            path,
            kind,
            parent,
        });
        idx
    }

    /// 已登记的路径数 (含根)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    pub fn kind_of(&self, path: &str) -> Option<NodeKind> {
        self.by_path.get(path).map(|&idx| self.entries[idx].kind)
    }

    /// 自底向上组装成一棵由根独占的树
    pub fn into_tree(self) -> RouteNode {
        let len = self.entries.len();
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); len];
        for (idx, entry) in self.entries.iter().enumerate() {
            if let Some(parent) = entry.parent {
                children[parent].push(idx);
            }
        }

        let mut built: Vec<Option<RouteNode>> = self
            .entries
            .into_iter()
            .map(|e| Some(RouteNode::new(e.name, e.path, e.kind)))
            .collect();

        // 子索引大于父索引, 倒序处理时子节点已经组装完毕
        for idx in (0..len).rev() {
            let kids: Vec<RouteNode> = children[idx]
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            if let Some(node) = built[idx].as_mut() {
                node.children = kids;
            }
        }

        built
            .into_iter()
            .next()
            .flatten()
            .unwrap_or_else(|| RouteNode::new("", "", NodeKind::Folder))
    }
}

/// 目录树构建器
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    sorted: bool,
    follow_links: bool,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按文件名排序遍历, 输出与平台无关
    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// 构建路由树 (未裁剪)
    pub fn build(&self, root: &Path) -> Result<RouteNode> {
        Ok(self.scan(root)?.into_tree())
    }

    /// 遍历目录, 登记所有目录以及 page / layout 文件
    pub fn scan(&self, root: &Path) -> Result<PathIndex> {
        if !root.exists() {
            return Err(CrawlError::PathNotFound(root.to_path_buf()));
        }

        let root_name = Self::root_name(root)?;
        let mut index = PathIndex::new(&root_name);

        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(self.follow_links);
        if self.sorted {
            walker = walker.sort_by_file_name();
        }

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let Some(rel_path) = Self::relative_path(&root_name, root, entry.path()) else {
                continue;
            };
            let name = entry.file_name().to_string_lossy().into_owned();

            let kind = if entry.file_type().is_dir() {
                classifier::classify_dir(&name)
            } else {
                match classifier::classify_file(&name) {
                    Some(kind) => kind,
                    None => continue,
                }
            };

            index.register(name, rel_path, kind);
        }

        tracing::info!("Indexed {} paths under {}", index.len(), root.display());
        Ok(index)
    }

    /// 根节点名: 路径最后一段, "." 之类没有文件名的先取规范路径
    #[doc(hidden)]
    pub fn root_name(root: &Path) -> Result<String> {
        if let Some(name) = root.file_name() {
            return Ok(name.to_string_lossy().into_owned());
        }
        let canonical = root.canonicalize()?;
        Ok(canonical
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| canonical.to_string_lossy().into_owned()))
    }

    /// 相对于根目录父级的路径: "<root_name>/a/b"
    #[doc(hidden)]
    pub fn relative_path(root_name: &str, root: &Path, path: &Path) -> Option<String> {
        let suffix = path.strip_prefix(root).ok()?;
        let mut rel = root_name.to_string();
        for component in suffix.components() {
            rel.push('/');
            rel.push_str(&component.as_os_str().to_string_lossy());
        }
        Some(rel)
    }
}
