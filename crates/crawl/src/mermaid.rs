use crate::classifier;
use crate::types::{NodeKind, RouteNode};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet, VecDeque};

/// 作为节点 id 会破坏流程图解析的关键字
const RESERVED_IDS: &[&str] = &[
    "end",
    "graph",
    "flowchart",
    "subgraph",
    "direction",
    "style",
    "class",
    "classDef",
    "click",
    "linkStyle",
];

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w]").expect("valid non-word pattern"));

/// Mermaid 图生成器
pub struct MermaidGenerator {
    fenced: bool,
}

impl MermaidGenerator {
    pub fn new() -> Self {
        Self { fenced: false }
    }

    /// 输出包在 ```mermaid 代码块里, 便于直接嵌入 Markdown
    pub fn with_fenced(mut self, fenced: bool) -> Self {
        self.fenced = fenced;
        self
    }

    /// 广度优先生成流程图: 节点声明, 然后所有边, 最后样式
    pub fn emit(&self, root: &RouteNode) -> String {
        let mut lines = vec!["flowchart TD".to_string()];
        let mut edges = Vec::new();
        let mut styles = Vec::new();

        let mut ids = IdAllocator::default();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([root]);

        while let Some(node) = queue.pop_front() {
            let id = ids.id_for(&node.path);
            if !visited.insert(id.clone()) {
                continue;
            }

            lines.push(format!("    {}[\"{}\"]", id, Self::node_label(node)));

            if let Some(style) = Self::node_style(node.kind) {
                styles.push(format!("    style {} {}", id, style));
            }

            for child in &node.children {
                let child_id = ids.id_for(&child.path);
                edges.push(format!("    {} --> {}", id, child_id));
                queue.push_back(child);
            }
        }

        lines.extend(edges);
        lines.extend(styles);

        let diagram = lines.join("\n");
        if self.fenced {
            format!("```mermaid\n{}\n```\n", diagram)
        } else {
            diagram
        }
    }

    /// 路径 -> 图节点 id (未去重)
    #[doc(hidden)]
    pub fn node_id(path: &str) -> String {
        let cleaned = path.replace('/', "_").replace('.', "_").replace('-', "_");
        NON_WORD.replace_all(&cleaned, "_").into_owned()
    }

    #[doc(hidden)]
    pub fn node_label(node: &RouteNode) -> String {
        let label = match node.kind {
            NodeKind::Dynamic => match classifier::dynamic_param(&node.name) {
                Some(param) => format!("[{}]", param),
                None => node.name.clone(),
            },
            NodeKind::Page | NodeKind::Layout | NodeKind::Folder => node.name.clone(),
        };
        label.replace('"', "#quot;")
    }

    /// 普通目录没有样式
    #[doc(hidden)]
    pub fn node_style(kind: NodeKind) -> Option<&'static str> {
        match kind {
            NodeKind::Page => Some("fill:#9f9,stroke:#6c6,stroke-width:1px"),
            NodeKind::Layout => Some("fill:#ff9,stroke:#cc6,stroke-width:1px"),
            NodeKind::Dynamic => Some("fill:#9cf,stroke:#69c,stroke-width:1px"),
            NodeKind::Folder => None,
        }
    }
}

impl Default for MermaidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// 按路径分配 id
///
/// "a-b" 与 "a_b" 清洗后相同, 后出现的路径追加 "_2", "_3" ...
#[derive(Default)]
struct IdAllocator {
    by_path: HashMap<String, String>,
    used: HashSet<String>,
}

impl IdAllocator {
    fn id_for(&mut self, path: &str) -> String {
        if let Some(id) = self.by_path.get(path) {
            return id.clone();
        }

        let mut base = MermaidGenerator::node_id(path);
        if RESERVED_IDS.contains(&base.as_str()) {
            base = format!("n_{}", base);
        }
        let mut id = base.clone();
        let mut n = 2;
        while self.used.contains(&id) {
            id = format!("{}_{}", base, n);
            n += 1;
        }

        self.used.insert(id.clone());
        self.by_path.insert(path.to_string(), id.clone());
        id
    }
}
