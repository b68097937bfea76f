//! 文件名 / 目录名分类
//!
//! 只看名字, 不读取文件内容

use crate::types::NodeKind;
use once_cell::sync::Lazy;
use regex::Regex;

static PAGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^page\.(js|jsx|ts|tsx)$").expect("valid page pattern"));

static LAYOUT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^layout\.(js|jsx|ts|tsx)$").expect("valid layout pattern"));

static DYNAMIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.+?)\]").expect("valid dynamic segment pattern"));

pub fn is_page_file(filename: &str) -> bool {
    PAGE_PATTERN.is_match(filename)
}

pub fn is_layout_file(filename: &str) -> bool {
    LAYOUT_PATTERN.is_match(filename)
}

pub fn is_dynamic_route(dirname: &str) -> bool {
    DYNAMIC_PATTERN.is_match(dirname)
}

/// 文件分类, 既不是 page 也不是 layout 时返回 None
pub fn classify_file(filename: &str) -> Option<NodeKind> {
    if is_page_file(filename) {
        Some(NodeKind::Page)
    } else if is_layout_file(filename) {
        Some(NodeKind::Layout)
    } else {
        None
    }
}

pub fn classify_dir(dirname: &str) -> NodeKind {
    if is_dynamic_route(dirname) {
        NodeKind::Dynamic
    } else {
        NodeKind::Folder
    }
}

/// 提取第一个方括号内的参数名: "[slug]" -> "slug", "[...all]" -> "...all"
pub fn dynamic_param(dirname: &str) -> Option<&str> {
    DYNAMIC_PATTERN
        .captures(dirname)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_files_all_extensions() {
        for name in ["page.js", "page.jsx", "page.ts", "page.tsx"] {
            assert!(is_page_file(name), "{name} should be a page");
            assert_eq!(classify_file(name), Some(NodeKind::Page));
        }
    }

    #[test]
    fn test_layout_files_all_extensions() {
        for name in ["layout.js", "layout.jsx", "layout.ts", "layout.tsx"] {
            assert!(is_layout_file(name), "{name} should be a layout");
            assert_eq!(classify_file(name), Some(NodeKind::Layout));
        }
    }

    #[test]
    fn test_non_matching_files() {
        for name in [
            "styles.css",
            "page.css",
            "page.tsx.bak",
            "homepage.tsx",
            "Page.tsx",
            "mylayout.ts",
            "loading.tsx",
            "page",
        ] {
            assert_eq!(classify_file(name), None, "{name} should not classify");
        }
    }

    #[test]
    fn test_page_and_layout_are_exclusive() {
        for name in ["page.tsx", "layout.tsx", "route.ts"] {
            assert!(!(is_page_file(name) && is_layout_file(name)));
        }
    }

    #[test]
    fn test_dynamic_dirs() {
        assert_eq!(classify_dir("[slug]"), NodeKind::Dynamic);
        assert_eq!(classify_dir("[...all]"), NodeKind::Dynamic);
        assert_eq!(classify_dir("[[...opt]]"), NodeKind::Dynamic);
        assert_eq!(classify_dir("blog"), NodeKind::Folder);
        assert_eq!(classify_dir("[]"), NodeKind::Folder);
        assert_eq!(classify_dir("(group)"), NodeKind::Folder);
    }

    #[test]
    fn test_dynamic_param() {
        assert_eq!(dynamic_param("[slug]"), Some("slug"));
        assert_eq!(dynamic_param("[...all]"), Some("...all"));
        assert_eq!(dynamic_param("post-[id]"), Some("id"));
        assert_eq!(dynamic_param("blog"), None);
    }
}
