use crate::types::RouteNode;

/// 裁剪不含 page / layout 的子树
///
/// 先递归裁剪子节点, 再过滤; 根节点本身永远保留
pub fn prune(node: &mut RouteNode) -> &mut RouteNode {
    let children = std::mem::take(&mut node.children);
    node.children = children
        .into_iter()
        .map(|mut child| {
            prune(&mut child);
            child
        })
        .filter(RouteNode::has_component_in_subtree)
        .collect();
    node
}
