use super::node::Node;

/// Index path from the root to a node (empty for the root itself)
pub type NodePath = Vec<usize>;

/// Collect the paths of every node matching `predicate`
///
/// Walks the tree depth-first in document order (pre-order, root included)
/// and returns owned paths, so callers can finish scanning before they start
/// mutating the tree.
///
/// # Arguments
/// * `root` - The tree to scan
/// * `predicate` - Test applied to each node
///
/// # Returns
/// * `Vec<NodePath>` - Paths of matching nodes, in document order
///
/// # Examples
/// ```
/// use hast_img_import::tree::{collect_paths, Node};
///
/// let tree = Node::root(vec![Node::raw("a"), Node::raw("b")]);
/// let paths = collect_paths(&tree, |node| node.raw_value() == Some("b"));
/// assert_eq!(paths, vec![vec![1]]);
/// ```
pub fn collect_paths<F>(root: &Node, predicate: F) -> Vec<NodePath>
where
    F: Fn(&Node) -> bool,
{
    let mut paths = Vec::new();
    let mut current = Vec::new();
    collect_recursive(root, &predicate, &mut current, &mut paths);
    paths
}

fn collect_recursive<F>(node: &Node, predicate: &F, current: &mut NodePath, paths: &mut Vec<NodePath>)
where
    F: Fn(&Node) -> bool,
{
    if predicate(node) {
        paths.push(current.clone());
    }

    if let Some(children) = node.children() {
        for (index, child) in children.iter().enumerate() {
            current.push(index);
            collect_recursive(child, predicate, current, paths);
            current.pop();
        }
    }
}

/// Find the node at `path`
pub fn node_at<'a>(root: &'a Node, path: &[usize]) -> Option<&'a Node> {
    path.iter()
        .try_fold(root, |node, &index| node.children()?.get(index))
}

/// Find the node at `path` for mutation
pub fn node_at_mut<'a>(root: &'a mut Node, path: &[usize]) -> Option<&'a mut Node> {
    let mut node = root;
    for &index in path {
        node = node.children_mut()?.get_mut(index)?;
    }
    Some(node)
}
