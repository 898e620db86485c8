use crate::tree::Node;

/// Attribute marking a script as module-scoped
pub const MODULE_MARKER: &str = r#"context="module""#;

const SCRIPT_OPEN: &str = "<script";
const SCRIPT_CLOSE: &str = "</script>";

/// Check if a node is a script container
///
/// True for `raw` nodes whose payload starts with `<script` and ends with
/// `</script>`.
pub fn is_script_container(node: &Node) -> bool {
    script_payload(node).is_some()
}

/// Check if a node is an instance (non-module) script container
pub fn is_instance_script(node: &Node) -> bool {
    script_payload(node).is_some_and(|payload| !payload.contains(MODULE_MARKER))
}

/// Check if a node is a module script container
pub fn is_module_script(node: &Node) -> bool {
    script_payload(node).is_some_and(|payload| payload.contains(MODULE_MARKER))
}

/// Check if a node is an element with a non-empty string `src` property
pub fn is_image_reference(node: &Node) -> bool {
    matches!(node, Node::Element(_)) && node.property("src").is_some_and(|src| !src.is_empty())
}

fn script_payload(node: &Node) -> Option<&str> {
    node.raw_value()
        .filter(|value| value.starts_with(SCRIPT_OPEN) && value.ends_with(SCRIPT_CLOSE))
}
