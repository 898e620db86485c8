use super::classify::is_script_container;
use crate::error::Result;
use crate::tree::{Node, NodePath};
use regex::Regex;
use std::sync::LazyLock;

/// Payload of a freshly created instance script
pub const EMPTY_SCRIPT: &str = "<script></script>";

const SCRIPT_CLOSE: &str = "</script>";

/// `{identifier}` image sources that point into the module script
static INDIRECTION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{(\w+)\}$").unwrap());

/// Get the instance script container, creating it when missing
///
/// When no instance script was found during the scan, an empty
/// `<script></script>` raw node is inserted as the first child of the root,
/// followed by a `"\n"` raw node, which places it ahead of any module script.
///
/// # Arguments
/// * `tree` - The document root
/// * `found` - Path of the instance script captured by the scan, if any
///
/// # Returns
/// * `Ok(NodePath)` - Path of the instance script container
/// * `Err(ImportError)` - If the root cannot hold children
pub fn get_or_create_instance_script(tree: &mut Node, found: Option<NodePath>) -> Result<NodePath> {
    if let Some(path) = found {
        return Ok(path);
    }

    let children = tree.children_or_insert()?;
    children.insert(0, Node::raw(EMPTY_SCRIPT));
    children.insert(1, Node::raw("\n"));
    Ok(vec![0])
}

/// Splice an import statement in front of the closing script tag
///
/// Appends `;import <id> from "<path>";` right before `</script>`. The
/// leading semicolon keeps the clause valid after arbitrary existing script
/// content. Returns `false` if the node is not a script container.
///
/// # Examples
/// ```
/// use hast_img_import::transform::add_import;
/// use hast_img_import::tree::Node;
///
/// let mut script = Node::raw("<script></script>");
/// add_import(&mut script, "__img_0", "./img1.png");
/// assert_eq!(script.raw_value(), Some(r#"<script>;import __img_0 from "./img1.png";</script>"#));
/// ```
pub fn add_import(script: &mut Node, id: &str, import_path: &str) -> bool {
    if !is_script_container(script) {
        return false;
    }
    let Node::Raw(raw) = script else {
        return false;
    };
    let Some(body) = raw.value.strip_suffix(SCRIPT_CLOSE) else {
        return false;
    };

    raw.value = format!(
        r#"{};import {} from "{}";{}"#,
        body,
        id,
        escape_specifier(import_path),
        SCRIPT_CLOSE
    );
    true
}

/// Extract the identifier from an `{identifier}` image source
pub fn indirection_token(src: &str) -> Option<&str> {
    INDIRECTION_TOKEN
        .captures(src)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Look up a `"<key>":"<value>"` entry in a module script payload
///
/// Returns the first match, or `None` when the key is absent or its value
/// is empty.
pub fn lookup_module_entry(payload: &str, key: &str) -> Result<Option<String>> {
    let pattern = Regex::new(&format!(r#""{}":"(.*?)""#, regex::escape(key)))?;

    Ok(pattern
        .captures(payload)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|value| !value.is_empty())
        .map(str::to_string))
}

/// Escape a module specifier for a double-quoted string literal
fn escape_specifier(path: &str) -> String {
    path.replace('\\', "\\\\").replace('"', "\\\"")
}
