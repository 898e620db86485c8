use crate::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Ordered map of node fields the transform does not own
pub type Fields = Map<String, JsonValue>;

/// A node of a compiled markup document (hast)
///
/// The model is closed: script payloads live in `Raw` nodes, image references
/// in `Element` nodes, and everything else (`root`, `text`, `comment`, ...)
/// is carried as `Other`. Fields that no variant lifts out are kept verbatim
/// in a pass-through map. A lifted field (`value`, `properties`, `children`)
/// leaves a `null` placeholder at its key, so it is written back in its
/// original position and a tree serializes to the exact JSON it came from
/// apart from the fields a transform rewrote.
///
/// # Examples
/// ```
/// use hast_img_import::tree::Node;
/// use serde_json::json;
///
/// let node: Node = serde_json::from_value(json!({
///     "type": "raw",
///     "value": "<script></script>"
/// })).unwrap();
/// assert_eq!(node.raw_value(), Some("<script></script>"));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "JsonValue", into = "JsonValue")]
pub enum Node {
    Raw(RawNode),
    Element(ElementNode),
    Other(OtherNode),
}

/// Node carrying a literal text payload (`type: "raw"`)
#[derive(Debug, Clone, PartialEq)]
pub struct RawNode {
    pub value: String,
    pub fields: Fields,
}

/// Element node (`type: "element"`)
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    /// `properties` object, `None` when absent or not an object
    pub properties: Option<Fields>,
    pub children: Option<Vec<Node>>,
    pub fields: Fields,
}

/// Any other node type, including the document root
#[derive(Debug, Clone, PartialEq)]
pub struct OtherNode {
    pub children: Option<Vec<Node>>,
    pub fields: Fields,
}

impl Node {
    /// Create a `raw` node with the given payload
    pub fn raw(value: impl Into<String>) -> Self {
        let mut fields = Fields::new();
        fields.insert("type".to_string(), JsonValue::from("raw"));
        Node::Raw(RawNode {
            value: value.into(),
            fields,
        })
    }

    /// Create an empty `root` node
    pub fn root(children: Vec<Node>) -> Self {
        let mut fields = Fields::new();
        fields.insert("type".to_string(), JsonValue::from("root"));
        Node::Other(OtherNode {
            children: Some(children),
            fields,
        })
    }

    /// Value of the `type` field, if it is a string
    pub fn kind(&self) -> Option<&str> {
        self.fields().get("type").and_then(|v| v.as_str())
    }

    /// Pass-through fields of this node
    pub fn fields(&self) -> &Fields {
        match self {
            Node::Raw(raw) => &raw.fields,
            Node::Element(element) => &element.fields,
            Node::Other(other) => &other.fields,
        }
    }

    /// Text payload of a `raw` node
    pub fn raw_value(&self) -> Option<&str> {
        match self {
            Node::Raw(raw) => Some(&raw.value),
            _ => None,
        }
    }

    /// String-valued property of an element node
    pub fn property(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element(element) => element
                .properties
                .as_ref()
                .and_then(|props| props.get(name))
                .and_then(|v| v.as_str()),
            _ => None,
        }
    }

    /// Set a string property on an element node
    ///
    /// Returns `false` when the node is not an element. A missing
    /// `properties` object is created.
    pub fn set_property(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self {
            Node::Element(element) => {
                element
                    .properties
                    .get_or_insert_with(Fields::new)
                    .insert(name.to_string(), JsonValue::String(value.into()));
                true
            }
            _ => false,
        }
    }

    /// Children of this node, if it has a `children` array
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Raw(_) => None,
            Node::Element(element) => element.children.as_deref(),
            Node::Other(other) => other.children.as_deref(),
        }
    }

    /// Mutable children of this node
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Raw(_) => None,
            Node::Element(element) => element.children.as_mut(),
            Node::Other(other) => other.children.as_mut(),
        }
    }

    /// Mutable children, creating an empty `children` array when absent
    ///
    /// # Returns
    /// * `Ok(&mut Vec<Node>)` - The children list
    /// * `Err(ImportError::NoChildren)` - If the node is a `raw` node
    pub fn children_or_insert(&mut self) -> Result<&mut Vec<Node>> {
        match self {
            Node::Raw(raw) => Err(ImportError::NoChildren(
                raw.fields
                    .get("type")
                    .and_then(|v| v.as_str())
                    .unwrap_or("raw")
                    .to_string(),
            )),
            Node::Element(element) => Ok(element.children.get_or_insert_with(Vec::new)),
            Node::Other(other) => Ok(other.children.get_or_insert_with(Vec::new)),
        }
    }
}

impl TryFrom<JsonValue> for Node {
    type Error = ImportError;

    fn try_from(value: JsonValue) -> Result<Self> {
        let mut fields = match value {
            JsonValue::Object(fields) => fields,
            other => {
                return Err(ImportError::InvalidNode(format!(
                    "expected an object, found {}",
                    json_kind(&other)
                )))
            }
        };

        let kind = fields.get("type").and_then(|v| v.as_str()).map(str::to_string);

        match kind.as_deref() {
            Some("raw") if fields.get("value").is_some_and(JsonValue::is_string) => {
                let value = match take_field(&mut fields, "value") {
                    JsonValue::String(value) => value,
                    _ => String::new(),
                };
                Ok(Node::Raw(RawNode { value, fields }))
            }
            Some("element") => {
                let properties = if fields.get("properties").is_some_and(JsonValue::is_object) {
                    match take_field(&mut fields, "properties") {
                        JsonValue::Object(props) => Some(props),
                        _ => None,
                    }
                } else {
                    None
                };
                let children = take_children(&mut fields)?;
                Ok(Node::Element(ElementNode {
                    properties,
                    children,
                    fields,
                }))
            }
            _ => {
                let children = take_children(&mut fields)?;
                Ok(Node::Other(OtherNode { children, fields }))
            }
        }
    }
}

impl From<Node> for JsonValue {
    fn from(node: Node) -> Self {
        let fields = match node {
            Node::Raw(RawNode { value, mut fields }) => {
                fields.insert("value".to_string(), JsonValue::String(value));
                fields
            }
            Node::Element(ElementNode {
                properties,
                children,
                mut fields,
            }) => {
                if let Some(properties) = properties {
                    fields.insert("properties".to_string(), JsonValue::Object(properties));
                }
                put_children(&mut fields, children);
                fields
            }
            Node::Other(OtherNode {
                children,
                mut fields,
            }) => {
                put_children(&mut fields, children);
                fields
            }
        };
        JsonValue::Object(fields)
    }
}

/// Lift a `children` array out of the field map
///
/// A `children` field that is not an array stays in the pass-through map.
fn take_children(fields: &mut Fields) -> Result<Option<Vec<Node>>> {
    if !fields.get("children").is_some_and(JsonValue::is_array) {
        return Ok(None);
    }

    match take_field(fields, "children") {
        JsonValue::Array(items) => items
            .into_iter()
            .map(Node::try_from)
            .collect::<Result<Vec<_>>>()
            .map(Some),
        _ => Ok(None),
    }
}

/// Move a field's value out, leaving `null` at its position
fn take_field(fields: &mut Fields, key: &str) -> JsonValue {
    fields.get_mut(key).map(JsonValue::take).unwrap_or(JsonValue::Null)
}

fn put_children(fields: &mut Fields, children: Option<Vec<Node>>) {
    if let Some(children) = children {
        let items = children.into_iter().map(JsonValue::from).collect();
        fields.insert("children".to_string(), JsonValue::Array(items));
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_raw_node() {
        let node = Node::try_from(json!({"type": "raw", "value": "<script></script>"})).unwrap();
        assert_eq!(node.raw_value(), Some("<script></script>"));
        assert_eq!(node.kind(), Some("raw"));
    }

    #[test]
    fn test_raw_node_without_string_value_is_other() {
        let node = Node::try_from(json!({"type": "raw", "value": 42})).unwrap();
        assert!(matches!(node, Node::Other(_)));
        assert!(node.raw_value().is_none());
    }

    #[test]
    fn test_parse_element_with_properties() {
        let node = Node::try_from(json!({
            "type": "element",
            "tagName": "img",
            "properties": {"src": "./a.png", "alt": "A"},
            "children": []
        }))
        .unwrap();

        assert_eq!(node.property("src"), Some("./a.png"));
        assert_eq!(node.property("alt"), Some("A"));
        assert_eq!(node.children().map(|c| c.len()), Some(0));
    }

    #[test]
    fn test_non_object_properties_are_passed_through() {
        let input = json!({"type": "element", "properties": "weird"});
        let node = Node::try_from(input.clone()).unwrap();
        assert!(node.property("src").is_none());
        assert_eq!(JsonValue::from(node), input);
    }

    #[test]
    fn test_round_trip_preserves_unknown_fields() {
        let input = json!({
            "type": "root",
            "children": [
                {
                    "type": "element",
                    "tagName": "p",
                    "properties": {},
                    "children": [{"type": "text", "value": "hi"}],
                    "position": {"start": {"line": 1, "column": 1}}
                },
                {"type": "raw", "value": "<hr>", "data": {"x": 1}}
            ],
            "data": {"quirksMode": false}
        });

        let node: Node = serde_json::from_value(input.clone()).unwrap();
        let output = serde_json::to_string(&node).unwrap();
        assert_eq!(output, serde_json::to_string(&input).unwrap());
    }

    #[test]
    fn test_round_trip_keeps_field_order() {
        let input = json!({"type": "raw", "value": "<hr>", "data": {"x": 1}});
        let node = Node::try_from(input).unwrap();
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"type":"raw","value":"<hr>","data":{"x":1}}"#
        );

        let input = json!({
            "type": "element",
            "children": [],
            "tagName": "img",
            "properties": {"src": "./a.png"},
            "position": {}
        });
        let mut node = Node::try_from(input).unwrap();
        node.set_property("src", "{__img_0}");
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"type":"element","children":[],"tagName":"img","properties":{"src":"{__img_0}"},"position":{}}"#
        );
    }

    #[test]
    fn test_non_object_child_is_rejected() {
        let result = Node::try_from(json!({"type": "root", "children": [1]}));
        assert!(matches!(result, Err(ImportError::InvalidNode(_))));
    }

    #[test]
    fn test_set_property_creates_properties() {
        let mut node = Node::try_from(json!({"type": "element", "tagName": "img"})).unwrap();
        assert!(node.set_property("src", "{__img_0}"));
        assert_eq!(node.property("src"), Some("{__img_0}"));

        let mut raw = Node::raw("<br>");
        assert!(!raw.set_property("src", "x"));
    }

    #[test]
    fn test_children_or_insert() {
        let mut node = Node::try_from(json!({"type": "root"})).unwrap();
        node.children_or_insert().unwrap().push(Node::raw("\n"));
        assert_eq!(node.children().map(|c| c.len()), Some(1));

        let mut raw = Node::raw("x");
        assert!(matches!(raw.children_or_insert(), Err(ImportError::NoChildren(_))));
    }
}
