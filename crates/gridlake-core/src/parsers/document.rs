//! Encoding-neutral view of a raw document.
//!
//! JSON objects and XML elements both become [`Node`]s: object keys and
//! element local names become node names, arrays become repeated siblings.
//! Name lookups ignore ASCII case, so `bMUnitID` and `bmUnitID` match alike.

use crate::parsers::DocumentError;

/// Container keys searched, in this order, for flat record lists in JSON
/// documents. Nothing outside this list is guessed at.
pub const CONTAINER_KEYS: [&str; 7] = [
    "responseBody",
    "responseList",
    "data",
    "results",
    "items",
    "item",
    "dataset",
];

/// Node name given to the elements of a top-level JSON array.
const ROOT_ARRAY_ITEM: &str = "item";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Xml,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub text: Option<String>,
    pub children: Vec<Node>,
    /// Placeholder for an empty JSON array, so `"data": []` still counts as
    /// a (record-less) container.
    empty_list: bool,
}

impl Node {
    fn element(name: impl Into<String>, text: Option<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            text,
            children,
            empty_list: false,
        }
    }

    /// Holds only nested objects or lists, no scalar fields of its own.
    fn is_wrapper(&self) -> bool {
        self.text.is_none()
            && !self.children.is_empty()
            && self
                .children
                .iter()
                .all(|child| child.empty_list || !child.children.is_empty())
    }

    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children_named(&self, name: &str) -> Vec<&Node> {
        self.children.iter().filter(|child| child.is(name)).collect()
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|child| child.is(name) && !child.empty_list)
    }

    /// Follows `segments` through direct children.
    pub fn path(&self, segments: &[&str]) -> Option<&Node> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Text of the first direct child among `names` that carries any.
    pub fn field(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .find_map(|name| self.child(name).and_then(Node::text))
    }

    /// Matching descendants in document order. Matches are not searched
    /// further, so nested blocks of the same name are not counted twice.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a Node> {
        let mut found = Vec::new();
        for child in &self.children {
            child.collect_named(name, &mut found);
        }
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Node>) {
        if self.is(name) {
            if !self.empty_list {
                found.push(self);
            }
            return;
        }
        for child in &self.children {
            child.collect_named(name, found);
        }
    }

    /// Text of the first descendant named `name`.
    pub fn find_text(&self, name: &str) -> Option<&str> {
        self.descendants_named(name)
            .into_iter()
            .find_map(Node::text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub encoding: Encoding,
    pub root: Node,
}

impl Document {
    /// Reads `raw` as JSON first and falls back to XML.
    pub fn parse(raw: &str) -> Result<Self, DocumentError> {
        let trimmed = raw.trim_start_matches('\u{feff}').trim();
        if trimmed.is_empty() {
            return Err(DocumentError::Empty);
        }

        let json_error = match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(value) => return Self::from_json(&value),
            Err(error) => error.to_string(),
        };

        let xml = roxmltree::Document::parse(trimmed).map_err(|error| DocumentError::Malformed {
            json: json_error,
            xml: error.to_string(),
        })?;
        let root = xml.root_element();
        let namespace = root.tag_name().namespace();

        Ok(Self {
            encoding: Encoding::Xml,
            root: Node::element("#document", None, vec![xml_node(root, namespace)]),
        })
    }

    fn from_json(value: &serde_json::Value) -> Result<Self, DocumentError> {
        let children = match value {
            serde_json::Value::Object(map) => map
                .iter()
                .flat_map(|(key, value)| json_nodes(key, value))
                .collect(),
            serde_json::Value::Array(_) => json_nodes(ROOT_ARRAY_ITEM, value),
            _ => return Err(DocumentError::UnrecognisedShape),
        };
        Ok(Self {
            encoding: Encoding::Json,
            root: Node::element("#document", None, children),
        })
    }

    /// Flat record list: every `item` element in XML, or the list found by
    /// walking [`CONTAINER_KEYS`] in JSON.
    pub fn flat_records(&self) -> Result<Vec<&Node>, DocumentError> {
        match self.encoding {
            Encoding::Xml => Ok(self.root.descendants_named("item")),
            Encoding::Json => locate_records(&self.root).ok_or(DocumentError::UnrecognisedShape),
        }
    }
}

fn locate_records(node: &Node) -> Option<Vec<&Node>> {
    for key in CONTAINER_KEYS {
        let matches = node.children_named(key);
        if matches.is_empty() {
            continue;
        }
        if matches.len() == 1 {
            let single = matches[0];
            if single.empty_list {
                return Some(Vec::new());
            }
            if single.is_wrapper() {
                return Some(locate_records(single).unwrap_or(matches));
            }
        }
        return Some(matches);
    }
    None
}

fn json_nodes(name: &str, value: &serde_json::Value) -> Vec<Node> {
    use serde_json::Value;

    match value {
        Value::Object(map) => vec![Node::element(
            name,
            None,
            map.iter()
                .flat_map(|(key, value)| json_nodes(key, value))
                .collect(),
        )],
        Value::Array(items) if items.is_empty() => vec![Node {
            empty_list: true,
            ..Node::element(name, None, Vec::new())
        }],
        Value::Array(items) => items.iter().flat_map(|item| json_nodes(name, item)).collect(),
        Value::String(text) => vec![Node::element(name, non_blank(text), Vec::new())],
        Value::Number(number) => vec![Node::element(name, Some(number.to_string()), Vec::new())],
        Value::Bool(flag) => vec![Node::element(name, Some(flag.to_string()), Vec::new())],
        Value::Null => vec![Node::element(name, None, Vec::new())],
    }
}

/// Elements outside the root namespace are skipped.
fn xml_node(element: roxmltree::Node<'_, '_>, namespace: Option<&str>) -> Node {
    let children: Vec<Node> = element
        .children()
        .filter(|child| child.is_element() && child.tag_name().namespace() == namespace)
        .map(|child| xml_node(child, namespace))
        .collect();
    let text = if children.is_empty() {
        element.text().and_then(non_blank)
    } else {
        None
    };
    Node::element(element.tag_name().name(), text, children)
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
