//! AST Snapshot - a normalized intermediate representation of the AST tree
//!
//! The snapshot captures node types, labels, spans, a few node-specific attributes and the
//! children, in a form any serializer can consume (treeviz, JSON, YAML) without reimplementing
//! the traversal.

use super::node::NodeRef;
use super::span::Span;
use super::traits::AstNode;
use super::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of an AST node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Element", "Text")
    pub node_type: String,

    /// The primary label or text content of the node
    pub label: String,

    pub span: Span,

    /// Additional attributes specific to the node type
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Child nodes in the tree
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: String, label: String, span: Span) -> Self {
        Self {
            node_type,
            label,
            span,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.insert(key.into(), value.to_string());
        self
    }

    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }

    /// Total number of nodes in this snapshot, itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AstSnapshot::node_count).sum::<usize>()
    }
}

/// Build the snapshot of a node and all its descendants.
pub fn snapshot_node(node: NodeRef<'_>) -> AstSnapshot {
    let mut snapshot = AstSnapshot::new(
        node.node_type().to_string(),
        node.display_label(),
        node.span(),
    );

    snapshot = match node {
        NodeRef::Text(text) => snapshot.with_attribute("newlines", text.newlines),
        NodeRef::RawString(raw) => snapshot.with_attribute("newlines", raw.newlines),
        NodeRef::RawBlock(block) => snapshot.with_attribute("newlines", block.newlines),
        NodeRef::NameSelector(name) => match &name.namespace {
            Some(namespace) => snapshot.with_attribute("namespace", &namespace.value),
            None => snapshot,
        },
        NodeRef::Element(_)
        | NodeRef::ElementBody(_)
        | NodeRef::IdSelector(_)
        | NodeRef::ClassSelector(_)
        | NodeRef::Attribute(_)
        | NodeRef::Identifier(_) => snapshot,
    };

    let children = node.children().into_iter().map(snapshot_node).collect();
    snapshot.with_children(children)
}

/// Snapshot of a parsed document, rooted at the synthetic root element.
pub fn snapshot_from_element(element: &Element) -> AstSnapshot {
    snapshot_node(NodeRef::Element(element))
}
