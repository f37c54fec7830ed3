//! Document model
//!
//! The syntax tree keeps every token it was built from. Consumers that only care about the
//! markup's meaning use the document model instead: each element is reduced to its name,
//! namespace, id, class set and attribute map, and every raw string, raw block and word of text
//! becomes a text node.
//!
//! The document is built by a single depth-first walk over [`AstNode::children`]:
//!
//! - Element: a new document element appended to the current parent, which its own children
//!   are then added to.
//! - ElementBody: attributes then content, added to the current parent.
//! - NameSelector: sets the parent's namespace (when present) and name.
//! - IdSelector: sets the parent's id.
//! - ClassSelector: adds to the parent's class set.
//! - Attribute: sets `key` in the parent's attribute map; the last write for a key wins and
//!   a bare `[key]` maps to `None`.
//! - Text, RawString, RawBlock: a text node with the decoded value.
//!
//! The root element of the syntax tree becomes the returned [`Document`] itself.

use crate::ast::{self, AstNode, NodeRef};
use crate::parsing::ParseResult;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The document root: an element without selectors.
pub type Document = Element;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Option<String>>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub classes: BTreeSet<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    /// Concatenated text of all descendant text nodes, separated by single spaces.
    pub fn text_content(&self) -> String {
        let mut words = Vec::new();
        self.collect_text(&mut words);
        words.join(" ")
    }

    fn collect_text<'a>(&'a self, words: &mut Vec<&'a str>) {
        for child in &self.children {
            match child {
                Node::Element(element) => element.collect_text(words),
                Node::Text(text) => words.push(&text.value),
            }
        }
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First descendant element (depth-first, pre-order) with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.elements().find_map(|element| {
            if element.id.as_deref() == Some(id) {
                Some(element)
            } else {
                element.find_by_id(id)
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text(Text),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
    /// Always empty for now. Reserved for inline markup inside text.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Keep text nodes whose decoded value is only whitespace, such as a raw block holding a
    /// single line break.
    pub keep_blank_text: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            keep_blank_text: true,
        }
    }
}

/// Build the document for a parsed root element.
pub fn build(root: &ast::Element) -> Document {
    build_with(root, &BuildOptions::default())
}

pub fn build_with(root: &ast::Element, options: &BuildOptions) -> Document {
    let mut document = Document::default();
    for child in NodeRef::from(root).children() {
        visit(child, &mut document, options);
    }
    document
}

/// Parse `input` and build its document.
pub fn parse(input: &str) -> ParseResult<Document> {
    crate::parsing::parse(input).map(|root| build(&root))
}

fn visit(node: NodeRef<'_>, parent: &mut Element, options: &BuildOptions) {
    match node {
        NodeRef::Element(_) => {
            let mut element = Element::default();
            for child in node.children() {
                visit(child, &mut element, options);
            }
            parent.children.push(Node::Element(element));
        }
        NodeRef::ElementBody(_) => {
            for child in node.children() {
                visit(child, parent, options);
            }
        }
        NodeRef::NameSelector(selector) => {
            if let Some(namespace) = &selector.namespace {
                parent.namespace = Some(namespace.value.clone());
            }
            parent.name = Some(selector.name.value.clone());
        }
        NodeRef::IdSelector(selector) => {
            parent.id = Some(selector.id.value.clone());
        }
        NodeRef::ClassSelector(selector) => {
            parent.classes.insert(selector.name.value.clone());
        }
        NodeRef::Attribute(attribute) => {
            parent.attributes.insert(
                attribute.key.value.clone(),
                attribute.value_text().map(str::to_string),
            );
        }
        NodeRef::Text(ast::Text { value, .. })
        | NodeRef::RawString(ast::RawString { value, .. })
        | NodeRef::RawBlock(ast::RawBlock { value, .. }) => {
            if options.keep_blank_text || !value.trim().is_empty() {
                parent.children.push(Node::Text(Text::new(value.clone())));
            }
        }
        // Handled by the selector and attribute that own them.
        NodeRef::Identifier(_) => {}
    }
}
