//! Borrowed view over any node
//!
//! [`NodeRef`] is the closed set of node variants. Generic consumers (document building, tree
//! printing, snapshots) walk the tree through [`AstNode::children`] and match on the variant, so
//! adding a node kind is a compile error everywhere it is not handled.

use super::nodes::*;
use super::span::Span;
use super::traits::AstNode;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Element,
    ElementBody,
    NameSelector,
    IdSelector,
    ClassSelector,
    Attribute,
    Identifier,
    Text,
    RawString,
    RawBlock,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Element => "Element",
            NodeKind::ElementBody => "ElementBody",
            NodeKind::NameSelector => "NameSelector",
            NodeKind::IdSelector => "IdSelector",
            NodeKind::ClassSelector => "ClassSelector",
            NodeKind::Attribute => "Attribute",
            NodeKind::Identifier => "Identifier",
            NodeKind::Text => "Text",
            NodeKind::RawString => "RawString",
            NodeKind::RawBlock => "RawBlock",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Element(&'a Element),
    ElementBody(&'a ElementBody),
    NameSelector(&'a NameSelector),
    IdSelector(&'a IdSelector),
    ClassSelector(&'a ClassSelector),
    Attribute(&'a Attribute),
    Identifier(&'a Identifier),
    Text(&'a Text),
    RawString(&'a RawString),
    RawBlock(&'a RawBlock),
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a dyn AstNode {
        match *self {
            NodeRef::Element(node) => node,
            NodeRef::ElementBody(node) => node,
            NodeRef::NameSelector(node) => node,
            NodeRef::IdSelector(node) => node,
            NodeRef::ClassSelector(node) => node,
            NodeRef::Attribute(node) => node,
            NodeRef::Identifier(node) => node,
            NodeRef::Text(node) => node,
            NodeRef::RawString(node) => node,
            NodeRef::RawBlock(node) => node,
        }
    }

    /// Depth-first, pre-order iteration over this node and all its descendants.
    pub fn descendants(self) -> Descendants<'a> {
        Descendants { stack: vec![self] }
    }
}

impl AstNode for NodeRef<'_> {
    fn kind(&self) -> NodeKind {
        self.node().kind()
    }

    fn display_label(&self) -> String {
        self.node().display_label()
    }

    fn span(&self) -> Span {
        self.node().span()
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        self.node().children()
    }
}

impl<'a> From<&'a Selector> for NodeRef<'a> {
    fn from(selector: &'a Selector) -> Self {
        match selector {
            Selector::Name(name) => NodeRef::NameSelector(name),
            Selector::Id(id) => NodeRef::IdSelector(id),
            Selector::Class(class) => NodeRef::ClassSelector(class),
        }
    }
}

impl<'a> From<&'a Content> for NodeRef<'a> {
    fn from(content: &'a Content) -> Self {
        match content {
            Content::Element(element) => NodeRef::Element(element),
            Content::Text(text) => NodeRef::Text(text),
            Content::RawString(raw) => NodeRef::RawString(raw),
            Content::RawBlock(block) => NodeRef::RawBlock(block),
        }
    }
}

impl<'a> From<&'a Element> for NodeRef<'a> {
    fn from(element: &'a Element) -> Self {
        NodeRef::Element(element)
    }
}

/// Iterator returned by [`NodeRef::descendants`].
pub struct Descendants<'a> {
    stack: Vec<NodeRef<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let children = node.node().children();
        self.stack.extend(children.into_iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(value: &str, start: usize) -> Identifier {
        Identifier::new(value, Span::new(start, start + value.len()))
    }

    /// `p.x { [k] hi }`
    fn sample() -> Element {
        let body = ElementBody::new(
            vec![Attribute::new(ident("k", 7), None, Span::new(6, 9))],
            vec![Content::Text(Text::new("hi", 0, Span::new(10, 12)))],
            Span::new(4, 14),
        );
        Element::new(
            vec![
                Selector::Name(NameSelector::new(None, ident("p", 0), Span::new(0, 1))),
                Selector::Class(ClassSelector::new(ident("x", 2), Span::new(1, 3))),
            ],
            body,
            Span::new(0, 14),
        )
    }

    #[test]
    fn element_children_are_selectors_then_body() {
        let element = sample();
        let kinds: Vec<_> = NodeRef::from(&element)
            .children()
            .iter()
            .map(|child| child.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![NodeKind::NameSelector, NodeKind::ClassSelector, NodeKind::ElementBody]
        );
    }

    #[test]
    fn descendants_are_pre_order() {
        let element = sample();
        let kinds: Vec<_> = NodeRef::from(&element)
            .descendants()
            .map(|node| node.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Element,
                NodeKind::NameSelector,
                NodeKind::Identifier,
                NodeKind::ClassSelector,
                NodeKind::Identifier,
                NodeKind::ElementBody,
                NodeKind::Attribute,
                NodeKind::Identifier,
                NodeKind::Text,
            ]
        );
    }

    #[test]
    fn labels() {
        let element = sample();
        assert_eq!(NodeRef::from(&element).display_label(), "p.x");
        assert_eq!(element.body.attributes[0].display_label(), "[k]");
        assert_eq!(NodeRef::from(&element).node_type(), "Element");
    }

    #[test]
    fn raw_labels_are_decoded_values() {
        let root = crate::parsing::parse("`a``b` ```\nfn main() {}\n```").unwrap();
        let labels: Vec<_> = root
            .body
            .children
            .iter()
            .map(|content| NodeRef::from(content).display_label())
            .collect();
        assert_eq!(labels, vec!["a`b", "\nfn main() {}\n"]);
    }
}
