//! AST traits - common interface for uniform node access

use super::node::{NodeKind, NodeRef};
use super::nodes::*;
use super::span::Span;

/// Common interface for all AST nodes.
pub trait AstNode {
    fn kind(&self) -> NodeKind;

    fn node_type(&self) -> &'static str {
        self.kind().as_str()
    }

    /// One-line label used by tree printers.
    fn display_label(&self) -> String;

    fn span(&self) -> Span;

    /// Logical children in source order.
    fn children(&self) -> Vec<NodeRef<'_>>;
}

impl AstNode for Element {
    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn display_label(&self) -> String {
        match self.selectors.is_empty() {
            true => "{}".to_string(),
            false => self.selector_text(),
        }
    }

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        self.selectors
            .iter()
            .map(NodeRef::from)
            .chain(std::iter::once(NodeRef::ElementBody(&self.body)))
            .collect()
    }
}

impl AstNode for ElementBody {
    fn kind(&self) -> NodeKind {
        NodeKind::ElementBody
    }

    fn display_label(&self) -> String {
        format!(
            "{} attribute(s), {} child(ren)",
            self.attributes.len(),
            self.children.len()
        )
    }

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        self.attributes
            .iter()
            .map(NodeRef::Attribute)
            .chain(self.children.iter().map(NodeRef::from))
            .collect()
    }
}

impl AstNode for NameSelector {
    fn kind(&self) -> NodeKind {
        NodeKind::NameSelector
    }

    fn display_label(&self) -> String {
        self.to_string()
    }

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        self.namespace
            .iter()
            .chain(std::iter::once(&self.name))
            .map(NodeRef::Identifier)
            .collect()
    }
}

impl AstNode for IdSelector {
    fn kind(&self) -> NodeKind {
        NodeKind::IdSelector
    }

    fn display_label(&self) -> String {
        self.to_string()
    }

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        vec![NodeRef::Identifier(&self.id)]
    }
}

impl AstNode for ClassSelector {
    fn kind(&self) -> NodeKind {
        NodeKind::ClassSelector
    }

    fn display_label(&self) -> String {
        self.to_string()
    }

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        vec![NodeRef::Identifier(&self.name)]
    }
}

impl AstNode for Attribute {
    fn kind(&self) -> NodeKind {
        NodeKind::Attribute
    }

    fn display_label(&self) -> String {
        match self.value_text() {
            Some(value) => format!("[{}={}]", self.key.value, value),
            None => format!("[{}]", self.key.value),
        }
    }

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        let mut children = vec![NodeRef::Identifier(&self.key)];
        match &self.value {
            Some(AttributeValue::Identifier(value)) => children.push(NodeRef::Identifier(value)),
            Some(AttributeValue::RawString(value)) => children.push(NodeRef::RawString(value)),
            None => {}
        }
        children
    }
}

impl AstNode for Identifier {
    fn kind(&self) -> NodeKind {
        NodeKind::Identifier
    }

    fn display_label(&self) -> String {
        self.value.clone()
    }

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        Vec::new()
    }
}

impl AstNode for Text {
    fn kind(&self) -> NodeKind {
        NodeKind::Text
    }

    fn display_label(&self) -> String {
        self.value.clone()
    }

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        Vec::new()
    }
}

impl AstNode for RawString {
    fn kind(&self) -> NodeKind {
        NodeKind::RawString
    }

    fn display_label(&self) -> String {
        self.value.clone()
    }

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        Vec::new()
    }
}

impl AstNode for RawBlock {
    fn kind(&self) -> NodeKind {
        NodeKind::RawBlock
    }

    fn display_label(&self) -> String {
        self.value.clone()
    }

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        Vec::new()
    }
}
