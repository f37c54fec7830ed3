//! Syntax tree node set
//!
//! One struct per grammar production. Nodes own their children outright and are never mutated
//! after the parser builds them. Polymorphic positions (a selector, a body child, an attribute
//! value) are closed enums, so consumers match them exhaustively.
//!
//! ```text
//! Element      := SelectorList? '{' ElementBody '}'
//! SelectorList := NameSelector? (IdSelector | ClassSelector)*
//! NameSelector := Identifier (':' Identifier)?
//! Attribute    := '[' Identifier ('=' (RawString | Identifier))? ']'
//! ElementBody  := Attribute* (Element | RawString | RawBlock | Text)*
//! ```

use super::span::Span;
use std::fmt;

/// An element: selectors followed by a braced body.
///
/// The document root is an element with no selectors whose body is not braced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub selectors: Vec<Selector>,
    pub body: ElementBody,
    pub span: Span,
}

impl Element {
    pub fn new(selectors: Vec<Selector>, body: ElementBody, span: Span) -> Self {
        Self {
            selectors,
            body,
            span,
        }
    }

    /// The name selector, if the element has one. It is always the first selector.
    pub fn name(&self) -> Option<&NameSelector> {
        match self.selectors.first() {
            Some(Selector::Name(name)) => Some(name),
            _ => None,
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &Identifier> {
        self.selectors.iter().filter_map(|selector| match selector {
            Selector::Id(id) => Some(&id.id),
            _ => None,
        })
    }

    pub fn classes(&self) -> impl Iterator<Item = &Identifier> {
        self.selectors.iter().filter_map(|selector| match selector {
            Selector::Class(class) => Some(&class.name),
            _ => None,
        })
    }

    /// Selectors rendered back to source form, e.g. `svg:rect#r.a.b`.
    pub fn selector_text(&self) -> String {
        self.selectors.iter().map(ToString::to_string).collect()
    }
}

/// Attributes and content of an element.
///
/// Attributes always form a prefix: the parser stops looking for them at the first other child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementBody {
    pub attributes: Vec<Attribute>,
    pub children: Vec<Content>,
    pub span: Span,
}

impl ElementBody {
    pub fn new(attributes: Vec<Attribute>, children: Vec<Content>, span: Span) -> Self {
        Self {
            attributes,
            children,
            span,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }
}

/// A single selector of a selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Name(NameSelector),
    Id(IdSelector),
    Class(ClassSelector),
}

impl Selector {
    pub fn span(&self) -> Span {
        match self {
            Selector::Name(name) => name.span,
            Selector::Id(id) => id.span,
            Selector::Class(class) => class.span,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Name(name) => name.fmt(f),
            Selector::Id(id) => id.fmt(f),
            Selector::Class(class) => class.fmt(f),
        }
    }
}

/// `name` or `namespace:name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSelector {
    pub namespace: Option<Identifier>,
    pub name: Identifier,
    pub span: Span,
}

impl NameSelector {
    pub fn new(namespace: Option<Identifier>, name: Identifier, span: Span) -> Self {
        Self {
            namespace,
            name,
            span,
        }
    }
}

impl fmt::Display for NameSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace) = &self.namespace {
            write!(f, "{}:", namespace.value)?;
        }
        f.write_str(&self.name.value)
    }
}

/// `#id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSelector {
    pub id: Identifier,
    pub span: Span,
}

impl IdSelector {
    pub fn new(id: Identifier, span: Span) -> Self {
        Self { id, span }
    }
}

impl fmt::Display for IdSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id.value)
    }
}

/// `.class`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSelector {
    pub name: Identifier,
    pub span: Span,
}

impl ClassSelector {
    pub fn new(name: Identifier, span: Span) -> Self {
        Self { name, span }
    }
}

impl fmt::Display for ClassSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.name.value)
    }
}

/// `[key]` or `[key=value]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: Identifier,
    pub value: Option<AttributeValue>,
    pub span: Span,
}

impl Attribute {
    pub fn new(key: Identifier, value: Option<AttributeValue>, span: Span) -> Self {
        Self { key, value, span }
    }

    /// Decoded value text, `None` for a valueless attribute.
    pub fn value_text(&self) -> Option<&str> {
        self.value.as_ref().map(AttributeValue::text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Identifier(Identifier),
    RawString(RawString),
}

impl AttributeValue {
    pub fn text(&self) -> &str {
        match self {
            AttributeValue::Identifier(identifier) => &identifier.value,
            AttributeValue::RawString(raw) => &raw.value,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            AttributeValue::Identifier(identifier) => identifier.span,
            AttributeValue::RawString(raw) => raw.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub value: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(value: impl Into<String>, span: Span) -> Self {
        Self {
            value: value.into(),
            span,
        }
    }
}

/// A child of an element body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Element(Element),
    Text(Text),
    RawString(RawString),
    RawBlock(RawBlock),
}

impl Content {
    pub fn span(&self) -> Span {
        match self {
            Content::Element(element) => element.span,
            Content::Text(text) => text.span,
            Content::RawString(raw) => raw.span,
            Content::RawBlock(block) => block.span,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Content::Element(_))
    }

    /// Decoded text of a leaf child; `None` for elements.
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Element(_) => None,
            Content::Text(text) => Some(&text.value),
            Content::RawString(raw) => Some(&raw.value),
            Content::RawBlock(block) => Some(&block.value),
        }
    }
}

/// A run of body text. Text never contains whitespace; words are separate nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub value: String,
    /// Line breaks between the previous token and this one.
    pub newlines: usize,
    pub span: Span,
}

impl Text {
    pub fn new(value: impl Into<String>, newlines: usize, span: Span) -> Self {
        Self {
            value: value.into(),
            newlines,
            span,
        }
    }
}

/// A backtick-delimited string, with doubled backticks decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawString {
    pub value: String,
    pub newlines: usize,
    pub span: Span,
}

impl RawString {
    pub fn new(value: impl Into<String>, newlines: usize, span: Span) -> Self {
        Self {
            value: value.into(),
            newlines,
            span,
        }
    }
}

/// Verbatim content between matching backtick fences of three or more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub value: String,
    pub newlines: usize,
    pub span: Span,
}

impl RawBlock {
    pub fn new(value: impl Into<String>, newlines: usize, span: Span) -> Self {
        Self {
            value: value.into(),
            newlines,
            span,
        }
    }
}
