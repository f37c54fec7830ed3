//! Syntax tree for selmark documents
//!
//! A document is a tree of elements. Each element carries an ordered selector list (name,
//! namespace, ids, classes) and a body made of an attribute prefix followed by content: nested
//! elements, words of text, raw strings and raw blocks.
//!
//! ```text
//! svg:rect#box.wide.tall { [width=`10`] [hidden] some text }
//! ```
//!
//! Nodes are immutable values built by the parser, each with the byte [`Span`] it covers.
//! Child spans always nest within their parent's span.
//!
//! # Traversal
//!
//! Consumers walk the tree through [`AstNode::children`], which yields [`NodeRef`]s in a
//! fixed order: selectors then body for an element, attributes then content for a body,
//! namespace then name for a name selector. [`NodeRef`] is a closed enum, so every consumer
//! handles every node kind.
//!
//! See [`snapshot`] for the serializable form used by the output formats.

pub mod node;
pub mod nodes;
pub mod snapshot;
pub mod span;
pub mod traits;

pub use node::{NodeKind, NodeRef};
pub use nodes::{
    Attribute, AttributeValue, ClassSelector, Content, Element, ElementBody, IdSelector,
    Identifier, NameSelector, RawBlock, RawString, Selector, Text,
};
pub use snapshot::{snapshot_from_element, snapshot_node, AstSnapshot};
pub use span::Span;
pub use traits::AstNode;
