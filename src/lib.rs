//! # selmark
//!
//! A parser for selmark, a compact markup language where every element is written as a CSS-like
//! selector followed by a braced body:
//!
//! ```text
//! body {
//!     div#main.wide {
//!         [lang=en]
//!         Some text, `a raw string` and a p { nested paragraph }.
//!     }
//! }
//! ```
//!
//! The pipeline is split in the following modules:
//!
//! - [`lexing`]: context-sensitive scanner producing one token at a time.
//! - [`parsing`]: recursive descent parser producing the syntax tree, and [`ParseError`].
//! - [`ast`]: syntax tree nodes, traversal and serializable snapshots.
//! - [`document`]: the document model (names, ids, classes, attributes, text).
//! - [`formats`]: treeviz, JSON and YAML output.
//! - [`config`]: layered configuration for the command line tool.
//!
//! Parsing is single threaded and self-contained: every call to [`parse`] builds its own
//! scanner and parser, and the first error aborts the parse.

pub mod ast;
pub mod config;
pub mod document;
pub mod formats;
pub mod lexing;
pub mod parsing;

pub use ast::Element;
pub use document::Document;
pub use parsing::{parse, ParseError, ParseResult};
