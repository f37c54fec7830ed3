//! Parsing
//!
//! Turns source text into the [`Element`] tree rooted at a synthetic, selector-less root
//! element. See [`parser`] for the grammar and the one place the parser backtracks.
//!
//! Parsing stops at the first problem and returns a [`ParseError`] carrying a 1-based
//! line and column. Use [`ParseError::source_context`] to render an excerpt of the input.

pub mod error;
pub mod parser;

pub use error::{ParseError, ParseResult};
pub use parser::Parser;

use crate::ast::Element;

/// Parse a whole document.
pub fn parse(input: &str) -> ParseResult<Element> {
    Parser::new(input).parse()
}
