//! Lexing for selmark sources
//!
//! Lexing is split in four small pieces:
//!
//! - [`chars`]: pure character classification (whitespace, line breaks, identifier and text
//!   characters).
//! - [`token`]: the token model and the [`LexContext`] that selects which characters are
//!   structural.
//! - [`lines`]: the append-only line table behind line/column reporting.
//! - [`scanner`]: the pull-based, context-sensitive [`Scanner`].
//!
//! There is no up-front tokenization pass: the parser drives the scanner one token at a time,
//! choosing the context per grammar position. [`tokenize`] drains a scanner in a fixed context
//! and exists for diagnostics and tests.

pub mod chars;
pub mod lines;
pub mod scanner;
pub mod token;

pub use lines::{LineIndex, Position};
pub use scanner::{tokenize, Scanner};
pub use token::{LexContext, Token, TokenKind};
