//! Parse errors
//!
//! Lexical problems (unterminated raw strings and blocks, characters that cannot start a
//! selector token) and grammar mismatches are reported the same way: a message and the
//! 1-based line and column of the offending token. The first error aborts the parse.

use std::fmt::Write as _;
use thiserror::Error;

pub const UNEXPECTED_END_OF_INPUT: &str = "Unexpected end of input";

/// Type alias for parser results.
pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}{}:{}: {}", file_prefix(.filename), .line, .column, .message)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    /// 1-based, counted in characters.
    pub column: usize,
    /// Byte offset of the offending token.
    pub offset: usize,
    /// Attached by callers that parse files.
    pub filename: Option<String>,
}

fn file_prefix(filename: &Option<String>) -> String {
    filename
        .as_deref()
        .map(|name| format!("{}:", name))
        .unwrap_or_default()
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize, column: usize, offset: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            offset,
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Format the source lines around the error.
    ///
    /// Shows up to 2 lines before the error, the error line with a `>>` marker and a caret under
    /// the error column, and up to 2 lines after. Lines are numbered from 1.
    pub fn source_context(&self, source: &str) -> String {
        let lines: Vec<&str> = source.lines().collect();
        let error_line = self.line.saturating_sub(1);

        let start_line = error_line.saturating_sub(2);
        let end_line = (error_line + 3).min(lines.len());

        let mut context = String::new();

        for (line_num, text) in lines.iter().enumerate().take(end_line).skip(start_line) {
            let marker = if line_num == error_line { ">>" } else { "  " };
            let _ = writeln!(context, "{} {:3} | {}", marker, line_num + 1, text);

            if line_num == error_line {
                let pad = " ".repeat(self.column.saturating_sub(1));
                let _ = writeln!(context, "{:6} | {}^", "", pad);
            }
        }

        context
    }
}
