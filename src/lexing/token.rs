//! Token model shared by the scanner and the parser.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Grammatical position the scanner is lexing for.
///
/// The context decides which characters are structural. It is passed explicitly to every
/// [`Scanner::next`](super::Scanner::next) call instead of living inside the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LexContext {
    /// Element content: only braces and backticks are structural.
    #[default]
    Body,
    /// Start of an element body: like `Body`, but `[` opens an attribute.
    Head,
    /// Selectors and attributes: all punctuators are structural and bare words are identifiers.
    Selector,
}

impl LexContext {
    pub fn as_str(self) -> &'static str {
        match self {
            LexContext::Body => "body",
            LexContext::Head => "head",
            LexContext::Selector => "selector",
        }
    }
}

impl fmt::Display for LexContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LexContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "body" => Ok(LexContext::Body),
            "head" => Ok(LexContext::Head),
            "selector" => Ok(LexContext::Selector),
            other => Err(format!("unknown lexing context '{}'", other)),
        }
    }
}

/// Kind of a scanned token.
///
/// Whitespace and line breaks are consumed by the scanner without ever producing a token, so
/// they have no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Eof,
    Illegal,
    Identifier,
    Text,
    RawString,
    RawBlock,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Equals,
    Dot,
    Colon,
    Hash,
}

impl TokenKind {
    /// Punctuator kind for a structural character, if it is one.
    pub fn punctuator(c: char) -> Option<Self> {
        match c {
            '{' => Some(TokenKind::LeftBrace),
            '}' => Some(TokenKind::RightBrace),
            '[' => Some(TokenKind::LeftBracket),
            ']' => Some(TokenKind::RightBracket),
            '=' => Some(TokenKind::Equals),
            '.' => Some(TokenKind::Dot),
            ':' => Some(TokenKind::Colon),
            '#' => Some(TokenKind::Hash),
            _ => None,
        }
    }

    /// Name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Eof => "eof",
            TokenKind::Illegal => "illegal",
            TokenKind::Identifier => "identifier",
            TokenKind::Text => "text",
            TokenKind::RawString => "raw-string",
            TokenKind::RawBlock => "raw-block",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Equals => "=",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            TokenKind::Hash => "#",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single scanned token.
///
/// `start..end` is a byte range into the scanned input. `value` holds the decoded payload for
/// identifiers, text, raw strings and raw blocks, and the character itself for punctuators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
    /// Line breaks skipped right before this token.
    pub newlines: usize,
    /// Set only for [`TokenKind::Illegal`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::Text | TokenKind::RawString | TokenKind::RawBlock => {
                write!(f, "{}({:?})", self.kind, self.value)?
            }
            TokenKind::Illegal => write!(f, "illegal({})", self.error.unwrap_or("?"))?,
            kind => write!(f, "{}", kind)?,
        }
        write!(f, " @{}..{}", self.start, self.end)
    }
}
