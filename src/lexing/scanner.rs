//! Context-sensitive scanner
//!
//! The scanner is pull-based: the parser asks for one token at a time and says, through a
//! [`LexContext`], which characters should be structural at that grammatical position. The same
//! input can therefore lex differently on a second pass, which is what the parser relies on when
//! it rewinds to re-read a text token as a selector.
//!
//! Dispatch on the next character:
//!
//! | Character             | Body  | Head  | Selector   |
//! |-----------------------|-------|-------|------------|
//! | whitespace, newline   | skip  | skip  | skip       |
//! | `` ` ``               | raw   | raw   | raw        |
//! | `{` `}`               | punct | punct | punct      |
//! | `[`                   | text  | punct | punct      |
//! | `]` `=` `.` `:` `#`   | text  | text  | punct      |
//! | `-`                   | text  | text  | identifier |
//! | anything else         | text  | text  | identifier or illegal |
//!
//! Backtick runs decode as follows: one backtick opens an inline raw string where a doubled
//! backtick is a literal backtick; exactly two backticks are a literal backtick on their own;
//! three or more open a raw block closed only by a run of the same length.
//!
//! Line breaks are recorded in a [`LineIndex`] as they are skipped, so [`Scanner::position`] is
//! available for any offset the scanner has already passed.

use super::chars::{
    is_ascii_inline_whitespace, is_identifier_char, is_inline_whitespace, is_line_break,
    is_text_char, is_unicode_inline_whitespace,
};
use super::lines::{LineIndex, Position};
use super::token::{LexContext, Token, TokenKind};

pub const UNTERMINATED_RAW_STRING: &str = "Unterminated raw string";
pub const UNTERMINATED_RAW_BLOCK: &str = "Unterminated raw block";
pub const UNRECOGNIZED_TOKEN: &str = "Unrecognized token";

/// Shortest backtick run that opens a raw block.
const RAW_BLOCK_FENCE: usize = 3;

/// Outcome of one dispatch step: either a token kind or nothing (whitespace, newline).
type Step = Option<TokenKind>;

pub struct Scanner<'a> {
    input: &'a str,
    offset: usize,
    lines: LineIndex,
    /// Line breaks skipped since the last token.
    newlines: usize,
    value: String,
    error: Option<&'static str>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            lines: LineIndex::new(),
            newlines: 0,
            value: String::new(),
            error: None,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Move the cursor to `offset`.
    ///
    /// Used by the parser to rewind. Line breaks already recorded stay recorded.
    pub fn seek(&mut self, offset: usize) {
        self.offset = offset.min(self.input.len());
    }

    /// Resolve an offset to a line/column position.
    ///
    /// Only line breaks up to the furthest scanned offset are known, so `offset` must not lie
    /// beyond what has been scanned.
    pub fn position(&self, offset: usize) -> Position {
        self.lines.position(self.input, offset)
    }

    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Scan the next token in `context`.
    ///
    /// Whitespace and line breaks are consumed silently; the returned token reports how many
    /// line breaks preceded it. At the end of input this keeps returning [`TokenKind::Eof`].
    pub fn next(&mut self, context: LexContext) -> Token {
        self.newlines = 0;
        self.error = None;
        self.value.clear();

        let (kind, start) = loop {
            let start = self.offset;
            if start >= self.input.len() {
                break (TokenKind::Eof, start);
            }
            if let Some(kind) = self.dispatch(context) {
                break (kind, start);
            }
        };

        let token = Token {
            kind,
            value: std::mem::take(&mut self.value),
            start,
            end: self.offset,
            newlines: self.newlines,
            error: self.error,
        };

        tracing::trace!(%context, token = %token, newlines = token.newlines, "scanned");
        token
    }

    // ---------------------------------------------------------------------
    // Cursor helpers
    // ---------------------------------------------------------------------

    fn peek(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    fn peek_at(&self, lookahead: usize) -> Option<char> {
        self.input[self.offset..].chars().nth(lookahead)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    fn advance_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.offset += c.len_utf8();
        }
    }

    fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.offset]
    }

    // ---------------------------------------------------------------------
    // Dispatch
    // ---------------------------------------------------------------------

    fn dispatch(&mut self, context: LexContext) -> Step {
        let c = self.peek()?;

        if c.is_ascii() {
            if is_ascii_inline_whitespace(c) {
                return self.whitespace();
            }

            match c {
                '\r' | '\n' => return self.newline(),
                '`' => return self.raw(),
                '{' | '}' => return self.punctuator(),
                '[' => {
                    return match context {
                        LexContext::Head | LexContext::Selector => self.punctuator(),
                        LexContext::Body => self.text(),
                    }
                }
                ']' | '=' | '.' | ':' | '#' => {
                    return match context {
                        LexContext::Selector => self.punctuator(),
                        _ => self.text(),
                    }
                }
                '-' => {
                    return match context {
                        LexContext::Selector => self.identifier(true),
                        _ => self.text(),
                    }
                }
                _ => {}
            }
        } else {
            if is_line_break(c) {
                return self.newline();
            }
            if is_unicode_inline_whitespace(c) {
                return self.whitespace();
            }
        }

        if context != LexContext::Selector {
            return self.text();
        }

        if is_identifier_char(c, true) {
            return self.identifier(false);
        }

        self.illegal(UNRECOGNIZED_TOKEN)
    }

    fn whitespace(&mut self) -> Step {
        self.advance();
        self.advance_while(is_inline_whitespace);
        None
    }

    fn newline(&mut self) -> Step {
        if let Some('\r') = self.advance() {
            if self.peek() == Some('\n') {
                self.advance();
            }
        }
        self.lines.record(self.offset);
        self.newlines += 1;
        None
    }

    fn punctuator(&mut self) -> Step {
        let c = self.advance()?;
        self.value.push(c);
        TokenKind::punctuator(c)
    }

    /// Identifier in selector context.
    ///
    /// With `dash` set, the identifier starts with `-` and the character right after it may be
    /// neither a digit nor another dash.
    fn identifier(&mut self, dash: bool) -> Step {
        let start = self.offset;
        let mut first = dash;

        self.advance();
        while let Some(c) = self.peek() {
            if !is_identifier_char(c, first) {
                break;
            }
            self.advance();
            first = false;
        }

        let word = self.slice_from(start);
        self.value.push_str(word);
        Some(TokenKind::Identifier)
    }

    fn text(&mut self) -> Step {
        let start = self.offset;
        self.advance();
        self.advance_while(is_text_char);
        let text = self.slice_from(start);
        self.value.push_str(text);
        Some(TokenKind::Text)
    }

    fn illegal(&mut self, message: &'static str) -> Step {
        self.error = Some(message);
        self.advance();
        Some(TokenKind::Illegal)
    }

    // ---------------------------------------------------------------------
    // Raw strings and raw blocks
    // ---------------------------------------------------------------------

    fn raw(&mut self) -> Step {
        let start = self.offset;
        self.advance_while(|c| c == '`');
        let fence = self.offset - start;

        match fence {
            1 => self.raw_string(),
            2 => {
                self.value.push('`');
                Some(TokenKind::RawString)
            }
            _ => self.raw_block(fence),
        }
    }

    /// Body of a single-backtick raw string; the opening backtick is already consumed.
    ///
    /// CRLF inside the string decodes to a single `\n`, as it does in raw blocks.
    fn raw_string(&mut self) -> Step {
        loop {
            match self.peek() {
                None => {
                    self.error = Some(UNTERMINATED_RAW_STRING);
                    return Some(TokenKind::Illegal);
                }
                Some('`') => {
                    if self.peek_at(1) == Some('`') {
                        self.offset += 2;
                        self.value.push('`');
                    } else {
                        self.offset += 1;
                        return Some(TokenKind::RawString);
                    }
                }
                Some('\r') if self.peek_at(1) == Some('\n') => {
                    self.offset += 2;
                    self.value.push('\n');
                    self.lines.record(self.offset);
                }
                Some(c) => {
                    self.value.push(c);
                    self.offset += c.len_utf8();
                    if is_line_break(c) {
                        self.lines.record(self.offset);
                    }
                }
            }
        }
    }

    /// Body of a raw block opened by `fence` backticks, already consumed.
    ///
    /// Runs of at least three backticks are candidate closers. A run is measured up to `fence`
    /// characters; only a run reaching exactly `fence` closes the block. Shorter runs are part of
    /// the content.
    fn raw_block(&mut self, fence: usize) -> Step {
        let content_start = self.offset;
        let marker = "`".repeat(RAW_BLOCK_FENCE);
        let mut search = content_start;

        loop {
            let Some(found) = self.input[search..].find(&marker) else {
                self.skip_to_end();
                self.error = Some(UNTERMINATED_RAW_BLOCK);
                return Some(TokenKind::Illegal);
            };

            let run_start = search + found;
            let run = self.input.as_bytes()[run_start..]
                .iter()
                .take(fence)
                .take_while(|&&b| b == b'`')
                .count();

            if run == fence {
                self.record_lines_between(content_start, run_start);
                let content = &self.input[content_start..run_start];
                self.value.push_str(&content.replace("\r\n", "\n"));
                self.offset = run_start + fence;
                return Some(TokenKind::RawBlock);
            }

            search = run_start + run;
        }
    }

    /// Consume the rest of the input, keeping the line table complete.
    fn skip_to_end(&mut self) {
        self.record_lines_between(self.offset, self.input.len());
        self.offset = self.input.len();
    }

    /// Raw blocks are consumed in one jump; register the line breaks inside them.
    fn record_lines_between(&mut self, from: usize, to: usize) {
        let mut chars = self.input[from..to].char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
                chars.next();
                self.lines.record(from + i + 2);
            } else if is_line_break(c) {
                self.lines.record(from + i + c.len_utf8());
            }
        }
    }
}

/// Scan all of `input` in a single context, up to (not including) the end-of-input token.
pub fn tokenize(input: &str, context: LexContext) -> Vec<Token> {
    let mut scanner = Scanner::new(input);
    let mut tokens = Vec::new();

    loop {
        let token = scanner.next(context);
        if token.is(TokenKind::Eof) {
            break;
        }
        tokens.push(token);
    }

    tokens
}
