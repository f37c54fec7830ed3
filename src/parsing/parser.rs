//! Recursive descent parser
//!
//! The parser pulls tokens from the [`Scanner`] with a single token of lookahead and picks the
//! lexing context per grammar position:
//!
//! ```text
//! Start        := ElementBody[root]                        (head)
//! Element      := SelectorList? '{' ElementBody '}'         (selector)
//! SelectorList := NameSelector? (IdSelector | ClassSelector)*
//! NameSelector := Identifier (':' Identifier)?
//! IdSelector   := '#' Identifier
//! ClassSelector:= '.' Identifier
//! Attribute    := '[' Identifier ('=' (RawString | Identifier))? ']'
//! ElementBody  := Attribute* (Element | RawString | RawBlock | Text)*
//! ```
//!
//! A buffered lookahead token keeps the context it was scanned with. Attribute detection peeks
//! in head context, so the first content token of a body is scanned as head and reused as is.
//!
//! # Reinterpreting text as a selector
//!
//! Body text is scanned without knowing whether an element follows. When a `{` shows up on
//! the same line as the previous sibling and that sibling is not an element, the sibling is
//! dropped, the scanner is rewound to its start and the input is read again as an element,
//! this time in selector context. So `see div.note{ ... }` yields the text `see` and an
//! element `div.note`, while a `{` on its own line starts an anonymous element.
//!
//! Rewinding is the only backtracking the parser does: it moves the scanner cursor and
//! drops the lookahead token.

use super::error::{ParseError, ParseResult, UNEXPECTED_END_OF_INPUT};
use crate::ast::*;
use crate::lexing::{LexContext, Scanner, Token, TokenKind};

use crate::lexing::LexContext::{Body, Head, Selector as Sel};

pub struct Parser<'a> {
    scanner: Scanner<'a>,
    lookahead: Option<Token>,
    /// End offset of the last consumed token.
    end_offset: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            scanner: Scanner::new(input),
            lookahead: None,
            end_offset: 0,
        }
    }

    /// Parse the whole input into the root element.
    pub fn parse(mut self) -> ParseResult<Element> {
        tracing::debug!(bytes = self.scanner.input().len(), "parsing");
        let root = self.start();
        match &root {
            Ok(root) => tracing::debug!(children = root.body.children.len(), "parsed"),
            Err(error) => tracing::debug!(%error, "parse failed"),
        }
        root
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Scan the lookahead token if none is buffered.
    fn peek(&mut self, context: LexContext) -> &Token {
        let scanner = &mut self.scanner;
        self.lookahead.get_or_insert_with(|| scanner.next(context))
    }

    fn peek_kind(&mut self, context: LexContext) -> TokenKind {
        self.peek(context).kind
    }

    fn peek_start(&mut self, context: LexContext) -> usize {
        self.peek(context).start
    }

    /// Consume the lookahead token, failing if it is not of the `expected` kind.
    fn read(&mut self, expected: Option<TokenKind>, context: LexContext) -> ParseResult<Token> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.scanner.next(context),
        };

        if let Some(kind) = expected {
            if token.kind != kind {
                self.lookahead = Some(token);
                return Err(self.unexpected());
            }
        }

        self.end_offset = token.end;
        Ok(token)
    }

    fn expect(&mut self, kind: TokenKind, context: LexContext) -> ParseResult<Token> {
        self.read(Some(kind), context)
    }

    /// Move the scanner back to `offset`, dropping the lookahead token.
    fn rewind(&mut self, offset: usize) {
        self.scanner.seek(offset);
        self.end_offset = offset;
        self.lookahead = None;
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    fn fail(&self, message: impl Into<String>, offset: usize) -> ParseError {
        let position = self.scanner.position(offset);
        ParseError::new(message, position.line, position.column, offset)
    }

    /// Error for the lookahead token.
    fn unexpected(&mut self) -> ParseError {
        let token = self.peek(Body);
        let message = match token.kind {
            TokenKind::Eof => UNEXPECTED_END_OF_INPUT.to_string(),
            TokenKind::Illegal => token.error.unwrap_or("Illegal token").to_string(),
            kind => format!("Unexpected token `{}`", kind),
        };
        let offset = token.start;
        self.fail(message, offset)
    }

    // ========================================================================
    // Productions
    // ========================================================================

    fn start(&mut self) -> ParseResult<Element> {
        let start = self.peek_start(Head);
        let body = self.element_body(true)?;
        let span = Span::new(start, self.end_offset.max(start));
        Ok(Element::new(Vec::new(), body, span))
    }

    fn element(&mut self) -> ParseResult<Element> {
        let start = self.peek_start(Sel);
        let selectors = match self.peek_kind(Sel) {
            TokenKind::LeftBrace => Vec::new(),
            _ => self.selector_list()?,
        };
        let body = self.element_body(false)?;
        Ok(Element::new(selectors, body, Span::new(start, self.end_offset)))
    }

    fn element_body(&mut self, root: bool) -> ParseResult<ElementBody> {
        let start = self.peek_start(Head);

        if !root {
            self.expect(TokenKind::LeftBrace, Head)?;
        }

        let mut attributes = Vec::new();
        while self.peek_kind(Head) == TokenKind::LeftBracket {
            attributes.push(self.attribute()?);
        }

        let mut children: Vec<Content> = Vec::new();

        loop {
            let (kind, newlines) = {
                let token = self.peek(Body);
                (token.kind, token.newlines)
            };

            let child = match kind {
                TokenKind::Eof if root => break,
                TokenKind::RightBrace if !root => break,
                TokenKind::LeftBrace => {
                    if newlines == 0 && children.last().is_some_and(|last| !last.is_element()) {
                        if let Some(sibling) = children.pop() {
                            let offset = sibling.span().start;
                            tracing::debug!(
                                offset,
                                kind = NodeRef::from(&sibling).node_type(),
                                "reading previous sibling as element selectors"
                            );
                            self.rewind(offset);
                        }
                    }
                    Content::Element(self.element()?)
                }
                TokenKind::RawString => Content::RawString(self.raw_string()?),
                TokenKind::RawBlock => Content::RawBlock(self.raw_block()?),
                TokenKind::Text => Content::Text(self.text()?),
                _ => return Err(self.unexpected()),
            };

            children.push(child);
        }

        if !root {
            self.expect(TokenKind::RightBrace, Body)?;
        }

        Ok(ElementBody::new(
            attributes,
            children,
            Span::new(start, self.end_offset.max(start)),
        ))
    }

    fn selector_list(&mut self) -> ParseResult<Vec<Selector>> {
        let mut selectors = Vec::new();

        if self.peek_kind(Sel) == TokenKind::Identifier {
            selectors.push(Selector::Name(self.name_selector()?));
        }

        loop {
            match self.peek_kind(Sel) {
                TokenKind::Hash => selectors.push(Selector::Id(self.id_selector()?)),
                TokenKind::Dot => selectors.push(Selector::Class(self.class_selector()?)),
                _ => break,
            }
        }

        Ok(selectors)
    }

    fn name_selector(&mut self) -> ParseResult<NameSelector> {
        let start = self.peek_start(Sel);
        let mut name = self.identifier()?;
        let mut namespace = None;

        if self.peek_kind(Sel) == TokenKind::Colon {
            self.expect(TokenKind::Colon, Sel)?;
            namespace = Some(name);
            name = self.identifier()?;
        }

        Ok(NameSelector::new(
            namespace,
            name,
            Span::new(start, self.end_offset),
        ))
    }

    fn id_selector(&mut self) -> ParseResult<IdSelector> {
        let start = self.peek_start(Sel);
        self.expect(TokenKind::Hash, Sel)?;
        let id = self.identifier()?;
        Ok(IdSelector::new(id, Span::new(start, self.end_offset)))
    }

    fn class_selector(&mut self) -> ParseResult<ClassSelector> {
        let start = self.peek_start(Sel);
        self.expect(TokenKind::Dot, Sel)?;
        let name = self.identifier()?;
        Ok(ClassSelector::new(name, Span::new(start, self.end_offset)))
    }

    fn attribute(&mut self) -> ParseResult<Attribute> {
        let start = self.peek_start(Sel);
        self.expect(TokenKind::LeftBracket, Sel)?;

        let key = self.identifier()?;
        let mut value = None;

        if self.peek_kind(Sel) == TokenKind::Equals {
            self.read(None, Sel)?;
            value = Some(match self.peek_kind(Sel) {
                TokenKind::RawString => AttributeValue::RawString(self.raw_string()?),
                TokenKind::Identifier => AttributeValue::Identifier(self.identifier()?),
                _ => return Err(self.unexpected()),
            });
        }

        self.expect(TokenKind::RightBracket, Sel)?;
        Ok(Attribute::new(key, value, Span::new(start, self.end_offset)))
    }

    fn identifier(&mut self) -> ParseResult<Identifier> {
        let token = self.expect(TokenKind::Identifier, Sel)?;
        let span = token_span(&token);
        Ok(Identifier::new(token.value, span))
    }

    fn text(&mut self) -> ParseResult<Text> {
        let token = self.expect(TokenKind::Text, Body)?;
        let span = token_span(&token);
        Ok(Text::new(token.value, token.newlines, span))
    }

    fn raw_string(&mut self) -> ParseResult<RawString> {
        let token = self.expect(TokenKind::RawString, Body)?;
        let span = token_span(&token);
        Ok(RawString::new(token.value, token.newlines, span))
    }

    fn raw_block(&mut self) -> ParseResult<RawBlock> {
        let token = self.expect(TokenKind::RawBlock, Body)?;
        let span = token_span(&token);
        Ok(RawBlock::new(token.value, token.newlines, span))
    }
}

fn token_span(token: &Token) -> Span {
    Span::new(token.start, token.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Element {
        Parser::new(input).parse().unwrap()
    }

    fn parse_err(input: &str) -> ParseError {
        Parser::new(input).parse().unwrap_err()
    }

    fn texts(body: &ElementBody) -> Vec<&str> {
        body.children.iter().filter_map(Content::text).collect()
    }

    fn element(content: &Content) -> &Element {
        match content {
            Content::Element(element) => element,
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        let root = parse("");
        assert!(root.selectors.is_empty());
        assert!(root.body.attributes.is_empty());
        assert!(root.body.children.is_empty());
        assert_eq!(root.span, Span::new(0, 0));
    }

    #[test]
    fn test_whitespace_only_input() {
        let root = parse("  \n ");
        assert!(root.body.children.is_empty());
        assert!(root.span.start <= root.span.end);
    }

    #[test]
    fn test_root_text() {
        let root = parse("hello world");
        assert_eq!(texts(&root.body), vec!["hello", "world"]);
        assert_eq!(root.span, Span::new(0, 11));
    }

    #[test]
    fn test_named_element() {
        let root = parse("p { hi }");
        let p = element(&root.body.children[0]);
        assert_eq!(p.selector_text(), "p");
        assert_eq!(texts(&p.body), vec!["hi"]);
        assert_eq!(p.span, Span::new(0, 8));
        assert_eq!(p.body.span, Span::new(2, 8));
    }

    #[test]
    fn test_namespaced_name() {
        let root = parse("svg:rect{}");
        let rect = element(&root.body.children[0]);
        let name = rect.name().unwrap();
        assert_eq!(name.namespace.as_ref().unwrap().value, "svg");
        assert_eq!(name.name.value, "rect");
        assert_eq!(name.span, Span::new(0, 8));
    }

    #[test]
    fn test_selector_order_is_preserved() {
        let root = parse("div.a#x.b { }");
        let div = element(&root.body.children[0]);
        let rendered: Vec<_> = div.selectors.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["div", ".a", "#x", ".b"]);
    }

    #[test]
    fn test_selectors_without_name() {
        let root = parse("#main.wide { }");
        let el = element(&root.body.children[0]);
        assert!(el.name().is_none());
        assert_eq!(el.selector_text(), "#main.wide");
    }

    #[test]
    fn test_attributes() {
        let root = parse("a { [href=`http://x.y/?a=b`] [rel=nofollow] [download] link }");
        let a = element(&root.body.children[0]);
        let attrs: Vec<_> = a
            .body
            .attributes
            .iter()
            .map(|attr| (attr.key.value.as_str(), attr.value_text()))
            .collect();
        assert_eq!(
            attrs,
            vec![
                ("href", Some("http://x.y/?a=b")),
                ("rel", Some("nofollow")),
                ("download", None),
            ]
        );
        assert_eq!(texts(&a.body), vec!["link"]);
    }

    #[test]
    fn test_attributes_only_as_prefix() {
        let root = parse("p { [a] text [b] }");
        let p = element(&root.body.children[0]);
        assert_eq!(p.body.attributes.len(), 1);
        assert_eq!(texts(&p.body), vec!["text", "[b]"]);
    }

    #[test]
    fn test_root_attributes() {
        let root = parse("[lang=en] body {}");
        assert_eq!(root.body.attributes.len(), 1);
        assert_eq!(root.body.attributes[0].key.value, "lang");
    }

    #[test]
    fn test_reinterprets_same_line_text_as_selector() {
        let root = parse("a b{ c }");
        assert_eq!(root.body.children.len(), 2);
        assert_eq!(root.body.children[0].text(), Some("a"));
        let b = element(&root.body.children[1]);
        assert_eq!(b.selector_text(), "b");
        assert_eq!(texts(&b.body), vec!["c"]);
        assert_eq!(b.span.start, 2);
    }

    #[test]
    fn test_spaced_brace_on_same_line_also_reinterprets() {
        let root = parse("a b { c }");
        let b = element(&root.body.children[1]);
        assert_eq!(b.selector_text(), "b");
    }

    #[test]
    fn test_brace_on_next_line_starts_anonymous_element() {
        let root = parse("a b\n{ c }");
        assert_eq!(root.body.children.len(), 3);
        assert_eq!(texts(&root.body), vec!["a", "b"]);
        let anonymous = element(&root.body.children[2]);
        assert!(anonymous.selectors.is_empty());
        assert_eq!(texts(&anonymous.body), vec!["c"]);
    }

    #[test]
    fn test_brace_after_element_is_anonymous_element() {
        let root = parse("p { } { x }");
        assert_eq!(root.body.children.len(), 2);
        assert!(element(&root.body.children[1]).selectors.is_empty());
    }

    #[test]
    fn test_leading_brace_is_anonymous_element() {
        let root = parse("{ x }");
        let anonymous = element(&root.body.children[0]);
        assert!(anonymous.selectors.is_empty());
        assert_eq!(anonymous.span, Span::new(0, 5));
    }

    #[test]
    fn test_reinterpreted_text_with_classes() {
        let root = parse("see div.note{ careful }");
        let note = element(&root.body.children[1]);
        assert_eq!(note.selector_text(), "div.note");
    }

    #[test]
    fn test_reinterpretation_failure_reports_the_selector_token() {
        let error = parse_err("x [y]{ }");
        assert_eq!(error.message, "Unexpected token `[`");
        assert_eq!((error.line, error.column), (1, 3));
    }

    #[test]
    fn test_raw_string_sibling_cannot_become_selector() {
        let error = parse_err("`raw`{ }");
        assert_eq!(error.message, "Unexpected token `raw-string`");
        assert_eq!(error.column, 1);
    }

    #[test]
    fn test_raw_strings_and_blocks_in_body() {
        let root = parse("pre { ```\n  code {}\n``` `a``b` }");
        let pre = element(&root.body.children[0]);
        match &pre.body.children[..] {
            [Content::RawBlock(block), Content::RawString(raw)] => {
                assert_eq!(block.value, "\n  code {}\n");
                assert_eq!(raw.value, "a`b");
            }
            other => panic!("Unexpected children: {:?}", other),
        }
    }

    #[test]
    fn test_text_newlines_are_recorded() {
        let root = parse("a\n\nb c");
        let newlines: Vec<_> = root
            .body
            .children
            .iter()
            .map(|child| match child {
                Content::Text(text) => text.newlines,
                _ => panic!("Expected text"),
            })
            .collect();
        assert_eq!(newlines, vec![0, 2, 0]);
    }

    #[test]
    fn test_nested_elements() {
        let root = parse("html { body { div#main { p { deep } } } }");
        let html = element(&root.body.children[0]);
        let body = element(&html.body.children[0]);
        let main = element(&body.body.children[0]);
        let p = element(&main.body.children[0]);
        assert_eq!(texts(&p.body), vec!["deep"]);
        assert!(html.span.encloses(&p.span));
    }

    #[test]
    fn test_missing_closing_brace() {
        let error = parse_err("p { text");
        assert_eq!(error.message, "Unexpected end of input");
        assert_eq!((error.line, error.column), (1, 9));
    }

    #[test]
    fn test_stray_closing_brace_at_root() {
        let error = parse_err("text\n  }");
        assert_eq!(error.message, "Unexpected token `}`");
        assert_eq!((error.line, error.column), (2, 3));
    }

    #[test]
    fn test_unterminated_raw_string() {
        let error = parse_err("p { `abc }");
        assert_eq!(error.message, "Unterminated raw string");
        assert_eq!((error.line, error.column), (1, 5));
    }

    #[test]
    fn test_unterminated_raw_block() {
        let error = parse_err("```\nnever closed\n``");
        assert_eq!(error.message, "Unterminated raw block");
        assert_eq!((error.line, error.column), (1, 1));
    }

    #[test]
    fn test_attribute_errors() {
        assert_eq!(parse_err("p { [=x] }").message, "Unexpected token `=`");
        assert_eq!(parse_err("p { [k=] }").message, "Unexpected token `]`");
        assert_eq!(parse_err("p { [k=v }").message, "Unexpected token `}`");
        assert_eq!(parse_err("p { [k=1] }").message, "Unrecognized token");
    }

    #[test]
    fn test_dangling_namespace_colon() {
        let error = parse_err("svg:{ }");
        assert_eq!(error.message, "Unexpected token `{`");
        assert_eq!(error.column, 5);
    }
}
