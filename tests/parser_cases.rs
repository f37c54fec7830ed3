//! Parser behavior over tables of small inputs

use rstest::rstest;
use selmark::ast::{AstNode, Content, Element, NodeRef};
use selmark::parse;

/// Source-form summary of a body: elements as `selectors{...}`, leaves as their value.
fn outline(element: &Element) -> String {
    element
        .body
        .children
        .iter()
        .map(|child| match child {
            Content::Element(inner) => format!("{}{{{}}}", inner.selector_text(), outline(inner)),
            other => other.text().unwrap_or_default().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[rstest]
#[case::empty("", "")]
#[case::words("hello  world", "hello world")]
#[case::element("p { hi }", "p{hi}")]
#[case::unspaced("p{hi}", "p{hi}")]
#[case::anonymous("{ hi }", "{hi}")]
#[case::same_line_rewind("a b{ c }", "a b{c}")]
#[case::next_line_anonymous("a b\n{ c }", "a b {c}")]
#[case::crlf_next_line("a b\r\n{ c }", "a b {c}")]
#[case::after_element("p{} { x }", "p{} {x}")]
#[case::nested("ul { li { one } li { two } }", "ul{li{one} li{two}}")]
#[case::selectors("div#main.a.b { x }", "div#main.a.b{x}")]
#[case::namespace("svg:g { }", "svg:g{}")]
#[case::punctuation_text("a.b #c d:e [f] = g", "a.b #c d:e [f] = g")]
#[case::raw_string("`{ not an element }`", "{ not an element }")]
#[case::escaped_backtick("`a``b`", "a`b")]
#[case::literal_backtick("x `` y", "x ` y")]
#[case::raw_block("```\n{ }\n```", "\n{ }\n")]
#[case::raw_block_longer_fence("````a```b````", "a```b")]
#[case::unicode_text("héllo wörld", "héllo wörld")]
#[case::unicode_spaces("a\u{00A0}b\u{3000}c", "a b c")]
#[case::dash_identifier("-x { }", "-x{}")]
fn test_parse_outline(#[case] source: &str, #[case] expected: &str) {
    let root = parse(source).unwrap_or_else(|e| panic!("{:?} failed: {}", source, e));
    assert_eq!(outline(&root), expected);
}

#[rstest]
#[case::missing_close("p {", "Unexpected end of input", 1, 4)]
#[case::missing_close_nested("a { b { c }", "Unexpected end of input", 1, 12)]
#[case::stray_close("}", "Unexpected token `}`", 1, 1)]
#[case::stray_close_later("a\nb }", "Unexpected token `}`", 2, 3)]
#[case::unterminated_raw_string("`abc", "Unterminated raw string", 1, 1)]
#[case::unterminated_raw_block("x\n  ```\nabc", "Unterminated raw block", 2, 3)]
#[case::short_closer("```abc``", "Unterminated raw block", 1, 1)]
#[case::digit_in_selector("1a{}", "Unrecognized token", 1, 1)]
#[case::double_dash("--x{}", "Unexpected token `identifier`", 1, 2)]
#[case::digit_value("p { [x=1] }", "Unrecognized token", 1, 8)]
#[case::missing_key("p { [=v] }", "Unexpected token `=`", 1, 6)]
#[case::missing_value("p { [k=] }", "Unexpected token `]`", 1, 8)]
#[case::unclosed_attribute("p { [k }", "Unexpected token `}`", 1, 8)]
#[case::dangling_hash("p# { }", "Unexpected token `{`", 1, 4)]
#[case::raw_string_selector("`x`{ }", "Unexpected token `raw-string`", 1, 1)]
#[case::column_counts_characters("ééé }", "Unexpected token `}`", 1, 5)]
fn test_parse_errors(
    #[case] source: &str,
    #[case] message: &str,
    #[case] line: usize,
    #[case] column: usize,
) {
    let error = parse(source).unwrap_err();
    assert_eq!(error.message, message);
    assert_eq!((error.line, error.column), (line, column));
    assert!(error.filename.is_none());
}

#[rstest]
#[case("div.a#x.b { }", &["div", ".a", "#x", ".b"])]
#[case("#x.a.a { }", &["#x", ".a", ".a"])]
#[case(".only { }", &[".only"])]
fn test_selector_order(#[case] source: &str, #[case] expected: &[&str]) {
    let root = parse(source).unwrap();
    let Content::Element(element) = &root.body.children[0] else {
        panic!("Expected element");
    };
    let selectors: Vec<_> = element.selectors.iter().map(ToString::to_string).collect();
    assert_eq!(selectors, expected);
}

#[test]
fn test_spans_cover_tokens() {
    let source = "a b{ c }";
    let root = parse(source).unwrap();
    let spans: Vec<_> = NodeRef::from(&root)
        .descendants()
        .map(|node| (node.node_type(), &source[node.span().as_range()]))
        .collect();
    assert_eq!(
        spans,
        vec![
            ("Element", "a b{ c }"),
            ("ElementBody", "a b{ c }"),
            ("Text", "a"),
            ("Element", "b{ c }"),
            ("NameSelector", "b"),
            ("Identifier", "b"),
            ("ElementBody", "{ c }"),
            ("Text", "c"),
        ]
    );
}

#[test]
fn test_attribute_spans() {
    let source = "p { [k=`v`] }";
    let root = parse(source).unwrap();
    let Content::Element(p) = &root.body.children[0] else {
        panic!("Expected element");
    };
    let attribute = &p.body.attributes[0];
    assert_eq!(&source[attribute.span.as_range()], "[k=`v`]");
    assert_eq!(attribute.value_text(), Some("v"));
}

#[test]
fn test_error_with_filename_and_context() {
    let source = "p {\n  `oops\n}";
    let error = parse(source).unwrap_err().with_filename("page.sm");
    assert_eq!(error.to_string(), "page.sm:2:3: Unterminated raw string");
    assert_eq!(
        error.source_context(source),
        "     1 | p {\n>>   2 |   `oops\n       |   ^\n     3 | }\n"
    );
}
