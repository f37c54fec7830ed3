//! Treeviz formatter for syntax trees
//!
//! One line per node, nesting drawn with box connectors. The root element has no connector.
//!
//! <line number>(optional) <indentation> <icon> <label> (truncated to the label width)
//!
//! Example for `p.note { [lang=en] Hi }`:
//!
//!   ⧉ {}
//!   └─ ➔ 0 attribute(s), 1 child(ren)
//!     └─ ⧉ p.note
//!       ├─ ⊤ p
//!       │ └─ ○ p
//!       ├─ . .note
//!       │ └─ ○ note
//!       └─ ➔ 1 attribute(s), 1 child(ren)
//!         ├─ ≔ [lang=en]
//!         │ ├─ ○ lang
//!         │ └─ ○ en
//!         └─ ◦ Hi
//!
//! Icons
//!     Element: ⧉
//!     ElementBody: ➔
//!     NameSelector: ⊤
//!     IdSelector: #
//!     ClassSelector: .
//!     Attribute: ≔
//!     Identifier: ○
//!     Text: ◦
//!     RawString: ƒ
//!     RawBlock: 𝒱
//!
//! Line breaks inside labels are shown as `↵`.

use super::registry::{FormatError, Formatter};
use crate::ast::{snapshot_from_element, AstSnapshot, Element};
use crate::lexing::LineIndex;

pub const DEFAULT_LABEL_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreevizOptions {
    /// Prefix each line with the 1-based source line the node starts on.
    pub show_line_numbers: bool,
    /// Labels longer than this many characters are cut and end with `...`.
    pub label_width: usize,
}

impl Default for TreevizOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            label_width: DEFAULT_LABEL_WIDTH,
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    let single_line = s.replace("\r\n", "↵").replace(['\n', '\r'], "↵");
    if single_line.chars().count() > max_chars {
        let mut truncated = single_line.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        single_line
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Element" => "⧉",
        "ElementBody" => "➔",
        "NameSelector" => "⊤",
        "IdSelector" => "#",
        "ClassSelector" => ".",
        "Attribute" => "≔",
        "Text" => "◦",
        "RawString" => "ƒ",
        "RawBlock" => "𝒱",
        _ => "○",
    }
}

struct Printer<'a> {
    options: &'a TreevizOptions,
    lines: Option<LineIndex>,
    output: String,
}

impl Printer<'_> {
    fn line_number(&self, snapshot: &AstSnapshot) -> String {
        match &self.lines {
            Some(lines) => format!("{:02} ", lines.line_of(snapshot.span.start)),
            None => String::new(),
        }
    }

    fn node(&mut self, snapshot: &AstSnapshot, prefix: &str, is_last: bool) {
        let connector = if is_last { "└─" } else { "├─" };
        let line = format!(
            "{}{}{} {} {}\n",
            self.line_number(snapshot),
            prefix,
            connector,
            get_icon(&snapshot.node_type),
            truncate(&snapshot.label, self.options.label_width)
        );
        self.output.push_str(&line);

        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        self.children(snapshot, &child_prefix);
    }

    fn children(&mut self, snapshot: &AstSnapshot, prefix: &str) {
        let child_count = snapshot.children.len();
        for (i, child) in snapshot.children.iter().enumerate() {
            self.node(child, prefix, i == child_count - 1);
        }
    }

    fn root(mut self, snapshot: &AstSnapshot) -> String {
        let line = format!(
            "{}{} {}\n",
            self.line_number(snapshot),
            get_icon(&snapshot.node_type),
            truncate(&snapshot.label, self.options.label_width)
        );
        self.output.push_str(&line);
        self.children(snapshot, "");
        self.output
    }
}

pub fn to_treeviz_str(root: &Element, source: &str) -> String {
    to_treeviz_str_with_options(root, source, &TreevizOptions::default())
}

pub fn to_treeviz_str_with_options(root: &Element, source: &str, options: &TreevizOptions) -> String {
    let snapshot = snapshot_from_element(root);
    let printer = Printer {
        options,
        lines: options
            .show_line_numbers
            .then(|| LineIndex::from_source(source)),
        output: String::new(),
    };
    printer.root(&snapshot)
}

#[derive(Debug, Clone, Default)]
pub struct TreevizFormatter {
    pub options: TreevizOptions,
}

impl TreevizFormatter {
    pub fn new(options: TreevizOptions) -> Self {
        Self { options }
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, root: &Element, source: &str) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_options(root, source, &self.options))
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }
}
