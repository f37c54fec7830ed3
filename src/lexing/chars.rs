//! Character classification
//!
//! Pure predicates over a single `char`. The scanner asks these questions to decide where a
//! token starts and where it ends; none of them depend on the lexing context, which is applied
//! by the scanner's dispatch on top of them.
//!
//! ASCII classification is done by direct comparison. Above ASCII everything is a visible
//! character except the fixed Unicode space separators and the two Unicode line terminators.

/// Unicode space separators treated as inline whitespace.
///
/// Sorted, so membership is a binary search.
const UNICODE_SPACES: &[char] = &[
    '\u{00A0}', // no-break space
    '\u{1680}', // ogham space mark
    '\u{180E}', // mongolian vowel separator
    '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}',
    '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', // en quad .. hair space
    '\u{202F}', // narrow no-break space
    '\u{205F}', // medium mathematical space
    '\u{3000}', // ideographic space
    '\u{FEFF}', // byte order mark
];

/// Tab, vertical tab, form feed and space. Line terminators are not included.
#[inline]
pub fn is_ascii_inline_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\u{0B}' | '\u{0C}' | ' ')
}

/// `\r`, `\n`, and the Unicode line and paragraph separators.
#[inline]
pub fn is_line_break(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\u{2028}' | '\u{2029}')
}

/// Non-ASCII inline whitespace (see [`UNICODE_SPACES`]).
pub fn is_unicode_inline_whitespace(c: char) -> bool {
    UNICODE_SPACES.binary_search(&c).is_ok()
}

/// Any inline whitespace, ASCII or not.
#[inline]
pub fn is_inline_whitespace(c: char) -> bool {
    is_ascii_inline_whitespace(c) || is_unicode_inline_whitespace(c)
}

/// A visible character above ASCII: neither whitespace nor a line break.
#[inline]
fn is_visible_unicode(c: char) -> bool {
    !(is_inline_whitespace(c) || is_line_break(c))
}

/// Whether `c` may appear in an identifier.
///
/// `first` marks the position right after a leading dash (or the very first character): ASCII
/// digits and `-` are rejected there. Letters and `_` are always accepted, and so is every
/// visible non-ASCII character.
pub fn is_identifier_char(c: char, first: bool) -> bool {
    if !c.is_ascii() {
        return is_visible_unicode(c);
    }

    match c {
        'A'..='Z' | 'a'..='z' | '_' => true,
        '0'..='9' | '-' => !first,
        _ => false,
    }
}

/// Whether `c` continues a run of body text.
///
/// Text stops at whitespace, line breaks, NUL, backtick and braces. Every other printable
/// character, including the selector punctuation, is text.
pub fn is_text_char(c: char) -> bool {
    if (c as u32) >= 127 {
        return is_visible_unicode(c);
    }

    !matches!(
        c,
        '\0' | ' ' | '\t' | '\u{0B}' | '\u{0C}' | '\r' | '\n' | '`' | '{' | '}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unicode_space_table_is_sorted() {
        assert!(UNICODE_SPACES.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn ascii_whitespace_excludes_line_breaks() {
        for c in ['\t', '\u{0B}', '\u{0C}', ' '] {
            assert!(is_ascii_inline_whitespace(c));
        }
        assert!(!is_ascii_inline_whitespace('\n'));
        assert!(!is_ascii_inline_whitespace('\r'));
        assert!(!is_ascii_inline_whitespace('\u{00A0}'));
    }

    #[test]
    fn line_breaks() {
        for c in ['\r', '\n', '\u{2028}', '\u{2029}'] {
            assert!(is_line_break(c));
        }
        assert!(!is_line_break(' '));
        assert!(!is_line_break('\u{0085}'));
    }

    #[test]
    fn unicode_whitespace() {
        assert!(is_unicode_inline_whitespace('\u{00A0}'));
        assert!(is_unicode_inline_whitespace('\u{2005}'));
        assert!(is_unicode_inline_whitespace('\u{3000}'));
        assert!(is_unicode_inline_whitespace('\u{FEFF}'));
        assert!(!is_unicode_inline_whitespace('\u{200B}'));
        assert!(!is_unicode_inline_whitespace('é'));
    }

    #[test]
    fn identifier_first_position() {
        assert!(is_identifier_char('a', true));
        assert!(is_identifier_char('Z', true));
        assert!(is_identifier_char('_', true));
        assert!(!is_identifier_char('7', true));
        assert!(!is_identifier_char('-', true));

        assert!(is_identifier_char('7', false));
        assert!(is_identifier_char('-', false));
        assert!(!is_identifier_char('.', false));
        assert!(!is_identifier_char('#', false));
    }

    #[test]
    fn identifier_accepts_visible_unicode() {
        assert!(is_identifier_char('é', true));
        assert!(is_identifier_char('日', true));
        assert!(!is_identifier_char('\u{3000}', false));
        assert!(!is_identifier_char('\u{2028}', false));
    }

    #[test]
    fn text_chars() {
        for c in ['a', '[', ']', '.', ':', '#', '=', '-', '!', '~'] {
            assert!(is_text_char(c), "{c:?} should be text");
        }
        for c in ['\0', ' ', '\t', '\n', '\r', '`', '{', '}'] {
            assert!(!is_text_char(c), "{c:?} should not be text");
        }
        assert!(is_text_char('ü'));
        assert!(!is_text_char('\u{00A0}'));
    }
}
