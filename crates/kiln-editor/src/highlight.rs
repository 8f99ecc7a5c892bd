//! Highlighting — per-byte classification of a rendered row.
//!
//! [`highlight_row`] is a single left-to-right scan over a row's render bytes.
//! It is a pure function of three inputs: the bytes, the active [`Syntax`]
//! (or none), and whether the previous row ended inside a block comment. It
//! returns one [`Highlight`] per byte plus the row's own "ends inside a block
//! comment" bit, which the document feeds to the next row.
//!
//! # Order of checks
//!
//! At each byte the scanner tries, in this order: single-line comment, block
//! comment, string, number, keyword, plain byte. The first rule that applies
//! consumes one or more bytes and the scan moves on. After a keyword match
//! the scanner continues straight to the next byte with `prev_sep` cleared;
//! the separator that ended the keyword is classified on its own.

use crate::syntax::{KeywordKind, Syntax, SyntaxFlags};

// ---------------------------------------------------------------------------
// Highlight
// ---------------------------------------------------------------------------

/// Classification of one rendered byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum Highlight {
    #[default]
    Normal,
    Comment,
    BlockComment,
    Keyword,
    TypeKeyword,
    String,
    Number,
    /// Transient search-match overlay.
    Match,
}

/// Whether `c` ends a word for keyword and number purposes.
///
/// ASCII whitespace (including vertical tab), NUL, and `,.()+-/*=~%<>[];`.
#[inline]
#[must_use]
pub const fn is_separator(c: u8) -> bool {
    matches!(
        c,
        b' ' | b'\t'
            | b'\n'
            | b'\r'
            | 0x0B
            | 0x0C
            | 0
            | b','
            | b'.'
            | b'('
            | b')'
            | b'+'
            | b'-'
            | b'/'
            | b'*'
            | b'='
            | b'~'
            | b'%'
            | b'<'
            | b'>'
            | b'['
            | b']'
            | b';'
    )
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Classify every byte of `render`.
///
/// `open_at_start` is the previous row's block-comment state. Returns the
/// tags (always `render.len()` of them) and whether this row ends inside an
/// unterminated block comment. Without a syntax every byte is
/// [`Highlight::Normal`] and the row never ends inside a comment.
#[must_use]
pub fn highlight_row(
    render: &[u8],
    syntax: Option<&Syntax>,
    open_at_start: bool,
) -> (Vec<Highlight>, bool) {
    let mut hl = vec![Highlight::Normal; render.len()];
    let Some(syntax) = syntax else {
        return (hl, false);
    };

    let line_comment = syntax.line_comment.map(str::as_bytes).filter(|m| !m.is_empty());
    let block_comment = syntax
        .block_comment
        .map(|(start, end)| (start.as_bytes(), end.as_bytes()))
        .filter(|(start, end)| !start.is_empty() && !end.is_empty());
    let numbers = syntax.flags.contains(SyntaxFlags::NUMBERS);
    let strings = syntax.flags.contains(SyntaxFlags::STRINGS);

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = open_at_start;

    let mut i = 0;
    while i < render.len() {
        let c = render[i];
        let rest = &render[i..];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        // -- single-line comment --
        if let Some(marker) = line_comment {
            if in_string.is_none() && !in_comment && rest.starts_with(marker) {
                hl[i..].fill(Highlight::Comment);
                break;
            }
        }

        // -- block comment --
        if let Some((start, end)) = block_comment {
            if in_string.is_none() {
                if in_comment {
                    hl[i] = Highlight::BlockComment;
                    if rest.starts_with(end) {
                        hl[i..i + end.len()].fill(Highlight::BlockComment);
                        i += end.len();
                        in_comment = false;
                        prev_sep = true;
                    } else {
                        i += 1;
                    }
                    continue;
                } else if rest.starts_with(start) {
                    hl[i..i + start.len()].fill(Highlight::BlockComment);
                    i += start.len();
                    in_comment = true;
                    continue;
                }
            }
        }

        // -- string --
        if strings {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                if c == b'\\' && i + 1 < render.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        // -- number --
        if numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        // -- keyword --
        if prev_sep {
            let found = syntax.keywords.iter().find(|kw| {
                let word = kw.as_bytes();
                rest.starts_with(word) && is_separator(rest.get(word.len()).copied().unwrap_or(0))
            });
            if let Some(kw) = found {
                let tag = match kw.kind {
                    KeywordKind::Plain => Highlight::Keyword,
                    KeywordKind::Type => Highlight::TypeKeyword,
                };
                let len = kw.text.len();
                hl[i..i + len].fill(tag);
                i += len;
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (hl, in_comment)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{self, Keyword};
    use pretty_assertions::assert_eq;

    use super::Highlight::{BlockComment as B, Comment as C, Keyword as K, Normal as N};
    use super::Highlight::{Number as D, String as S, TypeKeyword as T};

    fn c_syntax() -> &'static Syntax {
        syntax::by_name("c").unwrap()
    }

    fn hl(text: &str) -> Vec<Highlight> {
        highlight_row(text.as_bytes(), Some(c_syntax()), false).0
    }

    // -- separators ---------------------------------------------------------

    #[test]
    fn separator_set() {
        for c in b" \t\n\r\x0b\x0c\0,.()+-/*=~%<>[];" {
            assert!(is_separator(*c), "{c:#x}");
        }
        for c in b"azAZ09_\"'{}!" {
            assert!(!is_separator(*c), "{c:#x}");
        }
    }

    // -- no syntax ----------------------------------------------------------

    #[test]
    fn no_syntax_is_all_normal() {
        let (tags, open) = highlight_row(b"int x = 1; /* y", None, true);
        assert_eq!(tags, vec![N; 15]);
        assert!(!open);
    }

    #[test]
    fn tags_match_render_length() {
        for text in ["", "x", "int main(void) {", "\"unterminated", "/* open"] {
            assert_eq!(hl(text).len(), text.len(), "{text:?}");
        }
    }

    // -- keywords -----------------------------------------------------------

    #[test]
    fn type_keyword_whole_word() {
        assert_eq!(hl("int x=1;"), vec![T, T, T, N, N, N, D, N]);
    }

    #[test]
    fn keyword_needs_separator_after() {
        assert_eq!(hl("intx=1;"), vec![N, N, N, N, N, D, N]);
    }

    #[test]
    fn keyword_needs_separator_before() {
        assert_eq!(hl("xint"), vec![N; 4]);
    }

    #[test]
    fn keyword_at_end_of_row() {
        assert_eq!(hl("return"), vec![K; 6]);
    }

    #[test]
    fn plain_keyword_kind() {
        static PLAIN_INT: Syntax = Syntax {
            name: "t",
            patterns: &[],
            keywords: &[Keyword::plain("int")],
            line_comment: None,
            block_comment: None,
            flags: SyntaxFlags::empty(),
        };
        let (tags, _) = highlight_row(b"int x", Some(&PLAIN_INT), false);
        assert_eq!(tags, vec![K, K, K, N, N]);
    }

    #[test]
    fn digit_right_after_keyword_is_not_a_number() {
        // "(" follows the keyword with prev_sep cleared, then sets it again.
        assert_eq!(hl("if(1)"), vec![K, K, N, D, N]);
    }

    #[test]
    fn keyword_followed_by_keyword_start() {
        // After "else" prev_sep is false, so the space resets it and "if"
        // matches again.
        assert_eq!(hl("else if"), vec![K, K, K, K, N, K, K]);
    }

    // -- numbers ------------------------------------------------------------

    #[test]
    fn decimal_number() {
        assert_eq!(hl("x=3.14;"), vec![N, N, D, D, D, D, N]);
    }

    #[test]
    fn digits_inside_identifier_are_normal() {
        assert_eq!(hl("a1"), vec![N, N]);
    }

    #[test]
    fn leading_dot_is_not_a_number() {
        assert_eq!(hl(".5"), vec![N, D]);
    }

    // -- strings ------------------------------------------------------------

    #[test]
    fn double_and_single_quoted() {
        assert_eq!(hl("\"a\" 'b'"), vec![S, S, S, N, S, S, S]);
    }

    #[test]
    fn escaped_quote_stays_in_string() {
        assert_eq!(hl(r#""a\"b""#), vec![S; 6]);
    }

    #[test]
    fn comment_marker_inside_string() {
        assert_eq!(hl("\"//\""), vec![S; 4]);
    }

    #[test]
    fn number_after_string_is_number() {
        assert_eq!(hl("\"\"1"), vec![S, S, D]);
    }

    // -- comments -----------------------------------------------------------

    #[test]
    fn line_comment_runs_to_end() {
        assert_eq!(hl("x; // int"), vec![N, N, N, C, C, C, C, C, C]);
    }

    #[test]
    fn block_comment_on_one_line() {
        let (tags, open) = highlight_row(b"/*a*/1", Some(c_syntax()), false);
        assert_eq!(tags, vec![B, B, B, B, B, D]);
        assert!(!open);
    }

    #[test]
    fn unterminated_block_comment_is_carried() {
        let (tags, open) = highlight_row(b"x /* y", Some(c_syntax()), false);
        assert_eq!(tags, vec![N, N, B, B, B, B]);
        assert!(open);
    }

    #[test]
    fn carried_comment_closes_on_this_row() {
        let (tags, open) = highlight_row(b"y */ int", Some(c_syntax()), true);
        assert_eq!(tags, vec![B, B, B, B, N, T, T, T]);
        assert!(!open);
    }

    #[test]
    fn carried_comment_suppresses_line_comment() {
        let (tags, open) = highlight_row(b"// still", Some(c_syntax()), true);
        assert_eq!(tags, vec![B; 8]);
        assert!(open);
    }

    #[test]
    fn empty_row_keeps_carried_state() {
        assert_eq!(highlight_row(b"", Some(c_syntax()), true), (vec![], true));
        assert_eq!(highlight_row(b"", Some(c_syntax()), false), (vec![], false));
    }
}
