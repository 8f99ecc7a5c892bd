//! Syntax definitions — the static highlight database.
//!
//! A [`Syntax`] is plain data: which files it applies to, which words are
//! keywords, how comments are spelled, and whether numbers and strings get
//! their own colors. Definitions live in [`HLDB`] and are never mutated, so
//! a document simply holds a `&'static Syntax`.
//!
//! # Selecting a definition
//!
//! [`select`] walks the database in order and returns the first definition
//! with a matching pattern. A pattern starting with `.` must equal the file
//! name's extension (everything from the last `.`); any other pattern
//! matches anywhere in the file name.

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// Keyword
// ---------------------------------------------------------------------------

/// Whether a keyword is a control word or a type name.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeywordKind {
    /// `if`, `while`, `return`, ...
    Plain,
    /// `int`, `char`, `u8`, ...
    Type,
}

/// A keyword and the tag it gets.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Keyword {
    pub text: &'static str,
    pub kind: KeywordKind,
}

impl Keyword {
    #[must_use]
    pub const fn plain(text: &'static str) -> Self {
        Self {
            text,
            kind: KeywordKind::Plain,
        }
    }

    #[must_use]
    pub const fn ty(text: &'static str) -> Self {
        Self {
            text,
            kind: KeywordKind::Type,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &'static [u8] {
        self.text.as_bytes()
    }
}

// ---------------------------------------------------------------------------
// Syntax
// ---------------------------------------------------------------------------

bitflags! {
    /// Optional highlight classes a syntax turns on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct SyntaxFlags: u8 {
        const NUMBERS = 0b01;
        const STRINGS = 0b10;
    }
}

/// An immutable highlight definition for one file type.
#[derive(Debug, PartialEq, Eq)]
pub struct Syntax {
    /// File type label shown in the status bar.
    pub name: &'static str,
    /// File name patterns. See the module docs for the matching rule.
    pub patterns: &'static [&'static str],
    pub keywords: &'static [Keyword],
    /// Single-line comment marker, if the language has one.
    pub line_comment: Option<&'static str>,
    /// Block comment `(start, end)` markers, if the language has them.
    pub block_comment: Option<(&'static str, &'static str)>,
    pub flags: SyntaxFlags,
}

impl Syntax {
    /// Whether `word` is one of this syntax's keywords.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.iter().any(|k| k.text == word)
    }

    /// Whether one of this syntax's patterns matches `filename`.
    #[must_use]
    pub fn matches(&self, filename: &str) -> bool {
        let ext = filename.rfind('.').map(|i| &filename[i..]);
        self.patterns.iter().any(|pat| {
            if pat.starts_with('.') {
                ext == Some(*pat)
            } else {
                filename.contains(pat)
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Database
// ---------------------------------------------------------------------------

const C_KEYWORDS: &[Keyword] = &[
    Keyword::plain("switch"),
    Keyword::plain("if"),
    Keyword::plain("while"),
    Keyword::plain("for"),
    Keyword::plain("break"),
    Keyword::plain("continue"),
    Keyword::plain("return"),
    Keyword::plain("else"),
    Keyword::plain("struct"),
    Keyword::plain("union"),
    Keyword::plain("typedef"),
    Keyword::plain("static"),
    Keyword::plain("enum"),
    Keyword::plain("class"),
    Keyword::plain("case"),
    Keyword::plain("sizeof"),
    Keyword::plain("do"),
    Keyword::plain("goto"),
    Keyword::ty("int"),
    Keyword::ty("long"),
    Keyword::ty("double"),
    Keyword::ty("float"),
    Keyword::ty("char"),
    Keyword::ty("unsigned"),
    Keyword::ty("signed"),
    Keyword::ty("void"),
    Keyword::ty("const"),
];

const RUST_KEYWORDS: &[Keyword] = &[
    Keyword::plain("as"),
    Keyword::plain("break"),
    Keyword::plain("const"),
    Keyword::plain("continue"),
    Keyword::plain("else"),
    Keyword::plain("enum"),
    Keyword::plain("fn"),
    Keyword::plain("for"),
    Keyword::plain("if"),
    Keyword::plain("impl"),
    Keyword::plain("in"),
    Keyword::plain("let"),
    Keyword::plain("loop"),
    Keyword::plain("match"),
    Keyword::plain("mod"),
    Keyword::plain("move"),
    Keyword::plain("mut"),
    Keyword::plain("pub"),
    Keyword::plain("ref"),
    Keyword::plain("return"),
    Keyword::plain("static"),
    Keyword::plain("struct"),
    Keyword::plain("trait"),
    Keyword::plain("type"),
    Keyword::plain("unsafe"),
    Keyword::plain("use"),
    Keyword::plain("where"),
    Keyword::plain("while"),
    Keyword::ty("bool"),
    Keyword::ty("char"),
    Keyword::ty("i8"),
    Keyword::ty("i16"),
    Keyword::ty("i32"),
    Keyword::ty("i64"),
    Keyword::ty("isize"),
    Keyword::ty("u8"),
    Keyword::ty("u16"),
    Keyword::ty("u32"),
    Keyword::ty("u64"),
    Keyword::ty("usize"),
    Keyword::ty("f32"),
    Keyword::ty("f64"),
    Keyword::ty("str"),
    Keyword::ty("String"),
    Keyword::ty("Self"),
];

/// Every known file type, searched in order by [`select`].
pub static HLDB: &[Syntax] = &[
    Syntax {
        name: "c",
        patterns: &[".c", ".h", ".cpp"],
        keywords: C_KEYWORDS,
        line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        flags: SyntaxFlags::NUMBERS.union(SyntaxFlags::STRINGS),
    },
    Syntax {
        name: "rust",
        patterns: &[".rs"],
        keywords: RUST_KEYWORDS,
        line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        flags: SyntaxFlags::NUMBERS.union(SyntaxFlags::STRINGS),
    },
];

/// The first definition in [`HLDB`] that matches `filename`.
#[must_use]
pub fn select(filename: &str) -> Option<&'static Syntax> {
    HLDB.iter().find(|s| s.matches(filename))
}

/// Look a definition up by its [`name`](Syntax::name).
#[must_use]
pub fn by_name(name: &str) -> Option<&'static Syntax> {
    HLDB.iter().find(|s| s.name == name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- select -------------------------------------------------------------

    #[test]
    fn select_by_extension() {
        assert_eq!(select("main.c").map(|s| s.name), Some("c"));
        assert_eq!(select("kilo.h").map(|s| s.name), Some("c"));
        assert_eq!(select("src/lib.rs").map(|s| s.name), Some("rust"));
    }

    #[test]
    fn extension_must_match_exactly() {
        // ".c" must not match ".cs" or ".conf".
        assert!(select("Program.cs").is_none());
        assert!(select("nginx.conf").is_none());
    }

    #[test]
    fn extension_is_taken_from_last_dot() {
        assert_eq!(select("archive.tar.c").map(|s| s.name), Some("c"));
        assert!(select("main.c.bak").is_none());
    }

    #[test]
    fn no_extension_no_syntax() {
        assert!(select("Makefile").is_none());
        assert!(select("").is_none());
    }

    #[test]
    fn substring_pattern_matches_anywhere() {
        static MAKE: Syntax = Syntax {
            name: "make",
            patterns: &["Makefile"],
            keywords: &[],
            line_comment: Some("#"),
            block_comment: None,
            flags: SyntaxFlags::empty(),
        };
        assert!(MAKE.matches("Makefile"));
        assert!(MAKE.matches("sub/Makefile.am"));
        assert!(!MAKE.matches("makefile"));
    }

    // -- lookups ------------------------------------------------------------

    #[test]
    fn by_name_finds_definitions() {
        assert_eq!(by_name("c").map(|s| s.name), Some("c"));
        assert!(by_name("cobol").is_none());
    }

    #[test]
    fn keyword_lookup() {
        let c = by_name("c").unwrap();
        assert!(c.is_keyword("while"));
        assert!(c.is_keyword("int"));
        assert!(!c.is_keyword("main"));
    }

    #[test]
    fn c_types_are_type_keywords() {
        let c = by_name("c").unwrap();
        let int = c.keywords.iter().find(|k| k.text == "int").unwrap();
        assert_eq!(int.kind, KeywordKind::Type);
        let ret = c.keywords.iter().find(|k| k.text == "return").unwrap();
        assert_eq!(ret.kind, KeywordKind::Plain);
    }

    #[test]
    fn builtin_flags() {
        for syntax in HLDB {
            assert!(syntax.flags.contains(SyntaxFlags::NUMBERS), "{}", syntax.name);
            assert!(syntax.flags.contains(SyntaxFlags::STRINGS), "{}", syntax.name);
        }
    }
}
