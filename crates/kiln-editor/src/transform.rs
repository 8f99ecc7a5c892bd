//! Transforms — whole-document rewrites offered per file type.
//!
//! Each transform takes the document, mutates it through the normal row API
//! (so highlighting and the dirty counter stay correct) and returns a status
//! line for the message bar. A failure leaves the document untouched.
//!
//! | Transform    | File types | Effect                                      |
//! |--------------|------------|---------------------------------------------|
//! | `prototypes` | `c`        | Declare every function defined in the file |

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::highlight::Highlight;
use crate::row::Row;
use crate::syntax::Syntax;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Transform {
    /// Insert a `signature;` line for each function definition, after the
    /// leading block of comments and `#include`/`#define` lines. Lines that
    /// start inside a comment are not scanned.
    Prototypes,
}

impl Transform {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Prototypes => "prototypes",
        }
    }

    /// The transforms offered for `syntax`.
    #[must_use]
    pub fn available_for(syntax: Option<&Syntax>) -> &'static [Self] {
        match syntax.map(|s| s.name) {
            Some("c") => &[Self::Prototypes],
            _ => &[],
        }
    }

    /// Run the transform. `pattern` is the regex whose first capture group
    /// is a function signature.
    ///
    /// # Errors
    ///
    /// [`Error::TransformUnavailable`] for a document of another file type,
    /// [`Error::Pattern`] if `pattern` does not compile.
    pub fn apply(self, doc: &mut Document, pattern: &str) -> Result<String> {
        if !Self::available_for(doc.syntax()).contains(&self) {
            return Err(Error::TransformUnavailable {
                transform: self.name(),
                filetype: doc.filetype().unwrap_or("no ft").to_owned(),
            });
        }
        match self {
            Self::Prototypes => generate_prototypes(doc, pattern),
        }
    }
}

// ---------------------------------------------------------------------------
// Prototypes
// ---------------------------------------------------------------------------

fn generate_prototypes(doc: &mut Document, pattern: &str) -> Result<String> {
    let re = Regex::new(pattern)?;
    let lines: Vec<String> = doc
        .rows()
        .iter()
        .map(|r| String::from_utf8_lossy(r.raw()).into_owned())
        .collect();
    let commented: Vec<bool> = doc.rows().iter().map(starts_in_comment).collect();
    let code = || lines.iter().zip(&commented).filter(|&(_, &c)| !c).map(|(l, _)| l);

    let declared: HashSet<&str> = code()
        .filter_map(|l| l.trim_end().strip_suffix(';'))
        .map(str::trim)
        .collect();

    let mut seen = HashSet::new();
    let mut prototypes = Vec::new();
    for line in code() {
        let Some(caps) = re.captures(line) else { continue };
        let Some(sig) = caps.get(1).or_else(|| caps.get(0)) else {
            continue;
        };
        let sig = sig.as_str().trim();
        let name = function_name(sig);
        if name.is_empty() || doc.syntax().is_some_and(|s| s.is_keyword(name)) {
            continue;
        }
        if declared.contains(sig) || !seen.insert(sig) {
            continue;
        }
        prototypes.push(format!("{sig};"));
    }

    if prototypes.is_empty() {
        debug!("no function definitions");
        return Ok("No function definitions found".to_owned());
    }

    let at = lines
        .iter()
        .zip(&commented)
        .position(|(l, &c)| {
            let l = l.trim_start();
            !c && !l.is_empty() && !l.starts_with('#')
        })
        .unwrap_or(lines.len());

    for (i, proto) in prototypes.iter().enumerate() {
        doc.insert_row(at + i, proto.as_bytes());
    }
    doc.insert_row(at + prototypes.len(), b"");

    debug!(count = prototypes.len(), at, "prototypes generated");
    Ok(format!("{} prototypes generated", prototypes.len()))
}

/// Whether the row's first non-blank byte is comment text.
fn starts_in_comment(row: &Row) -> bool {
    row.render()
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .and_then(|i| row.highlight().get(i))
        .is_some_and(|h| matches!(h, Highlight::Comment | Highlight::BlockComment))
}

/// The identifier right before the parameter list.
fn function_name(sig: &str) -> &str {
    let head = sig.find('(').map_or(sig, |i| sig[..i].trim_end());
    let start = head
        .rfind(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .map_or(0, |i| i + 1);
    &head[start..]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
