//! Directive classification
//!
//! Pure, line-level recognition of `#include`/`#import` and `#pragma once`.
//! Matching is lexical: a directive inside a comment or string literal is
//! recognized like any other line.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

static PRAGMA_ONCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#pragma\s+once(?-u:\b)").unwrap());

static INCLUDE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*#(?:include|import)\s+(?:"((?-u:[^"])+)"|<((?-u:[^>])+)>)"#).unwrap()
});

/// Classification of a single physical line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `#pragma once`
    PragmaOnce,
    /// `#include`/`#import` with the target captured between its delimiters
    Include(&'a [u8]),
    /// Anything else
    Text,
}

/// Whether `line` is a `#pragma once` directive
pub fn is_pragma_once(line: &[u8]) -> bool {
    PRAGMA_ONCE_RE.is_match(line)
}

/// Extract the include target from an include/import directive
///
/// Quote and angle-bracket forms are not distinguished; the captured text is
/// returned as written.
pub fn include_target(line: &[u8]) -> Option<&[u8]> {
    let caps = INCLUDE_RE.captures(line)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_bytes())
}

/// Classify one line. Pragma recognition takes precedence.
pub fn classify(line: &[u8]) -> Directive<'_> {
    if is_pragma_once(line) {
        Directive::PragmaOnce
    } else if let Some(target) = include_target(line) {
        Directive::Include(target)
    } else {
        Directive::Text
    }
}

/// Split file contents into physical lines, each keeping its terminator
pub fn split_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    content.split_inclusive(|&b| b == b'\n')
}
