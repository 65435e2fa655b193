//! Directive scanning
//!
//! Extracts `@requires` dependency declarations from one file's text. The
//! scanner is line-oriented and never follows a dependency itself; closure
//! computation owns recursion.

use super::set::DependencySet;

/// The literal marker that introduces a dependency declaration.
pub const REQUIRES_MARKER: &str = "@requires";

/// Extracts the ordered, duplicate-free dependency tokens declared in
/// `text`.
///
/// Each line is tested independently and yields at most one token. Tokens
/// are emitted in first-appearance order; repeated declarations of the same
/// token are suppressed after the first.
pub fn scan_directives(text: &str) -> DependencySet<String> {
    let mut tokens = DependencySet::new();
    for line in text.lines() {
        if let Some(token) = match_line(line) {
            tokens.insert(token.to_string());
        }
    }
    tokens
}

/// Tests one line for a `@requires <token>` directive.
///
/// The marker may appear anywhere on the line (comment syntax is not
/// interpreted) but must be followed by whitespace; the remainder of the
/// line after that whitespace is the token, verbatim. When a line carries
/// several markers, the last one followed by a token wins; markers without
/// a token fall back to an earlier occurrence.
fn match_line(line: &str) -> Option<&str> {
    let mut end = line.len();
    while let Some(at) = line[..end].rfind(REQUIRES_MARKER) {
        let rest = &line[at + REQUIRES_MARKER.len()..];
        if rest.starts_with(|c: char| c.is_whitespace()) {
            let token = rest.trim_start();
            if !token.is_empty() {
                return Some(token);
            }
        }
        end = at;
    }
    None
}
