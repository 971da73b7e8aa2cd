//! Line tokenizer: comment stripping and whitespace splitting.
//!
//! The input format is strictly line-oriented, so lexing never fails:
//! each non-blank line (after dropping a `;` comment) becomes one
//! [`TokenLine`] carrying its 1-based source line number for diagnostics.

use crate::model::COMMENT_CHAR;

/// One significant source line, split into whitespace-separated tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenLine {
    pub line: u32,
    pub toks: Vec<String>,
}

/// Tokenize the whole source text. Blank and comment-only lines are
/// discarded; token text and order are preserved verbatim. There is no
/// quoting: whitespace always separates tokens.
pub fn lex(src: &str) -> Vec<TokenLine> {
    let mut out = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let text = match raw.find(COMMENT_CHAR) {
            Some(i) => &raw[..i],
            None => raw,
        };
        let toks: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
        if toks.is_empty() {
            continue;
        }
        out.push(TokenLine {
            line: idx as u32 + 1,
            toks,
        });
    }
    out
}
