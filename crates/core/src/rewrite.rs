//! Fixed-point expression rewriting.
//!
//! The downstream runtime has no fixed-point arithmetic, so values of
//! float-classified fields are rewritten lexically into floating-literal
//! form. This is a narrow, reversible text transform over opaque
//! expressions, never evaluation.
//!
//! Implemented as a small span-tokenizing pass (word / digit / punctuation
//! spans) rather than layered pattern substitutions, so the whole-word and
//! numeric-boundary rules compose by construction.

use crate::model::UNIT_TOKEN;

/// Floating literal the unit token rewrites to.
const FLOAT_ONE: &str = "1.0f";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Span<'a> {
    /// Maximal run of `[A-Za-z0-9_]` characters.
    Atom(&'a str),
    /// Any single other character.
    Punct(char),
}

fn split_spans(expr: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut rest = expr;
    while let Some(c) = rest.chars().next() {
        if c.is_ascii_alphanumeric() || c == '_' {
            let end = rest
                .find(|ch: char| !ch.is_ascii_alphanumeric() && ch != '_')
                .unwrap_or(rest.len());
            spans.push(Span::Atom(&rest[..end]));
            rest = &rest[end..];
        } else {
            spans.push(Span::Punct(c));
            rest = &rest[c.len_utf8()..];
        }
    }
    spans
}

fn is_bare_integer(spans: &[Span<'_>], i: usize) -> bool {
    let atom = match spans[i] {
        Span::Atom(a) => a,
        Span::Punct(_) => return false,
    };
    if atom.is_empty() || !atom.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    // A digit run adjacent to a '.' is part of a larger literal
    // (e.g. "16.0f") and must not be touched. Letter adjacency cannot
    // occur across spans: letters and digits fuse into one atom.
    if i > 0 && spans[i - 1] == Span::Punct('.') {
        return false;
    }
    if i + 1 < spans.len() && spans[i + 1] == Span::Punct('.') {
        return false;
    }
    true
}

/// Whether the unit token occurs as a whole word anywhere in `expr`.
/// Identifiers that merely contain its letters ("MYFRACUNITLIKE") do not
/// count.
pub fn expr_uses_unit(expr: &str) -> bool {
    split_spans(expr)
        .iter()
        .any(|s| matches!(s, Span::Atom(a) if *a == UNIT_TOKEN))
}

/// Rewrite a fixed-point expression into floating-literal form:
///
/// - the unit token becomes `1.0f` (whole-word occurrences only);
/// - every bare integer `N` becomes `N.0f`;
/// - a `*1.0f` following a factor and a `1.0f*` preceding one are elided,
///   once per occurrence.
///
/// Idempotent on inputs containing no unit token and no bare integers.
pub fn rewrite_fixed_expr(expr: &str) -> String {
    let spans = split_spans(expr);
    let mut pieces: Vec<String> = Vec::with_capacity(spans.len());
    for (i, span) in spans.iter().enumerate() {
        match span {
            Span::Atom(a) if *a == UNIT_TOKEN => pieces.push(FLOAT_ONE.to_owned()),
            Span::Atom(a) if is_bare_integer(&spans, i) => pieces.push(format!("{}.0f", a)),
            Span::Atom(a) => pieces.push((*a).to_owned()),
            Span::Punct(c) => pieces.push(c.to_string()),
        }
    }

    // Multiplication-by-one elimination, single left-to-right pass.
    let mut out = String::with_capacity(expr.len() + 8);
    let mut i = 0;
    while i < pieces.len() {
        if pieces[i] == "*" && i > 0 && i + 1 < pieces.len() && pieces[i + 1] == FLOAT_ONE {
            i += 2;
            continue;
        }
        if pieces[i] == FLOAT_ONE && i + 2 < pieces.len() && pieces[i + 1] == "*" {
            i += 2;
            continue;
        }
        out.push_str(&pieces[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_token_becomes_float_one() {
        assert_eq!(rewrite_fixed_expr("FRACUNIT"), "1.0f");
    }

    #[test]
    fn unit_multiple_elides_the_multiplication() {
        assert_eq!(rewrite_fixed_expr("16*FRACUNIT"), "16.0f");
        assert_eq!(rewrite_fixed_expr("FRACUNIT*16"), "16.0f");
    }

    #[test]
    fn bare_integers_gain_the_float_suffix() {
        assert_eq!(rewrite_fixed_expr("20"), "20.0f");
        assert_eq!(rewrite_fixed_expr("2*3"), "2.0f*3.0f");
    }

    #[test]
    fn division_of_unit_is_preserved() {
        assert_eq!(rewrite_fixed_expr("FRACUNIT/2"), "1.0f/2.0f");
    }

    #[test]
    fn whole_word_only_longer_identifiers_untouched() {
        assert_eq!(rewrite_fixed_expr("MYFRACUNITLIKE"), "MYFRACUNITLIKE");
        assert_eq!(rewrite_fixed_expr("FRACUNITS"), "FRACUNITS");
        assert!(!expr_uses_unit("MYFRACUNITLIKE"));
        assert!(expr_uses_unit("16*FRACUNIT"));
        assert!(expr_uses_unit("(FRACUNIT)"));
    }

    #[test]
    fn existing_float_literals_are_not_bare_integers() {
        assert_eq!(rewrite_fixed_expr("16.0f"), "16.0f");
        assert_eq!(rewrite_fixed_expr("2.5"), "2.5");
    }

    #[test]
    fn digit_runs_fused_with_letters_are_untouched() {
        assert_eq!(rewrite_fixed_expr("0x10000"), "0x10000");
        assert_eq!(rewrite_fixed_expr("MF_SOLID2"), "MF_SOLID2");
    }

    #[test]
    fn rewrite_is_idempotent_on_rewritten_output() {
        for expr in ["16*FRACUNIT", "FRACUNIT/2", "20", "2*FRACUNIT*3"] {
            let once = rewrite_fixed_expr(expr);
            assert_eq!(rewrite_fixed_expr(&once), once, "input {:?}", expr);
        }
    }

    #[test]
    fn interior_unit_factor_is_elided_once() {
        assert_eq!(rewrite_fixed_expr("2*FRACUNIT*3"), "2.0f*3.0f");
    }

    #[test]
    fn lone_float_one_is_kept() {
        // No adjacent factor, so nothing to elide against.
        assert_eq!(rewrite_fixed_expr("FRACUNIT"), "1.0f");
        assert_eq!(rewrite_fixed_expr(&rewrite_fixed_expr("FRACUNIT")), "1.0f");
    }
}
