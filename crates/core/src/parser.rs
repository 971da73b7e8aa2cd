//! Block/state parser.
//!
//! A small state machine over the token lines following the header block.
//! Each line is dispatched by the shape of its leading token into one of
//! the [`LineKind`] variants; the only persistent context is the index of
//! the type block currently being populated, threaded through the loop as
//! a plain local.

use std::collections::HashMap;

use crate::error::CompileError;
use crate::lexer::TokenLine;
use crate::model::{
    RawState, Schema, TypeRecord, ANON_MARKER, ANON_TYPE_PREFIX, BLOCK_MARKER, FULLBRIGHT_BIT,
    FULLBRIGHT_MARKER, NO_ACTION_NAME, STATE_PREFIX,
};
use crate::tables::NameTable;

/// Everything the block/state parse produces: name tables, states with
/// still-symbolic next references, and type records with override rows.
#[derive(Debug)]
pub struct ParseOutput {
    pub sprites: NameTable,
    pub actions: NameTable,
    pub states: Vec<RawState>,
    pub types: Vec<TypeRecord>,
}

/// Line shapes after the header block, keyed on the leading token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    /// `$ <name> [field expr ...]` -- opens a new type block.
    TypeHeader,
    /// `S_<name> ...` -- a state definition.
    StateDef,
    /// Anything else -- assignment continuation for the current type.
    Assignment,
}

fn classify_line(lead: &str) -> LineKind {
    if lead == BLOCK_MARKER {
        LineKind::TypeHeader
    } else if lead.starts_with(STATE_PREFIX) {
        LineKind::StateDef
    } else {
        LineKind::Assignment
    }
}

/// Parse every line from `start` to end of input against `schema`.
pub fn parse_blocks(
    lines: &[TokenLine],
    start: usize,
    schema: &Schema,
    file: &str,
) -> Result<ParseOutput, CompileError> {
    let mut out = ParseOutput {
        sprites: NameTable::new(),
        actions: NameTable::with_reserved(NO_ACTION_NAME),
        states: Vec::new(),
        types: Vec::new(),
    };
    // Lowercased state name -> ordinal, for duplicate detection. The
    // resolver rebuilds the same index later; states may not exist yet
    // when they are referenced, so nothing is resolved here.
    let mut seen_states: HashMap<String, usize> = HashMap::new();
    let mut current_type: Option<usize> = None;
    let mut anon_counter = 0u32;

    for lt in &lines[start..] {
        match classify_line(&lt.toks[0]) {
            LineKind::TypeHeader => {
                if lt.toks.len() < 2 {
                    return Err(CompileError::at(
                        file,
                        lt.line,
                        format!(
                            "'{m}' line must be '{m} <NAME>' or '{m} {a}'",
                            m = BLOCK_MARKER,
                            a = ANON_MARKER
                        ),
                    ));
                }
                let name = if lt.toks[1] == ANON_MARKER {
                    let n = format!("{}{}", ANON_TYPE_PREFIX, anon_counter);
                    anon_counter += 1;
                    n
                } else {
                    lt.toks[1].clone()
                };
                out.types.push(TypeRecord::new(name, schema.len()));
                let ti = out.types.len() - 1;
                current_type = Some(ti);
                if lt.toks.len() > 2 {
                    apply_assignments(
                        &lt.toks[2..],
                        lt.line,
                        schema,
                        &mut out.types[ti].overrides,
                        file,
                    )?;
                }
            }
            LineKind::StateDef => {
                parse_state_line(lt, &mut out, &mut seen_states, file)?;
            }
            LineKind::Assignment => {
                let ti = current_type.ok_or_else(|| {
                    CompileError::at(
                        file,
                        lt.line,
                        format!(
                            "info fields appear before any '{} <TYPE>' block",
                            BLOCK_MARKER
                        ),
                    )
                })?;
                apply_assignments(&lt.toks, lt.line, schema, &mut out.types[ti].overrides, file)?;
            }
        }
    }
    Ok(out)
}

/// Strip a trailing fullbright marker, recording whether it was present.
fn strip_fullbright<'a>(tok: &'a str, fullbright: &mut bool) -> &'a str {
    match tok.strip_suffix(FULLBRIGHT_MARKER) {
        Some(rest) => {
            *fullbright = true;
            rest
        }
        None => tok,
    }
}

fn parse_state_line(
    lt: &TokenLine,
    out: &mut ParseOutput,
    seen_states: &mut HashMap<String, usize>,
    file: &str,
) -> Result<(), CompileError> {
    let toks = &lt.toks;
    if toks.len() < 6 {
        return Err(CompileError::at(
            file,
            lt.line,
            "state line must have at least 6 tokens (S_NAME SPRITE FRAME TICS ACTION NEXTSTATE)",
        ));
    }
    if toks.len() > 8 {
        return Err(CompileError::at(
            file,
            lt.line,
            "too many tokens on state line",
        ));
    }

    let name = &toks[0];
    let key = name.to_ascii_lowercase();
    if seen_states.contains_key(&key) {
        return Err(CompileError::at(
            file,
            lt.line,
            format!("duplicate state '{}'", name),
        ));
    }

    // The fullbright marker is accepted on either the frame or the tics
    // token; both set the same flag.
    let mut fullbright = false;
    let frame_tok = strip_fullbright(&toks[2], &mut fullbright);
    let mut chars = frame_tok.chars();
    let ch = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(CompileError::at(
                file,
                lt.line,
                format!("bad frame token '{}'", toks[2]),
            ))
        }
    };
    // Frame characters are not limited to A-Z: '[', '\', ']' are legal
    // sprite frame letters and map past 25.
    let mut frame = ch as i32 - 'A' as i32;
    if frame < 0 {
        return Err(CompileError::at(
            file,
            lt.line,
            format!("bad frame token '{}'", toks[2]),
        ));
    }

    let tics_tok = strip_fullbright(&toks[3], &mut fullbright);
    let tics: i32 = tics_tok.parse().map_err(|_| {
        CompileError::at(file, lt.line, format!("bad tics '{}'", toks[3]))
    })?;

    if fullbright {
        frame |= FULLBRIGHT_BIT;
    }

    let sprite = out.sprites.intern(&toks[1]);
    // A no-action token maps straight to the reserved ordinal; intern
    // itself never hands out 0.
    let action = if toks[4].eq_ignore_ascii_case(NO_ACTION_NAME) {
        0
    } else {
        out.actions.intern(&toks[4])
    };

    let misc1 = parse_misc(toks.get(6), "misc1", lt.line, file)?;
    let misc2 = parse_misc(toks.get(7), "misc2", lt.line, file)?;

    let idx = out.states.len();
    out.states.push(RawState {
        name: name.clone(),
        sprite,
        frame,
        tics,
        action,
        next_name: toks[5].clone(),
        misc1,
        misc2,
    });
    seen_states.insert(key, idx);
    Ok(())
}

fn parse_misc(
    tok: Option<&String>,
    which: &str,
    line: u32,
    file: &str,
) -> Result<i32, CompileError> {
    match tok {
        None => Ok(0),
        Some(t) => t.parse().map_err(|_| {
            CompileError::at(file, line, format!("bad {} '{}'", which, t))
        }),
    }
}

/// Segment a flat token run into (field, expression) pairs and write each
/// expression into the override row.
///
/// The schema's field-name set is the only recognized delimiter: after a
/// field name, every following token that is not itself a field name
/// belongs to that field's expression. Expression tokens are joined with
/// no separating whitespace, so `68 * FRACUNIT` is stored as
/// `68*FRACUNIT`. A later assignment to the same field within the block
/// overwrites the earlier one.
pub(crate) fn apply_assignments(
    toks: &[String],
    line: u32,
    schema: &Schema,
    row: &mut [Option<String>],
    file: &str,
) -> Result<(), CompileError> {
    let mut j = 0;
    while j < toks.len() {
        let field = &toks[j];
        let fi = schema.ordinal(field).ok_or_else(|| {
            CompileError::at(
                file,
                line,
                format!("unknown field '{}' (not in DEFAULT)", field),
            )
        })?;
        j += 1;
        if j >= toks.len() {
            return Err(CompileError::at(
                file,
                line,
                format!("missing value for field '{}'", field),
            ));
        }
        let start = j;
        while j < toks.len() && !schema.contains(&toks[j]) {
            j += 1;
        }
        row[fi] = Some(toks[start..j].concat());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::schema::build_schema;

    const HEADER: &str = "$ DEFAULT\ndoomednum -1\nheight 16*FRACUNIT\nradius 20\nflags 0\n";

    fn parse(rest: &str) -> Result<ParseOutput, CompileError> {
        let src = format!("{}{}", HEADER, rest);
        let lines = lex(&src);
        let (schema, start) = build_schema(&lines, "test.txt").unwrap();
        parse_blocks(&lines, start, &schema, "test.txt")
    }

    #[test]
    fn type_header_with_inline_assignments() {
        let out = parse("$ MT_PLAYER doomednum 1 height 56 * FRACUNIT\n").unwrap();
        assert_eq!(out.types.len(), 1);
        assert_eq!(out.types[0].name, "MT_PLAYER");
        assert_eq!(out.types[0].overrides[0].as_deref(), Some("1"));
        assert_eq!(out.types[0].overrides[1].as_deref(), Some("56*FRACUNIT"));
        assert_eq!(out.types[0].overrides[2], None);
    }

    #[test]
    fn anonymous_blocks_get_sequential_placeholder_names() {
        let out = parse("$ +\n$ MT_CLIP\n$ +\n").unwrap();
        let names: Vec<&str> = out.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["MT_MISC0", "MT_CLIP", "MT_MISC1"]);
        assert!(out.types[0].overrides.iter().all(Option::is_none));
    }

    #[test]
    fn continuation_lines_assign_into_the_current_type() {
        let out = parse(
            "$ MT_A\n\
             radius 8 height 16*FRACUNIT\n\
             $ MT_B\n\
             radius 9\n",
        )
        .unwrap();
        assert_eq!(out.types[0].overrides[2].as_deref(), Some("8"));
        assert_eq!(out.types[0].overrides[1].as_deref(), Some("16*FRACUNIT"));
        assert_eq!(out.types[1].overrides[2].as_deref(), Some("9"));
        assert_eq!(out.types[1].overrides[1], None);
    }

    #[test]
    fn later_assignment_overwrites_earlier_within_a_block() {
        let out = parse("$ MT_A\nradius 8\nradius 12\n").unwrap();
        assert_eq!(out.types[0].overrides[2].as_deref(), Some("12"));
    }

    #[test]
    fn state_line_basics_and_ordinals() {
        let out = parse(
            "S_POSS_STND POSS A 10 A_Look S_POSS_STND2\n\
             S_POSS_STND2 POSS B 10 A_Look S_POSS_STND\n\
             S_TROO_STND TROO A 10 A_Look S_TROO_STND\n",
        )
        .unwrap();
        assert_eq!(out.states.len(), 3);
        assert_eq!(out.states[0].sprite, 0);
        assert_eq!(out.states[1].sprite, 0);
        assert_eq!(out.states[2].sprite, 1);
        assert_eq!(out.sprites.names(), &["POSS", "TROO"]);
        // Reserved no-action entry holds ordinal 0.
        assert_eq!(out.actions.names()[0], "NULL");
        assert_eq!(out.states[0].action, 1);
        assert_eq!(out.states[0].frame, 0);
        assert_eq!(out.states[1].frame, 1);
        assert_eq!(out.states[0].next_name, "S_POSS_STND2");
    }

    #[test]
    fn no_action_token_maps_to_ordinal_zero() {
        let out = parse("S_A SPRT A 1 NULL S_A\nS_B SPRT B 1 null S_B\n").unwrap();
        assert_eq!(out.states[0].action, 0);
        assert_eq!(out.states[1].action, 0);
        assert_eq!(out.actions.names(), &["NULL"]);
    }

    #[test]
    fn fullbright_marker_on_frame_token() {
        let out = parse("S_A SPRT A* 10 NULL S_A\n").unwrap();
        assert_eq!(out.states[0].frame, FULLBRIGHT_BIT);
        assert_eq!(out.states[0].tics, 10);
    }

    #[test]
    fn fullbright_marker_on_tics_token() {
        let out = parse("S_A SPRT A 8* NULL S_A\n").unwrap();
        assert_eq!(out.states[0].frame, FULLBRIGHT_BIT);
        assert_eq!(out.states[0].tics, 8);
    }

    #[test]
    fn frame_characters_past_z_are_accepted() {
        let out = parse("S_A SPRT [ 1 NULL S_A\n").unwrap();
        assert_eq!(out.states[0].frame, '[' as i32 - 'A' as i32);
    }

    #[test]
    fn negative_tics_pass_through_as_sentinel() {
        let out = parse("S_A SPRT A -1 NULL S_A\n").unwrap();
        assert_eq!(out.states[0].tics, -1);
    }

    #[test]
    fn misc_slots_default_to_zero_and_parse_when_present() {
        let out = parse("S_A SPRT A 1 NULL S_A\nS_B SPRT A 1 NULL S_B 5 -7\n").unwrap();
        assert_eq!((out.states[0].misc1, out.states[0].misc2), (0, 0));
        assert_eq!((out.states[1].misc1, out.states[1].misc2), (5, -7));
    }

    #[test]
    fn rejects_duplicate_state_names_case_insensitively() {
        let err = parse("S_A SPRT A 1 NULL S_A\nS_a SPRT B 1 NULL S_a\n").unwrap_err();
        assert!(err.message.contains("duplicate state 'S_a'"));
    }

    #[test]
    fn rejects_short_and_long_state_lines() {
        let err = parse("S_A SPRT A 1 NULL\n").unwrap_err();
        assert!(err.message.contains("at least 6 tokens"));
        let err = parse("S_A SPRT A 1 NULL S_A 1 2 3\n").unwrap_err();
        assert!(err.message.contains("too many tokens"));
    }

    #[test]
    fn rejects_bad_frame_tokens() {
        let err = parse("S_A SPRT AB 1 NULL S_A\n").unwrap_err();
        assert!(err.message.contains("bad frame token 'AB'"));
        // '*' alone strips to nothing
        let err = parse("S_A SPRT * 1 NULL S_A\n").unwrap_err();
        assert!(err.message.contains("bad frame token"));
        // below 'A'
        let err = parse("S_A SPRT 1 1 NULL S_A\n").unwrap_err();
        assert!(err.message.contains("bad frame token"));
    }

    #[test]
    fn rejects_malformed_integers() {
        let err = parse("S_A SPRT A x NULL S_A\n").unwrap_err();
        assert!(err.message.contains("bad tics 'x'"));
        let err = parse("S_A SPRT A 1 NULL S_A x\n").unwrap_err();
        assert!(err.message.contains("bad misc1 'x'"));
        let err = parse("S_A SPRT A 1 NULL S_A 1 x\n").unwrap_err();
        assert!(err.message.contains("bad misc2 'x'"));
    }

    #[test]
    fn rejects_type_header_without_a_name() {
        let err = parse("$\n").unwrap_err();
        assert!(err.message.contains("'$' line must be"));
    }

    #[test]
    fn rejects_assignment_before_any_type_block() {
        // A state line ends the header block; the continuation line after
        // it has no type to attach to.
        let err = parse("S_A SPRT A 1 NULL S_A\nradius 8\n").unwrap_err();
        assert!(err.message.contains("before any '$ <TYPE>' block"));
        assert_eq!(err.line, Some(7));
    }

    #[test]
    fn rejects_unknown_field_and_missing_value() {
        let err = parse("$ MT_A\nwingspan 4\n").unwrap_err();
        assert!(err.message.contains("unknown field 'wingspan'"));
        let err = parse("$ MT_A\nradius\n").unwrap_err();
        assert!(err.message.contains("missing value for field 'radius'"));
    }

    #[test]
    fn expression_runs_extend_until_the_next_field_name() {
        let out = parse("$ MT_A\nheight 68 * FRACUNIT radius 16 * FRACUNIT flags MF_SOLID\n")
            .unwrap();
        assert_eq!(out.types[0].overrides[1].as_deref(), Some("68*FRACUNIT"));
        assert_eq!(out.types[0].overrides[2].as_deref(), Some("16*FRACUNIT"));
        assert_eq!(out.types[0].overrides[3].as_deref(), Some("MF_SOLID"));
    }
}
