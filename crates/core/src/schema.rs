//! Header-block schema builder.
//!
//! Consumes the mandatory leading `$ DEFAULT` block and produces the
//! ordered field schema. The schema is immutable once this pass returns;
//! every later assignment is checked against it.

use crate::error::CompileError;
use crate::lexer::TokenLine;
use crate::model::{
    Field, Schema, BLOCK_MARKER, DEFAULT_KEYWORD, STATE_PREFIX, STRING_PREFIX,
};

/// Consume the header block at the start of `lines`. Returns the schema
/// and the index of the first line after the block.
pub fn build_schema(lines: &[TokenLine], file: &str) -> Result<(Schema, usize), CompileError> {
    let first = match lines.first() {
        Some(lt) => lt,
        None => return Err(CompileError::whole_file(file, "empty script")),
    };
    if first.toks[0] != BLOCK_MARKER
        || first.toks.len() < 2
        || first.toks[1] != DEFAULT_KEYWORD
    {
        return Err(CompileError::at(
            file,
            first.line,
            format!(
                "first directive must be '{} {}'",
                BLOCK_MARKER, DEFAULT_KEYWORD
            ),
        ));
    }

    let mut fields: Vec<Field> = Vec::new();
    let mut i = 1;
    while i < lines.len() {
        let lt = &lines[i];
        let lead = lt.toks[0].as_str();
        if lead == BLOCK_MARKER || lead.starts_with(STATE_PREFIX) {
            break;
        }
        if lt.toks.len() != 2 {
            return Err(CompileError::at(
                file,
                lt.line,
                "DEFAULT entries must be '<field> <value>'",
            ));
        }
        let (name, default) = (&lt.toks[0], &lt.toks[1]);
        if fields.iter().any(|f| &f.name == name) {
            return Err(CompileError::at(
                file,
                lt.line,
                format!("duplicate DEFAULT field '{}'", name),
            ));
        }
        fields.push(Field {
            name: name.clone(),
            default: default.clone(),
            is_string: name.starts_with(STRING_PREFIX),
        });
        i += 1;
    }

    if fields.is_empty() {
        return Err(CompileError::whole_file(
            file,
            "DEFAULT block contained no fields",
        ));
    }
    Ok((Schema::from_fields(fields), i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn schema_of(src: &str) -> Result<(Schema, usize), CompileError> {
        build_schema(&lex(src), "test.txt")
    }

    #[test]
    fn collects_ordered_fields_and_defaults() {
        let (schema, end) = schema_of(
            "$ DEFAULT\n\
             doomednum -1\n\
             radius 20*FRACUNIT\n\
             str_obit NONE\n\
             $ FIRST\n",
        )
        .unwrap();
        assert_eq!(end, 4);
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.ordinal("radius"), Some(1));
        assert_eq!(schema.fields()[0].default, "-1");
        assert!(!schema.fields()[1].is_string);
        assert!(schema.fields()[2].is_string);
    }

    #[test]
    fn string_flag_comes_from_the_name_prefix_alone() {
        let (schema, _) = schema_of("$ DEFAULT\nstr_name 123\n$ T\n").unwrap();
        assert!(schema.fields()[0].is_string);
    }

    #[test]
    fn header_ends_at_a_state_line_too() {
        let (schema, end) = schema_of("$ DEFAULT\nspeed 0\nS_NIL SPRT A 1 NULL S_NIL\n").unwrap();
        assert_eq!(schema.len(), 1);
        assert_eq!(end, 2);
    }

    #[test]
    fn rejects_missing_header_marker() {
        let err = schema_of("speed 0\n").unwrap_err();
        assert!(err.message.contains("first directive must be '$ DEFAULT'"));
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn rejects_wrong_header_keyword() {
        let err = schema_of("$ DEFAULTS\nspeed 0\n").unwrap_err();
        assert!(err.message.contains("$ DEFAULT"));
    }

    #[test]
    fn rejects_empty_input() {
        let err = schema_of("; only a comment\n").unwrap_err();
        assert_eq!(err.message, "empty script");
        assert_eq!(err.line, None);
    }

    #[test]
    fn rejects_empty_default_block() {
        let err = schema_of("$ DEFAULT\n$ FIRST\n").unwrap_err();
        assert!(err.message.contains("no fields"));
    }

    #[test]
    fn rejects_duplicate_field() {
        let err = schema_of("$ DEFAULT\nspeed 0\nspeed 1\n$ T\n").unwrap_err();
        assert!(err.message.contains("duplicate DEFAULT field 'speed'"));
        assert_eq!(err.line, Some(3));
    }

    #[test]
    fn rejects_wrong_token_count() {
        let err = schema_of("$ DEFAULT\nheight 16 FRACUNIT\n").unwrap_err();
        assert!(err.message.contains("'<field> <value>'"));
    }

    #[test]
    fn field_names_are_case_sensitive() {
        let (schema, _) = schema_of("$ DEFAULT\nspeed 0\nSpeed 1\n$ T\n").unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.ordinal("Speed"), Some(1));
        assert_eq!(schema.ordinal("SPEED"), None);
    }
}
