//! Initializer table emission (`info.c`): sprite name strings, action
//! forward declarations, the state table, and the per-type info matrix.

use actorgen_core::{rewrite_fixed_expr, ActorModel, Repr};

use crate::c_ident;

pub fn render_tables(model: &ActorModel) -> String {
    let mut out = String::new();

    out.push_str("#include \"info.h\"\n");
    out.push_str("// generated by actorgen\n\n");

    // Sprite name strings, ordinal order
    out.push_str("char *sprnames[NUMSPRITES] = {\n");
    let sprites = model.sprites.names();
    for (i, s) in sprites.iter().enumerate() {
        out.push_str(&format!("    \"{}\"", s));
        out.push_str(if i != sprites.len() - 1 { ",\n" } else { "\n" });
    }
    out.push_str("};\n\n");

    // Forward declarations for every real action; ordinal 0 is the
    // reserved no-action entry and needs none.
    for a in &model.actions.names()[1..] {
        out.push_str(&format!("void {}();\n", c_ident(a)));
    }
    out.push('\n');

    out.push_str("state_t states[NUMSTATES] = {\n");
    for st in &model.states {
        let spr = format!("SPR_{}", c_ident(&model.sprites.names()[st.sprite]));
        let act = c_ident(&model.actions.names()[st.action]);
        let nxt = c_ident(&model.states[st.next].name);
        out.push_str(&format!(
            "    {{{},{},{},{},{},{},{}}},    // {}\n",
            spr, st.frame, st.tics, act, nxt, st.misc1, st.misc2, st.name
        ));
    }
    out.push_str("};\n\n");

    out.push_str("mobjinfo_t mobjinfo[NUMMOBJTYPES] = {\n");
    let field_count = model.schema.len();
    for (ti, t) in model.types.iter().enumerate() {
        out.push_str(&format!("    {{   // {}\n", t.name));
        for (fi, field) in model.schema.fields().iter().enumerate() {
            let raw = model.value_for(ti, fi);
            let val = match model.reprs[fi] {
                Repr::Text => raw.to_owned(),
                // No sound support downstream yet: forced to zero even
                // when the script supplied a value.
                Repr::Sound => "0".to_owned(),
                // Bitmask expressions must never see the floating rewrite.
                Repr::Flags => raw.to_owned(),
                Repr::Float => rewrite_fixed_expr(raw),
                Repr::Int => raw.to_owned(),
            };
            let comma = if fi != field_count - 1 { "," } else { "" };
            out.push_str(&format!("        {}{}   // {}\n", val, comma, field.name));
        }
        out.push_str("    }");
        out.push_str(if ti != model.types.len() - 1 { ",\n" } else { "\n" });
    }
    out.push_str("};\n");
    out
}
