//! Declarative header emission (`info.h`): sprite/state/type enumerations
//! and the record layout derived from the classified schema.

use actorgen_core::{ActorModel, Repr};

use crate::c_ident;

const GUARD: &str = "INFO_H";

pub fn render_header(model: &ActorModel) -> String {
    let mut out = String::new();

    out.push_str("// generated by actorgen\n\n");
    out.push_str(&format!("#ifndef {g}\n#define {g}\n\n", g = GUARD));
    out.push_str("#include <stddef.h>\n\n");

    // Sprite enum
    out.push_str("typedef enum {\n");
    for s in model.sprites.names() {
        out.push_str(&format!("    SPR_{},\n", c_ident(s)));
    }
    out.push_str("    NUMSPRITES\n} spritenum_t;\n\n");

    // State enum -- state names already carry their prefix
    out.push_str("typedef enum {\n");
    for st in &model.states {
        out.push_str(&format!("    {},\n", c_ident(&st.name)));
    }
    out.push_str("    NUMSTATES\n} statenum_t;\n\n");

    // state_t: fixed layout; frame is bit-packed with the fullbright flag
    out.push_str(concat!(
        "typedef struct\n",
        "{\n",
        "    spritenum_t sprite;\n",
        "    int         frame;\n",
        "    int         tics;\n",
        "    void      (*action)();\n",
        "    statenum_t  nextstate;\n",
        "    int         misc1, misc2;\n",
        "} state_t;\n\n",
    ));

    out.push_str("extern state_t states[NUMSTATES];\n");
    out.push_str("extern char *sprnames[NUMSPRITES];\n\n");

    // Actor type enum
    out.push_str("typedef enum {\n");
    for t in &model.types {
        out.push_str(&format!("    {},\n", c_ident(&t.name)));
    }
    out.push_str("    NUMMOBJTYPES\n} mobjtype_t;\n\n");

    // Record layout: one member per schema field, C type by representation
    out.push_str("typedef struct {\n");
    for (field, repr) in model.schema.fields().iter().zip(&model.reprs) {
        let name = c_ident(&field.name);
        match repr {
            Repr::Text => out.push_str(&format!("    char *{};\n", name)),
            Repr::Float => out.push_str(&format!("    float {};\n", name)),
            Repr::Sound | Repr::Flags | Repr::Int => {
                out.push_str(&format!("    int   {};\n", name))
            }
        }
    }
    out.push_str("} mobjinfo_t;\n\n");

    out.push_str("extern mobjinfo_t mobjinfo[NUMMOBJTYPES];\n\n");
    out.push_str(&format!("#endif // {}\n", GUARD));
    out
}
