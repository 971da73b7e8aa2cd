//! Resolved-model JSON serialization.
//!
//! Produces a stable JSON view of the [`ActorModel`] for inspection and
//! tooling. Ordinal order is preserved everywhere; expressions stay
//! verbatim (the floating rewrite is an emission-time concern).

use serde_json::{json, Map, Value};

use crate::model::ActorModel;

pub fn serialize(model: &ActorModel) -> Value {
    let fields: Vec<Value> = model
        .schema
        .fields()
        .iter()
        .enumerate()
        .map(|(i, f)| {
            json!({
                "name":      f.name,
                "default":   f.default,
                "repr":      model.reprs[i].as_str(),
                "uses_unit": model.uses_unit[i],
            })
        })
        .collect();

    let states: Vec<Value> = model
        .states
        .iter()
        .map(|st| {
            json!({
                "name":   st.name,
                "sprite": st.sprite,
                "frame":  st.frame,
                "tics":   st.tics,
                "action": st.action,
                "next":   st.next,
                "misc1":  st.misc1,
                "misc2":  st.misc2,
            })
        })
        .collect();

    let types: Vec<Value> = model
        .types
        .iter()
        .map(|t| {
            let mut overrides = Map::new();
            for (i, slot) in t.overrides.iter().enumerate() {
                if let Some(expr) = slot {
                    overrides.insert(
                        model.schema.fields()[i].name.clone(),
                        Value::String(expr.clone()),
                    );
                }
            }
            json!({
                "name":      t.name,
                "overrides": Value::Object(overrides),
            })
        })
        .collect();

    json!({
        "fields":  fields,
        "sprites": model.sprites.names(),
        "actions": model.actions.names(),
        "states":  states,
        "types":   types,
    })
}
