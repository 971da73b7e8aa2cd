//! Next-state reference resolution.
//!
//! States are collected first and resolved afterwards, so a state may
//! name a later-declared state freely. The side index is built over the
//! complete state list and consulted only here.

use std::collections::HashMap;

use crate::error::CompileError;
use crate::model::{RawState, State};

/// Resolve every symbolic next-state name to its structural ordinal.
/// Fails closed on the first unresolved name.
pub fn resolve_states(states: Vec<RawState>, file: &str) -> Result<Vec<State>, CompileError> {
    let index: HashMap<String, usize> = states
        .iter()
        .enumerate()
        .map(|(i, st)| (st.name.to_ascii_lowercase(), i))
        .collect();

    states
        .into_iter()
        .map(|st| {
            let next = index
                .get(&st.next_name.to_ascii_lowercase())
                .copied()
                .ok_or_else(|| {
                    CompileError::whole_file(
                        file,
                        format!(
                            "state {}: unresolved next state '{}'",
                            st.name, st.next_name
                        ),
                    )
                })?;
            Ok(State {
                name: st.name,
                sprite: st.sprite,
                frame: st.frame,
                tics: st.tics,
                action: st.action,
                next,
                misc1: st.misc1,
                misc2: st.misc2,
            })
        })
        .collect()
}
