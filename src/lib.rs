//! Terminal lunar lander (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, the
//! integration tests and the benches share a single import path:
//! `lunar_lander::{core,input,term,types}`.

pub use lunar_lander_core as core;
pub use lunar_lander_input as input;
pub use lunar_lander_term as term;
pub use lunar_lander_types as types;
