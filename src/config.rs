//! Settings schema and loading.
//!
//! Settings come from an optional TOML file and `CADENZA__*` environment
//! variables; see [`Settings`] for the precedence rules.

mod load;
mod schema;

pub use schema::*;
