//! Application module: the view model drawn by the TUI.
//!
//! `App` mirrors what the controller has published over the update channel,
//! plus purely visual state (selection, history panel, folder prompt).

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
