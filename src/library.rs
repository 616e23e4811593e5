//! Folder listing and track metadata.

mod display;
mod model;
mod scan;

pub use model::Track;
pub use scan::scan;
