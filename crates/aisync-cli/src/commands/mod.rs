//! Command implementations for aisync-cli

pub mod render;
pub mod sync;

pub use render::run_render;
pub use sync::{run_sync, run_targets};
