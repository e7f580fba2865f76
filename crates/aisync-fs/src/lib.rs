//! Filesystem primitives for AI Config Sync
//!
//! Provides normalized path handling, atomic file writes, and content
//! checksums. The sync engine performs all of its I/O through this crate.

pub mod checksum;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::{content_checksum, file_checksum};
pub use error::{Error, Result};
pub use io::{ensure_dir, read_text, write_text};
pub use path::NormalizedPath;
