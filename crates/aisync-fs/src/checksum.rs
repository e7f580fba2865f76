//! SHA-256 checksum utilities
//!
//! A single canonical checksum format (`sha256:<hex>`) used by the sync
//! engine to detect when a destination already holds the content about to be
//! written.

use sha2::{Digest, Sha256};
use std::path::Path;

const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of string content.
pub fn content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn file_checksum(path: &Path) -> std::io::Result<String> {
    let content = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}
