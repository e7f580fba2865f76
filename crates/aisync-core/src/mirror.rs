//! Recursive tree mirroring
//!
//! Walks a source subtree depth-first with sorted directory entries and
//! projects every qualifying file through the target's converter. The walk
//! is a pure accumulator: each level returns its own stats and callers
//! merge them, so two runs over the same tree always visit files in the
//! same order.

use tracing::{debug, warn};

use aisync_fs::{NormalizedPath, content_checksum, file_checksum, read_text, write_text};

use crate::convert::{ConversionResult, Converter};
use crate::document::Document;
use crate::registry::ExtensionFilter;
use crate::sync::SyncIssue;
use crate::Result;

/// Accumulated outcome of a mirror pass.
#[derive(Debug, Default, Clone)]
pub struct MirrorStats {
    /// Files whose converted content is present at the destination,
    /// including files whose bytes were already up to date
    pub written: usize,
    /// Files that did not match the tree's extension filter
    pub skipped: usize,
    /// Per-file failures; a failure never aborts the walk
    pub errors: Vec<SyncIssue>,
}

impl MirrorStats {
    pub fn merge(&mut self, other: MirrorStats) {
        self.written += other.written;
        self.skipped += other.skipped;
        self.errors.extend(other.errors);
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Write content unless the destination already holds the same bytes.
///
/// Returns whether a physical write happened. The comparison goes through
/// checksums, so an up-to-date destination keeps its timestamps.
pub fn write_if_changed(path: &NormalizedPath, content: &str) -> Result<bool> {
    if path.is_file() {
        if let Ok(existing) = file_checksum(&path.to_native()) {
            if existing == content_checksum(content) {
                debug!(path = %path, "destination up to date, write elided");
                return Ok(false);
            }
        }
    }
    write_text(path, content)?;
    Ok(true)
}

/// Mirror one source subtree into a destination directory.
///
/// A missing source directory yields empty stats: targets declare more
/// subtrees than most repositories populate. Files that fail to read or
/// write are recorded as issues and the walk continues.
pub fn mirror_tree(
    source: &NormalizedPath,
    dest: &NormalizedPath,
    filter: &ExtensionFilter,
    converter: &Converter,
) -> MirrorStats {
    let mut stats = MirrorStats::default();
    if !source.is_dir() {
        debug!(source = %source, "source tree absent, nothing to mirror");
        return stats;
    }

    let mut names = match sorted_entries(source) {
        Ok(names) => names,
        Err(message) => {
            warn!(source = %source, message, "cannot list source tree");
            stats.errors.push(SyncIssue {
                path: source.clone(),
                reason: message,
            });
            return stats;
        }
    };

    for name in names.drain(..) {
        let entry = source.join(&name);
        if entry.is_dir() {
            stats.merge(mirror_tree(&entry, &dest.join(&name), filter, converter));
            continue;
        }

        if !filter.matches(&name) {
            stats.skipped += 1;
            continue;
        }

        match mirror_file(&entry, &name, dest, converter) {
            Ok(result) if result.written => stats.written += 1,
            Ok(_) => {}
            Err(err) => {
                warn!(path = %entry, error = %err, "failed to mirror file");
                stats.errors.push(SyncIssue {
                    path: entry,
                    reason: err.to_string(),
                });
            }
        }
    }

    stats
}

fn mirror_file(
    entry: &NormalizedPath,
    name: &str,
    dest: &NormalizedPath,
    converter: &Converter,
) -> Result<ConversionResult> {
    let text = read_text(entry)?;
    let doc = Document::parse(&text);
    let mut result = converter.convert(&doc, name, dest);
    if write_if_changed(&result.destination, &result.content)? {
        debug!(source = %entry, dest = %result.destination, "mirrored");
    }
    // Elided writes mark the result too: the destination holds the content
    result.written = true;
    Ok(result)
}

/// Directory entry names in lexicographic order.
fn sorted_entries(dir: &NormalizedPath) -> std::result::Result<Vec<String>, String> {
    let read = std::fs::read_dir(dir.to_native()).map_err(|e| e.to_string())?;
    let mut names = Vec::new();
    for entry in read {
        let entry = entry.map_err(|e| e.to_string())?;
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}
