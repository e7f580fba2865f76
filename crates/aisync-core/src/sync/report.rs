use aisync_fs::NormalizedPath;

use crate::mirror::MirrorStats;

/// One recorded per-file failure.
#[derive(Debug, Clone)]
pub struct SyncIssue {
    pub path: NormalizedPath,
    pub reason: String,
}

/// Outcome of syncing one target.
///
/// Built fresh per engine run and never persisted.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub target: String,
    pub files_written: usize,
    pub files_skipped: usize,
    pub errors: Vec<SyncIssue>,
}

impl SyncReport {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            files_written: 0,
            files_skipped: 0,
            errors: Vec::new(),
        }
    }

    /// Fold a mirror pass into the report.
    pub fn absorb(&mut self, stats: MirrorStats) {
        self.files_written += stats.written;
        self.files_skipped += stats.skipped;
        self.errors.extend(stats.errors);
    }

    pub fn record_write(&mut self) {
        self.files_written += 1;
    }

    pub fn record_error(&mut self, path: NormalizedPath, reason: impl Into<String>) {
        self.errors.push(SyncIssue {
            path,
            reason: reason.into(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
