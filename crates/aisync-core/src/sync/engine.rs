use tracing::{debug, info};

use aisync_fs::{NormalizedPath, ensure_dir, read_text};

use crate::config::CoreConfig;
use crate::document::Document;
use crate::mirror::{mirror_tree, write_if_changed};
use crate::registry::{COMMANDS_DIR, TargetDescriptor, TargetRegistry, destination_root};
use crate::sync::SyncReport;
use crate::{Error, Result};

/// Relative location of the core configuration.
const CONFIG_PATH: &str = ".ai/config.yaml";

/// Relative location of root instruction templates.
const ROOT_TEMPLATE_DIR: &str = ".ai/template";

/// Which targets a run covers.
#[derive(Debug, Clone)]
pub enum TargetSelection {
    All,
    Named(Vec<String>),
}

/// The orchestrating engine: one instance per repository root.
///
/// The core configuration is loaded once at construction and threaded down
/// into every component call.
#[derive(Debug)]
pub struct SyncEngine {
    root: NormalizedPath,
    config: CoreConfig,
    registry: TargetRegistry,
}

impl SyncEngine {
    /// Create an engine for a repository root.
    ///
    /// # Errors
    ///
    /// Fails when `.ai/config.yaml` is missing or unparseable; an engine
    /// without its configuration cannot produce meaningful output.
    pub fn new(root: impl Into<NormalizedPath>) -> Result<Self> {
        let root = root.into();
        let config = CoreConfig::load(&root.join(CONFIG_PATH))?;
        Ok(Self {
            root,
            config,
            registry: TargetRegistry::with_builtins(),
        })
    }

    /// Create an engine with an explicit registry.
    pub fn with_registry(
        root: impl Into<NormalizedPath>,
        config: CoreConfig,
        registry: TargetRegistry,
    ) -> Self {
        Self {
            root: root.into(),
            config,
            registry,
        }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Run a full sync over the selected targets.
    ///
    /// Every requested name is validated before any side effect; an unknown
    /// name aborts the run with no report produced. Per-file failures are
    /// recorded in the owning target's report and never abort the run.
    pub fn sync(&self, selection: &TargetSelection) -> Result<Vec<SyncReport>> {
        let targets = self.select(selection)?;
        let mut reports = Vec::with_capacity(targets.len());

        for target in targets {
            info!(target = target.name, "syncing target");
            reports.push(self.sync_target(target));
        }
        Ok(reports)
    }

    /// Pre-create every destination directory of the selected targets
    /// without writing any file.
    pub fn init_dirs(&self, selection: &TargetSelection) -> Result<Vec<NormalizedPath>> {
        let targets = self.select(selection)?;
        let mut created = Vec::new();

        for target in targets {
            let dest_root = destination_root(&self.root, target);
            ensure_dir(&dest_root)?;
            created.push(dest_root.clone());
            for tree in &target.trees {
                let dir = dest_root.join(tree.dest);
                ensure_dir(&dir)?;
                created.push(dir);
            }
        }
        Ok(created)
    }

    fn select(&self, selection: &TargetSelection) -> Result<Vec<&TargetDescriptor>> {
        match selection {
            TargetSelection::All => Ok(self.registry.all().iter().collect()),
            TargetSelection::Named(names) => self.registry.resolve(names),
        }
    }

    fn sync_target(&self, target: &TargetDescriptor) -> SyncReport {
        let mut report = SyncReport::new(target.name);
        let dest_root = destination_root(&self.root, target);

        // Settings first, so every run sequences the aggregate artifact and
        // the mirrored trees identically.
        if let Some((rel, builder)) = &target.settings {
            let destination = dest_root.join(rel);
            match self.write_settings(builder, &destination) {
                Ok(()) => report.record_write(),
                Err(err) => report.record_error(destination, err.to_string()),
            }
        }

        if let Some((template, output)) = target.root_template {
            self.sync_root_template(template, output, &mut report);
        }

        for tree in &target.trees {
            let source = self.root.join(tree.source);
            let dest = dest_root.join(tree.dest);
            // Declared destinations exist even when their source is empty
            if let Err(err) = ensure_dir(&dest) {
                report.record_error(dest, err.to_string());
                continue;
            }
            report.absorb(mirror_tree(&source, &dest, &tree.filter, &tree.converter));
        }

        report
    }

    fn write_settings(
        &self,
        builder: &crate::convert::SettingsBuilder,
        destination: &NormalizedPath,
    ) -> Result<()> {
        let commands = self.load_command_docs();
        let settings = builder.build(&self.config, &self.root, &commands);
        let mut content = serde_json::to_string_pretty(&settings)?;
        content.push('\n');
        write_if_changed(destination, &content)?;
        Ok(())
    }

    /// Copy a target's root instruction file from its template.
    ///
    /// A missing template is a recovered skip, not an error.
    fn sync_root_template(&self, template: &str, output: &str, report: &mut SyncReport) {
        let source = self.root.join(ROOT_TEMPLATE_DIR).join(template);
        if !source.is_file() {
            debug!(template, "root template absent, skipping");
            return;
        }

        let destination = self.root.join(output);
        let result = read_text(&source)
            .map_err(Error::from)
            .and_then(|text| write_if_changed(&destination, &text).map(|_| ()));
        match result {
            Ok(()) => report.record_write(),
            Err(err) => report.record_error(destination, err.to_string()),
        }
    }

    /// Command documents from the commands tree, walked depth-first with
    /// sorted entries so the fold sees one deterministic order.
    ///
    /// Category subdirectories are descended into; their documents fold
    /// under the same flat stem namespace as top-level commands.
    /// Unreadable files are logged and skipped; the settings fold works
    /// from whatever parses.
    fn load_command_docs(&self) -> Vec<(String, Document)> {
        let mut docs = Vec::new();
        collect_command_docs(&self.root.join(COMMANDS_DIR), &mut docs);
        docs
    }
}

fn collect_command_docs(dir: &NormalizedPath, docs: &mut Vec<(String, Document)>) {
    if !dir.is_dir() {
        return;
    }
    let Ok(read) = std::fs::read_dir(dir.to_native()) else {
        return;
    };
    let mut names: Vec<String> = read
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();

    for name in names {
        let path = dir.join(&name);
        if path.is_dir() {
            collect_command_docs(&path, docs);
        } else if name.ends_with(".md") {
            match read_text(&path) {
                Ok(text) => {
                    let stem = name.trim_end_matches(".md").to_string();
                    docs.push((stem, Document::parse(&text)));
                }
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "cannot read command document");
                }
            }
        }
    }
}
