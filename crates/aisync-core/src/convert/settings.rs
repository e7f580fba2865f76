//! Aggregate settings builders
//!
//! Some targets carry a single settings artifact folded from the core
//! configuration and the source command documents, regenerated on every run
//! before the target's trees are mirrored. One variant per target that
//! declares a settings artifact.

use serde_json::{Map, Value, json};

use aisync_fs::NormalizedPath;

use crate::config::CoreConfig;
use crate::document::Document;

/// Builder for a target-wide settings object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsBuilder {
    Claude,
    Gemini,
}

impl SettingsBuilder {
    /// Fold the configuration and command documents into the target's
    /// settings object.
    ///
    /// `commands` is the sorted list of (file stem, document) pairs from
    /// the source commands tree. The output contains no timestamps so that
    /// repeated runs over unchanged sources emit byte-identical artifacts.
    pub fn build(
        &self,
        config: &CoreConfig,
        root: &NormalizedPath,
        commands: &[(String, Document)],
    ) -> Value {
        match self {
            Self::Claude => json!({
                "hooks": {
                    "tool-use-before": "echo '[claude] executing: {{tool_name}}'",
                    "tool-use-after": "echo '[claude] completed: {{tool_name}}'",
                    "user-prompt-submit": "echo '[user] {{prompt}}'",
                },
                "env": {
                    "CLAUDE_PROJECT_ROOT": root.as_str(),
                },
            }),
            Self::Gemini => json!({
                "general": {
                    "previewFeatures": false,
                    "preferredEditor": "code",
                },
                "model": {
                    "name": "gemini-2.0-flash-exp",
                    "maxSessionTurns": -1,
                },
                "output": {
                    "format": "markdown",
                },
                "privacy": {
                    "usageStatisticsEnabled": false,
                },
                "_custom": {
                    "project": {
                        "name": config.project.name,
                        "type": config.project.kind,
                        "description": config.project.description,
                    },
                    "workflow": {
                        "phases": config.workflow.phases,
                        "memoryBankPath": config.defaults.memory_bank_path,
                    },
                    "commands": fold_commands(commands),
                    "meta": {
                        "generatedFrom": [".ai/config.yaml", ".ai/commands/"],
                        "generatorVersion": config.version,
                    },
                },
            }),
        }
    }
}

/// Fold command documents into `name → {trigger, description, phase}`.
///
/// Only commands carrying a `gemini-cli` override entry participate,
/// matching the consumer's expectation that every listed command has a
/// trigger.
fn fold_commands(commands: &[(String, Document)]) -> Value {
    let mut folded = Map::new();
    for (stem, doc) in commands {
        if doc
            .metadata
            .get("tools")
            .and_then(|tools| tools.get("gemini-cli"))
            .is_none()
        {
            continue;
        }

        let trigger = doc
            .tool_override("gemini-cli", "trigger")
            .map(str::to_string)
            .unwrap_or_else(|| format!("/{stem}"));
        let description = doc
            .tool_override("gemini-cli", "description")
            .or_else(|| doc.get_str("description"))
            .unwrap_or("");
        let phase = doc.get_str("phase").unwrap_or("");

        folded.insert(
            stem.clone(),
            json!({
                "trigger": trigger,
                "description": description,
                "phase": phase,
            }),
        );
    }
    Value::Object(folded)
}
