//! Placeholder template rendering
//!
//! Renders `{{ name }}` placeholders against a merged context of run
//! metadata and caller-supplied data. Rendering itself is one-shot and
//! side-effect-free; placement of rendered output (including the
//! overwrite-skip decision) lives in [`generate_outputs`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Deserialize;
use tracing::{debug, info, warn};

use aisync_fs::{NormalizedPath, ensure_dir, read_text, write_text};

use crate::config::CoreConfig;
use crate::mirror::write_if_changed;
use crate::{Error, Result};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.-]+)\s*\}\}").expect("valid pattern"));

/// Relative location of output templates and their configuration.
pub const TEMPLATE_DIR: &str = ".ai/template/outputs";

/// Merged key-value environment for one render pass.
///
/// Caller-supplied fields override the run's static fields on collision.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    fields: BTreeMap<String, String>,
}

impl RenderContext {
    /// Context seeded with the run's static fields.
    pub fn for_run(tool: &str, config: &CoreConfig) -> Self {
        let now = chrono::Utc::now();
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "developer".to_string());

        let mut ctx = Self::default();
        ctx.set("ai_tool", tool);
        ctx.set("timestamp", now.to_rfc3339());
        ctx.set("date", now.format("%Y-%m-%d").to_string());
        ctx.set("version", &config.version);
        ctx.set("user", user);
        ctx.set("project_name", &config.project.name);
        ctx
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Merge a caller data object into the context, overriding existing
    /// fields. Scalar values keep their JSON string form without quotes.
    pub fn merge_json(&mut self, data: &serde_json::Value) {
        let Some(object) = data.as_object() else {
            return;
        };
        for (key, value) in object {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            self.set(key.clone(), text);
        }
    }
}

/// Substitute every `{{ name }}` placeholder with the context value.
///
/// An unresolved placeholder renders as empty text.
pub fn render_template(template: &str, ctx: &RenderContext) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            ctx.get(&caps[1]).unwrap_or("").to_string()
        })
        .into_owned()
}

/// Declared outputs per command, loaded from the template configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub commands: BTreeMap<String, CommandOutputs>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandOutputs {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub outputs: Vec<OutputSpec>,
}

/// One generated artifact: which template, where it lands, and whether an
/// existing file may be replaced.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub template: String,
    /// Output directory, relative to the repository root
    pub location: String,
    /// Output file name; itself rendered through the context
    pub filename: String,
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

fn default_overwrite() -> bool {
    true
}

impl OutputConfig {
    /// Load the output configuration from `.ai/template/outputs/config.yaml`.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = root.join(TEMPLATE_DIR).join("config.yaml");
        if !path.is_file() {
            return Err(Error::ConfigNotFound { path });
        }
        let text = read_text(&path)?;
        serde_yaml::from_str(&text).map_err(|e| Error::ConfigParse {
            path,
            message: e.to_string(),
        })
    }

    /// Outputs for one command.
    pub fn command(&self, name: &str) -> Result<&CommandOutputs> {
        self.commands
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("no outputs declared for command '{name}'")))
    }
}

/// Outcome of placing one rendered output.
#[derive(Debug, Clone)]
pub struct RenderedOutput {
    pub path: NormalizedPath,
    /// False when the destination existed and its spec disables overwriting
    pub written: bool,
}

/// Render and place every declared output of a command.
///
/// `selector` narrows to one output type. A failing output (missing
/// template, unwritable destination) is logged and skipped; the remaining
/// outputs still render. A destination protected by `overwrite: false` is
/// reported with `written: false` and left untouched.
pub fn generate_outputs(
    root: &NormalizedPath,
    config: &OutputConfig,
    command: &str,
    selector: Option<&str>,
    ctx: &RenderContext,
) -> Result<Vec<RenderedOutput>> {
    let declared = config.command(command)?;
    let mut results = Vec::new();

    for spec in &declared.outputs {
        if selector.is_some_and(|kind| kind != spec.kind) {
            continue;
        }
        match place_output(root, spec, ctx) {
            Ok(result) => results.push(result),
            Err(err) => {
                warn!(command, kind = %spec.kind, error = %err, "output generation failed");
            }
        }
    }

    if let Some(kind) = selector {
        if results.is_empty() {
            return Err(Error::NotFound(format!(
                "no output of type '{kind}' for command '{command}'"
            )));
        }
    }

    Ok(results)
}

fn place_output(
    root: &NormalizedPath,
    spec: &OutputSpec,
    ctx: &RenderContext,
) -> Result<RenderedOutput> {
    let template_path = root.join(TEMPLATE_DIR).join(&spec.template);
    let template = read_text(&template_path)?;

    let rendered = render_template(&template, ctx);
    let filename = render_template(&spec.filename, ctx);
    let destination = root.join(&spec.location).join(&filename);

    if destination.exists() && !spec.overwrite {
        info!(path = %destination, "destination exists and overwrite is disabled, skipping");
        return Ok(RenderedOutput {
            path: destination,
            written: false,
        });
    }

    write_if_changed(&destination, &rendered)?;
    debug!(path = %destination, "generated output");
    Ok(RenderedOutput {
        path: destination,
        written: true,
    })
}

/// Pre-create every declared output directory without writing any file.
///
/// Returns the locations that were ensured, deduplicated and sorted.
pub fn init_output_dirs(root: &NormalizedPath, config: &OutputConfig) -> Result<Vec<NormalizedPath>> {
    let locations: BTreeSet<&str> = config
        .commands
        .values()
        .flat_map(|c| c.outputs.iter())
        .map(|o| o.location.as_str())
        .collect();

    let mut created = Vec::new();
    for location in locations {
        let dir = root.join(location);
        ensure_dir(&dir)?;
        created.push(dir);
    }
    Ok(created)
}
