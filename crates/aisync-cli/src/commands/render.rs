//! Render command implementation

use std::path::Path;

use colored::Colorize;

use aisync_core::render::{OutputConfig, generate_outputs, init_output_dirs};
use aisync_core::{CoreConfig, RenderContext};
use aisync_fs::{NormalizedPath, read_text};

use crate::error::Result;

/// Run the render command
pub fn run_render(
    path: &Path,
    command: &str,
    kind: Option<&str>,
    data: Option<&str>,
    tool: &str,
    init: bool,
) -> Result<()> {
    let root = NormalizedPath::new(path);
    let output_config = OutputConfig::load(&root)?;

    if init {
        println!("{} Initializing template directories...", "=>".blue().bold());
        let created = init_output_dirs(&root, &output_config)?;
        for dir in &created {
            println!("   {} {}", "+".green(), dir.as_str().cyan());
        }
        return Ok(());
    }

    let config = CoreConfig::load(&root.join(".ai/config.yaml"))?;
    let mut ctx = RenderContext::for_run(tool, &config);
    if let Some(data_path) = data {
        let text = read_text(&NormalizedPath::new(data_path))?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        ctx.merge_json(&value);
    }

    println!(
        "{} Generating outputs for {}...",
        "=>".blue().bold(),
        command.cyan()
    );
    let results = generate_outputs(&root, &output_config, command, kind, &ctx)?;

    for result in &results {
        if result.written {
            println!("   {} {}", "+".green(), result.path.as_str().cyan());
        } else {
            println!(
                "   {} {} {}",
                "-".yellow(),
                result.path.as_str().cyan(),
                "(exists, overwrite disabled)".dimmed()
            );
        }
    }
    println!(
        "{} {} output(s) processed.",
        "OK".green().bold(),
        results.len()
    );
    Ok(())
}
