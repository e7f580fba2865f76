//! End-to-end template rendering flow
//!
//! Exercises output generation from a declared template configuration:
//! context merging, filename rendering, and the overwrite-skip contract.

use std::fs;

use aisync_core::render::{OutputConfig, generate_outputs, init_output_dirs};
use aisync_core::{CoreConfig, RenderContext};
use aisync_fs::NormalizedPath;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const OUTPUT_CONFIG: &str = "\
commands:
  van:
    name: Initialize
    phase: setup
    outputs:
      - type: context
        template: active-context.md
        location: memory-bank
        filename: activeContext.md
        overwrite: true
      - type: log
        template: session-log.md
        location: memory-bank/logs
        filename: session-{{ date }}.md
        overwrite: false
  plan:
    name: Plan
    phase: plan
    outputs:
      - type: tasks
        template: tasks.md
        location: memory-bank
        filename: tasks.md
        overwrite: true
";

fn setup_repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    let write = |rel: &str, content: &str| {
        let path = temp.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    };

    write(
        ".ai/config.yaml",
        "project:\n  name: demo-app\n  type: application\nworkflow:\n  phases:\n    - setup\n",
    );
    write(".ai/template/outputs/config.yaml", OUTPUT_CONFIG);
    write(
        ".ai/template/outputs/active-context.md",
        "# Active Context\n\nProject: {{ project_name }}\nTool: {{ ai_tool }}\nFocus: {{ focus }}\n",
    );
    write(
        ".ai/template/outputs/session-log.md",
        "# Session {{ date }}\n",
    );
    write(".ai/template/outputs/tasks.md", "# Tasks for {{ project_name }}\n");

    temp
}

#[test]
fn generates_outputs_with_merged_context() {
    let temp = setup_repo();
    let root = NormalizedPath::new(temp.path());
    let config = CoreConfig::load(&root.join(".ai/config.yaml")).unwrap();
    let outputs = OutputConfig::load(&root).unwrap();

    let mut ctx = RenderContext::for_run("claude", &config);
    ctx.merge_json(&serde_json::json!({ "focus": "initial setup" }));

    let results = generate_outputs(&root, &outputs, "van", None, &ctx).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.written));

    let context = fs::read_to_string(temp.path().join("memory-bank/activeContext.md")).unwrap();
    assert!(context.contains("Project: demo-app"));
    assert!(context.contains("Tool: claude"));
    assert!(context.contains("Focus: initial setup"));
}

#[test]
fn filename_placeholders_are_rendered() {
    let temp = setup_repo();
    let root = NormalizedPath::new(temp.path());
    let outputs = OutputConfig::load(&root).unwrap();

    let mut ctx = RenderContext::default();
    ctx.set("date", "2026-02-14");

    generate_outputs(&root, &outputs, "van", Some("log"), &ctx).unwrap();
    assert!(
        temp.path()
            .join("memory-bank/logs/session-2026-02-14.md")
            .exists()
    );
}

#[test]
fn protected_destination_survives_rerun() {
    let temp = setup_repo();
    let root = NormalizedPath::new(temp.path());
    let outputs = OutputConfig::load(&root).unwrap();

    let mut ctx = RenderContext::default();
    ctx.set("date", "2026-02-14");

    generate_outputs(&root, &outputs, "van", Some("log"), &ctx).unwrap();
    let log_path = temp.path().join("memory-bank/logs/session-2026-02-14.md");
    fs::write(&log_path, "hand-edited notes\n").unwrap();

    let results = generate_outputs(&root, &outputs, "van", Some("log"), &ctx).unwrap();
    assert!(!results[0].written);
    assert_eq!(
        fs::read_to_string(&log_path).unwrap(),
        "hand-edited notes\n"
    );
}

#[test]
fn unresolved_placeholders_render_empty() {
    let temp = setup_repo();
    let root = NormalizedPath::new(temp.path());
    let outputs = OutputConfig::load(&root).unwrap();

    // No context at all: every placeholder collapses to empty text
    let results = generate_outputs(&root, &outputs, "plan", None, &RenderContext::default()).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        fs::read_to_string(temp.path().join("memory-bank/tasks.md")).unwrap(),
        "# Tasks for \n"
    );
}

#[test]
fn init_creates_every_declared_location() {
    let temp = setup_repo();
    let root = NormalizedPath::new(temp.path());
    let outputs = OutputConfig::load(&root).unwrap();

    let created = init_output_dirs(&root, &outputs).unwrap();
    assert_eq!(created.len(), 2);
    assert!(temp.path().join("memory-bank").is_dir());
    assert!(temp.path().join("memory-bank/logs").is_dir());
    assert!(!temp.path().join("memory-bank/tasks.md").exists());
}
