//! End-to-end sync flow
//!
//! Exercises the complete projection: config loading -> target selection ->
//! settings generation -> tree mirroring, against a realistic `.ai/` tree
//! on a temp directory.

use std::collections::BTreeMap;
use std::fs;

use aisync_core::sync::{SyncEngine, TargetSelection};
use aisync_core::Error;
use aisync_fs::NormalizedPath;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const CONFIG: &str = "\
project:
  name: demo-app
  type: application
  description: Demo project
workflow:
  phases:
    - setup
    - plan
    - build
";

const VAN_MD: &str = "\
---
name: van
description: Init
phase: setup
creates:
  - memory-bank/activeContext.md
tools:
  gemini-cli:
    trigger: /van
    description: Initialize and assess complexity
  claude-code:
    trigger: /van
---
Run initialization.
";

/// Set up a test repository with a populated .ai/ tree
fn setup_repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    let write = |rel: &str, content: &str| {
        let path = temp.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    };

    write(".ai/config.yaml", CONFIG);
    write(".ai/commands/van.md", VAN_MD);
    write(
        ".ai/commands/plan.md",
        "---\nname: plan\ndescription: Plan tasks\nphase: plan\nprerequisites:\n  - van\ntools:\n  gemini-cli:\n    trigger: /plan\n---\nBreak work down into tasks.\n",
    );
    write(
        ".ai/commands/build.md",
        "---\nname: build\ndescription: Implement tasks\nphase: build\n---\nImplement according to plan.\n",
    );
    write(".ai/commands/notes.txt", "scratch notes\n");
    write(".ai/commands/context.json", "{}\n");
    write(
        ".ai/adapters/claude-code/hooks/guard.py",
        "#!/usr/bin/env python3\nprint('guard')\n",
    );
    write(
        ".ai/adapters/claude-code/agents/reviewer.md",
        "---\nname: reviewer\nmodel: fast\n---\nReview the diff.\n",
    );
    write(".ai/template/CLAUDE.md", "# Instructions for Claude\n");
    write(".ai/template/GEMINI.md", "# Instructions for Gemini\n");

    temp
}

fn engine(temp: &TempDir) -> SyncEngine {
    SyncEngine::new(temp.path()).unwrap()
}

#[test]
fn full_sync_projects_every_target() {
    let temp = setup_repo();
    let reports = engine(&temp).sync(&TargetSelection::All).unwrap();

    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r.is_clean()));

    // claude: settings, root instructions, reduced command headers, verbatim adapters
    let settings: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join(".claude/settings.json")).unwrap())
            .unwrap();
    assert!(settings["hooks"]["tool-use-before"].is_string());

    let van = fs::read_to_string(temp.path().join(".claude/commands/van.md")).unwrap();
    assert!(van.starts_with("---\nname: van\ndescription: Init\n---\n"));
    assert!(van.ends_with("Run initialization.\n"));
    assert!(!van.contains("creates:"));

    assert_eq!(
        fs::read_to_string(temp.path().join(".claude/hooks/guard.py")).unwrap(),
        "#!/usr/bin/env python3\nprint('guard')\n"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("CLAUDE.md")).unwrap(),
        "# Instructions for Claude\n"
    );

    // gemini: manifests + settings
    assert!(temp.path().join(".gemini/commands/van.toml").exists());
    assert!(temp.path().join(".gemini/settings.json").exists());
    assert_eq!(
        fs::read_to_string(temp.path().join("GEMINI.md")).unwrap(),
        "# Instructions for Gemini\n"
    );

    // cursor: mirrored commands, no settings artifact
    assert!(temp.path().join(".cursor/commands/van.md").exists());
    assert!(!temp.path().join(".cursor/settings.json").exists());
}

#[test]
fn manifest_carries_fields_and_verbatim_body() {
    let temp = setup_repo();
    engine(&temp)
        .sync(&TargetSelection::Named(vec!["gemini".to_string()]))
        .unwrap();

    let raw = fs::read_to_string(temp.path().join(".gemini/commands/van.toml")).unwrap();
    assert!(raw.contains("description = \"Init\""));

    let parsed: toml::Value = toml::from_str(&raw).unwrap();
    assert_eq!(parsed["command"]["name"].as_str(), Some("van"));
    assert_eq!(parsed["command"]["phase"].as_str(), Some("setup"));
    assert_eq!(
        parsed["command"]["creates"][0].as_str(),
        Some("memory-bank/activeContext.md")
    );
    assert_eq!(parsed["command"]["gemini"]["trigger"].as_str(), Some("/van"));
    assert!(
        parsed["documentation"]["content"]
            .as_str()
            .unwrap()
            .contains("Run initialization.")
    );
}

#[test]
fn mirror_counts_match_filter() {
    let temp = setup_repo();
    let reports = engine(&temp)
        .sync(&TargetSelection::Named(vec!["cursor".to_string()]))
        .unwrap();

    // three markdown commands written; two non-markdown files skipped
    assert_eq!(reports[0].files_written, 3);
    assert_eq!(reports[0].files_skipped, 2);
    assert!(temp.path().join(".cursor/commands/plan.md").exists());
    assert!(!temp.path().join(".cursor/commands/notes.txt").exists());
}

#[test]
fn unknown_target_aborts_before_any_write() {
    let temp = setup_repo();
    let err = engine(&temp)
        .sync(&TargetSelection::Named(vec![
            "claude".to_string(),
            "windsurf".to_string(),
        ]))
        .unwrap_err();

    assert!(matches!(err, Error::UnknownTarget { ref name } if name == "windsurf"));
    assert!(!temp.path().join(".claude").exists());
    assert!(!temp.path().join("CLAUDE.md").exists());
}

#[test]
fn malformed_header_is_mirrored_without_loss() {
    let temp = setup_repo();
    let broken = "---\nname: broken\ndescription: unterminated header\n\nThe body never starts.\n";
    fs::write(temp.path().join(".ai/commands/broken.md"), broken).unwrap();

    let reports = engine(&temp)
        .sync(&TargetSelection::Named(vec!["claude".to_string()]))
        .unwrap();

    assert!(reports[0].is_clean());
    assert_eq!(
        fs::read_to_string(temp.path().join(".claude/commands/broken.md")).unwrap(),
        broken
    );
}

/// Collect every output file's bytes, keyed by path relative to the root.
fn snapshot(temp: &TempDir) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    let root = NormalizedPath::new(temp.path());
    for dir in [".claude", ".gemini", ".cursor"] {
        collect(&root.join(dir), &root, &mut files);
    }
    for file in ["CLAUDE.md", "GEMINI.md"] {
        let path = temp.path().join(file);
        if path.is_file() {
            files.insert(file.to_string(), fs::read(path).unwrap());
        }
    }
    files
}

fn collect(dir: &NormalizedPath, root: &NormalizedPath, files: &mut BTreeMap<String, Vec<u8>>) {
    let Ok(entries) = fs::read_dir(dir.to_native()) else {
        return;
    };
    for entry in entries.filter_map(|e| e.ok()) {
        let path = NormalizedPath::new(entry.path());
        if path.is_dir() {
            collect(&path, root, files);
        } else {
            let rel = path
                .as_str()
                .strip_prefix(root.as_str())
                .unwrap()
                .trim_start_matches('/')
                .to_string();
            files.insert(rel, fs::read(path.to_native()).unwrap());
        }
    }
}

#[test]
fn repeated_sync_produces_identical_output() {
    let temp = setup_repo();
    let engine = engine(&temp);

    let first_reports = engine.sync(&TargetSelection::All).unwrap();
    let first = snapshot(&temp);
    let second_reports = engine.sync(&TargetSelection::All).unwrap();
    let second = snapshot(&temp);

    assert_eq!(first, second);
    for (a, b) in first_reports.iter().zip(&second_reports) {
        assert_eq!(a.files_written, b.files_written);
        assert_eq!(a.files_skipped, b.files_skipped);
    }
}

#[test]
fn gemini_settings_fold_only_commands_with_overrides() {
    let temp = setup_repo();
    engine(&temp)
        .sync(&TargetSelection::Named(vec!["gemini".to_string()]))
        .unwrap();

    let settings: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join(".gemini/settings.json")).unwrap())
            .unwrap();

    assert_eq!(settings["_custom"]["project"]["name"], "demo-app");
    assert_eq!(settings["_custom"]["commands"]["van"]["trigger"], "/van");
    assert_eq!(settings["_custom"]["commands"]["plan"]["trigger"], "/plan");
    // build.md declares no gemini override and stays out of the fold
    assert!(settings["_custom"]["commands"].get("build").is_none());
    assert_eq!(
        settings["_custom"]["workflow"]["phases"],
        serde_json::json!(["setup", "plan", "build"])
    );
}

#[test]
fn init_dirs_creates_layout_without_artifacts() {
    let temp = setup_repo();
    engine(&temp).init_dirs(&TargetSelection::All).unwrap();

    assert!(temp.path().join(".claude/commands").is_dir());
    assert!(temp.path().join(".claude/hooks").is_dir());
    assert!(temp.path().join(".gemini/commands").is_dir());
    assert!(temp.path().join(".cursor/rules").is_dir());
    assert!(!temp.path().join(".claude/settings.json").exists());
    assert!(!temp.path().join("CLAUDE.md").exists());
}
