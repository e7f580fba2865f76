//! Command-manifest conversion
//!
//! Converts a markdown command document into a standalone TOML manifest:
//! a header comment, a flat `[command]` table from selected metadata
//! fields, an optional per-target override table, and the document body
//! embedded verbatim in a `[documentation]` multi-line string.

use crate::document::Document;

/// Fixed usage-context footer appended after the embedded body.
const USAGE_FOOTER: &str =
    "Invoke via the command trigger; text after the trigger is passed to the command as arguments.";

/// Build the TOML manifest content for one command document.
///
/// Missing fields never fail the conversion: the command name falls back to
/// the file stem and every other absent field becomes an empty string or is
/// omitted entirely.
pub(super) fn convert(doc: &Document, stem: &str, override_key: &str) -> String {
    let name = doc.get_str("name").unwrap_or(stem);
    let description = doc.get_str("description").unwrap_or("");

    let mut out = String::new();
    out.push_str(&format!("# {name}\n# {description}\n\n"));

    out.push_str("[command]\n");
    out.push_str(&format!("name = {}\n", toml_str(name)));
    out.push_str(&format!("description = {}\n", toml_str(description)));

    if let Some(phase) = doc.get_str("phase") {
        out.push_str(&format!("phase = {}\n", toml_str(phase)));
    }

    let prerequisites = doc.get_list("prerequisites");
    if !prerequisites.is_empty() {
        out.push_str(&format!("prerequisites = {}\n", toml_list(&prerequisites)));
    }

    let creates = doc.get_list("creates");
    if !creates.is_empty() {
        out.push_str(&format!("creates = {}\n", toml_list(&creates)));
    }

    if has_override(doc, override_key) {
        let trigger = doc
            .tool_override(override_key, "trigger")
            .map(str::to_string)
            .unwrap_or_else(|| format!("/{stem}"));
        let override_description = doc
            .tool_override(override_key, "description")
            .unwrap_or("");

        out.push_str(&format!("\n[command.{}]\n", override_table(override_key)));
        out.push_str(&format!("trigger = {}\n", toml_str(&trigger)));
        out.push_str(&format!("description = {}\n", toml_str(override_description)));
    }

    out.push_str("\n[documentation]\n");
    out.push_str(&format!(
        "content = \"\"\"\n{}\n\n{USAGE_FOOTER}\n\"\"\"\n",
        escape_block(doc.body.trim())
    ));

    out
}

fn has_override(doc: &Document, override_key: &str) -> bool {
    doc.metadata
        .get("tools")
        .and_then(|tools| tools.get(override_key))
        .is_some()
}

/// Table name for the per-target override section: `gemini-cli` → `gemini`.
fn override_table(override_key: &str) -> &str {
    override_key.strip_suffix("-cli").unwrap_or(override_key)
}

/// Quote a scalar as a TOML string with proper escaping.
fn toml_str(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

/// Format a TOML array of strings.
fn toml_list(items: &[String]) -> String {
    toml::Value::Array(
        items
            .iter()
            .map(|s| toml::Value::String(s.clone()))
            .collect(),
    )
    .to_string()
}

/// Escape occurrences of the block delimiter inside the embedded body so
/// the emitted manifest stays syntactically valid.
fn escape_block(body: &str) -> String {
    body.replace("\"\"\"", "\\\"\\\"\\\"")
}
