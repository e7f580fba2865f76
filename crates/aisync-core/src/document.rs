//! Source document parsing
//!
//! A document is raw text with an optional metadata block: a `---` marker
//! line, a YAML key-value payload, and a closing `---` marker line at the
//! very start of the text. Parsing never fails: an absent or malformed block
//! yields empty metadata with the original text preserved as the body, so
//! document content is never lost to a bad header.

use serde_yaml::{Mapping, Value};

/// Marker line delimiting the metadata block
const MARKER: &str = "---";

/// Opening marker including its line terminator
const MARKER_OPEN: &str = "---\n";

/// A parsed source document: ordered metadata plus body text.
///
/// Documents are transient; one is constructed per source file read and
/// discarded after conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Ordered metadata mapping; empty when the source had no parseable block
    pub metadata: Mapping,
    /// Everything after the closing marker line, or the whole text when no
    /// block was recognized
    pub body: String,
    /// Raw header payload as it appeared in the source, kept so that
    /// re-serialization reproduces the original text byte-for-byte
    header: Option<String>,
}

impl Document {
    /// Parse raw text into metadata and body.
    ///
    /// The metadata block must start at the first byte of the text. A
    /// missing or unterminated marker pair, or a payload that is not a YAML
    /// mapping, is recovered locally: the result carries empty metadata and
    /// the original text unchanged.
    pub fn parse(text: &str) -> Self {
        let Some(rest) = text.strip_prefix(MARKER_OPEN) else {
            return Self::plain(text);
        };

        // The closing marker must occupy a full line of its own; a marker
        // cut short by end-of-text is recovered as plain body so the text
        // survives a parse/re-emit cycle unchanged.
        let (payload, body) = if let Some(idx) = rest.find("\n---\n") {
            (&rest[..idx], &rest[idx + 5..])
        } else {
            return Self::plain(text);
        };

        match serde_yaml::from_str::<Mapping>(payload) {
            Ok(metadata) => Self {
                metadata,
                body: body.to_string(),
                header: Some(payload.to_string()),
            },
            Err(e) => {
                tracing::warn!("malformed metadata block recovered as body: {}", e);
                Self::plain(text)
            }
        }
    }

    fn plain(text: &str) -> Self {
        Self {
            metadata: Mapping::new(),
            body: text.to_string(),
            header: None,
        }
    }

    /// Whether a metadata block was recognized in the source.
    pub fn has_metadata(&self) -> bool {
        self.header.is_some()
    }

    /// String value of a top-level metadata field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// String items of a top-level sequence field, in document order.
    ///
    /// A missing field or a non-sequence value yields an empty list.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.metadata
            .get(key)
            .and_then(Value::as_sequence)
            .map(|seq| {
                seq.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Per-target override value from the nested `tools` map,
    /// e.g. `tools.gemini-cli.trigger`.
    pub fn tool_override(&self, tool: &str, key: &str) -> Option<&str> {
        self.metadata
            .get("tools")
            .and_then(|tools| tools.get(tool))
            .and_then(|entry| entry.get(key))
            .and_then(Value::as_str)
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.header {
            Some(payload) => write!(f, "{MARKER}\n{payload}\n{MARKER}\n{}", self.body),
            None => write!(f, "{}", self.body),
        }
    }
}
