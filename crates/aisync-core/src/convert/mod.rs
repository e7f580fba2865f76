//! Per-target format converters
//!
//! Each target consumes documents in its own shape. A converter is a pure
//! function from a parsed [`Document`] to a [`ConversionResult`]; the tree
//! mirror decides where and whether the result lands on disk. Dispatch is a
//! tagged variant held by the target registry, never a name string.

mod manifest;
mod mirror;
mod settings;

pub use settings::SettingsBuilder;

use aisync_fs::NormalizedPath;

use crate::document::Document;

/// Mapping from a source metadata field to its name in the target's schema.
#[derive(Debug, Clone)]
pub struct FieldMap {
    pub source: &'static str,
    pub output: &'static str,
}

impl FieldMap {
    /// Field kept under the same name in the target schema.
    pub const fn keep(name: &'static str) -> Self {
        Self {
            source: name,
            output: name,
        }
    }
}

/// Outcome of converting one document for one target.
///
/// Skip accounting (filtered files, protected destinations) lives with the
/// callers that make those decisions: `MirrorStats` and `RenderedOutput`.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Where the converted content belongs
    pub destination: NormalizedPath,
    /// The converted file content
    pub content: String,
    /// False until the writer has placed the content at the destination
    pub written: bool,
}

/// A format converter, one variant per target output shape.
#[derive(Debug, Clone)]
pub enum Converter {
    /// Markdown command into a TOML command manifest, one file per document.
    /// `override_key` names the entry of the document's per-target override
    /// map that feeds the manifest's override table.
    Manifest { override_key: &'static str },

    /// Document mirrored into the same markup family: the metadata block is
    /// rewritten to the target's field subset, the body is reproduced
    /// unchanged. An empty field list mirrors the document verbatim, which
    /// is also the path taken by non-document files without a metadata
    /// block.
    Mirror {
        fields: Vec<FieldMap>,
        override_key: Option<&'static str>,
    },
}

impl Converter {
    /// Convert one document.
    ///
    /// `source_name` is the source file name (used for the manifest's
    /// fallback command name and for the destination name); `dest_dir` is
    /// the mirrored destination directory.
    pub fn convert(
        &self,
        doc: &Document,
        source_name: &str,
        dest_dir: &NormalizedPath,
    ) -> ConversionResult {
        let stem = file_stem(source_name);

        let (out_name, content) = match self {
            Self::Manifest { override_key } => (
                format!("{stem}.toml"),
                manifest::convert(doc, stem, override_key),
            ),
            Self::Mirror {
                fields,
                override_key,
            } => (
                source_name.to_string(),
                mirror::convert(doc, fields, *override_key),
            ),
        };

        ConversionResult {
            destination: dest_dir.join(&out_name),
            content,
            written: false,
        }
    }
}

fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}
