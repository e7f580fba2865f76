//! Document-mirror conversion
//!
//! Used when a target consumes the same markup family as the source: the
//! metadata block is rewritten to the target's subset (with optional
//! per-target overrides and renames) and the body is reproduced unchanged.

use serde_yaml::{Mapping, Value};

use crate::convert::FieldMap;
use crate::document::Document;

/// Build the mirrored content for one document.
///
/// A document without a recognized metadata block, or a converter with no
/// declared fields, is mirrored verbatim. Otherwise the output carries a
/// fresh metadata block holding exactly the declared fields; a field the
/// document lacks becomes an empty string.
pub(super) fn convert(doc: &Document, fields: &[FieldMap], override_key: Option<&str>) -> String {
    if !doc.has_metadata() || fields.is_empty() {
        return doc.to_string();
    }

    let mut header = Mapping::new();
    for field in fields {
        let value = override_key
            .and_then(|key| doc.tool_override(key, field.source))
            .or_else(|| doc.get_str(field.source))
            .unwrap_or("");
        header.insert(
            Value::String(field.output.to_string()),
            Value::String(value.to_string()),
        );
    }

    // A non-empty mapping of strings always serializes
    let payload = serde_yaml::to_string(&header).unwrap_or_default();
    format!("---\n{payload}---\n{}", doc.body)
}
