//! Payloads for atomic media slides.

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::model::{BlockRecord, MediaKind, Node, SlideContent};

/// Render a singleton media block into a media slide.
///
/// Malformed payload data never fails the slide: the field falls back to its
/// empty value and a warning is logged.
pub fn render_media(block: &BlockRecord<'_>, kind: MediaKind) -> SlideContent {
    let node = block.node();
    let payload = match kind {
        MediaKind::Whiteboard => json_prop(node, "data", json!({})),
        MediaKind::Spreadsheet => json!({
            "columns": json_prop(node, "columns", json!([])),
            "data": json_prop(node, "data", json!([])),
        }),
        MediaKind::Diagram => {
            let code = node
                .prop_str("code")
                .map(str::to_string)
                .unwrap_or_else(|| block.text.clone());
            json!({ "code": code })
        }
    };

    SlideContent::Media {
        kind,
        title: media_title(node, kind),
        payload,
    }
}

/// Display title of a media block.
pub fn media_title(node: &Node, kind: MediaKind) -> String {
    node.prop_str("title")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(kind.default_title())
        .to_string()
}

/// Parse serialized media data.
pub fn parse_payload(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(|e| Error::InvalidPayload(e.to_string()))
}

/// A JSON-valued prop that may be stored serialized as a string.
fn json_prop(node: &Node, key: &str, default: Value) -> Value {
    match node.props.get(key) {
        None | Some(Value::Null) => default,
        Some(Value::String(raw)) if raw.trim().is_empty() => default,
        Some(Value::String(raw)) => match parse_payload(raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{} block '{}': {}", node.kind, key, e);
                default
            }
        },
        Some(value) => value.clone(),
    }
}
