//! JSON rendering for slide decks.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize slides (or a whole deck result) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MediaKind, SlideContent};

    fn slides() -> Vec<SlideContent> {
        vec![
            SlideContent::html("<p class=\"bn-paragraph\">Hello</p>"),
            SlideContent::Media {
                kind: MediaKind::Whiteboard,
                title: "Board".to_string(),
                payload: serde_json::json!({}),
            },
        ]
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(slides().as_slice(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"type\": \"html\""));
        assert!(json.contains("\"kind\": \"whiteboard\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(slides().as_slice(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
        assert!(json.starts_with("[{\"type\":\"html\""));
    }
}
