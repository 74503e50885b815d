//! Slide-level types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BlockRecord, MediaKind};

/// Text of the placeholder slide emitted for an empty document.
pub const EMPTY_DOCUMENT_TEXT: &str = "Empty Canvas";

/// Text of the placeholder used when a slide renders to nothing.
pub const EMPTY_SLIDE_TEXT: &str = "Empty slide";

/// Text of the placeholder emitted when the host cannot be read.
pub const HOST_ERROR_TEXT: &str = "Error: Could not access document";

/// An intermediate grouping produced by one pipeline stage.
pub type Section<'a> = Vec<BlockRecord<'a>>;

/// The terminal grouping of blocks that becomes one rendered slide.
#[derive(Debug, Clone)]
pub struct Slide<'a> {
    /// Blocks in document order
    pub blocks: Vec<BlockRecord<'a>>,

    placeholder: bool,
}

impl<'a> Slide<'a> {
    /// Create a slide from a block group.
    pub fn new(blocks: Vec<BlockRecord<'a>>) -> Self {
        Self {
            blocks,
            placeholder: false,
        }
    }

    /// The synthetic slide emitted for a document with no content.
    pub fn placeholder() -> Self {
        Self {
            blocks: vec![BlockRecord::placeholder(EMPTY_DOCUMENT_TEXT)],
            placeholder: true,
        }
    }

    /// Whether this slide is the synthetic empty-document placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Number of blocks on the slide.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the slide holds no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Check if every block on the slide is empty.
    pub fn is_blank(&self) -> bool {
        self.blocks.iter().all(BlockRecord::is_empty)
    }

    /// The atomic media block, if this is a singleton media slide.
    pub fn media_block(&self) -> Option<&BlockRecord<'a>> {
        match self.blocks.as_slice() {
            [only] if only.is_atomic() => Some(only),
            _ => None,
        }
    }

    /// Text of the first heading on the slide.
    pub fn title(&self) -> Option<&str> {
        self.blocks
            .iter()
            .find(|b| b.kind.is_heading())
            .map(|b| b.text.as_str())
    }
}

/// Rendered content of one slide, handed to the presentation runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlideContent {
    /// A self-contained HTML fragment
    Html {
        /// Fragment markup
        content: String,
    },

    /// A media slide for a specialized renderer
    Media {
        /// Media subkind
        kind: MediaKind,
        /// Display title
        title: String,
        /// Opaque structured payload from the originating block
        payload: Value,
    },
}

impl SlideContent {
    /// Create an HTML slide.
    pub fn html(content: impl Into<String>) -> Self {
        SlideContent::Html {
            content: content.into(),
        }
    }

    /// Check if this is an HTML slide.
    pub fn is_html(&self) -> bool {
        matches!(self, SlideContent::Html { .. })
    }

    /// Check if this is a media slide.
    pub fn is_media(&self) -> bool {
        matches!(self, SlideContent::Media { .. })
    }

    /// HTML markup, if this is an HTML slide.
    pub fn as_html(&self) -> Option<&str> {
        match self {
            SlideContent::Html { content } => Some(content),
            SlideContent::Media { .. } => None,
        }
    }
}
