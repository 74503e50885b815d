//! Block records: the unit of segmentation.

use std::cell::OnceCell;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Node;

/// Break glyphs that turn a paragraph into a manual separator.
pub const BREAK_GLYPHS: [&str; 5] = ["---", "***", "___", "\u{2014}", "- - -"];

/// The kind of a block as seen by the segmentation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// A heading (level 1-6)
    Heading {
        /// Heading level
        level: u8,
    },

    /// A plain paragraph
    Paragraph,

    /// A list item
    ListItem(ListKind),

    /// A code block
    CodeBlock,

    /// A table
    Table,

    /// A block quote
    Quote,

    /// An image
    Image,

    /// A media block that must occupy its own slide
    AtomicMedia(MediaKind),

    /// A divider or horizontal rule
    SeparatorMarker,

    /// A content block type this crate has no renderer for
    Other(String),
}

impl BlockKind {
    /// Resolve a host type tag into a block kind.
    ///
    /// Returns `None` for wrapper and slide-container tags, which never
    /// become records.
    pub fn from_node(node: &Node) -> Option<Self> {
        let kind = match node.kind.as_str() {
            "heading" => BlockKind::Heading {
                level: node
                    .prop_u64("level")
                    .map(|l| l.clamp(1, 6) as u8)
                    .unwrap_or(1),
            },
            "paragraph" => BlockKind::Paragraph,
            "bulletListItem" => BlockKind::ListItem(ListKind::Bullet),
            "numberedListItem" => BlockKind::ListItem(ListKind::Numbered),
            "checkListItem" => BlockKind::ListItem(ListKind::Check),
            "codeBlock" => BlockKind::CodeBlock,
            "table" => BlockKind::Table,
            "quote" => BlockKind::Quote,
            "image" => BlockKind::Image,
            "whiteboard" => BlockKind::AtomicMedia(MediaKind::Whiteboard),
            "spreadsheet" => BlockKind::AtomicMedia(MediaKind::Spreadsheet),
            "diagram" | "mermaid" => BlockKind::AtomicMedia(MediaKind::Diagram),
            "horizontalRule" | "divider" => BlockKind::SeparatorMarker,
            tag if is_wrapper(tag) || is_slide_container(tag) => return None,
            other => BlockKind::Other(other.to_string()),
        };
        Some(kind)
    }

    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            BlockKind::Heading { level } => Some(*level),
            _ => None,
        }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, BlockKind::Heading { .. })
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self, BlockKind::ListItem(_))
    }

    /// Check if this is an atomic media block.
    pub fn is_atomic(&self) -> bool {
        matches!(self, BlockKind::AtomicMedia(_))
    }
}

/// Tags of nodes that only group other blocks.
pub fn is_wrapper(tag: &str) -> bool {
    matches!(tag, "columnList" | "column" | "blockGroup" | "blockContainer")
}

/// Tags of this engine's own output containers.
pub fn is_slide_container(tag: &str) -> bool {
    matches!(tag, "slideshow" | "slide")
}

/// List item flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Unordered bullet item
    Bullet,
    /// Ordered (numbered) item
    Numbered,
    /// Checkbox item
    Check,
}

impl ListKind {
    /// Whether items of this kind render inside an ordered list.
    pub fn is_ordered(self) -> bool {
        matches!(self, ListKind::Numbered)
    }
}

/// Atomic media subkind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A drawing canvas
    Whiteboard,
    /// A spreadsheet grid
    Spreadsheet,
    /// A diagram (e.g. mermaid source)
    Diagram,
}

impl MediaKind {
    /// Title used when the block carries none.
    pub fn default_title(self) -> &'static str {
        match self {
            MediaKind::Whiteboard => "Untitled Whiteboard",
            MediaKind::Spreadsheet => "Untitled Spreadsheet",
            MediaKind::Diagram => "Untitled Diagram",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaKind::Whiteboard => "whiteboard",
            MediaKind::Spreadsheet => "spreadsheet",
            MediaKind::Diagram => "diagram",
        };
        f.write_str(name)
    }
}

/// One top-level content block, borrowed from the host document.
///
/// The record caches what segmentation needs (kind, text, nesting) and keeps
/// a reference to the host node for the renderer. Its estimated weight is
/// computed on first use and cached.
#[derive(Debug, Clone)]
pub struct BlockRecord<'a> {
    /// Block kind
    pub kind: BlockKind,

    /// Plain text projection of the inline content
    pub text: String,

    /// Number of structurally nested descendant blocks
    pub nested: usize,

    node: NodeRef<'a>,
    weight: OnceCell<f64>,
}

#[derive(Debug, Clone)]
enum NodeRef<'a> {
    Host(&'a Node),
    Synthetic(Box<Node>),
}

impl<'a> BlockRecord<'a> {
    /// Build a record for a host node, or `None` for wrappers and containers.
    pub fn from_node(node: &'a Node) -> Option<Self> {
        let kind = BlockKind::from_node(node)?;
        Some(Self::with_kind(kind, NodeRef::Host(node)))
    }

    /// Build a record that owns its node (placeholders).
    pub fn synthetic(node: Node) -> Self {
        let kind = BlockKind::from_node(&node).unwrap_or(BlockKind::Paragraph);
        Self::with_kind(kind, NodeRef::Synthetic(Box::new(node)))
    }

    /// A synthetic paragraph holding `text`.
    pub fn placeholder(text: &str) -> Self {
        Self::synthetic(Node::paragraph(text))
    }

    fn with_kind(kind: BlockKind, node: NodeRef<'a>) -> Self {
        let host = match &node {
            NodeRef::Host(n) => *n,
            NodeRef::Synthetic(n) => n.as_ref(),
        };
        let text = super::normalize_text(&host.plain_text());
        let nested = host.descendant_count();
        Self {
            kind,
            text,
            nested,
            node,
            weight: OnceCell::new(),
        }
    }

    /// The host node this record was collected from.
    pub fn node(&self) -> &Node {
        match &self.node {
            NodeRef::Host(n) => *n,
            NodeRef::Synthetic(n) => n.as_ref(),
        }
    }

    /// Whether this record was synthesized by the engine.
    pub fn is_synthetic(&self) -> bool {
        matches!(self.node, NodeRef::Synthetic(_))
    }

    /// Check if the block has no visible content.
    ///
    /// Only paragraphs and list items can be empty; any nested child counts
    /// as content.
    pub fn is_empty(&self) -> bool {
        match self.kind {
            BlockKind::Paragraph | BlockKind::ListItem(_) => {
                self.nested == 0 && self.text.trim().is_empty()
            }
            _ => false,
        }
    }

    /// Check if the block is a manual slide break.
    pub fn is_separator(&self) -> bool {
        match self.kind {
            BlockKind::SeparatorMarker => true,
            BlockKind::Paragraph => self.nested == 0 && BREAK_GLYPHS.contains(&self.text.trim()),
            _ => false,
        }
    }

    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        self.kind.heading_level()
    }

    /// Check if this is an atomic media block.
    pub fn is_atomic(&self) -> bool {
        self.kind.is_atomic()
    }

    /// Estimated visual weight, computed once with `estimate`.
    pub fn weight_with(&self, estimate: impl FnOnce(&Self) -> f64) -> f64 {
        *self.weight.get_or_init(|| estimate(self))
    }

    /// Cached weight, if already computed.
    pub fn cached_weight(&self) -> Option<f64> {
        self.weight.get().copied()
    }
}
