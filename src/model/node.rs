//! Host document tree types.
//!
//! These mirror the block JSON produced by the editor: every block carries a
//! `type` tag, free-form `props`, optional inline or table content, and nested
//! `children`. Nothing here interprets the tree; see [`crate::segment`].
//!
//! Deserialization is lenient below the document level: a block that is not
//! an object is dropped, and a malformed `props`, `content` or `children`
//! field falls back to an empty value. Only a document that is not a block
//! list at all fails to parse.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Deepest block nesting the collector and renderer descend into.
///
/// Blocks nested deeper are left out. Parsed JSON never gets this deep
/// because `serde_json` stops at 128 levels of JSON nesting and each block
/// level takes two of them.
pub const MAX_NESTING_DEPTH: usize = 48;

/// A host document: the ordered top-level block list.
///
/// Deserializes from either `{"blocks": [...]}` or a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DocumentRepr")]
pub struct Document {
    /// Top-level blocks in document order
    pub blocks: Vec<Node>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentRepr {
    Wrapped { blocks: Vec<Value> },
    Bare(Vec<Value>),
}

impl From<DocumentRepr> for Document {
    fn from(repr: DocumentRepr) -> Self {
        match repr {
            DocumentRepr::Wrapped { blocks } | DocumentRepr::Bare(blocks) => Self {
                blocks: nodes_from_values(blocks),
            },
        }
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Create a document from a block list.
    pub fn from_blocks(blocks: Vec<Node>) -> Self {
        Self { blocks }
    }

    /// Parse a document from editor JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidDocument(e.to_string()))
    }

    /// Read and parse a document from an editor JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Add a block to the end of the document.
    pub fn add_block(&mut self, block: Node) {
        self.blocks.push(block);
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of top-level blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

/// A single block node in the host tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Host block identifier
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Block type tag (e.g. "paragraph", "heading", "whiteboard")
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: String,

    /// Type-specific properties
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Map::is_empty"
    )]
    pub props: Map<String, Value>,

    /// Inline or table content
    #[serde(
        default,
        deserialize_with = "lenient_content",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<NodeContent>,

    /// Structurally nested blocks
    #[serde(
        default,
        deserialize_with = "lenient_children",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node with the given type tag and no content.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Create a paragraph with plain text.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new("paragraph").with_text(text)
    }

    /// Create a heading of the given level.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new("heading")
            .with_prop("level", level)
            .with_text(text)
    }

    /// Create a bulleted list item.
    pub fn bullet(text: impl Into<String>) -> Self {
        Self::new("bulletListItem").with_text(text)
    }

    /// Create a numbered list item.
    pub fn numbered(text: impl Into<String>) -> Self {
        Self::new("numberedListItem").with_text(text)
    }

    /// Create a code block.
    pub fn code(language: impl Into<String>, source: impl Into<String>) -> Self {
        let language: String = language.into();
        Self::new("codeBlock")
            .with_prop("language", language)
            .with_text(source)
    }

    /// Create a quote block.
    pub fn quote(text: impl Into<String>) -> Self {
        Self::new("quote").with_text(text)
    }

    /// Create an image block.
    pub fn image(url: impl Into<String>, caption: impl Into<String>) -> Self {
        let (url, caption): (String, String) = (url.into(), caption.into());
        Self::new("image")
            .with_prop("url", url)
            .with_prop("caption", caption)
    }

    /// Create a divider block.
    pub fn divider() -> Self {
        Self::new("divider")
    }

    /// Create a table from rows of cell text.
    pub fn table<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| TableRow {
                cells: row
                    .into_iter()
                    .map(|text| TableCell::Inline(vec![InlineContent::text(text)]))
                    .collect(),
            })
            .collect();
        Self {
            kind: "table".to_string(),
            content: Some(NodeContent::Table(TableContent {
                rows,
                header_rows: None,
            })),
            ..Default::default()
        }
    }

    /// Create a whiteboard block with serialized scene data.
    pub fn whiteboard(title: impl Into<String>, data: impl Into<String>) -> Self {
        let (title, data): (String, String) = (title.into(), data.into());
        Self::new("whiteboard")
            .with_prop("title", title)
            .with_prop("data", data)
    }

    /// Set a property and return self.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Replace the content with a single plain text run.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_content(vec![InlineContent::text(text)])
    }

    /// Replace the content with inline runs.
    pub fn with_content(mut self, content: Vec<InlineContent>) -> Self {
        self.content = Some(NodeContent::Inline(content));
        self
    }

    /// Append a nested child block.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Set the block identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Get a string property.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    /// Get a numeric property, accepting numbers or numeric strings.
    pub fn prop_u64(&self, key: &str) -> Option<u64> {
        match self.props.get(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Get a boolean property.
    pub fn prop_bool(&self, key: &str) -> Option<bool> {
        self.props.get(key).and_then(Value::as_bool)
    }

    /// Inline content, if this node carries any.
    pub fn inline(&self) -> &[InlineContent] {
        match &self.content {
            Some(NodeContent::Inline(content)) => content,
            _ => &[],
        }
    }

    /// Table content, if this node is a table.
    pub fn table_content(&self) -> Option<&TableContent> {
        match &self.content {
            Some(NodeContent::Table(table)) => Some(table),
            _ => None,
        }
    }

    /// Get plain text content of the node (children excluded).
    pub fn plain_text(&self) -> String {
        match &self.content {
            Some(NodeContent::Inline(content)) => plain_text(content),
            Some(NodeContent::Table(table)) => table.plain_text(),
            None => String::new(),
        }
    }

    /// Count of all nested descendant blocks.
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut pending: Vec<&Node> = self.children.iter().collect();
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter());
        }
        count
    }
}

/// Parse blocks one by one, dropping the ones that are not blocks.
fn nodes_from_values(values: Vec<Value>) -> Vec<Node> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(node) => Some(node),
            Err(e) => {
                log::warn!("Dropping malformed block: {}", e);
                None
            }
        })
        .collect()
}

/// Deserialize a field, replacing a null or malformed value with the default.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        log::warn!("Malformed block field replaced with default: {}", e);
        T::default()
    }))
}

/// Block content also accepts a bare string as one unstyled run.
fn lenient_content<'de, D>(deserializer: D) -> std::result::Result<Option<NodeContent>, D::Error>
where
    D: Deserializer<'de>,
{
    let content = match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(NodeContent::Inline(vec![InlineContent::text(text)])),
        value => match serde_json::from_value(value) {
            Ok(content) => Some(content),
            Err(e) => {
                log::warn!("Malformed block content dropped: {}", e);
                None
            }
        },
    };
    Ok(content)
}

fn lenient_children<'de, D>(deserializer: D) -> std::result::Result<Vec<Node>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(values) => Ok(nodes_from_values(values)),
        Value::Null => Ok(Vec::new()),
        other => {
            log::warn!("Ignoring non-array children: {}", other);
            Ok(Vec::new())
        }
    }
}

/// Block content: inline runs or a table grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeContent {
    /// Inline text runs and links
    Inline(Vec<InlineContent>),

    /// Table rows
    Table(TableContent),
}

/// Inline content within a block.
///
/// A bare JSON string deserializes as an unstyled text run, and any item that
/// is neither a string nor a recognised inline object becomes
/// [`InlineContent::Unsupported`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", from = "InlineRepr")]
pub enum InlineContent {
    /// A styled text run
    Text {
        /// The text content
        #[serde(default)]
        text: String,
        /// Text styling
        #[serde(default)]
        styles: Styles,
    },

    /// A hyperlink wrapping inline content
    Link {
        /// Link target
        #[serde(default)]
        href: String,
        /// Link text runs
        #[serde(default)]
        content: Vec<InlineContent>,
    },

    /// Any inline node this crate does not understand (mentions, custom inline)
    Unsupported,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InlineRepr {
    Plain(String),
    Tagged(TaggedInline),
    Unknown(serde::de::IgnoredAny),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TaggedInline {
    Text {
        #[serde(default)]
        text: String,
        #[serde(default, deserialize_with = "lenient")]
        styles: Styles,
    },
    Link {
        #[serde(default)]
        href: String,
        #[serde(default)]
        content: Vec<InlineContent>,
    },
    #[serde(other)]
    Unsupported,
}

impl From<InlineRepr> for InlineContent {
    fn from(repr: InlineRepr) -> Self {
        match repr {
            InlineRepr::Plain(text) => InlineContent::text(text),
            InlineRepr::Tagged(TaggedInline::Text { text, styles }) => {
                InlineContent::Text { text, styles }
            }
            InlineRepr::Tagged(TaggedInline::Link { href, content }) => {
                InlineContent::Link { href, content }
            }
            InlineRepr::Tagged(TaggedInline::Unsupported) | InlineRepr::Unknown(_) => {
                InlineContent::Unsupported
            }
        }
    }
}

impl InlineContent {
    /// Create an unstyled text run.
    pub fn text(text: impl Into<String>) -> Self {
        InlineContent::Text {
            text: text.into(),
            styles: Styles::default(),
        }
    }

    /// Create a styled text run.
    pub fn styled(text: impl Into<String>, styles: Styles) -> Self {
        InlineContent::Text {
            text: text.into(),
            styles,
        }
    }

    /// Create a link with plain text.
    pub fn link(href: impl Into<String>, text: impl Into<String>) -> Self {
        InlineContent::Link {
            href: href.into(),
            content: vec![InlineContent::text(text)],
        }
    }

    /// Get plain text of this item.
    pub fn plain_text(&self) -> String {
        match self {
            InlineContent::Text { text, .. } => text.clone(),
            InlineContent::Link { content, .. } => plain_text(content),
            InlineContent::Unsupported => String::new(),
        }
    }
}

/// Concatenate the plain text of inline runs.
pub fn plain_text(content: &[InlineContent]) -> String {
    content.iter().map(InlineContent::plain_text).collect()
}

/// Inline text styling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Styles {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strike: bool,

    /// Inline code
    pub code: bool,

    /// Text color name or value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,

    /// Background/highlight color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl Styles {
    /// Bold styling.
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    /// Italic styling.
    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Default::default()
        }
    }

    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold
            || self.italic
            || self.underline
            || self.strike
            || self.code
            || self.text_color.is_some()
            || self.background_color.is_some()
    }
}

/// Table block content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableContent {
    /// Rows in the table
    #[serde(default)]
    pub rows: Vec<TableRow>,

    /// Number of header rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_rows: Option<u32>,
}

impl TableContent {
    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(TableRow::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(TableCell::plain_text)
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell, either a bare inline array or a cell object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableCell {
    /// Bare inline content
    Inline(Vec<InlineContent>),

    /// Cell object with its own props
    Cell {
        /// Cell content
        #[serde(default)]
        content: Vec<InlineContent>,
        /// Cell properties (colspan, alignment, ...)
        #[serde(default, skip_serializing_if = "Map::is_empty")]
        props: Map<String, Value>,
    },
}

impl TableCell {
    /// Inline content of the cell.
    pub fn content(&self) -> &[InlineContent] {
        match self {
            TableCell::Inline(content) | TableCell::Cell { content, .. } => content,
        }
    }

    /// Get plain text of the cell.
    pub fn plain_text(&self) -> String {
        plain_text(self.content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_wrapped_json() {
        let doc = Document::from_json(
            r#"{"blocks": [{"type": "paragraph", "content": [{"type": "text", "text": "hi", "styles": {}}]}]}"#,
        )
        .unwrap();
        assert_eq!(doc.block_count(), 1);
        assert_eq!(doc.blocks[0].plain_text(), "hi");
    }

    #[test]
    fn test_document_from_bare_array() {
        let doc = Document::from_json(r#"[{"type": "divider"}, {"type": "paragraph"}]"#).unwrap();
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.blocks[0].kind, "divider");
        assert!(doc.blocks[1].content.is_none());
    }

    #[test]
    fn test_document_invalid_json() {
        let result = Document::from_json("{\"blocks\": 3}");
        assert!(matches!(result, Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn test_lenient_block_fields() {
        let doc = Document::from_json(
            r#"[
                {"type": "paragraph", "content": ["hello", {"type": "text", "text": " world"}]},
                {"type": "paragraph", "content": "plain"},
                {"type": "heading", "props": null, "content": [{"type": "text", "text": "T"}]},
                {"type": "quote", "content": 42, "children": "nope"},
                {"type": "paragraph", "content": [{"type": "text", "text": "x", "styles": null}]}
            ]"#,
        )
        .unwrap();

        assert_eq!(doc.block_count(), 5);
        assert_eq!(doc.blocks[0].plain_text(), "hello world");
        assert_eq!(doc.blocks[1].plain_text(), "plain");
        assert!(doc.blocks[2].props.is_empty());
        assert_eq!(doc.blocks[2].plain_text(), "T");
        assert!(doc.blocks[3].content.is_none());
        assert!(doc.blocks[3].children.is_empty());
        assert_eq!(doc.blocks[4].plain_text(), "x");
    }

    #[test]
    fn test_non_object_blocks_dropped() {
        let doc = Document::from_json(
            r#"{"blocks": ["stray", {"type": "paragraph", "content": "kept"}, null,
                {"type": "bulletListItem", "children": [7, {"type": "paragraph"}]}]}"#,
        )
        .unwrap();
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.blocks[0].plain_text(), "kept");
        assert_eq!(doc.blocks[1].children.len(), 1);
    }

    #[test]
    fn test_unknown_inline_objects() {
        let node: Node = serde_json::from_str(
            r#"{"type": "paragraph", "content": [{"text": "no tag"}, 3, {"type": "text", "text": "ok"}]}"#,
        )
        .unwrap();
        assert_eq!(node.inline().len(), 3);
        assert_eq!(node.inline()[0], InlineContent::Unsupported);
        assert_eq!(node.plain_text(), "ok");
    }

    #[test]
    fn test_descendant_count_deep_chain() {
        let mut node = Node::paragraph("leaf");
        for _ in 0..500 {
            node = Node::new("column").with_child(node);
        }
        assert_eq!(node.descendant_count(), 500);
    }

    #[test]
    fn test_document_from_missing_file() {
        let result = Document::from_file("does/not/exist.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_link_text_is_flattened() {
        let node = Node::paragraph("").with_content(vec![
            InlineContent::text("see "),
            InlineContent::link("https://example.com", "docs"),
        ]);
        assert_eq!(node.plain_text(), "see docs");
    }

    #[test]
    fn test_unknown_inline_is_tolerated() {
        let node: Node = serde_json::from_str(
            r#"{"type": "paragraph", "content": [{"type": "mention", "user": "a"}, {"type": "text", "text": "x"}]}"#,
        )
        .unwrap();
        assert_eq!(node.inline().len(), 2);
        assert_eq!(node.plain_text(), "x");
    }

    #[test]
    fn test_table_content_from_json() {
        let node: Node = serde_json::from_str(
            r#"{"type": "table", "content": {"type": "tableContent", "headerRows": 1, "rows": [
                {"cells": [[{"type": "text", "text": "a"}], {"type": "tableCell", "content": [{"type": "text", "text": "b"}]}]}
            ]}}"#,
        )
        .unwrap();
        let table = node.table_content().unwrap();
        assert_eq!(table.header_rows, Some(1));
        assert_eq!(table.row_count(), 1);
        assert_eq!(node.plain_text(), "a\tb");
    }

    #[test]
    fn test_styles_camel_case() {
        let styles: Styles =
            serde_json::from_str(r#"{"bold": true, "textColor": "red"}"#).unwrap();
        assert!(styles.bold);
        assert_eq!(styles.text_color.as_deref(), Some("red"));
        assert!(styles.has_styling());
        assert!(!Styles::default().has_styling());
    }

    #[test]
    fn test_prop_accessors() {
        let node = Node::heading(2, "Title").with_prop("flag", true);
        assert_eq!(node.prop_u64("level"), Some(2));
        assert_eq!(node.prop_bool("flag"), Some(true));
        assert_eq!(node.prop_str("missing"), None);

        let node = Node::new("heading").with_prop("level", "3");
        assert_eq!(node.prop_u64("level"), Some(3));
    }

    #[test]
    fn test_descendant_count() {
        let node = Node::bullet("a")
            .with_child(Node::bullet("b").with_child(Node::bullet("c")))
            .with_child(Node::bullet("d"));
        assert_eq!(node.descendant_count(), 3);
    }
}
