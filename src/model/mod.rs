//! Document model types for segmentation.
//!
//! This module defines the host document projection (`Node` trees as the
//! editor serializes them), the block records the segmentation pipeline works
//! on, and the slide types it produces.

mod block;
mod node;
mod slide;

pub use block::{
    is_slide_container, is_wrapper, BlockKind, BlockRecord, ListKind, MediaKind, BREAK_GLYPHS,
};
pub use node::{
    plain_text, Document, InlineContent, Node, NodeContent, Styles, TableCell, TableContent,
    TableRow, MAX_NESTING_DEPTH,
};
pub use slide::{
    Section, Slide, SlideContent, EMPTY_DOCUMENT_TEXT, EMPTY_SLIDE_TEXT, HOST_ERROR_TEXT,
};

use unicode_normalization::UnicodeNormalization;

/// Normalize text to NFC so glyph comparisons and lengths are stable.
pub fn normalize_text(text: &str) -> String {
    text.nfc().collect()
}
