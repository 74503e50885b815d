//! Access to the host document.

use std::borrow::Cow;

use crate::error::Result;
use crate::model::{Document, Node};

/// A source of top-level document blocks.
///
/// Implementations hand out the current block tree. An `Err` means the host
/// could not be read at all; the slide generators turn it into a single error
/// slide instead of failing.
pub trait HostDocument {
    /// The top-level blocks, in document order.
    fn blocks(&self) -> Result<Cow<'_, [Node]>>;
}

impl HostDocument for Document {
    fn blocks(&self) -> Result<Cow<'_, [Node]>> {
        Ok(Cow::Borrowed(&self.blocks))
    }
}

impl HostDocument for [Node] {
    fn blocks(&self) -> Result<Cow<'_, [Node]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl HostDocument for Vec<Node> {
    fn blocks(&self) -> Result<Cow<'_, [Node]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl<T: HostDocument + ?Sized> HostDocument for &T {
    fn blocks(&self) -> Result<Cow<'_, [Node]>> {
        (**self).blocks()
    }
}

/// A host document given as serialized editor JSON.
///
/// The JSON is parsed on every call to [`HostDocument::blocks`].
#[derive(Debug, Clone, Copy)]
pub struct JsonSource<'s> {
    json: &'s str,
}

impl<'s> JsonSource<'s> {
    /// Wrap serialized document JSON.
    pub fn new(json: &'s str) -> Self {
        Self { json }
    }
}

impl HostDocument for JsonSource<'_> {
    fn blocks(&self) -> Result<Cow<'_, [Node]>> {
        let document = Document::from_json(self.json)?;
        Ok(Cow::Owned(document.blocks))
    }
}
