//! Splitting at manual slide breaks.

use crate::model::{BlockRecord, Section};

/// Split blocks into sections at separator markers.
///
/// Separators are consumed. Runs between adjacent separators are dropped, so
/// input made only of separators yields no sections at all.
pub fn split_by_separators(blocks: Vec<BlockRecord<'_>>) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();

    for block in blocks {
        if block.is_separator() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(block);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}
