//! Empty-block and empty-slide filtering.

use crate::model::{BlockRecord, Slide};

/// Drop the leading run of empty blocks, returning how many were removed.
///
/// Interior and trailing empties are left alone; blank slides are removed
/// later by [`drop_blank_slides`].
pub fn trim_leading_empty(blocks: &mut Vec<BlockRecord<'_>>) -> usize {
    let leading = blocks.iter().take_while(|b| b.is_empty()).count();
    blocks.drain(..leading);
    leading
}

/// Remove slides whose blocks are all empty.
///
/// The result is never empty: when nothing survives a single placeholder
/// slide is returned in its place.
pub fn drop_blank_slides(mut slides: Vec<Slide<'_>>) -> Vec<Slide<'_>> {
    let before = slides.len();
    slides.retain(|s| !s.is_empty() && !s.is_blank());
    if slides.len() < before {
        log::debug!("Dropped {} blank slides", before - slides.len());
    }
    if slides.is_empty() {
        slides.push(Slide::placeholder());
    }
    slides
}
