//! Slide segmentation pipeline.
//!
//! Blocks flow strictly forward through the stages:
//!
//! 1. [`collect_blocks`] flattens the host tree into block records
//! 2. [`trim_leading_empty`] drops blank blocks at the start of the document
//! 3. [`split_by_separators`] cuts at manual slide breaks
//! 4. [`isolate_atomic`] gives every media block its own slide
//! 5. [`split_by_headings`] cuts at H1/H2 boundaries
//! 6. [`split_overflow`] splits groups too heavy for one slide
//! 7. [`drop_blank_slides`] removes blank slides, keeping at least one

mod atomic;
mod collect;
mod filter;
mod heading;
mod options;
mod overflow;
mod separator;
mod weight;

pub use atomic::isolate_atomic;
pub use collect::collect_blocks;
pub use filter::{drop_blank_slides, trim_leading_empty};
pub use heading::{has_nested_structure, split_by_headings};
pub use options::{OverflowStrategy, SegmentOptions, MAX_BLOCKS_PER_SLIDE, MAX_WEIGHT_PER_SLIDE};
pub use overflow::{split_by_block_count, split_by_weight, split_overflow};
pub use separator::split_by_separators;
pub use weight::{section_weight, StaticWeight, WeightEstimator};

use serde::{Deserialize, Serialize};

use crate::model::{Node, Slide};

/// Counters collected while segmenting one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentStats {
    /// Content blocks found in the host tree
    pub blocks_collected: usize,

    /// Leading empty blocks dropped
    pub blocks_trimmed: usize,

    /// Manual slide breaks consumed
    pub separators: usize,

    /// Extra slides created because a group was too long
    pub overflow_splits: usize,

    /// Slides produced
    pub slides: usize,
}

/// Output of one segmentation run.
#[derive(Debug, Clone)]
pub struct Segmentation<'a> {
    /// Slides in presentation order (never empty)
    pub slides: Vec<Slide<'a>>,

    /// Run counters
    pub stats: SegmentStats,
}

/// Runs the segmentation pipeline with a fixed configuration.
pub struct Segmenter {
    options: SegmentOptions,
    estimator: Box<dyn WeightEstimator>,
}

impl Segmenter {
    /// Create a segmenter using the static weight heuristic.
    pub fn new(options: SegmentOptions) -> Self {
        Self {
            options,
            estimator: Box::new(StaticWeight::default()),
        }
    }

    /// Replace the weight estimator.
    pub fn with_estimator(self, estimator: impl WeightEstimator + 'static) -> Self {
        self.with_boxed_estimator(Box::new(estimator))
    }

    /// Replace the weight estimator with an already boxed one.
    pub fn with_boxed_estimator(mut self, estimator: Box<dyn WeightEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    /// The active options.
    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Split a host block tree into slides.
    pub fn run<'a>(&self, nodes: &'a [Node]) -> Segmentation<'a> {
        let mut stats = SegmentStats::default();

        let mut blocks = collect_blocks(nodes);
        stats.blocks_collected = blocks.len();
        stats.blocks_trimmed = trim_leading_empty(&mut blocks);
        stats.separators = blocks.iter().filter(|b| b.is_separator()).count();
        log::debug!(
            "Collected {} blocks ({} trimmed, {} separators)",
            stats.blocks_collected,
            stats.blocks_trimmed,
            stats.separators
        );

        let sections = split_by_separators(blocks);
        log::debug!("Split into {} separator sections", sections.len());

        let mut slides = Vec::new();
        for section in sections {
            for part in isolate_atomic(section) {
                if part.len() == 1 && part[0].is_atomic() {
                    slides.push(Slide::new(part));
                    continue;
                }
                for group in split_by_headings(part) {
                    let runs = split_overflow(group, &self.options, self.estimator.as_ref());
                    stats.overflow_splits += runs.len().saturating_sub(1);
                    slides.extend(runs.into_iter().map(Slide::new));
                }
            }
        }

        let slides = drop_blank_slides(slides);
        stats.slides = slides.len();
        log::debug!(
            "Segmented into {} slides ({} overflow splits)",
            stats.slides,
            stats.overflow_splits
        );

        Segmentation { slides, stats }
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(SegmentOptions::default())
    }
}

impl std::fmt::Debug for Segmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Segmenter")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Split a host block tree into slides with the static weight heuristic.
pub fn segment<'a>(nodes: &'a [Node], options: &SegmentOptions) -> Vec<Slide<'a>> {
    Segmenter::new(options.clone()).run(nodes).slides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockKind, MediaKind, EMPTY_DOCUMENT_TEXT};

    fn texts(slides: &[Slide<'_>]) -> Vec<Vec<String>> {
        slides
            .iter()
            .map(|s| s.blocks.iter().map(|b| b.text.clone()).collect())
            .collect()
    }

    #[test]
    fn test_empty_document() {
        let slides = segment(&[], &SegmentOptions::default());
        assert_eq!(slides.len(), 1);
        assert!(slides[0].is_placeholder());
        assert_eq!(slides[0].blocks[0].text, EMPTY_DOCUMENT_TEXT);
    }

    #[test]
    fn test_separator_then_headings() {
        let nodes = vec![
            Node::heading(1, "Intro"),
            Node::paragraph("hello"),
            Node::divider(),
            Node::heading(1, "Next"),
            Node::paragraph("world"),
        ];
        let slides = segment(&nodes, &SegmentOptions::default());
        assert_eq!(
            texts(&slides),
            vec![vec!["Intro", "hello"], vec!["Next", "world"]]
        );
    }

    #[test]
    fn test_media_between_headings() {
        let nodes = vec![
            Node::heading(1, "Drawing"),
            Node::whiteboard("Sketch", "{}"),
            Node::paragraph("notes"),
        ];
        let slides = segment(&nodes, &SegmentOptions::default());
        assert_eq!(slides.len(), 3);
        assert_eq!(
            slides[1].blocks[0].kind,
            BlockKind::AtomicMedia(MediaKind::Whiteboard)
        );
        assert!(slides[1].media_block().is_some());
    }

    #[test]
    fn test_stats_and_custom_estimator() {
        let nodes: Vec<_> = std::iter::once(Node::paragraph(""))
            .chain((0..6).map(|i| Node::paragraph(format!("p{i}"))))
            .chain(std::iter::once(Node::divider()))
            .chain(std::iter::once(Node::paragraph("tail")))
            .collect();
        let segmenter = Segmenter::default().with_estimator(|_: &crate::model::BlockRecord<'_>| 8.0);
        let result = segmenter.run(&nodes);

        assert_eq!(result.stats.blocks_collected, 9);
        assert_eq!(result.stats.blocks_trimmed, 1);
        assert_eq!(result.stats.separators, 1);
        // Six blocks of weight 8 pack two per slide.
        assert_eq!(result.stats.overflow_splits, 2);
        assert_eq!(result.stats.slides, 4);
        assert_eq!(result.slides.len(), 4);
    }

    #[test]
    fn test_glyph_paragraph_with_children_is_content() {
        let nodes = vec![
            Node::paragraph("a"),
            Node::paragraph("***").with_child(Node::paragraph("nested")),
            Node::paragraph("b"),
        ];
        let result = Segmenter::default().run(&nodes);
        assert_eq!(result.stats.separators, 0);
        assert_eq!(texts(&result.slides), vec![vec!["a", "***", "b"]]);
        assert_eq!(result.slides[0].blocks[1].nested, 1);
    }

    #[test]
    fn test_blank_interior_slide_dropped() {
        let nodes = vec![
            Node::paragraph("a"),
            Node::divider(),
            Node::paragraph(" "),
            Node::divider(),
            Node::paragraph("b"),
        ];
        let slides = segment(&nodes, &SegmentOptions::default());
        assert_eq!(texts(&slides), vec![vec!["a"], vec!["b"]]);
    }
}
