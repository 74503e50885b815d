//! Deck result with slides and statistics.

use serde::{Deserialize, Serialize};

use crate::model::SlideContent;
use crate::segment::SegmentStats;

/// Result of turning a document into slides, including statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckResult {
    /// Rendered slides in presentation order
    pub slides: Vec<SlideContent>,

    /// Segmentation and rendering statistics
    pub stats: DeckStats,
}

impl DeckResult {
    /// Create a new deck result.
    pub fn new(slides: Vec<SlideContent>, stats: DeckStats) -> Self {
        Self { slides, stats }
    }

    /// Create a result with just slides.
    pub fn slides_only(slides: Vec<SlideContent>) -> Self {
        Self {
            slides,
            stats: DeckStats::default(),
        }
    }

    /// Number of slides in the deck.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// Statistics collected while segmenting and rendering a deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStats {
    /// Content blocks found in the host document
    pub blocks_collected: usize,

    /// Leading empty blocks dropped
    pub blocks_trimmed: usize,

    /// Manual slide breaks consumed
    pub separator_count: usize,

    /// Extra slides created by overflow splitting
    pub overflow_splits: usize,

    /// Total slides produced
    pub slide_count: usize,

    /// Slides rendered as HTML
    pub html_slides: usize,

    /// Slides rendered as media payloads
    pub media_slides: usize,

    /// Headings rendered
    pub heading_count: usize,

    /// Paragraphs and quotes rendered
    pub paragraph_count: usize,

    /// List items rendered
    pub list_item_count: usize,

    /// Code blocks rendered
    pub code_block_count: usize,

    /// Tables rendered
    pub table_count: usize,

    /// Images rendered
    pub image_count: usize,

    /// Blocks that produced no output
    pub omitted_blocks: usize,
}

impl DeckStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the counters of a segmentation run.
    pub fn with_segment_stats(mut self, segment: &SegmentStats) -> Self {
        self.blocks_collected = segment.blocks_collected;
        self.blocks_trimmed = segment.blocks_trimmed;
        self.separator_count = segment.separators;
        self.overflow_splits = segment.overflow_splits;
        self
    }

    /// Count one rendered HTML slide.
    pub fn add_html_slide(&mut self) {
        self.slide_count += 1;
        self.html_slides += 1;
    }

    /// Count one rendered media slide.
    pub fn add_media_slide(&mut self) {
        self.slide_count += 1;
        self.media_slides += 1;
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment code block count.
    pub fn add_code_block(&mut self) {
        self.code_block_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment image count.
    pub fn add_image(&mut self) {
        self.image_count += 1;
    }

    /// Increment omitted block count.
    pub fn add_omitted(&mut self) {
        self.omitted_blocks += 1;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &DeckStats) {
        self.blocks_collected += other.blocks_collected;
        self.blocks_trimmed += other.blocks_trimmed;
        self.separator_count += other.separator_count;
        self.overflow_splits += other.overflow_splits;
        self.slide_count += other.slide_count;
        self.html_slides += other.html_slides;
        self.media_slides += other.media_slides;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_item_count += other.list_item_count;
        self.code_block_count += other.code_block_count;
        self.table_count += other.table_count;
        self.image_count += other.image_count;
        self.omitted_blocks += other.omitted_blocks;
    }
}
