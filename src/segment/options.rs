//! Segmentation options and configuration.

/// Default visual weight budget per slide.
pub const MAX_WEIGHT_PER_SLIDE: f64 = 20.0;

/// Default block count cap per slide.
pub const MAX_BLOCKS_PER_SLIDE: usize = 15;

/// Options for splitting a document into slides.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOptions {
    /// Maximum estimated weight per slide (weight strategy)
    pub max_weight_per_slide: f64,

    /// Maximum blocks per slide (block-count strategy)
    pub max_blocks_per_slide: usize,

    /// Which heuristic splits over-long sections
    pub overflow: OverflowStrategy,
}

impl SegmentOptions {
    /// Create new segment options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight budget. Non-positive or non-finite values are ignored.
    pub fn with_max_weight(mut self, weight: f64) -> Self {
        if weight.is_finite() && weight > 0.0 {
            self.max_weight_per_slide = weight;
        }
        self
    }

    /// Set the block count cap (at least 1).
    pub fn with_max_blocks(mut self, blocks: usize) -> Self {
        self.max_blocks_per_slide = blocks.max(1);
        self
    }

    /// Set the overflow strategy.
    pub fn with_overflow(mut self, strategy: OverflowStrategy) -> Self {
        self.overflow = strategy;
        self
    }

    /// Split over-long sections by block count.
    pub fn by_block_count(mut self) -> Self {
        self.overflow = OverflowStrategy::BlockCount;
        self
    }
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            max_weight_per_slide: MAX_WEIGHT_PER_SLIDE,
            max_blocks_per_slide: MAX_BLOCKS_PER_SLIDE,
            overflow: OverflowStrategy::Weight,
        }
    }
}

/// How sections that are too long for one slide get split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowStrategy {
    /// Greedy packing by estimated visual weight
    #[default]
    Weight,
    /// Fixed block count with heading-aware breaks
    BlockCount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_options_builder() {
        let options = SegmentOptions::new()
            .with_max_weight(12.5)
            .with_max_blocks(8)
            .by_block_count();

        assert_eq!(options.max_weight_per_slide, 12.5);
        assert_eq!(options.max_blocks_per_slide, 8);
        assert_eq!(options.overflow, OverflowStrategy::BlockCount);
    }

    #[test]
    fn test_default_options() {
        let options = SegmentOptions::default();
        assert_eq!(options.max_weight_per_slide, 20.0);
        assert_eq!(options.max_blocks_per_slide, 15);
        assert_eq!(options.overflow, OverflowStrategy::Weight);
    }

    #[test]
    fn test_invalid_limits_are_ignored() {
        let options = SegmentOptions::new()
            .with_max_weight(-1.0)
            .with_max_weight(f64::NAN)
            .with_max_blocks(0);
        assert_eq!(options.max_weight_per_slide, 20.0);
        assert_eq!(options.max_blocks_per_slide, 1);
    }
}
