//! Visual weight estimation.
//!
//! Weight is a coarse proxy for the vertical space a block takes on a
//! rendered slide. The static heuristic only looks at text length, nesting
//! and block kind; hosts that can measure rendered blocks plug in their own
//! estimator.

use crate::model::{BlockKind, BlockRecord};

/// Estimates the visual weight of a block.
pub trait WeightEstimator {
    /// Weight of one block. Must be non-negative and finite.
    fn estimate(&self, block: &BlockRecord<'_>) -> f64;

    /// Weight of a block, cached on the record after the first call.
    fn weight_of(&self, block: &BlockRecord<'_>) -> f64 {
        block.weight_with(|b| self.estimate(b))
    }
}

impl<F> WeightEstimator for F
where
    F: Fn(&BlockRecord<'_>) -> f64,
{
    fn estimate(&self, block: &BlockRecord<'_>) -> f64 {
        self(block)
    }
}

/// Text-length heuristic used when no measured weights are available.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticWeight {
    /// Characters that add one unit of weight
    pub chars_per_unit: f64,

    /// Extra weight fraction per nested child block
    pub nesting_factor: f64,

    /// Multiplier for code blocks and tables
    pub dense_factor: f64,

    /// Fixed weight of images and atomic media
    pub media_weight: f64,

    /// Fixed weight of unrecognised blocks
    pub other_weight: f64,
}

impl StaticWeight {
    /// Create the default heuristic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many characters make up one weight unit.
    pub fn with_chars_per_unit(mut self, chars: f64) -> Self {
        if chars.is_finite() && chars > 0.0 {
            self.chars_per_unit = chars;
        }
        self
    }

    /// Set the per-child nesting factor.
    pub fn with_nesting_factor(mut self, factor: f64) -> Self {
        if factor.is_finite() && factor >= 0.0 {
            self.nesting_factor = factor;
        }
        self
    }

    /// Set the code/table multiplier.
    pub fn with_dense_factor(mut self, factor: f64) -> Self {
        if factor.is_finite() && factor >= 1.0 {
            self.dense_factor = factor;
        }
        self
    }

    fn text_weight(&self, block: &BlockRecord<'_>) -> f64 {
        let chars = block.text.chars().count() as f64;
        (1.0 + chars / self.chars_per_unit) * (1.0 + self.nesting_factor * block.nested as f64)
    }
}

impl Default for StaticWeight {
    fn default() -> Self {
        Self {
            chars_per_unit: 200.0,
            nesting_factor: 0.3,
            dense_factor: 1.5,
            media_weight: 2.0,
            other_weight: 1.0,
        }
    }
}

impl WeightEstimator for StaticWeight {
    fn estimate(&self, block: &BlockRecord<'_>) -> f64 {
        match &block.kind {
            BlockKind::Heading { .. } | BlockKind::SeparatorMarker => 0.0,
            BlockKind::Paragraph | BlockKind::ListItem(_) | BlockKind::Quote => {
                self.text_weight(block)
            }
            BlockKind::CodeBlock | BlockKind::Table => self.text_weight(block) * self.dense_factor,
            BlockKind::Image | BlockKind::AtomicMedia(_) => self.media_weight,
            BlockKind::Other(_) => self.other_weight,
        }
    }
}

/// Total weight of a run of blocks.
pub fn section_weight(blocks: &[BlockRecord<'_>], estimator: &dyn WeightEstimator) -> f64 {
    blocks.iter().map(|b| estimator.weight_of(b)).sum()
}
