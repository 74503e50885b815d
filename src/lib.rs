//! # slidecut
//!
//! Document-to-slides segmentation for block-based rich-text documents.
//!
//! This library takes the block tree of a rich-text editor document
//! (headings, paragraphs, lists, tables, code and media blocks such as
//! whiteboards) and partitions it into presentation slides, then renders
//! each slide into an HTML fragment or a structured media payload.
//!
//! ## Quick Start
//!
//! ```
//! use slidecut::{generate_slides, Document, Node, SlideContent};
//!
//! let doc = Document::from_blocks(vec![
//!     Node::heading(1, "Intro"),
//!     Node::paragraph("hello"),
//!     Node::divider(),
//!     Node::heading(1, "Next"),
//!     Node::paragraph("world"),
//! ]);
//!
//! let slides = generate_slides(&doc);
//! assert_eq!(slides.len(), 2);
//! assert!(matches!(&slides[0], SlideContent::Html { content } if content.contains("Intro")));
//! ```
//!
//! ## Pipeline
//!
//! - **Separators**: dividers and break glyphs (`---`, `***`, ...) always cut
//! - **Media isolation**: whiteboards, spreadsheets and diagrams get their
//!   own slide
//! - **Headings**: H1/H2 boundaries start new slides, with the first H2
//!   under an H1 kept as its subtitle
//! - **Overflow**: groups heavier than the weight budget are packed greedily
//!   onto several slides
//! - **Rendering**: semantic HTML with `bn-*` classes, or media payloads

pub mod error;
pub mod host;
pub mod model;
pub mod render;
pub mod segment;

// Re-export commonly used types
pub use error::{Error, Result};
pub use host::{HostDocument, JsonSource};
pub use model::{
    BlockKind, BlockRecord, Document, InlineContent, ListKind, MediaKind, Node, Slide,
    SlideContent, Styles, TableContent,
};
pub use render::{
    DeckResult, DeckStats, HtmlRenderer, JsonFormat, RenderOptions, SlideVisitor, VisitorAction,
};
pub use segment::{
    segment, OverflowStrategy, SegmentOptions, Segmenter, StaticWeight, WeightEstimator,
};

use model::HOST_ERROR_TEXT;

/// Turn a host document into slides with default options.
///
/// Never fails: a host that cannot be read yields a single error slide, and
/// an empty document yields a single placeholder slide.
///
/// # Example
///
/// ```
/// use slidecut::{generate_slides, Node};
///
/// let blocks = vec![Node::paragraph("before"), Node::whiteboard("Sketch", "{}")];
/// let slides = generate_slides(&blocks);
/// assert_eq!(slides.len(), 2);
/// assert!(slides[1].is_media());
/// ```
pub fn generate_slides<H: HostDocument + ?Sized>(host: &H) -> Vec<SlideContent> {
    Slidecut::new().generate(host).slides
}

/// Turn a host document into slides with custom options.
pub fn generate_slides_with_options<H: HostDocument + ?Sized>(
    host: &H,
    segment_options: &SegmentOptions,
    render_options: &RenderOptions,
) -> Vec<SlideContent> {
    Slidecut::new()
        .with_segment_options(segment_options.clone())
        .with_render_options(render_options.clone())
        .generate(host)
        .slides
}

/// Turn serialized editor JSON into slides.
///
/// Malformed JSON is treated like an unreadable host.
///
/// # Example
///
/// ```
/// use slidecut::generate_slides_from_json;
///
/// let slides = generate_slides_from_json(r#"[{"type": "heading", "props": {"level": 1},
///     "content": [{"type": "text", "text": "Hi", "styles": {}}]}]"#);
/// assert_eq!(slides[0].as_html(), Some("<h1 class=\"bn-heading\">Hi</h1>"));
/// ```
pub fn generate_slides_from_json(json: &str) -> Vec<SlideContent> {
    generate_slides(&JsonSource::new(json))
}

/// Configurable slide generator.
///
/// Combines segmentation options, render options, a weight estimator and a
/// render visitor.
///
/// # Example
///
/// ```
/// use slidecut::{Node, SegmentOptions, Slidecut};
/// use slidecut::render::SkipImagesVisitor;
///
/// let blocks = vec![Node::paragraph("text"), Node::image("a.png", "")];
/// let deck = Slidecut::new()
///     .with_segment_options(SegmentOptions::new().with_max_weight(10.0))
///     .with_visitor(SkipImagesVisitor)
///     .generate(&blocks);
///
/// assert_eq!(deck.slides.len(), 1);
/// assert_eq!(deck.stats.omitted_blocks, 1);
/// ```
#[derive(Default)]
pub struct Slidecut {
    segment_options: SegmentOptions,
    render_options: RenderOptions,
    estimator: Option<Box<dyn WeightEstimator>>,
    visitor: Option<Box<dyn SlideVisitor>>,
}

impl Slidecut {
    /// Create a generator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segmentation options.
    pub fn with_segment_options(mut self, options: SegmentOptions) -> Self {
        self.segment_options = options;
        self
    }

    /// Set the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Use a custom weight estimator (e.g. measured block heights).
    pub fn with_estimator(mut self, estimator: impl WeightEstimator + 'static) -> Self {
        self.estimator = Some(Box::new(estimator));
        self
    }

    /// Use a render visitor.
    pub fn with_visitor(mut self, visitor: impl SlideVisitor + 'static) -> Self {
        self.visitor = Some(Box::new(visitor));
        self
    }

    /// Generate slides, propagating host access errors.
    pub fn try_generate<H: HostDocument + ?Sized>(self, host: &H) -> Result<DeckResult> {
        let blocks = host.blocks()?;

        let mut segmenter = Segmenter::new(self.segment_options);
        if let Some(estimator) = self.estimator {
            segmenter = segmenter.with_boxed_estimator(estimator);
        }
        let segmentation = segmenter.run(&blocks);

        let mut renderer = HtmlRenderer::new(self.render_options);
        if let Some(visitor) = self.visitor {
            renderer = renderer.with_boxed_visitor(visitor);
        }
        let slides = renderer.render_slides(&segmentation.slides);
        let stats = renderer.into_stats().with_segment_stats(&segmentation.stats);

        log::debug!(
            "Generated {} slides ({} media)",
            stats.slide_count,
            stats.media_slides
        );
        Ok(DeckResult::new(slides, stats))
    }

    /// Generate slides.
    ///
    /// A host access failure is logged and replaced by a single error slide.
    pub fn generate<H: HostDocument + ?Sized>(self, host: &H) -> DeckResult {
        match self.try_generate(host) {
            Ok(deck) => deck,
            Err(e) => {
                log::error!("{}", e);
                let mut stats = DeckStats::new();
                stats.add_html_slide();
                DeckResult::new(vec![error_slide()], stats)
            }
        }
    }
}

impl std::fmt::Debug for Slidecut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slidecut")
            .field("segment_options", &self.segment_options)
            .field("render_options", &self.render_options)
            .field("custom_estimator", &self.estimator.is_some())
            .field("custom_visitor", &self.visitor.is_some())
            .finish()
    }
}

/// The slide shown when the host document cannot be read.
pub fn error_slide() -> SlideContent {
    SlideContent::html(format!("<p>{}</p>", HOST_ERROR_TEXT))
}
