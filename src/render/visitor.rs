//! Visitor pattern for customizing slide rendering.
//!
//! A visitor is called before each block is rendered and can keep the
//! default markup, replace it with its own HTML, or drop the block. This is
//! where a host plugs in custom renderers for block types the crate does not
//! know about.
//!
//! # Example
//!
//! ```
//! use slidecut::render::visitor::{SlideVisitor, VisitorAction};
//! use slidecut::model::TableContent;
//!
//! struct NoTables;
//!
//! impl SlideVisitor for NoTables {
//!     fn visit_table(&mut self, _table: &TableContent) -> VisitorAction {
//!         VisitorAction::Replace("<p>(table omitted)</p>".to_string())
//!     }
//! }
//! ```

use crate::model::{ListKind, Node, TableContent};

use super::html::escape_html;

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the block with custom HTML (inserted as-is).
    Replace(String),

    /// Skip this block entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the block should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting blocks while slides are rendered.
///
/// All methods return `VisitorAction::Continue` by default. A replacement
/// for a list item is placed inside the surrounding list, so it should be a
/// complete `<li>` element.
pub trait SlideVisitor: Send + Sync {
    /// Called before rendering a heading.
    fn visit_heading(&mut self, text: &str, level: u8) -> VisitorAction {
        let _ = (text, level);
        VisitorAction::Continue
    }

    /// Called before rendering a paragraph.
    fn visit_paragraph(&mut self, node: &Node) -> VisitorAction {
        let _ = node;
        VisitorAction::Continue
    }

    /// Called before rendering a list item.
    fn visit_list_item(&mut self, node: &Node, kind: ListKind) -> VisitorAction {
        let _ = (node, kind);
        VisitorAction::Continue
    }

    /// Called before rendering a code block.
    fn visit_code(&mut self, language: &str, source: &str) -> VisitorAction {
        let _ = (language, source);
        VisitorAction::Continue
    }

    /// Called before rendering a table.
    fn visit_table(&mut self, table: &TableContent) -> VisitorAction {
        let _ = table;
        VisitorAction::Continue
    }

    /// Called before rendering a quote.
    fn visit_quote(&mut self, node: &Node) -> VisitorAction {
        let _ = node;
        VisitorAction::Continue
    }

    /// Called before rendering an image.
    fn visit_image(&mut self, url: &str, caption: Option<&str>) -> VisitorAction {
        let _ = (url, caption);
        VisitorAction::Continue
    }

    /// Called for block types without a built-in renderer.
    ///
    /// Unless replaced, such blocks produce no output.
    fn visit_other(&mut self, node: &Node) -> VisitorAction {
        let _ = node;
        VisitorAction::Continue
    }

    /// Called before rendering a slide.
    ///
    /// # Arguments
    /// * `index` - The 0-indexed slide position
    fn on_slide_start(&mut self, index: usize) {
        let _ = index;
    }

    /// Called after rendering a slide.
    fn on_slide_end(&mut self, index: usize) {
        let _ = index;
    }
}

/// Default visitor that performs no customization.
///
/// All visit methods return `VisitorAction::Continue`.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl SlideVisitor for DefaultVisitor {}

/// Visitor that skips all images.
#[derive(Debug, Clone, Default)]
pub struct SkipImagesVisitor;

impl SlideVisitor for SkipImagesVisitor {
    fn visit_image(&mut self, _url: &str, _caption: Option<&str>) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that renders tables as one paragraph per row.
#[derive(Debug, Clone, Default)]
pub struct PlainTableVisitor;

impl SlideVisitor for PlainTableVisitor {
    fn visit_table(&mut self, table: &TableContent) -> VisitorAction {
        let mut output = String::new();
        for row in &table.rows {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|c| escape_html(c.plain_text().trim()))
                .collect();
            output.push_str("<p>");
            output.push_str(&cells.join(" | "));
            output.push_str("</p>");
        }
        VisitorAction::Replace(output)
    }
}

/// Visitor that limits heading depth.
#[derive(Debug, Clone)]
pub struct MaxHeadingDepthVisitor {
    max_level: u8,
}

impl MaxHeadingDepthVisitor {
    /// Create a visitor that limits headings to the specified max level.
    pub fn new(max_level: u8) -> Self {
        Self {
            max_level: max_level.clamp(1, 6),
        }
    }
}

impl SlideVisitor for MaxHeadingDepthVisitor {
    fn visit_heading(&mut self, text: &str, level: u8) -> VisitorAction {
        if level <= self.max_level {
            return VisitorAction::Continue;
        }
        let level = self.max_level;
        VisitorAction::Replace(format!(
            "<h{level} class=\"bn-heading\">{}</h{level}>",
            escape_html(text)
        ))
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn SlideVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: SlideVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    fn first_action(
        &mut self,
        mut visit: impl FnMut(&mut Box<dyn SlideVisitor>) -> VisitorAction,
    ) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visit(visitor);
            if action != VisitorAction::Continue {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl SlideVisitor for CompositeVisitor {
    fn visit_heading(&mut self, text: &str, level: u8) -> VisitorAction {
        self.first_action(|v| v.visit_heading(text, level))
    }

    fn visit_paragraph(&mut self, node: &Node) -> VisitorAction {
        self.first_action(|v| v.visit_paragraph(node))
    }

    fn visit_list_item(&mut self, node: &Node, kind: ListKind) -> VisitorAction {
        self.first_action(|v| v.visit_list_item(node, kind))
    }

    fn visit_code(&mut self, language: &str, source: &str) -> VisitorAction {
        self.first_action(|v| v.visit_code(language, source))
    }

    fn visit_table(&mut self, table: &TableContent) -> VisitorAction {
        self.first_action(|v| v.visit_table(table))
    }

    fn visit_quote(&mut self, node: &Node) -> VisitorAction {
        self.first_action(|v| v.visit_quote(node))
    }

    fn visit_image(&mut self, url: &str, caption: Option<&str>) -> VisitorAction {
        self.first_action(|v| v.visit_image(url, caption))
    }

    fn visit_other(&mut self, node: &Node) -> VisitorAction {
        self.first_action(|v| v.visit_other(node))
    }

    fn on_slide_start(&mut self, index: usize) {
        for visitor in &mut self.visitors {
            visitor.on_slide_start(index);
        }
    }

    fn on_slide_end(&mut self, index: usize) {
        for visitor in &mut self.visitors {
            visitor.on_slide_end(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitor_action_default() {
        let action = VisitorAction::default();
        assert!(matches!(action, VisitorAction::Continue));
    }

    #[test]
    fn test_visitor_action_should_skip() {
        assert!(!VisitorAction::Continue.should_skip());
        assert!(!VisitorAction::Replace("test".into()).should_skip());
        assert!(VisitorAction::Skip.should_skip());
    }

    #[test]
    fn test_visitor_action_replacement() {
        assert!(VisitorAction::Continue.replacement().is_none());
        assert!(VisitorAction::Skip.replacement().is_none());
        assert_eq!(
            VisitorAction::Replace("hello".into()).replacement(),
            Some("hello")
        );
    }

    #[test]
    fn test_default_visitor() {
        let mut visitor = DefaultVisitor::new();
        let action = visitor.visit_paragraph(&Node::paragraph("x"));
        assert!(matches!(action, VisitorAction::Continue));
    }

    #[test]
    fn test_skip_images_visitor() {
        let mut visitor = SkipImagesVisitor;
        let action = visitor.visit_image("a.png", Some("alt text"));
        assert!(action.should_skip());
    }

    #[test]
    fn test_max_heading_depth_visitor() {
        let mut visitor = MaxHeadingDepthVisitor::new(2);
        assert!(!visitor.visit_heading("Top", 1).is_replace());

        let action = visitor.visit_heading("Deep <Heading>", 4);
        assert_eq!(
            action.replacement(),
            Some("<h2 class=\"bn-heading\">Deep &lt;Heading&gt;</h2>")
        );
    }

    #[test]
    fn test_plain_table_visitor() {
        let node = Node::table([["a", "b"], ["c", "d"]]);
        let table = node.table_content().unwrap();
        let action = PlainTableVisitor.visit_table(table);
        assert_eq!(action.replacement(), Some("<p>a | b</p><p>c | d</p>"));
    }

    #[test]
    fn test_composite_visitor() {
        let mut composite = CompositeVisitor::new()
            .with_visitor(SkipImagesVisitor)
            .with_visitor(DefaultVisitor);

        // Images should be skipped
        let action = composite.visit_image("a.png", None);
        assert!(action.should_skip());

        // Other blocks should continue
        let action = composite.visit_paragraph(&Node::paragraph("x"));
        assert!(matches!(action, VisitorAction::Continue));
    }
}
