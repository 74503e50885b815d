//! Rendering options and configuration.

use crate::model::EMPTY_SLIDE_TEXT;

/// Options for rendering slides to HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Emit `bn-*` class attributes on generated elements
    pub class_attributes: bool,

    /// Open links in a new browsing context (`target="_blank"`)
    pub link_target_blank: bool,

    /// Maximum heading level (1-6); deeper headings are clamped
    pub max_heading_level: u8,

    /// Text of the paragraph emitted when a slide renders to nothing
    pub empty_slide_text: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable class attributes.
    pub fn with_classes(mut self, enabled: bool) -> Self {
        self.class_attributes = enabled;
        self
    }

    /// Enable or disable `target="_blank"` on links.
    pub fn with_link_target_blank(mut self, enabled: bool) -> Self {
        self.link_target_blank = enabled;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Set the slide-level placeholder text.
    pub fn with_empty_slide_text(mut self, text: impl Into<String>) -> Self {
        self.empty_slide_text = text.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            class_attributes: true,
            link_target_blank: true,
            max_heading_level: 6,
            empty_slide_text: EMPTY_SLIDE_TEXT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_classes(false)
            .with_link_target_blank(false)
            .with_max_heading(9)
            .with_empty_slide_text("Nothing here");

        assert!(!options.class_attributes);
        assert!(!options.link_target_blank);
        assert_eq!(options.max_heading_level, 6);
        assert_eq!(options.empty_slide_text, "Nothing here");
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert!(options.class_attributes);
        assert!(options.link_target_blank);
        assert_eq!(options.max_heading_level, 6);
        assert_eq!(options.empty_slide_text, "Empty slide");
    }
}
