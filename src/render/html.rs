//! HTML rendering for slides.

use regex::Regex;
use serde_json::Value;

use crate::model::{
    is_wrapper, normalize_text, BlockKind, BlockRecord, InlineContent, ListKind, Node, Slide,
    SlideContent, Styles, TableCell, TableContent, TableRow, MAX_NESTING_DEPTH,
};

use super::media::render_media;
use super::visitor::{DefaultVisitor, SlideVisitor, VisitorAction};
use super::{DeckStats, RenderOptions};

/// Code languages that may appear in a `language-*` class.
const LANGUAGE_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9_+#.-]{0,31}$";

/// Render slides with default options.
pub fn to_slide_contents(slides: &[Slide<'_>], options: &RenderOptions) -> Vec<SlideContent> {
    let mut renderer = HtmlRenderer::new(options.clone());
    renderer.render_slides(slides)
}

/// Slide renderer producing HTML fragments and media payloads.
pub struct HtmlRenderer {
    options: RenderOptions,
    visitor: Box<dyn SlideVisitor>,
    stats: DeckStats,
    language_pattern: Option<Regex>,
    depth: usize,
}

impl HtmlRenderer {
    /// Create a new renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            visitor: Box::new(DefaultVisitor),
            stats: DeckStats::new(),
            language_pattern: Regex::new(LANGUAGE_PATTERN).ok(),
            depth: 0,
        }
    }

    /// Set the visitor consulted before each block.
    pub fn with_visitor<V: SlideVisitor + 'static>(self, visitor: V) -> Self {
        self.with_boxed_visitor(Box::new(visitor))
    }

    /// Set an already boxed visitor.
    pub fn with_boxed_visitor(mut self, visitor: Box<dyn SlideVisitor>) -> Self {
        self.visitor = visitor;
        self
    }

    /// Statistics collected so far.
    pub fn stats(&self) -> &DeckStats {
        &self.stats
    }

    /// Consume the renderer, returning its statistics.
    pub fn into_stats(self) -> DeckStats {
        self.stats
    }

    /// Render every slide in order.
    pub fn render_slides(&mut self, slides: &[Slide<'_>]) -> Vec<SlideContent> {
        slides
            .iter()
            .enumerate()
            .map(|(index, slide)| self.render_slide(index, slide))
            .collect()
    }

    /// Render one slide.
    ///
    /// A slide holding a single atomic block becomes a media slide; anything
    /// else becomes an HTML fragment.
    pub fn render_slide(&mut self, index: usize, slide: &Slide<'_>) -> SlideContent {
        self.visitor.on_slide_start(index);

        let content = match slide.media_block() {
            Some(block) => self.render_media_slide(block),
            None => {
                let mut output = String::new();
                self.render_sequence(slide.blocks.iter().map(BlockRecord::node), &mut output);
                if output.is_empty() {
                    log::debug!("Slide {} rendered to nothing", index);
                    output = format!("<p>{}</p>", escape_html(&self.options.empty_slide_text));
                }
                self.stats.add_html_slide();
                SlideContent::Html { content: output }
            }
        };

        self.visitor.on_slide_end(index);
        content
    }

    fn render_media_slide(&mut self, block: &BlockRecord<'_>) -> SlideContent {
        self.stats.add_media_slide();
        match block.kind {
            BlockKind::AtomicMedia(kind) => render_media(block, kind),
            _ => SlideContent::html(""),
        }
    }

    /// Render blocks in order, bracketing runs of list items.
    ///
    /// Sequences nested deeper than [`MAX_NESTING_DEPTH`] are omitted.
    fn render_sequence<'n, I>(&mut self, nodes: I, output: &mut String)
    where
        I: IntoIterator<Item = &'n Node>,
    {
        if self.depth >= MAX_NESTING_DEPTH {
            log::warn!("Blocks nested deeper than {} levels omitted", MAX_NESTING_DEPTH);
            self.stats.add_omitted();
            return;
        }
        self.depth += 1;
        let mut open_list: Option<&'static str> = None;

        for node in nodes {
            let Some(kind) = BlockKind::from_node(node) else {
                if is_wrapper(&node.kind) {
                    close_list(output, &mut open_list);
                    self.render_sequence(&node.children, output);
                }
                continue;
            };

            match kind {
                BlockKind::ListItem(list_kind) => {
                    let mut item = String::new();
                    self.render_list_item(&mut item, node, list_kind);
                    if item.is_empty() {
                        continue;
                    }
                    let tag = if list_kind.is_ordered() { "ol" } else { "ul" };
                    if open_list != Some(tag) {
                        close_list(output, &mut open_list);
                        output.push_str(&format!("<{}{}>", tag, self.class("bn-list")));
                        open_list = Some(tag);
                    }
                    output.push_str(&item);
                }
                kind => {
                    close_list(output, &mut open_list);
                    self.render_block(output, node, &kind);
                }
            }
        }

        close_list(output, &mut open_list);
        self.depth -= 1;
    }

    fn render_block(&mut self, output: &mut String, node: &Node, kind: &BlockKind) {
        match kind {
            BlockKind::Heading { level } => self.render_heading(output, node, *level),
            BlockKind::Paragraph => {
                let action = self.visitor.visit_paragraph(node);
                if self.apply_action(output, action, "paragraph") {
                    return;
                }
                self.stats.add_paragraph();
                output.push_str(&format!("<p{}>", self.class("bn-paragraph")));
                self.render_inline(output, node.inline());
                output.push_str("</p>");
                self.render_children(output, node);
            }
            BlockKind::Quote => {
                let action = self.visitor.visit_quote(node);
                if self.apply_action(output, action, "quote") {
                    return;
                }
                self.stats.add_paragraph();
                output.push_str(&format!("<blockquote{}>", self.class("bn-quote")));
                self.render_inline(output, node.inline());
                output.push_str("</blockquote>");
                self.render_children(output, node);
            }
            BlockKind::CodeBlock => self.render_code(output, node),
            BlockKind::Table => self.render_table(output, node),
            BlockKind::Image => self.render_image(output, node),
            BlockKind::ListItem(_) => self.render_sequence(std::iter::once(node), output),
            BlockKind::AtomicMedia(media) => {
                log::warn!("{} block on a text slide omitted", media);
                self.stats.add_omitted();
            }
            BlockKind::SeparatorMarker => {}
            BlockKind::Other(tag) => {
                let action = self.visitor.visit_other(node);
                if !self.apply_action(output, action, tag) {
                    log::debug!("No renderer for {} block", tag);
                    self.stats.add_omitted();
                }
            }
        }
    }

    fn render_heading(&mut self, output: &mut String, node: &Node, level: u8) {
        let text = normalize_text(&node.plain_text());
        let action = self.visitor.visit_heading(&text, level);
        if self.apply_action(output, action, "heading") {
            return;
        }
        self.stats.add_heading();
        let level = level.min(self.options.max_heading_level).clamp(1, 6);
        output.push_str(&format!("<h{}{}>", level, self.class("bn-heading")));
        self.render_inline(output, node.inline());
        output.push_str(&format!("</h{}>", level));
    }

    fn render_list_item(&mut self, output: &mut String, node: &Node, kind: ListKind) {
        let action = self.visitor.visit_list_item(node, kind);
        if self.apply_action(output, action, "list item") {
            return;
        }
        self.stats.add_list_item();

        let class = match kind {
            ListKind::Bullet => "bn-list-item",
            ListKind::Numbered => "bn-list-item bn-numbered",
            ListKind::Check => "bn-list-item bn-check",
        };
        output.push_str(&format!("<li{}>", self.class(class)));
        if kind == ListKind::Check {
            let checked = if node.prop_bool("checked").unwrap_or(false) {
                " checked"
            } else {
                ""
            };
            output.push_str(&format!("<input type=\"checkbox\" disabled{} /> ", checked));
        }
        self.render_inline(output, node.inline());
        // Nested items become a nested list inside this one.
        self.render_sequence(&node.children, output);
        output.push_str("</li>");
    }

    fn render_code(&mut self, output: &mut String, node: &Node) {
        let language = node.prop_str("language").unwrap_or("").trim();
        let source = node.plain_text();
        let action = self.visitor.visit_code(language, &source);
        if self.apply_action(output, action, "code block") {
            return;
        }
        self.stats.add_code_block();

        let code_class = match self.code_language(language) {
            Some(lang) if self.options.class_attributes => format!(" class=\"language-{}\"", lang),
            _ => String::new(),
        };
        output.push_str(&format!(
            "<pre{}><code{}>{}</code></pre>",
            self.class("bn-code-block"),
            code_class,
            escape_html(&source)
        ));
    }

    fn render_table(&mut self, output: &mut String, node: &Node) {
        let Some(table) = node.table_content().filter(|t| !t.is_empty()) else {
            log::debug!("Empty table omitted");
            self.stats.add_omitted();
            return;
        };
        let action = self.visitor.visit_table(table);
        if self.apply_action(output, action, "table") {
            return;
        }
        self.stats.add_table();
        self.render_table_html(output, table);
    }

    fn render_table_html(&self, output: &mut String, table: &TableContent) {
        let header_rows = (table.header_rows.unwrap_or(0) as usize).min(table.rows.len());
        let (header, body) = table.rows.split_at(header_rows);

        output.push_str(&format!("<table{}>", self.class("bn-table")));
        if !header.is_empty() {
            output.push_str("<thead>");
            for row in header {
                self.render_html_row(output, row, true);
            }
            output.push_str("</thead>");
        }
        output.push_str("<tbody>");
        for row in body {
            self.render_html_row(output, row, false);
        }
        output.push_str("</tbody></table>");
    }

    fn render_html_row(&self, output: &mut String, row: &TableRow, is_header: bool) {
        let tag = if is_header { "th" } else { "td" };
        output.push_str("<tr>");

        for cell in &row.cells {
            let mut attrs = String::new();
            if let Some(rowspan) = cell_span(cell, "rowspan") {
                attrs.push_str(&format!(" rowspan=\"{}\"", rowspan));
            }
            if let Some(colspan) = cell_span(cell, "colspan") {
                attrs.push_str(&format!(" colspan=\"{}\"", colspan));
            }

            output.push_str(&format!("<{}{}>", tag, attrs));
            self.render_inline(output, cell.content());
            output.push_str(&format!("</{}>", tag));
        }

        output.push_str("</tr>");
    }

    fn render_image(&mut self, output: &mut String, node: &Node) {
        let Some(url) = node.prop_str("url").map(str::trim).filter(|u| !u.is_empty()) else {
            log::debug!("Image without URL omitted");
            self.stats.add_omitted();
            return;
        };
        let caption = node.prop_str("caption").filter(|c| !c.trim().is_empty());
        let action = self.visitor.visit_image(url, caption);
        if self.apply_action(output, action, "image") {
            return;
        }
        self.stats.add_image();
        output.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\"{} />",
            escape_html(url),
            escape_html(caption.unwrap_or("")),
            self.class("bn-image")
        ));
    }

    fn render_children(&mut self, output: &mut String, node: &Node) {
        if node.children.is_empty() {
            return;
        }
        output.push_str(&format!("<div{}>", self.class("bn-block-group")));
        self.render_sequence(&node.children, output);
        output.push_str("</div>");
    }

    fn render_inline(&self, output: &mut String, content: &[InlineContent]) {
        self.render_inline_at(output, content, 0);
    }

    fn render_inline_at(&self, output: &mut String, content: &[InlineContent], depth: usize) {
        if depth >= MAX_NESTING_DEPTH {
            log::warn!("Inline content nested deeper than {} levels omitted", MAX_NESTING_DEPTH);
            return;
        }
        for item in content {
            match item {
                InlineContent::Text { text, styles } => {
                    let text = escape_html(&normalize_text(text));
                    output.push_str(&self.apply_text_style(text, styles));
                }
                InlineContent::Link { href, content } => {
                    output.push_str(&format!("<a href=\"{}\"", escape_html(href)));
                    if self.options.link_target_blank {
                        output.push_str(" target=\"_blank\"");
                    }
                    output.push('>');
                    self.render_inline_at(output, content, depth + 1);
                    output.push_str("</a>");
                }
                InlineContent::Unsupported => {}
            }
        }
    }

    fn apply_text_style(&self, text: String, style: &Styles) -> String {
        let mut result = text;

        // Apply styles (innermost first)
        if style.bold {
            result = format!("<strong>{}</strong>", result);
        }
        if style.italic {
            result = format!("<em>{}</em>", result);
        }
        if style.underline {
            result = format!("<u>{}</u>", result);
        }
        if style.strike {
            result = format!("<s>{}</s>", result);
        }
        if style.code {
            result = format!("<code{}>{}</code>", self.class("bn-inline-code"), result);
        }
        if let Some(color) = style.text_color.as_deref().filter(|c| is_css_color(c)) {
            result = format!("<span style=\"color: {}\">{}</span>", color, result);
        }
        if let Some(color) = style.background_color.as_deref().filter(|c| is_css_color(c)) {
            result = format!(
                "<span style=\"background-color: {}\">{}</span>",
                color, result
            );
        }

        result
    }

    /// Apply a visitor action. Returns true when the block is fully handled.
    fn apply_action(&mut self, output: &mut String, action: VisitorAction, what: &str) -> bool {
        match action {
            VisitorAction::Continue => false,
            VisitorAction::Replace(html) => {
                output.push_str(&html);
                true
            }
            VisitorAction::Skip => {
                log::debug!("Visitor skipped {}", what);
                self.stats.add_omitted();
                true
            }
        }
    }

    fn code_language(&self, language: &str) -> Option<String> {
        if language.is_empty() {
            return None;
        }
        match &self.language_pattern {
            Some(re) if re.is_match(language) => Some(language.to_ascii_lowercase()),
            _ => {
                log::debug!("Dropping code language {:?}", language);
                None
            }
        }
    }

    fn class(&self, class: &str) -> String {
        if self.options.class_attributes {
            format!(" class=\"{}\"", class)
        } else {
            String::new()
        }
    }
}

fn close_list(output: &mut String, open_list: &mut Option<&'static str>) {
    if let Some(tag) = open_list.take() {
        output.push_str(&format!("</{}>", tag));
    }
}

fn cell_span(cell: &TableCell, key: &str) -> Option<u64> {
    match cell {
        TableCell::Cell { props, .. } => props.get(key).and_then(Value::as_u64).filter(|&n| n > 1),
        TableCell::Inline(_) => None,
    }
}

/// Colors are passed into a `style` attribute, so only plain color syntax
/// (names, hex, `rgb(...)`) is accepted.
fn is_css_color(color: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || "#(),.% ".contains(c);
    !color.is_empty() && color.len() <= 64 && color.chars().all(allowed)
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
