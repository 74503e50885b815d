//! Rendering module for turning slides into HTML fragments, media payloads
//! and JSON.

mod html;
mod json;
mod media;
mod options;
mod result;
pub mod visitor;

pub use html::{escape_html, to_slide_contents, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use media::{media_title, parse_payload, render_media};
pub use options::RenderOptions;
pub use result::{DeckResult, DeckStats};
pub use visitor::{
    CompositeVisitor, DefaultVisitor, MaxHeadingDepthVisitor, PlainTableVisitor,
    SkipImagesVisitor, SlideVisitor, VisitorAction,
};
