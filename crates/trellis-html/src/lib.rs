//! HTML object model and markup serializer for Trellis.
//!
//! # Scope
//!
//! This crate implements:
//! - **Node model** ([DOM § 4.4](https://dom.spec.whatwg.org/#interface-node))
//!   - elements with insertion-ordered attributes, event handlers and children
//!   - text, entities, comments, inline scripts and stylesheets
//!   - wrapped nodes with a one-time preparation hook
//!   - out-of-band containers moved to the head or the end of the body
//!
//! - **Conversion** ([WHATWG § 13.3](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments))
//!   - one pre-order pass for customization and out-of-band collection
//!   - HTML 4.01, XHTML 1.1 and HTML5 output, compact or indented
//!   - pluggable [`Customizer`] hooks
//!
//! - **Tables**
//!   - element names with their content model
//!   - attribute and event names
//!   - named character references
//!
//! # Not Yet Implemented
//!
//! - Parsing markup back into a tree
//! - The full named character reference table
//! - Bundling of external script and style resources

/// Customizer hooks and default out-of-band placement.
pub mod customizer;
/// Whole documents.
pub mod document;
/// Elements.
pub mod element;
/// Named character references and escaping.
pub mod entity;
/// The document head.
pub mod head;
/// Node kinds.
pub mod node;
/// Versions and conversion settings.
pub mod settings;
/// Element, attribute and event names.
pub mod tag;

mod convert;
mod serializer;

pub use customizer::{Customizer, ExtractedNode, OutOfBandTargets, ScriptsAtBodyEnd, place_out_of_band};
pub use document::HtmlDocument;
pub use element::HtmlElement;
pub use entity::HtmlEntity;
pub use head::{HtmlHead, HtmlMeta};
pub use node::{
    HtmlComment, HtmlNode, HtmlScript, HtmlStyle, HtmlText, IntoChild, OutOfBandNode,
    OutOfBandTarget, ScriptSource, WrappedNode,
};
pub use settings::{ConversionSettings, HtmlVersion, XHTML_NAMESPACE};
pub use tag::{ContentModel, HtmlAttr, HtmlEvent, HtmlTag, TagInfo};
