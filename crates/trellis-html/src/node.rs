//! The markup-producing node tree.
//!
//! [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
//!
//! Unlike the DOM, the tree is built top-down by caller code and consumed
//! by one conversion. Besides text and elements it carries a few node kinds
//! that only make sense for generation: inline scripts and stylesheets,
//! wrapped nodes with a one-time preparation hook, and out-of-band
//! containers whose payload is moved to the head or the end of the body.

use std::fmt;

use trellis_common::error::require_non_empty;
use trellis_common::{ExternalResource, MarkupError, Result};
use trellis_css::CssStyleSheet;
use trellis_js::JsBlock;

use crate::convert;
use crate::customizer::Customizer;
use crate::element::HtmlElement;
use crate::entity::HtmlEntity;
use crate::settings::ConversionSettings;
use crate::tag::HtmlTag;

/// A node of the tree.
#[derive(Debug)]
pub enum HtmlNode {
    /// Character data.
    Text(HtmlText),
    /// A named character reference.
    Entity(HtmlEntity),
    /// `<!-- ... -->`
    Comment(HtmlComment),
    /// An element with attributes and children.
    Element(HtmlElement),
    /// A fragment: its children rendered one after another.
    List(Vec<HtmlNode>),
    /// A `<script>` element.
    Script(HtmlScript),
    /// A `<style>` element.
    Style(HtmlStyle),
    /// A node delegating to one contained node.
    Wrapped(WrappedNode),
    /// A node that belongs in the head or at the end of the body.
    OutOfBand(OutOfBandNode),
}

impl HtmlNode {
    /// Escaped text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(HtmlText::new(text))
    }

    /// Text written verbatim, without escaping.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Text(HtmlText::raw(text))
    }

    /// A comment.
    ///
    /// # Errors
    ///
    /// See [`HtmlComment::new`].
    pub fn comment(text: impl Into<String>) -> Result<Self> {
        HtmlComment::new(text).map(Self::Comment)
    }

    /// A named character reference.
    ///
    /// # Errors
    ///
    /// See [`HtmlEntity::new`].
    pub fn entity(name: &str) -> Result<Self> {
        HtmlEntity::new(name).map(Self::Entity)
    }

    /// Wrap `node` so it is moved to the end of the body.
    #[must_use]
    pub fn out_of_band(node: impl Into<Self>) -> Self {
        Self::OutOfBand(OutOfBandNode::new(node))
    }

    /// The visible text of the subtree with all markup removed.
    ///
    /// Scripts, styles, comments and out-of-band content contribute nothing.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text.as_str()),
            Self::Entity(entity) => out.push(entity.character()),
            Self::Element(element) => {
                if element.tag() == HtmlTag::Br {
                    out.push('\n');
                }
                for child in element.children() {
                    child.collect_text(out);
                }
            }
            Self::List(nodes) => {
                for node in nodes {
                    node.collect_text(out);
                }
            }
            Self::Wrapped(wrapped) => {
                if let Some(inner) = wrapped.inner() {
                    inner.collect_text(out);
                }
            }
            Self::Comment(_) | Self::Script(_) | Self::Style(_) | Self::OutOfBand(_) => {}
        }
    }

    /// The node to move out of the tree, if this is an out-of-band container.
    ///
    /// Wrapped nodes forward the question to their content. Always `None`
    /// when `settings` disable extraction, or once the payload was moved.
    #[must_use]
    pub fn out_of_band_node(&self, settings: &ConversionSettings) -> Option<&Self> {
        match self {
            Self::OutOfBand(container) if settings.extract_out_of_band() => container.payload(),
            Self::Wrapped(wrapped) => wrapped
                .inner()
                .and_then(|inner| inner.out_of_band_node(settings)),
            _ => None,
        }
    }

    /// Remove the payload [`HtmlNode::out_of_band_node`] would return.
    pub(crate) fn take_out_of_band(
        &mut self,
        settings: &ConversionSettings,
    ) -> Option<(Self, OutOfBandTarget)> {
        match self {
            Self::OutOfBand(container) if settings.extract_out_of_band() => {
                let target = container.target();
                container.take_payload().map(|payload| (payload, target))
            }
            Self::Wrapped(wrapped) => wrapped
                .inner_mut()
                .and_then(|inner| inner.take_out_of_band(settings)),
            _ => None,
        }
    }

    /// Whether the node starts its own line in indented output.
    #[must_use]
    pub fn is_block_level(&self) -> bool {
        match self {
            Self::Text(_) | Self::Entity(_) => false,
            Self::Element(element) => !element.tag().info().inline,
            Self::List(nodes) => nodes.iter().all(Self::is_block_level),
            Self::Wrapped(wrapped) => wrapped.inner().is_none_or(Self::is_block_level),
            Self::OutOfBand(container) => container.payload().is_none_or(Self::is_block_level),
            Self::Comment(_) | Self::Script(_) | Self::Style(_) => true,
        }
    }

    /// Convert this node as a fragment.
    ///
    /// Runs the customization and out-of-band pass and serializes the
    /// result. If the node is a `body` element it receives the out-of-band
    /// payloads; otherwise there is nowhere to put them.
    ///
    /// # Errors
    ///
    /// Returns `InconsistentState` if out-of-band payloads have no target or
    /// a deferred wrapped node never produced content.
    pub fn render(
        &mut self,
        settings: &ConversionSettings,
        customizer: Option<&dyn Customizer>,
    ) -> Result<String> {
        convert::convert_fragment(self, settings, customizer)
    }
}

/// Character data, escaped on output unless created with [`HtmlText::raw`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HtmlText {
    text: String,
    escape: bool,
}

impl HtmlText {
    /// Text that is escaped on output.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            escape: true,
        }
    }

    /// Text written verbatim; the caller guarantees it is valid markup.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            escape: false,
        }
    }

    /// The text as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the text is escaped on output.
    #[must_use]
    pub const fn is_escaped(&self) -> bool {
        self.escape
    }
}

/// [§ 13.1.6 Comments](https://html.spec.whatwg.org/multipage/syntax.html#comments)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HtmlComment(String);

impl HtmlComment {
    /// Create a comment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the text contains `--` or ends with `-`,
    /// which would end the comment early or make it malformed.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.contains("--") || text.ends_with('-') {
            return Err(MarkupError::invalid_argument(
                "text",
                "comment text must not contain '--' or end with '-'",
            ));
        }
        Ok(Self(text))
    }

    /// The comment text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where a script gets its code from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScriptSource {
    /// Code written into the element.
    Inline(JsBlock),
    /// A `src` reference.
    External(ExternalResource),
}

/// A `<script>` element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HtmlScript {
    source: ScriptSource,
    defer: bool,
}

impl HtmlScript {
    /// An inline script.
    #[must_use]
    pub fn inline(code: impl Into<JsBlock>) -> Self {
        Self {
            source: ScriptSource::Inline(code.into()),
            defer: false,
        }
    }

    /// A script loaded from `resource`.
    #[must_use]
    pub const fn external(resource: ExternalResource) -> Self {
        Self {
            source: ScriptSource::External(resource),
            defer: false,
        }
    }

    /// Set the `defer` flag; only written for external scripts.
    #[must_use]
    pub const fn with_defer(mut self, defer: bool) -> Self {
        self.defer = defer;
        self
    }

    /// The code source.
    #[must_use]
    pub const fn source(&self) -> &ScriptSource {
        &self.source
    }

    /// Whether `defer` is set.
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        self.defer
    }
}

/// A `<style>` element holding an inline stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HtmlStyle {
    sheet: CssStyleSheet,
    media: Option<String>,
}

impl HtmlStyle {
    /// Wrap a stylesheet.
    #[must_use]
    pub const fn new(sheet: CssStyleSheet) -> Self {
        Self { sheet, media: None }
    }

    /// Restrict the stylesheet to a media query.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `media` is blank.
    pub fn with_media(mut self, media: impl Into<String>) -> Result<Self> {
        let media = media.into();
        require_non_empty("media", media.trim())?;
        self.media = Some(media);
        Ok(self)
    }

    /// The stylesheet.
    #[must_use]
    pub const fn sheet(&self) -> &CssStyleSheet {
        &self.sheet
    }

    /// Mutable access to the stylesheet.
    pub const fn sheet_mut(&mut self) -> &mut CssStyleSheet {
        &mut self.sheet
    }

    /// The media query, if any.
    #[must_use]
    pub fn media(&self) -> Option<&str> {
        self.media.as_deref()
    }
}

type PrepareHook = Box<dyn FnOnce(&mut Option<HtmlNode>)>;

enum Preparation {
    Pending(PrepareHook),
    Prepared,
}

/// A node that delegates serialization to one contained node.
///
/// A preparation hook may be attached; it runs the first time the node is
/// converted and never again. A deferred node starts without content and
/// must produce it in its hook.
pub struct WrappedNode {
    inner: Box<Option<HtmlNode>>,
    preparation: Preparation,
}

impl WrappedNode {
    /// Wrap `node`; no preparation needed.
    #[must_use]
    pub fn new(node: impl Into<HtmlNode>) -> Self {
        Self {
            inner: Box::new(Some(node.into())),
            preparation: Preparation::Prepared,
        }
    }

    /// A node whose content is produced by `hook` on first conversion.
    #[must_use]
    pub fn deferred(hook: impl FnOnce(&mut Option<HtmlNode>) + 'static) -> Self {
        Self {
            inner: Box::new(None),
            preparation: Preparation::Pending(Box::new(hook)),
        }
    }

    /// Run `hook` on the content before the first conversion.
    ///
    /// Replaces any hook that has not run yet.
    #[must_use]
    pub fn with_prepare(mut self, hook: impl FnOnce(&mut Option<HtmlNode>) + 'static) -> Self {
        self.preparation = Preparation::Pending(Box::new(hook));
        self
    }

    /// Run the preparation hook if it has not run yet.
    ///
    /// Returns whether the hook ran.
    pub fn prepare(&mut self) -> bool {
        match std::mem::replace(&mut self.preparation, Preparation::Prepared) {
            Preparation::Pending(hook) => {
                hook(&mut self.inner);
                true
            }
            Preparation::Prepared => false,
        }
    }

    /// Whether the preparation hook has run (or there never was one).
    #[must_use]
    pub const fn is_prepared(&self) -> bool {
        matches!(self.preparation, Preparation::Prepared)
    }

    /// The contained node.
    #[must_use]
    pub fn inner(&self) -> Option<&HtmlNode> {
        (*self.inner).as_ref()
    }

    /// Mutable access to the contained node.
    pub fn inner_mut(&mut self) -> Option<&mut HtmlNode> {
        (*self.inner).as_mut()
    }
}

impl fmt::Debug for WrappedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedNode")
            .field("inner", &self.inner)
            .field("prepared", &self.is_prepared())
            .finish()
    }
}

/// Where an out-of-band payload belongs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutOfBandTarget {
    /// Inside `<head>`.
    Head,
    /// At the end of `<body>`.
    #[default]
    Body,
}

/// A container whose payload is rendered away from its authored position.
///
/// In place it renders nothing. The conversion pass takes the payload out
/// and hands it to the customizer for placement.
#[derive(Debug)]
pub struct OutOfBandNode {
    payload: Option<Box<HtmlNode>>,
    target: OutOfBandTarget,
}

impl OutOfBandNode {
    /// Wrap `node`, targeting the end of the body.
    #[must_use]
    pub fn new(node: impl Into<HtmlNode>) -> Self {
        Self {
            payload: Some(Box::new(node.into())),
            target: OutOfBandTarget::Body,
        }
    }

    /// Wrap `node`, targeting the head.
    #[must_use]
    pub fn in_head(node: impl Into<HtmlNode>) -> Self {
        Self::new(node).with_target(OutOfBandTarget::Head)
    }

    /// Change the target.
    #[must_use]
    pub const fn with_target(mut self, target: OutOfBandTarget) -> Self {
        self.target = target;
        self
    }

    /// The payload, until a conversion has moved it.
    #[must_use]
    pub fn payload(&self) -> Option<&HtmlNode> {
        self.payload.as_deref()
    }

    /// The target region.
    #[must_use]
    pub const fn target(&self) -> OutOfBandTarget {
        self.target
    }

    pub(crate) fn payload_mut(&mut self) -> Option<&mut HtmlNode> {
        self.payload.as_deref_mut()
    }

    pub(crate) fn take_payload(&mut self) -> Option<HtmlNode> {
        self.payload.take().map(|payload| *payload)
    }
}

/// A value that can be added as a child node; `None` adds nothing.
pub trait IntoChild {
    /// Convert into a node, or nothing.
    fn into_child(self) -> Option<HtmlNode>;
}

macro_rules! impl_into_node {
    ($($ty:ty => $variant:expr),* $(,)?) => {
        $(
            impl From<$ty> for HtmlNode {
                fn from(value: $ty) -> Self {
                    $variant(value)
                }
            }

            impl IntoChild for $ty {
                fn into_child(self) -> Option<HtmlNode> {
                    Some(self.into())
                }
            }
        )*
    };
}

impl_into_node! {
    HtmlText => HtmlNode::Text,
    HtmlEntity => HtmlNode::Entity,
    HtmlComment => HtmlNode::Comment,
    HtmlElement => HtmlNode::Element,
    Vec<HtmlNode> => HtmlNode::List,
    HtmlScript => HtmlNode::Script,
    HtmlStyle => HtmlNode::Style,
    WrappedNode => HtmlNode::Wrapped,
    OutOfBandNode => HtmlNode::OutOfBand,
    &str => HtmlNode::text,
    String => HtmlNode::text,
}

impl IntoChild for HtmlNode {
    fn into_child(self) -> Option<HtmlNode> {
        Some(self)
    }
}

impl<T: IntoChild> IntoChild for Option<T> {
    fn into_child(self) -> Option<HtmlNode> {
        self.and_then(IntoChild::into_child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_plain_text_skips_markup() {
        let node = HtmlNode::from(HtmlElement::with_children(
            HtmlTag::P,
            [
                HtmlNode::text("a < b"),
                HtmlNode::entity("nbsp").unwrap(),
                HtmlNode::from(HtmlElement::with_children(HtmlTag::B, ["bold"])),
                HtmlNode::comment("hidden").unwrap(),
                HtmlNode::from(HtmlScript::inline(JsBlock::new())),
                HtmlNode::out_of_band(HtmlNode::text("moved")),
            ],
        ));
        assert_eq!(node.plain_text(), "a < b\u{00A0}bold");
    }

    #[test]
    fn test_comment_rejects_double_dash() {
        assert!(HtmlComment::new("a -- b").is_err());
        assert!(HtmlComment::new("trailing-").is_err());
        assert_eq!(HtmlComment::new(" ok ").unwrap().as_str(), " ok ");
    }

    #[test]
    fn test_prepare_hook_fires_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut wrapped = WrappedNode::new("x").with_prepare(move |_| {
            counter.set(counter.get() + 1);
        });
        assert!(!wrapped.is_prepared());
        assert!(wrapped.prepare());
        assert!(!wrapped.prepare());
        assert_eq!(calls.get(), 1);
        assert!(wrapped.is_prepared());
    }

    #[test]
    fn test_deferred_node_produces_content() {
        let mut wrapped = WrappedNode::deferred(|slot| *slot = Some(HtmlNode::text("late")));
        assert!(wrapped.inner().is_none());
        assert!(wrapped.prepare());
        assert_eq!(wrapped.inner().unwrap().plain_text(), "late");
    }

    #[test]
    fn test_out_of_band_query_respects_settings() {
        let node = HtmlNode::out_of_band("payload");
        let extracting = ConversionSettings::default();
        let in_place = extracting.with_out_of_band_extraction(false);
        assert_eq!(
            node.out_of_band_node(&extracting).unwrap().plain_text(),
            "payload"
        );
        assert!(node.out_of_band_node(&in_place).is_none());

        let wrapped = HtmlNode::from(WrappedNode::new(node));
        assert!(wrapped.out_of_band_node(&extracting).is_some());
        assert!(HtmlNode::text("t").out_of_band_node(&extracting).is_none());
    }

    #[test]
    fn test_absent_children_are_ignored() {
        let missing: Option<&str> = None;
        assert!(missing.into_child().is_none());
        assert!(Some("x").into_child().is_some());
    }
}
