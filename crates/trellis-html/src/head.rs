//! [§ 4.2 Document metadata](https://html.spec.whatwg.org/multipage/semantics.html#document-metadata)
//!
//! The head is kept as typed fields rather than a child list: the title,
//! the base URL and target, `<meta>` entries, stylesheet links, inline
//! styles and scripts. Extra nodes go into a plain child list. The
//! elements are generated when the head is written, in a fixed order.

use trellis_common::error::require_non_empty;
use trellis_common::{ExternalResource, Result};

use crate::convert;
use crate::customizer::Customizer;
use crate::element::HtmlElement;
use crate::node::{HtmlNode, HtmlScript, HtmlStyle, IntoChild};
use crate::settings::{ConversionSettings, HtmlVersion};
use crate::tag::{HtmlAttr, HtmlTag};

/// A `<meta>` element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HtmlMeta {
    /// The document encoding.
    Charset(String),
    /// `<meta name=... content=...>`
    Named {
        /// Metadata name, e.g. `description`.
        name: String,
        /// Value.
        content: String,
    },
    /// `<meta http-equiv=... content=...>`
    HttpEquiv {
        /// Pragma, e.g. `refresh`.
        equiv: String,
        /// Value.
        content: String,
    },
}

impl HtmlMeta {
    /// `<meta name=... content=...>`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is empty.
    pub fn named(name: impl Into<String>, content: impl Into<String>) -> Result<Self> {
        let name = name.into();
        require_non_empty("name", &name)?;
        Ok(Self::Named {
            name,
            content: content.into(),
        })
    }

    /// [§ 4.2.5.4 Specifying the document's character encoding](https://html.spec.whatwg.org/multipage/semantics.html#charset)
    ///
    /// HTML5 has `<meta charset>`; older versions spell it as a
    /// `Content-Type` pragma.
    fn to_element(&self, version: HtmlVersion) -> HtmlElement {
        let meta = HtmlElement::new(HtmlTag::Meta);
        match self {
            Self::Charset(charset) if version == HtmlVersion::Html5 => {
                meta.with_attr(HtmlAttr::Charset, charset.as_str())
            }
            Self::Charset(charset) => meta
                .with_attr(HtmlAttr::HttpEquiv, "Content-Type")
                .with_attr(HtmlAttr::Content, format!("text/html; charset={charset}")),
            Self::Named { name, content } => meta
                .with_attr(HtmlAttr::Name, name.as_str())
                .with_attr(HtmlAttr::Content, content.as_str()),
            Self::HttpEquiv { equiv, content } => meta
                .with_attr(HtmlAttr::HttpEquiv, equiv.as_str())
                .with_attr(HtmlAttr::Content, content.as_str()),
        }
    }
}

/// The `<head>` of a document.
#[derive(Debug, Default)]
pub struct HtmlHead {
    title: Option<String>,
    base_href: Option<String>,
    base_target: Option<String>,
    metas: Vec<HtmlMeta>,
    css_links: Vec<ExternalResource>,
    styles: Vec<HtmlStyle>,
    scripts: Vec<HtmlScript>,
    children: Vec<HtmlNode>,
}

impl HtmlHead {
    /// An empty head.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Remove the title.
    pub fn clear_title(&mut self) {
        self.title = None;
    }

    /// The document title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the `href` of `<base>`.
    pub fn set_base_href(&mut self, href: impl Into<String>) {
        self.base_href = Some(href.into());
    }

    /// Remove the `href` of `<base>`.
    pub fn clear_base_href(&mut self) {
        self.base_href = None;
    }

    /// Set the `target` of `<base>`.
    pub fn set_base_target(&mut self, target: impl Into<String>) {
        self.base_target = Some(target.into());
    }

    /// Remove the `target` of `<base>`.
    pub fn clear_base_target(&mut self) {
        self.base_target = None;
    }

    /// The `<base>` href and target.
    #[must_use]
    pub fn base(&self) -> (Option<&str>, Option<&str>) {
        (self.base_href.as_deref(), self.base_target.as_deref())
    }

    /// Set the charset, replacing an earlier one.
    pub fn set_charset(&mut self, charset: impl Into<String>) {
        self.metas.retain(|meta| !matches!(meta, HtmlMeta::Charset(_)));
        self.metas.insert(0, HtmlMeta::Charset(charset.into()));
    }

    /// Add a `<meta>` entry.
    pub fn add_meta(&mut self, meta: HtmlMeta) {
        if let HtmlMeta::Charset(charset) = meta {
            self.set_charset(charset);
        } else {
            self.metas.push(meta);
        }
    }

    /// The `<meta>` entries in output order.
    #[must_use]
    pub fn metas(&self) -> &[HtmlMeta] {
        &self.metas
    }

    /// Link an external stylesheet.
    pub fn add_css_link(&mut self, resource: ExternalResource) {
        self.css_links.push(resource);
    }

    /// Linked stylesheets in order.
    #[must_use]
    pub fn css_links(&self) -> &[ExternalResource] {
        &self.css_links
    }

    /// Add an inline stylesheet.
    pub fn add_style(&mut self, style: HtmlStyle) {
        self.styles.push(style);
    }

    /// Add a script.
    pub fn add_script(&mut self, script: HtmlScript) {
        self.scripts.push(script);
    }

    /// Scripts in order.
    #[must_use]
    pub fn scripts(&self) -> &[HtmlScript] {
        &self.scripts
    }

    /// Append an extra node after the generated elements; `None` is ignored.
    pub fn add_child(&mut self, child: impl IntoChild) {
        if let Some(node) = child.into_child() {
            self.children.push(node);
        }
    }

    /// The extra nodes.
    #[must_use]
    pub fn children(&self) -> &[HtmlNode] {
        &self.children
    }

    /// Mutable access to the extra nodes.
    pub const fn children_mut(&mut self) -> &mut Vec<HtmlNode> {
        &mut self.children
    }

    /// Place a node moved out of the body: styles and scripts join their
    /// lists, anything else is appended to the extra nodes.
    pub fn add_out_of_band(&mut self, node: HtmlNode) {
        match node {
            HtmlNode::Style(style) => self.add_style(style),
            HtmlNode::Script(script) => self.add_script(script),
            other => self.children.push(other),
        }
    }

    /// Convert the head on its own.
    ///
    /// Out-of-band payloads found in the extra nodes stay in the head.
    ///
    /// # Errors
    ///
    /// See [`HtmlNode::render`].
    pub fn render(
        &mut self,
        settings: &ConversionSettings,
        customizer: Option<&dyn Customizer>,
    ) -> Result<String> {
        convert::convert_head(self, settings, customizer)
    }

    /// The generated elements, in output order: metas, title, base,
    /// stylesheet links, styles, scripts.
    pub(crate) fn generated_nodes(&self, version: HtmlVersion) -> Vec<HtmlNode> {
        let mut nodes: Vec<HtmlNode> = self
            .metas
            .iter()
            .map(|meta| meta.to_element(version).into())
            .collect();

        if let Some(title) = &self.title {
            nodes.push(HtmlElement::with_children(HtmlTag::Title, [title.as_str()]).into());
        }

        if self.base_href.is_some() || self.base_target.is_some() {
            let mut base = HtmlElement::new(HtmlTag::Base);
            if let Some(href) = &self.base_href {
                base.set_attr(HtmlAttr::Href, href.as_str());
            }
            if let Some(target) = &self.base_target {
                base.set_attr(HtmlAttr::Target, target.as_str());
            }
            nodes.push(base.into());
        }

        for link in &self.css_links {
            let mut element = HtmlElement::new(HtmlTag::Link).with_attr(HtmlAttr::Rel, "stylesheet");
            if version.requires_type_attribute() {
                element.set_attr(HtmlAttr::Type, "text/css");
            }
            element.set_attr(HtmlAttr::Href, link.path());
            nodes.push(element.into());
        }

        nodes.extend(self.styles.iter().cloned().map(HtmlNode::Style));
        nodes.extend(self.scripts.iter().cloned().map(HtmlNode::Script));
        nodes
    }
}
