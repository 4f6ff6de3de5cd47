//! A complete document: doctype, `<html>`, head and body.

use trellis_common::Result;

use crate::convert;
use crate::customizer::Customizer;
use crate::element::HtmlElement;
use crate::head::HtmlHead;
use crate::settings::ConversionSettings;
use crate::tag::HtmlTag;

/// The root of a page.
#[derive(Debug)]
pub struct HtmlDocument {
    head: HtmlHead,
    body: HtmlElement,
    lang: Option<String>,
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlDocument {
    /// A document with an empty head and body.
    #[must_use]
    pub fn new() -> Self {
        Self {
            head: HtmlHead::new(),
            body: HtmlElement::new(HtmlTag::Body),
            lang: None,
        }
    }

    /// The head.
    #[must_use]
    pub const fn head(&self) -> &HtmlHead {
        &self.head
    }

    /// Mutable access to the head.
    pub const fn head_mut(&mut self) -> &mut HtmlHead {
        &mut self.head
    }

    /// The `<body>` element.
    #[must_use]
    pub const fn body(&self) -> &HtmlElement {
        &self.body
    }

    /// Mutable access to the `<body>` element.
    pub const fn body_mut(&mut self) -> &mut HtmlElement {
        &mut self.body
    }

    /// Set the `lang` of the `<html>` element.
    pub fn set_lang(&mut self, lang: impl Into<String>) {
        self.lang = Some(lang.into());
    }

    /// The document language.
    #[must_use]
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    pub(crate) const fn parts_mut(&mut self) -> (&mut HtmlHead, &mut HtmlElement) {
        (&mut self.head, &mut self.body)
    }

    /// Convert the document to markup.
    ///
    /// Out-of-band payloads are moved into the head or to the end of the
    /// body before writing, so rendering the same document again produces
    /// the same text.
    ///
    /// # Errors
    ///
    /// Returns `InconsistentState` if a deferred wrapped node never produced
    /// content, or if a customizer fails to place out-of-band payloads.
    pub fn render(
        &mut self,
        settings: &ConversionSettings,
        customizer: Option<&dyn Customizer>,
    ) -> Result<String> {
        convert::convert_document(self, settings, customizer)
    }
}
