//! Conversion settings: which markup dialect to produce and how to lay it out.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//! [XHTML 1.1 § 3.1.1 Strictly Conforming Documents](https://www.w3.org/TR/xhtml11/conformance.html#strict)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Namespace declared on top-level elements in XHTML output.
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// The markup dialect produced by a conversion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum HtmlVersion {
    /// HTML 4.01 Strict: `<br>`, minimized boolean attributes.
    Html4,
    /// XHTML 1.1: namespaced, `<br />`, `checked="checked"`, CDATA scripts.
    Xhtml1,
    /// HTML5 in its XML-compatible form: `<br />` without a namespace.
    Html5,
}

impl HtmlVersion {
    /// The `<!DOCTYPE ...>` line written before the `<html>` element.
    #[must_use]
    pub const fn doctype(self) -> &'static str {
        match self {
            Self::Html4 => {
                "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">"
            }
            Self::Xhtml1 => {
                "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.1//EN\" \"http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd\">"
            }
            Self::Html5 => "<!DOCTYPE html>",
        }
    }

    /// Namespace declared on top-level elements, if any.
    #[must_use]
    pub const fn namespace(self) -> Option<&'static str> {
        match self {
            Self::Xhtml1 => Some(XHTML_NAMESPACE),
            Self::Html4 | Self::Html5 => None,
        }
    }

    /// Whether the output must be well-formed XML.
    #[must_use]
    pub const fn is_xml(self) -> bool {
        matches!(self, Self::Xhtml1)
    }

    /// Whether void elements are written as `<br />` rather than `<br>`.
    #[must_use]
    pub const fn self_closes_void_elements(self) -> bool {
        !matches!(self, Self::Html4)
    }

    /// Whether boolean attributes are written as just their name.
    #[must_use]
    pub const fn minimizes_boolean_attributes(self) -> bool {
        !self.is_xml()
    }

    /// Whether `<script>` and `<style>` need an explicit `type` attribute.
    #[must_use]
    pub const fn requires_type_attribute(self) -> bool {
        !matches!(self, Self::Html5)
    }

    /// Whether inline script bodies are wrapped in a commented CDATA section.
    #[must_use]
    pub const fn wraps_scripts_in_cdata(self) -> bool {
        self.is_xml()
    }

    /// Whether the version knows elements introduced by HTML5.
    #[must_use]
    pub const fn supports_html5_elements(self) -> bool {
        matches!(self, Self::Html5)
    }
}

/// Policy for one conversion: dialect plus layout flags.
///
/// Values are immutable; the `with_*` methods return modified copies. Use
/// [`ConversionSettings::canonical`] to get the shared per-version values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    version: HtmlVersion,
    indent_html: bool,
    indent_css: bool,
    extract_out_of_band: bool,
}

static HTML4_COMPACT: ConversionSettings = ConversionSettings::new(HtmlVersion::Html4);
static HTML4_INDENTED: ConversionSettings =
    ConversionSettings::new(HtmlVersion::Html4).with_indent(true);
static XHTML1_COMPACT: ConversionSettings = ConversionSettings::new(HtmlVersion::Xhtml1);
static XHTML1_INDENTED: ConversionSettings =
    ConversionSettings::new(HtmlVersion::Xhtml1).with_indent(true);
static HTML5_COMPACT: ConversionSettings = ConversionSettings::new(HtmlVersion::Html5);
static HTML5_INDENTED: ConversionSettings =
    ConversionSettings::new(HtmlVersion::Html5).with_indent(true);

impl ConversionSettings {
    /// Compact settings for `version` with out-of-band extraction enabled.
    #[must_use]
    pub const fn new(version: HtmlVersion) -> Self {
        Self {
            version,
            indent_html: false,
            indent_css: false,
            extract_out_of_band: true,
        }
    }

    /// The shared settings for `version`, indented (HTML and CSS) or compact.
    #[must_use]
    pub const fn canonical(version: HtmlVersion, indent: bool) -> &'static Self {
        match (version, indent) {
            (HtmlVersion::Html4, false) => &HTML4_COMPACT,
            (HtmlVersion::Html4, true) => &HTML4_INDENTED,
            (HtmlVersion::Xhtml1, false) => &XHTML1_COMPACT,
            (HtmlVersion::Xhtml1, true) => &XHTML1_INDENTED,
            (HtmlVersion::Html5, false) => &HTML5_COMPACT,
            (HtmlVersion::Html5, true) => &HTML5_INDENTED,
        }
    }

    /// Set both the HTML and the CSS indentation flag.
    #[must_use]
    pub const fn with_indent(self, indent: bool) -> Self {
        self.with_html_indent(indent).with_css_indent(indent)
    }

    /// Set whether the HTML markup is indented and aligned.
    #[must_use]
    pub const fn with_html_indent(mut self, indent: bool) -> Self {
        self.indent_html = indent;
        self
    }

    /// Set whether embedded CSS is indented and aligned.
    #[must_use]
    pub const fn with_css_indent(mut self, indent: bool) -> Self {
        self.indent_css = indent;
        self
    }

    /// Set whether out-of-band nodes are moved to the head or body end.
    ///
    /// When disabled they render at their authored position.
    #[must_use]
    pub const fn with_out_of_band_extraction(mut self, extract: bool) -> Self {
        self.extract_out_of_band = extract;
        self
    }

    /// The markup dialect.
    #[must_use]
    pub const fn version(&self) -> HtmlVersion {
        self.version
    }

    /// Whether HTML output is indented.
    #[must_use]
    pub const fn indent_html(&self) -> bool {
        self.indent_html
    }

    /// Whether embedded CSS is indented.
    #[must_use]
    pub const fn indent_css(&self) -> bool {
        self.indent_css
    }

    /// Whether out-of-band nodes are extracted.
    #[must_use]
    pub const fn extract_out_of_band(&self) -> bool {
        self.extract_out_of_band
    }
}

impl Default for ConversionSettings {
    fn default() -> Self {
        *Self::canonical(HtmlVersion::Html5, false)
    }
}
