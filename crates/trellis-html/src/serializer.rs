//! Markup serializer.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Writes a converted tree into a [`Formatter`], applying the rules of the
//! selected [`HtmlVersion`]:
//! - void elements close as `<br>` or `<br />`
//! - boolean attributes are minimized or written as `checked="checked"`
//! - `type` attributes on scripts and styles where the version needs them
//! - XHTML output declares its namespace on top-level elements and wraps
//!   inline scripts in a commented CDATA section
//!
//! In indented mode an element puts each child on its own line when it is
//! not phrasing content and all of its children are block-level; otherwise
//! the children stay on the line of the start tag.

use trellis_common::warning::warn_once;
use trellis_common::{Formatter, MarkupError, Result};
use trellis_js::JsBlock;

use crate::document::HtmlDocument;
use crate::element::HtmlElement;
use crate::entity::{escape_attribute, escape_text};
use crate::head::HtmlHead;
use crate::node::{HtmlNode, HtmlScript, HtmlStyle, ScriptSource};
use crate::settings::{ConversionSettings, HtmlVersion};
use crate::tag::{ContentModel, HtmlAttr, HtmlTag};

/// `]]>` inside a CDATA section, closed and reopened around the `>`.
const SPLIT_CDATA_END: &str = "]]]]><![CDATA[>";

pub(crate) struct MarkupWriter<'s> {
    f: Formatter,
    settings: &'s ConversionSettings,
    /// Number of open elements; the namespace goes on elements at depth 0.
    element_depth: usize,
}

impl<'s> MarkupWriter<'s> {
    pub(crate) const fn new(settings: &'s ConversionSettings) -> Self {
        Self {
            f: Formatter::new(settings.indent_html()),
            settings,
            element_depth: 0,
        }
    }

    pub(crate) fn finish(self) -> String {
        self.f.finish()
    }

    const fn version(&self) -> HtmlVersion {
        self.settings.version()
    }

    pub(crate) fn write_document(&mut self, document: &HtmlDocument) -> Result<()> {
        let version = self.version();
        self.f.literal(version.doctype());
        self.f.newline();

        self.f.literal("<html");
        if let Some(lang) = document.lang() {
            // XHTML 1.1 has no `lang` attribute.
            let name = if version.is_xml() { "xml:lang" } else { "lang" };
            self.write_attr(name, lang);
        }
        self.end_start_tag();

        self.element_depth += 1;
        self.f.indent();
        self.f.ensure_newline();
        self.write_head(document.head())?;
        self.f.ensure_newline();
        self.write_element(document.body())?;
        self.f.outdent();
        self.f.ensure_newline();
        self.element_depth -= 1;

        self.f.literal("</html>");
        self.f.newline();
        Ok(())
    }

    pub(crate) fn write_head(&mut self, head: &HtmlHead) -> Result<()> {
        let generated = head.generated_nodes(self.version());
        let children: Vec<&HtmlNode> = generated.iter().chain(head.children()).collect();

        self.f.literal("<head");
        self.end_start_tag();
        self.write_content(HtmlTag::Head, &children)?;
        self.write_end_tag(HtmlTag::Head);
        Ok(())
    }

    pub(crate) fn write_node(&mut self, node: &HtmlNode) -> Result<()> {
        let version = self.version();
        match node {
            HtmlNode::Text(text) if text.is_escaped() => {
                self.f.literal(&escape_text(text.as_str(), version));
            }
            HtmlNode::Text(text) => self.f.literal(text.as_str()),
            HtmlNode::Entity(entity) => self.f.literal(&entity.reference(version)),
            HtmlNode::Comment(comment) => {
                self.f.literal("<!--");
                self.f.literal(comment.as_str());
                self.f.literal("-->");
            }
            HtmlNode::Element(element) => self.write_element(element)?,
            HtmlNode::List(nodes) => {
                let children: Vec<&HtmlNode> = nodes.iter().collect();
                self.write_children(&children, false)?;
            }
            HtmlNode::Script(script) => self.write_script(script),
            HtmlNode::Style(style) => self.write_style(style),
            HtmlNode::Wrapped(wrapped) => {
                let inner = wrapped.inner().ok_or_else(|| {
                    MarkupError::inconsistent_state(
                        "wrapped node has no content; its preparation hook did not provide any",
                    )
                })?;
                self.write_node(inner)?;
            }
            HtmlNode::OutOfBand(container) => {
                let in_place = container
                    .payload()
                    .filter(|_| !self.settings.extract_out_of_band());
                if let Some(payload) = in_place {
                    self.write_node(payload)?;
                }
            }
        }
        Ok(())
    }

    fn write_element(&mut self, element: &HtmlElement) -> Result<()> {
        let tag = element.tag();
        let info = tag.info();
        let version = self.version();
        if info.html5_only && !version.supports_html5_elements() {
            warn_once("HTML", &format!("<{tag}> is not part of {version}"));
        }

        self.f.literal_char('<');
        self.f.literal(tag.name());
        for (attr, value) in element.attrs() {
            self.write_builtin_attr(attr, value);
        }
        for (event, code) in element.event_handlers() {
            self.write_attr(event.name(), &format!("javascript:{}", code.to_source(false)));
        }
        for (name, value) in element.custom_attrs() {
            self.write_attr(name, value);
        }

        if info.content == ContentModel::Void {
            if !element.children().is_empty() {
                warn_once(
                    "HTML",
                    &format!("<{tag}> is a void element; its children were dropped"),
                );
            }
            self.end_void_tag();
            return Ok(());
        }

        self.end_start_tag();
        let children: Vec<&HtmlNode> = element.children().iter().collect();
        self.write_content(tag, &children)?;
        self.write_end_tag(tag);
        Ok(())
    }

    fn write_content(&mut self, tag: HtmlTag, children: &[&HtmlNode]) -> Result<()> {
        let info = tag.info();
        let visible: Vec<&HtmlNode> = children
            .iter()
            .copied()
            .filter(|child| !self.is_extracted(child))
            .collect();

        self.element_depth += 1;
        if info.content == ContentModel::RawText {
            for child in &visible {
                match child {
                    HtmlNode::Text(text) => self.f.literal(text.as_str()),
                    other => self.write_node(other)?,
                }
            }
        } else {
            let block = self.f.is_pretty()
                && !info.inline
                && !visible.is_empty()
                && visible.iter().all(|child| child.is_block_level());
            if block {
                self.f.indent();
            }
            self.write_children(&visible, block)?;
            if block {
                self.f.outdent();
                self.f.ensure_newline();
            }
        }
        self.element_depth -= 1;
        Ok(())
    }

    fn write_children(&mut self, children: &[&HtmlNode], block: bool) -> Result<()> {
        for child in children {
            if let HtmlNode::List(nodes) = child {
                let nested: Vec<&HtmlNode> = nodes
                    .iter()
                    .filter(|node| !self.is_extracted(node))
                    .collect();
                self.write_children(&nested, block)?;
                continue;
            }
            if block {
                self.f.ensure_newline();
            }
            self.write_node(child)?;
        }
        Ok(())
    }

    /// An out-of-band container that renders nothing in place.
    const fn is_extracted(&self, node: &HtmlNode) -> bool {
        self.settings.extract_out_of_band() && matches!(node, HtmlNode::OutOfBand(_))
    }

    fn write_script(&mut self, script: &HtmlScript) {
        self.f.literal("<script");
        if self.version().requires_type_attribute() {
            self.write_attr("type", "text/javascript");
        }
        match script.source() {
            ScriptSource::External(resource) => {
                self.write_attr("src", resource.path());
                if script.is_deferred() {
                    self.write_bool_attr(HtmlAttr::Defer.name());
                }
                self.end_start_tag();
            }
            ScriptSource::Inline(code) => {
                self.end_start_tag();
                if !code.is_empty() {
                    self.write_inline_script(code);
                }
            }
        }
        self.write_end_tag(HtmlTag::Script);
    }

    fn write_inline_script(&mut self, code: &JsBlock) {
        let cdata = self.version().wraps_scripts_in_cdata();
        if self.f.is_pretty() {
            self.f.indent();
            self.f.newline();
            if cdata {
                self.f.literal("//<![CDATA[");
                self.f.newline();
            }
            self.emit_script_code(code, cdata);
            if cdata {
                self.f.ensure_newline();
                self.f.literal("//]]>");
                self.f.newline();
            }
            self.f.outdent();
            self.f.ensure_newline();
        } else {
            // `//` comments run to the end of the line even in compact output.
            if cdata {
                self.f.literal("//<![CDATA[\n");
            }
            self.emit_script_code(code, cdata);
            if cdata {
                self.f.literal("\n//]]>");
            }
        }
    }

    fn emit_script_code(&mut self, code: &JsBlock, cdata: bool) {
        let start = self.f.position();
        code.emit(&mut self.f);
        if cdata {
            self.f.replace_since(start, "]]>", SPLIT_CDATA_END);
        }
    }

    fn write_style(&mut self, style: &HtmlStyle) {
        self.f.literal("<style");
        if self.version().requires_type_attribute() {
            self.write_attr("type", "text/css");
        }
        if let Some(media) = style.media() {
            self.write_attr("media", media);
        }
        self.end_start_tag();

        let indent_css = self.settings.indent_css();
        let mut css = style.sheet().to_css(indent_css);
        if self.version().is_xml() && (css.contains('&') || css.contains("]]>")) {
            // Raw `&` is not well-formed XML character data.
            let sep = if indent_css { "\n" } else { "" };
            css = format!(
                "/*<![CDATA[*/{sep}{}{sep}/*]]>*/",
                css.trim_end().replace("]]>", SPLIT_CDATA_END)
            );
        }
        if self.f.is_pretty() && indent_css && !css.is_empty() {
            self.f.indent();
            self.f.newline();
            for line in css.lines() {
                self.f.literal(line);
                self.f.newline();
            }
            self.f.outdent();
        } else {
            self.f.literal(&css);
        }
        self.write_end_tag(HtmlTag::Style);
    }

    fn write_builtin_attr(&mut self, attr: HtmlAttr, value: &str) {
        if attr.is_boolean() {
            self.write_bool_attr(attr.name());
        } else {
            self.write_attr(attr.name(), value);
        }
    }

    fn write_bool_attr(&mut self, name: &str) {
        if self.version().minimizes_boolean_attributes() {
            self.f.literal_char(' ');
            self.f.literal(name);
        } else {
            self.write_attr(name, name);
        }
    }

    fn write_attr(&mut self, name: &str, value: &str) {
        self.f.literal_char(' ');
        self.f.literal(name);
        self.f.literal("=\"");
        self.f.literal(&escape_attribute(value, self.version()));
        self.f.literal_char('"');
    }

    fn write_namespace(&mut self) {
        let top_level = self.element_depth == 0;
        if let Some(namespace) = self.version().namespace().filter(|_| top_level) {
            self.write_attr("xmlns", namespace);
        }
    }

    fn end_start_tag(&mut self) {
        self.write_namespace();
        self.f.literal_char('>');
    }

    fn end_void_tag(&mut self) {
        self.write_namespace();
        if self.version().self_closes_void_elements() {
            self.f.literal(" />");
        } else {
            self.f.literal_char('>');
        }
    }

    fn write_end_tag(&mut self, tag: HtmlTag) {
        self.f.literal("</");
        self.f.literal(tag.name());
        self.f.literal_char('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_common::warning::{clear_warnings, take_warnings};
    use trellis_css::{CssDeclarationList, CssRule, CssStyleSheet};
    use trellis_js::{JsExpr, JsOperator};

    fn render(node: &HtmlNode, settings: &ConversionSettings) -> String {
        let mut writer = MarkupWriter::new(settings);
        writer.write_node(node).unwrap();
        writer.finish()
    }

    fn compact(version: HtmlVersion) -> &'static ConversionSettings {
        ConversionSettings::canonical(version, false)
    }

    #[test]
    fn test_void_elements_per_version() {
        let br = HtmlNode::from(HtmlElement::new(HtmlTag::Br));
        assert_eq!(render(&br, compact(HtmlVersion::Html4)), "<br>");
        assert_eq!(render(&br, compact(HtmlVersion::Html5)), "<br />");
        assert_eq!(
            render(&br, compact(HtmlVersion::Xhtml1)),
            "<br xmlns=\"http://www.w3.org/1999/xhtml\" />"
        );
    }

    #[test]
    fn test_namespace_only_on_top_level() {
        let div = HtmlNode::from(HtmlElement::with_children(
            HtmlTag::Div,
            [HtmlElement::new(HtmlTag::Br)],
        ));
        assert_eq!(
            render(&div, compact(HtmlVersion::Xhtml1)),
            "<div xmlns=\"http://www.w3.org/1999/xhtml\"><br /></div>"
        );
    }

    #[test]
    fn test_boolean_attributes() {
        let mut input = HtmlElement::new(HtmlTag::Input).with_attr(HtmlAttr::Type, "checkbox");
        input.set_bool_attr(HtmlAttr::Checked, true);
        let input = HtmlNode::from(input);
        assert_eq!(
            render(&input, compact(HtmlVersion::Html4)),
            "<input type=\"checkbox\" checked>"
        );
        assert_eq!(
            render(&input, compact(HtmlVersion::Xhtml1)),
            "<input type=\"checkbox\" checked=\"checked\" xmlns=\"http://www.w3.org/1999/xhtml\" />"
        );
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let a = HtmlNode::from(
            HtmlElement::with_children(HtmlTag::A, ["x < y & z"]).with_attr(HtmlAttr::Title, "\"q\""),
        );
        assert_eq!(
            render(&a, compact(HtmlVersion::Html5)),
            "<a title=\"&quot;q&quot;\">x &lt; y &amp; z</a>"
        );
        assert_eq!(render(&HtmlNode::raw("<b>"), compact(HtmlVersion::Html5)), "<b>");
    }

    #[test]
    fn test_inline_script_per_version() {
        let script = HtmlNode::from(HtmlScript::inline(JsExpr::call("go", []).unwrap()));
        assert_eq!(
            render(&script, compact(HtmlVersion::Html5)),
            "<script>go();</script>"
        );
        assert_eq!(
            render(&script, compact(HtmlVersion::Html4)),
            "<script type=\"text/javascript\">go();</script>"
        );
        assert_eq!(
            render(&script, compact(HtmlVersion::Xhtml1)),
            "<script type=\"text/javascript\" xmlns=\"http://www.w3.org/1999/xhtml\">//<![CDATA[\ngo();\n//]]></script>"
        );
        assert_eq!(
            render(&script, ConversionSettings::canonical(HtmlVersion::Html5, true)),
            "<script>\n  go();\n</script>"
        );
    }

    #[test]
    fn test_cdata_end_in_script_is_split() {
        let var = |name: &str| JsExpr::reference(name).unwrap();
        let check = var("a")
            .index(var("b").index(var("c")))
            .binary(JsOperator::Gt, var("d"));
        let script = HtmlNode::from(HtmlScript::inline(check));
        assert_eq!(
            render(&script, compact(HtmlVersion::Xhtml1)),
            "<script type=\"text/javascript\" xmlns=\"http://www.w3.org/1999/xhtml\">\
             //<![CDATA[\na[b[c]]]]><![CDATA[>d;\n//]]></script>"
        );
        assert_eq!(
            render(&script, ConversionSettings::canonical(HtmlVersion::Xhtml1, true)),
            "<script type=\"text/javascript\" xmlns=\"http://www.w3.org/1999/xhtml\">\n  \
               //<![CDATA[\n  \
               a[b[c]]]]><![CDATA[>d;\n  \
               //]]>\n\
             </script>"
        );
        // Without CDATA the code is left alone.
        assert_eq!(
            render(&script, compact(HtmlVersion::Html5)),
            "<script>a[b[c]]>d;</script>"
        );

        let say = JsExpr::call("say", [JsExpr::string("x]]>y")]).unwrap();
        let literal = HtmlNode::from(HtmlScript::inline(say));
        let xhtml = render(&literal, compact(HtmlVersion::Xhtml1));
        assert_eq!(xhtml.matches("]]>").count(), 1);
        assert!(xhtml.ends_with("say('x]]\\>y');\n//]]></script>"));
    }

    #[test]
    fn test_external_script() {
        let resource = trellis_common::ExternalResource::new("app.js").unwrap();
        let script = HtmlNode::from(HtmlScript::external(resource).with_defer(true));
        assert_eq!(
            render(&script, compact(HtmlVersion::Html5)),
            "<script src=\"app.js\" defer></script>"
        );
    }

    #[test]
    fn test_style_indentation_is_independent() {
        let decls = CssDeclarationList::new().with("margin", "0").unwrap();
        let sheet = CssStyleSheet::new().with_rule(CssRule::new(["body"], decls).unwrap());
        let style = HtmlNode::from(HtmlStyle::new(sheet));

        let pretty_html = ConversionSettings::canonical(HtmlVersion::Html5, true);
        assert_eq!(
            render(&style, pretty_html),
            "<style>\n  body {\n    margin: 0;\n  }\n</style>"
        );
        assert_eq!(
            render(&style, &pretty_html.with_css_indent(false)),
            "<style>body{margin:0;}</style>"
        );
    }

    #[test]
    fn test_xhtml_style_with_ampersand_uses_cdata() {
        let decls = CssDeclarationList::new()
            .with("content", "\"a&b\"")
            .unwrap();
        let sheet = CssStyleSheet::new().with_rule(CssRule::new(["p::after"], decls).unwrap());
        let style = HtmlNode::from(HtmlStyle::new(sheet));

        assert_eq!(
            render(&style, compact(HtmlVersion::Xhtml1)),
            "<style type=\"text/css\" xmlns=\"http://www.w3.org/1999/xhtml\">\
             /*<![CDATA[*/p::after{content:\"a&b\";}/*]]>*/</style>"
        );
        assert_eq!(
            render(&style, compact(HtmlVersion::Html5)),
            "<style>p::after{content:\"a&b\";}</style>"
        );
    }

    #[test]
    fn test_block_layout_when_indenting() {
        let list = HtmlNode::from(HtmlElement::with_children(
            HtmlTag::Ul,
            [
                HtmlElement::with_children(HtmlTag::Li, ["a"]),
                HtmlElement::with_children(HtmlTag::Li, ["b"]),
            ],
        ));
        let pretty = ConversionSettings::canonical(HtmlVersion::Html5, true);
        assert_eq!(render(&list, pretty), "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>");

        let mixed = HtmlNode::from(HtmlElement::with_children(
            HtmlTag::P,
            [
                HtmlNode::text("a "),
                HtmlElement::with_children(HtmlTag::B, ["b"]).into(),
            ],
        ));
        assert_eq!(render(&mixed, pretty), "<p>a <b>b</b></p>");
    }

    #[test]
    fn test_wrapped_without_content_is_inconsistent() {
        let node = HtmlNode::from(crate::node::WrappedNode::deferred(|_| {}));
        let mut writer = MarkupWriter::new(compact(HtmlVersion::Html5));
        assert!(matches!(
            writer.write_node(&node),
            Err(MarkupError::InconsistentState(_))
        ));
    }

    #[test]
    fn test_lossy_output_warns() {
        clear_warnings();
        let br = HtmlNode::from(HtmlElement::with_children(HtmlTag::Br, ["x"]));
        assert_eq!(render(&br, compact(HtmlVersion::Html5)), "<br />");
        let section = HtmlNode::from(HtmlElement::new(HtmlTag::Section));
        assert_eq!(render(&section, compact(HtmlVersion::Html4)), "<section></section>");
        assert_eq!(
            take_warnings(),
            [
                "[HTML] <br> is a void element; its children were dropped",
                "[HTML] <section> is not part of html4",
            ]
        );
    }
}
