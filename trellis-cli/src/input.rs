//! JSON page descriptions.
//!
//! ```json
//! {
//!   "title": "Hello",
//!   "lang": "en",
//!   "stylesheets": ["site.css"],
//!   "styles": [{ "selectors": ["p"], "declarations": { "color": "red" } }],
//!   "scripts": ["app.js"],
//!   "body": [
//!     { "tag": "p", "attrs": { "class": "intro" }, "children": ["Hi"] },
//!     { "out_of_band": { "script": "late.js", "defer": true }, "target": "head" }
//!   ]
//! }
//! ```
//!
//! An `out_of_band` node is moved into the head or to the end of the body
//! when the page is rendered, unless extraction is switched off.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use trellis_common::ExternalResource;
use trellis_css::{CssDeclarationList, CssRule, CssStyleSheet};
use trellis_html::{
    ConversionSettings, HtmlDocument, HtmlElement, HtmlNode, HtmlScript, HtmlStyle, HtmlTag,
    OutOfBandNode, OutOfBandTarget,
};

/// A whole page as read from the input file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageDescription {
    pub title: Option<String>,
    pub lang: Option<String>,
    pub charset: Option<String>,
    /// Linked stylesheet paths, in order.
    pub stylesheets: Vec<String>,
    /// Rules collected into one `<style>` block in the head.
    pub styles: Vec<RuleDescription>,
    /// External script paths, in order.
    pub scripts: Vec<String>,
    pub body: Vec<NodeDescription>,
    /// Settings the command-line flags are applied on top of.
    pub settings: Option<ConversionSettings>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDescription {
    pub selectors: Vec<String>,
    pub declarations: IndexMap<String, String>,
}

/// A body node: a bare string is text, an object is an element, an
/// external script or an out-of-band wrapper.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NodeDescription {
    Text(String),
    OutOfBand {
        out_of_band: Box<NodeDescription>,
        #[serde(default)]
        target: Placement,
    },
    Script {
        script: String,
        #[serde(default)]
        defer: bool,
    },
    Element {
        tag: String,
        #[serde(default)]
        attrs: IndexMap<String, String>,
        #[serde(default)]
        children: Vec<NodeDescription>,
    },
}

/// Where an out-of-band node ends up.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Head,
    #[default]
    Body,
}

impl From<Placement> for OutOfBandTarget {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::Head => Self::Head,
            Placement::Body => Self::Body,
        }
    }
}

impl PageDescription {
    /// Parse a description from JSON source.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or unknown fields.
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("invalid page description")
    }

    /// Build the document this description stands for.
    ///
    /// # Errors
    ///
    /// Fails on unknown tags, invalid attribute names and empty paths or
    /// CSS properties.
    pub fn build(&self) -> Result<HtmlDocument> {
        let mut document = HtmlDocument::new();
        if let Some(lang) = &self.lang {
            document.set_lang(lang.as_str());
        }

        let head = document.head_mut();
        if let Some(charset) = &self.charset {
            head.set_charset(charset.as_str());
        }
        if let Some(title) = &self.title {
            head.set_title(title.as_str());
        }
        for path in &self.stylesheets {
            let link = ExternalResource::new(path.as_str())
                .with_context(|| format!("invalid stylesheet path {path:?}"))?;
            head.add_css_link(link);
        }
        if !self.styles.is_empty() {
            head.add_style(HtmlStyle::new(self.style_sheet()?));
        }
        for path in &self.scripts {
            let resource = ExternalResource::new(path.as_str())
                .with_context(|| format!("invalid script path {path:?}"))?;
            head.add_script(HtmlScript::external(resource));
        }

        for node in &self.body {
            document.body_mut().add_child(node.build()?);
        }
        Ok(document)
    }

    fn style_sheet(&self) -> Result<CssStyleSheet> {
        let mut sheet = CssStyleSheet::new();
        for rule in &self.styles {
            let mut declarations = CssDeclarationList::new();
            for (property, value) in &rule.declarations {
                declarations = declarations
                    .with(property, value)
                    .with_context(|| format!("invalid declaration {property}: {value}"))?;
            }
            let rule = CssRule::new(rule.selectors.iter().map(String::as_str), declarations)
                .context("invalid style rule")?;
            sheet.add_rule(rule);
        }
        Ok(sheet)
    }
}

impl NodeDescription {
    fn build(&self) -> Result<HtmlNode> {
        match self {
            Self::Text(text) => Ok(HtmlNode::text(text.as_str())),
            Self::OutOfBand {
                out_of_band,
                target,
            } => {
                let node = OutOfBandNode::new(out_of_band.build()?).with_target((*target).into());
                Ok(node.into())
            }
            Self::Script { script, defer } => {
                let resource = ExternalResource::new(script.as_str())
                    .with_context(|| format!("invalid script path {script:?}"))?;
                Ok(HtmlScript::external(resource).with_defer(*defer).into())
            }
            Self::Element {
                tag,
                attrs,
                children,
            } => {
                let tag: HtmlTag = tag
                    .parse()
                    .with_context(|| format!("unknown element <{tag}>"))?;
                let mut element = HtmlElement::new(tag);
                for (name, value) in attrs {
                    element
                        .set_custom_attr(name, value.as_str())
                        .with_context(|| format!("invalid attribute {name:?} on <{tag}>"))?;
                }
                for child in children {
                    element.add_child(child.build()?);
                }
                Ok(element.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_html::HtmlVersion;

    fn render(source: &str) -> String {
        let page = PageDescription::from_json(source).unwrap();
        let settings = page.settings.unwrap_or_default();
        page.build().unwrap().render(&settings, None).unwrap()
    }

    #[test]
    fn test_minimal_page() {
        assert_eq!(
            render(r#"{"body": ["hello"]}"#),
            "<!DOCTYPE html><html><head></head><body>hello</body></html>"
        );
    }

    #[test]
    fn test_full_page() {
        let html = render(
            r#"{
                "title": "T",
                "lang": "en",
                "stylesheets": ["site.css"],
                "styles": [{"selectors": ["p"], "declarations": {"color": "red"}}],
                "scripts": ["app.js"],
                "body": [{"tag": "P", "attrs": {"class": "intro"}, "children": ["Hi"]}]
            }"#,
        );
        assert_eq!(
            html,
            "<!DOCTYPE html><html lang=\"en\"><head><title>T</title>\
             <link rel=\"stylesheet\" href=\"site.css\" />\
             <style>p{color:red;}</style>\
             <script src=\"app.js\"></script></head>\
             <body><p class=\"intro\">Hi</p></body></html>"
        );
    }

    #[test]
    fn test_embedded_settings() {
        let page = PageDescription::from_json(r#"{"settings": {"version": "html4"}}"#).unwrap();
        assert_eq!(page.settings.unwrap().version(), HtmlVersion::Html4);
    }

    #[test]
    fn test_unknown_tag_is_reported() {
        let page = PageDescription::from_json(r#"{"body": [{"tag": "blink"}]}"#).unwrap();
        let error = page.build().unwrap_err();
        assert_eq!(error.to_string(), "unknown element <blink>");
    }

    #[test]
    fn test_out_of_band_nodes_are_moved() {
        let html = render(
            r#"{"body": [
                {"out_of_band": {"script": "late.js"}, "target": "head"},
                {"tag": "p", "children": ["x"]},
                {"out_of_band": "footer"}
            ]}"#,
        );
        assert_eq!(
            html,
            "<!DOCTYPE html><html><head><script src=\"late.js\"></script></head>\
             <body><p>x</p>footer</body></html>"
        );
    }

    #[test]
    fn test_in_place_script_node() {
        let html = render(r#"{"body": [{"script": "a.js", "defer": true}]}"#);
        assert!(html.contains("<body><script src=\"a.js\" defer></script></body>"), "{html}");
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        let source = r#"{"body": [{"out_of_band": "x", "target": "footer"}]}"#;
        assert!(PageDescription::from_json(source).is_err());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(PageDescription::from_json(r#"{"titel": "typo"}"#).is_err());
    }
}
