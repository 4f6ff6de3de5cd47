//! Integration tests for the conversion pass: out-of-band placement,
//! customizers, wrapped nodes and version rules.

use std::cell::Cell;
use std::rc::Rc;

use trellis_common::MarkupError;
use trellis_common::warning::{clear_warnings, take_warnings};
use trellis_css::{CssDeclarationList, CssRule, CssStyleSheet};
use trellis_html::{
    ConversionSettings, Customizer, HtmlAttr, HtmlDocument, HtmlElement, HtmlNode, HtmlScript,
    HtmlStyle, HtmlTag, HtmlVersion, OutOfBandNode, ScriptsAtBodyEnd, WrappedNode,
};
use trellis_js::JsExpr;

fn html5() -> &'static ConversionSettings {
    ConversionSettings::canonical(HtmlVersion::Html5, false)
}

fn script(name: &str) -> HtmlScript {
    HtmlScript::inline(JsExpr::call(name, []).unwrap())
}

fn style() -> HtmlStyle {
    let decls = CssDeclarationList::new().with("color", "red").unwrap();
    HtmlStyle::new(CssStyleSheet::new().with_rule(CssRule::new(["p"], decls).unwrap()))
}

// ========== Out-of-band placement ==========

#[test]
fn test_out_of_band_nodes_move_to_their_targets() {
    let mut document = HtmlDocument::new();
    document.body_mut().add_children([
        HtmlNode::out_of_band(script("first")),
        HtmlElement::with_children(
            HtmlTag::Div,
            [HtmlNode::from(OutOfBandNode::in_head(style())), HtmlNode::text("x")],
        )
        .into(),
        HtmlNode::out_of_band(script("second")),
    ]);

    assert_eq!(
        document.render(html5(), None).unwrap(),
        "<!DOCTYPE html><html><head><style>p{color:red;}</style></head>\
         <body><div>x</div><script>first();</script><script>second();</script></body></html>"
    );
}

#[test]
fn test_payload_appears_exactly_once() {
    let mut document = HtmlDocument::new();
    document
        .body_mut()
        .add_child(HtmlNode::out_of_band(script("once")));
    let html = document.render(html5(), None).unwrap();
    assert_eq!(html.matches("once();").count(), 1);

    let again = document.render(html5(), None).unwrap();
    assert_eq!(again.matches("once();").count(), 1);
}

#[test]
fn test_extraction_disabled_keeps_authored_position() {
    let settings = html5().with_out_of_band_extraction(false);
    let mut document = HtmlDocument::new();
    document.body_mut().add_children([
        HtmlNode::out_of_band(script("inline")),
        HtmlNode::text("after"),
    ]);
    assert!(
        document
            .render(&settings, None)
            .unwrap()
            .ends_with("<body><script>inline();</script>after</body></html>")
    );
}

#[test]
fn test_fragment_body_receives_payloads() {
    let mut body = HtmlNode::from(HtmlElement::with_children(
        HtmlTag::Body,
        [
            HtmlNode::out_of_band(script("late")),
            HtmlElement::with_children(HtmlTag::P, ["text"]).into(),
        ],
    ));
    assert_eq!(
        body.render(html5(), None).unwrap(),
        "<body><p>text</p><script>late();</script></body>"
    );
}

#[test]
fn test_fragment_head_payload_falls_back_to_body() {
    clear_warnings();
    let mut body = HtmlNode::from(HtmlElement::with_children(
        HtmlTag::Body,
        [HtmlNode::from(OutOfBandNode::in_head(style()))],
    ));
    assert_eq!(
        body.render(html5(), None).unwrap(),
        "<body><style>p{color:red;}</style></body>"
    );
    assert_eq!(take_warnings().len(), 1);
}

#[test]
fn test_fragment_without_targets_fails() {
    let div = || {
        HtmlNode::from(HtmlElement::with_children(
            HtmlTag::Div,
            [HtmlNode::out_of_band(script("lost"))],
        ))
    };
    assert!(matches!(
        div().render(html5(), None),
        Err(MarkupError::InconsistentState(_))
    ));
    assert!(matches!(
        div().render(html5(), Some(&ScriptsAtBodyEnd)),
        Err(MarkupError::InconsistentState(_))
    ));
}

#[test]
fn test_fragment_without_payloads_needs_no_targets() {
    let mut div = HtmlNode::from(HtmlElement::with_children(HtmlTag::Div, ["plain"]));
    assert_eq!(div.render(html5(), None).unwrap(), "<div>plain</div>");
}

#[test]
fn test_scripts_at_body_end() {
    let mut document = HtmlDocument::new();
    document
        .body_mut()
        .add_child(OutOfBandNode::in_head(script("moved")));
    let html = document.render(html5(), Some(&ScriptsAtBodyEnd)).unwrap();
    assert!(html.contains("<head></head>"));
    assert!(html.contains("<body><script>moved();</script></body>"));
}

// ========== Customizers ==========

/// Tags every element with a class and counts the elements it saw.
struct Marker {
    seen: Cell<usize>,
}

impl Customizer for Marker {
    fn customize_element(
        &self,
        parent: Option<&HtmlElement>,
        element: &mut HtmlElement,
        version: HtmlVersion,
    ) {
        self.seen.set(self.seen.get() + 1);
        if parent.is_some() && version == HtmlVersion::Html5 {
            element.add_class("child");
        }
    }
}

#[test]
fn test_customizer_sees_every_element() {
    let marker = Marker { seen: Cell::new(0) };
    let mut node = HtmlNode::from(HtmlElement::with_children(
        HtmlTag::Ul,
        [
            HtmlElement::with_children(HtmlTag::Li, ["a"]),
            HtmlElement::with_children(HtmlTag::Li, ["b"]),
        ],
    ));
    assert_eq!(
        node.render(html5(), Some(&marker)).unwrap(),
        "<ul><li class=\"child\">a</li><li class=\"child\">b</li></ul>"
    );
    assert_eq!(marker.seen.get(), 3);
}

#[test]
fn test_customizer_sees_out_of_band_payloads() {
    let marker = Marker { seen: Cell::new(0) };
    let mut document = HtmlDocument::new();
    document
        .body_mut()
        .add_child(HtmlNode::out_of_band(HtmlElement::new(HtmlTag::Div)));
    let html = document.render(html5(), Some(&marker)).unwrap();
    // body, then the moved div
    assert_eq!(marker.seen.get(), 2);
    assert!(html.contains("<body><div class=\"child\"></div></body>"));
}

// ========== Wrapped nodes ==========

#[test]
fn test_prepare_hook_fires_once_across_renders() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let wrapped = WrappedNode::new(HtmlElement::new(HtmlTag::Span)).with_prepare(move |inner| {
        counter.set(counter.get() + 1);
        if let Some(HtmlNode::Element(span)) = inner {
            span.set_attr(HtmlAttr::Title, "prepared");
        }
    });
    let mut node = HtmlNode::from(HtmlElement::with_children(HtmlTag::Div, [wrapped]));

    let first = node.render(html5(), None).unwrap();
    let second = node.render(html5(), None).unwrap();
    assert_eq!(first, "<div><span title=\"prepared\"></span></div>");
    assert_eq!(first, second);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_deferred_node_renders_produced_content() {
    let mut node = HtmlNode::from(WrappedNode::deferred(|slot| {
        *slot = Some(HtmlElement::with_children(HtmlTag::Em, ["late"]).into());
    }));
    assert_eq!(node.render(html5(), None).unwrap(), "<em>late</em>");
}

#[test]
fn test_deferred_node_without_content_is_inconsistent() {
    let mut node = HtmlNode::from(HtmlElement::with_children(
        HtmlTag::Div,
        [WrappedNode::deferred(|_| {})],
    ));
    assert!(matches!(
        node.render(html5(), None),
        Err(MarkupError::InconsistentState(_))
    ));
}

#[test]
fn test_wrapped_out_of_band_is_forwarded() {
    let mut document = HtmlDocument::new();
    document
        .body_mut()
        .add_child(WrappedNode::new(HtmlNode::out_of_band(script("wrapped"))));
    let html = document.render(html5(), None).unwrap();
    assert!(html.ends_with("<body><script>wrapped();</script></body></html>"));
}

// ========== Version rules ==========

#[test]
fn test_html5_elements_warn_in_older_versions() {
    clear_warnings();
    let mut node = HtmlNode::from(HtmlElement::new(HtmlTag::Nav));
    let html4 = ConversionSettings::canonical(HtmlVersion::Html4, false);
    assert_eq!(node.render(html4, None).unwrap(), "<nav></nav>");
    assert_eq!(take_warnings(), ["[HTML] <nav> is not part of html4"]);

    let _ = node.render(html5(), None).unwrap();
    assert!(take_warnings().is_empty());
}

#[test]
fn test_settings_from_json() {
    let settings: ConversionSettings =
        serde_json::from_str(r#"{"version": "xhtml1", "indent_html": true}"#).unwrap();
    assert_eq!(settings.version(), HtmlVersion::Xhtml1);
    assert!(settings.indent_html());
    assert!(!settings.indent_css());
    assert!(settings.extract_out_of_band());
}
