//! The conversion pass: customization, out-of-band collection, placement
//! and serialization.
//!
//! One depth-first pre-order traversal prepares wrapped nodes, hands every
//! element to the customizer before its children, and takes out-of-band
//! payloads out of the tree in the order they are met. A payload is
//! traversed itself, and payloads nested in it are collected right after
//! it. Once the traversal is complete the customizer places the whole
//! collection, then the tree is written.

use trellis_common::Result;

use crate::customizer::{place_out_of_band, Customizer, ExtractedNode, OutOfBandTargets};
use crate::document::HtmlDocument;
use crate::element::HtmlElement;
use crate::head::HtmlHead;
use crate::node::HtmlNode;
use crate::serializer::MarkupWriter;
use crate::settings::ConversionSettings;
use crate::tag::HtmlTag;

struct Pass<'c> {
    settings: &'c ConversionSettings,
    customizer: Option<&'c dyn Customizer>,
    collected: Vec<ExtractedNode>,
}

impl<'c> Pass<'c> {
    const fn new(settings: &'c ConversionSettings, customizer: Option<&'c dyn Customizer>) -> Self {
        Self {
            settings,
            customizer,
            collected: Vec::new(),
        }
    }

    fn visit_all(&mut self, nodes: &mut [HtmlNode], parent: Option<&HtmlElement>) {
        for node in nodes {
            self.visit(node, parent);
        }
    }

    fn visit(&mut self, node: &mut HtmlNode, parent: Option<&HtmlElement>) {
        if let HtmlNode::Wrapped(wrapped) = node {
            let _ = wrapped.prepare();
        }

        if let Some((mut payload, target)) = node.take_out_of_band(self.settings) {
            let mut nested = Pass::new(self.settings, self.customizer);
            nested.visit(&mut payload, parent);
            self.collected.push(ExtractedNode::new(payload, target));
            self.collected.append(&mut nested.collected);
            return;
        }

        match node {
            HtmlNode::Element(element) => self.visit_element(element, parent),
            HtmlNode::List(nodes) => self.visit_all(nodes, parent),
            HtmlNode::Wrapped(wrapped) => {
                if let Some(inner) = wrapped.inner_mut() {
                    self.visit(inner, parent);
                }
            }
            HtmlNode::OutOfBand(container) => {
                if let Some(payload) = container.payload_mut() {
                    self.visit(payload, parent);
                }
            }
            HtmlNode::Text(_)
            | HtmlNode::Entity(_)
            | HtmlNode::Comment(_)
            | HtmlNode::Script(_)
            | HtmlNode::Style(_) => {}
        }
    }

    fn visit_element(&mut self, element: &mut HtmlElement, parent: Option<&HtmlElement>) {
        if let Some(customizer) = self.customizer {
            customizer.customize_element(parent, element, self.settings.version());
        }
        let mut children = std::mem::take(element.children_mut());
        self.visit_all(&mut children, Some(&*element));
        *element.children_mut() = children;
    }

    fn place(self, targets: OutOfBandTargets<'_>) -> Result<()> {
        match self.customizer {
            Some(customizer) => customizer.handle_out_of_band(self.collected, targets),
            None => place_out_of_band(self.collected, targets),
        }
    }
}

/// Convert a whole document.
pub(crate) fn convert_document(
    document: &mut HtmlDocument,
    settings: &ConversionSettings,
    customizer: Option<&dyn Customizer>,
) -> Result<String> {
    let mut pass = Pass::new(settings, customizer);
    {
        let (head, body) = document.parts_mut();
        pass.visit_all(head.children_mut(), None);
        pass.visit_element(body, None);
        pass.place(OutOfBandTargets {
            head: Some(head),
            body: Some(body),
        })?;
    }

    let mut writer = MarkupWriter::new(settings);
    writer.write_document(document)?;
    Ok(writer.finish())
}

/// Convert a node on its own; a `body` root receives the payloads.
pub(crate) fn convert_fragment(
    node: &mut HtmlNode,
    settings: &ConversionSettings,
    customizer: Option<&dyn Customizer>,
) -> Result<String> {
    let mut pass = Pass::new(settings, customizer);
    pass.visit(node, None);
    let body = match node {
        HtmlNode::Element(element) if element.tag() == HtmlTag::Body => Some(element),
        _ => None,
    };
    pass.place(OutOfBandTargets { head: None, body })?;

    let mut writer = MarkupWriter::new(settings);
    writer.write_node(node)?;
    Ok(writer.finish())
}

/// Convert a head on its own; it receives the payloads.
pub(crate) fn convert_head(
    head: &mut HtmlHead,
    settings: &ConversionSettings,
    customizer: Option<&dyn Customizer>,
) -> Result<String> {
    let mut pass = Pass::new(settings, customizer);
    pass.visit_all(head.children_mut(), None);
    pass.place(OutOfBandTargets {
        head: Some(head),
        body: None,
    })?;

    let mut writer = MarkupWriter::new(settings);
    writer.write_head(head)?;
    Ok(writer.finish())
}
