//! Interception points of the conversion pass.
//!
//! A [`Customizer`] sees every element once, before its children, and
//! decides once per conversion where the collected out-of-band payloads
//! go. Both methods have defaults, so an implementation overrides only
//! what it needs. Passing no customizer means the defaults.

use trellis_common::warning::warn_once;
use trellis_common::{MarkupError, Result};

use crate::element::HtmlElement;
use crate::head::HtmlHead;
use crate::node::{HtmlNode, OutOfBandTarget};
use crate::settings::HtmlVersion;

/// A payload taken out of the tree, with the region it asked for.
#[derive(Debug)]
pub struct ExtractedNode {
    node: HtmlNode,
    target: OutOfBandTarget,
}

impl ExtractedNode {
    pub(crate) const fn new(node: HtmlNode, target: OutOfBandTarget) -> Self {
        Self { node, target }
    }

    /// The payload.
    #[must_use]
    pub const fn node(&self) -> &HtmlNode {
        &self.node
    }

    /// The requested region.
    #[must_use]
    pub const fn target(&self) -> OutOfBandTarget {
        self.target
    }

    /// Take the payload.
    #[must_use]
    pub fn into_node(self) -> HtmlNode {
        self.node
    }
}

/// The regions a conversion can place payloads into.
///
/// A fragment conversion may have neither.
#[derive(Debug)]
pub struct OutOfBandTargets<'a> {
    /// The document head.
    pub head: Option<&'a mut HtmlHead>,
    /// The body element; payloads are appended to its children.
    pub body: Option<&'a mut HtmlElement>,
}

/// Hooks called by the conversion pass.
pub trait Customizer {
    /// Called for every element before its children are visited.
    ///
    /// The element may be changed freely. `parent` is `None` for the root
    /// of the conversion; its children are detached while the subtree is
    /// visited.
    fn customize_element(
        &self,
        _parent: Option<&HtmlElement>,
        _element: &mut HtmlElement,
        _version: HtmlVersion,
    ) {
    }

    /// Called once after the traversal with every payload in traversal
    /// order, even when there are none.
    ///
    /// # Errors
    ///
    /// The default fails as [`place_out_of_band`] does.
    fn handle_out_of_band(
        &self,
        nodes: Vec<ExtractedNode>,
        targets: OutOfBandTargets<'_>,
    ) -> Result<()> {
        place_out_of_band(nodes, targets)
    }
}

/// Default placement: each payload goes to the region it asked for.
///
/// Head payloads are routed with [`HtmlHead::add_out_of_band`]; body
/// payloads are appended to the body. A payload whose region is missing
/// goes to the other one with a warning.
///
/// # Errors
///
/// Returns `InconsistentState` if there are payloads and neither region
/// exists.
pub fn place_out_of_band(nodes: Vec<ExtractedNode>, targets: OutOfBandTargets<'_>) -> Result<()> {
    let OutOfBandTargets { mut head, mut body } = targets;
    for extracted in nodes {
        let target = extracted.target();
        match (target, head.as_deref_mut(), body.as_deref_mut()) {
            (OutOfBandTarget::Head, Some(head), _) => head.add_out_of_band(extracted.into_node()),
            (OutOfBandTarget::Body, _, Some(body)) => body.add_child(extracted.into_node()),
            (OutOfBandTarget::Head, None, Some(body)) => {
                warn_once("HTML", "no head to place out-of-band content into; using the body");
                body.add_child(extracted.into_node());
            }
            (OutOfBandTarget::Body, Some(head), None) => {
                warn_once("HTML", "no body to place out-of-band content into; using the head");
                head.add_out_of_band(extracted.into_node());
            }
            (_, None, None) => {
                return Err(MarkupError::inconsistent_state(
                    "out-of-band content was collected but there is no head or body to place it in",
                ));
            }
        }
    }
    Ok(())
}

/// Places every payload at the end of the body, whatever its target.
///
/// Falls back to the default placement when there is no body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptsAtBodyEnd;

impl Customizer for ScriptsAtBodyEnd {
    fn handle_out_of_band(
        &self,
        nodes: Vec<ExtractedNode>,
        targets: OutOfBandTargets<'_>,
    ) -> Result<()> {
        let OutOfBandTargets { head, body } = targets;
        match body {
            Some(body) => {
                body.add_children(nodes.into_iter().map(ExtractedNode::into_node));
                Ok(())
            }
            None => place_out_of_band(nodes, OutOfBandTargets { head, body: None }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::HtmlTag;
    use trellis_common::warning::{clear_warnings, take_warnings};

    fn extracted(text: &str, target: OutOfBandTarget) -> ExtractedNode {
        ExtractedNode::new(HtmlNode::text(text), target)
    }

    #[test]
    fn test_default_placement_follows_target() {
        let mut head = HtmlHead::new();
        let mut body = HtmlElement::new(HtmlTag::Body);
        place_out_of_band(
            vec![
                extracted("a", OutOfBandTarget::Body),
                extracted("b", OutOfBandTarget::Head),
                extracted("c", OutOfBandTarget::Body),
            ],
            OutOfBandTargets {
                head: Some(&mut head),
                body: Some(&mut body),
            },
        )
        .unwrap();
        let texts: Vec<_> = body.children().iter().map(HtmlNode::plain_text).collect();
        assert_eq!(texts, ["a", "c"]);
        assert_eq!(head.children()[0].plain_text(), "b");
    }

    #[test]
    fn test_missing_head_falls_back_to_body() {
        clear_warnings();
        let mut body = HtmlElement::new(HtmlTag::Body);
        place_out_of_band(
            vec![extracted("a", OutOfBandTarget::Head)],
            OutOfBandTargets {
                head: None,
                body: Some(&mut body),
            },
        )
        .unwrap();
        assert_eq!(body.children().len(), 1);
        assert_eq!(take_warnings().len(), 1);
    }

    #[test]
    fn test_no_targets_is_an_error() {
        let result = place_out_of_band(
            vec![extracted("a", OutOfBandTarget::Body)],
            OutOfBandTargets {
                head: None,
                body: None,
            },
        );
        assert!(matches!(result, Err(MarkupError::InconsistentState(_))));

        let empty = place_out_of_band(
            Vec::new(),
            OutOfBandTargets {
                head: None,
                body: None,
            },
        );
        assert!(empty.is_ok());
    }

    #[test]
    fn test_scripts_at_body_end_ignores_target() {
        let mut head = HtmlHead::new();
        let mut body = HtmlElement::new(HtmlTag::Body);
        ScriptsAtBodyEnd
            .handle_out_of_band(
                vec![extracted("a", OutOfBandTarget::Head)],
                OutOfBandTargets {
                    head: Some(&mut head),
                    body: Some(&mut body),
                },
            )
            .unwrap();
        assert_eq!(body.children().len(), 1);
        assert!(head.children().is_empty());
    }
}
