//! [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
//!
//! "Elements have an associated namespace, namespace prefix, local name,
//! custom element state, custom element definition, is value."
//!
//! Here an element is its tag, three insertion-ordered attribute maps
//! (built-in attributes, event handlers, custom attributes) and its
//! children. Output writes the maps in that order.

use indexmap::IndexMap;
use trellis_common::{MarkupError, Result};
use trellis_css::CssDeclarationList;
use trellis_js::JsBlock;

use crate::node::{HtmlNode, IntoChild};
use crate::tag::{HtmlAttr, HtmlEvent, HtmlTag};

/// An element node.
#[derive(Debug)]
pub struct HtmlElement {
    tag: HtmlTag,
    attrs: IndexMap<HtmlAttr, String>,
    events: IndexMap<HtmlEvent, JsBlock>,
    custom_attrs: IndexMap<String, String>,
    children: Vec<HtmlNode>,
}

impl HtmlElement {
    /// An element without attributes or children.
    #[must_use]
    pub fn new(tag: HtmlTag) -> Self {
        Self {
            tag,
            attrs: IndexMap::new(),
            events: IndexMap::new(),
            custom_attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// An element with children; `None` items are skipped.
    #[must_use]
    pub fn with_children<C: IntoChild>(tag: HtmlTag, children: impl IntoIterator<Item = C>) -> Self {
        let mut element = Self::new(tag);
        element.add_children(children);
        element
    }

    /// The tag; fixed at construction.
    #[must_use]
    pub const fn tag(&self) -> HtmlTag {
        self.tag
    }

    // Children

    /// Append a child; `None` is ignored.
    pub fn add_child(&mut self, child: impl IntoChild) {
        if let Some(node) = child.into_child() {
            self.children.push(node);
        }
    }

    /// Append a child, builder style.
    #[must_use]
    pub fn with_child(mut self, child: impl IntoChild) -> Self {
        self.add_child(child);
        self
    }

    /// Append several children in order.
    pub fn add_children<C: IntoChild>(&mut self, children: impl IntoIterator<Item = C>) {
        self.children
            .extend(children.into_iter().filter_map(IntoChild::into_child));
    }

    /// The children in order.
    #[must_use]
    pub fn children(&self) -> &[HtmlNode] {
        &self.children
    }

    /// Mutable access to the children.
    pub const fn children_mut(&mut self) -> &mut Vec<HtmlNode> {
        &mut self.children
    }

    // Built-in attributes

    /// Set an attribute; an existing value is replaced in place.
    pub fn set_attr(&mut self, attr: HtmlAttr, value: impl Into<String>) {
        let _ = self.attrs.insert(attr, value.into());
    }

    /// Set an attribute, builder style.
    #[must_use]
    pub fn with_attr(mut self, attr: HtmlAttr, value: impl Into<String>) -> Self {
        self.set_attr(attr, value);
        self
    }

    /// The value of an attribute.
    #[must_use]
    pub fn attr(&self, attr: HtmlAttr) -> Option<&str> {
        self.attrs.get(&attr).map(String::as_str)
    }

    /// Remove an attribute, keeping the order of the others.
    pub fn remove_attr(&mut self, attr: HtmlAttr) -> Option<String> {
        self.attrs.shift_remove(&attr)
    }

    /// Set or remove a boolean attribute such as `checked`.
    pub fn set_bool_attr(&mut self, attr: HtmlAttr, present: bool) {
        if present {
            self.set_attr(attr, attr.name());
        } else {
            let _ = self.remove_attr(attr);
        }
    }

    /// Set the `id` attribute.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.set_attr(HtmlAttr::Id, id);
    }

    /// Add a class to the `class` attribute unless it is already there.
    pub fn add_class(&mut self, class: &str) {
        let class = class.trim();
        if class.is_empty() {
            return;
        }
        if let Some(existing) = self.attrs.get_mut(&HtmlAttr::Class) {
            if existing.split_whitespace().any(|c| c == class) {
                return;
            }
            if !existing.is_empty() {
                existing.push(' ');
            }
            existing.push_str(class);
        } else {
            self.set_attr(HtmlAttr::Class, class);
        }
    }

    /// Replace the `style` attribute; an empty list removes it.
    pub fn set_style(&mut self, style: &CssDeclarationList) {
        if style.is_empty() {
            let _ = self.remove_attr(HtmlAttr::Style);
        } else {
            self.set_attr(HtmlAttr::Style, style.to_inline());
        }
    }

    /// Built-in attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (HtmlAttr, &str)> {
        self.attrs.iter().map(|(attr, value)| (*attr, value.as_str()))
    }

    // Custom attributes

    /// Set an attribute that has no [`HtmlAttr`] variant, such as `data-id`.
    ///
    /// Names that match a built-in attribute are stored as that attribute.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the name is empty or not a valid
    /// attribute name, names an event handler, or declares a namespace
    /// (the serializer writes `xmlns` itself).
    pub fn set_custom_attr(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let name = name.to_ascii_lowercase();
        validate_attribute_name(&name)?;
        if let Ok(attr) = name.parse::<HtmlAttr>() {
            self.set_attr(attr, value);
        } else {
            let _ = self.custom_attrs.insert(name, value.into());
        }
        Ok(())
    }

    /// The value of a custom attribute.
    #[must_use]
    pub fn custom_attr(&self, name: &str) -> Option<&str> {
        self.custom_attrs.get(name).map(String::as_str)
    }

    /// Remove a custom attribute, keeping the order of the others.
    pub fn remove_custom_attr(&mut self, name: &str) -> Option<String> {
        self.custom_attrs.shift_remove(name)
    }

    /// Custom attributes in insertion order.
    pub fn custom_attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.custom_attrs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    // Event handlers

    /// Chain `code` onto the handler for `event`, creating it if needed.
    ///
    /// Empty code is ignored.
    pub fn add_event_handler(&mut self, event: HtmlEvent, code: impl Into<JsBlock>) {
        let code = code.into();
        if code.is_empty() {
            return;
        }
        if let Some(existing) = self.events.get_mut(&event) {
            existing.append(code);
        } else {
            let _ = self.events.insert(event, code);
        }
    }

    /// Replace the handler for `event`.
    ///
    /// Empty code is ignored; use [`HtmlElement::remove_event_handler`] to
    /// drop a handler.
    pub fn set_event_handler(&mut self, event: HtmlEvent, code: impl Into<JsBlock>) {
        let code = code.into();
        if !code.is_empty() {
            let _ = self.events.insert(event, code);
        }
    }

    /// The handler for `event`.
    #[must_use]
    pub fn event_handler(&self, event: HtmlEvent) -> Option<&JsBlock> {
        self.events.get(&event)
    }

    /// Remove the handler for `event`.
    pub fn remove_event_handler(&mut self, event: HtmlEvent) -> Option<JsBlock> {
        self.events.shift_remove(&event)
    }

    /// Event handlers in registration order.
    pub fn event_handlers(&self) -> impl Iterator<Item = (HtmlEvent, &JsBlock)> {
        self.events.iter().map(|(event, code)| (*event, code))
    }
}

/// [§ 13.1.2.3 Attributes](https://html.spec.whatwg.org/multipage/syntax.html#attributes-2)
///
/// Stricter than the syntax allows: names must also be valid XML names so
/// the same tree serializes as XHTML.
fn validate_attribute_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
    if !valid {
        return Err(MarkupError::invalid_argument(
            "name",
            format!("'{name}' is not an attribute name"),
        ));
    }
    if name == "xmlns" || name.starts_with("xmlns:") {
        return Err(MarkupError::invalid_argument(
            "name",
            "namespace declarations are written by the serializer",
        ));
    }
    if name.parse::<HtmlEvent>().is_ok() {
        return Err(MarkupError::invalid_argument(
            "name",
            format!("'{name}' is an event handler; use add_event_handler"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_js::JsExpr;

    fn call(name: &str) -> JsBlock {
        JsBlock::from(JsExpr::call(name, []).unwrap())
    }

    #[test]
    fn test_attributes_keep_insertion_order() {
        let mut div = HtmlElement::new(HtmlTag::Div)
            .with_attr(HtmlAttr::Title, "t")
            .with_attr(HtmlAttr::Id, "a");
        div.set_attr(HtmlAttr::Title, "u");
        let attrs: Vec<_> = div.attrs().collect();
        assert_eq!(attrs, [(HtmlAttr::Title, "u"), (HtmlAttr::Id, "a")]);

        assert_eq!(div.remove_attr(HtmlAttr::Title).as_deref(), Some("u"));
        assert_eq!(div.attr(HtmlAttr::Title), None);
    }

    #[test]
    fn test_add_class_skips_duplicates() {
        let mut div = HtmlElement::new(HtmlTag::Div);
        div.add_class("a");
        div.add_class("b");
        div.add_class("a");
        div.add_class(" ");
        assert_eq!(div.attr(HtmlAttr::Class), Some("a b"));
    }

    #[test]
    fn test_style_attribute() {
        let mut div = HtmlElement::new(HtmlTag::Div);
        let style = CssDeclarationList::new().with("color", "red").unwrap();
        div.set_style(&style);
        assert_eq!(div.attr(HtmlAttr::Style), Some("color:red"));
        div.set_style(&CssDeclarationList::new());
        assert_eq!(div.attr(HtmlAttr::Style), None);
    }

    #[test]
    fn test_custom_attribute_validation() {
        let mut div = HtmlElement::new(HtmlTag::Div);
        assert!(div.set_custom_attr("", "x").is_err());
        assert!(div.set_custom_attr("1abc", "x").is_err());
        assert!(div.set_custom_attr("a b", "x").is_err());
        assert!(div.set_custom_attr("xmlns", "x").is_err());
        assert!(div.set_custom_attr("onclick", "x").is_err());

        div.set_custom_attr("data-id", "7").unwrap();
        div.set_custom_attr("HREF", "/x").unwrap();
        assert_eq!(div.custom_attr("data-id"), Some("7"));
        assert_eq!(div.attr(HtmlAttr::Href), Some("/x"));
        assert_eq!(div.custom_attrs().count(), 1);
    }

    #[test]
    fn test_event_handlers_chain_and_replace() {
        let mut body = HtmlElement::new(HtmlTag::Body);
        body.add_event_handler(HtmlEvent::OnLoad, call("a"));
        body.add_event_handler(HtmlEvent::OnLoad, call("b"));
        assert_eq!(
            body.event_handler(HtmlEvent::OnLoad).unwrap().to_source(false),
            "a();b();"
        );

        body.set_event_handler(HtmlEvent::OnLoad, call("c"));
        assert_eq!(
            body.event_handler(HtmlEvent::OnLoad).unwrap().to_source(false),
            "c();"
        );
    }

    #[test]
    fn test_empty_handler_is_a_no_op() {
        let mut body = HtmlElement::new(HtmlTag::Body);
        body.add_event_handler(HtmlEvent::OnClick, JsBlock::new());
        assert!(body.event_handler(HtmlEvent::OnClick).is_none());

        body.add_event_handler(HtmlEvent::OnClick, call("a"));
        body.set_event_handler(HtmlEvent::OnClick, JsBlock::new());
        assert!(body.event_handler(HtmlEvent::OnClick).is_some());
    }

    #[test]
    fn test_absent_children_are_skipped() {
        let div = HtmlElement::with_children(HtmlTag::Div, [Some("a"), None, Some("b")]);
        assert_eq!(div.children().len(), 2);
    }
}
