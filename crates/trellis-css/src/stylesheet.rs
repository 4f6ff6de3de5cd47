//! [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
//!
//! "A qualified rule has a prelude consisting of a list of component values,
//! and a block consisting of a simple block."
//!
//! Only style rules are modelled: the prelude is a selector list kept as
//! written.

use serde::{Deserialize, Deserializer, Serialize};
use trellis_common::error::require_non_empty;
use trellis_common::{Formatter, MarkupError, Renderable, Result};

use crate::declaration::{CssDeclarationList, require_no_markup};

/// `selector, selector { declarations }`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CssRule {
    selectors: Vec<String>,
    declarations: CssDeclarationList,
}

#[derive(Deserialize)]
struct RawRule {
    selectors: Vec<String>,
    #[serde(default)]
    declarations: CssDeclarationList,
}

impl<'de> Deserialize<'de> for CssRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawRule::deserialize(deserializer)?;
        Self::new(raw.selectors, raw.declarations).map_err(serde::de::Error::custom)
    }
}

impl CssRule {
    /// Create a rule for one or more selectors.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if no selector is given or a selector is
    /// blank or contains `<`.
    pub fn new<S: Into<String>>(
        selectors: impl IntoIterator<Item = S>,
        declarations: CssDeclarationList,
    ) -> Result<Self> {
        let selectors: Vec<String> = selectors
            .into_iter()
            .map(|s| s.into().trim().to_string())
            .collect();
        if selectors.is_empty() {
            return Err(MarkupError::invalid_argument(
                "selectors",
                "a rule needs at least one selector",
            ));
        }
        for selector in &selectors {
            require_non_empty("selectors", selector)?;
            require_no_markup("selectors", selector)?;
        }
        Ok(Self {
            selectors,
            declarations,
        })
    }

    /// The selectors in order.
    #[must_use]
    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    /// The declaration block.
    #[must_use]
    pub const fn declarations(&self) -> &CssDeclarationList {
        &self.declarations
    }

    /// Mutable access to the declaration block.
    pub const fn declarations_mut(&mut self) -> &mut CssDeclarationList {
        &mut self.declarations
    }
}

impl Renderable for CssRule {
    fn render_into(&self, f: &mut Formatter) {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.literal_char(',');
                f.space();
            }
            f.literal(selector);
        }
        f.space();
        f.literal_char('{');
        f.newline();
        f.indent();
        self.declarations.emit_block_body(f);
        f.outdent();
        f.literal_char('}');
        f.newline();
    }
}

/// An ordered list of rules, the content of a `<style>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CssStyleSheet {
    rules: Vec<CssRule>,
}

impl CssStyleSheet {
    /// An empty stylesheet.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule.
    pub fn add_rule(&mut self, rule: CssRule) {
        self.rules.push(rule);
    }

    /// Append a rule, builder style.
    #[must_use]
    pub fn with_rule(mut self, rule: CssRule) -> Self {
        self.add_rule(rule);
        self
    }

    /// The rules in order.
    #[must_use]
    pub fn rules(&self) -> &[CssRule] {
        &self.rules
    }

    /// Whether there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Serialize; `pretty` puts every declaration on its own indented line.
    #[must_use]
    pub fn to_css(&self, pretty: bool) -> String {
        let mut f = Formatter::new(pretty);
        f.renderable(self);
        f.finish()
    }
}

impl Renderable for CssStyleSheet {
    fn render_into(&self, f: &mut Formatter) {
        for rule in &self.rules {
            f.renderable(rule);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> CssStyleSheet {
        let body = CssDeclarationList::new()
            .with("margin", "0")
            .unwrap()
            .with("color", "#333")
            .unwrap();
        let links = CssDeclarationList::new().with("color", "blue").unwrap();
        CssStyleSheet::new()
            .with_rule(CssRule::new(["body"], body).unwrap())
            .with_rule(CssRule::new(["a", "a:visited"], links).unwrap())
    }

    #[test]
    fn test_compact_output() {
        assert_eq!(
            sheet().to_css(false),
            "body{margin:0;color:#333;}a,a:visited{color:blue;}"
        );
    }

    #[test]
    fn test_pretty_output() {
        assert_eq!(
            sheet().to_css(true),
            "body {\n  margin: 0;\n  color: #333;\n}\na, a:visited {\n  color: blue;\n}\n"
        );
    }

    #[test]
    fn test_rule_requires_selector() {
        let empty: [&str; 0] = [];
        assert!(CssRule::new(empty, CssDeclarationList::new()).is_err());
        assert!(CssRule::new(["  "], CssDeclarationList::new()).is_err());
        assert!(CssRule::new(["p</style>"], CssDeclarationList::new()).is_err());
    }
}
