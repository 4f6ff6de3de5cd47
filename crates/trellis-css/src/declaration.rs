//! [§ 5.4.5 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
//!
//! "A declaration has a name, a value consisting of a list of component
//! values, and an important flag which is initially unset."

use serde::{Deserialize, Deserializer, Serialize};
use trellis_common::error::require_non_empty;
use trellis_common::{Formatter, MarkupError, Renderable, Result};

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CssDeclaration {
    property: String,
    value: String,
    important: bool,
}

/// Fail when `text` contains `<`.
///
/// CSS is written verbatim into `<style>`, where `</style` would end the
/// element and a bare `<` is not well-formed XHTML.
pub(crate) fn require_no_markup(name: &'static str, text: &str) -> Result<()> {
    if text.contains('<') {
        return Err(MarkupError::invalid_argument(
            name,
            format!("'{text}' contains '<', which cannot appear inside <style>"),
        ));
    }
    Ok(())
}

impl CssDeclaration {
    /// Create `property: value`.
    ///
    /// The property name is lower-cased; custom properties (`--x`) keep
    /// their case.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the property is empty or contains
    /// characters that cannot appear in a property name, or if the value is
    /// empty or contains `<`.
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let mut property = property.into();
        let value = value.into();
        require_non_empty("property", &property)?;
        require_non_empty("value", value.trim())?;
        require_no_markup("value", &value)?;
        if !property
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(MarkupError::invalid_argument(
                "property",
                format!("'{property}' is not a property name"),
            ));
        }
        if !property.starts_with("--") {
            property.make_ascii_lowercase();
        }
        Ok(Self {
            property,
            value,
            important: false,
        })
    }

    /// Set the `!important` flag.
    #[must_use]
    pub const fn important(mut self) -> Self {
        self.important = true;
        self
    }

    /// The property name.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The value as written.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether `!important` is set.
    #[must_use]
    pub const fn is_important(&self) -> bool {
        self.important
    }
}

#[derive(Deserialize)]
struct RawDeclaration {
    property: String,
    value: String,
    #[serde(default)]
    important: bool,
}

impl<'de> Deserialize<'de> for CssDeclaration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawDeclaration::deserialize(deserializer)?;
        let declaration = Self::new(raw.property, raw.value).map_err(serde::de::Error::custom)?;
        Ok(if raw.important {
            declaration.important()
        } else {
            declaration
        })
    }
}

impl Renderable for CssDeclaration {
    fn render_into(&self, f: &mut Formatter) {
        f.literal(&self.property);
        f.literal_char(':');
        f.space();
        f.literal(&self.value);
        if self.important {
            f.space();
            f.literal("!important");
        }
    }
}

/// An ordered list of declarations, as found in a rule block or a `style`
/// attribute.
///
/// Setting a property that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CssDeclarationList {
    declarations: Vec<CssDeclaration>,
}

impl<'de> Deserialize<'de> for CssDeclarationList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(Vec::<CssDeclaration>::deserialize(deserializer)?
            .into_iter()
            .collect())
    }
}

impl CssDeclarationList {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Add or replace a declaration.
    pub fn set(&mut self, declaration: CssDeclaration) {
        if let Some(existing) = self
            .declarations
            .iter_mut()
            .find(|d| d.property == declaration.property)
        {
            *existing = declaration;
        } else {
            self.declarations.push(declaration);
        }
    }

    /// Add or replace `property: value`, builder style.
    ///
    /// # Errors
    ///
    /// Propagates the validation errors of [`CssDeclaration::new`].
    pub fn with(mut self, property: &str, value: &str) -> Result<Self> {
        self.set(CssDeclaration::new(property, value)?);
        Ok(self)
    }

    /// Remove the declaration for `property`; returns whether one existed.
    pub fn remove(&mut self, property: &str) -> bool {
        let before = self.declarations.len();
        self.declarations.retain(|d| d.property != property);
        before != self.declarations.len()
    }

    /// Look up the declaration for `property`.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&CssDeclaration> {
        self.declarations.iter().find(|d| d.property == property)
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CssDeclaration> {
        self.declarations.iter()
    }

    /// Compact form for a `style` attribute: `color:red;margin:0`.
    #[must_use]
    pub fn to_inline(&self) -> String {
        let mut f = Formatter::new(false);
        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.literal_char(';');
            }
            f.renderable(declaration);
        }
        f.finish()
    }

    /// Write the declarations one per line, each terminated by `;`.
    pub(crate) fn emit_block_body(&self, f: &mut Formatter) {
        for declaration in &self.declarations {
            f.renderable(declaration);
            f.literal_char(';');
            f.newline();
        }
    }
}

impl FromIterator<CssDeclaration> for CssDeclarationList {
    fn from_iter<I: IntoIterator<Item = CssDeclaration>>(iter: I) -> Self {
        let mut list = Self::new();
        for declaration in iter {
            list.set(declaration);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_validation() {
        assert!(CssDeclaration::new("", "red").is_err());
        assert!(CssDeclaration::new("color", " ").is_err());
        assert!(CssDeclaration::new("col or", "red").is_err());
        assert_eq!(CssDeclaration::new("COLOR", "red").unwrap().property(), "color");
        assert_eq!(CssDeclaration::new("--Main", "red").unwrap().property(), "--Main");
    }

    #[test]
    fn test_value_cannot_close_style_element() {
        assert!(matches!(
            CssDeclaration::new("color", "red</style><script>alert(1)</script>"),
            Err(MarkupError::InvalidArgument { name: "value", .. })
        ));
        assert!(CssDeclarationList::new().with("content", "'a<b'").is_err());
        assert!(CssDeclaration::new("content", "'a>b'").is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let parsed: CssDeclaration =
            serde_json::from_str(r#"{"property": "COLOR", "value": "red", "important": true}"#)
                .unwrap();
        assert_eq!(parsed, CssDeclaration::new("color", "red").unwrap().important());

        for json in [
            r#"{"property": "", "value": "red"}"#,
            r#"{"property": "color", "value": ""}"#,
            r#"{"property": "color", "value": "</style>"}"#,
        ] {
            assert!(serde_json::from_str::<CssDeclaration>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn test_deserialized_list_keeps_last_write() {
        let list: CssDeclarationList = serde_json::from_str(
            r#"[{"property": "color", "value": "red"},
                {"property": "margin", "value": "0"},
                {"property": "color", "value": "blue"}]"#,
        )
        .unwrap();
        assert_eq!(list.to_inline(), "color:blue;margin:0");
    }

    #[test]
    fn test_last_write_wins_in_place() {
        let list = CssDeclarationList::new()
            .with("color", "red")
            .unwrap()
            .with("margin", "0")
            .unwrap()
            .with("color", "blue")
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.to_inline(), "color:blue;margin:0");
    }

    #[test]
    fn test_important_and_remove() {
        let mut list = CssDeclarationList::new();
        list.set(CssDeclaration::new("display", "none").unwrap().important());
        assert_eq!(list.to_inline(), "display:none!important");
        assert!(list.remove("display"));
        assert!(!list.remove("display"));
        assert!(list.is_empty());
    }
}
