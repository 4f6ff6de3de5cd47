//! Named character reference table and text escaping.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
//!
//! The full table defines 2,231 entities; the common single-character ones
//! are kept here. Names are stored without the leading `&` and trailing `;`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use trellis_common::{MarkupError, Result};

use crate::settings::HtmlVersion;

/// Entity name to replacement character.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, char>> = LazyLock::new(|| {
    HashMap::from([
        // Markup-significant
        ("amp", '&'),
        ("lt", '<'),
        ("gt", '>'),
        ("quot", '"'),
        ("apos", '\''),
        ("nbsp", '\u{00A0}'),
        // Punctuation and symbols
        ("copy", '\u{00A9}'),   // ©
        ("reg", '\u{00AE}'),    // ®
        ("trade", '\u{2122}'),  // ™
        ("mdash", '\u{2014}'),  // —
        ("ndash", '\u{2013}'),  // –
        ("hellip", '\u{2026}'), // …
        ("bull", '\u{2022}'),   // •
        ("middot", '\u{00B7}'), // ·
        ("lsquo", '\u{2018}'),  // '
        ("rsquo", '\u{2019}'),  // '
        ("ldquo", '\u{201C}'),  // "
        ("rdquo", '\u{201D}'),  // "
        ("laquo", '\u{00AB}'),  // «
        ("raquo", '\u{00BB}'),  // »
        ("sect", '\u{00A7}'),   // §
        ("para", '\u{00B6}'),   // ¶
        ("dagger", '\u{2020}'), // †
        // Currency
        ("cent", '\u{00A2}'),  // ¢
        ("pound", '\u{00A3}'), // £
        ("euro", '\u{20AC}'),  // €
        ("yen", '\u{00A5}'),   // ¥
        // Math
        ("times", '\u{00D7}'),  // ×
        ("divide", '\u{00F7}'), // ÷
        ("plusmn", '\u{00B1}'), // ±
        ("ne", '\u{2260}'),     // ≠
        ("le", '\u{2264}'),     // ≤
        ("ge", '\u{2265}'),     // ≥
        ("deg", '\u{00B0}'),    // °
        ("frac12", '\u{00BD}'), // ½
        ("frac14", '\u{00BC}'), // ¼
        ("frac34", '\u{00BE}'), // ¾
        ("micro", '\u{00B5}'),  // µ
        ("infin", '\u{221E}'),  // ∞
        // Arrows
        ("larr", '\u{2190}'), // ←
        ("uarr", '\u{2191}'), // ↑
        ("rarr", '\u{2192}'), // →
        ("darr", '\u{2193}'), // ↓
        // Latin-1 letters
        ("auml", '\u{00E4}'),   // ä
        ("ouml", '\u{00F6}'),   // ö
        ("uuml", '\u{00FC}'),   // ü
        ("Auml", '\u{00C4}'),   // Ä
        ("Ouml", '\u{00D6}'),   // Ö
        ("Uuml", '\u{00DC}'),   // Ü
        ("szlig", '\u{00DF}'),  // ß
        ("eacute", '\u{00E9}'), // é
        ("egrave", '\u{00E8}'), // è
        ("agrave", '\u{00E0}'), // à
        ("ccedil", '\u{00E7}'), // ç
        ("ntilde", '\u{00F1}'), // ñ
    ])
});

/// Replacement character to entity name.
static ENTITY_NAMES: LazyLock<HashMap<char, &'static str>> =
    LazyLock::new(|| NAMED_ENTITIES.iter().map(|(name, c)| (*c, *name)).collect());

/// Look up the character for an entity name (without `&` and `;`).
#[must_use]
pub fn lookup(name: &str) -> Option<char> {
    NAMED_ENTITIES.get(name).copied()
}

/// Look up the entity name for a character, if the table has one.
#[must_use]
pub fn name_for(c: char) -> Option<&'static str> {
    ENTITY_NAMES.get(&c).copied()
}

/// Names every XML parser knows without a DTD.
const XML_PREDEFINED: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];

/// A single named character reference such as `&copy;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HtmlEntity {
    name: &'static str,
    character: char,
}

impl HtmlEntity {
    /// Create an entity from its name, with or without `&` and `;`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the name is not in the entity table.
    pub fn new(name: &str) -> Result<Self> {
        let bare = name.trim_start_matches('&').trim_end_matches(';');
        let (name, character) = NAMED_ENTITIES.get_key_value(bare).ok_or_else(|| {
            MarkupError::invalid_argument("name", format!("unknown entity '{name}'"))
        })?;
        Ok(Self {
            name: *name,
            character: *character,
        })
    }

    /// Create the entity for a character.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if no entity maps to `c`.
    pub fn for_char(c: char) -> Result<Self> {
        name_for(c).map_or_else(
            || {
                Err(MarkupError::invalid_argument(
                    "character",
                    format!("no entity for U+{:04X}", u32::from(c)),
                ))
            },
            Self::new,
        )
    }

    /// The entity name without `&` and `;`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The character the entity stands for.
    #[must_use]
    pub const fn character(&self) -> char {
        self.character
    }

    /// The reference as written for `version`.
    ///
    /// XHTML1 output is parsed without the DTD, so anything beyond the five
    /// XML entities is written as a numeric reference.
    #[must_use]
    pub fn reference(&self, version: HtmlVersion) -> String {
        if version.is_xml() && !XML_PREDEFINED.contains(&self.name) {
            format!("&#{};", u32::from(self.character))
        } else {
            format!("&{};", self.name)
        }
    }
}

/// Escape text content: `&`, `<`, `>` and non-breaking spaces.
#[must_use]
pub fn escape_text(text: &str, version: HtmlVersion) -> Cow<'_, str> {
    escape(text, version, false)
}

/// Escape an attribute value: like [`escape_text`] plus `"`.
#[must_use]
pub fn escape_attribute(text: &str, version: HtmlVersion) -> Cow<'_, str> {
    escape(text, version, true)
}

fn escape(text: &str, version: HtmlVersion, in_attribute: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| {
        matches!(c, '&' | '<' | '>' | '\u{00A0}') || (in_attribute && c == '"')
    };
    if !text.contains(needs_escape) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '\u{00A0}' if version.is_xml() => out.push_str("&#160;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_ways() {
        assert_eq!(lookup("copy"), Some('©'));
        assert_eq!(lookup("nosuch"), None);
        assert_eq!(name_for('€'), Some("euro"));
        assert_eq!(name_for('a'), None);
    }

    #[test]
    fn test_entity_accepts_decorated_names() {
        let entity = HtmlEntity::new("&mdash;").unwrap();
        assert_eq!(entity.name(), "mdash");
        assert_eq!(entity.character(), '—');
        assert!(HtmlEntity::new("bogus").is_err());
        assert!(HtmlEntity::new("").is_err());
    }

    #[test]
    fn test_reference_depends_on_version() {
        let copy = HtmlEntity::new("copy").unwrap();
        assert_eq!(copy.reference(HtmlVersion::Html5), "&copy;");
        assert_eq!(copy.reference(HtmlVersion::Xhtml1), "&#169;");

        let amp = HtmlEntity::for_char('&').unwrap();
        assert_eq!(amp.reference(HtmlVersion::Xhtml1), "&amp;");
    }

    #[test]
    fn test_escape_text() {
        assert!(matches!(
            escape_text("plain", HtmlVersion::Html5),
            Cow::Borrowed("plain")
        ));
        assert_eq!(
            escape_text("a < b & \"c\"", HtmlVersion::Html5),
            "a &lt; b &amp; \"c\""
        );
        assert_eq!(escape_text("a\u{00A0}b", HtmlVersion::Html4), "a&nbsp;b");
        assert_eq!(escape_text("a\u{00A0}b", HtmlVersion::Xhtml1), "a&#160;b");
    }

    #[test]
    fn test_escape_attribute_quotes() {
        assert_eq!(
            escape_attribute("say \"hi\"", HtmlVersion::Html5),
            "say &quot;hi&quot;"
        );
    }
}
