use std::fmt;

use trellis_common::{Formatter, MarkupError, Renderable, Result};

/// Words that may not be used as a plain identifier.
const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield", "let", "static",
];

/// A validated JavaScript identifier such as `onLoad` or `$el`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsIdentifier(String);

impl JsIdentifier {
    /// Validate `name` as an identifier.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the name is empty, starts with a digit,
    /// contains characters other than ASCII letters, digits, `_` and `$`,
    /// or is a reserved word.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return Err(MarkupError::invalid_argument("name", "identifier must not be empty"));
        };
        if !is_identifier_start(first) || !chars.all(is_identifier_part) {
            return Err(MarkupError::invalid_argument(
                "name",
                format!("'{name}' is not a valid identifier"),
            ));
        }
        if RESERVED_WORDS.contains(&name.as_str()) {
            return Err(MarkupError::invalid_argument(
                "name",
                format!("'{name}' is a reserved word"),
            ));
        }
        Ok(Self(name))
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

const fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

impl Renderable for JsIdentifier {
    fn render_into(&self, f: &mut Formatter) {
        f.literal(&self.0);
    }
}

impl fmt::Display for JsIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
