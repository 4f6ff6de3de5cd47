use trellis_common::{Formatter, Renderable};

/// A JavaScript literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JsLiteral {
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// `true` / `false`
    Bool(bool),
    /// An integer number.
    Int(i64),
    /// A string, written single-quoted.
    Str(String),
}

impl Renderable for JsLiteral {
    fn render_into(&self, f: &mut Formatter) {
        match self {
            Self::Null => f.literal("null"),
            Self::Undefined => f.literal("undefined"),
            Self::Bool(value) => f.literal(if *value { "true" } else { "false" }),
            Self::Int(value) => f.literal(&value.to_string()),
            Self::Str(value) => f.literal(&quote(value)),
        }
    }
}

/// Quote `text` as a single-quoted string literal.
///
/// `</` is written as `<\/` so that the literal can never terminate an
/// enclosing `<script>` element, and `]]>` as `]]\>` so that it can never
/// close an enclosing CDATA section.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    let mut prev = None;
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '/' if prev == Some('<') => out.push_str("\\/"),
            '>' if out.ends_with("]]") => out.push_str("\\>"),
            _ => out.push(c),
        }
        prev = Some(c);
    }
    out.push('\'');
    out
}
