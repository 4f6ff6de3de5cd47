//! Shared text sink for markup, script and style serialization.
//!
//! The formatter knows nothing about HTML, JavaScript or CSS. It tracks an
//! indentation depth and whether the cursor sits at the start of a line, and
//! applies one consistent whitespace rule: in pretty mode every new line is
//! indented, in compact mode line breaks and optional spaces disappear.
//!
//! Callers bracket indentation changes themselves with [`Formatter::indent`]
//! and [`Formatter::outdent`].

use std::fmt;

/// Unit written once per indentation level in pretty mode.
const INDENT_UNIT: &str = "  ";

/// Something that knows how to write itself into a [`Formatter`].
pub trait Renderable {
    /// Append the textual form of `self` to `f`.
    fn render_into(&self, f: &mut Formatter);
}

/// Accumulating text sink.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    out: String,
    depth: usize,
    pretty: bool,
    at_line_start: bool,
}

impl Formatter {
    /// Create a formatter; `pretty` enables line breaks and indentation.
    #[must_use]
    pub const fn new(pretty: bool) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            pretty,
            at_line_start: true,
        }
    }

    /// Whether line breaks and indentation are emitted.
    #[must_use]
    pub const fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Current indentation depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Append a string verbatim (after any pending indentation).
    pub fn literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.write_pending_indent();
        self.out.push_str(text);
    }

    /// Append a single character verbatim.
    pub fn literal_char(&mut self, c: char) {
        self.write_pending_indent();
        self.out.push(c);
    }

    /// End the current line. Does nothing in compact mode.
    pub fn newline(&mut self) {
        if self.pretty {
            self.out.push('\n');
            self.at_line_start = true;
        }
    }

    /// Start a new line unless the cursor already sits at the start of one.
    pub fn ensure_newline(&mut self) {
        if self.pretty && !self.at_line_start {
            self.newline();
        }
    }

    /// Optional separator space, only written in pretty mode.
    pub fn space(&mut self) {
        if self.pretty {
            self.literal_char(' ');
        }
    }

    /// Increase the indentation depth for subsequent lines.
    pub const fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease the indentation depth; saturates at zero.
    pub const fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Let a model object write itself into this formatter.
    pub fn renderable(&mut self, node: &dyn Renderable) {
        node.render_into(self);
    }

    /// Text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Byte offset of the end of the output written so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.out.len()
    }

    /// Replace every `pattern` in the output written since `start`.
    ///
    /// `start` comes from [`Formatter::position`]; an offset past the end
    /// or inside a character leaves the output untouched.
    pub fn replace_since(&mut self, start: usize, pattern: &str, replacement: &str) {
        let Some(tail) = self.out.get(start..) else {
            return;
        };
        if !tail.contains(pattern) {
            return;
        }
        let replaced = tail.replace(pattern, replacement);
        self.out.truncate(start);
        self.out.push_str(&replaced);
    }

    /// Consume the formatter and return its output.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    fn write_pending_indent(&mut self) {
        if self.at_line_start {
            if self.pretty {
                for _ in 0..self.depth {
                    self.out.push_str(INDENT_UNIT);
                }
            }
            self.at_line_start = false;
        }
    }
}

impl fmt::Write for Formatter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.literal(s);
        Ok(())
    }
}
