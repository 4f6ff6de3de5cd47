use trellis_common::{Formatter, Renderable, Result};

use crate::expr::{JsAssignTarget, JsExpr};
use crate::identifier::JsIdentifier;

/// A JavaScript statement. Every statement ends with `;` or a closing brace
/// followed by a line break.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JsStatement {
    /// An expression evaluated for its side effects.
    Expr(JsExpr),
    /// `return;` or `return value;`
    Return(Option<JsExpr>),
    /// `++target;`
    Increment(JsAssignTarget),
    /// `--target;`
    Decrement(JsAssignTarget),
    /// `var name;` or `var name = init;`
    Var {
        /// Declared name.
        name: JsIdentifier,
        /// Optional initial value.
        init: Option<JsExpr>,
    },
    /// `if (condition) {...} else {...}`
    If {
        /// Tested expression.
        condition: JsExpr,
        /// Block run when the condition holds.
        then: JsBlock,
        /// Block run otherwise.
        otherwise: Option<JsBlock>,
    },
}

impl JsStatement {
    /// Declare `name`, optionally initialized.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is not a valid identifier.
    pub fn var(name: impl Into<String>, init: Option<JsExpr>) -> Result<Self> {
        Ok(Self::Var {
            name: JsIdentifier::new(name)?,
            init,
        })
    }

    /// Write this statement, terminated by `;` and a line break.
    pub fn emit(&self, f: &mut Formatter) {
        match self {
            Self::Expr(expr) => {
                // A leading `function` keyword would be read as a declaration.
                if matches!(expr, JsExpr::Function { .. }) {
                    f.literal_char('(');
                    f.renderable(expr);
                    f.literal_char(')');
                } else {
                    f.renderable(expr);
                }
                f.literal_char(';');
            }
            Self::Return(None) => f.literal("return;"),
            Self::Return(Some(expr)) => {
                f.literal("return ");
                f.renderable(expr);
                f.literal_char(';');
            }
            Self::Increment(target) => {
                f.literal("++");
                f.renderable(target);
                f.literal_char(';');
            }
            Self::Decrement(target) => {
                f.literal("--");
                f.renderable(target);
                f.literal_char(';');
            }
            Self::Var { name, init } => {
                f.literal("var ");
                f.renderable(name);
                if let Some(init) = init {
                    f.space();
                    f.literal_char('=');
                    f.space();
                    f.renderable(init);
                }
                f.literal_char(';');
            }
            Self::If {
                condition,
                then,
                otherwise,
            } => {
                f.literal("if");
                f.space();
                f.literal_char('(');
                f.renderable(condition);
                f.literal_char(')');
                f.space();
                then.emit_braced(f);
                if let Some(otherwise) = otherwise {
                    f.space();
                    f.literal("else");
                    f.space();
                    otherwise.emit_braced(f);
                }
            }
        }
        f.newline();
    }
}

impl Renderable for JsStatement {
    fn render_into(&self, f: &mut Formatter) {
        self.emit(f);
    }
}

impl From<JsExpr> for JsStatement {
    fn from(expr: JsExpr) -> Self {
        Self::Expr(expr)
    }
}

/// An ordered list of statements: the body of a function, an inline script
/// or an event handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsBlock {
    statements: Vec<JsStatement>,
}

impl JsBlock {
    /// An empty block.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            statements: Vec::new(),
        }
    }

    /// Append one statement.
    pub fn push(&mut self, statement: impl Into<JsStatement>) {
        self.statements.push(statement.into());
    }

    /// Append one statement, builder style.
    #[must_use]
    pub fn with(mut self, statement: impl Into<JsStatement>) -> Self {
        self.push(statement);
        self
    }

    /// Append all statements of `other` after the existing ones.
    pub fn append(&mut self, other: Self) {
        self.statements.extend(other.statements);
    }

    /// Whether the block has no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// The statements in order.
    #[must_use]
    pub fn statements(&self) -> &[JsStatement] {
        &self.statements
    }

    /// Write every statement on its own line.
    pub fn emit(&self, f: &mut Formatter) {
        for statement in &self.statements {
            statement.emit(f);
        }
    }

    /// Write the statements between braces, indented one level.
    pub fn emit_braced(&self, f: &mut Formatter) {
        f.literal_char('{');
        f.newline();
        f.indent();
        self.emit(f);
        f.outdent();
        f.literal_char('}');
    }

    /// Render into a new string; `pretty` puts each statement on its own
    /// indented line.
    #[must_use]
    pub fn to_source(&self, pretty: bool) -> String {
        let mut f = Formatter::new(pretty);
        self.emit(&mut f);
        f.finish()
    }
}

impl Renderable for JsBlock {
    fn render_into(&self, f: &mut Formatter) {
        self.emit(f);
    }
}

impl From<JsStatement> for JsBlock {
    fn from(statement: JsStatement) -> Self {
        Self {
            statements: vec![statement],
        }
    }
}

impl From<JsExpr> for JsBlock {
    fn from(expr: JsExpr) -> Self {
        Self::from(JsStatement::Expr(expr))
    }
}

impl FromIterator<JsStatement> for JsBlock {
    fn from_iter<I: IntoIterator<Item = JsStatement>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}
