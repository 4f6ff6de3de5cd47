use std::fmt;

use trellis_common::{Formatter, Renderable, Result};

use crate::identifier::JsIdentifier;
use crate::literal::JsLiteral;
use crate::operator::{JsOperator, JsUnaryOperator};
use crate::statement::JsBlock;

/// Position of an operand relative to its binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSide {
    /// Written before the operator.
    Left,
    /// Written after the operator.
    Right,
}

/// A JavaScript expression.
///
/// Equality and hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JsExpr {
    /// A literal value.
    Literal(JsLiteral),
    /// A variable or function name.
    Ref(JsIdentifier),
    /// `object.name`
    Member {
        /// Expression the member is read from.
        object: Box<JsExpr>,
        /// Member name.
        name: JsIdentifier,
    },
    /// `object[index]`
    Index {
        /// Expression being indexed.
        object: Box<JsExpr>,
        /// Index expression.
        index: Box<JsExpr>,
    },
    /// `left op right`
    Binary(JsBinary),
    /// `op operand`
    Unary {
        /// Prefix operator.
        op: JsUnaryOperator,
        /// Operand.
        operand: Box<JsExpr>,
    },
    /// `callee(args...)`
    Invoke {
        /// Function being called.
        callee: Box<JsExpr>,
        /// Arguments in call order.
        args: Vec<JsExpr>,
    },
    /// `[elements...]`
    Array(Vec<JsExpr>),
    /// `function(params...){body}`
    Function {
        /// Parameter names.
        params: Vec<JsIdentifier>,
        /// Function body.
        body: JsBlock,
    },
    /// `target=value`
    Assign {
        /// Assigned location.
        target: JsAssignTarget,
        /// New value.
        value: Box<JsExpr>,
    },
}

impl JsExpr {
    /// Reference a variable by name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is not a valid identifier.
    pub fn reference(name: impl Into<String>) -> Result<Self> {
        Ok(Self::Ref(JsIdentifier::new(name)?))
    }

    /// A string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(JsLiteral::Str(value.into()))
    }

    /// Call the function named `name` with `args`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is not a valid identifier.
    pub fn call(name: impl Into<String>, args: impl IntoIterator<Item = Self>) -> Result<Self> {
        Ok(Self::reference(name)?.invoke(args))
    }

    /// Call `self` with `args`.
    #[must_use]
    pub fn invoke(self, args: impl IntoIterator<Item = Self>) -> Self {
        Self::Invoke {
            callee: Box::new(self),
            args: args.into_iter().collect(),
        }
    }

    /// Access member `name` of `self`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is not a valid identifier.
    pub fn member(self, name: impl Into<String>) -> Result<Self> {
        Ok(Self::Member {
            object: Box::new(self),
            name: JsIdentifier::new(name)?,
        })
    }

    /// Index into `self`.
    #[must_use]
    pub fn index(self, index: impl Into<Self>) -> Self {
        Self::Index {
            object: Box::new(self),
            index: Box::new(index.into()),
        }
    }

    /// Combine `self` and `right` with a binary operator.
    #[must_use]
    pub fn binary(self, op: JsOperator, right: impl Into<Self>) -> Self {
        Self::Binary(JsBinary::new(self, op, right))
    }

    /// Apply a prefix operator to `self`.
    #[must_use]
    pub fn unary(op: JsUnaryOperator, operand: impl Into<Self>) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand.into()),
        }
    }

    /// An anonymous function expression.
    #[must_use]
    pub fn function(params: impl IntoIterator<Item = JsIdentifier>, body: JsBlock) -> Self {
        Self::Function {
            params: params.into_iter().collect(),
            body,
        }
    }

    /// Assign `value` to `target`.
    #[must_use]
    pub fn assign(target: impl Into<JsAssignTarget>, value: impl Into<Self>) -> Self {
        Self::Assign {
            target: target.into(),
            value: Box::new(value.into()),
        }
    }

    /// Whether this expression has to be wrapped when it appears as the
    /// `side` operand of a binary `parent` operator.
    #[must_use]
    pub fn needs_parens_as_operand(&self, parent: JsOperator, side: OperandSide) -> bool {
        match self {
            Self::Binary(binary) => binary.needs_parens_as_operand(parent, side),
            _ => self.is_compound(),
        }
    }

    /// Expressions that are always wrapped when nested inside another one.
    ///
    /// Negative numbers count: `a-(-1)` must not turn into `a--1`.
    const fn is_compound(&self) -> bool {
        match self {
            Self::Binary(_) | Self::Unary { .. } | Self::Function { .. } | Self::Assign { .. } => {
                true
            }
            Self::Literal(JsLiteral::Int(value)) => *value < 0,
            _ => false,
        }
    }

    /// Whether `self` has to be wrapped before `.name`.
    ///
    /// An integer literal would swallow the dot as a decimal point.
    const fn needs_parens_as_receiver(&self) -> bool {
        matches!(self, Self::Literal(JsLiteral::Int(_))) || self.is_compound()
    }

    /// Render compactly into a new string.
    #[must_use]
    pub fn to_source(&self) -> String {
        let mut f = Formatter::new(false);
        f.renderable(self);
        f.finish()
    }
}

fn render_wrapped(f: &mut Formatter, expr: &JsExpr, parens: bool) {
    if parens {
        f.literal_char('(');
        f.renderable(expr);
        f.literal_char(')');
    } else {
        f.renderable(expr);
    }
}

fn render_list<'a>(f: &mut Formatter, items: impl IntoIterator<Item = &'a dyn Renderable>) {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.literal_char(',');
            f.space();
        }
        f.renderable(item);
    }
}

impl Renderable for JsExpr {
    fn render_into(&self, f: &mut Formatter) {
        match self {
            Self::Literal(literal) => f.renderable(literal),
            Self::Ref(name) => f.renderable(name),
            Self::Member { object, name } => {
                render_wrapped(f, object, object.needs_parens_as_receiver());
                f.literal_char('.');
                f.renderable(name);
            }
            Self::Index { object, index } => {
                render_wrapped(f, object, object.is_compound());
                f.literal_char('[');
                f.renderable(index.as_ref());
                f.literal_char(']');
            }
            Self::Binary(binary) => f.renderable(binary),
            Self::Unary { op, operand } => {
                f.literal(op.token());
                render_wrapped(f, operand, operand.is_compound());
            }
            Self::Invoke { callee, args } => {
                render_wrapped(f, callee, callee.is_compound());
                f.literal_char('(');
                render_list(f, args.iter().map(|arg| arg as &dyn Renderable));
                f.literal_char(')');
            }
            Self::Array(elements) => {
                f.literal_char('[');
                render_list(f, elements.iter().map(|e| e as &dyn Renderable));
                f.literal_char(']');
            }
            Self::Function { params, body } => {
                f.literal("function(");
                render_list(f, params.iter().map(|p| p as &dyn Renderable));
                f.literal_char(')');
                f.space();
                body.emit_braced(f);
            }
            Self::Assign { target, value } => {
                f.renderable(target);
                f.space();
                f.literal_char('=');
                f.space();
                f.renderable(value.as_ref());
            }
        }
    }
}

impl fmt::Display for JsExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_source())
    }
}

impl From<JsLiteral> for JsExpr {
    fn from(literal: JsLiteral) -> Self {
        Self::Literal(literal)
    }
}

impl From<JsIdentifier> for JsExpr {
    fn from(name: JsIdentifier) -> Self {
        Self::Ref(name)
    }
}

impl From<JsBinary> for JsExpr {
    fn from(binary: JsBinary) -> Self {
        Self::Binary(binary)
    }
}

impl From<i64> for JsExpr {
    fn from(value: i64) -> Self {
        Self::Literal(JsLiteral::Int(value))
    }
}

impl From<bool> for JsExpr {
    fn from(value: bool) -> Self {
        Self::Literal(JsLiteral::Bool(value))
    }
}

/// A binary operation `left op right`.
///
/// Whether an operand gets parentheses is decided while rendering, from the
/// operand and the operator it sits under; it is not stored on the node and
/// so never affects equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsBinary {
    left: Box<JsExpr>,
    op: JsOperator,
    right: Box<JsExpr>,
}

impl JsBinary {
    /// Create `left op right`.
    #[must_use]
    pub fn new(left: impl Into<JsExpr>, op: JsOperator, right: impl Into<JsExpr>) -> Self {
        Self {
            left: Box::new(left.into()),
            op,
            right: Box::new(right.into()),
        }
    }

    /// Left operand.
    #[must_use]
    pub fn left(&self) -> &JsExpr {
        &self.left
    }

    /// Operator.
    #[must_use]
    pub const fn op(&self) -> JsOperator {
        self.op
    }

    /// Right operand.
    #[must_use]
    pub fn right(&self) -> &JsExpr {
        &self.right
    }

    /// Whether this operation needs parentheses as the `side` operand of a
    /// binary `parent` operator.
    ///
    /// Chains of the same operator are written flat on the left side, and on
    /// the right side too when the operator is associative. Every other
    /// nesting is parenthesized. The right side does not follow
    /// the plain same-operator rule: `a-(b-c)` keeps its parentheses.
    #[must_use]
    pub fn needs_parens_as_operand(&self, parent: JsOperator, side: OperandSide) -> bool {
        if self.op != parent {
            return true;
        }
        match side {
            OperandSide::Left => false,
            OperandSide::Right => !parent.is_associative(),
        }
    }
}

impl Renderable for JsBinary {
    fn render_into(&self, f: &mut Formatter) {
        render_wrapped(
            f,
            &self.left,
            self.left.needs_parens_as_operand(self.op, OperandSide::Left),
        );
        f.literal(self.op.token());
        render_wrapped(
            f,
            &self.right,
            self.right.needs_parens_as_operand(self.op, OperandSide::Right),
        );
    }
}

/// A location that can be assigned to or incremented.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JsAssignTarget {
    /// A variable.
    Ref(JsIdentifier),
    /// `object.name`
    Member {
        /// Expression owning the member.
        object: Box<JsExpr>,
        /// Member name.
        name: JsIdentifier,
    },
}

impl JsAssignTarget {
    /// Target the variable `name`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is not a valid identifier.
    pub fn variable(name: impl Into<String>) -> Result<Self> {
        Ok(Self::Ref(JsIdentifier::new(name)?))
    }

    /// Target member `name` of `object`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is not a valid identifier.
    pub fn member(object: impl Into<JsExpr>, name: impl Into<String>) -> Result<Self> {
        Ok(Self::Member {
            object: Box::new(object.into()),
            name: JsIdentifier::new(name)?,
        })
    }
}

impl From<JsIdentifier> for JsAssignTarget {
    fn from(name: JsIdentifier) -> Self {
        Self::Ref(name)
    }
}

impl Renderable for JsAssignTarget {
    fn render_into(&self, f: &mut Formatter) {
        match self {
            Self::Ref(name) => f.renderable(name),
            Self::Member { object, name } => {
                render_wrapped(f, object, object.is_compound());
                f.literal_char('.');
                f.renderable(name);
            }
        }
    }
}
