//! JavaScript builder for the Trellis markup library.
//!
//! Expressions and statements are plain values with structural equality.
//! They are serialized through the shared [`Formatter`], so the same code
//! can be written into an `onclick` attribute (compact) or an inline
//! `<script>` block (indented).
//!
//! # Example
//!
//! ```ignore
//! use trellis_js::{JsBlock, JsExpr, JsOperator};
//!
//! let sum = JsExpr::reference("a")?.binary(JsOperator::Add, JsExpr::from(1));
//! let block = JsBlock::from(JsExpr::call("alert", [sum])?);
//! assert_eq!(block.to_source(false), "alert(a+1);");
//! ```
//!
//! # Parentheses
//!
//! There is no precedence table. Compound operands are always wrapped in
//! parentheses, except that a binary operand using the same operator as its
//! parent is written flat on the left side (and on the right side for
//! associative operators). The decision is made while rendering, so one
//! sub-expression may be shared between several parents.
//!
//! This departs from a plain same-operator rule, which would also flatten
//! the right side: `a-(b-c)` would be written `a-b-c` and change value.

mod expr;
mod identifier;
mod literal;
mod operator;
mod statement;

pub use expr::{JsAssignTarget, JsBinary, JsExpr, OperandSide};
pub use identifier::JsIdentifier;
pub use literal::JsLiteral;
pub use operator::{JsOperator, JsUnaryOperator};
pub use statement::{JsBlock, JsStatement};

pub use trellis_common::{Formatter, MarkupError, Renderable, Result};
