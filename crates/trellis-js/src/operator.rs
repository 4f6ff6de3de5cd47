use strum_macros::{Display, IntoStaticStr};

/// A binary operator. The token is written verbatim: no spaces are added
/// around it beyond the ones the token itself contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum JsOperator {
    /// `+`
    #[strum(serialize = "+")]
    Add,
    /// `-`
    #[strum(serialize = "-")]
    Sub,
    /// `*`
    #[strum(serialize = "*")]
    Mul,
    /// `/`
    #[strum(serialize = "/")]
    Div,
    /// `%`
    #[strum(serialize = "%")]
    Rem,
    /// `==`
    #[strum(serialize = "==")]
    Eq,
    /// `===`
    #[strum(serialize = "===")]
    StrictEq,
    /// `!=`
    #[strum(serialize = "!=")]
    Ne,
    /// `!==`
    #[strum(serialize = "!==")]
    StrictNe,
    /// `<`
    #[strum(serialize = "<")]
    Lt,
    /// `<=`
    #[strum(serialize = "<=")]
    Le,
    /// `>`
    #[strum(serialize = ">")]
    Gt,
    /// `>=`
    #[strum(serialize = ">=")]
    Ge,
    /// `&&`
    #[strum(serialize = "&&")]
    And,
    /// `||`
    #[strum(serialize = "||")]
    Or,
    /// `&`
    #[strum(serialize = "&")]
    BitAnd,
    /// `|`
    #[strum(serialize = "|")]
    BitOr,
    /// `^`
    #[strum(serialize = "^")]
    BitXor,
    /// `<<`
    #[strum(serialize = "<<")]
    Shl,
    /// `>>`
    #[strum(serialize = ">>")]
    Shr,
    /// `>>>`
    #[strum(serialize = ">>>")]
    UShr,
    /// ` in `
    #[strum(serialize = " in ")]
    In,
    /// ` instanceof `
    #[strum(serialize = " instanceof ")]
    InstanceOf,
}

impl JsOperator {
    /// The operator token as written into the output.
    #[must_use]
    pub fn token(self) -> &'static str {
        self.into()
    }

    /// Whether `a op (b op c)` always equals `(a op b) op c`.
    ///
    /// `+` is not associative in JavaScript: `1 + (2 + "3")` is `"123"` but
    /// `1 + 2 + "3"` is `"33"`.
    #[must_use]
    pub const fn is_associative(self) -> bool {
        matches!(
            self,
            Self::And | Self::Or | Self::BitAnd | Self::BitOr | Self::BitXor
        )
    }
}

/// A prefix unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum JsUnaryOperator {
    /// `!`
    #[strum(serialize = "!")]
    Not,
    /// `-`
    #[strum(serialize = "-")]
    Minus,
    /// `+`
    #[strum(serialize = "+")]
    Plus,
    /// `~`
    #[strum(serialize = "~")]
    BitNot,
    /// `typeof `
    #[strum(serialize = "typeof ")]
    TypeOf,
}

impl JsUnaryOperator {
    /// The operator token as written into the output.
    #[must_use]
    pub fn token(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        assert_eq!(JsOperator::Add.token(), "+");
        assert_eq!(JsOperator::StrictNe.token(), "!==");
        assert_eq!(JsOperator::InstanceOf.to_string(), " instanceof ");
        assert_eq!(JsUnaryOperator::TypeOf.token(), "typeof ");
    }

    #[test]
    fn test_associativity() {
        assert!(JsOperator::And.is_associative());
        assert!(!JsOperator::Add.is_associative());
        assert!(!JsOperator::Sub.is_associative());
    }
}
