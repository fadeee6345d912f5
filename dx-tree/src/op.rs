//! Operators that can appear in an expression tree, and the evaluation rule of each.

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary operation is left-associative.
    ///
    /// This means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary operation is right-associative.
    ///
    /// This means `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of exponentiation (`^`).
    Exp,

    /// Literals, the variable, parenthesized expressions and `log(...)`.
    Primary,
}

/// How the operands of a `^` node relate to the variable. This decides which differentiation rule
/// applies to the node, and is fixed when the node is built.
///
/// The constant operand's value is stored in the variant, so the differentiation rules never need
/// to look inside the operand nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerForm {
    /// The exponent is a literal, as in `x^3`. Differentiated with the power rule.
    ConstantExponent(f64),

    /// The base is a literal and the exponent is not, as in `2^x`. Differentiated with the
    /// exponential rule.
    ConstantBase(f64),

    /// Neither operand is a literal, as in `x^x`. Such a node cannot be differentiated.
    Variable,
}

/// The unary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// The natural logarithm, `log(...)`.
    Log,

    /// A parenthesized expression, `(...)`. Evaluates to its operand.
    Paren,
}

impl UnaryOp {
    /// The sign printed for this operator in the tree rendering.
    pub fn sign(&self) -> &'static str {
        match self {
            Self::Log => "log()",
            Self::Paren => "()",
        }
    }

    /// Applies the operator to the value of its operand.
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Self::Log => value.ln(),
            Self::Paren => value,
        }
    }
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Exp(PowerForm),
}

impl BinOp {
    /// The sign printed for this operator, both in the tree rendering and in infix text.
    pub fn sign(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Exp(_) => "^",
        }
    }

    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp(_) => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Exp(_) => Associativity::Right,
            Self::Mul | Self::Div | Self::Add | Self::Sub => Associativity::Left,
        }
    }

    /// Applies the operator to the values of its left and right operands.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
            Self::Exp(_) => left.powf(right),
        }
    }
}
