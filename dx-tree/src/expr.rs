use crate::{fmt::TreeFormatter, op::{BinOp, PowerForm, Precedence, UnaryOp}};

/// A node of an expression tree over the single variable `x`.
///
/// Trees are built fully formed through the constructor functions ([`Expr::literal`],
/// [`Expr::sum`], [`Expr::power`], ...). Operator nodes own their children, and their fields are
/// only readable through accessors, so a tree cannot change shape once built.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal, such as `3.0` or `1e-5`.
    Literal(f64),

    /// The variable `x`.
    Variable,

    /// An operator with a single operand, such as `log(x)` or `(x + 1)`.
    Unary(Unary),

    /// An operator with a left and right operand, such as `x * 2`.
    Binary(Binary),
}

/// An operator node with exactly one operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    op: UnaryOp,
    operand: Box<Expr>,
}

impl Unary {
    /// The operator of this node.
    pub fn op(&self) -> UnaryOp {
        self.op
    }

    /// The single operand of this node.
    pub fn operand(&self) -> &Expr {
        &self.operand
    }
}

/// An operator node with an ordered pair of operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    lhs: Box<Expr>,
    op: BinOp,
    rhs: Box<Expr>,
}

impl Binary {
    /// The left-hand side of the operation.
    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    /// The operator of this node.
    pub fn op(&self) -> BinOp {
        self.op
    }

    /// The right-hand side of the operation.
    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }
}

impl Expr {
    /// Creates a literal node.
    pub fn literal(value: f64) -> Self {
        Self::Literal(value)
    }

    /// Creates a node for the variable `x`.
    pub fn variable() -> Self {
        Self::Variable
    }

    /// Creates `operand` wrapped in parentheses.
    pub fn paren(operand: Expr) -> Self {
        Self::unary(UnaryOp::Paren, operand)
    }

    /// Creates the natural logarithm of `operand`.
    pub fn log(operand: Expr) -> Self {
        Self::unary(UnaryOp::Log, operand)
    }

    /// Creates `lhs + rhs`.
    pub fn sum(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(lhs, BinOp::Add, rhs)
    }

    /// Creates `lhs - rhs`.
    pub fn difference(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(lhs, BinOp::Sub, rhs)
    }

    /// Creates `lhs * rhs`.
    pub fn product(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(lhs, BinOp::Mul, rhs)
    }

    /// Creates `lhs / rhs`.
    pub fn quotient(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(lhs, BinOp::Div, rhs)
    }

    /// Creates `base ^ exponent`.
    ///
    /// The [`PowerForm`] of the node is decided here, once: a literal exponent takes precedence
    /// over a literal base, and if neither operand is a literal the node cannot be differentiated.
    pub fn power(base: Expr, exponent: Expr) -> Self {
        let form = match (&base, &exponent) {
            (_, Expr::Literal(c)) => PowerForm::ConstantExponent(*c),
            (Expr::Literal(c), _) => PowerForm::ConstantBase(*c),
            _ => PowerForm::Variable,
        };
        Self::binary(base, BinOp::Exp(form), exponent)
    }

    fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::Unary(Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn binary(lhs: Expr, op: BinOp, rhs: Expr) -> Self {
        Self::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        })
    }

    /// Evaluates the expression with the variable `x` set to the given value.
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Self::Literal(value) => *value,
            Self::Variable => x,
            Self::Unary(unary) => unary.op.apply(unary.operand.evaluate(x)),
            Self::Binary(binary) => binary.op.apply(binary.lhs.evaluate(x), binary.rhs.evaluate(x)),
        }
    }

    /// Returns a copy of this tree that shares no nodes with it.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Renders the tree one node per line. Each line is indented with `indent` tab characters
    /// plus one more for every level below the root, and children are listed left before right.
    ///
    /// ```
    /// use dx_tree::Expr;
    ///
    /// let expr = Expr::sum(Expr::variable(), Expr::literal(2.0));
    /// assert_eq!(expr.convert_to_string(1), "\t+\n\t\tx\n\t\t2.0\n");
    /// ```
    pub fn convert_to_string(&self, indent: usize) -> String {
        TreeFormatter::new(self, indent).to_string()
    }

    /// Wraps the expression in a [`TreeFormatter`], which implements
    /// [`Display`](std::fmt::Display) with the same output as
    /// [`Expr::convert_to_string`]`(0)`.
    pub fn tree(&self) -> TreeFormatter<'_> {
        TreeFormatter::new(self, 0)
    }

    /// Returns the number of nodes on the longest path from this node to a terminal, counting
    /// both ends.
    pub fn depth(&self) -> usize {
        match self {
            Self::Literal(_) | Self::Variable => 1,
            Self::Unary(unary) => 1 + unary.operand.depth(),
            Self::Binary(binary) => 1 + binary.lhs.depth().max(binary.rhs.depth()),
        }
    }

    /// Returns the precedence of the outermost operation of this expression.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Literal(_) | Self::Variable | Self::Unary(_) => Precedence::Primary,
            Self::Binary(binary) => binary.op.precedence(),
        }
    }

    /// Returns the value of the expression if it is a literal.
    pub fn as_literal(&self) -> Option<f64> {
        match self {
            Self::Literal(value) => Some(*value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// `4 * (x + 5 * x)`
    fn sample() -> Expr {
        Expr::product(
            Expr::literal(4.0),
            Expr::paren(Expr::sum(
                Expr::variable(),
                Expr::product(Expr::literal(5.0), Expr::variable()),
            )),
        )
    }

    #[test]
    fn evaluate_nested() {
        assert_eq!(sample().evaluate(3.0), 72.0);
    }

    #[test]
    fn evaluate_is_ordered() {
        let expr = Expr::difference(
            Expr::difference(Expr::literal(10.0), Expr::literal(5.0)),
            Expr::literal(2.0),
        );
        assert_eq!(expr.evaluate(0.0), 3.0);
    }

    #[test]
    fn power_form_exponent() {
        let Expr::Binary(binary) = Expr::power(Expr::variable(), Expr::literal(3.0)) else {
            unreachable!()
        };
        assert_eq!(binary.op(), BinOp::Exp(PowerForm::ConstantExponent(3.0)));
    }

    #[test]
    fn power_form_base() {
        let Expr::Binary(binary) = Expr::power(Expr::literal(2.0), Expr::variable()) else {
            unreachable!()
        };
        assert_eq!(binary.op(), BinOp::Exp(PowerForm::ConstantBase(2.0)));
    }

    #[test]
    fn power_form_both_literal() {
        let Expr::Binary(binary) = Expr::power(Expr::literal(2.0), Expr::literal(5.0)) else {
            unreachable!()
        };
        assert_eq!(binary.op(), BinOp::Exp(PowerForm::ConstantExponent(5.0)));
    }

    #[test]
    fn power_form_parenthesized_literal_is_not_constant() {
        let Expr::Binary(binary) = Expr::power(
            Expr::variable(),
            Expr::paren(Expr::literal(2.0)),
        ) else {
            unreachable!()
        };
        assert_eq!(binary.op(), BinOp::Exp(PowerForm::Variable));
    }

    #[test]
    fn deep_copy_is_equal_and_independent() {
        let original = sample();
        let copy = original.deep_copy();
        assert_eq!(copy, original);

        // dropping the copy must leave the original intact
        drop(copy);
        assert_eq!(original.evaluate(3.0), 72.0);
    }

    #[test]
    fn depth() {
        assert_eq!(Expr::variable().depth(), 1);
        assert_eq!(sample().depth(), 5);
    }

    #[test]
    fn accessors() {
        let Expr::Unary(unary) = Expr::log(Expr::variable()) else {
            unreachable!()
        };
        assert_eq!(unary.op(), UnaryOp::Log);
        assert_eq!(unary.operand(), &Expr::Variable);
        assert_eq!(Expr::literal(1.5).as_literal(), Some(1.5));
        assert_eq!(Expr::variable().as_literal(), None);
    }
}
