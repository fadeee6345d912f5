//! Symbolic differentiation with respect to `x`.
//!
//! Each operator has its own rule, written as a function from the node's original operands to a
//! freshly built tree. A rule clones an operand every time it places it in the result, so the
//! derivative never shares a node with the input. The results are not simplified; `d/dx 3x` is
//! `3*1+0*x`.

use crate::{
    error::NotDifferentiable,
    expr::{Binary, Expr, Unary},
    fmt::infix,
    op::{BinOp, PowerForm, UnaryOp},
};

impl Expr {
    /// Returns a new tree representing the derivative of this expression with respect to `x`.
    ///
    /// Fails if the tree contains a power whose base and exponent are both non-literal (see
    /// [`PowerForm::Variable`]).
    pub fn differentiate(&self) -> Result<Expr, NotDifferentiable> {
        match self {
            Self::Literal(_) => Ok(Expr::literal(0.0)),
            Self::Variable => Ok(Expr::literal(1.0)),
            Self::Unary(unary) => unary_rule(unary),
            Self::Binary(binary) => binary_rule(binary),
        }
    }
}

fn unary_rule(unary: &Unary) -> Result<Expr, NotDifferentiable> {
    let g = unary.operand();
    match unary.op() {
        UnaryOp::Paren => paren_rule(g),
        UnaryOp::Log => log_rule(g),
    }
}

fn binary_rule(binary: &Binary) -> Result<Expr, NotDifferentiable> {
    let (g, h) = (binary.lhs(), binary.rhs());
    match binary.op() {
        BinOp::Add => sum_rule(g, h),
        BinOp::Sub => difference_rule(g, h),
        BinOp::Mul => product_rule(g, h),
        BinOp::Div => quotient_rule(g, h),
        BinOp::Exp(PowerForm::ConstantExponent(c)) => power_rule(g, c),
        BinOp::Exp(PowerForm::ConstantBase(c)) => exponential_rule(c, h),
        BinOp::Exp(PowerForm::Variable) => {
            let err = NotDifferentiable {
                base: infix(g),
                exponent: infix(h),
            };
            log::debug!("cannot differentiate {}^{}", err.base, err.exponent);
            Err(err)
        },
    }
}

/// `(g)' = (g')`
fn paren_rule(g: &Expr) -> Result<Expr, NotDifferentiable> {
    Ok(Expr::paren(g.differentiate()?))
}

/// `log(g)' = g' / g`
fn log_rule(g: &Expr) -> Result<Expr, NotDifferentiable> {
    Ok(Expr::quotient(g.differentiate()?, g.deep_copy()))
}

/// `(g + h)' = g' + h'`
fn sum_rule(g: &Expr, h: &Expr) -> Result<Expr, NotDifferentiable> {
    Ok(Expr::sum(g.differentiate()?, h.differentiate()?))
}

/// `(g - h)' = g' - h'`
fn difference_rule(g: &Expr, h: &Expr) -> Result<Expr, NotDifferentiable> {
    Ok(Expr::difference(g.differentiate()?, h.differentiate()?))
}

/// `(g * h)' = g * h' + g' * h`
fn product_rule(g: &Expr, h: &Expr) -> Result<Expr, NotDifferentiable> {
    Ok(Expr::sum(
        Expr::product(g.deep_copy(), h.differentiate()?),
        Expr::product(g.differentiate()?, h.deep_copy()),
    ))
}

/// `(g / h)' = g' / h - g * (h' / h^2)`
fn quotient_rule(g: &Expr, h: &Expr) -> Result<Expr, NotDifferentiable> {
    Ok(Expr::difference(
        Expr::quotient(g.differentiate()?, h.deep_copy()),
        Expr::product(
            g.deep_copy(),
            Expr::quotient(
                h.differentiate()?,
                Expr::power(h.deep_copy(), Expr::literal(2.0)),
            ),
        ),
    ))
}

/// `(g ^ c)' = c * g^(c - 1) * g'`
fn power_rule(g: &Expr, c: f64) -> Result<Expr, NotDifferentiable> {
    Ok(Expr::product(
        Expr::product(
            Expr::literal(c),
            Expr::power(g.deep_copy(), Expr::literal(c - 1.0)),
        ),
        g.differentiate()?,
    ))
}

/// `(c ^ h)' = log(c) * c^h * h'`
fn exponential_rule(c: f64, h: &Expr) -> Result<Expr, NotDifferentiable> {
    Ok(Expr::product(
        Expr::product(
            Expr::log(Expr::literal(c)),
            Expr::power(Expr::literal(c), h.deep_copy()),
        ),
        h.differentiate()?,
    ))
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::variable()
    }

    fn lit(value: f64) -> Expr {
        Expr::literal(value)
    }

    /// Compares the symbolic derivative of `f` with a forward difference at each point.
    fn check_against_finite_difference(f: &Expr, points: impl IntoIterator<Item = f64>) {
        const DX: f64 = 1e-7;
        const TOL: f64 = 1e-4;

        let derivative = f.differentiate().unwrap();
        for point in points {
            let numeric = (f.evaluate(point + DX) - f.evaluate(point)) / DX;
            let symbolic = derivative.evaluate(point);
            assert!(
                (numeric - symbolic).abs() < TOL * (1.0 + numeric.abs()),
                "for {f} at x={point}, symbolic derivative was {symbolic} but finite difference was {numeric}",
            );
        }
    }

    #[test]
    fn terminals() {
        assert_eq!(x().differentiate().unwrap(), lit(1.0));
        assert_eq!(lit(42.0).differentiate().unwrap(), lit(0.0));
    }

    #[test]
    fn sum_shape() {
        let f = Expr::sum(x(), lit(3.0));
        assert_eq!(f.differentiate().unwrap(), Expr::sum(lit(1.0), lit(0.0)));
    }

    #[test]
    fn product_shape() {
        // (2 * x)' = 2 * 1 + 0 * x
        let f = Expr::product(lit(2.0), x());
        assert_eq!(
            f.differentiate().unwrap(),
            Expr::sum(Expr::product(lit(2.0), lit(1.0)), Expr::product(lit(0.0), x())),
        );
    }

    #[test]
    fn power_rule_shape() {
        // (x^3)' = 3 * x^2 * 1
        let f = Expr::power(x(), lit(3.0));
        assert_eq!(
            f.differentiate().unwrap(),
            Expr::product(Expr::product(lit(3.0), Expr::power(x(), lit(2.0))), lit(1.0)),
        );
    }

    #[test]
    fn exponential_rule_shape() {
        // (2^x)' = log(2) * 2^x * 1
        let f = Expr::power(lit(2.0), x());
        assert_eq!(
            f.differentiate().unwrap(),
            Expr::product(
                Expr::product(Expr::log(lit(2.0)), Expr::power(lit(2.0), x())),
                lit(1.0),
            ),
        );
    }

    #[test]
    fn paren_keeps_grouping() {
        let f = Expr::paren(Expr::product(x(), x()));
        let Expr::Unary(unary) = f.differentiate().unwrap() else {
            panic!("derivative of a parenthesized expression must stay parenthesized");
        };
        assert_eq!(unary.op(), UnaryOp::Paren);
    }

    #[test]
    fn quotient_values() {
        // (x / (x + 1))' = 1 / (x + 1)^2
        let f = Expr::quotient(x(), Expr::paren(Expr::sum(x(), lit(1.0))));
        let d = f.differentiate().unwrap();
        for point in [0.0, 1.0, 2.5, -3.0] {
            assert_float_absolute_eq!(d.evaluate(point), 1.0 / (point + 1.0).powi(2), 1e-12);
        }
    }

    #[test]
    fn log_values() {
        // log(x^2)' = 2 / x
        let f = Expr::log(Expr::power(x(), lit(2.0)));
        let d = f.differentiate().unwrap();
        for point in [0.5, 1.0, 4.0] {
            assert_float_absolute_eq!(d.evaluate(point), 2.0 / point, 1e-12);
        }
    }

    #[test]
    fn finite_difference() {
        let functions = [
            Expr::sum(Expr::power(x(), lit(2.0)), Expr::sum(x(), lit(1.0))),
            Expr::difference(Expr::product(lit(3.0), x()), Expr::quotient(lit(1.0), x())),
            Expr::power(lit(3.0), Expr::product(lit(2.0), x())),
            Expr::log(Expr::paren(Expr::sum(Expr::power(x(), lit(2.0)), lit(1.0)))),
            Expr::quotient(Expr::log(x()), Expr::power(x(), lit(0.5))),
            Expr::product(Expr::power(lit(2.0), x()), Expr::power(x(), lit(3.0))),
        ];
        for f in &functions {
            check_against_finite_difference(f, [0.5, 1.0, 1.7, 3.0]);
        }
    }

    #[test]
    fn second_derivative() {
        // (x^3)'' = 6x
        let f = Expr::power(x(), lit(3.0));
        let d2 = f.differentiate().unwrap().differentiate().unwrap();
        for point in [-2.0, 0.0, 1.5] {
            assert_float_absolute_eq!(d2.evaluate(point), 6.0 * point, 1e-9);
        }
    }

    #[test]
    fn variable_power_fails() {
        let f = Expr::sum(lit(1.0), Expr::power(x(), x()));
        assert_eq!(
            f.differentiate(),
            Err(NotDifferentiable {
                base: "x".to_string(),
                exponent: "x".to_string(),
            }),
        );
    }

    #[test]
    fn derivative_leaves_input_untouched() {
        let f = Expr::quotient(Expr::power(x(), lit(2.0)), Expr::sum(x(), lit(1.0)));
        let before = f.deep_copy();
        let d = f.differentiate().unwrap();
        let _ = d.differentiate().unwrap();
        drop(d);
        assert_eq!(f, before);
        assert_eq!(f.evaluate(2.0), 4.0 / 3.0);
    }
}
