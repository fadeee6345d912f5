//! Text renderings of expression trees.
//!
//! There are two: the indented tree rendering produced by [`TreeFormatter`] (and
//! [`Expr::convert_to_string`]), which is the format tests compare against, and the one-line
//! infix rendering produced by the [`Display`] implementation of [`Expr`].

use crate::{
    expr::Expr,
    op::{Associativity, BinOp, UnaryOp},
};
use std::fmt::{Display, Formatter, Result};

/// Formats a literal value for the tree rendering: decimal notation with at least one fractional
/// digit for magnitudes in `[1e-3, 1e7)`, computerized scientific notation
/// (`1.0E-4`) otherwise, and `NaN` / `Infinity` / `-Infinity` for the special values.
pub fn fmt_literal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let decimal = value.to_string();
        if decimal.contains('.') {
            decimal
        } else {
            format!("{}.0", decimal)
        }
    } else {
        // `{:e}` gives the shortest round-tripping digits, e.g. `1.5e-7` or `1e10`
        let scientific = format!("{:e}", value);
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
        if mantissa.contains('.') {
            format!("{}E{}", mantissa, exponent)
        } else {
            format!("{}.0E{}", mantissa, exponent)
        }
    }
}

/// Writes a literal so that the parser reads it back as the same value.
fn fmt_infix_literal(f: &mut Formatter, value: f64) -> Result {
    if value.is_nan() {
        write!(f, "NaN")
    } else if value.is_infinite() {
        write!(f, "{}", if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{}", value)
    }
}

/// A wrapper around an [`Expr`] whose [`Display`] implementation renders the tree one node per
/// line, indented with tabs by depth.
#[derive(Debug, Clone, Copy)]
pub struct TreeFormatter<'a> {
    expr: &'a Expr,
    indent: usize,
}

impl<'a> TreeFormatter<'a> {
    /// Creates a formatter that renders the root of `expr` at the given indent level.
    pub fn new(expr: &'a Expr, indent: usize) -> Self {
        Self { expr, indent }
    }

    /// Writes a single line at the given indent level.
    fn line(f: &mut Formatter, indent: usize, text: &str) -> Result {
        for _ in 0..indent {
            write!(f, "\t")?;
        }
        writeln!(f, "{}", text)
    }

    fn fmt_node(f: &mut Formatter, expr: &Expr, indent: usize) -> Result {
        match expr {
            Expr::Literal(value) => Self::line(f, indent, &fmt_literal(*value)),
            Expr::Variable => Self::line(f, indent, "x"),
            Expr::Unary(unary) => {
                Self::line(f, indent, unary.op().sign())?;
                Self::fmt_node(f, unary.operand(), indent + 1)
            },
            Expr::Binary(binary) => {
                Self::line(f, indent, binary.op().sign())?;
                Self::fmt_node(f, binary.lhs(), indent + 1)?;
                Self::fmt_node(f, binary.rhs(), indent + 1)
            },
        }
    }
}

impl Display for TreeFormatter<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        Self::fmt_node(f, self.expr, self.indent)
    }
}

/// Returns the infix rendering of `expr`.
pub fn infix(expr: &Expr) -> String {
    expr.to_string()
}

/// Writes an operand of `op`, grouping it in parentheses if the parser would otherwise read it
/// differently.
///
/// Trees built by the parser never need grouping here, since every explicit parenthesis is its
/// own node. Trees built by differentiation can, e.g. `(x + 1) * 2`.
fn fmt_operand(f: &mut Formatter, op: BinOp, operand: &Expr, is_rhs: bool) -> Result {
    let group = match op {
        // the base of `^` is read at the tightest tier, which does not include `log(...)`
        BinOp::Exp(_) if !is_rhs => !matches!(operand, Expr::Literal(_) | Expr::Variable)
            && !matches!(operand, Expr::Unary(unary) if unary.op() == UnaryOp::Paren),
        _ => {
            let tighter_side = match op.associativity() {
                Associativity::Left => is_rhs,
                Associativity::Right => !is_rhs,
            };
            operand.precedence() < op.precedence()
                || (tighter_side && operand.precedence() == op.precedence())
        },
    };

    if group {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Expr::Literal(value) => fmt_infix_literal(f, *value),
            Expr::Variable => write!(f, "x"),
            Expr::Unary(unary) => match unary.op() {
                UnaryOp::Log => write!(f, "log({})", unary.operand()),
                UnaryOp::Paren => write!(f, "({})", unary.operand()),
            },
            Expr::Binary(binary) => {
                fmt_operand(f, binary.op(), binary.lhs(), false)?;
                write!(f, "{}", binary.op().sign())?;
                fmt_operand(f, binary.op(), binary.rhs(), true)
            },
        }
    }
}
