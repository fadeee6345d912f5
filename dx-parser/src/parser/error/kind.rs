use ariadne::Fmt;
use dx_attrs::ErrorKind;
use dx_error::{ErrorKind, EXPR};

/// Which operand of a binary operator is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn describe(&self) -> &'static str {
        match self {
            Self::Left => "before",
            Self::Right => "after",
        }
    }
}

/// There was nothing to parse.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty expression",
    labels = [format!("I expected to see an {} here", "expression".fg(EXPR))],
    help = format!("try something like {}", "2*x^3 + log(x)".fg(EXPR)),
)]
pub struct EmptyExpression;

/// One side of a binary operator is empty, as in `1+2+`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing operand for `{}`", self.op),
    labels = [format!("I expected to see an {} {} this operator", "expression".fg(EXPR), self.side.describe())],
)]
pub struct MissingOperand {
    /// The operator that is missing an operand.
    pub op: char,

    /// The side the operand is missing from.
    pub side: Side,
}

/// A parenthesis was not matched.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unbalanced parenthesis",
    labels = [if self.opening {
        "this parenthesis is not closed"
    } else {
        "this parenthesis was never opened"
    }],
    help = if self.opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnbalancedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// The text is not a number, the variable `x`, a single parenthesized expression or a `log(...)`
/// call.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unrecognized expression",
    labels = ["I could not understand this"],
    help = format!(
        "expressions are built from numbers, the variable {}, {}, parentheses and the operators {}",
        "x".fg(EXPR),
        "log(...)".fg(EXPR),
        "+ - * / ^".fg(EXPR),
    ),
)]
pub struct UnrecognizedExpression;

/// `log(...)` was used directly as the base of a power, as in `log(x)^2`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "`log(...)` cannot be raised to a power directly",
    labels = ["this is the base of `^`"],
    help = format!("wrap it in parentheses, as in {}", "(log(x))^2".fg(EXPR)),
)]
pub struct UngroupedLogBase;

/// The tree would be deeper than the parser allows. Every chained operator counts as a level,
/// as does every pair of parentheses, so a long flat sum can reach the limit too.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression has too many operators or nesting levels",
    labels = [format!("more than {} levels of operators and parentheses start here", self.limit)],
    help = "split the expression up, or raise the depth limit",
)]
pub struct RecursionLimit {
    /// The maximum nesting depth that was configured.
    pub limit: usize,
}
